use crate::{
    placeholder,
    route_spec::{RouteSpec, ScenarioTable},
    Error, Request, Result,
};
use smartstring::alias::String as SmartString;

/// Literal used for every parameter of a sweep scenario's requests
pub const SWEEP_LITERAL: &str = "42";

pub const PARAM_COLON: &str = "/user/:name";
pub const PARAM_ROUTE: &str = "/user/gordon";

pub const FIVE_COLON: &str = "/:a/:b/:c/:d/:e";
pub const FIVE_ROUTE: &str = "/test/test/test/test/test";

pub const TWENTY_COLON: &str = "/:a/:b/:c/:d/:e/:f/:g/:h/:i/:j/:k/:l/:m/:n/:o/:p/:q/:r/:s/:t";
pub const TWENTY_ROUTE: &str = "/a/b/c/d/e/f/g/h/i/j/k/l/m/n/o/p/q/r/s/t";

/// A small REST api, every method represented
pub const API_ROUTES: &[(&str, &str)] = &[
    ("GET", "/users"),
    ("POST", "/users"),
    ("GET", "/users/:id"),
    ("PUT", "/users/:id"),
    ("PATCH", "/users/:id"),
    ("DELETE", "/users/:id"),
    ("GET", "/users/:id/posts"),
    ("POST", "/users/:id/posts"),
    ("GET", "/users/:id/posts/:post"),
    ("DELETE", "/users/:id/posts/:post"),
    ("GET", "/teams/:team/members/:id"),
    ("GET", "/search"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One route, one request, hit repeatedly
    Single,
    /// Every route of the table hit once per iteration
    Sweep,
}

/// A named benchmark configuration.
///
/// `routes` are canonical `:name` templates, translated per adapter before
/// registration. `requests` are the concrete paths sent at the built router:
/// one for a single-route scenario, one per route (same order) for a sweep.
#[derive(Debug, Clone)]
pub struct ScenarioDefinition {
    name: SmartString,
    mode: Mode,
    routes: ScenarioTable<'static>,
    requests: ScenarioTable<'static>,
}

impl ScenarioDefinition {
    /// One route registered, one matching request dispatched
    pub fn single(name: &str, method: &str, template: &str, path: &str) -> Result<Self> {
        placeholder::validate(template)?;
        let route = RouteSpec::new(method, String::from(template))?;
        let request = route.with_path(String::from(path));

        Ok(Self {
            name: name.into(),
            mode: Mode::Single,
            routes: ScenarioTable::single(route)?,
            requests: ScenarioTable::single(request)?,
        })
    }

    /// Every route registered and swept; each request fills the route's
    /// placeholders with `literal`
    pub fn sweep(name: &str, routes: &[(&str, &str)], literal: &str) -> Result<Self> {
        let routes = routes
            .iter()
            .map(|&(method, template)| {
                placeholder::validate(template)?;
                RouteSpec::new(method, String::from(template))
            })
            .collect::<Result<Vec<_>>>()?;
        let routes = ScenarioTable::new(routes)?;
        let requests = routes.map_paths(|route| placeholder::fill(route.path(), |_| literal).into());

        Ok(Self {
            name: name.into(),
            mode: Mode::Sweep,
            routes,
            requests,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Canonical route templates
    pub fn routes(&self) -> &ScenarioTable<'static> {
        &self.routes
    }

    /// Concrete requests, aligned with [`routes`](Self::routes) for a sweep
    pub fn requests(&self) -> &ScenarioTable<'static> {
        &self.requests
    }

    /// The first concrete request
    pub fn request(&self) -> Request {
        Request::from(&self.requests[0])
    }

    /// Placeholders in the widest route
    pub fn param_count(&self) -> usize {
        self.routes
            .iter()
            .map(|route| placeholder::param_count(route.path()))
            .max()
            .unwrap_or(0)
    }
}

/// The standard scenarios: one, five and twenty parameters, then the api
/// sweep
pub fn builtin() -> Result<Vec<ScenarioDefinition>> {
    Ok(vec![
        ScenarioDefinition::single("Param", "GET", PARAM_COLON, PARAM_ROUTE)?,
        ScenarioDefinition::single("Param5", "GET", FIVE_COLON, FIVE_ROUTE)?,
        ScenarioDefinition::single("Param20", "GET", TWENTY_COLON, TWENTY_ROUTE)?,
        ScenarioDefinition::sweep("Api", API_ROUTES, SWEEP_LITERAL)?,
    ])
}

/// Look a builtin scenario up by name, ignoring case
pub fn by_name(name: &str) -> Result<ScenarioDefinition> {
    builtin()?
        .into_iter()
        .find(|scenario| scenario.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownScenario(name.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    type Result = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn builtins() -> Result {
        let scenarios = builtin()?;
        let summary: Vec<_> = scenarios
            .iter()
            .map(|s| (s.name(), s.mode(), s.param_count(), s.routes().len()))
            .collect();
        assert_eq!(
            summary,
            [
                ("Param", Mode::Single, 1, 1),
                ("Param5", Mode::Single, 5, 1),
                ("Param20", Mode::Single, 20, 1),
                ("Api", Mode::Sweep, 2, 12),
            ]
        );
        Ok(())
    }

    #[test]
    fn sweep_requests_line_up_with_routes() -> Result {
        let api = by_name("api")?;
        assert_eq!(api.requests().len(), api.routes().len());
        assert_eq!(api.requests()[0].to_string(), "GET /users");
        assert_eq!(api.requests()[5].to_string(), "DELETE /users/42");
        assert_eq!(api.requests()[9].to_string(), "DELETE /users/42/posts/42");
        assert_eq!(api.requests()[10].to_string(), "GET /teams/42/members/42");
        Ok(())
    }

    #[test]
    fn single_request() -> Result {
        let five = by_name("Param5")?;
        let request = five.request();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), FIVE_ROUTE);
        Ok(())
    }

    #[test]
    fn bad_definitions() {
        assert!(matches!(
            ScenarioDefinition::single("x", "FOOBAR", "/", "/"),
            Err(Error::UnknownMethod { .. })
        ));
        assert!(matches!(
            ScenarioDefinition::single("x", "GET", "/:", "/a"),
            Err(Error::Template { .. })
        ));
        assert!(matches!(
            ScenarioDefinition::sweep("x", &[], "1"),
            Err(Error::EmptyTable)
        ));
        assert!(matches!(by_name("static"), Err(Error::UnknownScenario(_))));
    }
}
