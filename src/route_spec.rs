use crate::{Error, Result};
use http::Method;
use smartcow::SmartCow;
use std::{
    convert::TryFrom,
    fmt::{self, Debug, Display, Formatter},
    ops::Deref,
    str::FromStr,
};

/// The methods a benchmark table may register, in slot order.
pub const SUPPORTED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

/// Index of `method` in [`SUPPORTED_METHODS`], or None for anything else
#[inline]
pub fn method_slot(method: &Method) -> Option<usize> {
    SUPPORTED_METHODS.iter().position(|m| m == method)
}

/// Parse a method token.
///
/// Any syntactically valid token parses, including ones outside
/// [`SUPPORTED_METHODS`]. Rejecting those is the job of whoever builds a
/// table or a router, so that the error can name the offending route.
pub fn parse_method(method: &str) -> Result<Method> {
    Method::from_bytes(method.as_bytes()).map_err(|_| Error::InvalidMethod(method.into()))
}

/// One endpoint to register: a method and a path.
///
/// The path is either a route template (in some placeholder syntax) or a
/// concrete request path, depending on which side of the benchmark it is
/// used on. Templates that need no rewriting stay borrowed.
#[derive(Clone)]
pub struct RouteSpec<'a> {
    method: Method,
    path: SmartCow<'a>,
}

impl<'a> RouteSpec<'a> {
    /// Build a route spec from a method token and a path
    pub fn new(method: &str, path: impl Into<SmartCow<'a>>) -> Result<Self> {
        Ok(Self::from_parts(parse_method(method)?, path))
    }

    pub fn from_parts(method: Method, path: impl Into<SmartCow<'a>>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path without giving up a borrow of the original template
    pub fn path_cow(&self) -> SmartCow<'a> {
        self.path.clone()
    }

    /// Whether the method is one a table may contain
    pub fn is_supported(&self) -> bool {
        method_slot(&self.method).is_some()
    }

    /// The same method with a different path
    pub fn with_path<'b>(&self, path: impl Into<SmartCow<'b>>) -> RouteSpec<'b> {
        RouteSpec {
            method: self.method.clone(),
            path: path.into(),
        }
    }

    pub(crate) fn unknown_method(&self) -> Error {
        Error::UnknownMethod {
            method: self.method.to_string(),
            path: self.path().into(),
        }
    }
}

impl PartialEq for RouteSpec<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method && self.path() == other.path()
    }
}

impl Eq for RouteSpec<'_> {}

impl Display for RouteSpec<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path())
    }
}

impl Debug for RouteSpec<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("RouteSpec({self})"))
    }
}

impl FromStr for RouteSpec<'static> {
    type Err = Error;

    /// Parses `"METHOD /path"`
    fn from_str(s: &str) -> Result<Self> {
        let (method, path) = s.trim().split_once(' ').ok_or_else(|| Error::Template {
            template: s.into(),
            reason: String::from("expected `METHOD /path`"),
        })?;
        RouteSpec::new(method, String::from(path.trim()))
    }
}

impl TryFrom<&str> for RouteSpec<'static> {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

/// An ordered, non-empty sequence of [`RouteSpec`]s making up one benchmark
/// table.
///
/// Every entry's method is checked against [`SUPPORTED_METHODS`] on
/// construction. A table with an unknown method is never built, since
/// skipping the entry would quietly make adapters incomparable.
#[derive(Clone, PartialEq, Eq)]
pub struct ScenarioTable<'a> {
    routes: Vec<RouteSpec<'a>>,
}

impl<'a> ScenarioTable<'a> {
    pub fn new(routes: Vec<RouteSpec<'a>>) -> Result<Self> {
        if routes.is_empty() {
            return Err(Error::EmptyTable);
        }

        if let Some(route) = routes.iter().find(|route| !route.is_supported()) {
            return Err(route.unknown_method());
        }

        Ok(Self { routes })
    }

    pub fn single(route: RouteSpec<'a>) -> Result<Self> {
        Self::new(vec![route])
    }

    /// Rewrite every path, keeping methods and order. The methods were
    /// already validated, so this cannot fail.
    pub fn map_paths<'b>(&self, mut f: impl FnMut(&RouteSpec<'a>) -> SmartCow<'b>) -> ScenarioTable<'b> {
        ScenarioTable {
            routes: self.routes.iter().map(|route| route.with_path(f(route))).collect(),
        }
    }
}

impl<'a> Deref for ScenarioTable<'a> {
    type Target = [RouteSpec<'a>];

    fn deref(&self) -> &Self::Target {
        &self.routes
    }
}

impl Debug for ScenarioTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    type Result = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parsing() -> Result {
        let route: RouteSpec = "GET /user/:name".parse()?;
        assert_eq!(route.method(), &Method::GET);
        assert_eq!(route.path(), "/user/:name");
        assert_eq!(route.to_string(), "GET /user/:name");

        assert!(matches!(
            "/user/:name".parse::<RouteSpec>(),
            Err(Error::Template { .. })
        ));
        assert!(matches!(
            RouteSpec::new("GE T", "/"),
            Err(Error::InvalidMethod(_))
        ));
        Ok(())
    }

    #[test]
    fn foobar_parses_but_is_not_supported() -> Result {
        let route = RouteSpec::new("FOOBAR", "/")?;
        assert!(!route.is_supported());
        assert_eq!(method_slot(route.method()), None);
        Ok(())
    }

    #[test]
    fn tables_reject_unknown_methods() -> Result {
        let table = ScenarioTable::new(vec![
            RouteSpec::new("GET", "/a")?,
            RouteSpec::new("FOOBAR", "/b")?,
        ]);

        match table {
            Err(Error::UnknownMethod { method, path }) => {
                assert_eq!(method, "FOOBAR");
                assert_eq!(path, "/b");
            }
            other => panic!("expected UnknownMethod, got {other:?}"),
        }

        assert!(matches!(ScenarioTable::new(vec![]), Err(Error::EmptyTable)));
        Ok(())
    }

    #[test]
    fn lowercase_methods_are_not_supported() -> Result {
        assert!(ScenarioTable::single(RouteSpec::new("get", "/")?).is_err());
        Ok(())
    }

    #[test]
    fn map_paths_keeps_order_and_methods() -> Result {
        let table = ScenarioTable::new(vec![
            RouteSpec::new("GET", "/a")?,
            RouteSpec::new("DELETE", "/b")?,
        ])?;
        let mapped = table.map_paths(|route| format!("/x{}", route.path()).into());
        assert_eq!(mapped[0].to_string(), "GET /x/a");
        assert_eq!(mapped[1].to_string(), "DELETE /x/b");
        Ok(())
    }
}
