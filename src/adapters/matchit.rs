use super::{build_error, respond, BuiltRouter, MethodTable, RouterAdapter};
use crate::{
    placeholder::PlaceholderStyle, route_spec::ScenarioTable, Handler, Request, ResponseWriter,
    Result,
};
use ::matchit::Router;

/// [matchit](https://docs.rs/matchit), the radix tree behind axum
#[derive(Debug, Clone, Copy, Default)]
pub struct Matchit;

struct Built(MethodTable<Router<Handler>>);

impl RouterAdapter for Matchit {
    fn name(&self) -> &'static str {
        "Matchit"
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Brace
    }

    fn build(&self, routes: &ScenarioTable<'_>, handler: Handler) -> Result<Box<dyn BuiltRouter>> {
        let table = MethodTable::build(routes, Router::new, |router, path| {
            router
                .insert(path, handler)
                .map_err(|e| build_error(self.name(), path, e))
        })?;
        Ok(Box::new(Built(table)))
    }
}

impl BuiltRouter for Built {
    fn serve(&self, request: &Request, response: &mut dyn ResponseWriter) {
        let handler = self
            .0
            .get(request.method())
            .and_then(|router| router.at(request.path()).ok())
            .map(|matched| matched.value);
        respond(handler, request, response)
    }
}
