use super::{build_error, respond, BuiltRouter, MethodTable, RouterAdapter};
use crate::{
    placeholder::PlaceholderStyle, route_spec::ScenarioTable, Handler, Request, ResponseWriter,
    Result,
};
use ::routefinder::Router;

/// [routefinder](https://docs.rs/routefinder), the trie router used by
/// trillium
#[derive(Debug, Clone, Copy, Default)]
pub struct Routefinder;

struct Built(MethodTable<Router<Handler>>);

impl RouterAdapter for Routefinder {
    fn name(&self) -> &'static str {
        "Routefinder"
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Colon
    }

    fn build(&self, routes: &ScenarioTable<'_>, handler: Handler) -> Result<Box<dyn BuiltRouter>> {
        let table = MethodTable::build(routes, Router::new, |router, path| {
            router
                .add(path, handler)
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
            .and_then(|router| router.best_match(request.path()))
            .map(|matched| matched.handler());
        respond(handler, request, response)
    }
}
