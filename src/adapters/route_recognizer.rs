use super::{respond, BuiltRouter, MethodTable, RouterAdapter};
use crate::{
    placeholder::PlaceholderStyle, route_spec::ScenarioTable, Handler, Request, ResponseWriter,
    Result,
};
use ::route_recognizer::Router;

/// [route-recognizer](https://docs.rs/route-recognizer), the NFA router
/// used by tide
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteRecognizer;

struct Built(MethodTable<Router<Handler>>);

impl RouterAdapter for RouteRecognizer {
    fn name(&self) -> &'static str {
        "RouteRecognizer"
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Colon
    }

    fn build(&self, routes: &ScenarioTable<'_>, handler: Handler) -> Result<Box<dyn BuiltRouter>> {
        let table = MethodTable::build(routes, Router::new, |router, path| {
            router.add(path, handler);
            Ok(())
        })?;
        Ok(Box::new(Built(table)))
    }
}

impl BuiltRouter for Built {
    fn serve(&self, request: &Request, response: &mut dyn ResponseWriter) {
        let handler = self
            .0
            .get(request.method())
            .and_then(|router| router.recognize(request.path()).ok())
            .map(|matched| *matched.handler());
        respond(handler, request, response)
    }
}
