use super::{respond, BuiltRouter, MethodTable, RouterAdapter};
use crate::{
    placeholder::PlaceholderStyle, route_spec::ScenarioTable, Handler, Request, ResponseWriter,
    Result,
};
use actix_router::{Path, Router};

/// [actix-router](https://docs.rs/actix-router), the resource matcher
/// underneath actix-web.
///
/// Routes are collected in a builder per method and finished once every
/// route is in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActixRouter;

struct Built(MethodTable<Router<Handler>>);

impl RouterAdapter for ActixRouter {
    fn name(&self) -> &'static str {
        "ActixRouter"
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Brace
    }

    fn build(&self, routes: &ScenarioTable<'_>, handler: Handler) -> Result<Box<dyn BuiltRouter>> {
        let builders = MethodTable::build(routes, Router::<Handler>::build, |builder, path| {
            builder.path(path, handler);
            Ok(())
        })?;
        Ok(Box::new(Built(builders.map(|builder| builder.finish()))))
    }
}

impl BuiltRouter for Built {
    fn serve(&self, request: &Request, response: &mut dyn ResponseWriter) {
        let handler = self.0.get(request.method()).and_then(|router| {
            let mut path = Path::new(request.path());
            router.recognize(&mut path).map(|(handler, _id)| handler)
        });
        respond(handler, request, response)
    }
}
