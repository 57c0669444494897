use super::{respond, BuiltRouter, MethodTable, RouterAdapter};
use crate::{
    placeholder::PlaceholderStyle, route_spec::ScenarioTable, Handler, Request, ResponseWriter,
    Result,
};
use ::path_tree::PathTree as Tree;

/// [path-tree](https://docs.rs/path-tree)
#[derive(Debug, Clone, Copy, Default)]
pub struct PathTree;

struct Built(MethodTable<Tree<Handler>>);

impl RouterAdapter for PathTree {
    fn name(&self) -> &'static str {
        "PathTree"
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Colon
    }

    fn build(&self, routes: &ScenarioTable<'_>, handler: Handler) -> Result<Box<dyn BuiltRouter>> {
        let table = MethodTable::build(routes, Tree::new, |tree, path| {
            tree.insert(path, handler);
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
            .and_then(|tree| tree.find(request.path()))
            .map(|(handler, _path)| handler);
        respond(handler, request, response)
    }
}
