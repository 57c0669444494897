//! One [`RouterAdapter`] per routing library under comparison.
//!
//! Adapters are glue: they register a [`ScenarioTable`] with their library,
//! and hand back an opaque [`BuiltRouter`] that serves [`Request`]s. Nothing
//! library-specific leaks past that boundary.

use crate::{
    placeholder::PlaceholderStyle,
    response::not_found,
    route_spec::{method_slot, RouteSpec, ScenarioTable},
    Error, Handler, Request, ResponseWriter, Result,
};
use http::Method;
use std::{collections::BTreeSet, sync::Mutex};

mod actix;
mod matchit;
mod path_tree;
mod route_recognizer;
mod routefinder;

pub use self::actix::ActixRouter;
pub use self::matchit::Matchit;
pub use self::path_tree::PathTree;
pub use self::route_recognizer::RouteRecognizer;
pub use self::routefinder::Routefinder;

/// A ready-to-serve router. Opaque to the harness.
pub trait BuiltRouter {
    fn serve(&self, request: &Request, response: &mut dyn ResponseWriter);
}

/// Wires one routing library into the benchmark.
pub trait RouterAdapter {
    /// Used in benchmark names, e.g. `Matchit` in `Matchit_Param5`
    fn name(&self) -> &'static str;

    /// The placeholder syntax [`build`](RouterAdapter::build) expects
    fn placeholder_style(&self) -> PlaceholderStyle;

    /// Library-wide setup. Runs at most once per process, through
    /// [`initialize`], before the first router of this kind is built.
    fn init(&self) {}

    /// Register every route of an already-translated table.
    ///
    /// Fails on a method outside [`SUPPORTED_METHODS`] and on anything the
    /// library itself refuses.
    ///
    /// [`SUPPORTED_METHODS`]: crate::route_spec::SUPPORTED_METHODS
    fn build(&self, routes: &ScenarioTable<'_>, handler: Handler) -> Result<Box<dyn BuiltRouter>>;

    /// Build a router holding exactly one route.
    ///
    /// `path` is in this adapter's own syntax, not translated. Library init
    /// runs first if it has not yet.
    fn build_single(
        &self,
        method: &str,
        path: &str,
        handler: Handler,
    ) -> Result<Box<dyn BuiltRouter>> {
        let route = RouteSpec::new(method, path)?;
        if !route.is_supported() {
            return Err(route.unknown_method());
        }
        self.placeholder_style().check(path)?;

        initialize(self);
        self.build(&ScenarioTable::single(route)?, handler)
    }

    /// Rewrite a table of canonical `:name` templates into this adapter's
    /// syntax
    fn translate<'a>(&self, routes: &ScenarioTable<'a>) -> ScenarioTable<'a> {
        let style = self.placeholder_style();
        routes.map_paths(|route| match style {
            PlaceholderStyle::Colon => route.path_cow(),
            _ => style.translate(route.path()).into_owned(),
        })
    }
}

impl std::fmt::Debug for dyn RouterAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

static INITIALIZED: Mutex<BTreeSet<&'static str>> = Mutex::new(BTreeSet::new());

/// Run `adapter.init()` unless an adapter with the same name was already
/// initialized in this process. Returns whether `init` ran.
pub fn initialize<A: RouterAdapter + ?Sized>(adapter: &A) -> bool {
    let mut initialized = INITIALIZED.lock().unwrap_or_else(|e| e.into_inner());
    if initialized.insert(adapter.name()) {
        log::debug!("initializing {}", adapter.name());
        adapter.init();
        true
    } else {
        false
    }
}

/// Every adapter, in reporting order
pub fn all() -> Vec<Box<dyn RouterAdapter>> {
    vec![
        Box::new(ActixRouter),
        Box::new(Matchit),
        Box::new(PathTree),
        Box::new(RouteRecognizer),
        Box::new(Routefinder),
    ]
}

/// Look an adapter up by name, ignoring case
pub fn by_name(name: &str) -> Result<Box<dyn RouterAdapter>> {
    all()
        .into_iter()
        .find(|adapter| adapter.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownAdapter(name.into()))
}

/// One router per supported method.
///
/// Most libraries here match paths only, so adapters keep a separate router
/// for each method, and a lookup picks the method's router first.
pub(crate) struct MethodTable<R> {
    routers: [Option<R>; 5],
}

impl<R> Default for MethodTable<R> {
    fn default() -> Self {
        Self {
            routers: [None, None, None, None, None],
        }
    }
}

impl<R> MethodTable<R> {
    /// Register every route with `add`, creating each method's router with
    /// `new` the first time the method is seen.
    pub(crate) fn build(
        routes: &ScenarioTable<'_>,
        mut new: impl FnMut() -> R,
        mut add: impl FnMut(&mut R, &str) -> Result<()>,
    ) -> Result<Self> {
        let mut table = Self::default();
        for route in routes.iter() {
            let slot = method_slot(route.method()).ok_or_else(|| route.unknown_method())?;
            let router = table.routers[slot].get_or_insert_with(&mut new);
            add(router, route.path())?;
        }
        Ok(table)
    }

    #[inline]
    pub(crate) fn get(&self, method: &Method) -> Option<&R> {
        self.routers[method_slot(method)?].as_ref()
    }

    /// Consume the table, turning each router into its finished form
    pub(crate) fn map<S>(self, mut f: impl FnMut(R) -> S) -> MethodTable<S> {
        let [a, b, c, d, e] = self.routers;
        MethodTable {
            routers: [a.map(&mut f), b.map(&mut f), c.map(&mut f), d.map(&mut f), e.map(&mut f)],
        }
    }
}

/// Run the matched handler, or answer 404 when nothing matched
#[inline]
pub(crate) fn respond(
    handler: Option<&Handler>,
    request: &Request,
    response: &mut dyn ResponseWriter,
) {
    match handler {
        Some(handler) => handler(request, response),
        None => not_found(response),
    }
}

pub(crate) fn build_error(adapter: &'static str, path: &str, reason: impl ToString) -> Error {
    Error::Build {
        adapter,
        path: path.into(),
        reason: reason.to_string(),
    }
}
