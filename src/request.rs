use crate::{route_spec::RouteSpec, ResponseWriter};
use http::Method;
use std::fmt::{self, Debug, Formatter};

/// The request a [`BuiltRouter`](crate::BuiltRouter) serves.
///
/// Only the method and the path vary between benchmarks. A single request
/// is reused across dispatches, so [`Request::set`] overwrites the path in
/// place instead of allocating a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Point this request at another route, reusing the path buffer
    #[inline]
    pub fn set(&mut self, method: &Method, path: &str) {
        if self.method != *method {
            self.method = method.clone();
        }
        self.path.clear();
        self.path.push_str(path);
    }

    /// Point this request at a concrete route spec
    #[inline]
    pub fn set_route(&mut self, route: &RouteSpec<'_>) {
        self.set(route.method(), route.path());
    }
}

impl From<&RouteSpec<'_>> for Request {
    fn from(route: &RouteSpec<'_>) -> Self {
        Self::new(route.method().clone(), route.path())
    }
}

impl Debug for Request {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("Request({} {})", self.method, self.path))
    }
}

/// The function every registered route dispatches to
pub type Handler = fn(&Request, &mut dyn ResponseWriter);

/// The fixed benchmark handler: 200 with body `success`.
///
/// Every adapter registers this same handler so that the measured cost is
/// dispatch only.
pub fn success(_request: &Request, response: &mut dyn ResponseWriter) {
    response.write_status(200);
    response.write_body(b"success");
}
