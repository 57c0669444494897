use thiserror::Error;

/// Everything that can stop a benchmark run.
///
/// All of these are configuration problems found while tables or routers are
/// being built. A run that produced an error has produced no numbers.
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{0}` is not a valid http method token")]
    InvalidMethod(String),

    #[error("unknown http method `{method}` for route `{path}`")]
    UnknownMethod { method: String, path: String },

    #[error("invalid route template `{template}`: {reason}")]
    Template { template: String, reason: String },

    #[error("a route table needs at least one route")]
    EmptyTable,

    #[error("{adapter} rejected `{path}`: {reason}")]
    Build {
        adapter: &'static str,
        path: String,
        reason: String,
    },

    #[error(
        "{adapter} answered {method} {path} with {status} {body:?}, expected 200 \"success\""
    )]
    Verification {
        adapter: &'static str,
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    #[error("no adapter named `{0}`")]
    UnknownAdapter(String),

    #[error("no scenario named `{0}`")]
    UnknownScenario(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
