//! # Routebench
//!
//! Dispatch benchmarks for rust http routers.
//!
//! Every router under comparison is wrapped in a [`RouterAdapter`] that
//! registers the same table of routes, all pointing at the same
//! [`success`] handler. A [`Harness`] then builds each router inside a
//! [`MemoryProbe`], checks that it answers every request of the scenario,
//! and times it with a [`BenchmarkRunner`].
//!
//! ```rust
//! use routebench::{adapters::Matchit, success, Request, ResponseRecorder, RouterAdapter};
//!
//! let router = Matchit.build_single("GET", "/user/{name}", success)?;
//! let mut response = ResponseRecorder::new();
//! router.serve(&Request::get("/user/gordon"), &mut response);
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body(), b"success");
//! # Ok::<(), routebench::Error>(())
//! ```
//!
//! Allocation counts and heap deltas come from [`CountingAllocator`], which
//! the benchmarking binary has to install as its `#[global_allocator]`.

pub mod adapters;
mod allocations;
mod config;
mod error;
mod harness;
mod memory;
pub mod placeholder;
mod report;
mod request;
mod response;
pub mod route_spec;
mod runner;
pub mod scenario;

pub use adapters::{BuiltRouter, RouterAdapter};
pub use allocations::{is_active as counting_allocator_active, AllocationSnapshot, CountingAllocator};
pub use config::HarnessConfig;
pub use error::{Error, Result};
pub use harness::{init_process, verify, Harness};
pub use memory::{AllocatorSampler, HeapSampler, MemoryProbe, DEFAULT_SETTLE_ROUNDS};
pub use placeholder::PlaceholderStyle;
pub use report::{write_report, BenchmarkResult};
pub use request::{success, Handler, Request};
pub use response::{ResponseRecorder, ResponseWriter};
pub use route_spec::{RouteSpec, ScenarioTable};
pub use runner::{BenchmarkRunner, Iterations, Timing, MAX_ITERATIONS};
pub use scenario::{Mode, ScenarioDefinition};
