use crate::{
    allocations::AllocationSnapshot, route_spec::ScenarioTable, BuiltRouter, Request,
    ResponseRecorder,
};
use std::{
    hint::black_box,
    time::{Duration, Instant},
};

/// Upper bound for calibrated iteration counts
pub const MAX_ITERATIONS: u64 = 1_000_000_000;

/// How many times the measured loop runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    /// Exactly this many
    Fixed(u64),
    /// Grow the count until one run lasts at least `target`
    Auto { target: Duration },
}

impl Default for Iterations {
    fn default() -> Self {
        Iterations::Auto {
            target: Duration::from_secs(1),
        }
    }
}

/// Raw numbers from one measured loop
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Outer iterations. For a sweep, one iteration hits every route once.
    pub iterations: u64,
    /// Requests served
    pub dispatches: u64,
    pub elapsed: Duration,
    pub allocations: u64,
    pub allocated_bytes: u64,
}

impl Timing {
    pub fn ns_per_op(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.iterations as f64
    }

    pub fn allocs_per_op(&self) -> u64 {
        self.allocations.checked_div(self.iterations).unwrap_or(0)
    }

    pub fn bytes_per_op(&self) -> u64 {
        self.allocated_bytes.checked_div(self.iterations).unwrap_or(0)
    }
}

/// Response bodies here are tiny; reserving this much up front keeps the
/// recorder from allocating inside the measured loop.
const BODY_CAPACITY: usize = 64;

/// Times `body` with fresh allocation counters. Nothing outside `body`
/// is measured.
#[inline]
fn measured(iterations: u64, dispatches: u64, body: impl FnOnce()) -> Timing {
    let allocations = AllocationSnapshot::now();
    let start = Instant::now();
    body();
    let elapsed = start.elapsed();
    let allocations = AllocationSnapshot::now().since(&allocations);

    Timing {
        iterations,
        dispatches,
        elapsed,
        allocations: allocations.allocations,
        allocated_bytes: allocations.allocated_bytes,
    }
}

/// Next iteration count, from the last run's speed. Grows by at most 100x
/// per step and at least by one.
fn predict(target: Duration, last: &Timing) -> u64 {
    let elapsed = last.elapsed.as_nanos().max(1);
    let mut n = (target.as_nanos() * u128::from(last.iterations) / elapsed) as u64;
    n += n / 5;
    n.min(last.iterations.saturating_mul(100))
        .max(last.iterations + 1)
        .min(MAX_ITERATIONS)
}

/// Dispatches requests to a [`BuiltRouter`] in a tight, single-threaded
/// loop and reports time and allocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct BenchmarkRunner {
    iterations: Iterations,
}

impl BenchmarkRunner {
    pub fn new(iterations: Iterations) -> Self {
        Self { iterations }
    }

    pub fn iterations(&self) -> Iterations {
        self.iterations
    }

    /// Serve the same request `iterations` times
    pub fn run(&self, router: &dyn BuiltRouter, request: &Request, iterations: u64) -> Timing {
        let mut response = ResponseRecorder::with_capacity(BODY_CAPACITY);

        measured(iterations, iterations, || {
            for _ in 0..iterations {
                response.reset();
                router.serve(black_box(request), &mut response);
            }
        })
    }

    /// Serve every entry of `table` once per iteration, in table order,
    /// through a single reused request.
    pub fn run_sweep(
        &self,
        router: &dyn BuiltRouter,
        table: &ScenarioTable<'_>,
        iterations: u64,
    ) -> Timing {
        let longest = table.iter().map(|route| route.path().len()).max().unwrap_or(0);
        let mut request = Request::new(table[0].method().clone(), String::with_capacity(longest));
        let mut response = ResponseRecorder::with_capacity(BODY_CAPACITY);
        let dispatches = iterations.saturating_mul(table.len() as u64);

        measured(iterations, dispatches, || {
            for _ in 0..iterations {
                for route in table.iter() {
                    request.set_route(route);
                    response.reset();
                    router.serve(black_box(&request), &mut response);
                }
            }
        })
    }

    /// [`run`](Self::run) with this runner's [`Iterations`]
    pub fn bench(&self, router: &dyn BuiltRouter, request: &Request) -> Timing {
        self.calibrate(|n| self.run(router, request, n))
    }

    /// [`run_sweep`](Self::run_sweep) with this runner's [`Iterations`]
    pub fn bench_sweep(&self, router: &dyn BuiltRouter, table: &ScenarioTable<'_>) -> Timing {
        self.calibrate(|n| self.run_sweep(router, table, n))
    }

    fn calibrate(&self, mut run: impl FnMut(u64) -> Timing) -> Timing {
        match self.iterations {
            Iterations::Fixed(n) => run(n),
            Iterations::Auto { target } => {
                let mut timing = run(1);
                while timing.elapsed < target && timing.iterations < MAX_ITERATIONS {
                    let n = predict(target, &timing);
                    log::trace!("{} iterations took {:?}, trying {n}", timing.iterations, timing.elapsed);
                    timing = run(n);
                }
                timing
            }
        }
    }
}
