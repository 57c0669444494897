use crate::{memory::DEFAULT_SETTLE_ROUNDS, runner::Iterations};
use log::LevelFilter;
use smartstring::alias::String as SmartString;
use std::time::Duration;

/// Knobs for a [`Harness`](crate::Harness) run.
///
/// ```
/// use routebench::{HarnessConfig, Iterations};
/// let config = HarnessConfig::default()
///     .iterations(Iterations::Fixed(1_000))
///     .adapter("Matchit")
///     .scenario("Param5");
/// assert_eq!(config.get_iterations(), Iterations::Fixed(1_000));
/// ```
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    iterations: Iterations,
    settle_rounds: usize,
    verify: bool,
    max_log_level: LevelFilter,
    adapters: Vec<SmartString>,
    scenarios: Vec<SmartString>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iterations: Iterations::default(),
            settle_rounds: DEFAULT_SETTLE_ROUNDS,
            verify: true,
            max_log_level: LevelFilter::Info,
            adapters: vec![],
            scenarios: vec![],
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    /// Calibrate iteration counts so each run lasts about `target`
    pub fn bench_time(self, target: Duration) -> Self {
        self.iterations(Iterations::Auto { target })
    }

    /// Heap settle rounds before each memory sample
    pub fn settle_rounds(mut self, settle_rounds: usize) -> Self {
        self.settle_rounds = settle_rounds;
        self
    }

    /// Check every built router answers its scenario's requests with 200
    /// `success` before timing it. On by default.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Log level cap applied once, before the first run
    pub fn max_log_level(mut self, level: LevelFilter) -> Self {
        self.max_log_level = level;
        self
    }

    /// Only run this adapter. May be repeated; no call means every adapter.
    pub fn adapter(mut self, name: &str) -> Self {
        self.adapters.push(name.into());
        self
    }

    /// Only run this builtin scenario. May be repeated; no call means every
    /// scenario.
    pub fn scenario(mut self, name: &str) -> Self {
        self.scenarios.push(name.into());
        self
    }

    pub fn get_iterations(&self) -> Iterations {
        self.iterations
    }

    pub fn get_settle_rounds(&self) -> usize {
        self.settle_rounds
    }

    pub fn get_verify(&self) -> bool {
        self.verify
    }

    pub fn get_max_log_level(&self) -> LevelFilter {
        self.max_log_level
    }

    pub fn adapters(&self) -> impl Iterator<Item = &str> {
        self.adapters.iter().map(|name| name.as_str())
    }

    pub fn scenarios(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|name| name.as_str())
    }
}
