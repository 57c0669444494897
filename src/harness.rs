use crate::{
    adapters::{self, BuiltRouter, RouterAdapter},
    allocations,
    config::HarnessConfig,
    memory::MemoryProbe,
    report::BenchmarkResult,
    runner::BenchmarkRunner,
    scenario::{self, Mode, ScenarioDefinition},
    success, Error, Request, ResponseRecorder, Result,
};
use log::LevelFilter;
use std::sync::Once;

static PROCESS_INIT: Once = Once::new();

/// Process-wide setup, applied once no matter how often it is called.
///
/// Caps the `log` max level at `max_level` so that library logging stays
/// out of the measured loops, and warns when allocation counting is not
/// installed.
pub fn init_process(max_level: LevelFilter) {
    PROCESS_INIT.call_once(|| {
        if log::max_level() > max_level {
            log::set_max_level(max_level);
        }

        if !allocations::is_active() {
            log::warn!(
                "CountingAllocator is not the global allocator; allocation and heap numbers will read 0"
            );
        }
    });
}

/// Runs scenarios against adapters and collects [`BenchmarkResult`]s.
///
/// Each (scenario, adapter) pair gets its own freshly built router. Building
/// happens inside the [`MemoryProbe`] and outside the timed loop.
#[derive(Debug)]
pub struct Harness {
    adapters: Vec<Box<dyn RouterAdapter>>,
    config: HarnessConfig,
    probe: MemoryProbe,
    runner: BenchmarkRunner,
}

impl Harness {
    /// Every adapter the config selects
    pub fn new(config: HarnessConfig) -> Result<Self> {
        let adapters = if config.adapters().next().is_none() {
            adapters::all()
        } else {
            config.adapters().map(adapters::by_name).collect::<Result<_>>()?
        };
        Ok(Self::with_adapters(adapters, config))
    }

    pub fn with_adapters(adapters: Vec<Box<dyn RouterAdapter>>, config: HarnessConfig) -> Self {
        Self {
            probe: MemoryProbe::default().with_settle_rounds(config.get_settle_rounds()),
            runner: BenchmarkRunner::new(config.get_iterations()),
            adapters,
            config,
        }
    }

    pub fn adapters(&self) -> impl Iterator<Item = &dyn RouterAdapter> {
        self.adapters.iter().map(|adapter| &**adapter)
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The builtin scenarios the config selects
    pub fn scenarios(&self) -> Result<Vec<ScenarioDefinition>> {
        if self.config.scenarios().next().is_none() {
            scenario::builtin()
        } else {
            self.config.scenarios().map(scenario::by_name).collect()
        }
    }

    /// Run every scenario against every adapter, scenario by scenario
    pub fn run_all(&self, scenarios: &[ScenarioDefinition]) -> Result<Vec<BenchmarkResult>> {
        init_process(self.config.get_max_log_level());

        let mut results = Vec::with_capacity(scenarios.len() * self.adapters.len());
        for scenario in scenarios {
            log::info!(
                "{} ({} params, {} routes)",
                scenario.name(),
                scenario.param_count(),
                scenario.routes().len()
            );
            for adapter in self.adapters() {
                results.push(self.run_one(scenario, adapter)?);
            }
        }
        Ok(results)
    }

    /// Build, verify and time one adapter on one scenario
    pub fn run_one(
        &self,
        scenario: &ScenarioDefinition,
        adapter: &dyn RouterAdapter,
    ) -> Result<BenchmarkResult> {
        adapters::initialize(adapter);

        let routes = adapter.translate(scenario.routes());
        let (router, heap_delta) = self
            .probe
            .measure_with(adapter.name(), || adapter.build(&routes, success));
        let router = router?;

        if self.config.get_verify() {
            verify(adapter.name(), &*router, scenario)?;
        }

        let timing = match scenario.mode() {
            Mode::Single => self.runner.bench(&*router, &scenario.request()),
            Mode::Sweep => self.runner.bench_sweep(&*router, scenario.requests()),
        };

        let result = BenchmarkResult::new(adapter.name(), scenario.name(), &timing, heap_delta);
        log::info!("{result}");
        Ok(result)
    }
}

/// Send each of the scenario's requests once and require 200 `success`.
///
/// A router that quietly 404s would otherwise report a very fast, and
/// meaningless, number.
pub fn verify(adapter: &'static str, router: &dyn BuiltRouter, scenario: &ScenarioDefinition) -> Result<()> {
    let mut response = ResponseRecorder::new();
    for route in scenario.requests().iter() {
        response.reset();
        router.serve(&Request::from(route), &mut response);
        if !response.is_success() {
            return Err(Error::Verification {
                adapter,
                method: route.method().to_string(),
                path: route.path().into(),
                status: response.status(),
                body: response.body_string(),
            });
        }
    }
    Ok(())
}
