use clap::Parser;
use routebench::{
    write_report, CountingAllocator, Harness, HarnessConfig, Iterations, DEFAULT_SETTLE_ROUNDS,
};
use std::{error::Error, io, time::Duration};

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator::new();

/// Compare dispatch speed and memory use of the bundled router adapters
#[derive(Parser, Debug)]
#[command(name = "compare")]
struct Cli {
    /// Run exactly this many iterations instead of calibrating
    #[arg(short = 'n', long, env = "ROUTEBENCH_ITERATIONS")]
    iterations: Option<u64>,

    /// Calibrate each run to last about this many seconds
    #[arg(short = 't', long, env = "ROUTEBENCH_BENCH_TIME", default_value_t = 1.0)]
    bench_time: f64,

    /// Only run these scenarios (comma-separated or repeated)
    #[arg(short, long, env = "ROUTEBENCH_SCENARIO", value_delimiter = ',')]
    scenario: Vec<String>,

    /// Only run these adapters (comma-separated or repeated)
    #[arg(short, long, env = "ROUTEBENCH_ADAPTER", value_delimiter = ',')]
    adapter: Vec<String>,

    /// Heap settle rounds before each memory sample
    #[arg(long, env = "ROUTEBENCH_SETTLE_ROUNDS", default_value_t = DEFAULT_SETTLE_ROUNDS)]
    settle_rounds: usize,

    /// Skip checking that every router answers its requests before timing
    #[arg(long, env = "ROUTEBENCH_NO_VERIFY", default_value_t = false)]
    no_verify: bool,
}

impl Cli {
    fn config(&self) -> Result<HarnessConfig, Box<dyn Error>> {
        let iterations = match self.iterations {
            Some(n) => Iterations::Fixed(n),
            None => Iterations::Auto {
                target: Duration::try_from_secs_f64(self.bench_time)?,
            },
        };

        let config = self
            .scenario
            .iter()
            .fold(HarnessConfig::new(), |config, name| config.scenario(name));

        Ok(self
            .adapter
            .iter()
            .fold(config, |config, name| config.adapter(name))
            .iterations(iterations)
            .settle_rounds(self.settle_rounds)
            .verify(!self.no_verify)
            .max_log_level(log::max_level()))
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let harness = Harness::new(cli.config()?)?;
    let scenarios = harness.scenarios()?;
    let results = harness.run_all(&scenarios)?;

    println!();
    write_report(&mut io::stdout().lock(), &results)?;
    Ok(())
}
