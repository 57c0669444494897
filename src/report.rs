use crate::runner::Timing;
use smartstring::alias::String as SmartString;
use std::{
    fmt::{self, Display, Formatter},
    io::{self, Write},
};

/// What one (adapter, scenario) pair measured
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    /// `<Adapter>_<Scenario>`, e.g. `Matchit_Param5`
    pub name: SmartString,
    pub iterations: u64,
    pub ns_per_op: f64,
    pub allocs_per_op: u64,
    pub bytes_per_op: u64,
    /// Heap left behind by building the router
    pub heap_delta_bytes: i64,
}

impl BenchmarkResult {
    pub fn new(adapter: &str, scenario: &str, timing: &Timing, heap_delta_bytes: i64) -> Self {
        let mut name = SmartString::from(adapter);
        name.push('_');
        name.push_str(scenario);

        Self {
            name,
            iterations: timing.iterations,
            ns_per_op: timing.ns_per_op(),
            allocs_per_op: timing.allocs_per_op(),
            bytes_per_op: timing.bytes_per_op(),
            heap_delta_bytes,
        }
    }
}

impl Display for BenchmarkResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Benchmark{:<28}\t{:>10}\t{:>10.1} ns/op\t{:>6} B/op\t{:>4} allocs/op\t{:>8} heap B",
            self.name,
            self.iterations,
            self.ns_per_op,
            self.bytes_per_op,
            self.allocs_per_op,
            self.heap_delta_bytes
        )
    }
}

/// One line per result, in the order given
pub fn write_report(out: &mut impl Write, results: &[BenchmarkResult]) -> io::Result<()> {
    for result in results {
        writeln!(out, "{result}")?;
    }
    out.flush()
}
