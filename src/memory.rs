use crate::allocations::AllocationSnapshot;
use std::sync::atomic::{fence, Ordering};

/// How many times the heap is settled before each sample.
///
/// This is a tunable, not a guarantee: settling narrows the noise in a
/// reading, it does not remove it.
pub const DEFAULT_SETTLE_ROUNDS: usize = 4;

/// A source of "bytes currently on the heap" readings
pub trait HeapSampler {
    /// Give the heap a chance to reach a quiet state before a sample
    fn settle(&self) {}

    fn live_bytes(&self) -> i64;
}

/// Reads the [`CountingAllocator`](crate::CountingAllocator) counters.
///
/// Rust frees eagerly, so there is nothing to collect. Settling only fences
/// so that counter updates made before the sample are visible to it.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllocatorSampler;

impl HeapSampler for AllocatorSampler {
    fn settle(&self) {
        fence(Ordering::SeqCst);
    }

    fn live_bytes(&self) -> i64 {
        AllocationSnapshot::now().live_bytes()
    }
}

/// Measures how much heap a unit of work leaves behind.
///
/// Readings are advisory. Anything else allocating on another thread shows
/// up in the delta, which can be negative. A single before/after pair is
/// taken and reported as is.
#[derive(Debug, Clone)]
pub struct MemoryProbe<S = AllocatorSampler> {
    sampler: S,
    settle_rounds: usize,
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new(AllocatorSampler)
    }
}

impl<S: HeapSampler> MemoryProbe<S> {
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            settle_rounds: DEFAULT_SETTLE_ROUNDS,
        }
    }

    pub fn with_settle_rounds(mut self, settle_rounds: usize) -> Self {
        self.settle_rounds = settle_rounds;
        self
    }

    pub fn settle_rounds(&self) -> usize {
        self.settle_rounds
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    fn sample(&self) -> i64 {
        for _ in 0..self.settle_rounds {
            self.sampler.settle();
        }
        self.sampler.live_bytes()
    }

    /// Run `workload` once and return the change in live heap bytes.
    ///
    /// Anything the workload drops before returning does not count. Use
    /// [`measure_with`](Self::measure_with) to measure what it builds.
    pub fn measure(&self, name: &str, workload: impl FnOnce()) -> i64 {
        self.measure_with(name, workload).1
    }

    /// Like [`measure`](Self::measure), but hands back what the workload
    /// returned. The value is still alive at the second sample, so its heap
    /// footprint is part of the delta.
    pub fn measure_with<T>(&self, name: &str, workload: impl FnOnce() -> T) -> (T, i64) {
        let before = self.sample();
        let value = workload();
        let after = self.sample();

        let delta = after - before;
        log::debug!("{name}: {delta} Bytes");
        (value, delta)
    }
}
