//! Heap accounting for the benchmarks.
//!
//! [`CountingAllocator`] wraps the system allocator and keeps process-wide
//! counters. It only sees anything once a binary installs it:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static ALLOC: routebench::CountingAllocator = routebench::CountingAllocator::new();
//! ```
//!
//! Without it every counter stays at zero, which [`is_active`] detects.

use std::{
    alloc::{GlobalAlloc, Layout, System},
    sync::atomic::{AtomicU64, Ordering},
};

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);
static FREED_BYTES: AtomicU64 = AtomicU64::new(0);

/// System allocator plus allocation counters
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingAllocator;

impl CountingAllocator {
    pub const fn new() -> Self {
        Self
    }
}

#[inline]
fn record_alloc(size: usize) {
    ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    ALLOCATED_BYTES.fetch_add(size as u64, Ordering::Relaxed);
}

#[inline]
fn record_free(size: usize) {
    FREED_BYTES.fetch_add(size as u64, Ordering::Relaxed);
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    // a successful realloc counts as one allocation of the new size and a
    // free of the old one
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            record_alloc(new_size);
            record_free(layout.size());
        }
        new_ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        record_free(layout.size());
    }
}

/// The counters at one instant
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSnapshot {
    pub allocations: u64,
    pub allocated_bytes: u64,
    pub freed_bytes: u64,
}

impl AllocationSnapshot {
    pub fn now() -> Self {
        Self {
            allocations: ALLOCATIONS.load(Ordering::Relaxed),
            allocated_bytes: ALLOCATED_BYTES.load(Ordering::Relaxed),
            freed_bytes: FREED_BYTES.load(Ordering::Relaxed),
        }
    }

    /// Bytes currently allocated and not yet freed
    pub fn live_bytes(&self) -> i64 {
        self.allocated_bytes as i64 - self.freed_bytes as i64
    }

    /// What happened between `earlier` and this snapshot
    pub fn since(&self, earlier: &Self) -> Self {
        Self {
            allocations: self.allocations.saturating_sub(earlier.allocations),
            allocated_bytes: self.allocated_bytes.saturating_sub(earlier.allocated_bytes),
            freed_bytes: self.freed_bytes.saturating_sub(earlier.freed_bytes),
        }
    }
}

/// Whether a [`CountingAllocator`] is installed as the global allocator
pub fn is_active() -> bool {
    let before = ALLOCATIONS.load(Ordering::Relaxed);
    drop(std::hint::black_box(Box::new(0_u64)));
    ALLOCATIONS.load(Ordering::Relaxed) != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_subtracts() {
        let earlier = AllocationSnapshot {
            allocations: 2,
            allocated_bytes: 100,
            freed_bytes: 40,
        };
        let later = AllocationSnapshot {
            allocations: 5,
            allocated_bytes: 164,
            freed_bytes: 40,
        };
        let delta = later.since(&earlier);
        assert_eq!(delta.allocations, 3);
        assert_eq!(delta.allocated_bytes, 64);
        assert_eq!(delta.freed_bytes, 0);
        assert_eq!(later.live_bytes(), 124);
    }

    #[test]
    fn live_bytes_can_be_negative() {
        let snapshot = AllocationSnapshot {
            allocations: 0,
            allocated_bytes: 0,
            freed_bytes: 16,
        };
        assert_eq!(snapshot.live_bytes(), -16);
    }
}
