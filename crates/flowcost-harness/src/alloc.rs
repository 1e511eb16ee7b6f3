//! Heap allocation accounting.
//!
//! [`CountingAllocator`] wraps the system allocator and bumps two process
//! counters on every successful allocation. A binary opts in by declaring
//! it as its `#[global_allocator]`; the runner then reports allocations
//! per iteration. Without it the counters never move, which
//! [`is_counting()`] detects with a probe allocation.
//!
//! Counters are process-wide. Readings are only meaningful while a single
//! benchmark runs, which is how the runner drives them.

#![allow(unsafe_code)]

use std::alloc::{GlobalAlloc, Layout, System};
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);
static ALLOCATED_BYTES: AtomicU64 = AtomicU64::new(0);

/// Global allocator that counts allocations and bytes requested.
///
/// ```ignore
/// #[global_allocator]
/// static ALLOC: flowcost_harness::CountingAllocator = flowcost_harness::CountingAllocator;
/// ```
pub struct CountingAllocator;

#[inline]
fn record(size: usize) {
    ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    ALLOCATED_BYTES.fetch_add(size as u64, Ordering::Relaxed);
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record(new_size);
        }
        new_ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

/// Cumulative allocation counters at one instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocSnapshot {
    /// Successful `alloc`, `alloc_zeroed`, and `realloc` calls.
    pub count: u64,
    /// Bytes requested by those calls.
    pub bytes: u64,
}

impl AllocSnapshot {
    /// Counters accumulated between `earlier` and `self`.
    pub fn since(self, earlier: AllocSnapshot) -> AllocSnapshot {
        AllocSnapshot {
            count: self.count.saturating_sub(earlier.count),
            bytes: self.bytes.saturating_sub(earlier.bytes),
        }
    }
}

/// Read the current counters.
#[inline]
pub fn snapshot() -> AllocSnapshot {
    AllocSnapshot {
        count: ALLOCATIONS.load(Ordering::Relaxed),
        bytes: ALLOCATED_BYTES.load(Ordering::Relaxed),
    }
}

/// Whether [`CountingAllocator`] is the process's global allocator.
///
/// Makes one boxed allocation and checks that the counters saw it.
pub fn is_counting() -> bool {
    let before = snapshot();
    let probe = black_box(Box::new(black_box(0u64)));
    drop(probe);
    snapshot().count > before.count
}
