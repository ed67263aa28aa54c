//! Allocation diagnostics.
//!
//! [`TrackingAllocator`] wraps another allocator and records what goes
//! through it, tagged with a [`MemCategory`]. It can also be told to refuse
//! requests, which is how failure paths of the arrays are exercised.

use core::cell::Cell;
use core::ptr::NonNull;

use crate::allocator::{AllocError, Allocator, Global, Layout};

/// Identifies who owns a group of allocations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemCategory {
    pub name: &'static str,
    /// Memory block the allocations should be grouped in.
    pub block_id: u32,
}

/// The category small array storage is reported under.
pub const SMALL_ARRAY: MemCategory = MemCategory {
    name: "SmallArray",
    block_id: 2,
};

/// Counters maintained by a [`TrackingAllocator`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Successful fresh allocations.
    pub allocations: usize,
    /// Successful grow or shrink requests.
    pub reallocations: usize,
    pub deallocations: usize,
    /// Requests that were refused, by the inner allocator or by a failure budget.
    pub failures: usize,
    pub live_bytes: usize,
    pub peak_bytes: usize,
}

impl AllocStats {
    /// Number of requests that reached the allocator and succeeded, frees excluded.
    pub fn requests(&self) -> usize {
        self.allocations + self.reallocations
    }
}

/// An allocator adapter that records statistics about the requests it serves.
///
/// Statistics live in `Cell`s, so a tracking allocator is not `Sync`. Share it
/// between arrays on one thread by reference: `&TrackingAllocator` is itself
/// an allocator.
pub struct TrackingAllocator<A = Global> {
    inner: A,
    category: MemCategory,
    stats: Cell<AllocStats>,
    // Remaining requests allowed to succeed, `None` for no limit.
    budget: Cell<Option<usize>>,
}

impl TrackingAllocator<Global> {
    pub fn new(category: MemCategory) -> Self {
        Self::new_in(Global, category)
    }
}

impl<A: Allocator> TrackingAllocator<A> {
    pub fn new_in(inner: A, category: MemCategory) -> Self {
        TrackingAllocator {
            inner,
            category,
            stats: Cell::new(AllocStats::default()),
            budget: Cell::new(None),
        }
    }

    #[inline]
    pub fn category(&self) -> MemCategory {
        self.category
    }

    #[inline]
    pub fn stats(&self) -> AllocStats {
        self.stats.get()
    }

    /// Resets all counters except the live byte count.
    pub fn reset_stats(&self) {
        let live_bytes = self.stats.get().live_bytes;
        self.stats.set(AllocStats {
            live_bytes,
            peak_bytes: live_bytes,
            ..AllocStats::default()
        });
    }

    /// Lets the next `n` allocate/grow/shrink requests through and refuses
    /// every following one until [`stop_failing`](Self::stop_failing) is called.
    ///
    /// Deallocation is never refused.
    pub fn fail_after(&self, n: usize) {
        self.budget.set(Some(n));
    }

    pub fn stop_failing(&self) {
        self.budget.set(None);
    }

    fn admit(&self, layout: Layout) -> Result<(), AllocError> {
        match self.budget.get() {
            Some(0) => {
                log::trace!(
                    "[{}] refusing request of {} bytes",
                    self.category.name,
                    layout.size()
                );
                self.update(|stats| stats.failures += 1);
                Err(AllocError)
            }
            Some(n) => {
                self.budget.set(Some(n - 1));
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn update(&self, f: impl FnOnce(&mut AllocStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        stats.peak_bytes = stats.peak_bytes.max(stats.live_bytes);
        self.stats.set(stats);
    }

    fn served<T>(
        &self,
        result: Result<T, AllocError>,
        f: impl FnOnce(&mut AllocStats),
    ) -> Result<T, AllocError> {
        match result {
            Ok(value) => {
                self.update(f);
                Ok(value)
            }
            Err(err) => {
                self.update(|stats| stats.failures += 1);
                Err(err)
            }
        }
    }
}

unsafe impl<A: Allocator> Allocator for TrackingAllocator<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        self.admit(layout)?;
        log::trace!("[{}] allocate {} bytes", self.category.name, layout.size());

        self.served(self.inner.allocate(layout), |stats| {
            stats.allocations += 1;
            stats.live_bytes += layout.size();
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        log::trace!("[{}] free {} bytes", self.category.name, layout.size());
        unsafe {
            self.inner.deallocate(ptr, layout);
        }

        self.update(|stats| {
            stats.deallocations += 1;
            stats.live_bytes -= layout.size();
        });
    }

    unsafe fn grow(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        self.admit(new_layout)?;
        log::trace!(
            "[{}] grow {} -> {} bytes",
            self.category.name,
            old_layout.size(),
            new_layout.size()
        );

        let result = unsafe { self.inner.grow(ptr, old_layout, new_layout) };
        self.served(result, |stats| {
            stats.reallocations += 1;
            stats.live_bytes += new_layout.size() - old_layout.size();
        })
    }

    unsafe fn shrink(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> Result<NonNull<[u8]>, AllocError> {
        self.admit(new_layout)?;
        log::trace!(
            "[{}] shrink {} -> {} bytes",
            self.category.name,
            old_layout.size(),
            new_layout.size()
        );

        let result = unsafe { self.inner.shrink(ptr, old_layout, new_layout) };
        self.served(result, |stats| {
            stats.reallocations += 1;
            stats.live_bytes -= old_layout.size() - new_layout.size();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_requests() {
        let allocator = TrackingAllocator::new(SMALL_ARRAY);
        assert_eq!(allocator.category().block_id, 2);

        let small = Layout::from_size_align(16, 8).unwrap();
        let large = Layout::from_size_align(64, 8).unwrap();

        unsafe {
            let ptr = allocator.allocate(small).unwrap().cast::<u8>();
            let ptr = allocator.grow(ptr, small, large).unwrap().cast::<u8>();
            assert_eq!(allocator.stats().live_bytes, 64);
            let ptr = allocator.shrink(ptr, large, small).unwrap().cast::<u8>();
            allocator.deallocate(ptr, small);
        }

        let stats = allocator.stats();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.reallocations, 2);
        assert_eq!(stats.deallocations, 1);
        assert_eq!(stats.requests(), 3);
        assert_eq!(stats.live_bytes, 0);
        assert_eq!(stats.peak_bytes, 64);
    }

    #[test]
    fn failure_budget() {
        let allocator = TrackingAllocator::new(SMALL_ARRAY);
        let layout = Layout::from_size_align(8, 8).unwrap();

        allocator.fail_after(1);
        let first = allocator.allocate(layout).unwrap();
        assert!(allocator.allocate(layout).is_err());
        assert!(allocator.allocate(layout).is_err());
        assert_eq!(allocator.stats().failures, 2);

        allocator.stop_failing();
        let second = allocator.allocate(layout).unwrap();

        unsafe {
            allocator.deallocate(first.cast(), layout);
            allocator.deallocate(second.cast(), layout);
        }

        allocator.reset_stats();
        assert_eq!(allocator.stats(), AllocStats::default());
    }
}
