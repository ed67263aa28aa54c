use crate::allocator::Allocator;
use crate::error::Error;
use crate::util::{self, is_zst, nnptr};
use core::ptr::NonNull;

/// An exactly sized run of `T` slots.
///
/// The buffer does not know which slots hold live values and never drops any
/// of them; that bookkeeping belongs to the owner. It does not remember its
/// allocator either, every operation that touches memory takes it as a
/// parameter.
pub(crate) struct RawBuffer<T> {
    data: NonNull<T>,
    cap: usize,
}

impl<T> RawBuffer<T> {
    /// Creates an empty buffer without doing any memory allocation.
    #[inline]
    pub fn new() -> Self {
        RawBuffer {
            data: NonNull::dangling(),
            cap: 0,
        }
    }

    /// Returns `true` if the buffer currently owns an allocation.
    ///
    /// Buffers of zero-sized types never allocate.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        !is_zst::<T>() && self.cap > 0
    }

    /// Resizes the allocation to hold exactly `new_cap` slots.
    ///
    /// The first `min(old_cap, new_cap)` slots are preserved bit for bit. A
    /// `new_cap` of zero releases the allocation. On failure the buffer is
    /// left untouched.
    ///
    /// # Safety
    ///
    /// The provided allocator must be the one this buffer was allocated with.
    /// Slots at or beyond `new_cap` must not hold values that still need to
    /// be dropped.
    pub unsafe fn try_reallocate_in<A: Allocator>(
        &mut self,
        new_cap: usize,
        allocator: &A,
    ) -> Result<(), Error> {
        if new_cap == self.cap {
            return Ok(());
        }

        let new_layout = util::array_layout::<T>(new_cap)?;

        if is_zst::<T>() {
            self.cap = new_cap;
            return Ok(());
        }

        if new_cap == 0 {
            self.deallocate_in(allocator);
            return Ok(());
        }

        let result = if self.cap == 0 {
            allocator.allocate(new_layout)
        } else {
            let old_layout = util::array_layout::<T>(self.cap)?;
            let old_alloc = self.data.cast::<u8>();

            unsafe {
                if new_layout.size() >= old_layout.size() {
                    allocator.grow(old_alloc, old_layout, new_layout)
                } else {
                    allocator.shrink(old_alloc, old_layout, new_layout)
                }
            }
        };

        let allocation = result.map_err(|_| {
            log::debug!(
                "reallocation from {} to {} slots ({} bytes) failed",
                self.cap,
                new_cap,
                new_layout.size()
            );
            Error::AllocFailed { bytes: new_layout.size() }
        })?;

        self.data = allocation.cast::<T>();
        self.cap = new_cap;

        Ok(())
    }

    /// Releases the allocation, leaving the buffer in its unallocated state.
    ///
    /// The elements are expected to be dropped by the caller.
    /// It is safe (no-op) to call `deallocate_in` on a buffer that is already
    /// in its unallocated state.
    ///
    /// # Safety
    ///
    /// The provided allocator must be the one this buffer was allocated with.
    pub unsafe fn deallocate_in<A: Allocator>(&mut self, allocator: &A) {
        if self.is_allocated() {
            if let Ok(layout) = util::array_layout::<T>(self.cap) {
                unsafe {
                    allocator.deallocate(self.data.cast::<u8>(), layout);
                }
            }
        }

        self.data = NonNull::dangling();
        self.cap = 0;
    }

    #[inline]
    pub fn items_ptr(&self) -> NonNull<T> {
        self.data
    }

    #[inline]
    /// Returns the number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub unsafe fn as_slice(&self, len: usize) -> &[T] {
        core::slice::from_raw_parts(self.data.as_ptr(), len)
    }

    #[inline]
    pub unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
        core::slice::from_raw_parts_mut(self.data.as_ptr(), len)
    }

    #[inline(always)]
    pub unsafe fn item_ptr(&self, index: usize) -> NonNull<T> {
        nnptr::add(self.data, index)
    }

    #[inline]
    pub unsafe fn write_item(&mut self, index: usize, val: T) {
        debug_assert!(index < self.cap);
        nnptr::write(self.item_ptr(index), val);
    }

    #[inline]
    pub unsafe fn read_item(&self, index: usize) -> T {
        debug_assert!(index < self.cap);
        nnptr::read(self.item_ptr(index))
    }

    /// Moves `count` slots starting at `src` to `dst`. The ranges may overlap.
    #[inline]
    pub unsafe fn move_items(&mut self, dst: usize, src: usize, count: usize) {
        debug_assert!(src + count <= self.cap && dst + count <= self.cap);
        if count > 0 {
            nnptr::copy(self.item_ptr(src), self.item_ptr(dst), count);
        }
    }
}

#[test]
fn grow_and_shrink_exactly() {
    use crate::tracking::{TrackingAllocator, SMALL_ARRAY};

    let allocator = TrackingAllocator::new(SMALL_ARRAY);
    let mut buffer: RawBuffer<u64> = RawBuffer::new();
    assert!(!buffer.is_allocated());

    unsafe {
        buffer.try_reallocate_in(3, &allocator).unwrap();
        for i in 0..3 {
            buffer.write_item(i, i as u64 * 10);
        }
        assert_eq!(allocator.stats().live_bytes, 24);

        buffer.try_reallocate_in(5, &allocator).unwrap();
        assert_eq!(buffer.as_slice(3), &[0, 10, 20]);
        assert_eq!(allocator.stats().live_bytes, 40);

        buffer.try_reallocate_in(2, &allocator).unwrap();
        assert_eq!(buffer.as_slice(2), &[0, 10]);
        assert_eq!(allocator.stats().live_bytes, 16);

        buffer.try_reallocate_in(0, &allocator).unwrap();
        assert!(!buffer.is_allocated());
    }

    let stats = allocator.stats();
    assert_eq!(stats.allocations, 1);
    assert_eq!(stats.reallocations, 2);
    assert_eq!(stats.deallocations, 1);
    assert_eq!(stats.live_bytes, 0);
}

#[test]
fn failed_reallocation_keeps_contents() {
    use crate::tracking::{TrackingAllocator, SMALL_ARRAY};

    let allocator = TrackingAllocator::new(SMALL_ARRAY);
    let mut buffer: RawBuffer<u32> = RawBuffer::new();

    unsafe {
        buffer.try_reallocate_in(2, &allocator).unwrap();
        buffer.write_item(0, 7);
        buffer.write_item(1, 8);

        allocator.fail_after(0);
        assert_eq!(
            buffer.try_reallocate_in(4, &allocator),
            Err(Error::AllocFailed { bytes: 16 })
        );
        assert_eq!(buffer.capacity(), 2);
        assert_eq!(buffer.as_slice(2), &[7, 8]);

        allocator.stop_failing();
        buffer.deallocate_in(&allocator);
        // Deallocating twice is a no-op.
        buffer.deallocate_in(&allocator);
    }

    assert_eq!(allocator.stats().live_bytes, 0);
}

#[test]
fn zst_never_allocates() {
    use crate::tracking::{TrackingAllocator, SMALL_ARRAY};

    let allocator = TrackingAllocator::new(SMALL_ARRAY);
    let mut buffer: RawBuffer<()> = RawBuffer::new();

    unsafe {
        buffer.try_reallocate_in(1000, &allocator).unwrap();
        assert_eq!(buffer.capacity(), 1000);
        assert!(!buffer.is_allocated());
        buffer.deallocate_in(&allocator);
    }

    assert_eq!(allocator.stats(), Default::default());
}
