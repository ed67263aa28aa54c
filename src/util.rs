use core::alloc::Layout;
use core::mem;

use crate::error::Error;

pub(crate) const fn is_zst<T>() -> bool {
    mem::size_of::<T>() == 0
}

/// Layout of `n` contiguous `T` slots, with no header and no slack.
pub(crate) fn array_layout<T>(n: usize) -> Result<Layout, Error> {
    Layout::array::<T>(n).map_err(|_| Error::CapacityOverflow { requested: n })
}

// Waiting for `non_null_convenience` to be stabilized.
pub(crate) mod nnptr {
    use core::ptr::{self, NonNull};

    #[inline(always)]
    pub unsafe fn read<T>(src: NonNull<T>) -> T {
        ptr::read(src.as_ptr())
    }

    #[inline(always)]
    pub unsafe fn write<T>(dst: NonNull<T>, val: T) {
        ptr::write(dst.as_ptr(), val)
    }

    #[inline(always)]
    pub unsafe fn copy<T>(src: NonNull<T>, dst: NonNull<T>, count: usize) {
        ptr::copy(src.as_ptr(), dst.as_ptr(), count)
    }

    #[inline(always)]
    pub unsafe fn add<T>(p: NonNull<T>, count: usize) -> NonNull<T> {
        NonNull::new_unchecked(p.as_ptr().add(count))
    }
}

#[test]
fn layouts() {
    assert_eq!(array_layout::<u32>(0).unwrap().size(), 0);
    assert_eq!(array_layout::<u32>(5).unwrap().size(), 20);
    assert_eq!(array_layout::<u64>(3).unwrap().align(), mem::align_of::<u64>());
    assert_eq!(
        array_layout::<u64>(usize::MAX),
        Err(Error::CapacityOverflow { requested: usize::MAX })
    );
    assert!(is_zst::<()>());
    assert!(!is_zst::<u8>());
}
