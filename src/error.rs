//! Recoverable failures of capacity changing operations.

use thiserror::Error;

/// Errors reported by the `try_` family of growth operations.
///
/// When one of these is returned, the array is left exactly as it was before
/// the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested number of elements does not fit in the address space
    /// (more than `isize::MAX` bytes).
    #[error("capacity overflow: {requested} elements do not fit in the address space")]
    CapacityOverflow {
        /// Requested element count.
        requested: usize,
    },
    /// The allocator could not provide the requested memory.
    #[error("allocation of {bytes} bytes failed")]
    AllocFailed {
        /// Size of the allocation that failed, in bytes.
        bytes: usize,
    },
}

#[test]
fn error_messages() {
    assert_eq!(
        Error::AllocFailed { bytes: 64 }.to_string(),
        "allocation of 64 bytes failed"
    );
    assert!(Error::CapacityOverflow { requested: usize::MAX }
        .to_string()
        .starts_with("capacity overflow"));
}
