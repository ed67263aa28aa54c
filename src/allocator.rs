//! The allocator capability used for array storage.
//!
//! `allocate`, `grow`/`shrink` and `deallocate` play the roles of the raw
//! allocate, reallocate and free operations of a memory manager.

pub use allocator_api2::alloc::{AllocError, Allocator, Global, Layout};
