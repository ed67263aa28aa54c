//! Exactly sized dynamic arrays.
//!
//! [`SmallArray`] never keeps spare capacity around: growing it reallocates the
//! storage to the exact new length. This trades allocation frequency for a
//! minimal footprint, which pays off when millions of small arrays are alive
//! at the same time.
//!
//! Storage comes from an [`allocator::Allocator`] (the global allocator by
//! default). Element lifetimes are managed separately from the raw memory:
//! items are written into and dropped from their slots in place.
//!
//! ```
//! use small_array::SmallArray;
//!
//! let mut a = SmallArray::new();
//! a.push(1);
//! a.push(2);
//! a.push(3);
//! a.insert(1, 9);
//! assert_eq!(a, [1, 9, 2, 3]);
//! assert_eq!(a.capacity(), a.len());
//!
//! a.swap_remove(0);
//! a.sort();
//! assert_eq!(a, [2, 3, 9]);
//! ```

pub mod allocator;
pub mod error;
pub mod sort;
pub mod tracking;

mod buffer;
mod small_array;
mod util;

pub use error::Error;
pub use small_array::SmallArray;
pub use tracking::{AllocStats, MemCategory, TrackingAllocator};
