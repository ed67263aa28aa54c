use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ops::{AddAssign, Deref, DerefMut, Index, IndexMut, RangeInclusive};
use core::ptr;
use core::slice::SliceIndex;

use crate::allocator::{Allocator, Global};
use crate::buffer::RawBuffer;
use crate::error::Error;
use crate::sort;

/// A contiguous growable array that keeps no spare capacity.
///
/// Every growth reallocates the storage to exactly the new length, so the
/// memory footprint is `len * size_of::<T>()` at the cost of touching the
/// allocator on each growth. Appending `n` elements one at a time is
/// therefore O(n²) overall; prefer [`extend_from_slice`](Self::extend_from_slice)
/// or [`Extend`] to add many elements at once.
///
/// Shrinking operations ([`remove`](Self::remove), [`truncate`](Self::truncate),
/// [`clear_retain_memory`](Self::clear_retain_memory), ...) do not reallocate.
/// The leftover slots are reused or trimmed by the next growth.
///
/// # Contract violations
///
/// All index based operations are bounds checked and panic on an invalid
/// index or range. Lookups that may legitimately miss return an `Option`.
///
/// Growth operations come in two flavors: `try_` methods report allocation
/// failures as an [`Error`] and leave the array untouched, the others panic.
pub struct SmallArray<T, A: Allocator = Global> {
    buffer: RawBuffer<T>,
    len: usize,
    allocator: A,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for SmallArray<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for SmallArray<T, A> {}

#[cold]
#[inline(never)]
#[track_caller]
fn growth_failed(err: Error) -> ! {
    panic!("small array growth failed: {err}");
}

impl<T> SmallArray<T> {
    /// Creates an empty array without doing any memory allocation.
    #[inline]
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an array of `len` default values, allocating exactly `len` slots.
    #[track_caller]
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        match Self::try_with_len_in(len, Global) {
            Ok(array) => array,
            Err(err) => growth_failed(err),
        }
    }

    /// Creates an array holding clones of `items`, allocating exactly `items.len()` slots.
    #[track_caller]
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        match Self::try_from_slice_in(items, Global) {
            Ok(array) => array,
            Err(err) => growth_failed(err),
        }
    }
}

impl<T, A: Allocator> SmallArray<T, A> {
    #[inline]
    pub fn new_in(allocator: A) -> Self {
        SmallArray {
            buffer: RawBuffer::new(),
            len: 0,
            allocator,
            _marker: PhantomData,
        }
    }

    pub fn try_with_len_in(len: usize, allocator: A) -> Result<Self, Error>
    where
        T: Default,
    {
        let mut array = Self::new_in(allocator);
        array.try_resize(len)?;

        Ok(array)
    }

    pub fn try_from_slice_in(items: &[T], allocator: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut array = Self::new_in(allocator);
        array.try_extend_from_slice(items)?;

        Ok(array)
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline]
    /// Returns the number of elements in the array.
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    /// Returns `true` if the array contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.len
    }

    /// Returns the number of allocated slots.
    ///
    /// Equal to [`len`](Self::len) after any growth. It can only be larger
    /// after a shrinking operation or a call to [`reserve`](Self::reserve).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns `true` if the array currently owns an allocation.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.buffer.is_allocated()
    }

    /// Number of bytes used by the array's storage, optionally including the
    /// array value itself.
    pub fn memory_usage(&self, include_members: bool) -> usize {
        let mut bytes = self.capacity() * mem::size_of::<T>();
        if include_members {
            bytes += mem::size_of::<Self>();
        }

        bytes
    }

    /// Returns a pointer to the first slot. Dangling (but non-null and
    /// aligned) when nothing is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buffer.items_ptr().as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.items_ptr().as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { self.buffer.as_slice(self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { self.buffer.as_mut_slice(self.len) }
    }

    /// Overwrites the element at `index`, dropping the previous value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn set(&mut self, index: usize, value: T) {
        self.as_mut_slice()[index] = value;
    }

    #[inline]
    fn grown_len(&self, additional: usize) -> Result<usize, Error> {
        self.len
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow { requested: usize::MAX })
    }

    /// Reallocates to exactly `new_len` slots, ahead of writing elements into
    /// them. Does not change the length.
    fn try_grow_exact(&mut self, new_len: usize) -> Result<(), Error> {
        debug_assert!(new_len >= self.len);
        unsafe { self.buffer.try_reallocate_in(new_len, &self.allocator) }
    }

    /// Makes sure at least `min_len` slots are allocated, without creating
    /// any element.
    ///
    /// The reserved slots are only used by bulk insertions such as
    /// [`Extend`]; single element growth still snaps the allocation back to
    /// the exact length.
    #[track_caller]
    pub fn reserve(&mut self, min_len: usize) {
        if let Err(err) = self.try_reserve(min_len) {
            growth_failed(err);
        }
    }

    pub fn try_reserve(&mut self, min_len: usize) -> Result<(), Error> {
        if self.capacity() < min_len {
            unsafe { self.buffer.try_reallocate_in(min_len, &self.allocator)? }
        }

        Ok(())
    }

    /// Releases the unused slots, if any.
    #[track_caller]
    pub fn shrink_to_fit(&mut self) {
        if let Err(err) = self.try_shrink_to_fit() {
            growth_failed(err);
        }
    }

    pub fn try_shrink_to_fit(&mut self) -> Result<(), Error> {
        unsafe { self.buffer.try_reallocate_in(self.len, &self.allocator) }
    }

    /// Resizes the array in place so that its length is `new_len`.
    ///
    /// Growing reallocates to exactly `new_len` slots and fills them with
    /// `T::default()`. Shrinking drops the trailing elements and keeps the
    /// allocation.
    #[track_caller]
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        if let Err(err) = self.try_resize(new_len) {
            growth_failed(err);
        }
    }

    pub fn try_resize(&mut self, new_len: usize) -> Result<(), Error>
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.try_grow_exact(new_len)?;
        while self.len < new_len {
            unsafe {
                self.buffer.write_item(self.len, T::default());
            }
            self.len += 1;
        }

        Ok(())
    }

    /// Grows the array to `len` elements with default values if it is shorter.
    #[track_caller]
    pub fn ensure_len(&mut self, len: usize)
    where
        T: Default,
    {
        if let Err(err) = self.try_ensure_len(len) {
            growth_failed(err);
        }
    }

    pub fn try_ensure_len(&mut self, len: usize) -> Result<(), Error>
    where
        T: Default,
    {
        if self.len >= len {
            return Ok(());
        }

        self.try_resize(len)
    }

    /// Shortens the array to `len` elements, dropping the rest. No-op if the
    /// array is already shorter. Does not reallocate.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail: *mut [T] = &mut self.as_mut_slice()[len..];
        // If a drop panics the remaining tail leaks instead of being dropped twice.
        self.len = len;
        unsafe {
            ptr::drop_in_place(tail);
        }
    }

    /// Appends an element to the back of the array.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    #[inline]
    #[track_caller]
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            growth_failed(err);
        }
    }

    /// Appends an element to the back of the array.
    ///
    /// On failure `value` is dropped and the array is unchanged.
    pub fn try_push(&mut self, value: T) -> Result<(), Error> {
        let len = self.len;
        self.try_grow_exact(self.grown_len(1)?)?;

        unsafe {
            self.buffer.write_item(len, value);
        }
        self.len = len + 1;

        Ok(())
    }

    /// Appends a default constructed element.
    #[track_caller]
    pub fn push_default(&mut self)
    where
        T: Default,
    {
        self.push(T::default())
    }

    pub fn try_push_default(&mut self) -> Result<(), Error>
    where
        T: Default,
    {
        self.try_push(T::default())
    }

    /// Clones and appends the contents of the slice, growing the allocation once.
    #[track_caller]
    pub fn extend_from_slice(&mut self, items: &[T])
    where
        T: Clone,
    {
        if let Err(err) = self.try_extend_from_slice(items) {
            growth_failed(err);
        }
    }

    pub fn try_extend_from_slice(&mut self, items: &[T]) -> Result<(), Error>
    where
        T: Clone,
    {
        if items.is_empty() {
            return Ok(());
        }

        self.try_grow_exact(self.grown_len(items.len())?)?;
        // The length is bumped per item so that a panicking clone leaves a
        // consistent array behind.
        for item in items {
            unsafe {
                self.buffer.write_item(self.len, item.clone());
            }
            self.len += 1;
        }

        Ok(())
    }

    /// Clones and appends the contents of another array.
    pub fn extend_from_array<B: Allocator>(&mut self, other: &SmallArray<T, B>)
    where
        T: Clone,
    {
        self.extend_from_slice(other.as_slice())
    }

    /// Inserts an element at position `index`, shifting all elements after it
    /// to the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len` or if the allocation fails.
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) {
        if let Err(err) = self.try_insert(index, value) {
            growth_failed(err);
        }
    }

    /// Inserts an element at position `index`, shifting all elements after it
    /// to the right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }

        let len = self.len;
        if index > len {
            assert_failed(index, len);
        }

        self.try_grow_exact(self.grown_len(1)?)?;

        unsafe {
            // Shift everything over to make space, duplicating the `index`th
            // element into two consecutive slots, then overwrite the first copy.
            self.buffer.move_items(index + 1, index, len - index);
            self.buffer.write_item(index, value);
        }
        self.len = len + 1;

        Ok(())
    }

    /// Inserts a default constructed element at position `index`.
    #[track_caller]
    pub fn insert_default(&mut self, index: usize)
    where
        T: Default,
    {
        self.insert(index, T::default())
    }

    #[track_caller]
    pub fn try_insert_default(&mut self, index: usize) -> Result<(), Error>
    where
        T: Default,
    {
        self.try_insert(index, T::default())
    }

    /// Removes and returns the element at position `index`, shifting all
    /// elements after it to the left. Keeps the allocation.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("removal index (is {index}) should be < len (is {len})");
        }

        let len = self.len;
        if index >= len {
            assert_failed(index, len);
        }

        unsafe {
            let ret = self.buffer.read_item(index);
            self.buffer.move_items(index, index + 1, len - index - 1);
            self.len = len - 1;

            ret
        }
    }

    /// Drops `count` consecutive elements starting at `index` and shifts the
    /// rest of the array down. Keeps the allocation.
    ///
    /// # Panics
    ///
    /// Panics if `index + count > len`.
    #[track_caller]
    pub fn remove_range(&mut self, index: usize, count: usize) {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, count: usize, len: usize) -> ! {
            panic!("removal range (is {index} + {count}) should be <= len (is {len})");
        }

        let len = self.len;
        let end = match index.checked_add(count) {
            Some(end) if end <= len => end,
            _ => assert_failed(index, count, len),
        };

        unsafe {
            let removed = ptr::slice_from_raw_parts_mut(self.buffer.item_ptr(index).as_ptr(), count);
            // If a drop panics, the elements after `index` leak.
            self.len = index;
            ptr::drop_in_place(removed);
            self.buffer.move_items(index, end, len - end);
        }
        self.len = len - count;
    }

    /// Removes the first element equal to `value`. Returns whether one was found.
    pub fn remove_item(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self.find(value) {
            Some(index) => {
                drop(self.remove(index));
                true
            }
            None => false,
        }
    }

    /// Removes an element and returns it, moving the last element into its
    /// place.
    ///
    /// This is O(1) but does not preserve the order of the remaining elements.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[track_caller]
    pub fn swap_remove(&mut self, index: usize) -> T {
        #[cold]
        #[inline(never)]
        #[track_caller]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("swap_remove index (is {index}) should be < len (is {len})");
        }

        let len = self.len;
        if index >= len {
            assert_failed(index, len);
        }

        unsafe {
            let item = self.buffer.read_item(index);
            let last = len - 1;
            if index != last {
                self.buffer.move_items(index, last, 1);
            }
            self.len = last;

            item
        }
    }

    /// Removes and returns the first element, or `None` if the array is empty.
    pub fn remove_first(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        Some(self.remove(0))
    }

    /// Removes and returns the last element, or `None` if the array is empty.
    pub fn remove_last(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        unsafe { Some(self.buffer.read_item(self.len)) }
    }

    /// Swaps two elements. No-op if `a == b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }

    /// Drops all elements and releases the allocation.
    pub fn clear(&mut self) {
        self.truncate(0);
        unsafe {
            self.buffer.deallocate_in(&self.allocator);
        }
    }

    /// Drops all elements but keeps the allocation for the next growth.
    pub fn clear_retain_memory(&mut self) {
        self.truncate(0);
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    /// Returns the index of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|item| item == value)
    }

    /// Sorts the array with [`sort::natural`] ordering. Not stable.
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        self.sort_by(sort::natural)
    }

    /// Sorts the array with a three-way comparator. Not stable.
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len > 1 {
            let last = self.len - 1;
            sort::quicksort_by(self.as_mut_slice(), 0, last, &mut cmp);
        }
    }

    /// Sorts the elements in `range`, both ends included. Not stable.
    ///
    /// # Panics
    ///
    /// Panics if the end of a non-empty range is out of bounds.
    #[track_caller]
    pub fn sort_range_by<F>(&mut self, range: RangeInclusive<usize>, mut cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let (first, last) = range.into_inner();
        sort::quicksort_by(self.as_mut_slice(), first, last, &mut cmp);
    }

    /// Moves `count` slots from `src` to `dest` by copying their bytes.
    /// The ranges may overlap.
    ///
    /// Rust values can always be relocated bitwise, so no per element work
    /// is done. The length is not changed.
    ///
    /// # Panics
    ///
    /// Panics if either range exceeds the capacity.
    ///
    /// # Safety
    ///
    /// Slots that were live in the source range and are not covered by the
    /// destination range still hold a bitwise copy of a value that now lives
    /// elsewhere. The caller must make sure that, once done, every slot below
    /// `len` holds exactly one live value and that no value is dropped twice.
    #[track_caller]
    pub unsafe fn move_elements(&mut self, dest: usize, src: usize, count: usize) {
        let cap = self.capacity();
        let in_bounds = |start: usize| start.checked_add(count).map_or(false, |end| end <= cap);
        assert!(
            in_bounds(src) && in_bounds(dest),
            "moving {count} elements from {src} to {dest} exceeds the capacity ({cap})"
        );

        self.buffer.move_items(dest, src, count);
    }

    /// Moves the contents out, leaving this array empty and unallocated.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let empty = Self::new_in(self.allocator.clone());
        mem::replace(self, empty)
    }

    /// Drops the current contents and takes over the elements, storage and
    /// allocator of `source`, which is left empty and unallocated.
    ///
    /// `source` keeps its own allocator for future growth.
    pub fn move_from(&mut self, source: &mut Self)
    where
        A: Clone,
    {
        *self = source.take();
    }
}

impl<T, A: Allocator> Drop for SmallArray<T, A> {
    fn drop(&mut self) {
        // Elements are dropped in index order.
        self.clear();
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for SmallArray<T, A> {
    fn clone(&self) -> Self {
        match Self::try_from_slice_in(self.as_slice(), self.allocator.clone()) {
            Ok(array) => array,
            Err(err) => growth_failed(err),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend_from_slice(source.as_slice());
    }
}

impl<T, A: Allocator + Default> Default for SmallArray<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A: Allocator> Deref for SmallArray<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for SmallArray<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> Index<I> for SmallArray<T, A> {
    type Output = I::Output;

    #[inline]
    #[track_caller]
    fn index(&self, index: I) -> &I::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> IndexMut<I> for SmallArray<T, A> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: I) -> &mut I::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, U, A: Allocator, B: Allocator> PartialEq<SmallArray<U, B>> for SmallArray<T, A>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &SmallArray<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for SmallArray<T, A> {}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for SmallArray<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<&[U]> for SmallArray<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for SmallArray<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T: Hash, A: Allocator> Hash for SmallArray<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state)
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for SmallArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, A: Allocator> AsRef<[T]> for SmallArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for SmallArray<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AddAssign<T> for SmallArray<T, A> {
    fn add_assign(&mut self, value: T) {
        self.push(value);
    }
}

impl<T: Clone, A: Allocator, B: Allocator> AddAssign<&SmallArray<T, B>> for SmallArray<T, A> {
    fn add_assign(&mut self, other: &SmallArray<T, B>) {
        self.extend_from_array(other);
    }
}

impl<T, A: Allocator> Extend<T> for SmallArray<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let old_len = self.len;

        self.reserve(old_len.saturating_add(lower));
        for item in iter {
            if self.len < self.capacity() {
                unsafe {
                    self.buffer.write_item(self.len, item);
                }
                self.len += 1;
            } else {
                self.push(item);
            }
        }

        if self.len > old_len && self.capacity() > self.len {
            if let Err(err) = self.try_shrink_to_fit() {
                log::debug!(
                    "keeping {} unused slots after extend: {err}",
                    self.capacity() - self.len
                );
            }
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for SmallArray<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, A: Allocator + Default> FromIterator<T> for SmallArray<T, A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new_in(A::default());
        array.extend(iter);

        array
    }
}

impl<T: Clone> From<&[T]> for SmallArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}

impl<T, const N: usize> From<[T; N]> for SmallArray<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a SmallArray<T, A> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut SmallArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
