//! In-place quicksort and comparators.
//!
//! The sort partitions around the element at the end of the range after
//! swapping the midpoint element to the front. The pivot choice is fixed, so
//! equal inputs always produce equal outputs, and some input patterns degrade
//! to quadratic time. The sort is not stable.

use core::cmp::Ordering;
use core::ops::Deref;

use crate::util::is_zst;

/// Three-way comparison through `<` and `==`.
///
/// Incomparable values (such as `NaN`) are reported as `Greater`.
#[inline]
pub fn natural<T: PartialOrd + ?Sized>(a: &T, b: &T) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a == b {
        Ordering::Equal
    } else {
        Ordering::Greater
    }
}

/// Compares the values behind two pointers, for arrays of references or boxes.
///
/// ```
/// use small_array::{sort, SmallArray};
///
/// let (a, b, c) = (3, 1, 2);
/// let mut refs: SmallArray<&i32> = [&a, &b, &c].into();
/// refs.sort_by(sort::by_deref);
/// assert_eq!(refs, [&1, &2, &3]);
/// ```
#[inline]
pub fn by_deref<P>(a: &P, b: &P) -> Ordering
where
    P: Deref,
    P::Target: PartialOrd,
{
    natural(&**a, &**b)
}

/// Sorts `v[first..=last]`.
pub(crate) fn quicksort_by<T, F>(v: &mut [T], first: usize, last: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if first > last {
        return;
    }

    assert!(last < v.len(), "sort range end (is {last}) should be < len (is {})", v.len());

    // Moving zero-sized values around is not observable.
    if is_zst::<T>() || first == last {
        return;
    }

    // Slices of non zero-sized types are at most isize::MAX bytes long.
    inner_sort(v, first as isize, last as isize, cmp);
}

fn inner_sort<T, F>(v: &mut [T], mut first: isize, mut last: isize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    // Recurse on the smaller side and loop on the larger one so that the
    // stack depth stays logarithmic. The two sides are disjoint, so the order
    // in which they are processed does not change the result.
    while first < last {
        let split = partition(v, first, last, cmp);
        if split - first < last - split {
            inner_sort(v, first, split - 1, cmp);
            first = split + 1;
        } else {
            inner_sort(v, split + 1, last, cmp);
            last = split - 1;
        }
    }
}

fn partition<T, F>(v: &mut [T], left: isize, right: isize, cmp: &mut F) -> isize
where
    F: FnMut(&T, &T) -> Ordering,
{
    v.swap(left as usize, ((left + right) >> 1) as usize);

    // The target stays at `right` until the final swap: `j` is decremented
    // before any swap, so swapped indices are always below `right`.
    let target = right as usize;
    let mut i = left - 1;
    let mut j = right;

    loop {
        while i < j {
            i += 1;
            if cmp(&v[i as usize], &v[target]) != Ordering::Less {
                break;
            }
        }
        while j > i {
            j -= 1;
            if cmp(&v[j as usize], &v[target]) != Ordering::Greater {
                break;
            }
        }
        if i >= j {
            break;
        }
        v.swap(i as usize, j as usize);
    }

    v.swap(i as usize, target);

    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sort_all<T: PartialOrd>(v: &mut [T]) {
        if !v.is_empty() {
            let last = v.len() - 1;
            quicksort_by(v, 0, last, &mut natural);
        }
    }

    #[test]
    fn comparators() {
        assert_eq!(natural(&1, &2), Ordering::Less);
        assert_eq!(natural(&2, &2), Ordering::Equal);
        assert_eq!(natural(&3, &2), Ordering::Greater);
        assert_eq!(natural(&f32::NAN, &1.0), Ordering::Greater);

        let (a, b) = (Box::new(5), Box::new(4));
        assert_eq!(by_deref(&a, &b), Ordering::Greater);
    }

    #[test]
    fn partition_splits_around_last_element() {
        // Midpoint 9 is swapped to the front, then everything is compared to 2.
        let mut v = [3, 9, 2];
        let split = partition(&mut v, 0, 2, &mut natural);
        assert_eq!(split, 0);
        assert_eq!(v, [2, 3, 9]);
    }

    #[test]
    fn simple() {
        let mut v = [5, 1, 4, 2, 3, 0];
        sort_all(&mut v);
        assert_eq!(v, [0, 1, 2, 3, 4, 5]);

        let mut v = [9, 8, 7, 6, 5, 4, 3, 2, 1];
        sort_all(&mut v);
        assert_eq!(v, [1, 2, 3, 4, 5, 6, 7, 8, 9]);

        let mut v = [2, 2, 1, 1, 2, 1];
        sort_all(&mut v);
        assert_eq!(v, [1, 1, 1, 2, 2, 2]);

        let mut v: [u8; 0] = [];
        sort_all(&mut v);

        let mut v = [1];
        sort_all(&mut v);
        assert_eq!(v, [1]);
    }

    #[test]
    fn partial_range() {
        let mut v = [9, 5, 3, 4, 1, 0];
        quicksort_by(&mut v, 1, 4, &mut natural);
        assert_eq!(v, [9, 1, 3, 4, 5, 0]);
    }

    #[test]
    fn descending_comparator() {
        let mut v = [1, 3, 2, 5, 4];
        quicksort_by(&mut v, 0, 4, &mut |a: &i32, b: &i32| b.cmp(a));
        assert_eq!(v, [5, 4, 3, 2, 1]);
    }

    #[test]
    fn degenerate_inputs() {
        // Already sorted input always splits at the end of the range, which is
        // the quadratic case. The larger side is iterated rather than recursed.
        let mut v: Vec<u32> = (0..5_000).collect();
        sort_all(&mut v);
        assert!(v.windows(2).all(|w| w[0] <= w[1]));

        let mut v: Vec<u32> = vec![7; 100_000];
        sort_all(&mut v);
        assert!(v.iter().all(|&x| x == 7));
    }

    #[test]
    #[should_panic]
    fn range_out_of_bounds() {
        let mut v = [1, 2, 3];
        quicksort_by(&mut v, 0, 3, &mut natural);
    }

    proptest! {
        #[test]
        fn sorts_like_std(mut v in proptest::collection::vec(-50i32..50, 0..200)) {
            let mut expected = v.clone();
            expected.sort();
            sort_all(&mut v);
            prop_assert_eq!(v, expected);
        }

        #[test]
        fn sorting_twice_is_a_no_op(mut v in proptest::collection::vec(any::<u16>(), 0..100)) {
            sort_all(&mut v);
            let once = v.clone();
            sort_all(&mut v);
            prop_assert_eq!(v, once);
        }

        #[test]
        fn keys_are_ordered_under_custom_comparator(
            mut v in proptest::collection::vec((0u8..8, any::<u32>()), 0..100),
        ) {
            let len = v.len();
            if len > 0 {
                quicksort_by(&mut v, 0, len - 1, &mut |a: &(u8, u32), b: &(u8, u32)| a.0.cmp(&b.0));
            }
            for pair in v.windows(2) {
                prop_assert!(pair[0].0 <= pair[1].0);
            }
        }
    }
}
