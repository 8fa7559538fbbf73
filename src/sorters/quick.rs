use std::cmp::Ordering;
use std::ops::Range;

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::sequence::Sequence;
use crate::sorter::{contiguous_or_mismatch, SortAlgorithm};
use crate::sorters::insertion::insertion_sort;

/// Median-of-three quicksort with an insertion-sorted base case. The
/// partition advances both cursors on equal elements, so all-equal inputs
/// split evenly instead of degrading to quadratic time.
#[derive(Copy, Clone, Debug, Default)]
pub struct QuickSorter;

impl QuickSorter {
    pub const fn new() -> Self {
        QuickSorter
    }
}

impl SortAlgorithm for QuickSorter {
    type Output = ();

    const REQUIRES: Capability = Capability::Contiguous;
    const STABILITY: Stability = Stability::Never;

    fn name() -> String {
        "quick".into()
    }

    fn run<Q, C>(&self, seq: &mut Q, range: Range<usize>, mut compare: C) -> Result<(), SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        let slice = contiguous_or_mismatch(seq, Self::name)?;
        quicksort(&mut slice[range], &mut compare);
        Ok(())
    }
}

const INSERTION_CUTOFF: usize = 24;

fn quicksort<T, C>(mut v: &mut [T], compare: &mut C)
where
    C: FnMut(&T, &T) -> Ordering,
{
    // Recurse into the smaller partition and loop on the larger, keeping
    // stack depth logarithmic even on adversarial comparators.
    loop {
        if v.len() <= INSERTION_CUTOFF {
            insertion_sort(v, compare);
            return;
        }
        let pivot_at = median_of_three(v, compare);
        v.swap(0, pivot_at);
        let mid = partition(v, compare);

        let (left, rest) = v.split_at_mut(mid);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quicksort(left, compare);
            v = right;
        } else {
            quicksort(right, compare);
            v = left;
        }
    }
}

/// Partitions `v[1..]` around the pivot at `v[0]`, then moves the pivot
/// into its final slot and returns its index.
fn partition<T, C>(v: &mut [T], compare: &mut C) -> usize
where
    C: FnMut(&T, &T) -> Ordering,
{
    let (pivot, rest) = match v.split_first_mut() {
        Some(parts) => parts,
        None => return 0,
    };
    let mut left = 0;
    let mut right = rest.len();
    loop {
        while left < right && compare(&rest[left], pivot) == Ordering::Less {
            left += 1;
        }
        while left < right && compare(&rest[right - 1], pivot) == Ordering::Greater {
            right -= 1;
        }
        if left >= right {
            break;
        }
        // Both stopped elements compare equal-or-crossing with the pivot;
        // swapping and advancing both splits runs of equals across the
        // partition point.
        right -= 1;
        rest.swap(left, right);
        left += 1;
    }
    v.swap(0, left);
    left
}

fn median_of_three<T, C>(v: &[T], compare: &mut C) -> usize
where
    C: FnMut(&T, &T) -> Ordering,
{
    let a = 0;
    let b = v.len() / 2;
    let c = v.len() - 1;
    let a_lt_b = compare(&v[a], &v[b]) == Ordering::Less;
    let b_lt_c = compare(&v[b], &v[c]) == Ordering::Less;
    if a_lt_b == b_lt_c {
        return b;
    }
    let a_lt_c = compare(&v[a], &v[c]) == Ordering::Less;
    if a_lt_b {
        // a < b, c <= b: the median is the larger of a and c.
        if a_lt_c {
            c
        } else {
            a
        }
    } else {
        // b <= a, b < c: the median is the smaller of a and c.
        if a_lt_c {
            a
        } else {
            c
        }
    }
}
