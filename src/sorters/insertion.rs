use std::cmp::Ordering;
use std::ops::Range;

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::sequence::Sequence;
use crate::sorter::{contiguous_or_mismatch, SortAlgorithm};

/// Classic insertion sort. Quadratic, but the cutoff workhorse for the
/// other sorters and unbeatable on tiny or nearly-sorted ranges.
#[derive(Copy, Clone, Debug, Default)]
pub struct InsertionSorter;

impl InsertionSorter {
    pub const fn new() -> Self {
        InsertionSorter
    }
}

impl SortAlgorithm for InsertionSorter {
    type Output = ();

    const REQUIRES: Capability = Capability::Contiguous;
    const STABILITY: Stability = Stability::Always;

    fn name() -> String {
        "insertion".into()
    }

    fn run<Q, C>(&self, seq: &mut Q, range: Range<usize>, mut compare: C) -> Result<(), SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        let slice = contiguous_or_mismatch(seq, Self::name)?;
        insertion_sort(&mut slice[range], &mut compare);
        Ok(())
    }
}

pub(crate) fn insertion_sort<T, C>(v: &mut [T], compare: &mut C)
where
    C: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        let mut j = i;
        // Strict comparison keeps equal elements in arrival order.
        while j > 0 && compare(&v[j], &v[j - 1]) == Ordering::Less {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
}
