use std::cmp::Ordering;
use std::ops::Range;

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::sequence::Sequence;
use crate::sorter::{contiguous_or_mismatch, SortAlgorithm};

/// Bottom-up binary heapsort. In-place and O(n log n) in the worst case,
/// but not stable.
#[derive(Copy, Clone, Debug, Default)]
pub struct HeapSorter;

impl HeapSorter {
    pub const fn new() -> Self {
        HeapSorter
    }
}

impl SortAlgorithm for HeapSorter {
    type Output = ();

    const REQUIRES: Capability = Capability::Contiguous;
    const STABILITY: Stability = Stability::Never;

    fn name() -> String {
        "heap".into()
    }

    fn run<Q, C>(&self, seq: &mut Q, range: Range<usize>, mut compare: C) -> Result<(), SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        let slice = contiguous_or_mismatch(seq, Self::name)?;
        heapsort(&mut slice[range], &mut compare);
        Ok(())
    }
}

fn heapsort<T, C>(v: &mut [T], compare: &mut C)
where
    C: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    for root in (0..len / 2).rev() {
        sift_down(v, root, compare);
    }
    for end in (1..len).rev() {
        v.swap(0, end);
        sift_down(&mut v[..end], 0, compare);
    }
}

fn sift_down<T, C>(v: &mut [T], mut root: usize, compare: &mut C)
where
    C: FnMut(&T, &T) -> Ordering,
{
    loop {
        let mut child = 2 * root + 1;
        if child >= v.len() {
            break;
        }
        if child + 1 < v.len() && compare(&v[child], &v[child + 1]) == Ordering::Less {
            child += 1;
        }
        if compare(&v[root], &v[child]) != Ordering::Less {
            break;
        }
        v.swap(root, child);
        root = child;
    }
}
