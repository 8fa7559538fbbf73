//! Stability synthesis for unstable algorithm objects.

use std::cmp::Ordering;
use std::ops::Range;

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::sequence::{RandomAccessOps, Sequence};
use crate::sorter::SortAlgorithm;
use crate::sorters::{HeapSorter, InsertionSorter, MergeSorter, QuickSorter};

/// Makes any algorithm object stable.
///
/// An already-stable inner object is invoked directly and nothing is paid.
/// Otherwise the adapter sorts an array of positions with the inner
/// object, breaking comparator ties by original position, then commits the
/// resulting permutation onto the elements. The tie-break leaves the
/// position comparator without equal pairs, so any correct inner sort
/// produces the unique stable order regardless of its own stability.
///
/// The synthesized path needs a random-access view; sequences below that
/// tier are routed through [`Sequence::rebuild`], which is why the
/// adapter's own requirement drops to [`Capability::Forward`].
pub struct StableAdapter<S> {
    inner: S,
}

impl<S> StableAdapter<S> {
    pub const fn new(inner: S) -> Self {
        StableAdapter { inner }
    }
}

impl<S> SortAlgorithm for StableAdapter<S>
where
    S: SortAlgorithm<Output = ()>,
{
    type Output = ();

    const REQUIRES: Capability = match S::STABILITY {
        Stability::Always => S::REQUIRES,
        _ => Capability::Forward,
    };
    const STABILITY: Stability = Stability::Always;

    fn name() -> String {
        format!("stable({})", S::name())
    }

    fn run<Q, C>(&self, seq: &mut Q, range: Range<usize>, compare: C) -> Result<(), SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        if let Stability::Always = S::STABILITY {
            return self.inner.run(seq, range, compare);
        }
        if range.len() < 2 {
            return Ok(());
        }
        if let Some(mut view) = seq.random_access() {
            return stable_sort_via_handles(&self.inner, &mut view, range, compare);
        }
        seq.rebuild(0, |buf| {
            let mut view: &mut [Q::Item] = buf;
            stable_sort_via_handles(&self.inner, &mut view, range, compare)
        })
    }
}

/// Sorts `view[range]` stably by driving `inner` over a handle array with
/// a position tie-break, then applying the resulting permutation.
fn stable_sort_via_handles<S, V, C>(
    inner: &S,
    view: &mut V,
    range: Range<usize>,
    mut compare: C,
) -> Result<(), SortError>
where
    S: SortAlgorithm<Output = ()>,
    V: RandomAccessOps,
    C: FnMut(&V::Item, &V::Item) -> Ordering,
{
    let start = range.start;
    let n = range.len();
    let mut handles: Vec<usize> = Vec::new();
    handles
        .try_reserve_exact(n)
        .map_err(|_| SortError::allocation_failed(n))?;
    handles.extend(range);
    inner.run(handles.as_mut_slice(), 0..n, |a: &usize, b: &usize| {
        compare(view.get(*a), view.get(*b)).then_with(|| a.cmp(b))
    })?;
    for handle in &mut handles {
        *handle -= start;
    }
    view.apply_permutation(start, &mut handles);
    Ok(())
}

/// Conversion of an algorithm object into a stable counterpart.
///
/// The default route is wrapping in [`StableAdapter`], but a type with a
/// cheaper dedicated stable variant can nominate it instead, and stable
/// types convert to themselves.
pub trait IntoStable {
    type Stable: SortAlgorithm;

    fn into_stable(self) -> Self::Stable;
}

impl IntoStable for InsertionSorter {
    type Stable = InsertionSorter;

    fn into_stable(self) -> InsertionSorter {
        self
    }
}

impl IntoStable for MergeSorter {
    type Stable = MergeSorter;

    fn into_stable(self) -> MergeSorter {
        self
    }
}

impl IntoStable for HeapSorter {
    type Stable = StableAdapter<HeapSorter>;

    fn into_stable(self) -> StableAdapter<HeapSorter> {
        StableAdapter::new(self)
    }
}

impl IntoStable for QuickSorter {
    /// Quicksort has no cheap stable rendition; the designated substitute
    /// is the merge sort, which shares the contiguous requirement.
    type Stable = MergeSorter;

    fn into_stable(self) -> MergeSorter {
        MergeSorter::new()
    }
}

impl<S> IntoStable for StableAdapter<S>
where
    S: SortAlgorithm<Output = ()>,
{
    type Stable = StableAdapter<S>;

    fn into_stable(self) -> StableAdapter<S> {
        self
    }
}
