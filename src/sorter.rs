//! The algorithm-object contract.
//!
//! An algorithm object is anything implementing [`SortAlgorithm`]: one
//! required core operation ([`SortAlgorithm::run`]) plus capability and
//! stability metadata. The provided facade methods synthesize every other
//! call shape, whole-sequence or explicit-range, with or without a
//! comparator and/or a key projection. All shapes are contractually
//! equivalent to an explicit `run` call with everything supplied.
//!
//! Range arguments accept any [`RangeBounds<usize>`], so open
//! (`..`, `3..`), half-open (`1..4`) and inclusive (`..=3`) ranges all
//! work; they are normalized exactly once per call.
//!
//! Key projections are folded into the comparator the way
//! `slice::sort_by_key` folds them, which keeps the core contract at a
//! single comparator. The facade methods are overridable so wrappers like
//! the instrumentation adapter can intercept the projection before it is
//! folded.

use std::cmp::Ordering;
use std::ops::{Bound, Range, RangeBounds};

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::sequence::Sequence;

/// A reusable, parametrized sorting strategy.
///
/// Invoking any entry point on a sequence whose capability is weaker than
/// [`SortAlgorithm::REQUIRES`] fails with
/// [`SortError::CapabilityMismatch`] before any element is touched. The
/// check compares two constants and folds away for concrete sequence
/// types.
pub trait SortAlgorithm {
    /// Value produced by a successful invocation: `()` for plain sorts,
    /// metrics for instrumented ones.
    type Output;

    /// Weakest sequence capability this object can be driven over.
    const REQUIRES: Capability;

    /// Stability classification, known at composition time.
    const STABILITY: Stability;

    /// Diagnostic name; composites embed their children's names.
    fn name() -> String;

    /// Core operation: sort `seq[range]` so that `compare` reports
    /// ascending order. Everything else in this trait funnels into this.
    fn run<Q, C>(
        &self,
        seq: &mut Q,
        range: Range<usize>,
        compare: C,
    ) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering;

    /// Sorts the whole sequence by the natural order.
    fn sort<Q>(&self, seq: &mut Q) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        Q::Item: Ord,
    {
        let len = seq.len();
        self.run(seq, 0..len, Ord::cmp)
    }

    /// Sorts the whole sequence by `compare`.
    fn sort_by<Q, C>(&self, seq: &mut Q, compare: C) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        let len = seq.len();
        self.run(seq, 0..len, compare)
    }

    /// Sorts the whole sequence by the natural order of projected keys.
    fn sort_by_key<Q, K, P>(&self, seq: &mut Q, key: P) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        K: Ord,
        P: FnMut(&Q::Item) -> K,
    {
        let len = seq.len();
        self.sort_range_by_key(seq, 0..len, key)
    }

    /// Sorts the whole sequence by `compare` applied to projected keys.
    fn sort_key_cmp<Q, K, P, C>(
        &self,
        seq: &mut Q,
        key: P,
        compare: C,
    ) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        P: FnMut(&Q::Item) -> K,
        C: FnMut(&K, &K) -> Ordering,
    {
        let len = seq.len();
        self.sort_range_key_cmp(seq, 0..len, key, compare)
    }

    /// Sorts `seq[range]` by the natural order.
    fn sort_range<Q, R>(&self, seq: &mut Q, range: R) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        Q::Item: Ord,
        R: RangeBounds<usize>,
    {
        let range = resolve_range(range, seq.len());
        self.run(seq, range, Ord::cmp)
    }

    /// Sorts `seq[range]` by `compare`.
    fn sort_range_by<Q, R, C>(
        &self,
        seq: &mut Q,
        range: R,
        compare: C,
    ) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        R: RangeBounds<usize>,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        let range = resolve_range(range, seq.len());
        self.run(seq, range, compare)
    }

    /// Sorts `seq[range]` by the natural order of projected keys.
    fn sort_range_by_key<Q, R, K, P>(
        &self,
        seq: &mut Q,
        range: R,
        mut key: P,
    ) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        R: RangeBounds<usize>,
        K: Ord,
        P: FnMut(&Q::Item) -> K,
    {
        let range = resolve_range(range, seq.len());
        self.run(seq, range, move |a, b| key(a).cmp(&key(b)))
    }

    /// Sorts `seq[range]` by `compare` applied to projected keys.
    fn sort_range_key_cmp<Q, R, K, P, C>(
        &self,
        seq: &mut Q,
        range: R,
        mut key: P,
        mut compare: C,
    ) -> Result<Self::Output, SortError>
    where
        Q: Sequence + ?Sized,
        R: RangeBounds<usize>,
        P: FnMut(&Q::Item) -> K,
        C: FnMut(&K, &K) -> Ordering,
    {
        let range = resolve_range(range, seq.len());
        self.run(seq, range, move |a, b| compare(&key(a), &key(b)))
    }
}

/// Normalizes a `RangeBounds` against `len`, panicking on out-of-bounds
/// or inverted ranges the way slice indexing does.
pub(crate) fn resolve_range<R: RangeBounds<usize>>(range: R, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s
            .checked_add(1)
            .unwrap_or_else(|| panic!("sort range start overflows usize")),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e
            .checked_add(1)
            .unwrap_or_else(|| panic!("sort range end overflows usize")),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };
    if start > end {
        panic!("sort range starts at {start} but ends at {end}");
    }
    if end > len {
        panic!("sort range ends at {end} but the sequence length is {len}");
    }
    start..end
}

/// Contiguous view of `seq`, or the capability-mismatch error leaf
/// sorters report.
pub(crate) fn contiguous_or_mismatch<Q>(
    seq: &mut Q,
    name: impl FnOnce() -> String,
) -> Result<&mut [Q::Item], SortError>
where
    Q: Sequence + ?Sized,
{
    match seq.contiguous() {
        Some(slice) => Ok(slice),
        None => Err(SortError::capability_mismatch(
            name(),
            Capability::Contiguous,
            Q::CAPABILITY,
        )),
    }
}
