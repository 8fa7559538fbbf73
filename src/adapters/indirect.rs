//! Sorting through a layer of handles.

use std::cmp::Ordering;
use std::ops::Range;

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::sequence::{RandomAccessOps, Sequence};
use crate::sorter::SortAlgorithm;
use crate::utility::sorted_handles;

/// Runs the inner algorithm over an array of positions instead of the
/// elements, then commits the resulting permutation in a single
/// cycle-following pass.
///
/// The inner object's data movement all lands on `usize` handles; the
/// elements are only read for comparisons until the final commit, which
/// moves each displaced element exactly once. Worthwhile when elements are
/// expensive to move and comparisons are not.
///
/// The handle array is positional, so the adapter requires a
/// random-access view and does not serve linked storage. To indirect-sort
/// a weaker sequence, promote it first: `OutOfPlaceAdapter::new(
/// IndirectAdapter::new(...))`.
pub struct IndirectAdapter<S> {
    inner: S,
}

impl<S> IndirectAdapter<S> {
    pub const fn new(inner: S) -> Self {
        IndirectAdapter { inner }
    }
}

impl<S> SortAlgorithm for IndirectAdapter<S>
where
    S: SortAlgorithm<Output = ()>,
{
    type Output = ();

    const REQUIRES: Capability = Capability::RandomAccess;
    const STABILITY: Stability = S::STABILITY;

    fn name() -> String {
        format!("indirect({})", S::name())
    }

    fn run<Q, C>(&self, seq: &mut Q, range: Range<usize>, compare: C) -> Result<(), SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        // Capability is checked before the trivial-range shortcut, so a
        // weak sequence is rejected regardless of how short the range is.
        let mut view = match seq.random_access() {
            Some(view) => view,
            None => {
                return Err(SortError::capability_mismatch(
                    Self::name(),
                    Self::REQUIRES,
                    Q::CAPABILITY,
                ))
            }
        };
        if range.len() < 2 {
            return Ok(());
        }
        let start = range.start;
        let mut handles = sorted_handles(&self.inner, &view, range, compare)?;
        for handle in &mut handles {
            *handle -= start;
        }
        view.apply_permutation(start, &mut handles);
        Ok(())
    }
}
