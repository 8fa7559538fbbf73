//! Support utilities shared by the adapters.

pub mod permutation;

use std::cmp::Ordering;
use std::ops::Range;

use crate::capability::Capability;
use crate::error::SortError;
use crate::sequence::{RandomAccessOps, Sequence};
use crate::sorter::SortAlgorithm;

/// Computes the order `sorter` would put `seq` into, without moving any
/// element: the result maps final position to source position, so
/// `out[0]` is the index of the smallest element.
pub fn sorted_indices<S, Q, C>(
    sorter: &S,
    seq: &mut Q,
    compare: C,
) -> Result<Vec<usize>, SortError>
where
    S: SortAlgorithm<Output = ()>,
    Q: Sequence + ?Sized,
    C: FnMut(&Q::Item, &Q::Item) -> Ordering,
{
    let len = seq.len();
    let view = match seq.random_access() {
        Some(view) => view,
        None => {
            return Err(SortError::CapabilityMismatch {
                sorter: S::name(),
                required: Capability::RandomAccess,
                actual: Q::CAPABILITY,
            })
        }
    };
    sorted_handles(sorter, &view, 0..len, compare)
}

/// Sorts a freshly built handle array over `view[range]` with `inner`.
/// Handles are absolute positions; only they move, the elements are
/// merely read for comparisons.
pub(crate) fn sorted_handles<S, V, C>(
    inner: &S,
    view: &V,
    range: Range<usize>,
    mut compare: C,
) -> Result<Vec<usize>, SortError>
where
    S: SortAlgorithm<Output = ()>,
    V: RandomAccessOps,
    C: FnMut(&V::Item, &V::Item) -> Ordering,
{
    let n = range.len();
    let mut handles: Vec<usize> = Vec::new();
    handles
        .try_reserve_exact(n)
        .map_err(|_| SortError::allocation_failed(n))?;
    handles.extend(range);
    inner.run(handles.as_mut_slice(), 0..n, |a: &usize, b: &usize| {
        compare(view.get(*a), view.get(*b))
    })?;
    Ok(handles)
}
