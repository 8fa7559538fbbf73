//! Container-specific resolution with a generic fallback.

use std::any::TypeId;
use std::cmp::Ordering;
use std::collections::LinkedList;
use std::mem;
use std::ops::Range;

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::registry::{Registry, Specialization};
use crate::sequence::Sequence;
use crate::sorter::SortAlgorithm;

/// Consults the specialization [`Registry`] before falling back to the
/// wrapped algorithm object.
///
/// The lookup is keyed by `(inner sorter type, container type)` and goes
/// through [`Sequence::sort_with_specialization`], so only sequence types
/// that opt into the registry ever pay for it. A hit runs the registered
/// implementation, which must order elements exactly as the generic path
/// would; a miss runs the inner object unchanged, including its capability
/// check.
///
/// Stability is [`Stability::Conditional`]: whether a specialized
/// implementation preserves ties is a property of the registered entry,
/// not of the inner object.
pub struct ContainerAwareAdapter<S> {
    inner: S,
}

impl<S> ContainerAwareAdapter<S> {
    pub const fn new(inner: S) -> Self {
        ContainerAwareAdapter { inner }
    }
}

impl<S> SortAlgorithm for ContainerAwareAdapter<S>
where
    S: SortAlgorithm<Output = ()> + 'static,
{
    type Output = ();

    const REQUIRES: Capability = Capability::Forward;
    const STABILITY: Stability = Stability::Conditional;

    fn name() -> String {
        format!("container_aware({})", S::name())
    }

    fn run<Q, C>(&self, seq: &mut Q, range: Range<usize>, mut compare: C) -> Result<(), SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        let mut erased = |a: &Q::Item, b: &Q::Item| compare(a, b);
        if let Some(result) =
            seq.sort_with_specialization(TypeId::of::<S>(), range.clone(), &mut erased)
        {
            return result;
        }
        self.inner.run(seq, range, compare)
    }
}

/// Registers [`linked_list_merge_sort`] as the specialization for sorter
/// `S` over `LinkedList<T>`.
pub fn register_linked_list_specialization<S, T>()
where
    S: 'static,
    T: 'static,
{
    Registry::global().register::<S, LinkedList<T>>(Specialization::new(linked_list_merge_sort));
}

/// Stable merge sort working on the list structure itself: splitting and
/// splicing nodes instead of moving elements through a buffer. O(n log n)
/// comparisons, O(1) auxiliary memory beyond the recursion stack.
pub fn linked_list_merge_sort<T>(
    list: &mut LinkedList<T>,
    range: Range<usize>,
    compare: &mut dyn FnMut(&T, &T) -> Ordering,
) -> Result<(), SortError> {
    let mut tail = list.split_off(range.end);
    let mut mid = list.split_off(range.start);
    merge_sort_list(&mut mid, compare);
    list.append(&mut mid);
    list.append(&mut tail);
    Ok(())
}

fn merge_sort_list<T>(list: &mut LinkedList<T>, compare: &mut dyn FnMut(&T, &T) -> Ordering) {
    let len = list.len();
    if len < 2 {
        return;
    }
    let mut right = list.split_off(len / 2);
    merge_sort_list(list, compare);
    merge_sort_list(&mut right, compare);
    let left = mem::take(list);
    *list = merge_lists(left, right, compare);
}

fn merge_lists<T>(
    mut left: LinkedList<T>,
    mut right: LinkedList<T>,
    compare: &mut dyn FnMut(&T, &T) -> Ordering,
) -> LinkedList<T> {
    let mut out = LinkedList::new();
    let mut next_left = left.pop_front();
    let mut next_right = right.pop_front();
    loop {
        match (next_left.take(), next_right.take()) {
            (Some(l), Some(r)) => {
                // Ties go left, keeping the merge stable.
                if compare(&r, &l) == Ordering::Less {
                    out.push_back(r);
                    next_left = Some(l);
                    next_right = right.pop_front();
                } else {
                    out.push_back(l);
                    next_left = left.pop_front();
                    next_right = Some(r);
                }
            }
            (Some(l), None) => {
                out.push_back(l);
                out.append(&mut left);
                break;
            }
            (None, Some(r)) => {
                out.push_back(r);
                out.append(&mut right);
                break;
            }
            (None, None) => break,
        }
    }
    out
}
