//! Promotion of weak sequences through a contiguous scratch buffer.

use std::cmp::Ordering;
use std::ops::Range;

use crate::capability::{Capability, Stability};
use crate::error::SortError;
use crate::sequence::Sequence;
use crate::sorter::SortAlgorithm;

/// How the promotion buffer is sized relative to the sequence length.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BufferPolicy {
    /// Exactly the sequence length.
    #[default]
    ExactSize,
    /// The sequence length plus this many extra slots, for inner objects
    /// that want trailing headroom.
    WithCapacityFor(usize),
}

impl BufferPolicy {
    fn extra(self) -> usize {
        match self {
            BufferPolicy::ExactSize => 0,
            BufferPolicy::WithCapacityFor(extra) => extra,
        }
    }
}

/// Lifts the elements of any sequence into a contiguous buffer, runs the
/// inner algorithm there, and moves them back in sorted order.
///
/// This is the explicit way to drive a contiguous-only algorithm over a
/// linked structure. Contiguous sequences pass their own storage through
/// [`Sequence::rebuild`] and pay nothing; everything else costs one buffer
/// allocation and two element moves per element. Allocation failure is
/// reported before any element has moved, leaving the sequence untouched.
pub struct OutOfPlaceAdapter<S> {
    inner: S,
    policy: BufferPolicy,
}

impl<S> OutOfPlaceAdapter<S> {
    pub const fn new(inner: S) -> Self {
        OutOfPlaceAdapter {
            inner,
            policy: BufferPolicy::ExactSize,
        }
    }

    pub const fn with_policy(inner: S, policy: BufferPolicy) -> Self {
        OutOfPlaceAdapter { inner, policy }
    }
}

impl<S> SortAlgorithm for OutOfPlaceAdapter<S>
where
    S: SortAlgorithm<Output = ()>,
{
    type Output = ();

    const REQUIRES: Capability = Capability::Forward;
    const STABILITY: Stability = S::STABILITY;

    fn name() -> String {
        format!("out_of_place({})", S::name())
    }

    fn run<Q, C>(&self, seq: &mut Q, range: Range<usize>, compare: C) -> Result<(), SortError>
    where
        Q: Sequence + ?Sized,
        C: FnMut(&Q::Item, &Q::Item) -> Ordering,
    {
        seq.rebuild(self.policy.extra(), |buf| {
            self.inner.run(buf, range, compare)
        })
    }
}
