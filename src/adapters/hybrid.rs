//! Capability-directed dispatch over a fixed family of algorithm objects.

use std::cmp::Ordering;
use std::ops::Range;

use crate::capability::{weakest, Capability, Stability};
use crate::error::SortError;
use crate::sequence::Sequence;
use crate::sorter::SortAlgorithm;

/// Dispatches each call to one child of a tuple of algorithm objects,
/// chosen by the target sequence's capability.
///
/// Selection picks, among the children the sequence can drive, the one
/// with the most demanding requirement; on a tie the earliest tuple
/// position wins. The choice depends only on the sequence type, so it is
/// made once per call from constants and folds away after
/// monomorphization. If no child is eligible the call fails with
/// [`SortError::CapabilityMismatch`] before any element is touched.
///
/// All children must agree on their `Output` type. Tuples of 1 through 16
/// children are supported.
pub struct HybridSorter<T> {
    children: T,
}

impl<T> HybridSorter<T> {
    pub const fn new(children: T) -> Self {
        HybridSorter { children }
    }
}

/// Index of the eligible child with the strongest requirement, earliest
/// position winning ties.
const fn select(cap: Capability, requires: &[Capability]) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut i = 0;
    while i < requires.len() {
        if cap.satisfies(requires[i]) {
            best = match best {
                Some(b) if (requires[i] as u8) > (requires[b] as u8) => Some(i),
                None => Some(i),
                keep => keep,
            };
        }
        i += 1;
    }
    best
}

macro_rules! impl_hybrid {
    ($($idx:tt => $child:ident),+) => {
        impl<Out, $($child),+> SortAlgorithm for HybridSorter<($($child,)+)>
        where
            $($child: SortAlgorithm<Output = Out>,)+
        {
            type Output = Out;

            const REQUIRES: Capability = weakest(&[$($child::REQUIRES),+]);
            const STABILITY: Stability = Stability::combine(&[$($child::STABILITY),+]);

            fn name() -> String {
                let children = [$($child::name()),+];
                format!("hybrid({})", children.join(", "))
            }

            fn run<Q, C>(
                &self,
                seq: &mut Q,
                range: Range<usize>,
                compare: C,
            ) -> Result<Out, SortError>
            where
                Q: Sequence + ?Sized,
                C: FnMut(&Q::Item, &Q::Item) -> Ordering,
            {
                match select(Q::CAPABILITY, &[$($child::REQUIRES),+]) {
                    $(Some($idx) => self.children.$idx.run(seq, range, compare),)+
                    _ => Err(SortError::capability_mismatch(
                        Self::name(),
                        Self::REQUIRES,
                        Q::CAPABILITY,
                    )),
                }
            }
        }
    };
}

impl_hybrid!(0 => S0);
impl_hybrid!(0 => S0, 1 => S1);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7, 8 => S8);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7, 8 => S8, 9 => S9);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7, 8 => S8, 9 => S9, 10 => S10);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7, 8 => S8, 9 => S9, 10 => S10, 11 => S11);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7, 8 => S8, 9 => S9, 10 => S10, 11 => S11, 12 => S12);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7, 8 => S8, 9 => S9, 10 => S10, 11 => S11, 12 => S12, 13 => S13);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7, 8 => S8, 9 => S9, 10 => S10, 11 => S11, 12 => S12, 13 => S13, 14 => S14);
impl_hybrid!(0 => S0, 1 => S1, 2 => S2, 3 => S3, 4 => S4, 5 => S5, 6 => S6, 7 => S7, 8 => S8, 9 => S9, 10 => S10, 11 => S11, 12 => S12, 13 => S13, 14 => S14, 15 => S15);
