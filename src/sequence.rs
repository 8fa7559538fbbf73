//! The sequence abstraction the adapters sort through.
//!
//! Instead of encoding traversal strength in iterator categories, this
//! crate uses a [`Sequence`] trait carrying an explicit [`Capability`]
//! constant plus tiered access:
//!
//! - the forward tier ([`Sequence::rebuild`]) is available to every
//!   sequence and runs a closure over the elements as a contiguous buffer,
//!   restoring them in order afterwards;
//! - the random-access tier ([`Sequence::random_access`]) hands out a view
//!   implementing [`RandomAccessOps`];
//! - the contiguous tier ([`Sequence::contiguous`]) hands out the backing
//!   slice itself.
//!
//! A view accessor returns `Some` exactly when [`Sequence::CAPABILITY`]
//! reaches the corresponding tier. Algorithm objects must not fall back to
//! `rebuild` when a capability check fails; promotion through a temporary
//! buffer is the out-of-place adapter's explicit job, not an implicit
//! escape hatch.

use std::any::TypeId;
use std::cmp::Ordering;
use std::collections::{LinkedList, VecDeque};
use std::convert::Infallible;
use std::marker::PhantomData;
use std::ops::Range;

use crate::capability::Capability;
use crate::error::SortError;
use crate::registry::Registry;
use crate::utility::permutation::apply_permutation;

/// A mutable sequence of sortable elements.
pub trait Sequence {
    type Item;

    /// View type returned by [`Sequence::random_access`]. Sequences below
    /// the random-access tier use [`NoRandomAccess`].
    type RandomAccessView<'a>: RandomAccessOps<Item = Self::Item>
    where
        Self: 'a;

    /// Strongest traversal capability the storage supports.
    const CAPABILITY: Capability;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` over the elements laid out as a contiguous buffer and
    /// restores them, in the buffer's final order, afterwards.
    ///
    /// Contiguous storage passes its own slice and pays nothing; linked
    /// storage moves the elements through a temporary buffer sized
    /// `len + reserve_extra`, failing with
    /// [`SortError::AllocationFailed`] before any element is moved if the
    /// allocation cannot be made. An `Err` from `f` is propagated after
    /// the elements have been restored.
    fn rebuild<F>(&mut self, reserve_extra: usize, f: F) -> Result<(), SortError>
    where
        F: FnOnce(&mut [Self::Item]) -> Result<(), SortError>;

    /// Random-access view; `None` below [`Capability::RandomAccess`].
    fn random_access(&mut self) -> Option<Self::RandomAccessView<'_>>;

    /// Backing slice; `None` below [`Capability::Contiguous`].
    fn contiguous(&mut self) -> Option<&mut [Self::Item]>;

    /// Container-specific sort hook consulted by the container-aware
    /// adapter: a sequence type that can appear in the specialization
    /// [`Registry`] looks itself up under `(sorter, Self)` and runs the
    /// registered implementation. The default says "no specialization".
    ///
    /// The comparator is type-erased at this boundary only; everything on
    /// the generic path stays monomorphic.
    fn sort_with_specialization(
        &mut self,
        sorter: TypeId,
        range: Range<usize>,
        compare: &mut dyn FnMut(&Self::Item, &Self::Item) -> Ordering,
    ) -> Option<Result<(), SortError>> {
        let _ = (sorter, range, compare);
        None
    }
}

/// O(1) positional operations on a random-access view.
pub trait RandomAccessOps {
    type Item;

    fn len(&self) -> usize;

    fn get(&self, index: usize) -> &Self::Item;

    fn swap(&mut self, a: usize, b: usize);

    /// Commits `perm` (final position -> source position, relative to
    /// `offset`) onto the elements by in-place cycle-following, consuming
    /// `perm` (it is left as the identity).
    ///
    /// `perm` must be a bijection on `0..perm.len()`; the generic
    /// swap-based version tolerates malformed input (the element multiset
    /// is preserved, the order is unspecified), while the slice version
    /// validates and panics.
    fn apply_permutation(&mut self, offset: usize, perm: &mut [usize]) {
        for start in 0..perm.len() {
            if perm[start] == start {
                continue;
            }
            let mut cur = start;
            loop {
                let next = perm[cur];
                perm[cur] = cur;
                if next == start || next == cur {
                    break;
                }
                self.swap(offset + cur, offset + next);
                cur = next;
            }
        }
    }
}

/// Placeholder view for sequences below the random-access tier; cannot be
/// constructed.
pub struct NoRandomAccess<T> {
    never: Infallible,
    _marker: PhantomData<T>,
}

impl<T> RandomAccessOps for NoRandomAccess<T> {
    type Item = T;

    fn len(&self) -> usize {
        match self.never {}
    }

    fn get(&self, _index: usize) -> &T {
        match self.never {}
    }

    fn swap(&mut self, _a: usize, _b: usize) {
        match self.never {}
    }
}

impl<T> RandomAccessOps for &mut [T] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        <[T]>::swap(self, a, b);
    }

    #[inline]
    fn apply_permutation(&mut self, offset: usize, perm: &mut [usize]) {
        // One data move per element instead of the generic swap chase.
        apply_permutation(&mut self[offset..offset + perm.len()], perm);
    }
}

impl<T> RandomAccessOps for &mut VecDeque<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        VecDeque::swap(self, a, b);
    }
}

impl<T> Sequence for [T] {
    type Item = T;
    type RandomAccessView<'a>
        = &'a mut [T]
    where
        Self: 'a;

    const CAPABILITY: Capability = Capability::Contiguous;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn rebuild<F>(&mut self, _reserve_extra: usize, f: F) -> Result<(), SortError>
    where
        F: FnOnce(&mut [T]) -> Result<(), SortError>,
    {
        f(self)
    }

    #[inline]
    fn random_access(&mut self) -> Option<&mut [T]> {
        Some(self)
    }

    #[inline]
    fn contiguous(&mut self) -> Option<&mut [T]> {
        Some(self)
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;
    type RandomAccessView<'a>
        = &'a mut [T]
    where
        Self: 'a;

    const CAPABILITY: Capability = Capability::Contiguous;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn rebuild<F>(&mut self, _reserve_extra: usize, f: F) -> Result<(), SortError>
    where
        F: FnOnce(&mut [T]) -> Result<(), SortError>,
    {
        f(self.as_mut_slice())
    }

    #[inline]
    fn random_access(&mut self) -> Option<&mut [T]> {
        Some(self.as_mut_slice())
    }

    #[inline]
    fn contiguous(&mut self) -> Option<&mut [T]> {
        Some(self.as_mut_slice())
    }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;
    type RandomAccessView<'a>
        = &'a mut VecDeque<T>
    where
        Self: 'a;

    const CAPABILITY: Capability = Capability::RandomAccess;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn rebuild<F>(&mut self, _reserve_extra: usize, f: F) -> Result<(), SortError>
    where
        F: FnOnce(&mut [T]) -> Result<(), SortError>,
    {
        // The ring buffer already owns enough contiguous storage.
        f(self.make_contiguous())
    }

    #[inline]
    fn random_access(&mut self) -> Option<&mut VecDeque<T>> {
        Some(self)
    }

    #[inline]
    fn contiguous(&mut self) -> Option<&mut [T]> {
        None
    }
}

impl<T: 'static> Sequence for LinkedList<T> {
    type Item = T;
    type RandomAccessView<'a>
        = NoRandomAccess<T>
    where
        Self: 'a;

    const CAPABILITY: Capability = Capability::Bidirectional;

    #[inline]
    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn rebuild<F>(&mut self, reserve_extra: usize, f: F) -> Result<(), SortError>
    where
        F: FnOnce(&mut [T]) -> Result<(), SortError>,
    {
        let wanted = self.len() + reserve_extra;
        let mut buf: Vec<T> = Vec::new();
        buf.try_reserve_exact(wanted)
            .map_err(|_| SortError::allocation_failed(wanted))?;
        while let Some(item) = self.pop_front() {
            buf.push(item);
        }
        let result = f(&mut buf);
        self.extend(buf.drain(..));
        result
    }

    #[inline]
    fn random_access(&mut self) -> Option<NoRandomAccess<T>> {
        None
    }

    #[inline]
    fn contiguous(&mut self) -> Option<&mut [T]> {
        None
    }

    fn sort_with_specialization(
        &mut self,
        sorter: TypeId,
        range: Range<usize>,
        compare: &mut dyn FnMut(&T, &T) -> Ordering,
    ) -> Option<Result<(), SortError>> {
        let spec = Registry::global().lookup::<Self>(sorter)?;
        Some(spec.invoke(self, range, compare))
    }
}
