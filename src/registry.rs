//! Explicit container-specialization registry.
//!
//! Rather than resolving container-specific sort implementations through
//! implicit trait lookup, the customization point is an inspectable table
//! keyed by `(sorter type, container type)`. The container-aware adapter
//! consults it before taking the generic path.

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::error::SortError;
use crate::sequence::Sequence;

/// A registered container-specific sort implementation for sequences of
/// type `Q`. Plain function pointer so entries stay `Copy` and the table
/// stays `Send + Sync`.
pub struct Specialization<Q: Sequence + ?Sized> {
    call: fn(
        &mut Q,
        Range<usize>,
        &mut dyn FnMut(&Q::Item, &Q::Item) -> Ordering,
    ) -> Result<(), SortError>,
}

impl<Q: Sequence + ?Sized> Specialization<Q> {
    pub const fn new(
        call: fn(
            &mut Q,
            Range<usize>,
            &mut dyn FnMut(&Q::Item, &Q::Item) -> Ordering,
        ) -> Result<(), SortError>,
    ) -> Self {
        Specialization { call }
    }

    /// Runs the specialized implementation. It must produce the same
    /// ordering the generic path would, though its complexity and memory
    /// characteristics may differ.
    #[inline]
    pub fn invoke(
        &self,
        seq: &mut Q,
        range: Range<usize>,
        compare: &mut dyn FnMut(&Q::Item, &Q::Item) -> Ordering,
    ) -> Result<(), SortError> {
        (self.call)(seq, range, compare)
    }
}

impl<Q: Sequence + ?Sized> Clone for Specialization<Q> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Q: Sequence + ?Sized> Copy for Specialization<Q> {}

/// Table of container-specific sort implementations.
pub struct Registry {
    entries: RwLock<HashMap<(TypeId, TypeId), Box<dyn Any + Send + Sync>>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry consulted by
    /// [`Sequence::sort_with_specialization`].
    pub fn global() -> &'static Registry {
        static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);
        &GLOBAL
    }

    /// Registers `spec` for the `(S, Q)` pair, replacing any previous
    /// entry.
    pub fn register<S, Q>(&self, spec: Specialization<Q>)
    where
        S: 'static,
        Q: Sequence + ?Sized + 'static,
    {
        self.entries
            .write()
            .unwrap()
            .insert((TypeId::of::<S>(), TypeId::of::<Q>()), Box::new(spec));
    }

    /// Looks up the entry registered for sorter type id `sorter` and
    /// container type `Q`.
    pub fn lookup<Q>(&self, sorter: TypeId) -> Option<Specialization<Q>>
    where
        Q: Sequence + ?Sized + 'static,
    {
        let entries = self.entries.read().unwrap();
        entries
            .get(&(sorter, TypeId::of::<Q>()))
            .and_then(|entry| entry.downcast_ref::<Specialization<Q>>())
            .copied()
    }

    pub fn contains<S, Q>(&self) -> bool
    where
        S: 'static,
        Q: Sequence + ?Sized + 'static,
    {
        self.entries
            .read()
            .unwrap()
            .contains_key(&(TypeId::of::<S>(), TypeId::of::<Q>()))
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
