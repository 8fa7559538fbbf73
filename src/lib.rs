//! Composable sorting strategies.
//!
//! The central abstraction is the algorithm object: a reusable value
//! implementing [`SortAlgorithm`] that carries the capability it requires
//! and the stability it guarantees as constants, exposes one core `run`
//! operation, and gets the whole family of call shapes (whole-sequence or
//! ranged, comparator and/or key projection) from the trait's facade
//! methods.
//!
//! Targets are anything implementing [`Sequence`]: slices, `Vec`,
//! `VecDeque` and `LinkedList` out of the box. A sequence advertises its
//! traversal [`Capability`] and an algorithm object declares the weakest
//! one it accepts; a mismatch fails with [`SortError::CapabilityMismatch`]
//! before any element is touched.
//!
//! Algorithm objects compose. [`HybridSorter`] dispatches per sequence
//! type, [`StableAdapter`] synthesizes stability, [`IndirectAdapter`]
//! sorts through handles, [`OutOfPlaceAdapter`] promotes weak sequences
//! through a buffer, [`CountingAdapter`] instruments a run, and
//! [`ContainerAwareAdapter`] resolves container-specific implementations
//! through the [`Registry`].

pub mod adapters;
pub mod capability;
pub mod error;
pub mod registry;
pub mod sequence;
pub mod sorter;
pub mod sorters;
pub mod utility;

pub use adapters::{
    BufferPolicy, ContainerAwareAdapter, CountingAdapter, HybridSorter, IndirectAdapter,
    IntoStable, MetricKind, Metrics, OutOfPlaceAdapter, StableAdapter,
};
pub use capability::{Capability, Stability};
pub use error::SortError;
pub use registry::{Registry, Specialization};
pub use sequence::{RandomAccessOps, Sequence};
pub use sorter::SortAlgorithm;
pub use sorters::{HeapSorter, InsertionSorter, MergeSorter, QuickSorter};
