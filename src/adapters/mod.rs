//! Adapters: algorithm objects built out of other algorithm objects.

pub mod container_aware;
pub mod counting;
pub mod hybrid;
pub mod indirect;
pub mod out_of_place;
pub mod stable;

pub use container_aware::{
    linked_list_merge_sort, register_linked_list_specialization, ContainerAwareAdapter,
};
pub use counting::{CountingAdapter, MetricKind, Metrics};
pub use hybrid::HybridSorter;
pub use indirect::IndirectAdapter;
pub use out_of_place::{BufferPolicy, OutOfPlaceAdapter};
pub use stable::{IntoStable, StableAdapter};
