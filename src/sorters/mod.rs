//! Elementary sorting strategies the adapters compose.

pub mod heap;
pub mod insertion;
pub mod merge;
pub mod quick;

pub use heap::HeapSorter;
pub use insertion::InsertionSorter;
pub use merge::MergeSorter;
pub use quick::QuickSorter;
