//! Shared test harness: a slice-sorting facade, input pattern
//! generators, and a correctness suite instantiated per implementation.

/// Interface the suite drives a sorting implementation through,
/// implemented by thin wrappers around the object under test.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

pub mod patterns;
pub mod tests;
