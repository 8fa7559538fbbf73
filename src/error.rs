//! Error types for the adaptsort library.
//!
//! Two failure classes exist at the composition layer: a sequence whose
//! traversal capability is weaker than what the selected algorithm object
//! requires, and allocation failure in a buffer-requiring path. Comparator
//! contract violations (a comparator that is not a strict weak order) are
//! deliberately not detected; they produce an unspecified but memory-safe
//! ordering.

use std::fmt;

use crate::capability::Capability;

/// Error returned by algorithm-object invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// The target sequence's capability is weaker than the algorithm's
    /// requirement. Detected before any element is touched.
    CapabilityMismatch {
        /// Name of the algorithm object that rejected the call.
        sorter: String,
        /// Weakest capability the algorithm can be driven over.
        required: Capability,
        /// Capability the sequence actually offers.
        actual: Capability,
    },
    /// A buffer-requiring path failed to allocate. The target sequence is
    /// left with its original contents.
    AllocationFailed {
        /// Number of elements the allocation was sized for.
        elements: usize,
    },
}

impl SortError {
    #[inline]
    pub(crate) fn capability_mismatch(
        sorter: String,
        required: Capability,
        actual: Capability,
    ) -> Self {
        SortError::CapabilityMismatch {
            sorter,
            required,
            actual,
        }
    }

    #[inline]
    pub(crate) fn allocation_failed(elements: usize) -> Self {
        SortError::AllocationFailed { elements }
    }
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::CapabilityMismatch {
                sorter,
                required,
                actual,
            } => write!(
                f,
                "sorter `{}` requires {} traversal but the sequence only offers {}",
                sorter,
                required.label(),
                actual.label()
            ),
            SortError::AllocationFailed { elements } => {
                write!(f, "failed to allocate scratch space for {elements} elements")
            }
        }
    }
}

impl std::error::Error for SortError {}
