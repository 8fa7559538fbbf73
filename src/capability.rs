//! Traversal capability and stability vocabulary.
//!
//! Every sequence type advertises the strongest [`Capability`] its storage
//! supports, and every algorithm object declares the weakest capability it
//! can be driven over. Composition and dispatch decisions compare the two
//! exactly once per call, never per element.

/// Strength of positional access a sequence offers.
///
/// The variants form a total order: `Forward < Bidirectional <
/// RandomAccess < Contiguous`. A sequence with a stronger capability can
/// always stand in where a weaker one is required.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Elements can be visited in order, front to back.
    Forward,
    /// Elements can additionally be visited back to front.
    Bidirectional,
    /// Any position is reachable in O(1), but storage may be segmented.
    RandomAccess,
    /// Elements are laid out as a single `&mut [T]`.
    Contiguous,
}

impl Capability {
    /// Whether a sequence offering `self` may be handed to an algorithm
    /// requiring `required`.
    #[inline]
    pub const fn satisfies(self, required: Capability) -> bool {
        self as u8 >= required as u8
    }

    /// The weaker of two capabilities.
    #[inline]
    pub const fn min(self, other: Capability) -> Capability {
        if (self as u8) <= (other as u8) {
            self
        } else {
            other
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        match self {
            Capability::Forward => "forward",
            Capability::Bidirectional => "bidirectional",
            Capability::RandomAccess => "random-access",
            Capability::Contiguous => "contiguous",
        }
    }
}

/// Whether an algorithm object preserves the relative order of equal
/// elements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stability {
    /// Equal elements always retain their original relative order.
    Always,
    /// Equal elements may be reordered.
    Never,
    /// Depends on how the object was composed, e.g. on which child a
    /// dispatcher ends up selecting.
    Conditional,
}

impl Stability {
    /// Stability classification of a composite built from `children`.
    pub const fn combine(children: &[Stability]) -> Stability {
        let mut all_always = true;
        let mut all_never = true;
        let mut i = 0;
        while i < children.len() {
            match children[i] {
                Stability::Always => all_never = false,
                Stability::Never => all_always = false,
                Stability::Conditional => {
                    all_always = false;
                    all_never = false;
                }
            }
            i += 1;
        }
        if all_always {
            Stability::Always
        } else if all_never {
            Stability::Never
        } else {
            Stability::Conditional
        }
    }
}

/// The weakest capability among `caps`. Used by composites whose own
/// requirement is that of their least demanding child.
pub const fn weakest(caps: &[Capability]) -> Capability {
    let mut out = Capability::Contiguous;
    let mut i = 0;
    while i < caps.len() {
        out = out.min(caps[i]);
        i += 1;
    }
    out
}
