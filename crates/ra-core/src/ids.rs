//! Strongly typed, zero-cost identifier wrappers.
//!
//! Two kinds of identifier coexist in a road graph and must never be mixed:
//!
//! - [`NodeId`] is the **external** identifier carried by the source data
//!   (e.g. an OSM node id).  Sparse, 64-bit, only used for lookup.
//! - [`NodeIdx`] is the **position** of a node inside the graph store.  Dense
//!   from 0, used to index every per-node array (`Vec<GeoPoint>`, status
//!   tables, successor lists).
//!
//! Both are `Copy + Ord + Hash`.  The inner integer is `pub` so hot loops can
//! index directly, but callers should prefer [`NodeIdx::index`] for clarity.

use std::fmt;

/// Generate a typed identifier wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// External node identifier as found in the source data.
    pub struct NodeId(u64);
}

typed_id! {
    /// Position of a node in the graph store.  Max ~4.3 billion nodes.
    pub struct NodeIdx(u32);
}

impl NodeIdx {
    /// Sentinel meaning "no node" (`u32::MAX`).  Used for the
    /// parent of an undiscovered node and for empty heap slots.
    pub const INVALID: NodeIdx = NodeIdx(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for NodeIdx {
    /// Returns the `INVALID` sentinel so uninitialized indices are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<NodeIdx> for usize {
    #[inline(always)]
    fn from(idx: NodeIdx) -> usize {
        idx.0 as usize
    }
}

impl TryFrom<usize> for NodeIdx {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<NodeIdx, Self::Error> {
        u32::try_from(n).map(NodeIdx)
    }
}
