//! # Multigraph Store
//!
//! Two disjoint vertex tiers and directed, possibly parallel edges.
//!
//! | Tier | Symbol | Represents |
//! |------|--------|------------|
//! | `Tier::Node` | `c` | one message |
//! | `Tier::Hypernode` | `C` | one participant |
//!
//! Three source→target combinations are ever constructed: `c->c` (reply),
//! `C->c` (participant responds to message) and `C->C` (participant
//! responds to participant). `c->C` is representable but never built.

pub mod multigraph;

use serde::{Deserialize, Serialize};
use crate::model::{PropertyMap, VertexId};

pub use multigraph::Multigraph;

// ============================================================================
// Tier
// ============================================================================

/// Vertex tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Node,
    Hypernode,
}

impl Tier {
    /// Short symbol used in feature names: `c` for messages, `C` for participants.
    pub fn symbol(self) -> &'static str {
        match self {
            Tier::Node => "c",
            Tier::Hypernode => "C",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// Edges
// ============================================================================

/// Opaque edge-instance identifier (position in the graph's edge arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One directed edge instance. Parallel instances between the same ordered
/// pair are separate `Edge`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub src: VertexId,
    pub dst: VertexId,
    pub payload: PropertyMap,
}

/// A neighbor of a vertex together with the edge instances linking them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'g> {
    pub id: &'g VertexId,
    pub edges: &'g [EdgeId],
}

impl Neighbor<'_> {
    /// Number of parallel edge instances to this neighbor.
    pub fn multiplicity(&self) -> usize {
        self.edges.len()
    }
}
