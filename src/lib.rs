//! # hyperconvo-rs — Hypergraph Conversation Features
//!
//! Models a conversation thread as a directed multigraph with two vertex
//! tiers, messages (`c`) and the participants who wrote them (`C`), and
//! extracts structural features from it: degree-distribution statistics and
//! counts of small interaction motifs.
//!
//! ## Design Principles
//!
//! 1. **Rebuild, don't mutate**: every feature computation builds a private
//!    `Multigraph` and drops it afterwards
//! 2. **Insertion order is the contract**: vertices and neighbors iterate in
//!    insertion order, which fixes `argmax`-style statistics
//! 3. **Opaque metadata**: store attributes travel as `PropertyMap`s
//! 4. **Degenerate stats are values**: NaN, not errors
//!
//! ## Quick Start
//!
//! ```rust
//! use hyperconvo::{Corpus, HyperConvo, HyperConvoConfig, Message, Speaker};
//!
//! # fn example() -> hyperconvo::Result<()> {
//! let corpus = Corpus::new(vec![
//!     Message::new("p1", Speaker::new("ada"), 1),
//!     Message::new("c1", Speaker::new("bob"), 2).with_reply_to("p1").with_root("p1"),
//!     Message::new("c2", Speaker::new("ada"), 3).with_reply_to("c1").with_root("p1"),
//! ])?;
//!
//! let config = HyperConvoConfig { min_thread_len: 3, ..Default::default() };
//! let feats = HyperConvo::new(config)?.retrieve_feats(&corpus)?;
//! assert_eq!(feats["p1"]["count[reciprocity motif]"].as_int(), Some(1));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Layers
//!
//! | Module | Role |
//! |--------|------|
//! | `model` | metadata values, vertices, input messages |
//! | `storage` | the multigraph store |
//! | `builder` | messages → multigraph |
//! | `motif` | the five motif enumerators |
//! | `stats` | degree and motif feature maps |
//! | `corpus` | in-memory conversation store and thread cutting |
//! | `transformer` | per-thread orchestration and write-back |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod builder;
pub mod motif;
pub mod stats;
pub mod corpus;
pub mod config;
pub mod transformer;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, Hypernode, Message, Speaker, Value, PropertyMap, VertexId, props,
};

// ============================================================================
// Re-exports: Graph
// ============================================================================

pub use storage::{Multigraph, Tier, Edge, EdgeId, Neighbor};
pub use builder::HypergraphBuilder;
pub use motif::{MotifKind, MotifInstance};

// ============================================================================
// Re-exports: Features
// ============================================================================

pub use stats::{FeatureMap, ThreadVariant, DegreeStat, DegreeDirection, degree_feats, motif_feats};
pub use corpus::{Corpus, Conversation, Thread};
pub use config::HyperConvoConfig;
pub use transformer::{HyperConvo, ThreadRecord, META_KEY};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Duplicate vertex: {0}")]
    DuplicateVertex(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Thread {root}: {source}")]
    Thread {
        root: String,
        #[source]
        source: Box<Error>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
