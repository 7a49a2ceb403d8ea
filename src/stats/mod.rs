//! # Statistics Aggregator
//!
//! Flattens a graph into named features. Keys follow fixed templates so
//! consumers can pattern-match on statistic, tier combination and thread
//! variant:
//!
//! ```text
//! {stat}[{outdegree|indegree} over {c|C}->{c|C} {ext}responses]   72 per graph
//! {is-present|count}[{motif}{ext}]                                 10 per graph
//! ```

pub mod degree;
pub mod motif;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Value;

pub use degree::{
    DegreeDirection, DegreeStat, TIER_COMBOS,
    degree_feature_name, degree_feats,
};
pub use motif::{motif_feature_name, motif_feats};

/// Feature name → value. Ordered so serialised records are stable.
pub type FeatureMap = BTreeMap<String, Value>;

/// Which graph of a thread a feature set was computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreadVariant {
    /// The whole thread.
    Full,
    /// The thread with its root message removed.
    Mid,
}

impl ThreadVariant {
    /// Suffix spliced into degree feature names.
    pub fn degree_suffix(self) -> &'static str {
        match self {
            ThreadVariant::Full => "",
            ThreadVariant::Mid => "mid-thread ",
        }
    }

    /// Suffix appended to motif feature names.
    pub fn motif_suffix(self) -> &'static str {
        match self {
            ThreadVariant::Full => "",
            ThreadVariant::Mid => " over mid-thread",
        }
    }
}
