//! Degree-distribution statistics.
//!
//! Every statistic maps a degree vector (one entry per vertex, insertion
//! order) to a `Value`. Degenerate inputs produce NaN rather than errors:
//!
//! - empty vector: NaN for everything
//! - fewer than two entries: NaN for the `2nd-*` family
//! - zero sum: NaN for normalized stats and entropy (0/0)
//! - no nonzero entry: NaN for `mean-nonzero` and `prop-multiple`

use serde::{Deserialize, Serialize};

use crate::model::Value;
use crate::storage::{Multigraph, Tier};
use super::FeatureMap;

/// Source→target tier combinations that get degree statistics.
/// `c->C` is never constructed and its features are not emitted.
pub const TIER_COMBOS: [(Tier, Tier); 3] = [
    (Tier::Node, Tier::Node),
    (Tier::Hypernode, Tier::Node),
    (Tier::Hypernode, Tier::Hypernode),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeDirection {
    Out,
    In,
}

impl DegreeDirection {
    pub fn label(self) -> &'static str {
        match self {
            DegreeDirection::Out => "outdegree",
            DegreeDirection::In => "indegree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeStat {
    Max,
    Argmax,
    NormMax,
    SecondLargest,
    SecondArgmax,
    NormSecondLargest,
    Mean,
    MeanNonzero,
    PropNonzero,
    PropMultiple,
    Entropy,
    SecondLargestOverMax,
}

impl DegreeStat {
    pub const ALL: [DegreeStat; 12] = [
        DegreeStat::Max,
        DegreeStat::Argmax,
        DegreeStat::NormMax,
        DegreeStat::SecondLargest,
        DegreeStat::SecondArgmax,
        DegreeStat::NormSecondLargest,
        DegreeStat::Mean,
        DegreeStat::MeanNonzero,
        DegreeStat::PropNonzero,
        DegreeStat::PropMultiple,
        DegreeStat::Entropy,
        DegreeStat::SecondLargestOverMax,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DegreeStat::Max => "max",
            DegreeStat::Argmax => "argmax",
            DegreeStat::NormMax => "norm.max",
            DegreeStat::SecondLargest => "2nd-largest",
            DegreeStat::SecondArgmax => "2nd-argmax",
            DegreeStat::NormSecondLargest => "norm.2nd-largest",
            DegreeStat::Mean => "mean",
            DegreeStat::MeanNonzero => "mean-nonzero",
            DegreeStat::PropNonzero => "prop-nonzero",
            DegreeStat::PropMultiple => "prop-multiple",
            DegreeStat::Entropy => "entropy",
            DegreeStat::SecondLargestOverMax => "2nd-largest / max",
        }
    }

    pub fn compute(self, degrees: &[u64]) -> Value {
        let nan = Value::Float(f64::NAN);
        if degrees.is_empty() {
            return nan;
        }
        let ranked = rank_descending(degrees);
        let max = degrees[ranked[0]];
        let second = ranked.get(1).map(|&i| degrees[i]);
        let sum: u64 = degrees.iter().sum();
        let nonzero = degrees.iter().filter(|&&d| d != 0).count();

        match self {
            DegreeStat::Max => Value::Int(max as i64),
            DegreeStat::Argmax => Value::from(ranked[0]),
            DegreeStat::NormMax => Value::Float(ratio(max, sum)),
            DegreeStat::SecondLargest => second.map_or(nan, |s| Value::Int(s as i64)),
            DegreeStat::SecondArgmax => ranked.get(1).map_or(nan, |&i| Value::from(i)),
            DegreeStat::NormSecondLargest => second.map_or(nan, |s| Value::Float(ratio(s, sum))),
            DegreeStat::Mean => Value::Float(ratio(sum, degrees.len() as u64)),
            DegreeStat::MeanNonzero => Value::Float(ratio(sum, nonzero as u64)),
            DegreeStat::PropNonzero => Value::Float(ratio(nonzero as u64, degrees.len() as u64)),
            DegreeStat::PropMultiple => {
                let multiple = degrees.iter().filter(|&&d| d > 1).count();
                Value::Float(ratio(multiple as u64, nonzero as u64))
            }
            DegreeStat::Entropy => Value::Float(entropy(degrees)),
            DegreeStat::SecondLargestOverMax => second.map_or(nan, |s| Value::Float(ratio(s, max))),
        }
    }
}

/// Indices sorted by descending degree; ties keep ascending index, so the
/// first index is the first maximal position.
fn rank_descending(degrees: &[u64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..degrees.len()).collect();
    idx.sort_by(|&a, &b| degrees[b].cmp(&degrees[a]));
    idx
}

/// Float division; 0/0 is NaN.
fn ratio(num: u64, den: u64) -> f64 {
    num as f64 / den as f64
}

/// Shannon entropy (natural log) of the vector normalized to sum to 1.
fn entropy(degrees: &[u64]) -> f64 {
    let sum: u64 = degrees.iter().sum();
    if sum == 0 {
        return f64::NAN;
    }
    let total = sum as f64;
    -degrees.iter()
        .filter(|&&d| d > 0)
        .map(|&d| {
            let p = d as f64 / total;
            p * p.ln()
        })
        .sum::<f64>()
}

/// Feature key, e.g. `"max[outdegree over C->C mid-thread responses]"`.
pub fn degree_feature_name(
    stat: DegreeStat,
    direction: DegreeDirection,
    src: Tier,
    dst: Tier,
    name_ext: &str,
) -> String {
    format!(
        "{}[{} over {}->{} {}responses]",
        stat.name(),
        direction.label(),
        src.symbol(),
        dst.symbol(),
        name_ext,
    )
}

/// All 72 degree features of one graph (3 tier combos × 2 directions × 12 stats).
pub fn degree_feats(graph: &Multigraph, name_ext: &str) -> FeatureMap {
    let mut stats = FeatureMap::new();
    for (src, dst) in TIER_COMBOS {
        let outdegrees = graph.out_degrees(src, dst);
        let indegrees = graph.in_degrees(src, dst);
        for stat in DegreeStat::ALL {
            stats.insert(
                degree_feature_name(stat, DegreeDirection::Out, src, dst, name_ext),
                stat.compute(&outdegrees),
            );
            stats.insert(
                degree_feature_name(stat, DegreeDirection::In, src, dst, name_ext),
                stat.compute(&indegrees),
            );
        }
    }
    stats
}
