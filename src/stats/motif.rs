//! Motif presence and count statistics.

use crate::model::Value;
use crate::motif::MotifKind;
use crate::storage::Multigraph;
use super::FeatureMap;

/// Feature key, e.g. `"count[incoming triads over mid-thread]"`.
pub fn motif_feature_name(stat: &str, kind: MotifKind, name_ext: &str) -> String {
    format!("{}[{}{}]", stat, kind.label(), name_ext)
}

/// `is-present` and `count` for each of the five motifs (10 features).
pub fn motif_feats(graph: &Multigraph, name_ext: &str) -> FeatureMap {
    let mut stats = FeatureMap::new();
    for kind in MotifKind::ALL {
        let count = graph.motifs(kind).len();
        stats.insert(motif_feature_name("is-present", kind, name_ext), Value::Bool(count > 0));
        stats.insert(motif_feature_name("count", kind, name_ext), Value::from(count));
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph_has_no_motifs() {
        let feats = motif_feats(&Multigraph::new(), " over mid-thread");
        assert_eq!(feats.len(), 10);
        assert_eq!(
            feats.get("is-present[dyadic interaction motif over mid-thread]"),
            Some(&Value::Bool(false))
        );
        assert_eq!(feats.get("count[outgoing triads over mid-thread]"), Some(&Value::Int(0)));
    }
}
