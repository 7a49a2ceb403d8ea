//! Graph builder — turns a thread of messages into a populated `Multigraph`.
//!
//! ```text
//! messages ──sort by timestamp──▶ Nodes (one per message)
//!                                 Hypernodes (one per speaker)
//!                                 c->c  reply edges         (empty payload)
//!                                 C->c  speaker -> target   (empty payload)
//!                                 C->C  speaker -> speaker  ({timestamp})
//! ```
//!
//! All accumulators live inside one `build()` call.

use hashbrown::{HashMap, HashSet};

use crate::corpus::Corpus;
use crate::model::*;
use crate::storage::Multigraph;
use crate::{Error, Result};

/// Builds the hypergraph of a thread, optionally excluding one message
/// (the root, for mid-thread graphs).
#[derive(Debug, Clone, Copy, Default)]
pub struct HypergraphBuilder<'a> {
    corpus: Option<&'a Corpus>,
    messages: Option<&'a [Message]>,
    exclude: Option<&'a str>,
}

/// Per-speaker accumulator, in first-appearance order.
#[derive(Default)]
struct SpeakerIndex<'a> {
    order: Vec<&'a Speaker>,
    members: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> SpeakerIndex<'a> {
    fn add(&mut self, speaker: &'a Speaker, message: &'a str) {
        if !self.members.contains_key(speaker.id.as_str()) {
            self.order.push(speaker);
        }
        self.members.entry(speaker.id.as_str()).or_default().push(message);
    }
}

impl<'a> HypergraphBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use every message of `corpus`. Ignored when `messages` is also set.
    pub fn corpus(mut self, corpus: &'a Corpus) -> Self {
        self.corpus = Some(corpus);
        self
    }

    /// Use an already-extracted subset of messages.
    pub fn messages(mut self, messages: &'a [Message]) -> Self {
        self.messages = Some(messages);
        self
    }

    /// Leave this message out of the graph, along with every reply to it.
    pub fn exclude(mut self, id: &'a str) -> Self {
        self.exclude = Some(id);
        self
    }

    pub fn build(self) -> Result<Multigraph> {
        let messages = match (self.messages, self.corpus) {
            (Some(messages), _) => messages,
            (None, Some(corpus)) => corpus.messages(),
            (None, None) => {
                return Err(Error::MissingInput(
                    "hypergraph builder needs a corpus or a message subset".into(),
                ));
            }
        };
        let excluded = |id: &str| self.exclude == Some(id);

        let by_id: HashMap<&str, &Message> =
            messages.iter().map(|m| (m.id.as_str(), m)).collect();

        // Stable: equal timestamps keep their input order.
        let mut sorted: Vec<&Message> = messages.iter().collect();
        sorted.sort_by_key(|m| m.timestamp);

        let mut graph = Multigraph::new();
        let mut speakers = SpeakerIndex::default();
        let mut reply_edges: Vec<(&str, &str)> = Vec::new();
        let mut speaker_replies: Vec<(&str, &str)> = Vec::new();
        let mut pair_seen: HashSet<(&str, &str, i64)> = HashSet::new();
        let mut speaker_pairs: Vec<(&str, &str, i64)> = Vec::new();

        for msg in sorted {
            if excluded(msg.id.as_str()) {
                continue;
            }
            speakers.add(&msg.speaker, msg.id.as_str());

            let target = msg.reply_to.as_deref()
                .filter(|t| !excluded(*t))
                .and_then(|t| by_id.get(t));
            if let Some(target) = target {
                reply_edges.push((msg.id.as_str(), target.id.as_str()));
                speaker_replies.push((msg.speaker.id.as_str(), target.id.as_str()));
                let triple = (msg.speaker.id.as_str(), target.speaker.id.as_str(), msg.timestamp);
                if pair_seen.insert(triple) {
                    speaker_pairs.push(triple);
                }
            }

            graph.add_node(msg.id.as_str(), msg.attributes())?;
        }

        for speaker in &speakers.order {
            let members = speakers.members.get(speaker.id.as_str()).cloned().unwrap_or_default();
            graph.add_hypernode(speaker.id.as_str(), members, speaker.meta.clone())?;
        }

        for (src, dst) in reply_edges {
            graph.add_edge(src, dst, None)?;
        }

        // Grouped by speaker so a speaker's parallel C->c instances are
        // contiguous in the edge arena.
        for speaker in &speakers.order {
            for &(_, target) in speaker_replies.iter().filter(|(s, _)| *s == speaker.id) {
                graph.add_edge(&speaker.id, target, None)?;
            }
        }

        for (src, dst, timestamp) in speaker_pairs {
            graph.add_edge(src, dst, Some(props([("timestamp", timestamp)])))?;
        }

        tracing::trace!(
            nodes = graph.node_count(),
            hypernodes = graph.hypernode_count(),
            edges = graph.edge_count(),
            excluded = ?self.exclude,
            "built conversation hypergraph"
        );

        Ok(graph)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Tier;

    fn msg(id: &str, speaker: &str, ts: i64, reply_to: Option<&str>) -> Message {
        let m = Message::new(id, Speaker::new(speaker), ts).with_root("m1");
        match reply_to {
            Some(t) => m.with_reply_to(t),
            None => m,
        }
    }

    #[test]
    fn test_missing_input() {
        assert!(matches!(HypergraphBuilder::new().build(), Err(Error::MissingInput(_))));
    }

    #[test]
    fn test_nodes_sorted_by_timestamp() {
        let msgs = vec![
            msg("m3", "a", 30, Some("m2")),
            msg("m1", "a", 10, None),
            msg("m2", "b", 20, Some("m1")),
        ];
        let g = HypergraphBuilder::new().messages(&msgs).build().unwrap();
        let order: Vec<&str> = g.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["m1", "m2", "m3"]);
        let speakers: Vec<&str> = g.hypernodes().map(|h| h.id.as_str()).collect();
        assert_eq!(speakers, vec!["a", "b"]);
        assert_eq!(g.node("m2").unwrap().get("speaker"), Some(&Value::from("b")));
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let msgs = vec![msg("x", "a", 5, None), msg("w", "b", 5, None)];
        let g = HypergraphBuilder::new().messages(&msgs).build().unwrap();
        let order: Vec<&str> = g.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["x", "w"]);
    }

    #[test]
    fn test_reply_to_outside_input_is_ignored() {
        let msgs = vec![msg("m2", "b", 20, Some("elsewhere"))];
        let g = HypergraphBuilder::new().messages(&msgs).build().unwrap();
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_exclude_drops_node_and_replies_to_it() {
        let msgs = vec![
            msg("m1", "a", 10, None),
            msg("m2", "b", 20, Some("m1")),
            msg("m3", "a", 30, Some("m2")),
        ];
        let g = HypergraphBuilder::new().messages(&msgs).exclude("m1").build().unwrap();
        assert!(!g.contains("m1"));
        // m3->m2, a->m2, a->b
        assert_eq!(g.edge_count(), 3);
        let speakers: Vec<&str> = g.hypernodes().map(|h| h.id.as_str()).collect();
        assert_eq!(speakers, vec!["b", "a"]);
    }

    #[test]
    fn test_speaker_edges_carry_timestamp_and_dedup() {
        let msgs = vec![
            msg("m1", "a", 10, None),
            msg("m2", "b", 20, Some("m1")),
            msg("m3", "b", 20, Some("m1")),
            msg("m4", "b", 25, Some("m1")),
        ];
        let g = HypergraphBuilder::new().messages(&msgs).build().unwrap();

        let out = g.outgoing("b", Tier::Hypernode).unwrap();
        assert_eq!(out.len(), 1);
        // (b, a, 20) twice collapses; (b, a, 25) stays distinct.
        assert_eq!(out[0].multiplicity(), 2);
        let stamps: Vec<i64> = out[0].edges.iter()
            .map(|e| g.edge(*e).unwrap().payload["timestamp"].as_int().unwrap())
            .collect();
        assert_eq!(stamps, vec![20, 25]);

        // C->c keeps every reply as a parallel instance.
        let to_m1 = g.outgoing("b", Tier::Node).unwrap();
        assert_eq!(to_m1[0].multiplicity(), 3);
    }

    #[test]
    fn test_hypernode_carries_speaker_meta() {
        let msgs = vec![Message::new("m1", Speaker::new("a").with_meta("karma", 9), 1)];
        let g = HypergraphBuilder::new().messages(&msgs).build().unwrap();
        assert_eq!(g.hypernode("a").unwrap().get("karma"), Some(&Value::Int(9)));
    }
}
