//! End-to-end tests for motif enumeration on built conversation graphs.

use hyperconvo::{HypergraphBuilder, Message, MotifKind, Multigraph, Speaker};

fn reply(id: &str, speaker: &str, ts: i64, to: &str) -> Message {
    Message::new(id, Speaker::new(speaker), ts).with_reply_to(to).with_root("m1")
}

fn build(msgs: &[Message]) -> Multigraph {
    HypergraphBuilder::new().messages(msgs).build().unwrap()
}

fn ids<'g>(m: &hyperconvo::MotifInstance<'g>) -> Vec<&'g str> {
    m.vertices.iter().map(|v| v.as_str()).collect()
}

// ============================================================================
// Reciprocity
// ============================================================================

#[test]
fn test_self_reply_is_not_reciprocity() {
    let msgs = vec![
        Message::new("m1", Speaker::new("ada"), 1),
        reply("m2", "ada", 2, "m1"),
    ];
    assert!(build(&msgs).reciprocity_motifs().is_empty());
}

#[test]
fn test_back_and_forth_is_one_reciprocity() {
    let msgs = vec![
        Message::new("m1", Speaker::new("ada"), 1),
        reply("m2", "bob", 2, "m1"),
        reply("m3", "ada", 3, "m2"),
    ];
    let g = build(&msgs);
    let motifs = g.reciprocity_motifs();
    assert_eq!(motifs.len(), 1);
    assert_eq!(ids(&motifs[0]), vec!["ada", "m1", "m2"]);

    let [ada_to_m2, m2_to_m1] = motifs[0].edges;
    let e1 = g.edge(ada_to_m2).unwrap();
    let e2 = g.edge(m2_to_m1).unwrap();
    assert_eq!((e1.src.as_str(), e1.dst.as_str()), ("ada", "m2"));
    assert_eq!((e2.src.as_str(), e2.dst.as_str()), ("m2", "m1"));

    assert!(g.external_reciprocity_motifs().is_empty());
    // ada->bob and bob->ada, counted from each side.
    assert_eq!(g.dyadic_interaction_motifs().len(), 2);
    assert!(g.incoming_triad_motifs().is_empty());
    assert!(g.outgoing_triad_motifs().is_empty());
}

// ============================================================================
// External reciprocity
// ============================================================================

#[test]
fn test_third_party_responds_to_reply() {
    // bob replies to ada; cy then answers bob.
    let msgs = vec![
        Message::new("m1", Speaker::new("ada"), 1),
        reply("m2", "bob", 2, "m1"),
        reply("m3", "cy", 3, "m2"),
    ];
    let g = build(&msgs);
    let motifs = g.external_reciprocity_motifs();
    assert_eq!(motifs.len(), 1);
    assert_eq!(ids(&motifs[0]), vec!["cy", "m2", "m1"]);
    assert!(g.reciprocity_motifs().is_empty());
}

// ============================================================================
// Triads
// ============================================================================

#[test]
fn test_star_around_original_poster() {
    // Three participants reply to ada; ada answers two of them.
    let msgs = vec![
        Message::new("m1", Speaker::new("ada"), 1),
        reply("m2", "bob", 2, "m1"),
        reply("m3", "cy", 3, "m1"),
        reply("m4", "dee", 4, "m1"),
        reply("m5", "ada", 5, "m2"),
        reply("m6", "ada", 6, "m3"),
    ];
    let g = build(&msgs);

    // {bob, cy}, {bob, dee}, {cy, dee} all point at ada.
    let incoming = g.incoming_triad_motifs();
    assert_eq!(incoming.len(), 3);
    assert!(incoming.iter().all(|m| m.vertices[0].as_str() == "ada"));
    assert_eq!(ids(&incoming[0]), vec!["ada", "bob", "cy"]);

    // ada -> {bob, cy}
    let outgoing = g.outgoing_triad_motifs();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(ids(&outgoing[0]), vec!["ada", "bob", "cy"]);

    assert_eq!(g.motifs(MotifKind::ExternalReciprocity).len(), 0);
    assert_eq!(g.motifs(MotifKind::Reciprocity).len(), 2);
}

#[test]
fn test_enumeration_is_reproducible() {
    let msgs = vec![
        Message::new("m1", Speaker::new("ada"), 1),
        reply("m2", "bob", 2, "m1"),
        reply("m3", "cy", 3, "m1"),
        reply("m4", "ada", 4, "m3"),
        reply("m5", "bob", 5, "m4"),
    ];
    let a = build(&msgs);
    let b = build(&msgs);
    for kind in MotifKind::ALL {
        let left: Vec<Vec<&str>> = a.motifs(kind).iter().map(ids).collect();
        let right: Vec<Vec<&str>> = b.motifs(kind).iter().map(ids).collect();
        assert_eq!(left, right, "{kind} differs between identical builds");
    }
}
