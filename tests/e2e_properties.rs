//! Property tests over randomly shaped reply trees.

use proptest::prelude::*;

use hyperconvo::{HyperConvo, HypergraphBuilder, Message, Speaker, Tier};

/// Message `i` is written by speaker `speakers[i]` and replies to
/// `parents[i] % i` (message 0 is the root).
fn thread(speakers: &[u8], parents: &[usize]) -> Vec<Message> {
    speakers.iter().enumerate()
        .map(|(i, s)| {
            let msg = Message::new(format!("m{i}"), Speaker::new(format!("u{s}")), i as i64)
                .with_root("m0");
            if i == 0 {
                msg
            } else {
                msg.with_reply_to(format!("m{}", parents[i] % i))
            }
        })
        .collect()
}

fn arb_thread() -> impl Strategy<Value = Vec<Message>> {
    (1usize..24).prop_flat_map(|n| {
        (
            prop::collection::vec(0u8..5, n),
            prop::collection::vec(any::<usize>(), n),
        )
    })
    .prop_map(|(speakers, parents)| thread(&speakers, &parents))
}

proptest! {
    #[test]
    fn prop_degree_sums_match(msgs in arb_thread()) {
        let g = HypergraphBuilder::new().messages(&msgs).build().unwrap();
        for src in [Tier::Node, Tier::Hypernode] {
            for dst in [Tier::Node, Tier::Hypernode] {
                let out: u64 = g.out_degrees(src, dst).iter().sum();
                let inc: u64 = g.in_degrees(src, dst).iter().sum();
                prop_assert_eq!(out, inc, "{}->{}", src, dst);
            }
        }
        // Every non-root message replies inside the thread.
        let replies: u64 = g.out_degrees(Tier::Node, Tier::Node).iter().sum();
        prop_assert_eq!(replies, msgs.len() as u64 - 1);
    }

    #[test]
    fn prop_hypernode_members_partition_nodes(msgs in arb_thread()) {
        let g = HypergraphBuilder::new().messages(&msgs).build().unwrap();
        let members: usize = g.hypernodes().map(|h| h.len()).sum();
        prop_assert_eq!(members, g.node_count());
    }

    #[test]
    fn prop_feature_keys_are_stable(msgs in arb_thread()) {
        let feats = HyperConvo::thread_features("m0", &msgs).unwrap();
        prop_assert_eq!(feats.len(), 164);
        let counts = feats.iter()
            .filter(|(k, _)| k.starts_with("count["))
            .all(|(_, v)| v.as_int().is_some_and(|c| c >= 0));
        prop_assert!(counts);
    }
}
