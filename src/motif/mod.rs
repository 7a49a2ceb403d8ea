//! # Motif Enumeration
//!
//! Five small interaction patterns over a built `Multigraph`
//! (`C` = Hypernode, `c` = Node):
//!
//! | Motif | Shape | Instance tuple |
//! |-------|-------|----------------|
//! | reciprocity | `C1 ∋ c1`, `c2 -> c1`, `C1 -> c2` | `(C1, c1, c2; C1->c2, c2->c1)` |
//! | external reciprocity | `C3 -> c2`, `c2 -> c1`, `c1 ∉ C3` | `(C3, c2, c1; C3->c2, c2->c1)` |
//! | dyadic interaction | `C1 -> C2`, `C2 -> C1` | `(C1, C2; C1->C2, C2->C1)` |
//! | incoming triad | `C2 -> C1`, `C3 -> C1` | `(C1, C2, C3; C2->C1, C3->C1)` |
//! | outgoing triad | `C1 -> C2`, `C1 -> C3` | `(C1, C2, C3; C1->C2, C1->C3)` |
//!
//! One instance is emitted per combination of parallel edge instances.
//! Enumeration walks vertices and neighbors in insertion order, so output
//! order is reproducible; only counts carry meaning downstream.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::model::VertexId;
use crate::storage::{EdgeId, Multigraph, Tier};

// ============================================================================
// Motif kinds and instances
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotifKind {
    Reciprocity,
    ExternalReciprocity,
    DyadicInteraction,
    IncomingTriad,
    OutgoingTriad,
}

impl MotifKind {
    pub const ALL: [MotifKind; 5] = [
        MotifKind::Reciprocity,
        MotifKind::ExternalReciprocity,
        MotifKind::DyadicInteraction,
        MotifKind::IncomingTriad,
        MotifKind::OutgoingTriad,
    ];

    /// Name used in feature keys.
    pub fn label(self) -> &'static str {
        match self {
            MotifKind::Reciprocity => "reciprocity motif",
            MotifKind::ExternalReciprocity => "external reciprocity motif",
            MotifKind::DyadicInteraction => "dyadic interaction motif",
            MotifKind::IncomingTriad => "incoming triads",
            MotifKind::OutgoingTriad => "outgoing triads",
        }
    }
}

impl std::fmt::Display for MotifKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One occurrence of a motif: participating vertices in the tuple order of
/// the table above, and the two edge instances that form it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifInstance<'g> {
    pub kind: MotifKind,
    pub vertices: SmallVec<[&'g VertexId; 3]>,
    pub edges: [EdgeId; 2],
}

/// Unordered pairs of a slice, choose-2 in slice order.
fn pairs<'a, T: Copy + 'a>(items: &'a [T]) -> impl Iterator<Item = (T, T)> + 'a {
    items.iter().enumerate().flat_map(move |(i, &a)| items[i + 1..].iter().map(move |&b| (a, b)))
}

// ============================================================================
// Enumerators
// ============================================================================

impl Multigraph {
    /// Dispatch to the enumerator for `kind`.
    pub fn motifs(&self, kind: MotifKind) -> Vec<MotifInstance<'_>> {
        match kind {
            MotifKind::Reciprocity => self.reciprocity_motifs(),
            MotifKind::ExternalReciprocity => self.external_reciprocity_motifs(),
            MotifKind::DyadicInteraction => self.dyadic_interaction_motifs(),
            MotifKind::IncomingTriad => self.incoming_triad_motifs(),
            MotifKind::OutgoingTriad => self.outgoing_triad_motifs(),
        }
    }

    /// `(C1, c1, c2; C1->c2, c2->c1)`: a message `c2` replies to one of
    /// `C1`'s messages and `C1` responds to `c2`.
    pub fn reciprocity_motifs(&self) -> Vec<MotifInstance<'_>> {
        let mut motifs = Vec::new();
        for &h in self.tier_order(Tier::Hypernode) {
            let Some(hypernode) = self.hypernode_at(h) else { continue };
            for member in hypernode.members() {
                let Some(c1) = self.index_of(member.as_str()) else { continue };
                if self.tier_at(c1) != Tier::Node {
                    continue;
                }
                for (c2, back) in self.in_adj(c1).iter() {
                    if self.tier_at(c2) != Tier::Node {
                        continue;
                    }
                    let Some(forward) = self.out_adj(h).get(c2) else { continue };
                    for &e1 in forward {
                        for &e2 in back {
                            motifs.push(MotifInstance {
                                kind: MotifKind::Reciprocity,
                                vertices: SmallVec::from_slice(&[
                                    self.id_at(h), self.id_at(c1), self.id_at(c2),
                                ]),
                                edges: [e1, e2],
                            });
                        }
                    }
                }
            }
        }
        motifs
    }

    /// `(C3, c2, c1; C3->c2, c2->c1)`: `C3` responds to `c2`, which itself
    /// replies to a message `c1` that `C3` did not write.
    pub fn external_reciprocity_motifs(&self) -> Vec<MotifInstance<'_>> {
        let mut motifs = Vec::new();
        for &h in self.tier_order(Tier::Hypernode) {
            let Some(hypernode) = self.hypernode_at(h) else { continue };
            for (c2, forward) in self.out_adj(h).iter() {
                if self.tier_at(c2) != Tier::Node {
                    continue;
                }
                for (c1, back) in self.out_adj(c2).iter() {
                    if self.tier_at(c1) != Tier::Node || hypernode.contains(self.id_at(c1).as_str()) {
                        continue;
                    }
                    for &e1 in forward {
                        for &e2 in back {
                            motifs.push(MotifInstance {
                                kind: MotifKind::ExternalReciprocity,
                                vertices: SmallVec::from_slice(&[
                                    self.id_at(h), self.id_at(c2), self.id_at(c1),
                                ]),
                                edges: [e1, e2],
                            });
                        }
                    }
                }
            }
        }
        motifs
    }

    /// `(C1, C2; C1->C2, C2->C1)`. Each reciprocating pair is seen from both
    /// ends, so a single exchange yields two instances.
    pub fn dyadic_interaction_motifs(&self) -> Vec<MotifInstance<'_>> {
        let mut motifs = Vec::new();
        for &h1 in self.tier_order(Tier::Hypernode) {
            for (h2, forward) in self.out_adj(h1).iter() {
                if self.tier_at(h2) != Tier::Hypernode {
                    continue;
                }
                let Some(back) = self.out_adj(h2).get(h1) else { continue };
                for &e1 in forward {
                    for &e2 in back {
                        motifs.push(MotifInstance {
                            kind: MotifKind::DyadicInteraction,
                            vertices: SmallVec::from_slice(&[self.id_at(h1), self.id_at(h2)]),
                            edges: [e1, e2],
                        });
                    }
                }
            }
        }
        motifs
    }

    /// `(C1, C2, C3; C2->C1, C3->C1)` for every unordered pair of
    /// participants responding to `C1`.
    pub fn incoming_triad_motifs(&self) -> Vec<MotifInstance<'_>> {
        let mut motifs = Vec::new();
        for &h in self.tier_order(Tier::Hypernode) {
            let incoming: Vec<(usize, &[EdgeId])> = self.in_adj(h).iter()
                .filter(|(n, _)| self.tier_at(*n) == Tier::Hypernode)
                .collect();
            for ((h2, edges2), (h3, edges3)) in pairs(&incoming) {
                for &e1 in edges2 {
                    for &e2 in edges3 {
                        motifs.push(MotifInstance {
                            kind: MotifKind::IncomingTriad,
                            vertices: SmallVec::from_slice(&[
                                self.id_at(h), self.id_at(h2), self.id_at(h3),
                            ]),
                            edges: [e1, e2],
                        });
                    }
                }
            }
        }
        motifs
    }

    /// `(C1, C2, C3; C1->C2, C1->C3)` for every unordered pair of
    /// participants `C1` responds to.
    pub fn outgoing_triad_motifs(&self) -> Vec<MotifInstance<'_>> {
        let mut motifs = Vec::new();
        for &h in self.tier_order(Tier::Hypernode) {
            let outgoing: Vec<(usize, &[EdgeId])> = self.out_adj(h).iter()
                .filter(|(n, _)| self.tier_at(*n) == Tier::Hypernode)
                .collect();
            for ((h2, edges2), (h3, edges3)) in pairs(&outgoing) {
                for &e1 in edges2 {
                    for &e2 in edges3 {
                        motifs.push(MotifInstance {
                            kind: MotifKind::OutgoingTriad,
                            vertices: SmallVec::from_slice(&[
                                self.id_at(h), self.id_at(h2), self.id_at(h3),
                            ]),
                            edges: [e1, e2],
                        });
                    }
                }
            }
        }
        motifs
    }
}

// ============================================================================
// Tests
// ============================================================================
