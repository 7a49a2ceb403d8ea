//! In-memory multigraph.
//!
//! Vertices are interned into a dense arena; adjacency is kept per vertex in
//! both directions as an insertion-ordered map (a `Vec` of slots plus a
//! hash index into it). Everything downstream (degree vectors, argmax
//! statistics, motif enumeration order) relies on that ordering:
//!
//! - vertices of a tier iterate in insertion order
//! - neighbors of a vertex iterate in the order their first edge was added
//! - parallel edge instances iterate in insertion order
//!
//! A graph is built once per thread and dropped after its statistics are
//! taken, so there is no removal API.

use hashbrown::HashMap;

use crate::model::*;
use crate::{Error, Result};
use super::{Edge, EdgeId, Neighbor, Tier};

// ============================================================================
// Vertex arena
// ============================================================================

#[derive(Debug, Clone)]
enum Vertex {
    Node(Node),
    Hypernode(Hypernode),
}

impl Vertex {
    fn id(&self) -> &VertexId {
        match self {
            Vertex::Node(n) => &n.id,
            Vertex::Hypernode(h) => &h.id,
        }
    }

    fn tier(&self) -> Tier {
        match self {
            Vertex::Node(_) => Tier::Node,
            Vertex::Hypernode(_) => Tier::Hypernode,
        }
    }
}

/// Insertion-ordered neighbor → edge instances map.
#[derive(Debug, Clone, Default)]
pub(crate) struct Adjacency {
    slots: Vec<(usize, Vec<EdgeId>)>,
    index: HashMap<usize, usize>,
}

impl Adjacency {
    fn push(&mut self, neighbor: usize, edge: EdgeId) {
        let slot = match self.index.get(&neighbor) {
            Some(&slot) => slot,
            None => {
                let slot = self.slots.len();
                self.slots.push((neighbor, Vec::new()));
                self.index.insert(neighbor, slot);
                slot
            }
        };
        self.slots[slot].1.push(edge);
    }

    pub(crate) fn get(&self, neighbor: usize) -> Option<&[EdgeId]> {
        self.index.get(&neighbor).map(|&slot| self.slots[slot].1.as_slice())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &[EdgeId])> {
        self.slots.iter().map(|(n, edges)| (*n, edges.as_slice()))
    }
}

// ============================================================================
// Multigraph
// ============================================================================

/// Directed multigraph over message Nodes and participant Hypernodes.
#[derive(Debug, Clone, Default)]
pub struct Multigraph {
    vertices: Vec<Vertex>,
    lookup: HashMap<VertexId, usize>,
    /// Arena positions of each tier, in insertion order.
    node_order: Vec<usize>,
    hypernode_order: Vec<usize>,
    out_adj: Vec<Adjacency>,
    in_adj: Vec<Adjacency>,
    edges: Vec<Edge>,
}

impl Multigraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Insert a message vertex. Fails if the id is already taken by a
    /// Node or a Hypernode.
    pub fn add_node(&mut self, id: impl Into<VertexId>, metadata: PropertyMap) -> Result<()> {
        let node = Node::new(id).with_metadata(metadata);
        let idx = self.insert_vertex(Vertex::Node(node))?;
        self.node_order.push(idx);
        Ok(())
    }

    /// Insert a participant vertex owning `members`. Duplicate members collapse.
    pub fn add_hypernode<I, M>(
        &mut self,
        id: impl Into<VertexId>,
        members: I,
        metadata: PropertyMap,
    ) -> Result<()>
    where
        I: IntoIterator<Item = M>,
        M: Into<VertexId>,
    {
        let hypernode = Hypernode::new(id, members, metadata);
        let idx = self.insert_vertex(Vertex::Hypernode(hypernode))?;
        self.hypernode_order.push(idx);
        Ok(())
    }

    fn insert_vertex(&mut self, vertex: Vertex) -> Result<usize> {
        if self.lookup.contains_key(vertex.id()) {
            return Err(Error::DuplicateVertex(vertex.id().to_string()));
        }
        let idx = self.vertices.len();
        self.lookup.insert(vertex.id().clone(), idx);
        self.vertices.push(vertex);
        self.out_adj.push(Adjacency::default());
        self.in_adj.push(Adjacency::default());
        Ok(idx)
    }

    /// Append one edge instance `src -> dst`.
    ///
    /// Both endpoints must already exist. An edge between two Hypernodes
    /// must carry a non-empty payload. A rejected edge leaves the graph
    /// untouched.
    pub fn add_edge(&mut self, src: &str, dst: &str, payload: Option<PropertyMap>) -> Result<EdgeId> {
        let s = self.index_of(src)
            .ok_or_else(|| Error::NotFound(format!("Source vertex {src}")))?;
        let d = self.index_of(dst)
            .ok_or_else(|| Error::NotFound(format!("Target vertex {dst}")))?;

        let payload = payload.unwrap_or_default();
        if self.vertices[s].tier() == Tier::Hypernode
            && self.vertices[d].tier() == Tier::Hypernode
            && payload.is_empty()
        {
            return Err(Error::ConstraintViolation(format!(
                "Hypernode edge {src} -> {dst} requires a non-empty payload"
            )));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            id,
            src: self.vertices[s].id().clone(),
            dst: self.vertices[d].id().clone(),
            payload,
        });
        self.out_adj[s].push(d, id);
        self.in_adj[d].push(s, id);
        Ok(id)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn tier_of(&self, id: &str) -> Option<Tier> {
        self.index_of(id).map(|idx| self.vertices[idx].tier())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        match self.index_of(id).map(|idx| &self.vertices[idx]) {
            Some(Vertex::Node(n)) => Some(n),
            _ => None,
        }
    }

    pub fn hypernode(&self, id: &str) -> Option<&Hypernode> {
        match self.index_of(id).map(|idx| &self.vertices[idx]) {
            Some(Vertex::Hypernode(h)) => Some(h),
            _ => None,
        }
    }

    /// Message vertices in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|&idx| match &self.vertices[idx] {
            Vertex::Node(n) => Some(n),
            Vertex::Hypernode(_) => None,
        })
    }

    /// Participant vertices in insertion order.
    pub fn hypernodes(&self) -> impl Iterator<Item = &Hypernode> {
        self.hypernode_order.iter().filter_map(|&idx| match &self.vertices[idx] {
            Vertex::Hypernode(h) => Some(h),
            Vertex::Node(_) => None,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn hypernode_count(&self) -> usize {
        self.hypernode_order.len()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// All edge instances in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ========================================================================
    // Neighborhood
    // ========================================================================

    /// Out-neighbors of `vertex` restricted to `tier`, with their edge instances.
    pub fn outgoing(&self, vertex: &str, tier: Tier) -> Result<Vec<Neighbor<'_>>> {
        let idx = self.index_of(vertex)
            .ok_or_else(|| Error::NotFound(format!("Vertex {vertex}")))?;
        Ok(self.neighbors(&self.out_adj[idx], tier))
    }

    /// In-neighbors of `vertex` restricted to `tier`, with their edge instances.
    pub fn incoming(&self, vertex: &str, tier: Tier) -> Result<Vec<Neighbor<'_>>> {
        let idx = self.index_of(vertex)
            .ok_or_else(|| Error::NotFound(format!("Vertex {vertex}")))?;
        Ok(self.neighbors(&self.in_adj[idx], tier))
    }

    fn neighbors<'g>(&'g self, adj: &'g Adjacency, tier: Tier) -> Vec<Neighbor<'g>> {
        adj.iter()
            .filter(|(n, _)| self.vertices[*n].tier() == tier)
            .map(|(n, edges)| Neighbor { id: self.vertices[n].id(), edges })
            .collect()
    }

    // ========================================================================
    // Degrees
    // ========================================================================

    /// For every vertex of `src_tier` (insertion order), the number of edge
    /// instances it sends to vertices of `dst_tier`.
    pub fn out_degrees(&self, src_tier: Tier, dst_tier: Tier) -> Vec<u64> {
        self.tier_order(src_tier)
            .iter()
            .map(|&u| self.degree(&self.out_adj[u], dst_tier))
            .collect()
    }

    /// For every vertex of `dst_tier` (insertion order), the number of edge
    /// instances it receives from vertices of `src_tier`.
    pub fn in_degrees(&self, src_tier: Tier, dst_tier: Tier) -> Vec<u64> {
        self.tier_order(dst_tier)
            .iter()
            .map(|&v| self.degree(&self.in_adj[v], src_tier))
            .collect()
    }

    fn degree(&self, adj: &Adjacency, tier: Tier) -> u64 {
        adj.iter()
            .filter(|(n, _)| self.vertices[*n].tier() == tier)
            .map(|(_, edges)| edges.len() as u64)
            .sum()
    }

    // ========================================================================
    // Arena access for the motif enumerator
    // ========================================================================

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub(crate) fn tier_order(&self, tier: Tier) -> &[usize] {
        match tier {
            Tier::Node => &self.node_order,
            Tier::Hypernode => &self.hypernode_order,
        }
    }

    pub(crate) fn tier_at(&self, idx: usize) -> Tier {
        self.vertices[idx].tier()
    }

    pub(crate) fn id_at(&self, idx: usize) -> &VertexId {
        self.vertices[idx].id()
    }

    pub(crate) fn hypernode_at(&self, idx: usize) -> Option<&Hypernode> {
        match &self.vertices[idx] {
            Vertex::Hypernode(h) => Some(h),
            Vertex::Node(_) => None,
        }
    }

    pub(crate) fn out_adj(&self, idx: usize) -> &Adjacency {
        &self.out_adj[idx]
    }

    pub(crate) fn in_adj(&self, idx: usize) -> &Adjacency {
        &self.in_adj[idx]
    }
}

// ============================================================================
// Tests
// ============================================================================
