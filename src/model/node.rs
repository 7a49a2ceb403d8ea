//! Node (message vertex) and the identity shared by both vertex tiers.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use super::{PropertyMap, Value};

/// Opaque vertex identifier.
///
/// Messages and participants live in one namespace: a message id and a
/// speaker id that collide are the same vertex as far as the graph cares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub String);

impl VertexId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for VertexId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VertexId {
    fn from(s: &str) -> Self { VertexId(s.to_owned()) }
}

impl From<String> for VertexId {
    fn from(s: String) -> Self { VertexId(s) }
}

impl From<&String> for VertexId {
    fn from(s: &String) -> Self { VertexId(s.clone()) }
}

/// A message vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: VertexId,
    /// Full attribute set of the source message.
    pub metadata: PropertyMap,
}

impl Node {
    pub fn new(id: impl Into<VertexId>) -> Self {
        Self {
            id: id.into(),
            metadata: PropertyMap::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: PropertyMap) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}
