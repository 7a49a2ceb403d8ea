//! Hypernode — a participant vertex owning the messages they authored.

use hashbrown::HashSet;

use super::{PropertyMap, Value, VertexId};

/// A participant vertex.
///
/// `members` keeps first-occurrence order so motif enumeration is
/// reproducible; `member_set` answers membership in O(1).
#[derive(Debug, Clone, PartialEq)]
pub struct Hypernode {
    pub id: VertexId,
    members: Vec<VertexId>,
    member_set: HashSet<VertexId>,
    /// Participant-level metadata (not message-level).
    pub metadata: PropertyMap,
}

impl Hypernode {
    /// Duplicate member ids collapse.
    pub fn new<I, M>(id: impl Into<VertexId>, members: I, metadata: PropertyMap) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<VertexId>,
    {
        let mut ordered = Vec::new();
        let mut member_set = HashSet::new();
        for m in members {
            let m = m.into();
            if member_set.insert(m.clone()) {
                ordered.push(m);
            }
        }
        Self {
            id: id.into(),
            members: ordered,
            member_set,
            metadata,
        }
    }

    pub fn members(&self) -> &[VertexId] {
        &self.members
    }

    pub fn contains(&self, node: &str) -> bool {
        self.member_set.contains(node)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_collapse_and_keep_order() {
        let h = Hypernode::new("alice", ["m3", "m1", "m3", "m2", "m1"], PropertyMap::new());
        let ids: Vec<&str> = h.members().iter().map(|m| m.as_str()).collect();
        assert_eq!(ids, vec!["m3", "m1", "m2"]);
        assert_eq!(h.len(), 3);
        assert!(h.contains("m2"));
        assert!(!h.contains("m4"));
    }
}
