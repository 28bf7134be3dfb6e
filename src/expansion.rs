use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifier of an expandable node. Curriculum-node IDs (small integers)
/// and video IDs (opaque strings) live in deliberately disjoint namespaces
/// so they can never collide in one set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeKey {
    Section(u32),
    Video(String),
}

/// The set of currently expanded nodes. Presence means expanded; everything
/// starts collapsed.
///
/// No cascading: collapsing a parent does not clear descendant state, so
/// re-expanding the parent restores the prior picture.
#[derive(Debug, Clone, Default)]
pub struct ExpansionSet {
    expanded: HashSet<NodeKey>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the key's membership; returns the new expanded state.
    pub fn toggle(&mut self, key: NodeKey) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn is_expanded(&self, key: &NodeKey) -> bool {
        self.expanded.contains(key)
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
