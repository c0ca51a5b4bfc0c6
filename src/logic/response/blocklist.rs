//! Blocked-identity registry
//!
//! Ordered, duplicate-free list of names flagged by a detection context.
//! The owning context inserts; everyone else only gets copies.

use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug, Clone, Default)]
pub struct BlockList {
    names: Arc<RwLock<Vec<String>>>,
}

impl BlockList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` unless already present. Returns true when newly added.
    pub fn block(&self, name: &str) -> bool {
        let mut names = self.names.write();
        if names.iter().any(|n| n == name) {
            return false;
        }
        names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.read().iter().any(|n| n == name)
    }

    /// Copy of the list in insertion order
    pub fn list(&self) -> Vec<String> {
        self.names.read().clone()
    }

    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}
