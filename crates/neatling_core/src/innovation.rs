//! Run-wide ledger of structural history.
//!
//! Every connection ever created in a run is keyed by its endpoint ids. The first
//! creation of an edge fixes its innovation number; any later creation of the same
//! edge, in any genome, reuses it. The ledger also remembers which hidden node id a
//! split of each edge produced, so independent genomes that split the same edge grow
//! the same node.

use crate::error::{NeatError, Result};
use neatling_data::{EdgeKey, Innovation, NodeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Lookup-or-assign access to innovation history.
///
/// Mutation code is generic over this trait so that it runs unchanged against an
/// exclusively owned registry or a lock-protected shared one.
pub trait InnovationLedger {
    /// Innovation number of `edge`, assigning the next free number on first sight.
    fn lookup_or_assign(&mut self, edge: EdgeKey) -> Innovation;

    /// Id for the hidden node produced by splitting `edge`.
    ///
    /// Reuses the id recorded for an earlier split of the same edge unless `taken`
    /// reports it as already present in the caller's genome. Fresh ids are never
    /// below `floor`.
    fn split_node_id(&mut self, edge: EdgeKey, floor: NodeId, taken: &dyn Fn(NodeId) -> bool)
        -> NodeId;
}

/// Append-only innovation and split-node history for one evolutionary run.
#[derive(Debug, Clone, Default)]
pub struct InnovationRegistry {
    innovations: HashMap<EdgeKey, Innovation>,
    next_innovation: Innovation,
    splits: HashMap<EdgeKey, NodeId>,
    next_node_id: NodeId,
}

impl InnovationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Innovation already recorded for `edge`, if any.
    #[must_use]
    pub fn get(&self, edge: EdgeKey) -> Option<Innovation> {
        self.innovations.get(&edge).copied()
    }

    /// Number that the next unseen edge will receive.
    #[must_use]
    pub fn next_innovation(&self) -> Innovation {
        self.next_innovation
    }

    /// Count of distinct edges recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.innovations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.innovations.is_empty()
    }

    /// Hidden node id recorded for the first split of `edge`.
    #[must_use]
    pub fn split_of(&self, edge: EdgeKey) -> Option<NodeId> {
        self.splits.get(&edge).copied()
    }

    /// Confirms that `found` is the number this registry holds for `edge`.
    pub fn verify(&self, edge: EdgeKey, found: Innovation) -> Result<()> {
        match self.get(edge) {
            Some(recorded) if recorded == found => Ok(()),
            recorded => Err(NeatError::RegistryInconsistency {
                edge,
                recorded,
                found,
            }),
        }
    }
}

impl InnovationLedger for InnovationRegistry {
    fn lookup_or_assign(&mut self, edge: EdgeKey) -> Innovation {
        if let Some(&innovation) = self.innovations.get(&edge) {
            return innovation;
        }
        let innovation = self.next_innovation;
        self.next_innovation += 1;
        self.innovations.insert(edge, innovation);
        tracing::trace!(edge = %edge, innovation, "New innovation");
        innovation
    }

    fn split_node_id(
        &mut self,
        edge: EdgeKey,
        floor: NodeId,
        taken: &dyn Fn(NodeId) -> bool,
    ) -> NodeId {
        if let Some(&id) = self.splits.get(&edge) {
            if !taken(id) {
                return id;
            }
        }

        self.next_node_id = self.next_node_id.max(floor);
        let id = loop {
            let candidate = self.next_node_id;
            self.next_node_id += 1;
            if !taken(candidate) {
                break candidate;
            }
        };
        self.splits.entry(edge).or_insert(id);
        tracing::trace!(edge = %edge, node = id, "New split node");
        id
    }
}

/// Cloneable handle to one registry, serialising every lookup-or-assign behind a mutex.
///
/// Use this when genomes of the same run are mutated from several threads.
#[derive(Debug, Clone, Default)]
pub struct SharedInnovationRegistry(Arc<Mutex<InnovationRegistry>>);

impl SharedInnovationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current registry state.
    #[must_use]
    pub fn snapshot(&self) -> InnovationRegistry {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InnovationRegistry> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl From<InnovationRegistry> for SharedInnovationRegistry {
    fn from(registry: InnovationRegistry) -> Self {
        Self(Arc::new(Mutex::new(registry)))
    }
}

impl InnovationLedger for SharedInnovationRegistry {
    fn lookup_or_assign(&mut self, edge: EdgeKey) -> Innovation {
        self.lock().lookup_or_assign(edge)
    }

    fn split_node_id(
        &mut self,
        edge: EdgeKey,
        floor: NodeId,
        taken: &dyn Fn(NodeId) -> bool,
    ) -> NodeId {
        self.lock().split_node_id(edge, floor, taken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_edge_same_innovation() {
        let mut registry = InnovationRegistry::new();
        let a = registry.lookup_or_assign(EdgeKey::new(0, 4));
        let b = registry.lookup_or_assign(EdgeKey::new(1, 4));
        let again = registry.lookup_or_assign(EdgeKey::new(0, 4));

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(again, a);
        assert_eq!(registry.next_innovation(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_direction_matters() {
        let mut registry = InnovationRegistry::new();
        let forward = registry.lookup_or_assign(EdgeKey::new(2, 3));
        let backward = registry.lookup_or_assign(EdgeKey::new(3, 2));
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_verify_detects_mismatch() {
        let mut registry = InnovationRegistry::new();
        let edge = EdgeKey::new(0, 1);
        let innovation = registry.lookup_or_assign(edge);

        assert!(registry.verify(edge, innovation).is_ok());
        assert_eq!(
            registry.verify(edge, innovation + 1),
            Err(NeatError::RegistryInconsistency {
                edge,
                recorded: Some(innovation),
                found: innovation + 1,
            })
        );
        assert!(registry.verify(EdgeKey::new(5, 6), 0).is_err());
    }

    #[test]
    fn test_split_node_reused_across_callers() {
        let mut registry = InnovationRegistry::new();
        let edge = EdgeKey::new(0, 3);

        let first = registry.split_node_id(edge, 4, &|_| false);
        let second = registry.split_node_id(edge, 4, &|_| false);
        assert_eq!(first, 4);
        assert_eq!(first, second);
        assert_eq!(registry.split_of(edge), Some(first));
    }

    #[test]
    fn test_split_node_fresh_when_taken() {
        let mut registry = InnovationRegistry::new();
        let edge = EdgeKey::new(0, 3);

        let first = registry.split_node_id(edge, 4, &|_| false);
        let resplit = registry.split_node_id(edge, 4, &|id| id == first);
        assert_ne!(first, resplit);
        assert_eq!(registry.split_of(edge), Some(first));
    }

    #[test]
    fn test_split_node_respects_floor() {
        let mut registry = InnovationRegistry::new();
        let id = registry.split_node_id(EdgeKey::new(0, 1), 10, &|_| false);
        assert_eq!(id, 10);
        let next = registry.split_node_id(EdgeKey::new(0, 2), 3, &|_| false);
        assert_eq!(next, 11);
    }

    #[test]
    fn test_shared_registry_handles_share_state() {
        let shared = SharedInnovationRegistry::new();
        let mut a = shared.clone();
        let mut b = shared.clone();

        let from_a = a.lookup_or_assign(EdgeKey::new(0, 2));
        let from_b = b.lookup_or_assign(EdgeKey::new(0, 2));
        assert_eq!(from_a, from_b);
        assert_eq!(shared.snapshot().len(), 1);
    }
}
