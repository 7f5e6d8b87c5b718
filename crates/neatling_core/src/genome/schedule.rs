//! Work queue driving the activation sweep.
//!
//! Highest priority leaves first; among equal priorities the entry that has waited
//! longest leaves first. Re-queueing a node that is already waiting moves it: its
//! old entry is dropped and it takes the new priority and a fresh place in line.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Priority of seed nodes (inputs and bias).
pub const SEED_PRIORITY: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    priority: i64,
    seq: u64,
    node: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Stable max-priority queue of node arena indices, holding each node at most once.
#[derive(Debug, Clone, Default)]
pub struct ActivationQueue {
    heap: BinaryHeap<Entry>,
    /// Live `(priority, seq)` of every waiting node; heap entries that disagree are stale.
    waiting: Vec<Option<(i64, u64)>>,
    next_seq: u64,
    floor: i64,
    pushes: usize,
}

impl ActivationQueue {
    #[must_use]
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(node_count),
            waiting: vec![None; node_count],
            next_seq: 0,
            floor: SEED_PRIORITY,
            pushes: 0,
        }
    }

    /// Queues `node` at `priority`, replacing any entry it already has.
    pub fn put(&mut self, node: usize, priority: i64) {
        if node >= self.waiting.len() {
            self.waiting.resize(node + 1, None);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.waiting[node] = Some((priority, seq));
        self.heap.push(Entry {
            priority,
            seq,
            node,
        });
        self.floor = self.floor.min(priority);
        self.pushes += 1;
    }

    /// Queues a seed node at [`SEED_PRIORITY`].
    pub fn put_seed(&mut self, node: usize) {
        self.put(node, SEED_PRIORITY);
    }

    /// Queues `node` below everything that is, or ever was, waiting.
    pub fn put_after_pending(&mut self, node: usize) {
        let priority = self.floor - 1;
        self.put(node, priority);
    }

    /// Removes and returns the highest-priority, longest-waiting node.
    pub fn pop(&mut self) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            if self.waiting[entry.node] == Some((entry.priority, entry.seq)) {
                self.waiting[entry.node] = None;
                return Some(entry.node);
            }
        }
        None
    }

    #[cfg(test)]
    #[must_use]
    pub fn contains(&self, node: usize) -> bool {
        self.waiting.get(node).is_some_and(Option::is_some)
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.waiting.iter().any(Option::is_some)
    }

    /// Total number of `put` calls since creation.
    #[must_use]
    pub fn pushes(&self) -> usize {
        self.pushes
    }
}
