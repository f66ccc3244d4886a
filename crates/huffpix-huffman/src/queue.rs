//! Priority queue of pending tree nodes.
//!
//! Kept as a sorted vector ascending by `(frequency, symbol)`. With at most
//! 256 live nodes the linear insert is cheap, and the explicit symbol
//! tie-break makes the dequeue order identical across builds.

use std::cmp::Ordering;

use huffpix_core::{Error, Result, ALPHABET_SIZE};

use crate::tree::TreeNode;

/// A subtree waiting to be merged.
#[derive(Debug)]
pub struct PendingNode {
    /// The subtree itself.
    pub node: TreeNode,
    /// Aggregate frequency of the subtree.
    pub frequency: u64,
    /// Tie-break key; for merged nodes, the smallest symbol they cover.
    pub symbol: u8,
}

impl PendingNode {
    /// Ordering key.
    #[inline]
    pub fn key(&self) -> (u64, u8) {
        (self.frequency, self.symbol)
    }
}

impl PartialEq for PendingNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PendingNode {}

impl PartialOrd for PendingNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Sorted scratch queue used during tree construction.
#[derive(Debug, Default)]
pub struct PriorityQueue {
    pending: Vec<PendingNode>,
}

impl PriorityQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue with room for `capacity` nodes.
    ///
    /// Fails with [`Error::AllocationFailed`] if the reservation cannot be made.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut pending = Vec::new();
        pending.try_reserve_exact(capacity).map_err(|_| {
            Error::allocation_failed(capacity.saturating_mul(std::mem::size_of::<PendingNode>()))
        })?;
        Ok(Self { pending })
    }

    /// Queue sized for a full byte alphabet.
    pub fn for_alphabet() -> Result<Self> {
        Self::with_capacity(ALPHABET_SIZE)
    }

    /// Insert a node, keeping the queue sorted by `(frequency, symbol)`.
    ///
    /// A node whose key equals an existing one is placed after it.
    pub fn insert(&mut self, node: TreeNode, frequency: u64, symbol: u8) {
        let pending = PendingNode {
            node,
            frequency,
            symbol,
        };
        let pos = self.pending.partition_point(|p| p <= &pending);
        self.pending.insert(pos, pending);
    }

    /// Remove and return the lowest-priority node, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<PendingNode> {
        if self.pending.is_empty() {
            return None;
        }
        Some(self.pending.remove(0))
    }

    #[cfg(test)]
    fn peek(&self) -> Option<&PendingNode> {
        self.pending.first()
    }

    /// Number of pending nodes.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True when no nodes are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
