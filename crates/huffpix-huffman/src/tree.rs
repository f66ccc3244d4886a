//! Huffman tree construction.
//!
//! Leaves are seeded from the frequency table, then the two lowest-priority
//! nodes are merged repeatedly until one root remains. The first node
//! dequeued becomes the left child, the second the right child.
//!
//! Children are exclusively owned, so dropping the tree releases every node
//! in post-order.

use tracing::debug;

use huffpix_core::Result;

use crate::histogram::FrequencyTable;
use crate::queue::PriorityQueue;

/// A node of a strict binary Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A single symbol.
    Leaf { symbol: u8, frequency: u64 },
    /// Two merged subtrees; `frequency` is the sum of both children.
    Internal {
        frequency: u64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// Create a leaf.
    pub fn leaf(symbol: u8, frequency: u64) -> Self {
        TreeNode::Leaf { symbol, frequency }
    }

    /// Merge two subtrees under a new internal node.
    pub fn internal(left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Aggregate frequency of this subtree.
    #[inline]
    pub fn frequency(&self) -> u64 {
        match self {
            TreeNode::Leaf { frequency, .. } | TreeNode::Internal { frequency, .. } => *frequency,
        }
    }

    /// Symbol held by a leaf.
    #[inline]
    pub fn symbol(&self) -> Option<u8> {
        match self {
            TreeNode::Leaf { symbol, .. } => Some(*symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Follow one edge: `false` goes left, `true` goes right.
    ///
    /// Returns `None` on a leaf.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&TreeNode> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { left, right, .. } => Some(if bit { &**right } else { &**left }),
        }
    }
}

/// A finished Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: TreeNode,
    leaf_count: usize,
}

impl HuffmanTree {
    /// Build a tree from a frequency table.
    ///
    /// Returns `Ok(None)` when no symbol has a non-zero count. A table with a
    /// single present symbol yields a bare leaf root.
    pub fn build(frequencies: &FrequencyTable) -> Result<Option<Self>> {
        if frequencies.is_empty() {
            debug!("Empty frequency table, no tree built");
            return Ok(None);
        }

        let mut queue = PriorityQueue::with_capacity(frequencies.distinct_symbols())?;
        for (symbol, count) in frequencies.iter_present() {
            queue.insert(TreeNode::leaf(symbol, count as u64), count as u64, symbol);
        }

        Ok(Self::from_queue(queue))
    }

    /// Drain a queue of pending nodes into a single tree.
    ///
    /// The queue may have been filled in any order.
    pub fn from_queue(mut queue: PriorityQueue) -> Option<Self> {
        while queue.len() > 1 {
            let (first, second) = match (queue.dequeue(), queue.dequeue()) {
                (Some(a), Some(b)) => (a, b),
                _ => unreachable!("queue holds at least two nodes"),
            };
            let symbol = first.symbol.min(second.symbol);
            let merged = TreeNode::internal(first.node, second.node);
            let frequency = merged.frequency();
            queue.insert(merged, frequency, symbol);
        }

        let root = queue.dequeue()?.node;
        let leaf_count = count_leaves(&root);

        debug!(
            leaves = leaf_count,
            root_frequency = root.frequency(),
            degenerate = root.is_leaf(),
            "Built Huffman tree"
        );

        Some(Self { root, leaf_count })
    }

    /// Root node.
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Total frequency (number of symbols the tree was built for).
    pub fn frequency(&self) -> u64 {
        self.root.frequency()
    }

    /// Number of leaves, one per distinct symbol.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// True when the root is a single leaf.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                TreeNode::Leaf { .. } => max_depth = max_depth.max(depth),
                TreeNode::Internal { left, right, .. } => {
                    stack.push((&**left, depth + 1));
                    stack.push((&**right, depth + 1));
                }
            }
        }
        max_depth
    }
}

fn count_leaves(root: &TreeNode) -> usize {
    let mut count = 0;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node {
            TreeNode::Leaf { .. } => count += 1,
            TreeNode::Internal { left, right, .. } => {
                stack.push(&**left);
                stack.push(&**right);
            }
        }
    }
    count
}
