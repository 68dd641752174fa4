use core::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::{
    coder::{CodingError, PrefixCoder, Result, Symbol},
    frequency::FrequencyTable,
    schema::{Coding, CodingSchema, Codeword, SchemaEntry},
};

#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl PrefixCoder for HuffmanCoding {
    fn build_from_table<S: Symbol>(&self, table: &FrequencyTable<S>) -> Result<Coding<S>> {
        let tree = CodeTree::build(table)?;
        Ok(tree.coding())
    }
}

/// Index of a node inside a [`CodeTree`] arena.
///
/// Leaves take the first ids in ascending symbol order, internal nodes follow in creation
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct NodeId(usize);

#[derive(Debug, Clone)]
enum TreeNode<S> {
    Leaf { priority: u64, symbol: S },
    Internal { priority: u64, left: NodeId, right: NodeId },
}

impl<S> TreeNode<S> {
    fn priority(&self) -> u64 {
        match self {
            TreeNode::Leaf { priority, .. } => *priority,
            TreeNode::Internal { priority, .. } => *priority,
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }
}

/// Merge queue entry.
///
/// Ordered by ascending priority; on a tie internal nodes come before leaves, leaves are
/// ordered by symbol and internal nodes by creation. Both of the last two fall out of the id
/// layout, so the ordering never depends on how the heap stores equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapNode {
    priority: u64,
    is_leaf: bool,
    id: NodeId,
}

impl HeapNode {
    fn of<S>(id: NodeId, node: &TreeNode<S>) -> Self {
        Self {
            priority: node.priority(),
            is_leaf: node.is_leaf(),
            id,
        }
    }
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.is_leaf.cmp(&other.is_leaf))
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary merge tree built bottom-up from a frequency table.
///
/// Nodes live in an arena; internal nodes refer to their children by index. The tree is
/// strictly binary unless it is a single leaf.
#[derive(Debug, Clone)]
pub struct CodeTree<S> {
    nodes: Vec<TreeNode<S>>,
    root: NodeId,
}

impl<S: Symbol> CodeTree<S> {
    /// Builds the merge tree for `table`.
    ///
    /// # Errors
    ///
    /// Returns [`CodingError::EmptyInput`] if the table is empty.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all, fields(symbols = table.len())))]
    pub fn build(table: &FrequencyTable<S>) -> Result<Self> {
        if table.is_empty() {
            if_tracing! {{
                tracing::warn!(target: "huffman", "huffman build rejected: input empty");
            }}
            return Err(CodingError::EmptyInput);
        }

        let mut nodes = Vec::with_capacity(2 * table.len() - 1);
        nodes.extend(table.iter().map(|(symbol, count)| TreeNode::Leaf {
            priority: count,
            symbol: symbol.clone(),
        }));

        let mut heap: BinaryHeap<Reverse<HeapNode>> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| Reverse(HeapNode::of(NodeId(i), node)))
            .collect();

        // priorities never overflow: the table total fits in a u64 and bounds every merge
        let root = loop {
            match (heap.pop(), heap.pop()) {
                (Some(Reverse(left)), Some(Reverse(right))) => {
                    let id = NodeId(nodes.len());
                    let merged = TreeNode::Internal {
                        priority: left.priority + right.priority,
                        left: left.id,
                        right: right.id,
                    };
                    heap.push(Reverse(HeapNode::of(id, &merged)));
                    nodes.push(merged);
                }
                (Some(Reverse(last)), None) => break last.id,
                (None, _) => return Err(CodingError::EmptyInput),
            }
        };

        if_tracing! {{
            tracing::debug!(target: "huffman", nodes = nodes.len(), root_priority = nodes[root.0].priority(), "huffman tree built");
        }}

        Ok(Self { nodes, root })
    }

    /// Total weight of the tree, equal to the sum of all counts.
    pub fn root_priority(&self) -> u64 {
        self.nodes[self.root.0].priority()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id.0] {
                TreeNode::Leaf { .. } => deepest = deepest.max(depth),
                TreeNode::Internal { left, right, .. } => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        deepest
    }

    /// Number of leaves, i.e. distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Assigns codewords by walking the tree: left edges add `0`, right edges add `1`.
    ///
    /// Entries come out in in-order position (left subtree, leaf, right subtree), which for a
    /// binary tree means left to right across the leaves.
    pub fn code_assignment(&self) -> Vec<SchemaEntry<S>> {
        let mut entries = Vec::with_capacity(self.leaf_count());
        let mut stack = vec![(self.root, Codeword::new())];

        while let Some((id, prefix)) = stack.pop() {
            match &self.nodes[id.0] {
                TreeNode::Leaf { priority, symbol } => {
                    if_tracing! {{
                        tracing::trace!(target: "huffman", symbol = ?symbol, codeword = %prefix, "codeword assigned");
                    }}
                    entries.push(SchemaEntry {
                        symbol: symbol.clone(),
                        count: *priority,
                        codeword: prefix,
                    });
                }
                TreeNode::Internal { left, right, .. } => {
                    // right is pushed first so the left subtree is emitted first
                    stack.push((*right, prefix.with(true)));
                    stack.push((*left, prefix.with(false)));
                }
            }
        }

        entries
    }

    /// Turns the tree into a [`Coding`], separating out the single-leaf tree.
    pub fn coding(&self) -> Coding<S> {
        match &self.nodes[self.root.0] {
            TreeNode::Leaf { priority, symbol } => {
                if_tracing! {{
                    tracing::info!(target: "huffman", symbol = ?symbol, count = *priority, "single-symbol alphabet, no proper prefix code");
                }}
                Coding::SingleSymbol {
                    symbol: symbol.clone(),
                    count: *priority,
                }
            }
            TreeNode::Internal { .. } => Coding::Prefix {
                schema: CodingSchema::from_entries(self.code_assignment()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(input: &str) -> Vec<(char, u64, String)> {
        let table = FrequencyTable::from_symbols(input.chars());
        let tree = CodeTree::build(&table).unwrap();
        tree.code_assignment()
            .into_iter()
            .map(|e| (e.symbol, e.count, e.codeword.to_string()))
            .collect()
    }

    #[test]
    fn all_tied_frequencies_give_balanced_reference_tree() {
        // a+b merge first, c+d second, the older internal node becomes the left child
        assert_eq!(
            codes("abcd"),
            vec![
                ('a', 1, "00".to_string()),
                ('b', 1, "01".to_string()),
                ('c', 1, "10".to_string()),
                ('d', 1, "11".to_string()),
            ]
        );
    }

    #[test]
    fn internal_node_wins_tie_against_leaf() {
        // e+h -> (2); then o(1) pairs with the internal (2) ahead of leaf l(2)
        assert_eq!(
            codes("hello"),
            vec![
                ('l', 2, "0".to_string()),
                ('o', 1, "10".to_string()),
                ('e', 1, "110".to_string()),
                ('h', 1, "111".to_string()),
            ]
        );
    }

    #[test]
    fn heap_order_breaks_ties_in_declared_order() {
        let leaf_a = HeapNode { priority: 2, is_leaf: true, id: NodeId(0) };
        let leaf_b = HeapNode { priority: 2, is_leaf: true, id: NodeId(1) };
        let old = HeapNode { priority: 2, is_leaf: false, id: NodeId(4) };
        let new = HeapNode { priority: 2, is_leaf: false, id: NodeId(5) };
        let light = HeapNode { priority: 1, is_leaf: true, id: NodeId(3) };

        let mut heap: BinaryHeap<Reverse<HeapNode>> = [leaf_b, new, leaf_a, light, old].into_iter().map(Reverse).collect();
        let popped: Vec<HeapNode> = core::iter::from_fn(|| heap.pop().map(|Reverse(n)| n)).collect();
        assert_eq!(popped, vec![light, old, new, leaf_a, leaf_b]);
    }

    #[test]
    fn skewed_counts_give_a_chain() {
        let table = FrequencyTable::from_counts([('a', 1), ('b', 2), ('c', 4), ('d', 8), ('e', 16)]).unwrap();
        let tree = CodeTree::build(&table).unwrap();
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.root_priority(), 31);
        assert_eq!(tree.leaf_count(), 5);

        let schema = tree.coding().into_schema().unwrap();
        assert_eq!(schema.codeword(&'e').map(Codeword::len), Some(1));
        assert_eq!(schema.codeword(&'a').map(Codeword::len), Some(4));
        assert_eq!(schema.codeword(&'b').map(Codeword::len), Some(4));
        assert!(schema.is_prefix_free());
    }

    #[test]
    fn single_leaf_tree_is_reported() {
        let table = FrequencyTable::from_symbols("aaaa".chars());
        let tree = CodeTree::build(&table).unwrap();
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.coding(), Coding::SingleSymbol { symbol: 'a', count: 4 });
    }

    #[test]
    fn empty_table_is_rejected() {
        let table = FrequencyTable::<char>::from_symbols(core::iter::empty());
        assert_eq!(CodeTree::build(&table).unwrap_err(), CodingError::EmptyInput);
    }

    #[test]
    fn counts_summing_to_u64_max_merge_without_overflow() {
        let table = FrequencyTable::from_counts([('a', u64::MAX - 2), ('b', 1), ('c', 1)]).unwrap();
        let tree = CodeTree::build(&table).unwrap();
        assert_eq!(tree.root_priority(), u64::MAX);
        assert_eq!(tree.depth(), 2);

        let schema = tree.coding().into_schema().unwrap();
        assert_eq!(schema.codeword(&'a').map(Codeword::as_str), Some("1"));
        assert_eq!(schema.codeword(&'b').map(Codeword::as_str), Some("00"));
        assert_eq!(schema.codeword(&'c').map(Codeword::as_str), Some("01"));
    }

    #[test]
    fn deep_tree_does_not_recurse() {
        // fibonacci weights make the deepest possible tree
        let mut weights = vec![1u64, 1];
        while weights.len() < 80 {
            let n = weights.len();
            weights.push(weights[n - 1] + weights[n - 2]);
        }
        let table = FrequencyTable::from_counts(weights.iter().enumerate().map(|(i, &w)| (i, w))).unwrap();
        let tree = CodeTree::build(&table).unwrap();
        assert_eq!(tree.depth(), 79);
        assert!(tree.coding().into_schema().unwrap().is_prefix_free());
    }
}
