//! Adaptive Huffman code tree.
//!
//! The tree is updated after every symbol so that encoder and decoder, fed the
//! same symbols, always hold identical trees and therefore identical codes. No
//! frequency table is ever transmitted.
//!
//! # Layout
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other through
//! [`NodeId`] handles. A node's `parent` link is a plain back-reference; the
//! parent's `left`/`right` slots are the owning side of the relation.
//!
//! Every node carries an *implicit number*. The root is numbered
//! [`MAX_NUMBER`]; splitting the NYT leaf numbered `n` gives its new children
//! `n - 2` (left, the new NYT) and `n - 1` (right, the new symbol). Swaps
//! exchange numbers together with positions, so after any sequence of updates:
//!
//! - numbers form the contiguous range `nyt.number ..= MAX_NUMBER`,
//! - weights never decrease as numbers increase,
//! - siblings carry consecutive numbers (right = left + 1),
//! - every parent is numbered above its children.
//!
//! # Update
//!
//! For each symbol the walk starts either at the symbol's leaf or, for a new
//! symbol, at the internal node that replaced the old NYT leaf. At each level
//! the node is swapped with the highest-numbered node of equal weight (its
//! block leader) unless that leader is its own parent, then its weight is
//! incremented and the walk moves to its parent.

use crate::error::{Result, VitterError};
use log::trace;
use oxihuff_core::BitSequence;
use std::collections::BTreeMap;

/// Number of distinct symbol values.
pub const ALPHABET_SIZE: usize = 256;

/// Implicit number of the root; two numbers are consumed per new symbol.
pub const MAX_NUMBER: u16 = 2 * ALPHABET_SIZE as u16;

/// Maximum number of nodes a tree can hold (256 leaves, the NYT leaf and
/// 256 internal nodes).
pub const MAX_NODES: usize = 2 * ALPHABET_SIZE + 1;

/// Handle to a node inside an [`AdaptiveCodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a node is a leaf or an internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// A symbol leaf or the NYT leaf.
    Leaf,
    /// A node with two children.
    Internal,
}

/// A node of the code tree.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    symbol: Option<u8>,
    is_nyt: bool,
    weight: u64,
    number: u16,
}

impl Node {
    fn nyt(number: u16, parent: Option<NodeId>) -> Self {
        Self {
            parent,
            left: None,
            right: None,
            symbol: None,
            is_nyt: true,
            weight: 0,
            number,
        }
    }

    fn leaf(symbol: u8, number: u16, parent: NodeId) -> Self {
        Self {
            parent: Some(parent),
            left: None,
            right: None,
            symbol: Some(symbol),
            is_nyt: false,
            weight: 1,
            number,
        }
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Left child (bit 0).
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Right child (bit 1).
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Child reached by `bit`.
    pub fn child(&self, bit: bool) -> Option<NodeId> {
        if bit { self.right } else { self.left }
    }

    /// Symbol carried by a symbol leaf.
    pub fn symbol(&self) -> Option<u8> {
        self.symbol
    }

    /// Whether this is the not-yet-transferred leaf.
    pub fn is_nyt(&self) -> bool {
        self.is_nyt
    }

    /// Occurrence count of the subtree.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Implicit node number.
    pub fn number(&self) -> u16 {
        self.number
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Leaf or internal.
    pub fn kind(&self) -> NodeKind {
        if self.is_leaf() {
            NodeKind::Leaf
        } else {
            NodeKind::Internal
        }
    }
}

/// Outcome of [`AdaptiveCodeTree::insert`], carrying the code that was valid
/// *before* the tree changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// First occurrence: the NYT path, to be followed by the 8-bit literal.
    New {
        /// Path to the NYT leaf before it was split.
        escape: BitSequence,
    },
    /// Repeat occurrence: the symbol's own path.
    Known {
        /// Path to the symbol leaf before rebalancing.
        code: BitSequence,
    },
}

impl Insertion {
    /// Whether the symbol was seen for the first time.
    pub fn was_new(&self) -> bool {
        matches!(self, Insertion::New { .. })
    }

    /// The path emitted for this occurrence (escape or symbol code).
    pub fn code(&self) -> &BitSequence {
        match self {
            Insertion::New { escape } => escape,
            Insertion::Known { code } => code,
        }
    }

    /// Bits this occurrence costs on the wire.
    pub fn cost_bits(&self) -> usize {
        match self {
            Insertion::New { escape } => escape.len() + 8,
            Insertion::Known { code } => code.len(),
        }
    }
}

/// A maximal set of nodes sharing weight and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Common weight.
    pub weight: u64,
    /// Common kind.
    pub kind: NodeKind,
    /// Members, ascending by implicit number.
    pub members: Vec<NodeId>,
}

impl Block {
    /// The highest-numbered member.
    pub fn leader(&self) -> Option<NodeId> {
        self.members.last().copied()
    }
}

/// The one-pass adaptive Huffman code tree.
#[derive(Debug, Clone)]
pub struct AdaptiveCodeTree {
    nodes: Vec<Node>,
    root: NodeId,
    nyt: NodeId,
    /// Implicit number -> node.
    by_number: Vec<Option<NodeId>>,
    /// Symbol -> leaf.
    leaves: [Option<NodeId>; ALPHABET_SIZE],
}

impl AdaptiveCodeTree {
    /// Create a tree whose root is the NYT leaf.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut by_number = vec![None; MAX_NUMBER as usize + 1];
        by_number[MAX_NUMBER as usize] = Some(root);

        let mut nodes = Vec::with_capacity(MAX_NODES);
        nodes.push(Node::nyt(MAX_NUMBER, None));

        Self {
            nodes,
            root,
            nyt: root,
            by_number,
            leaves: [None; ALPHABET_SIZE],
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The current NYT leaf.
    pub fn nyt(&self) -> NodeId {
        self.nyt
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct symbols seen so far.
    pub fn symbol_count(&self) -> usize {
        self.leaves.iter().filter(|leaf| leaf.is_some()).count()
    }

    /// Number of symbols inserted so far (the root weight).
    pub fn total_weight(&self) -> u64 {
        self.nodes[self.root.0].weight
    }

    /// Whether `symbol` already has a leaf.
    pub fn contains(&self, symbol: u8) -> bool {
        self.leaves[symbol as usize].is_some()
    }

    /// The leaf carrying `symbol`, if it has been seen.
    pub fn search_symbol(&self, symbol: u8) -> Option<NodeId> {
        self.leaves[symbol as usize]
    }

    /// The node with implicit number `number`, if any.
    pub fn search_number(&self, number: u16) -> Option<NodeId> {
        self.by_number.get(number as usize).copied().flatten()
    }

    /// In-order traversal (left subtree, node, right subtree).
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: vec![(self.root, Visit::Enter(None))],
            path: BitSequence::new(),
        }
    }

    /// Path from the root to the first node, in walk order, that matches
    /// `predicate`.
    pub fn get_code<F>(&self, mut predicate: F) -> Option<BitSequence>
    where
        F: FnMut(&Node) -> bool,
    {
        let mut walk = self.walk();
        while let Some(id) = walk.next() {
            if predicate(self.node(id)) {
                return Some(walk.path().clone());
            }
        }
        None
    }

    /// Path from the root to `id`, built by climbing parent links.
    pub fn code_of(&self, id: NodeId) -> BitSequence {
        let mut reversed = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            reversed.push(self.nodes[parent.0].right == Some(current));
            current = parent;
        }
        reversed.into_iter().rev().collect()
    }

    /// Current code of `symbol`, if it has been seen.
    pub fn code_for_symbol(&self, symbol: u8) -> Option<BitSequence> {
        self.search_symbol(symbol).map(|leaf| self.code_of(leaf))
    }

    /// Current escape code (path to the NYT leaf).
    pub fn nyt_code(&self) -> BitSequence {
        self.code_of(self.nyt)
    }

    /// Every known symbol with its current code, ascending by symbol.
    pub fn codes(&self) -> Vec<(u8, BitSequence)> {
        self.leaves
            .iter()
            .enumerate()
            .filter_map(|(symbol, leaf)| leaf.map(|id| (symbol as u8, self.code_of(id))))
            .collect()
    }

    /// The highest-numbered node of `entry`'s weight, scanning upward from
    /// `entry` and stopping at the first node of another weight.
    pub fn find_block_leader(&self, entry: NodeId) -> Result<NodeId> {
        let node = &self.nodes[entry.0];
        let mut leader = entry;

        for number in node.number + 1..=MAX_NUMBER {
            let candidate = self.search_number(number).ok_or_else(|| {
                VitterError::invariant(format!("no node carries implicit number {number}"))
            })?;
            if self.nodes[candidate.0].weight != node.weight {
                break;
            }
            leader = candidate;
        }

        Ok(leader)
    }

    /// Record one occurrence of `symbol`.
    ///
    /// Returns the code to emit for it, taken before the tree changed.
    pub fn insert(&mut self, symbol: u8) -> Result<Insertion> {
        let (insertion, mut current) = match self.leaves[symbol as usize] {
            Some(leaf) => {
                let code = self.code_of(leaf);
                trace!("insert: known symbol {symbol:#04x}, code {code}");
                (Insertion::Known { code }, leaf)
            }
            None => {
                let escape = self.nyt_code();
                trace!("insert: new symbol {symbol:#04x}, NYT code {escape}");
                let internal = self.split_nyt(symbol)?;
                (Insertion::New { escape }, internal)
            }
        };

        loop {
            let leader = self.find_block_leader(current)?;
            if leader != current && self.nodes[current.0].parent != Some(leader) {
                trace!(
                    "insert: exchanging #{} with block leader #{}",
                    self.nodes[current.0].number,
                    self.nodes[leader.0].number
                );
                self.swap(current, leader)?;
            }

            self.nodes[current.0].weight += 1;

            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Ok(insertion)
    }

    /// Turn the NYT leaf into an internal node with a fresh NYT (left) and a
    /// weight-1 leaf for `symbol` (right). Returns the new internal node.
    fn split_nyt(&mut self, symbol: u8) -> Result<NodeId> {
        let old = self.nyt;
        let number = self.nodes[old.0].number;
        if number < 2 {
            return Err(VitterError::invariant(format!(
                "implicit numbers exhausted splitting NYT #{number}"
            )));
        }

        let new_nyt = NodeId(self.nodes.len());
        self.nodes.push(Node::nyt(number - 2, Some(old)));
        let leaf = NodeId(self.nodes.len());
        self.nodes.push(Node::leaf(symbol, number - 1, old));

        let internal = &mut self.nodes[old.0];
        internal.is_nyt = false;
        internal.left = Some(new_nyt);
        internal.right = Some(leaf);

        self.by_number[(number - 2) as usize] = Some(new_nyt);
        self.by_number[(number - 1) as usize] = Some(leaf);
        self.leaves[symbol as usize] = Some(leaf);
        self.nyt = new_nyt;

        Ok(old)
    }

    /// Exchange the positions of two non-root nodes, subtrees included.
    ///
    /// Parent slots, parent links and implicit numbers are all exchanged;
    /// weights stay with the nodes.
    fn swap(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        let (parent_a, parent_b) = match (self.nodes[a.0].parent, self.nodes[b.0].parent) {
            (Some(pa), Some(pb)) => (pa, pb),
            _ => return Err(VitterError::invariant("attempted to swap the root")),
        };
        if parent_a == b || parent_b == a {
            return Err(VitterError::invariant(
                "attempted to swap a node with its parent",
            ));
        }

        let a_is_left = self.nodes[parent_a.0].left == Some(a);
        let b_is_left = self.nodes[parent_b.0].left == Some(b);
        self.set_child(parent_a, a_is_left, b);
        self.set_child(parent_b, b_is_left, a);
        self.nodes[a.0].parent = Some(parent_b);
        self.nodes[b.0].parent = Some(parent_a);

        let number_a = self.nodes[a.0].number;
        let number_b = self.nodes[b.0].number;
        self.nodes[a.0].number = number_b;
        self.nodes[b.0].number = number_a;
        self.by_number[number_b as usize] = Some(a);
        self.by_number[number_a as usize] = Some(b);

        Ok(())
    }

    fn set_child(&mut self, parent: NodeId, left: bool, child: NodeId) {
        let node = &mut self.nodes[parent.0];
        if left {
            node.left = Some(child);
        } else {
            node.right = Some(child);
        }
    }

    /// Partition all nodes into blocks of equal weight and kind.
    ///
    /// Blocks are ordered by (weight, kind); members ascend by number.
    pub fn blocks(&self) -> Vec<Block> {
        let mut groups: BTreeMap<(u64, NodeKind), Vec<NodeId>> = BTreeMap::new();
        let lowest = self.nodes[self.nyt.0].number;
        for number in lowest..=MAX_NUMBER {
            if let Some(id) = self.search_number(number) {
                let node = &self.nodes[id.0];
                groups.entry((node.weight, node.kind())).or_default().push(id);
            }
        }

        groups
            .into_iter()
            .map(|((weight, kind), members)| Block {
                weight,
                kind,
                members,
            })
            .collect()
    }

    /// Verify every structural invariant of the tree.
    ///
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let root = &self.nodes[self.root.0];
        if root.parent.is_some() {
            return Err(VitterError::invariant("root has a parent"));
        }
        if root.number != MAX_NUMBER {
            return Err(VitterError::invariant(format!(
                "root numbered {} instead of {MAX_NUMBER}",
                root.number
            )));
        }

        let mut reachable = 0usize;
        let mut nyt_leaves = 0usize;
        for id in self.walk() {
            reachable += 1;
            let node = &self.nodes[id.0];

            if self.search_number(node.number) != Some(id) {
                return Err(VitterError::invariant(format!(
                    "number index disagrees for #{}",
                    node.number
                )));
            }

            match (node.left, node.right) {
                (None, None) => {
                    if node.is_nyt {
                        nyt_leaves += 1;
                        if node.weight != 0 || self.nyt != id {
                            return Err(VitterError::invariant("NYT leaf is inconsistent"));
                        }
                    } else {
                        let symbol = node.symbol.ok_or_else(|| {
                            VitterError::invariant(format!("leaf #{} has no symbol", node.number))
                        })?;
                        if self.leaves[symbol as usize] != Some(id) {
                            return Err(VitterError::invariant(format!(
                                "symbol index disagrees for {symbol:#04x}"
                            )));
                        }
                    }
                }
                (Some(left), Some(right)) => {
                    self.check_children(id, left, right)?;
                }
                _ => {
                    return Err(VitterError::invariant(format!(
                        "internal node #{} has a single child",
                        node.number
                    )));
                }
            }
        }

        if reachable != self.nodes.len() {
            return Err(VitterError::invariant(format!(
                "{} of {} nodes reachable from the root",
                reachable,
                self.nodes.len()
            )));
        }
        if nyt_leaves != 1 {
            return Err(VitterError::invariant(format!(
                "{nyt_leaves} NYT leaves in the tree"
            )));
        }

        // Numbers are contiguous and weights never decrease along them.
        let lowest = self.nodes[self.nyt.0].number;
        if (MAX_NUMBER - lowest) as usize + 1 != self.nodes.len() {
            return Err(VitterError::invariant("implicit numbers are not contiguous"));
        }
        let mut previous = 0u64;
        for number in lowest..=MAX_NUMBER {
            let id = self.search_number(number).ok_or_else(|| {
                VitterError::invariant(format!("no node carries implicit number {number}"))
            })?;
            let weight = self.nodes[id.0].weight;
            if weight < previous {
                return Err(VitterError::invariant(format!(
                    "weight {weight} at #{number} is below weight {previous} at #{}",
                    number - 1
                )));
            }
            previous = weight;
        }

        Ok(())
    }

    fn check_children(&self, id: NodeId, left: NodeId, right: NodeId) -> Result<()> {
        let node = &self.nodes[id.0];
        let (l, r) = (&self.nodes[left.0], &self.nodes[right.0]);

        if l.parent != Some(id) || r.parent != Some(id) {
            return Err(VitterError::invariant(format!(
                "child of #{} links to another parent",
                node.number
            )));
        }
        if node.is_nyt || node.symbol.is_some() {
            return Err(VitterError::invariant(format!(
                "internal node #{} carries leaf data",
                node.number
            )));
        }
        if r.number != l.number + 1 {
            return Err(VitterError::invariant(format!(
                "siblings #{} and #{} are not adjacent",
                l.number, r.number
            )));
        }
        if node.number <= r.number {
            return Err(VitterError::invariant(format!(
                "parent #{} numbered below child #{}",
                node.number, r.number
            )));
        }
        if node.weight != l.weight + r.weight {
            return Err(VitterError::invariant(format!(
                "weight of #{} is {} but children sum to {}",
                node.number,
                node.weight,
                l.weight + r.weight
            )));
        }

        Ok(())
    }
}

impl Default for AdaptiveCodeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Visit {
    /// First arrival; carries the bit of the edge taken, `None` at the root.
    Enter(Option<bool>),
    /// Left subtree done; report the node.
    Yield,
    /// Whole subtree done; drop the node's edge bit.
    Leave,
}

/// In-order traversal over an [`AdaptiveCodeTree`].
///
/// After `next()` returns a node, [`Walk::path`] holds the path from the root
/// to that node.
#[derive(Debug)]
pub struct Walk<'a> {
    tree: &'a AdaptiveCodeTree,
    stack: Vec<(NodeId, Visit)>,
    path: BitSequence,
}

impl Walk<'_> {
    /// Path to the node most recently returned by `next()`.
    pub fn path(&self) -> &BitSequence {
        &self.path
    }
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some((id, visit)) = self.stack.pop() {
            let node = &self.tree.nodes[id.0];
            match visit {
                Visit::Enter(bit) => {
                    if let Some(bit) = bit {
                        self.path.push(bit);
                        self.stack.push((id, Visit::Leave));
                    }
                    self.stack.push((id, Visit::Yield));
                    if let Some(left) = node.left {
                        self.stack.push((left, Visit::Enter(Some(false))));
                    }
                }
                Visit::Yield => {
                    if let Some(right) = node.right {
                        self.stack.push((right, Visit::Enter(Some(true))));
                    }
                    return Some(id);
                }
                Visit::Leave => {
                    self.path.pop();
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_from(data: &[u8]) -> AdaptiveCodeTree {
        let mut tree = AdaptiveCodeTree::new();
        for &symbol in data {
            tree.insert(symbol).unwrap();
            tree.check_invariants().unwrap();
        }
        tree
    }

    fn code(tree: &AdaptiveCodeTree, symbol: u8) -> String {
        tree.code_for_symbol(symbol).unwrap().to_string()
    }

    #[test]
    fn test_new_tree_is_single_nyt_root() {
        let tree = AdaptiveCodeTree::new();
        assert_eq!(tree.root(), tree.nyt());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.node(tree.root()).number(), MAX_NUMBER);
        assert!(tree.nyt_code().is_empty());
        assert_eq!(tree.symbol_count(), 0);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_first_insert_splits_root() {
        let mut tree = AdaptiveCodeTree::new();
        let insertion = tree.insert(b'A').unwrap();

        assert_eq!(
            insertion,
            Insertion::New {
                escape: BitSequence::new()
            }
        );
        assert_eq!(insertion.cost_bits(), 8);

        let root = tree.node(tree.root());
        assert_eq!(root.weight(), 1);
        assert_eq!(root.kind(), NodeKind::Internal);
        assert_eq!(tree.node(tree.nyt()).number(), MAX_NUMBER - 2);
        assert_eq!(code(&tree, b'A'), "1");
        assert_eq!(tree.nyt_code().to_string(), "0");
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_repeated_symbol_codes() {
        let mut tree = AdaptiveCodeTree::new();
        let first = tree.insert(b'A').unwrap();
        let second = tree.insert(b'A').unwrap();
        let third = tree.insert(b'A').unwrap();

        assert!(first.was_new());
        assert_eq!(second.code().to_string(), "1");
        assert_eq!(third.code().to_string(), "1");
        assert!(third.code().len() <= second.code().len());
        assert_eq!(tree.total_weight(), 3);
    }

    #[test]
    fn test_two_symbol_alternation() {
        let tree = tree_from(b"ABAB");

        let a = tree.search_symbol(b'A').unwrap();
        let b = tree.search_symbol(b'B').unwrap();
        assert_eq!(tree.node(a).weight(), 2);
        assert_eq!(tree.node(b).weight(), 2);
        assert_eq!(code(&tree, b'A'), "1");
        assert_eq!(code(&tree, b'B'), "01");
        assert_eq!(tree.nyt_code().to_string(), "00");

        let leaves = tree
            .blocks()
            .into_iter()
            .find(|block| block.weight == 2 && block.kind == NodeKind::Leaf)
            .unwrap();
        assert_eq!(leaves.members, vec![b, a]);
        assert_eq!(leaves.leader(), Some(a));
    }

    #[test]
    fn test_block_leader_scans_equal_weights() {
        let tree = tree_from(b"AB");
        // #509 B(1), #510 internal(1), #511 A(1), #512 root(2)
        let a = tree.search_symbol(b'A').unwrap();
        let b = tree.search_symbol(b'B').unwrap();
        assert_eq!(tree.node(b).number(), MAX_NUMBER - 3);
        assert_eq!(tree.find_block_leader(b).unwrap(), a);
        assert_eq!(tree.find_block_leader(a).unwrap(), a);
        assert_eq!(tree.find_block_leader(tree.root()).unwrap(), tree.root());
    }

    #[test]
    fn test_internal_node_overtakes_equal_leaf() {
        // The third new symbol lifts an internal node past leaf A.
        let tree = tree_from(b"ABC");
        let a = tree.search_symbol(b'A').unwrap();
        assert_eq!(tree.node(a).weight(), 1);
        assert_eq!(code(&tree, b'A'), "0");
        assert_eq!(code(&tree, b'B'), "11");
        assert_eq!(code(&tree, b'C'), "101");
        assert_eq!(tree.nyt_code().to_string(), "100");
    }

    #[test]
    fn test_get_code_matches_code_of() {
        let tree = tree_from(b"abracadabra alakazam");
        let mut walk = tree.walk();
        while let Some(id) = walk.next() {
            assert_eq!(walk.path(), &tree.code_of(id));
        }

        for (symbol, expected) in tree.codes() {
            let found = tree
                .get_code(|node| node.symbol() == Some(symbol))
                .unwrap();
            assert_eq!(found, expected);
        }
        assert_eq!(tree.get_code(Node::is_nyt).unwrap(), tree.nyt_code());
        assert!(tree.get_code(|node| node.weight() > 1000).is_none());
    }

    #[test]
    fn test_walk_is_in_order() {
        let tree = tree_from(b"AB");
        let order: Vec<String> = tree
            .walk()
            .map(|id| tree.code_of(id).to_string())
            .collect();
        assert_eq!(order, vec!["00", "0", "01", "", "1"]);
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let tree = tree_from(b"the quick brown fox jumps over the lazy dog");
        let mut codes: Vec<String> = tree.codes().into_iter().map(|(_, c)| c.to_string()).collect();
        codes.push(tree.nyt_code().to_string());

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_alphabet_exhaustion_keeps_nyt() {
        let all: Vec<u8> = (0..=255).collect();
        let mut tree = tree_from(&all);
        assert_eq!(tree.symbol_count(), ALPHABET_SIZE);
        assert_eq!(tree.node_count(), MAX_NODES);
        assert_eq!(tree.node(tree.nyt()).number(), 0);

        // Every further symbol is known; the NYT leaf is never split again.
        for symbol in [0u8, 255, 128, 0] {
            assert!(!tree.insert(symbol).unwrap().was_new());
            tree.check_invariants().unwrap();
        }
        assert_eq!(tree.node_count(), MAX_NODES);
    }

    #[test]
    fn test_frequent_symbol_gets_short_code() {
        let mut data = vec![b'e'; 40];
        data.extend_from_slice(b"abcdefghij");
        let tree = tree_from(&data);

        let e_len = tree.code_for_symbol(b'e').unwrap().len();
        for symbol in b'a'..=b'j' {
            if symbol != b'e' {
                assert!(tree.code_for_symbol(symbol).unwrap().len() >= e_len);
            }
        }
    }

    #[test]
    fn test_blocks_partition_all_nodes() {
        let tree = tree_from(b"mississippi");
        let blocks = tree.blocks();
        let members: usize = blocks.iter().map(|block| block.members.len()).sum();
        assert_eq!(members, tree.node_count());

        for block in &blocks {
            let leader = block.leader().unwrap();
            for &member in &block.members {
                let node = tree.node(member);
                assert_eq!(node.weight(), block.weight);
                assert_eq!(node.kind(), block.kind);
                assert!(node.number() <= tree.node(leader).number());
            }
        }
    }
}
