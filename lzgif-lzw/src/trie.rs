//! Prefix tree mapping symbol sequences to LZW codes.
//!
//! Nodes live in a single arena and refer to each other by index. The
//! root is synthetic (no symbol, no code); its children are the literal
//! alphabet, so literal `s` always sits at arena slot `1 + s`. Every
//! other node extends its parent's sequence by one symbol.
//!
//! Children are kept sorted by symbol, which gives binary-search lookup
//! and a well-defined insertion position. Resetting truncates the arena
//! back to the literal nodes, so no superseded node outlives a reset.

use crate::error::{LzwError, Result};

/// Index of a node inside the trie arena.
pub(crate) type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct TrieNode {
    /// Symbol this node appends to its parent's sequence.
    symbol: u8,
    /// Assigned code (`None` only for the root).
    code: Option<u16>,
    /// Parent node (`None` only for the root).
    parent: Option<NodeId>,
    /// Child nodes, sorted ascending by symbol.
    children: Vec<NodeId>,
}

impl TrieNode {
    fn new(symbol: u8, code: Option<u16>, parent: Option<NodeId>) -> Self {
        Self {
            symbol,
            code,
            parent,
            children: Vec::new(),
        }
    }
}

/// Outcome of [`CodeTrie::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new node was created and given `code`.
    Created {
        /// Code of the path minus its last symbol (`None` at the root).
        prefix: Option<u16>,
        /// Code assigned to the new node.
        code: u16,
    },
    /// The whole path was already present; nothing changed.
    Existing {
        /// Code of the path minus its last symbol (`None` at the root).
        prefix: Option<u16>,
    },
}

impl Insertion {
    /// Code of the longest known prefix, i.e. the code LZW emits.
    pub fn prefix(&self) -> Option<u16> {
        match *self {
            Insertion::Created { prefix, .. } | Insertion::Existing { prefix } => prefix,
        }
    }
}

/// Arena-backed prefix tree of LZW dictionary entries.
#[derive(Debug, Clone)]
pub struct CodeTrie {
    nodes: Vec<TrieNode>,
    /// Reverse index: code -> node.
    by_code: Vec<Option<NodeId>>,
    alphabet_size: u16,
}

impl CodeTrie {
    /// Create a trie holding only the literal alphabet `0..alphabet_size`.
    ///
    /// `alphabet_size` is clamped to 256, the number of distinct symbols.
    pub fn new(alphabet_size: u16) -> Self {
        let alphabet_size = alphabet_size.min(256);
        let mut trie = Self {
            nodes: Vec::with_capacity(usize::from(alphabet_size) + 1),
            by_code: Vec::with_capacity(usize::from(alphabet_size)),
            alphabet_size,
        };
        trie.rebuild();
        trie
    }

    fn rebuild(&mut self) {
        self.nodes.clear();
        self.by_code.clear();
        self.nodes.push(TrieNode::new(0, None, None));
        for symbol in 0..self.alphabet_size {
            let id = self.nodes.len();
            self.nodes.push(TrieNode::new(symbol as u8, Some(symbol), Some(ROOT)));
            self.nodes[ROOT].children.push(id);
            self.by_code.push(Some(id));
        }
    }

    /// Drop every non-literal node.
    pub fn reset(&mut self) {
        let literals = usize::from(self.alphabet_size);
        if self.nodes[ROOT].children.len() != literals {
            // A literal-length path outside the alphabet was inserted.
            self.rebuild();
            return;
        }
        self.nodes.truncate(literals + 1);
        for node in &mut self.nodes[1..] {
            node.children.clear();
        }
        self.by_code.truncate(literals);
    }

    /// Number of literal symbols.
    pub fn alphabet_size(&self) -> u16 {
        self.alphabet_size
    }

    /// Number of coded entries (literals included).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Whether the trie holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Node of a literal symbol, if it belongs to the alphabet.
    pub(crate) fn literal(&self, symbol: u8) -> Option<NodeId> {
        (u16::from(symbol) < self.alphabet_size).then_some(usize::from(symbol) + 1)
    }

    /// Child of `node` reached by `symbol`.
    pub(crate) fn child(&self, node: NodeId, symbol: u8) -> Option<NodeId> {
        let children = &self.nodes[node].children;
        children
            .binary_search_by_key(&symbol, |&id| self.nodes[id].symbol)
            .ok()
            .map(|pos| children[pos])
    }

    /// Code assigned to `node`.
    pub(crate) fn code(&self, node: NodeId) -> Option<u16> {
        self.nodes[node].code
    }

    /// Append a child for `symbol` under `parent`, keeping children sorted.
    pub(crate) fn add_child(&mut self, parent: NodeId, symbol: u8, code: u16) -> NodeId {
        let id = self.nodes.len();
        let pos = {
            let nodes = &self.nodes;
            nodes[parent]
                .children
                .partition_point(|&child| nodes[child].symbol < symbol)
        };
        self.nodes.push(TrieNode::new(symbol, Some(code), Some(parent)));
        self.nodes[parent].children.insert(pos, id);

        let slot = usize::from(code);
        if self.by_code.len() <= slot {
            self.by_code.resize(slot + 1, None);
        }
        self.by_code[slot] = Some(id);
        id
    }

    /// Walk `path` from the root.
    pub(crate) fn find(&self, path: &[u8]) -> Option<NodeId> {
        if path.is_empty() {
            return None;
        }
        path.iter()
            .try_fold(ROOT, |node, &symbol| self.child(node, symbol))
    }

    /// Whether every symbol of `path` matches a child at each level.
    ///
    /// The empty path is never contained.
    pub fn contains(&self, path: &[u8]) -> bool {
        self.find(path).is_some()
    }

    /// Node that `path` minus its last symbol leads to.
    fn parent_of(&self, path: &[u8]) -> Result<(NodeId, u8)> {
        let Some((&last, prefix)) = path.split_last() else {
            return Err(LzwError::InvalidDictionaryPath { len: 0 });
        };
        let parent = if prefix.is_empty() {
            ROOT
        } else {
            self.find(prefix)
                .ok_or(LzwError::InvalidDictionaryPath { len: path.len() })?
        };
        Ok((parent, last))
    }

    /// Code of `path` minus its last symbol, without modifying the trie.
    pub fn prefix_code(&self, path: &[u8]) -> Result<Option<u16>> {
        let (parent, _) = self.parent_of(path)?;
        Ok(self.code(parent))
    }

    /// Insert `path`, giving a newly created node `code`.
    ///
    /// Only the last symbol may be new: inserting a path whose prefix is
    /// unknown fails with [`LzwError::InvalidDictionaryPath`] and leaves
    /// the trie untouched.
    pub fn insert(&mut self, path: &[u8], code: u16) -> Result<Insertion> {
        let (parent, last) = self.parent_of(path)?;
        let prefix = self.code(parent);
        if self.child(parent, last).is_some() {
            return Ok(Insertion::Existing { prefix });
        }
        self.add_child(parent, last, code);
        Ok(Insertion::Created { prefix, code })
    }

    /// Reconstruct the sequence that `code` stands for.
    ///
    /// Returns `None` for codes that are not assigned.
    pub fn reverse_lookup(&self, code: u16) -> Option<Vec<u8>> {
        let mut node = (*self.by_code.get(usize::from(code))?)?;
        let mut sequence = Vec::new();
        while node != ROOT {
            let entry = &self.nodes[node];
            sequence.push(entry.symbol);
            node = entry.parent?;
        }
        sequence.reverse();
        Some(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        let trie = CodeTrie::new(4);
        assert_eq!(trie.len(), 4);
        for symbol in 0..4u8 {
            assert!(trie.contains(&[symbol]));
            assert_eq!(trie.reverse_lookup(u16::from(symbol)), Some(vec![symbol]));
        }
        assert!(!trie.contains(&[4]));
        assert!(!trie.contains(&[]));
        assert_eq!(trie.literal(4), None);
    }

    #[test]
    fn test_insert_returns_prefix_code() {
        let mut trie = CodeTrie::new(4);
        let outcome = trie.insert(&[1, 2], 7).unwrap();
        assert_eq!(outcome, Insertion::Created { prefix: Some(1), code: 7 });
        assert!(trie.contains(&[1, 2]));

        // Inserting the same path again changes nothing.
        let outcome = trie.insert(&[1, 2], 8).unwrap();
        assert_eq!(outcome, Insertion::Existing { prefix: Some(1) });
        assert_eq!(trie.len(), 5);

        let outcome = trie.insert(&[1, 2, 3], 8).unwrap();
        assert_eq!(outcome.prefix(), Some(7));
        assert_eq!(trie.reverse_lookup(8), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_insert_unknown_prefix_fails() {
        let mut trie = CodeTrie::new(4);
        let err = trie.insert(&[1, 2, 3], 7).unwrap_err();
        assert!(matches!(err, LzwError::InvalidDictionaryPath { len: 3 }));
        assert_eq!(trie.len(), 4);
        assert!(trie.insert(&[], 7).is_err());
    }

    #[test]
    fn test_children_stay_sorted() {
        let mut trie = CodeTrie::new(8);
        trie.insert(&[0, 5], 10).unwrap();
        trie.insert(&[0, 1], 11).unwrap();
        trie.insert(&[0, 7], 12).unwrap();
        trie.insert(&[0, 3], 13).unwrap();

        let root_child = trie.literal(0).unwrap();
        let symbols: Vec<u8> = trie.nodes[root_child]
            .children
            .iter()
            .map(|&id| trie.nodes[id].symbol)
            .collect();
        assert_eq!(symbols, vec![1, 3, 5, 7]);

        for (symbol, code) in [(5, 10), (1, 11), (7, 12), (3, 13)] {
            let node = trie.child(root_child, symbol).unwrap();
            assert_eq!(trie.code(node), Some(code));
        }
    }

    #[test]
    fn test_reverse_lookup_unassigned() {
        let mut trie = CodeTrie::new(4);
        assert_eq!(trie.reverse_lookup(4), None);
        assert_eq!(trie.reverse_lookup(100), None);
        trie.insert(&[2, 2], 7).unwrap();
        assert_eq!(trie.reverse_lookup(6), None);
        assert_eq!(trie.reverse_lookup(7), Some(vec![2, 2]));
    }

    #[test]
    fn test_reset_drops_entries() {
        let mut trie = CodeTrie::new(4);
        trie.insert(&[0, 1], 7).unwrap();
        trie.insert(&[0, 1, 2], 8).unwrap();
        trie.reset();

        assert_eq!(trie.len(), 4);
        assert!(!trie.contains(&[0, 1]));
        assert_eq!(trie.reverse_lookup(7), None);
        assert_eq!(trie.reverse_lookup(8), None);
        assert_eq!(trie.reverse_lookup(3), Some(vec![3]));
    }

    #[test]
    fn test_single_symbol_outside_alphabet() {
        let mut trie = CodeTrie::new(2);
        let outcome = trie.insert(&[9], 5).unwrap();
        assert_eq!(outcome, Insertion::Created { prefix: None, code: 5 });
        assert!(trie.contains(&[9]));

        trie.reset();
        assert!(!trie.contains(&[9]));
        assert!(trie.contains(&[1]));
    }
}
