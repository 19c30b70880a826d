//! LZW dictionary (code table) management.

use crate::config::{LzwConfig, bit_width};
use crate::error::{LzwError, Result};
use crate::trie::{CodeTrie, Insertion, NodeId};

/// LZW dictionary for encoding and decoding.
///
/// Owns the prefix trie and the per-session counter of the next code to
/// assign.
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Prefix tree of all entries.
    trie: CodeTrie,
    /// Configuration.
    config: LzwConfig,
    /// Next available code.
    next_code: u32,
}

impl Dictionary {
    /// Create a new dictionary holding only the literal alphabet.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            trie: CodeTrie::new(config.alphabet_size),
            config,
            next_code: config.first_code(),
        })
    }

    /// Reset the dictionary to its initial (literal-only) state.
    pub fn reset(&mut self) {
        log::trace!(
            "resetting LZW dictionary at code {} ({} entries)",
            self.next_code,
            self.trie.len()
        );
        self.trie.reset();
        self.next_code = self.config.first_code();
    }

    /// Whether `path` is an entry of the dictionary.
    pub fn contains(&self, path: &[u8]) -> bool {
        self.trie.contains(path)
    }

    /// Insert `path`, assigning it the next code if it is new.
    ///
    /// Returns the code of `path` minus its last symbol (the code LZW
    /// emits for the longest known prefix), or `None` for a single-symbol
    /// path. A full dictionary assigns nothing; the prefix code is still
    /// returned.
    pub fn insert(&mut self, path: &[u8]) -> Result<Option<u16>> {
        if self.is_full() {
            return self.trie.prefix_code(path);
        }
        match self.trie.insert(path, self.next_code as u16)? {
            Insertion::Created { prefix, .. } => {
                self.next_code += 1;
                Ok(prefix)
            }
            Insertion::Existing { prefix } => Ok(prefix),
        }
    }

    /// Byte sequence that `code` stands for, if assigned.
    pub fn reverse_lookup(&self, code: u16) -> Option<Vec<u8>> {
        self.trie.reverse_lookup(code)
    }

    /// Add `symbol` under an existing entry and return the new code.
    pub(crate) fn extend(&mut self, node: NodeId, symbol: u8) -> Option<u16> {
        if self.is_full() {
            return None;
        }
        let code = self.next_code as u16;
        self.trie.add_child(node, symbol, code);
        self.next_code += 1;
        Some(code)
    }

    /// Consume one code without creating an entry.
    ///
    /// Used when the final pending sequence is flushed: the stream behaves
    /// as if one more entry had been added, which keeps the stop code's
    /// width in step with what a decoder expects.
    pub(crate) fn reserve_code(&mut self) {
        if !self.is_full() {
            self.next_code += 1;
        }
    }

    /// Code of an existing trie node.
    pub(crate) fn code_of(&self, node: NodeId) -> Result<u16> {
        self.trie
            .code(node)
            .ok_or(LzwError::InvalidDictionaryPath { len: 0 })
    }

    /// Access the underlying trie.
    pub(crate) fn trie(&self) -> &CodeTrie {
        &self.trie
    }

    /// Check if the dictionary has assigned its maximum code.
    pub fn is_full(&self) -> bool {
        self.next_code > self.config.max_code()
    }

    /// Width of the next code written: `ceil(log2(next_code))`.
    pub fn code_width(&self) -> u8 {
        bit_width(self.next_code).min(self.config.max_bits)
    }

    /// Get the next code that will be assigned.
    pub fn next_code(&self) -> u32 {
        self.next_code
    }

    /// Number of entries, literals included.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Whether the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Get the clear code.
    pub fn clear_code(&self) -> u16 {
        self.config.clear_code()
    }

    /// Get the stop code.
    pub fn stop_code(&self) -> u16 {
        self.config.stop_code()
    }

    /// Get the configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }
}
