//! The prefix-compressed trie: a store of NFD-normalized strings keyed
//! edge-by-edge on single Unicode scalar values.

use crate::case;
use crate::trie_node::Node;

/// A prefix-compressed trie over Unicode scalar values.
///
/// Every stored word is NFD-normalized on the way in; [`Trie::contains`]
/// and [`Trie::words`] normalize their queries the same way, so callers
/// never need to normalize by hand.
#[derive(Debug, Clone, Default)]
pub struct Trie {
    pub(crate) root: Node,
}

impl Trie {
    /// Returns a new, empty trie.
    pub fn new() -> Self {
        Trie { root: Node::Empty }
    }

    /// Inserts `word`, NFD-normalizing it first. A word already present
    /// (after normalization) is a no-op.
    pub fn insert(&mut self, word: &str) {
        let normalized = case::normalize(word);
        self.root.insert(&normalized);
    }

    /// Removes `word` (matched after NFD normalization), collapsing the
    /// trie per Invariants 2 and 3. A no-op if the word isn't present.
    pub fn remove(&mut self, word: &str) {
        let normalized = case::normalize(word);
        self.root.remove(&normalized);
    }

    /// Exact containment check: equivalent to running the matcher with
    /// `max_errors = 0`.
    pub fn contains(&self, word: &str) -> bool {
        let normalized = case::normalize(word);
        crate::matcher::matches(&self.root, &normalized, 0, crate::matcher::Mode::Exact)
            .next()
            .is_some()
    }

    /// True iff the trie holds no words at all.
    pub fn is_empty(&self) -> bool {
        matches!(self.root, Node::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_contains() {
        let mut trie = Trie::new();
        trie.insert("hello");
        assert!(trie.contains("hello"));
        assert!(!trie.contains("help"));
    }

    #[test]
    fn insert_then_remove_round_trips_to_empty() {
        let mut trie = Trie::new();
        trie.insert("hello");
        trie.remove("hello");
        assert!(trie.is_empty());
        assert!(!trie.contains("hello"));
    }

    #[test]
    fn nfc_and_nfd_forms_of_the_same_word_both_match() {
        let mut trie = Trie::new();
        trie.insert("caf\u{e9}"); // NFC: e + combining acute as one scalar
        assert!(trie.contains("cafe\u{301}")); // NFD: e, then combining acute
    }
}
