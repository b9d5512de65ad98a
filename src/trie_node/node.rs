use arrayvec::ArrayString;
use fxhash::FxHashMap;

/// A single node of the prefix-compressed trie.
///
/// `Leaf("")` is the EOS sentinel: a distinguished, empty-value leaf
/// meaning "a word terminates exactly here." It carries no heap storage
/// and needs no special teardown, so there is no separate fourth variant
/// or shared-singleton pointer -- see `SPEC_FULL.md` section 3.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum Node {
    #[default]
    Empty,
    Leaf(String),
    Branch(FxHashMap<ArrayString<4>, Node>),
}

/// Encodes a single Unicode scalar value as its trie edge key. A scalar
/// is at most 4 UTF-8 bytes, so `ArrayString<4>` never allocates.
pub(crate) fn array_key(c: char) -> ArrayString<4> {
    let mut buf = [0u8; 4];
    ArrayString::from(c.encode_utf8(&mut buf)).unwrap()
}

/// Splits `word` into its first scalar's key (the empty key if `word` is
/// empty) and the remaining tail.
fn head_and_tail(word: &str) -> (ArrayString<4>, String) {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => (array_key(c), chars.collect()),
        None => (ArrayString::new(), String::new()),
    }
}

impl Node {
    /// Inserts `word` (already NFD-normalized by the caller) under this
    /// node, reshaping `Empty`/`Leaf`/`Branch` per the trie's
    /// shape-changing insertion rules.
    pub(crate) fn insert(&mut self, word: &str) {
        match self {
            Node::Empty => *self = Node::Leaf(word.to_string()),
            Node::Leaf(existing) if existing == word => {}
            Node::Leaf(_) => {
                let existing = match std::mem::replace(self, Node::Branch(Default::default())) {
                    Node::Leaf(v) => v,
                    _ => unreachable!(),
                };
                self.insert_branch_child(&existing);
                self.insert_branch_child(word);
            }
            Node::Branch(_) => self.insert_branch_child(word),
        }
    }

    /// Requires `self` to already be `Node::Branch`. Routes `word` to the
    /// child keyed by its first scalar (or the empty key, for the EOS
    /// marker), recursing generically so a pre-existing `Leaf` child is
    /// promoted the same way the root would be.
    fn insert_branch_child(&mut self, word: &str) {
        let Node::Branch(children) = self else {
            unreachable!("insert_branch_child called on a non-Branch node")
        };
        let (key, tail) = head_and_tail(word);
        children.entry(key).or_default().insert(&tail);
    }

    /// Removes `word` (already NFD-normalized) from under this node,
    /// applying the collapse rule (Invariant 2) and the
    /// delete-if-valueless rule (Invariant 3) as the recursion unwinds.
    pub(crate) fn remove(&mut self, word: &str) {
        match self {
            Node::Empty => {}
            Node::Leaf(existing) => {
                if existing == word {
                    *self = Node::Empty;
                }
            }
            Node::Branch(children) => {
                let (key, tail) = head_and_tail(word);
                if let Some(child) = children.get_mut(&key) {
                    child.remove(&tail);
                    if matches!(child, Node::Empty) {
                        children.remove(&key);
                    }
                }
                self.collapse();
            }
        }
    }

    /// Applies Invariant 2 (collapse a one-Leaf-child Branch into a
    /// Leaf) and Invariant 3 (a childless, valueless Branch becomes
    /// Empty so the caller can drop it from its own parent).
    fn collapse(&mut self) {
        let Node::Branch(children) = self else {
            return;
        };

        if children.is_empty() {
            *self = Node::Empty;
            return;
        }

        if children.len() == 1 {
            let is_leaf = matches!(children.values().next(), Some(Node::Leaf(_)));
            if is_leaf {
                let (key, child) = children.drain().next().expect("checked len == 1 above");
                let Node::Leaf(suffix) = child else {
                    unreachable!("checked is_leaf above")
                };
                *self = Node::Leaf(format!("{key}{suffix}"));
            }
        }
    }
}
