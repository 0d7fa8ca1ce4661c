//! Generic prefix trie keying values by Unicode text.
//!
//! Backs the word dictionary: O(key chars) exact lookup plus enumeration of
//! every value whose key starts with a given prefix. Enumeration order is
//! consistent for an unmodified trie but otherwise unspecified.

use ahash::AHashMap;

#[derive(Debug, Clone)]
struct Node<V> {
    children: AHashMap<char, Box<Node<V>>>,
    value: Option<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            children: AHashMap::new(),
            value: None,
        }
    }

    /// Walk down the child chain for `key`, if it exists.
    fn descend(&self, key: &str) -> Option<&Node<V>> {
        let mut node = self;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

/// A prefix tree mapping string keys to values of type `V`.
///
/// Inserting under an existing key overwrites the previous value; absent
/// keys yield `None`, never an error. There is no per-key removal, only
/// [`clear`](PrefixTrie::clear).
///
/// # Example
/// ```
/// use libkorean_lexicon::trie::PrefixTrie;
///
/// let mut trie = PrefixTrie::new();
/// trie.insert("강남", 1);
/// trie.insert("강남역", 2);
///
/// assert_eq!(trie.get("강남"), Some(&1));
/// assert_eq!(trie.get("강"), None);
/// assert_eq!(trie.prefixed_by("강").count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PrefixTrie<V> {
    root: Node<V>,
    len: usize,
}

impl<V> Default for PrefixTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> PrefixTrie<V> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            root: Node::new(),
            len: 0,
        }
    }

    /// Insert `value` under `key`, returning the previous value stored for
    /// exactly that key.
    pub fn insert<K: AsRef<str>>(&mut self, key: K, value: V) -> Option<V> {
        let mut node = &mut self.root;
        for ch in key.as_ref().chars() {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(Node::new()));
        }
        let old = node.value.replace(value);
        if old.is_none() {
            self.len += 1;
        }
        old
    }

    /// Exact lookup.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.root.descend(key)?.value.as_ref()
    }

    /// Lazily enumerate every value whose key starts with `prefix`.
    ///
    /// The empty prefix enumerates the whole trie. The iterator borrows the
    /// trie; do not interleave it with `insert`/`clear`.
    pub fn prefixed_by<'a>(&'a self, prefix: &str) -> PrefixedBy<'a, V> {
        PrefixedBy {
            stack: match self.root.descend(prefix) {
                Some(node) => vec![node],
                None => Vec::new(),
            },
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.root = Node::new();
        self.len = 0;
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Iterator over the values in a prefix subtree, depth-first.
#[derive(Debug)]
pub struct PrefixedBy<'a, V> {
    stack: Vec<&'a Node<V>>,
}

impl<'a, V> Iterator for PrefixedBy<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack
                .extend(node.children.values().map(|child| child.as_ref()));
            if let Some(value) = node.value.as_ref() {
                return Some(value);
            }
        }
        None
    }
}
