//! Sequence-keyed prefix tree.
//!
//! All three compiled lookup structures (rule trie, forward trie, reverse
//! trie) are instances of [`Trie`], differing only in key and value types:
//! token sequences for rules, `char` sequences for spellings and glyphs.
//!
//! Nodes live in a flat arena and refer to their children by index
//! ([`NodeId`]). A traversal is therefore just a `NodeId` the caller advances
//! with [`Trie::child`]; it can be held across calls, copied, or rewound
//! without borrowing the trie mutably — which is exactly what an incremental
//! runtime engine needs when it backtracks over partial input.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Index of a node in the trie arena. The root is always `0`.
pub type NodeId = usize;

#[derive(Debug, Clone)]
struct Node<K, V> {
    children: HashMap<K, NodeId>,
    value: Option<V>,
}

impl<K, V> Node<K, V> {
    fn new() -> Self {
        Node { children: HashMap::new(), value: None }
    }
}

/// Prefix tree keyed by ordered sequences of `K`, with one optional value per
/// node. Interior nodes without a value are valid; they exist to extend
/// longer paths.
#[derive(Debug, Clone)]
pub struct Trie<K, V> {
    nodes: Vec<Node<K, V>>,
}

impl<K: Eq + Hash, V> Trie<K, V> {
    pub fn new() -> Self {
        Trie { nodes: vec![Node::new()] }
    }

    /// The node representing the empty key sequence.
    pub fn root(&self) -> NodeId {
        0
    }

    /// Child of `node` along `key`, if any inserted path extends it.
    pub fn child(&self, node: NodeId, key: &K) -> Option<NodeId> {
        self.nodes[node].children.get(key).copied()
    }

    /// Value stored at `node`, if the node terminates an inserted path.
    pub fn value(&self, node: NodeId) -> Option<&V> {
        self.nodes[node].value.as_ref()
    }

    /// Walk `path` from the root and return the value at its end.
    pub fn get<I>(&self, path: I) -> Option<&V>
    where
        I: IntoIterator,
        I::Item: Borrow<K>,
    {
        let mut node = self.root();
        for key in path {
            node = self.child(node, key.borrow())?;
        }
        self.value(node)
    }

    /// Insert `value` at `path`, returning the displaced value when the path
    /// already held one (last write wins).
    pub fn insert<I>(&mut self, path: I, value: V) -> Option<V>
    where
        I: IntoIterator<Item = K>,
    {
        let node = self.extend_path(path);
        self.nodes[node].value.replace(value)
    }

    /// Mutable access to the value slot at `path`, creating it with `default`
    /// on first touch. Used to grow list-valued entries in place.
    pub fn get_or_insert_with<I, F>(&mut self, path: I, default: F) -> &mut V
    where
        I: IntoIterator<Item = K>,
        F: FnOnce() -> V,
    {
        let node = self.extend_path(path);
        self.nodes[node].value.get_or_insert_with(default)
    }

    /// Number of arena nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn extend_path<I>(&mut self, path: I) -> NodeId
    where
        I: IntoIterator<Item = K>,
    {
        let mut node = self.root();
        for key in path {
            node = if let Some(&next) = self.nodes[node].children.get(&key) {
                next
            } else {
                let next = self.nodes.len();
                self.nodes.push(Node::new());
                self.nodes[node].children.insert(key, next);
                next
            };
        }
        node
    }
}

impl<K: Eq + Hash, V> Default for Trie<K, V> {
    fn default() -> Self {
        Trie::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut trie: Trie<char, u32> = Trie::new();
        assert_eq!(trie.insert("ka".chars(), 1), None);
        assert_eq!(trie.get("ka".chars()), Some(&1));
        assert_eq!(trie.get("k".chars()), None);
        assert_eq!(trie.get("kha".chars()), None);
    }

    #[test]
    fn root_is_empty_sequence() {
        let mut trie: Trie<char, u32> = Trie::new();
        assert_eq!(trie.value(trie.root()), None);
        trie.insert(std::iter::empty(), 7);
        assert_eq!(trie.value(trie.root()), Some(&7));
        assert_eq!(trie.get(std::iter::empty::<char>()), Some(&7));
    }

    #[test]
    fn stepwise_traversal_matches_get() {
        let mut trie: Trie<char, &str> = Trie::new();
        trie.insert("ab".chars(), "leaf");

        let mut node = trie.root();
        assert_eq!(trie.value(node), None);
        node = trie.child(node, &'a').unwrap();
        // Interior node: on the path but carries no value.
        assert_eq!(trie.value(node), None);
        node = trie.child(node, &'b').unwrap();
        assert_eq!(trie.value(node), Some(&"leaf"));
        assert_eq!(trie.child(node, &'c'), None);
    }

    #[test]
    fn reinsert_displaces_earlier_value() {
        let mut trie: Trie<char, u32> = Trie::new();
        assert_eq!(trie.insert("a".chars(), 1), None);
        assert_eq!(trie.insert("a".chars(), 2), Some(1));
        assert_eq!(trie.get("a".chars()), Some(&2));
    }

    #[test]
    fn get_or_insert_with_grows_in_place() {
        let mut trie: Trie<char, Vec<u32>> = Trie::new();
        trie.get_or_insert_with("a".chars(), Vec::new).push(1);
        trie.get_or_insert_with("a".chars(), Vec::new).push(2);
        assert_eq!(trie.get("a".chars()), Some(&vec![1, 2]));
    }

    #[test]
    fn shared_prefixes_share_nodes() {
        let mut trie: Trie<char, u32> = Trie::new();
        trie.insert("kha".chars(), 1);
        trie.insert("khu".chars(), 2);
        // root + k + h + a + u
        assert_eq!(trie.node_count(), 5);
    }
}
