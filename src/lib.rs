#[macro_use]
mod macros;
mod compiler;
mod error;
mod trie;

pub use compiler::{
    Duplicate, ForwardTrie, ReverseEntry, ReverseTrie, RuleOutput, RuleTrie, Rules,
    ScriptCandidate,
};
pub use error::CompileError;
pub use trie::{NodeId, Trie};

use std::collections::HashMap;
use std::fmt;

// --- Core value types --------------------------------------------------------

/// A token-category reference, optionally narrowed to one mapping key.
///
/// Tokens are the path elements of the rule trie: a rule such as
/// `{CONSONANT}{SIGN/NUKTA}` compiles to the two-token path
/// `[Token("CONSONANT"), Token("SIGN"/"NUKTA")]`. Identity is structural over
/// both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub category: String,
    pub key: Option<String>,
}

impl Token {
    /// A token matching any key of `category`.
    pub fn new(category: impl Into<String>) -> Self {
        Token { category: category.into(), key: None }
    }

    /// A token matching exactly one (category, key) pair.
    pub fn with_key(category: impl Into<String>, key: impl Into<String>) -> Self {
        Token { category: category.into(), key: Some(key.into()) }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}/{}", self.category, key),
            None => write!(f, "{}", self.category),
        }
    }
}

/// One row of the mapping table: the accepted input spellings for a
/// (category, key) pair and, when the pair produces output directly, its
/// canonical script glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Accepted input spellings, most canonical first.
    pub spellings: Vec<String>,
    /// Canonical output glyph, if any. Purely structural entries (e.g. dead
    /// keys) have none.
    pub glyph: Option<String>,
}

/// The mapping table: (category, key) → [`MappingEntry`], preserving insertion
/// order. Produced by an external scheme/script loader and read-only to the
/// compiler.
#[derive(Debug, Clone, Default)]
pub struct Mappings {
    order: Vec<(String, String)>,
    by_category: HashMap<String, HashMap<String, MappingEntry>>,
}

impl Mappings {
    pub fn new() -> Self {
        Mappings::default()
    }

    /// Insert an entry. A repeated (category, key) pair replaces the earlier
    /// entry in place, keeping its original position in iteration order.
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        entry: MappingEntry,
    ) {
        let (category, key) = (category.into(), key.into());
        let slot = self.by_category.entry(category.clone()).or_default();
        if slot.insert(key.clone(), entry).is_none() {
            self.order.push((category, key));
        }
    }

    pub fn get(&self, category: &str, key: &str) -> Option<&MappingEntry> {
        self.by_category.get(category)?.get(key)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &MappingEntry)> {
        self.order.iter().filter_map(|(category, key)| {
            self.get(category, key).map(|entry| (category.as_str(), key.as_str(), entry))
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
