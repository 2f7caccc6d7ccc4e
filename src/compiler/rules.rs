//! The rule compiler: mapping indexing, the per-line loop, and the duplicate
//! ledger.

use tracing::{debug, warn};

use super::grammar;
use super::template::RuleOutput;
use crate::error::CompileError;
use crate::trie::Trie;
use crate::{Mappings, Token};

/// Forward-trie element: one way an input spelling can classify. A spelling
/// shared by several mapping entries accumulates one candidate per entry, in
/// mapping-table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCandidate {
    pub glyph: Option<String>,
    pub category: String,
    pub key: String,
}

/// Reverse-trie record: the mapping entry that owns a glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseEntry {
    pub spellings: Vec<String>,
    pub category: String,
    pub key: String,
}

/// Token sequence → compiled output template.
pub type RuleTrie = Trie<Token, RuleOutput>;
/// Input spelling → classification candidates.
pub type ForwardTrie = Trie<char, Vec<ScriptCandidate>>;
/// Script glyph → owning mapping entry.
pub type ReverseTrie = Trie<char, ReverseEntry>;

/// A silently overwritten trie entry.
///
/// Later definitions win for both rule paths and reverse-trie glyphs; the
/// collisions are recorded here rather than rejected, so a caller can surface
/// them (e.g. when user overrides shadow entries shipped with a scheme).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Duplicate {
    /// Two rules compiled to the same token path.
    Rule { tokens: Vec<Token> },
    /// Two mapping entries carry the same glyph.
    Glyph { glyph: String },
}

/// A compiled scheme/script pairing: the three lookup tries plus the
/// duplicate ledger.
///
/// Built once by [`Rules::compile`]; read-only afterwards. All owned data is
/// plain `String`s and indices, so a compiled set is `Send + Sync` and can be
/// shared across any number of runtime traversals without locking.
#[derive(Debug)]
pub struct Rules {
    rule_trie: RuleTrie,
    forward_trie: ForwardTrie,
    reverse_trie: ReverseTrie,
    duplicates: Vec<Duplicate>,
}

impl Rules {
    /// Compile `rule_lines` against `mappings`.
    ///
    /// The mapping table is indexed first (forward and reverse tries), then
    /// each line is parsed and inserted into the rule trie. Blank lines are
    /// skipped; any other malformed line aborts compilation with the first
    /// error, and the partially built tries never escape.
    pub fn compile<I, S>(rule_lines: I, mappings: &Mappings) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Rules {
            rule_trie: Trie::new(),
            forward_trie: Trie::new(),
            reverse_trie: Trie::new(),
            duplicates: Vec::new(),
        };
        rules.index_mappings(mappings);
        for line in rule_lines {
            rules.compile_rule(line.as_ref(), mappings)?;
        }
        Ok(rules)
    }

    /// The compiled rule trie. The root represents the empty token sequence;
    /// the runtime advances with [`Trie::child`] per classified token and
    /// reads templates with [`Trie::value`].
    pub fn rule_trie(&self) -> &RuleTrie {
        &self.rule_trie
    }

    /// Spelling → candidates, for classifying raw keystrokes into tokens.
    pub fn forward_trie(&self) -> &ForwardTrie {
        &self.forward_trie
    }

    /// Glyph → owning mapping entry, for reverse transliteration.
    pub fn reverse_trie(&self) -> &ReverseTrie {
        &self.reverse_trie
    }

    /// Collisions observed during the build, in encounter order.
    pub fn duplicates(&self) -> &[Duplicate] {
        &self.duplicates
    }

    fn index_mappings(&mut self, mappings: &Mappings) {
        for (category, key, entry) in mappings.iter() {
            for spelling in &entry.spellings {
                self.forward_trie.get_or_insert_with(spelling.chars(), Vec::new).push(
                    ScriptCandidate {
                        glyph: entry.glyph.clone(),
                        category: category.to_string(),
                        key: key.to_string(),
                    },
                );
            }
            if let Some(glyph) = &entry.glyph {
                let record = ReverseEntry {
                    spellings: entry.spellings.clone(),
                    category: category.to_string(),
                    key: key.to_string(),
                };
                if self.reverse_trie.insert(glyph.chars(), record).is_some() {
                    warn!(glyph = %glyph, category, key, "glyph already mapped, later entry wins");
                    self.duplicates.push(Duplicate::Glyph { glyph: glyph.clone() });
                }
            }
        }
    }

    fn compile_rule(&mut self, line: &str, mappings: &Mappings) -> Result<(), CompileError> {
        if line.is_empty() {
            return Ok(());
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let (input, output) = match fields.as_slice() {
            [input, output] => (*input, *output),
            _ => return Err(CompileError::MalformedRule { line: line.to_string() }),
        };
        let tokens = grammar::parse_input_pattern(input, line)?;
        let template = grammar::expand_mapping_refs(output, mappings)?;
        debug!(rule = line, template = %template, "compiled rule");
        if self.rule_trie.insert(tokens.clone(), RuleOutput::new(template)).is_some() {
            warn!(rule = line, "rule path already defined, later rule wins");
            self.duplicates.push(Duplicate::Rule { tokens });
        }
        Ok(())
    }
}
