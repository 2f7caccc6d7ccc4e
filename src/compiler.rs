//! Rule compilation.
//!
//! This module is the *build step* of the transliteration engine: it turns a
//! mapping table plus raw two-column rule lines into the three read-only
//! tries the runtime traverses character by character.
//!
//! ## How the parts work together
//!
//! Compiling a scheme/script pairing is a short pipeline:
//!
//! ```text
//! mapping table ── Rules::index_mappings ──┬─ forward trie  (spelling → candidates)
//!                                          └─ reverse trie  (glyph → spellings)
//!
//! rule line ── split on '\t' (two fields exactly)
//!              │
//!              ├─ input field ── grammar::parse_input_pattern ── Vec<Token>
//!              │                  (bracket-group scanner, grammar.rs)
//!              │
//!              └─ output field ── grammar::expand_mapping_refs ── String
//!                                 ({CAT/KEY} → spelling, [CAT/KEY] → glyph)
//!                                          │
//!                                          v
//!                                 RuleOutput::new          (template.rs)
//!                                          │
//!                                          v
//!                             rule trie insert at the token path
//! ```
//!
//! The build is single-pass and fail-fast: the first malformed line or
//! unresolvable mapping reference aborts compilation, and the partial tries
//! are dropped rather than exposed. Duplicate insertions (same token path or
//! same glyph twice) are *not* errors; the later definition wins and the
//! collision is recorded on [`Rules::duplicates`] for callers that want to
//! surface it.
//!
//! ## Responsibilities by module
//!
//! - `grammar.rs`: explicit tokenizer for the two bracket grammars (`{...}`
//!   and `[...]`), input-pattern parsing and mapping-reference expansion.
//! - `template.rs`: compiled output templates with positional `[$N]`
//!   backreferences.
//! - `rules.rs`: the [`Rules`] compiler itself — mapping indexing, the
//!   per-line loop, and the duplicate ledger.
//!
//! ## Public surface
//!
//! Most code interacts with this module via:
//!
//! - [`Rules`] (compile once, then lend the tries to the runtime)
//! - [`RuleOutput`] (template evaluation during trie traversal)

#[path = "compiler/grammar.rs"]
mod grammar;
#[path = "compiler/rules.rs"]
mod rules;
#[path = "compiler/template.rs"]
mod template;

pub use rules::{
    Duplicate, ForwardTrie, ReverseEntry, ReverseTrie, RuleTrie, Rules, ScriptCandidate,
};
pub use template::RuleOutput;
