//! Tokenizer for the two bracket grammars of rule lines.
//!
//! Rule fields use two delimiter styles with distinct meanings:
//!
//! - `{CATEGORY}` / `{CATEGORY/KEY}` — in an input pattern, a token group; in
//!   an output pattern, a reference to the first accepted *spelling* of a
//!   mapping entry.
//! - `[CATEGORY/KEY]` — in an output pattern, a reference to the canonical
//!   *glyph* of a mapping entry. (`[$N]` backreference markers share the
//!   square-bracket syntax but carry no `/` and are left for the template
//!   layer.)
//!
//! The scanner here is a plain left-to-right pass rather than an iterated
//! regex rewrite: each group is visited exactly once and replacement text is
//! never rescanned, which makes termination of mapping-reference expansion
//! structural.

use crate::error::CompileError;
use crate::{Mappings, Token};

/// Delimiter style of a scanned group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delim {
    Brace,
    Bracket,
}

/// One bracketed group found in a rule field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Group<'a> {
    pub delim: Delim,
    /// Text between the delimiters, never empty.
    pub body: &'a str,
    /// Byte range of the whole group, delimiters included.
    pub start: usize,
    pub end: usize,
}

/// Scan `field` left to right for `{...}` and `[...]` groups.
///
/// Text outside groups, empty groups, and an unterminated trailing delimiter
/// are all inert: the table grammar treats anything that is not a complete
/// non-empty group as literal text.
pub(crate) fn scan_groups(field: &str) -> Vec<Group<'_>> {
    let mut groups = Vec::new();
    let bytes = field.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let (close, delim) = match bytes[i] {
            b'{' => ('}', Delim::Brace),
            b'[' => (']', Delim::Bracket),
            _ => {
                i += 1;
                continue;
            }
        };
        let Some(offset) = field[i + 1..].find(close) else { break };
        let end = i + 1 + offset + 1;
        let body = &field[i + 1..end - 1];
        if !body.is_empty() {
            groups.push(Group { delim, body, start: i, end });
        }
        i = end;
    }
    groups
}

/// Parse the input-pattern field of a rule into its token path.
///
/// Every group becomes one [`Token`]; a `/` in the body narrows the token to
/// a specific key. A field with no recognizable group is a compile error
/// (`line` is the whole raw rule, carried for diagnostics).
pub(crate) fn parse_input_pattern(field: &str, line: &str) -> Result<Vec<Token>, CompileError> {
    let groups = scan_groups(field);
    if groups.is_empty() {
        return Err(CompileError::UnparseableInput {
            field: field.to_string(),
            line: line.to_string(),
        });
    }
    Ok(groups.iter().map(|group| token_of(group.body)).collect())
}

fn token_of(body: &str) -> Token {
    let mut parts = body.split('/');
    let category = parts.next().unwrap_or(body);
    match parts.next() {
        Some(key) => Token::with_key(category, key),
        None => Token::new(category),
    }
}

/// Expand every mapping reference in an output-pattern field.
///
/// A group is a mapping reference iff its body carries both a category and a
/// key (`CATEGORY/KEY`). Braced references substitute the entry's first
/// accepted spelling, bracketed ones its glyph (empty when the entry has
/// none). Groups without a `/` — notably `[$N]` backreference markers — pass
/// through untouched. Substitutions are spliced in a single pass and never
/// rescanned.
pub(crate) fn expand_mapping_refs(field: &str, mappings: &Mappings) -> Result<String, CompileError> {
    let mut result = String::with_capacity(field.len());
    let mut cursor = 0;
    for group in scan_groups(field) {
        let mut parts = group.body.split('/');
        let (Some(category), Some(key)) = (parts.next(), parts.next()) else { continue };
        if category.is_empty() || key.is_empty() {
            continue;
        }
        let Some(entry) = mappings.get(category, key) else {
            return Err(CompileError::UnknownReference {
                reference: field[group.start..group.end].to_string(),
            });
        };
        let replacement = match group.delim {
            Delim::Brace => entry.spellings.first().map(String::as_str).unwrap_or(""),
            Delim::Bracket => entry.glyph.as_deref().unwrap_or(""),
        };
        result.push_str(&field[cursor..group.start]);
        result.push_str(replacement);
        cursor = group.end;
    }
    result.push_str(&field[cursor..]);
    Ok(result)
}
