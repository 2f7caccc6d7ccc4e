use thiserror::Error;

/// Compilation failure.
///
/// The compiler is fail-fast: the first error aborts the build and nothing of
/// the partially built trie set is exposed to the caller. Each variant carries
/// the offending raw text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A rule line did not split into exactly two tab-separated fields.
    #[error("rule is not a two-column TSV line: {line}")]
    MalformedRule { line: String },

    /// An input-pattern field contained no bracketed token group.
    #[error("input pattern `{field}` of rule `{line}` cannot be parsed")]
    UnparseableInput { field: String, line: String },

    /// An output-pattern field referenced a (category, key) pair that is not
    /// in the mapping table.
    #[error("no mapping found for reference `{reference}`")]
    UnknownReference { reference: String },
}
