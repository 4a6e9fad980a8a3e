/// Errors raised while compiling a pattern
///
/// Every variant describes malformed pattern *text* (or a malformed
/// hand-built token sequence). An input that simply does not match a pattern
/// is not an error: lookups return `None` for that.
///
/// Byte positions refer to the pattern text, token indexes to the sequence
/// handed to [`Pattern::from_tokens`](crate::Pattern::from_tokens).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The pattern text is empty
    #[error("pattern expression must not be empty")]
    Empty,

    /// A parameter opens right after the previous one closed: `{a}{b}`
    #[error("parameters must be separated by a literal, pos {pos}")]
    AdjacentParameters { pos: usize },

    /// A parameter opened at `pos` is never closed: `foo{bar`
    #[error("parameter was not closed, pos {pos}")]
    Unclosed { pos: usize },

    /// A parameter has nothing between its delimiters: `foo{}`
    #[error("empty name of parameter, pos {pos}")]
    EmptyName { pos: usize },

    /// Start and end delimiters are the same character
    #[error("parameter delimiters must differ, both are {0:?}")]
    SameDelimiters(char),

    /// A token sequence does not begin with `START`
    #[error("token sequence must begin with START")]
    MissingStart,

    /// A token sequence does not finish with `END`
    #[error("token sequence must finish with END")]
    MissingEnd,

    /// `START` or `END` found in the middle of a token sequence
    #[error("START/END marker in the middle of the sequence, index {index}")]
    MisplacedMarker { index: usize },

    /// A literal token holds no text
    #[error("literal token must not be empty, index {index}")]
    EmptyLiteral { index: usize },

    /// Two parameter tokens follow each other without a literal between them
    #[error("parameter tokens must be separated by a literal, index {index}")]
    AdjacentParameterTokens { index: usize },

    /// A resolved parameter was passed where a compiled pattern is expected
    #[error("resolved parameter is not allowed in a compiled pattern, index {index}")]
    ResolvedToken { index: usize },
}
