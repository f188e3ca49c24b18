//! Error types for code generation

/// Generation config errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Precision outside 1..=8
    #[error("precision must be between 1 and 8, got {0}")]
    Precision(u8),

    /// Zero print width
    #[error("print width must be positive, got {0}")]
    PrintWidth(usize),
}

/// Formatter failures
///
/// Callers recover from these by keeping the unformatted source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Closing bracket without an opener, or mismatched pair
    #[error("unexpected '{found}' at line {line}")]
    UnexpectedClose {
        /// Offending character
        found: char,
        /// 1-based line
        line: usize,
    },

    /// Brackets left open at end of input
    #[error("unclosed '{open}' opened at line {line}")]
    Unclosed {
        /// Opening character
        open: char,
        /// 1-based line
        line: usize,
    },

    /// String literal runs to end of input
    #[error("unterminated string literal starting at line {0}")]
    UnterminatedString(usize),

    /// Type declaration under the untyped parser
    #[error("type declaration not supported by the {parser} parser at line {line}")]
    TypeSyntax {
        /// Parser name
        parser: &'static str,
        /// 1-based line
        line: usize,
    },
}
