//! # Error Types
//!
//! Errors and warnings surfaced by the generator pipeline.
//!
//! ## Overview
//!
//! - [`RegexError`]: a syntax problem inside one regular expression, with the
//!   byte offset of the offending position
//! - [`GeneratorError`]: the fatal errors [`generate`] can return, carrying
//!   the index of the offending production
//! - [`GeneratorWarning`]: recoverable findings (currently: a production that
//!   matches the empty string)
//!
//! No error is retried and nothing is printed; everything is surfaced to the
//! caller as a value.
//!
//! [`generate`]: crate::generator::LexerGenerator::generate

use thiserror::Error;

/// A regular-expression syntax error with its byte offset in the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {pos}")]
pub struct RegexError {
    /// Byte offset into the pattern where the problem was detected.
    pub pos: usize,
    #[source]
    pub kind: RegexErrorKind,
}

/// The kinds of regular-expression syntax errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexErrorKind {
    #[error("unmatched ')'")]
    UnmatchedParen,

    #[error("unmatched ']'")]
    UnmatchedBracket,

    #[error("unterminated group")]
    UnterminatedGroup,

    #[error("unterminated character class")]
    UnterminatedClass,

    #[error("quantifier has no operand")]
    DanglingQuantifier,

    #[error("escape at end of pattern")]
    LoneEscape,

    #[error("inverted range '{lo}-{hi}'")]
    InvertedRange { lo: char, hi: char },

    #[error("symbol '{symbol}' does not fit the target alphabet")]
    AlphabetOverflow { symbol: char },

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
}

/// Fatal errors from [`generate`](crate::generator::LexerGenerator::generate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// A production's regular expression failed to parse.
    #[error("invalid regex in production {production}")]
    RegexSyntax {
        /// 0-based index of the offending production.
        production: usize,
        #[source]
        source: RegexError,
    },

    /// A pattern character falls outside `[Symbol::MIN, Symbol::MAX]`.
    #[error("production {production}: symbol '{symbol}' at offset {pos} does not fit the target alphabet")]
    AlphabetOverflow {
        production: usize,
        pos: usize,
        symbol: char,
    },

    /// A pipeline invariant was violated. This is a bug in the generator, not
    /// a user error.
    #[error("internal invariant violated: {message}")]
    InternalInvariant { message: String },
}

/// Non-fatal findings reported alongside a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorWarning {
    /// The production matches the empty string, so the start state of the
    /// generated table is terminal. Emitters that cannot cope with zero-width
    /// tokens should reject such tables.
    EmptyProduction {
        /// 0-based index of the production.
        production: usize,
    },
}

impl std::fmt::Display for GeneratorWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyProduction { production } => {
                write!(f, "production {production} matches the empty string")
            }
        }
    }
}
