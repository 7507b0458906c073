//! # Generator Façade
//!
//! [`LexerGenerator`] accumulates productions and drives the whole pipeline:
//! parse, Thompson construction, subset construction, minimization,
//! flattening. It is consumed by [`generate`], so a generator cannot be run
//! twice; build a new one instead.
//!
//! ## Usage
//!
//! ```rust
//! use relex::LexerGenerator;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Tok { Ws, Ident }
//!
//! let result = LexerGenerator::<u8, Tok>::new()
//!     .production(Tok::Ws, "[ \t\n\r]+")
//!     .production(Tok::Ident, "[a-zA-Z_][a-zA-Z0-9_]*")
//!     .generate()?;
//!
//! assert!(result.warnings.is_empty());
//! assert!(result.metrics.minimized_states <= result.metrics.dfa_states);
//! # Ok::<(), relex::GeneratorError>(())
//! ```
//!
//! Productions declared earlier take priority when several match the same
//! string; the precedence is simply the insertion index.
//!
//! [`generate`]: LexerGenerator::generate

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Instant;

use compact_str::CompactString;
use log::debug;

use crate::dfa::Dfa;
use crate::error::{GeneratorError, GeneratorWarning, RegexError, RegexErrorKind};
use crate::nfa::Nfa;
use crate::regex::{self, RegexExpr};
use crate::symbol::Symbol;
use crate::table::LexerTable;

/// The user-supplied token payload attached to a production.
///
/// The generator never inspects it beyond cloning and equality; priority
/// between productions comes from declaration order, not from the payload.
pub trait TokenInfo: Clone + Eq + Debug {}

impl<T: Clone + Eq + Debug> TokenInfo for T {}

/// A token payload together with its internal precedence (the production's
/// 0-based insertion index; smaller wins on conflict).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<T> {
    pub precedence: u32,
    pub info: T,
}

/// One named token production: a regex and its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production<T> {
    pub info: T,
    pub regex: CompactString,
}

/// Pipeline statistics reported alongside a generated table.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateMetrics {
    /// NFA nodes after Thompson construction.
    pub nfa_states: usize,
    /// DFA states after subset construction, before minimization.
    pub dfa_states: usize,
    /// DFA states after minimization (equals the table's state count).
    pub minimized_states: usize,
    /// Wall-clock time spent in `generate`.
    pub generate_time: std::time::Duration,
}

/// A successfully generated table plus non-fatal findings.
#[derive(Debug)]
pub struct GenerateResult<S, T> {
    pub table: LexerTable<S, T>,
    pub warnings: Vec<GeneratorWarning>,
    pub metrics: GenerateMetrics,
}

/// Accumulates productions, then compiles them into a [`LexerTable`].
pub struct LexerGenerator<S: Symbol, T: TokenInfo> {
    productions: Vec<Production<T>>,
    _alphabet: PhantomData<S>,
}

impl<S: Symbol, T: TokenInfo> Default for LexerGenerator<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, T: TokenInfo> LexerGenerator<S, T> {
    #[must_use]
    pub fn new() -> Self {
        Self { productions: Vec::new(), _alphabet: PhantomData }
    }

    /// Append a production. Precedence is the number of productions seen so
    /// far, so earlier productions win conflicts.
    #[must_use]
    pub fn production(mut self, info: T, regex: &str) -> Self {
        self.productions.push(Production { info, regex: CompactString::new(regex) });
        self
    }

    /// The productions added so far, in declaration order.
    #[must_use]
    pub fn productions(&self) -> &[Production<T>] {
        &self.productions
    }

    /// Compile the accumulated productions into a state table.
    ///
    /// Consumes the generator: the pipeline stages hand their graphs to one
    /// another by move, and nothing of the intermediate automata survives in
    /// the result.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::RegexSyntax`] when a production's regex is
    ///   malformed, with the production index and offending offset
    /// - [`GeneratorError::AlphabetOverflow`] when a pattern character does
    ///   not fit `[S::MIN, S::MAX]`
    /// - [`GeneratorError::InternalInvariant`] when a pipeline invariant
    ///   breaks (a bug, not an input problem)
    pub fn generate(self) -> Result<GenerateResult<S, T>, GeneratorError> {
        let started = Instant::now();
        let mut warnings = Vec::new();
        let mut parsed: Vec<(Ranked<T>, RegexExpr<S>)> = Vec::with_capacity(self.productions.len());
        for (index, production) in self.productions.iter().enumerate() {
            let expr = regex::parse::<S>(&production.regex)
                .map_err(|source| classify(index, source))?;
            if expr.matches_empty() {
                warnings.push(GeneratorWarning::EmptyProduction { production: index });
            }
            let precedence = u32::try_from(index).unwrap_or(u32::MAX);
            parsed.push((Ranked { precedence, info: production.info.clone() }, expr));
        }

        let nfa = Nfa::from_productions(&parsed);
        let nfa_states = nfa.len();
        drop(parsed);

        let mut dfa = Dfa::from_nfa(nfa);
        let dfa_states = dfa.len();
        dfa.minimize()?;
        let minimized_states = dfa.len();

        let table = LexerTable::from_dfa(dfa);
        let metrics = GenerateMetrics {
            nfa_states,
            dfa_states,
            minimized_states,
            generate_time: started.elapsed(),
        };
        debug!(
            "generated table: {} nfa nodes, {} dfa states, {} after minimization",
            nfa_states, dfa_states, minimized_states
        );
        Ok(GenerateResult { table, warnings, metrics })
    }
}

/// Attach the production index to a parse error, promoting alphabet overflow
/// to its own generator-level kind.
fn classify(production: usize, source: RegexError) -> GeneratorError {
    match source.kind {
        RegexErrorKind::AlphabetOverflow { symbol } => {
            GeneratorError::AlphabetOverflow { production, pos: source.pos, symbol }
        }
        _ => GeneratorError::RegexSyntax { production, source },
    }
}
