//! # Relex
//!
//! A lexer generator: named token productions, written as regular expressions,
//! are compiled into a minimal deterministic finite automaton whose transitions
//! are labeled by closed intervals of input symbols. The result is a flat,
//! index-addressed state table that scanner emitters can turn into source code
//! for any target language.
//!
//! ## Overview
//!
//! The pipeline is strictly stage-shaped; each stage consumes its predecessor:
//!
//! 1. **Regex parsing** ([`regex`]) - each production becomes an AST
//! 2. **Thompson construction** ([`nfa`]) - ASTs become one NFA with a shared
//!    start node, ε-edges, and interval-set edge labels
//! 3. **Subset construction** ([`dfa`]) - ε-closure + move over a disjoint
//!    interval cover yields an equivalent DFA
//! 4. **Minimization** ([`dfa`]) - Moore partition refinement collapses
//!    indistinguishable states in place
//! 5. **Flattening** ([`table`]) - surviving states are numbered and exposed
//!    as a [`LexerTable`]
//!
//! The alphabet is generic: any type implementing [`Symbol`] works, with `u8`
//! as the common instantiation and `char` also provided.
//!
//! ## Quick Start
//!
//! ```rust
//! use relex::LexerGenerator;
//!
//! let result = LexerGenerator::<u8, &'static str>::new()
//!     .production("IF", "if")
//!     .production("IDENT", "[a-z]+")
//!     .generate()
//!     .expect("productions are valid");
//!
//! let table = result.table;
//! assert_eq!(table.states().len(), 4);
//!
//! // Walk the table by hand: 'i' then 'f' must land on an accepting state.
//! let mut state = table.start();
//! for byte in *b"if" {
//!     let next = table.state(state).transitions.iter()
//!         .find(|t| t.chars.contains_symbol(byte))
//!         .map(|t| t.next)
//!         .expect("transition exists");
//!     state = next;
//! }
//! assert_eq!(table.state(state).terminal_info, Some("IF"));
//! ```
//!
//! Earlier productions win when several match the same string: `"if"` above
//! lexes as `IF`, not `IDENT`, because `IF` was declared first.
//!
//! ## Modules
//!
//! - [`symbol`] - the alphabet abstraction
//! - [`interval`] - closed-interval sets and the disjoint-cover routine
//! - [`regex`] - the regex dialect, AST, and parser
//! - [`nfa`] - Thompson construction over interval labels
//! - [`dfa`] - subset construction, minimization, transition aggregation
//! - [`table`] - the flattened output artifact
//! - [`generator`] - the façade driving the whole pipeline
//! - [`error`] - error and warning types
//! - [`testing`] - reference interpreters for verifying generated tables
//!
//! ## What this crate is not
//!
//! The generator emits tables, not a running lexer; scanning real input is the
//! job of the code an emitter produces (the interpreters in [`testing`] exist
//! for verification only). The dialect has no Unicode class shorthands,
//! anchors, lookaround, backreferences, capture groups, non-greedy
//! quantifiers, or bounded repetition.

pub mod dfa;
pub mod error;
pub mod generator;
pub mod interval;
pub mod nfa;
pub mod regex;
pub mod symbol;
pub mod table;
pub mod testing;

pub use dfa::{Dfa, DfaState, DfaTransition};
pub use error::{GeneratorError, GeneratorWarning, RegexError, RegexErrorKind};
pub use generator::{
    GenerateMetrics, GenerateResult, LexerGenerator, Production, Ranked, TokenInfo,
};
pub use interval::{disjoint_cover, Interval, IntervalSet};
pub use nfa::Nfa;
pub use regex::{RegexExpr, RepeatKind};
pub use symbol::Symbol;
pub use table::{LexerState, LexerTable, LexerTransition};
