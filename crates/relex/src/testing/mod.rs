//! # Test Support
//!
//! Reference interpreters for verifying generated automata. These are not a
//! scanner: emitters produce the real scanners. They exist so tests can check
//! that a table recognizes exactly the language the NFA describes, and that
//! longest-prefix reading behaves the way an emitted scanner would.

use crate::generator::Ranked;
use crate::nfa::{Nfa, NfaTransition};
use crate::symbol::Symbol;
use crate::table::LexerTable;

/// Run the NFA over the whole input. Returns the winning token (smallest
/// precedence) if the full input is accepted.
#[must_use]
pub fn nfa_accepts<S: Symbol, T: Clone>(nfa: &Nfa<S, T>, input: &[S]) -> Option<Ranked<T>> {
    let mut current = nfa.epsilon_closure([nfa.start()]);
    for &symbol in input {
        let mut moved = Vec::new();
        for &id in &current {
            for t in &nfa.node(id).transitions {
                if let NfaTransition::Chars { set, next } = t {
                    if set.contains_symbol(symbol) {
                        moved.push(*next);
                    }
                }
            }
        }
        if moved.is_empty() {
            return None;
        }
        current = nfa.epsilon_closure(moved);
    }
    nfa.terminal_of(&current).cloned()
}

/// Run the table over the whole input. Returns the terminal payload if the
/// full input lands on an accepting state.
#[must_use]
pub fn table_accepts<'a, S: Symbol, T>(table: &'a LexerTable<S, T>, input: &[S]) -> Option<&'a T> {
    let mut state = table.start();
    for &symbol in input {
        state = step(table, state, symbol)?;
    }
    table.state(state).terminal_info.as_ref()
}

/// Longest-prefix reading from the start of `input`, the way an emitted
/// scanner would tokenize: returns the length of the longest accepted prefix
/// and its token payload.
#[must_use]
pub fn longest_match<'a, S: Symbol, T>(
    table: &'a LexerTable<S, T>,
    input: &[S],
) -> Option<(usize, &'a T)> {
    let mut state = table.start();
    let mut best: Option<(usize, &T)> = table
        .state(state)
        .terminal_info
        .as_ref()
        .map(|info| (0, info));
    for (offset, &symbol) in input.iter().enumerate() {
        let Some(next) = step(table, state, symbol) else {
            break;
        };
        state = next;
        if let Some(info) = table.state(state).terminal_info.as_ref() {
            best = Some((offset + 1, info));
        }
    }
    best
}

/// One deterministic step; at most one transition can contain the symbol.
fn step<S: Symbol, T>(table: &LexerTable<S, T>, state: usize, symbol: S) -> Option<usize> {
    table
        .state(state)
        .transitions
        .iter()
        .find(|t| t.chars.contains_symbol(symbol))
        .map(|t| t.next)
}
