//! # The Flattened Table
//!
//! The sole output artifact of the generator: a flat, 0-indexed state vector
//! with interval-labeled transitions. It holds no references into any earlier
//! pipeline structure, so code emitters can keep it around for as long as
//! they like.

use crate::dfa::Dfa;
use crate::interval::IntervalSet;
use crate::symbol::Symbol;

/// One transition of the flattened table. `next` indexes the state vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerTransition<S> {
    pub chars: IntervalSet<S>,
    pub next: usize,
}

/// One state of the flattened table. `terminal_info` is the user-supplied
/// payload of the winning production; the internal precedence is dropped
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerState<S, T> {
    pub transitions: Vec<LexerTransition<S>>,
    pub terminal: bool,
    pub terminal_info: Option<T>,
}

/// The generated state table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerTable<S, T> {
    start: usize,
    states: Vec<LexerState<S, T>>,
}

impl<S: Symbol, T: Clone> LexerTable<S, T> {
    pub(crate) fn from_dfa(dfa: Dfa<S, T>) -> Self {
        let (dfa_states, start) = dfa.take_states();
        let states = dfa_states
            .into_iter()
            .map(|state| LexerState {
                transitions: state
                    .transitions
                    .into_iter()
                    .map(|t| LexerTransition { chars: t.chars, next: t.next })
                    .collect(),
                terminal: state.terminal.is_some(),
                terminal_info: state.terminal.map(|ranked| ranked.info),
            })
            .collect();
        Self { start, states }
    }
}

impl<S: Symbol, T> LexerTable<S, T> {
    /// Index of the start state.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// All states, indexed `0 .. state_count - 1`.
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[LexerState<S, T>] {
        &self.states
    }

    /// The state at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds; valid indices are exactly the
    /// `next` fields of the table's own transitions plus [`start`].
    ///
    /// [`start`]: LexerTable::start
    #[inline]
    #[must_use]
    pub fn state(&self, index: usize) -> &LexerState<S, T> {
        &self.states[index]
    }

    /// Number of states.
    #[inline]
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::LexerGenerator;

    #[test]
    fn table_has_no_out_of_range_targets() {
        let result = LexerGenerator::<u8, u32>::new()
            .production(1, "-?[0-9]+")
            .production(2, "[a-z]+")
            .generate()
            .expect("generates");
        let table = result.table;
        assert!(table.start() < table.state_count());
        for state in table.states() {
            for t in &state.transitions {
                assert!(t.next < table.state_count());
            }
        }
    }

    #[test]
    fn terminal_info_drops_the_precedence_wrapper() {
        let result = LexerGenerator::<u8, &'static str>::new()
            .production("NUM", "[0-9]+")
            .generate()
            .expect("generates");
        let table = result.table;
        let accepting: Vec<&LexerState<u8, &str>> =
            table.states().iter().filter(|s| s.terminal).collect();
        assert_eq!(accepting.len(), 1);
        assert_eq!(accepting[0].terminal_info, Some("NUM"));
        // non-terminal states carry no payload
        for state in table.states().iter().filter(|s| !s.terminal) {
            assert_eq!(state.terminal_info, None);
        }
    }
}
