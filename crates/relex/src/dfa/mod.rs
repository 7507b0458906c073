//! # DFA Construction
//!
//! Subset construction, Moore minimization, and transition aggregation.
//!
//! ## Overview
//!
//! [`Dfa::from_nfa`] consumes the NFA and runs the classic subset
//! construction, generalized from single symbols to intervals: each step
//! computes the disjoint cover of all labels leaving the current NFA node
//! set, then moves over each cover interval. A DFA state is named by the
//! sorted set of NFA node ids it represents, which doubles as the
//! deduplication key.
//!
//! State ids are assigned in breadth-first discovery order. Because the cover
//! is iterated in ascending interval order, discovery order - and with it the
//! entire table layout - is a pure function of the production list; no hash
//! iteration order ever leaks into the output.
//!
//! [`Dfa::minimize`] then collapses indistinguishable states in place, and
//! the aggregation pass (run after both construction and minimization) merges
//! parallel transitions so every state keeps at most one edge per distinct
//! target.

mod minimize;

use std::collections::{BTreeMap, VecDeque};

use hashbrown::HashMap;
use log::debug;

use crate::generator::Ranked;
use crate::interval::IntervalSet;
use crate::nfa::{Nfa, NodeId};
use crate::symbol::Symbol;

/// One deterministic transition: an interval set and the target state index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaTransition<S> {
    pub chars: IntervalSet<S>,
    pub next: usize,
}

/// One DFA state. `nfa_nodes` is the sorted set of NFA nodes the state
/// represents; it only serves deduplication and diagnostics and is dropped
/// with the DFA once the table is flattened.
#[derive(Debug, Clone)]
pub struct DfaState<S, T> {
    pub nfa_nodes: Vec<NodeId>,
    pub transitions: Vec<DfaTransition<S>>,
    pub terminal: Option<Ranked<T>>,
}

/// The deterministic automaton, prior to flattening.
#[derive(Debug)]
pub struct Dfa<S, T> {
    states: Vec<DfaState<S, T>>,
    start: usize,
}

impl<S: Symbol, T: Clone> Dfa<S, T> {
    /// Run subset construction. Consumes the NFA; it is not needed afterwards.
    #[must_use]
    pub fn from_nfa(nfa: Nfa<S, T>) -> Self {
        let mut states: Vec<DfaState<S, T>> = Vec::new();
        let mut seen: HashMap<Vec<NodeId>, usize, ahash::RandomState> = HashMap::default();
        let mut queue: VecDeque<usize> = VecDeque::new();

        let start_set = nfa.epsilon_closure([nfa.start()]);
        states.push(DfaState {
            terminal: nfa.terminal_of(&start_set).cloned(),
            nfa_nodes: start_set.clone(),
            transitions: Vec::new(),
        });
        seen.insert(start_set, 0);
        queue.push_back(0);

        while let Some(id) = queue.pop_front() {
            let current = states[id].nfa_nodes.clone();
            let cover = nfa.cover_of(&current);
            for interval in cover {
                let moved = nfa.move_over(&current, interval);
                if moved.is_empty() {
                    continue;
                }
                let closure = nfa.epsilon_closure(moved);
                let next = match seen.get(&closure) {
                    Some(&existing) => existing,
                    None => {
                        let new_id = states.len();
                        states.push(DfaState {
                            terminal: nfa.terminal_of(&closure).cloned(),
                            nfa_nodes: closure.clone(),
                            transitions: Vec::new(),
                        });
                        seen.insert(closure, new_id);
                        queue.push_back(new_id);
                        new_id
                    }
                };
                states[id]
                    .transitions
                    .push(DfaTransition { chars: IntervalSet::from(interval), next });
            }
        }

        debug!("subset construction: {} dfa states", states.len());
        let mut dfa = Dfa { states, start: 0 };
        dfa.aggregate();
        dfa
    }

    /// Index of the start state.
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn states(&self) -> &[DfaState<S, T>] {
        &self.states
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Merge every state's parallel transitions: group by target, union the
    /// interval sets, emit one transition per distinct target in ascending
    /// target order.
    fn aggregate(&mut self) {
        for state in &mut self.states {
            if state.transitions.len() <= 1 {
                continue;
            }
            let mut by_target: BTreeMap<usize, IntervalSet<S>> = BTreeMap::new();
            for t in state.transitions.drain(..) {
                by_target.entry(t.next).or_default().extend(t.chars.iter());
            }
            state.transitions = by_target
                .into_iter()
                .map(|(next, chars)| DfaTransition { chars, next })
                .collect();
        }
    }

    pub(crate) fn take_states(self) -> (Vec<DfaState<S, T>>, usize) {
        (self.states, self.start)
    }
}
