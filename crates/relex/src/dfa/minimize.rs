//! Moore partition refinement.
//!
//! The initial partition groups states by terminal equivalence: non-terminal
//! states together, terminal states together per token. Each round then
//! splits blocks with a pivot walk until the partition is stable, after
//! which one representative per block survives and all transitions are
//! rewritten onto the representatives.

use std::collections::BTreeMap;

use log::debug;

use crate::dfa::{Dfa, DfaState};
use crate::error::GeneratorError;
use crate::interval::disjoint_cover;
use crate::symbol::Symbol;

impl<S: Symbol, T: Clone> Dfa<S, T> {
    /// Minimize the automaton in place and re-aggregate its transitions.
    ///
    /// Running this on an already minimal automaton changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InternalInvariant`] if refinement ever
    /// shrinks the partition - splitting can only grow it, so that indicates
    /// a bug in the pipeline rather than bad input.
    pub fn minimize(&mut self) -> Result<(), GeneratorError> {
        if self.states.is_empty() {
            return Ok(());
        }
        let state_count = self.states.len();

        // initial partition: terminal equivalence, keyed by precedence (ties
        // between distinct productions cannot occur, so the precedence alone
        // identifies the token)
        let mut by_terminal: BTreeMap<Option<u32>, Vec<usize>> = BTreeMap::new();
        for (id, state) in self.states.iter().enumerate() {
            let key = state.terminal.as_ref().map(|r| r.precedence);
            by_terminal.entry(key).or_default().push(id);
        }
        let mut blocks: Vec<Vec<usize>> = by_terminal.into_values().collect();
        let mut block_of: Vec<usize> = vec![0; state_count];

        loop {
            for (index, block) in blocks.iter().enumerate() {
                for &state in block {
                    block_of[state] = index;
                }
            }
            let mut refined: Vec<Vec<usize>> = Vec::with_capacity(blocks.len());
            for block in &blocks {
                let mut remaining: Vec<usize> = block.clone();
                while !remaining.is_empty() {
                    let pivot = remaining[0];
                    let mut same = Vec::new();
                    let mut rest = Vec::new();
                    for &candidate in &remaining {
                        if self.equivalent(pivot, candidate, &block_of) {
                            same.push(candidate);
                        } else {
                            rest.push(candidate);
                        }
                    }
                    refined.push(same);
                    remaining = rest;
                }
            }
            if refined.len() < blocks.len() {
                return Err(GeneratorError::InternalInvariant {
                    message: format!(
                        "partition refinement shrank from {} to {} blocks",
                        blocks.len(),
                        refined.len()
                    ),
                });
            }
            let stable = refined.len() == blocks.len();
            blocks = refined;
            if stable {
                break;
            }
        }

        self.rewrite_to_representatives(&blocks);
        debug!(
            "minimization: {} -> {} dfa states",
            state_count,
            self.states.len()
        );
        Ok(())
    }

    /// Are `p` and `q` indistinguishable under the current partition? The
    /// disjoint cover of just these two states' labels is sufficient: a
    /// symbol can only separate them at one of their own label boundaries.
    fn equivalent(&self, p: usize, q: usize, block_of: &[usize]) -> bool {
        if p == q {
            return true;
        }
        let labels = self.states[p]
            .transitions
            .iter()
            .chain(&self.states[q].transitions)
            .flat_map(|t| t.chars.iter());
        for interval in disjoint_cover(labels) {
            let target_p = self.target_over(p, &interval);
            let target_q = self.target_over(q, &interval);
            match (target_p, target_q) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if block_of[a] != block_of[b] {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }

    /// The unique target whose label contains the whole interval, if any.
    fn target_over(&self, state: usize, interval: &crate::interval::Interval<S>) -> Option<usize> {
        self.states[state]
            .transitions
            .iter()
            .find(|t| t.chars.contains(interval))
            .map(|t| t.next)
    }

    /// Keep one representative per block (the smallest state id), rewrite all
    /// transition targets onto representatives, renumber the survivors
    /// contiguously in ascending old-id order, and re-aggregate.
    fn rewrite_to_representatives(&mut self, blocks: &[Vec<usize>]) {
        let state_count = self.states.len();
        let mut representative: Vec<usize> = vec![0; state_count];
        for block in blocks {
            // blocks hold ascending ids, so the first entry is the smallest
            let rep = block[0];
            for &state in block {
                representative[state] = rep;
            }
        }

        let mut new_index: Vec<Option<usize>> = vec![None; state_count];
        let mut survivor_count = 0;
        for id in 0..state_count {
            if representative[id] == id {
                new_index[id] = Some(survivor_count);
                survivor_count += 1;
            }
        }

        if let Some(index) = new_index[representative[self.start]] {
            self.start = index;
        }
        let old_states = std::mem::take(&mut self.states);
        let mut survivors: Vec<DfaState<S, T>> = Vec::with_capacity(survivor_count);
        for (id, mut state) in old_states.into_iter().enumerate() {
            if new_index[id].is_none() {
                continue;
            }
            for t in &mut state.transitions {
                if let Some(index) = new_index[representative[t.next]] {
                    t.next = index;
                }
            }
            survivors.push(state);
        }
        self.states = survivors;
        self.aggregate();
    }
}

#[cfg(test)]
mod tests {
    use crate::dfa::Dfa;
    use crate::generator::Ranked;
    use crate::nfa::Nfa;
    use crate::regex::{parse, RegexExpr};

    fn minimized(patterns: &[&str]) -> Dfa<u8, usize> {
        let parsed: Vec<(Ranked<usize>, RegexExpr<u8>)> = patterns
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let precedence = u32::try_from(i).unwrap();
                (Ranked { precedence, info: i }, parse(p).unwrap())
            })
            .collect();
        let mut dfa = Dfa::from_nfa(Nfa::from_productions(&parsed));
        dfa.minimize().expect("minimization succeeds");
        dfa
    }

    #[test]
    fn equivalent_branches_collapse() {
        // both alternatives accept exactly two symbols from the same classes,
        // so the branch states are indistinguishable
        let dfa = minimized(&["ab|ab"]);
        assert_eq!(dfa.len(), 3);
    }

    #[test]
    fn star_of_alternation_has_three_states() {
        let dfa = minimized(&["(ab|ac)*"]);
        assert_eq!(dfa.len(), 3);
        assert!(dfa.states()[dfa.start()].terminal.is_some());
    }

    #[test]
    fn minimization_is_idempotent() {
        let mut dfa = minimized(&["-?(0|[1-9][0-9]*)", "[a-z_][a-z0-9_]*", "[ \t\r\n]+"]);
        let once = dfa.len();
        dfa.minimize().expect("second run succeeds");
        assert_eq!(dfa.len(), once);
    }

    #[test]
    fn distinct_tokens_do_not_collapse() {
        // same shape ([x]+ loops), but different tokens must stay apart
        let dfa = minimized(&["[ \t\n\r]+", "[a-z]+"]);
        let terminals: Vec<usize> = dfa
            .states()
            .iter()
            .filter_map(|s| s.terminal.as_ref().map(|r| r.info))
            .collect();
        assert!(terminals.contains(&0));
        assert!(terminals.contains(&1));
    }

    #[test]
    fn start_state_survives_merging() {
        let dfa = minimized(&["a*"]);
        // start accepts the empty string and loops on 'a'
        assert_eq!(dfa.len(), 1);
        assert!(dfa.states()[dfa.start()].terminal.is_some());
        assert_eq!(dfa.states()[0].transitions[0].next, dfa.start());
    }
}
