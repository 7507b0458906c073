//! # NFA Construction
//!
//! Thompson construction over interval-set labels, with one shared start node
//! for all productions.
//!
//! ## Overview
//!
//! Nodes live in an arena (`Vec` indexed by [`NodeId`]); transitions reference
//! ids, never pointers, so the graph may freely contain the back-edges the
//! quantifiers introduce, node-set equality is cheap, and the whole graph is
//! dropped at once when subset construction has consumed it.
//!
//! Each regex AST node expands into a `(begin, end)` segment:
//!
//! - `Chars(set)` - a single labeled edge
//! - `Seq` - child segments chained end-to-begin with ε-edges
//! - `Choice` - fresh begin/end with ε-edges fanning out and back in
//! - `Repeat` - fresh begin/end around the child, with a back ε-edge for
//!   `+`/`*` and a bypass ε-edge for `*`/`?`
//!
//! The multi-production graph adds a fresh start node with an ε-edge to every
//! production's `begin`; every production's `end` carries that production's
//! token, ranked by declaration order.

use log::debug;
use smallvec::SmallVec;

use crate::generator::Ranked;
use crate::interval::{disjoint_cover, Interval, IntervalSet};
use crate::regex::{RegexExpr, RepeatKind};
use crate::symbol::Symbol;

/// Arena index of an NFA node.
pub type NodeId = usize;

/// An outgoing NFA edge: either an ε-transition or an interval-set label.
#[derive(Debug, Clone)]
pub enum NfaTransition<S> {
    Epsilon(NodeId),
    Chars { set: IntervalSet<S>, next: NodeId },
}

impl<S> NfaTransition<S> {
    #[inline]
    #[must_use]
    pub fn next(&self) -> NodeId {
        match self {
            Self::Epsilon(next) | Self::Chars { next, .. } => *next,
        }
    }
}

/// One NFA node: outgoing transitions plus an optional terminal marker.
#[derive(Debug, Clone)]
pub struct NfaNode<S, T> {
    pub transitions: SmallVec<[NfaTransition<S>; 4]>,
    pub terminal: Option<Ranked<T>>,
}

/// The nondeterministic automaton for a whole production list.
#[derive(Debug)]
pub struct Nfa<S, T> {
    nodes: Vec<NfaNode<S, T>>,
    start: NodeId,
}

impl<S: Symbol, T: Clone> Nfa<S, T> {
    /// Build one NFA from all productions, joined under a fresh start node.
    #[must_use]
    pub fn from_productions(productions: &[(Ranked<T>, RegexExpr<S>)]) -> Self {
        let mut nfa = Nfa { nodes: Vec::new(), start: 0 };
        let start = nfa.push_node();
        nfa.start = start;
        for (token, expr) in productions {
            let (begin, end) = nfa.thompson(expr);
            nfa.nodes[start].transitions.push(NfaTransition::Epsilon(begin));
            nfa.nodes[end].terminal = Some(token.clone());
        }
        debug!(
            "thompson construction: {} productions, {} nfa nodes",
            productions.len(),
            nfa.nodes.len()
        );
        nfa
    }

    fn push_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(NfaNode { transitions: SmallVec::new(), terminal: None });
        id
    }

    fn link(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from].transitions.push(NfaTransition::Epsilon(to));
    }

    /// Expand one AST node into a `(begin, end)` segment.
    fn thompson(&mut self, expr: &RegexExpr<S>) -> (NodeId, NodeId) {
        match expr {
            RegexExpr::Chars(set) => {
                let begin = self.push_node();
                let end = self.push_node();
                self.nodes[begin]
                    .transitions
                    .push(NfaTransition::Chars { set: set.clone(), next: end });
                (begin, end)
            }
            RegexExpr::Seq(items) => {
                let mut iter = items.iter();
                let Some(first) = iter.next() else {
                    // an empty sequence matches the empty string
                    let node = self.push_node();
                    return (node, node);
                };
                let (begin, mut last) = self.thompson(first);
                for item in iter {
                    let (child_begin, child_end) = self.thompson(item);
                    self.link(last, child_begin);
                    last = child_end;
                }
                (begin, last)
            }
            RegexExpr::Choice(alts) => {
                let begin = self.push_node();
                let end = self.push_node();
                for alt in alts {
                    let (alt_begin, alt_end) = self.thompson(alt);
                    self.link(begin, alt_begin);
                    self.link(alt_end, end);
                }
                (begin, end)
            }
            RegexExpr::Repeat { expr, kind } => {
                let (child_begin, child_end) = self.thompson(expr);
                let begin = self.push_node();
                let end = self.push_node();
                match kind {
                    RepeatKind::Plus => {
                        self.link(child_end, child_begin);
                    }
                    RepeatKind::Star => {
                        self.link(begin, end);
                        self.link(child_end, child_begin);
                    }
                    RepeatKind::Optional => {
                        self.link(begin, end);
                    }
                }
                self.link(begin, child_begin);
                self.link(child_end, end);
                (begin, end)
            }
        }
    }

    /// The single start node.
    #[inline]
    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NfaNode<S, T> {
        &self.nodes[id]
    }

    /// Number of nodes in the arena.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes reachable from `seed` using only ε-transitions, the seed
    /// included. The result is sorted, which makes it usable as a map key.
    #[must_use]
    pub fn epsilon_closure<I>(&self, seed: I) -> Vec<NodeId>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut visited = vec![false; self.nodes.len()];
        let mut queue: Vec<NodeId> = Vec::new();
        for id in seed {
            if !visited[id] {
                visited[id] = true;
                queue.push(id);
            }
        }
        let mut cursor = 0;
        while cursor < queue.len() {
            let id = queue[cursor];
            cursor += 1;
            for t in &self.nodes[id].transitions {
                if let NfaTransition::Epsilon(next) = t {
                    if !visited[*next] {
                        visited[*next] = true;
                        queue.push(*next);
                    }
                }
            }
        }
        queue.sort_unstable();
        queue
    }

    /// Generalized `move(T, a)`: the targets of every labeled transition out
    /// of `states` whose label contains the whole cover interval. Sorted and
    /// deduplicated.
    #[must_use]
    pub fn move_over(&self, states: &[NodeId], interval: Interval<S>) -> Vec<NodeId> {
        let mut moved: Vec<NodeId> = Vec::new();
        for &id in states {
            for t in &self.nodes[id].transitions {
                if let NfaTransition::Chars { set, next } = t {
                    if set.contains(&interval) {
                        moved.push(*next);
                    }
                }
            }
        }
        moved.sort_unstable();
        moved.dedup();
        moved
    }

    /// The disjoint cover of all label intervals out of `states`.
    #[must_use]
    pub fn cover_of(&self, states: &[NodeId]) -> Vec<Interval<S>> {
        let mut labels = Vec::new();
        for &id in states {
            for t in &self.nodes[id].transitions {
                if let NfaTransition::Chars { set, .. } = t {
                    labels.extend(set.iter());
                }
            }
        }
        disjoint_cover(labels)
    }

    /// The terminal marker for a set of NFA nodes: the token with the smallest
    /// precedence among contained terminal nodes, so that the production
    /// declared first wins.
    #[must_use]
    pub fn terminal_of(&self, states: &[NodeId]) -> Option<&Ranked<T>> {
        states
            .iter()
            .filter_map(|&id| self.nodes[id].terminal.as_ref())
            .min_by_key(|ranked| ranked.precedence)
    }
}
