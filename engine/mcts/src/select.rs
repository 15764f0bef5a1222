//! Comparators driving tree descent and final move choice.
//!
//! Selection during search ranks siblings by UCT with the state heuristic as
//! tie-breaker. The final move choice ranks root children by decided outcome
//! first, then play count, then win count, then the heuristic. Ties keep the
//! earliest candidate, so insertion order decides between true duplicates.

use agent_core::GameState;
use std::cmp::Ordering;

use crate::node::{NodeId, SearchNode};
use crate::tree::SearchTree;

/// UCT score for a node with the given counters.
///
/// `wins / plays + exploitation * sqrt(ln(parent_plays) / plays)`, with both
/// play counts floored at one so unvisited nodes score finitely instead of
/// producing NaN.
#[inline]
pub fn uct_score(wins: u32, plays: u32, parent_plays: u32, exploitation: f64) -> f64 {
    let n = plays.max(1) as f64;
    let parent_n = parent_plays.max(1) as f64;
    wins as f64 / n + exploitation * (parent_n.ln() / n).sqrt()
}

/// UCT score of a tree node, reading the parent's play count from the tree.
///
/// The root has no parent and uses its own play count in place of the
/// parent's.
pub fn node_uct<G: GameState>(tree: &SearchTree<G>, id: NodeId, exploitation: f64) -> f64 {
    let node = tree.get(id);
    let parent = node.parent;
    let parent_plays = if parent.is_some() {
        tree.get(parent).plays
    } else {
        node.plays
    };
    uct_score(node.wins, node.plays, parent_plays, exploitation)
}

/// Ordering of two sibling nodes during tree descent.
///
/// Higher UCT wins; equal UCT falls back to the heuristic comparison of the
/// two states.
pub fn selection_order<G: GameState>(
    tree: &SearchTree<G>,
    a: NodeId,
    b: NodeId,
    exploitation: f64,
    weights: &[f64],
) -> Ordering {
    let uct_a = node_uct(tree, a, exploitation);
    let uct_b = node_uct(tree, b, exploitation);

    uct_a
        .partial_cmp(&uct_b)
        .unwrap_or(Ordering::Equal)
        .then_with(|| heuristic_order(tree.state(a), tree.state(b), weights))
}

/// Ordering of two states by their weighted heuristic value.
pub fn heuristic_order<G: GameState>(a: &G, b: &G, weights: &[f64]) -> Ordering {
    a.heuristic_value(weights)
        .partial_cmp(&b.heuristic_value(weights))
        .unwrap_or(Ordering::Equal)
}

/// Weighted utility of a state if its outcome is decided, 0.0 otherwise.
///
/// Under min-max weights this pushes proven wins above every undecided
/// candidate and proven losses below them, regardless of visit counts.
fn decided_value<G: GameState>(state: &G, weights: &[f64]) -> f64 {
    if state.is_over() {
        state.utility_value(weights)
    } else {
        0.0
    }
}

/// Ordering of two candidate moves for the final answer.
///
/// Ranks by decided outcome, then play count, then win count, then the state
/// heuristic.
pub fn move_order<G: GameState>(
    a: &SearchNode<G>,
    b: &SearchNode<G>,
    weights: &[f64],
) -> Ordering {
    decided_value(&a.state, weights)
        .partial_cmp(&decided_value(&b.state, weights))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.plays.cmp(&b.plays))
        .then_with(|| a.wins.cmp(&b.wins))
        .then_with(|| heuristic_order(&a.state, &b.state, weights))
}

/// Maximum of an iterator that keeps the FIRST maximal element on ties.
///
/// `Iterator::max_by` keeps the last maximal element; candidate lists here are
/// ranked best-first, so ties must resolve to the earliest entry.
pub fn max_first<T, I, F>(mut items: I, mut compare: F) -> Option<T>
where
    I: Iterator<Item = T>,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut best = items.next()?;
    for item in items {
        if compare(&item, &best) == Ordering::Greater {
            best = item;
        }
    }
    Some(best)
}
