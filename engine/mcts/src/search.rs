//! The search agent.
//!
//! Each call runs the classic four-phase loop until the time budget expires:
//! 1. Selection: descend from the root by UCT to a leaf
//! 2. Expansion: add a child for every legal action of the leaf
//! 3. Simulation: play the most promising new child out with the rollout
//!    policy and classify the outcome as a win or loss
//! 4. Backpropagation: update play and win counters on every ancestor of the
//!    simulated node
//!
//! Between calls the tree is kept alive: the new root is looked up among the
//! descendants of the old one so earlier statistics keep steering the search.
//! A root whose best candidate line is already decided answers without
//! simulating at all, and a search that could not complete a single iteration
//! falls back to a one-ply heuristic choice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agent_core::{min_max_weights, GameState};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::{classify_win, RandomRollout, RolloutPolicy};
use crate::select::{heuristic_order, max_first, move_order, selection_order};
use crate::stats::SearchStatistics;
use crate::time::{CancelHandle, TimeBudget};
use crate::tree::SearchTree;

/// Errors that can occur when computing an action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("no legal actions available")]
    NoLegalActions,

    #[error("agent is not set up, call set_up first")]
    NotSetUp,
}

/// Monte Carlo tree search agent for one seat in a match.
pub struct MctsAgent<G: GameState, R: RolloutPolicy<G> = RandomRollout> {
    config: MctsConfig,
    tree: SearchTree<G>,
    rng: ChaCha20Rng,
    rollout: R,
    player_id: usize,
    num_players: usize,
    weights: Vec<f64>,
    cancelled: Arc<AtomicBool>,
    last_stats: SearchStatistics,
    ready: bool,
}

impl<G: GameState> MctsAgent<G> {
    /// Create an agent with the default uniform random playout policy.
    pub fn new(config: MctsConfig) -> Self {
        let rollout = RandomRollout::new(config.rollout_check_stride);
        Self::with_rollout(config, rollout)
    }
}

impl<G: GameState, R: RolloutPolicy<G>> MctsAgent<G, R> {
    /// Create an agent with a custom playout policy.
    pub fn with_rollout(config: MctsConfig, rollout: R) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(config.seed);
        Self {
            config,
            tree: SearchTree::new(),
            rng,
            rollout,
            player_id: 0,
            num_players: 0,
            weights: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
            last_stats: SearchStatistics::default(),
            ready: false,
        }
    }

    /// Prepare for a match as the given player.
    ///
    /// Derives the scoring weights, drops any tree from a previous match and
    /// reseeds the RNG so rematches with the same seed are reproducible.
    pub fn set_up(&mut self, num_players: usize, player_id: usize) {
        self.num_players = num_players;
        self.player_id = player_id;
        self.weights = min_max_weights(num_players, player_id as i32);
        self.tree.clear();
        self.rng = ChaCha20Rng::seed_from_u64(self.config.seed);
        self.ready = true;
        debug!(num_players, player_id, "agent set up");
    }

    /// Search the given state and return the action to play.
    ///
    /// Runs simulations until the budget expires, the configured simulation
    /// cap is reached, or the search is cancelled through its handle.
    pub fn compute_next_action(
        &mut self,
        state: &G,
        budget: Duration,
    ) -> Result<G::Action, SearchError> {
        if !self.ready {
            return Err(SearchError::NotSetUp);
        }

        self.cancelled.store(false, Ordering::Relaxed);
        let budget = TimeBudget::with_flag(budget, self.cancelled.clone());

        self.find_root(state);

        // A best candidate line that already reaches the end of the game
        // answers immediately
        if self.sort_promising_candidates() {
            trace!("best candidate line is decided, answering without search");
            let action = self.best_child_action();
            self.record_statistics(0, &budget);
            return action;
        }

        let mut simulations: u64 = 0;
        let log_interval = self.config.progress_log_interval.max(1);
        while !budget.should_stop() && !self.cap_reached(simulations) {
            if simulations % log_interval == 0 {
                let root = self.tree.get(self.tree.root());
                debug!(
                    simulations = root.plays,
                    confidence = 100.0 * root.win_rate(),
                    "search progress"
                );
            }

            let selected = self.select_leafward();
            self.expand(selected);
            let simulate_from = self.pick_simulation_node(selected);

            let outcome = self
                .rollout
                .rollout(self.tree.state(simulate_from), &mut self.rng, &budget);
            let win = classify_win(&outcome, self.player_id, &mut self.rng);

            self.backpropagate(simulate_from, win);
            simulations += 1;
        }

        self.record_statistics(simulations, &budget);

        if self.tree.is_leaf(self.tree.root()) {
            // Not a single iteration finished; pick the best immediate
            // successor by heuristic
            return self.greedy_action(state);
        }
        self.best_child_action()
    }

    /// Handle that aborts the current (or next) search from another thread.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::new(self.cancelled.clone())
    }

    /// Statistics of the most recent search call.
    pub fn last_statistics(&self) -> &SearchStatistics {
        &self.last_stats
    }

    /// The search tree, for inspection.
    pub fn tree(&self) -> &SearchTree<G> {
        &self.tree
    }

    /// Seat this agent was set up for.
    pub fn player_id(&self) -> usize {
        self.player_id
    }

    /// Number of players this agent was set up for.
    pub fn num_players(&self) -> usize {
        self.num_players
    }

    /// Root the tree at the given state.
    ///
    /// Looks for the state among the descendants of the current root at the
    /// depth its action count dictates, filtering by the last action record
    /// before comparing full states. A match keeps the subtree and its
    /// statistics; anything else starts a fresh tree.
    fn find_root(&mut self, state: &G) {
        if !self.tree.is_rooted() {
            trace!("rooting a fresh tree");
            self.tree.reset_root(state.clone());
            return;
        }

        let root = self.tree.root();
        let root_taken = self.tree.state(root).actions_taken();
        let target_taken = state.actions_taken();

        if target_taken < root_taken {
            trace!("state precedes the current root, resetting");
            self.tree.reset_root(state.clone());
            return;
        }

        // Candidates sit exactly this many levels below the current root
        let depth = target_taken - root_taken;
        let mut level = vec![root];
        for _ in 0..depth {
            level = level
                .iter()
                .flat_map(|&id| self.tree.children(id).iter().copied())
                .collect();
            if level.is_empty() {
                break;
            }
        }

        let target_record = state.previous_action_record();
        let matched = level.into_iter().find(|&id| {
            let node_state = self.tree.state(id);
            node_state.previous_action_record() == target_record && node_state == state
        });

        match matched {
            Some(id) => {
                self.tree.relocate_root_to(id);
                trace!(nodes = self.tree.len(), "relocated root to known state");
            }
            None => {
                self.tree.reset_root(state.clone());
                trace!("state not found in tree, reset");
            }
        }
    }

    /// Order every level of the best candidate line and follow it down.
    ///
    /// Own turns put the best move first, opponent and chance turns assume
    /// the worst. Returns whether the line ends in a finished game.
    fn sort_promising_candidates(&mut self) -> bool {
        let mut current = self.tree.root();
        loop {
            if self.tree.is_leaf(current) {
                return self.tree.state(current).is_over();
            }

            let own_turn = self.tree.state(current).current_player() == self.player_id as i32;
            let weights = &self.weights;
            if own_turn {
                self.tree
                    .sort_children_by(current, |a, b| move_order(b, a, weights));
            } else {
                self.tree
                    .sort_children_by(current, |a, b| move_order(a, b, weights));
            }
            current = self.tree.children(current)[0];
        }
    }

    /// Descend from the root to a leaf, taking the best sibling by UCT.
    fn select_leafward(&self) -> NodeId {
        let mut current = self.tree.root();
        while !self.tree.is_leaf(current) {
            let next = max_first(self.tree.children(current).iter().copied(), |&a, &b| {
                selection_order(
                    &self.tree,
                    a,
                    b,
                    self.config.exploitation_constant,
                    &self.weights,
                )
            });
            match next {
                Some(id) => current = id,
                None => break,
            }
        }
        current
    }

    /// Add a child for every legal action of a leaf.
    fn expand(&mut self, id: NodeId) {
        if !self.tree.is_leaf(id) {
            return;
        }

        let state = self.tree.state(id).clone();
        for action in state.possible_actions() {
            let child_state = state.apply(&action);
            self.tree.add_child(id, action, child_state);
        }
    }

    /// Choose the node to play out: the most promising fresh child, or the
    /// node itself when expansion added none.
    fn pick_simulation_node(&self, id: NodeId) -> NodeId {
        if self.tree.is_leaf(id) {
            return id;
        }
        max_first(self.tree.children(id).iter().copied(), |&a, &b| {
            selection_order(
                &self.tree,
                a,
                b,
                self.config.exploitation_constant,
                &self.weights,
            )
        })
        .unwrap_or(id)
    }

    /// Credit the outcome to every ancestor of the simulated node.
    fn backpropagate(&mut self, from: NodeId, win: bool) {
        let mut current = self.tree.parent(from);
        while current.is_some() {
            let node = self.tree.get_mut(current);
            node.record_play(win);
            current = node.parent;
        }
    }

    /// Best root child by the move ordering, mapped to its action.
    fn best_child_action(&self) -> Result<G::Action, SearchError> {
        let root = self.tree.root();
        let best = max_first(self.tree.children(root).iter().copied(), |&a, &b| {
            move_order(self.tree.get(a), self.tree.get(b), &self.weights)
        })
        .ok_or(SearchError::NoLegalActions)?;

        self.tree
            .get(best)
            .action
            .clone()
            .ok_or(SearchError::NoLegalActions)
    }

    /// One-ply lookahead by heuristic, for searches that never got started.
    fn greedy_action(&self, state: &G) -> Result<G::Action, SearchError> {
        let actions = state.possible_actions();
        max_first(actions.into_iter(), |a, b| {
            heuristic_order(&state.apply(a), &state.apply(b), &self.weights)
        })
        .ok_or(SearchError::NoLegalActions)
    }

    fn cap_reached(&self, simulations: u64) -> bool {
        self.config
            .max_simulations
            .map_or(false, |cap| simulations >= cap)
    }

    fn record_statistics(&mut self, simulations: u64, budget: &TimeBudget) {
        let tree_stats = self.tree.stats();
        self.last_stats = SearchStatistics {
            simulations,
            duration: budget.elapsed(),
            root_plays: tree_stats.root_plays,
            root_wins: tree_stats.root_wins,
            tree_nodes: tree_stats.total_nodes,
        };
        debug!(
            simulations,
            duration_ms = self.last_stats.duration.as_millis() as u64,
            nodes = self.last_stats.tree_nodes,
            root_plays = self.last_stats.root_plays,
            "search finished"
        );
    }
}
