//! Search tree node representation.
//!
//! Each node holds the game state reached by taking an action from the parent,
//! plus the play and win counters the selection and move comparators read.

use agent_core::GameState;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<G: GameState> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from the parent (None for root)
    pub action: Option<G::Action>,

    /// Game state at this node
    pub state: G,

    /// Number of simulations that passed through this node
    pub plays: u32,

    /// Number of those simulations that ended in a win
    pub wins: u32,

    /// Children in insertion order until a sort reorders them.
    /// Empty until the node is expanded.
    pub children: Vec<NodeId>,
}

impl<G: GameState> SearchNode<G> {
    /// Create a new root node.
    pub fn new_root(state: G) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            plays: 0,
            wins: 0,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: G::Action, state: G) -> Self {
        Self {
            parent,
            action: Some(action),
            state,
            plays: 0,
            wins: 0,
            children: Vec::new(),
        }
    }

    /// Record one simulation through this node.
    #[inline]
    pub fn record_play(&mut self, win: bool) {
        self.plays += 1;
        if win {
            self.wins += 1;
        }
    }

    /// Fraction of simulations through this node that were wins.
    /// Returns 0.0 if never played.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.plays == 0 {
            0.0
        } else {
            self.wins as f64 / self.plays as f64
        }
    }

    /// Check if this node has no children yet.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
