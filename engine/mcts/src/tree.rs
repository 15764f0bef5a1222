//! Search tree with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices,
//! giving cache-friendly traversal without reference cycles. The tree starts
//! empty and is rooted by the first search; later searches either relocate the
//! root to a descendant (keeping its subtree statistics) or reset it.

use agent_core::GameState;
use std::collections::VecDeque;

use crate::node::{NodeId, SearchNode};

/// Search tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct SearchTree<G: GameState> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<G>>,

    /// Root node index (NONE while the tree is empty)
    root: NodeId,
}

impl<G: GameState> SearchTree<G> {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NodeId::NONE,
        }
    }

    /// Remove all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NodeId::NONE;
    }

    /// Whether the tree currently has a root node.
    #[inline]
    pub fn is_rooted(&self) -> bool {
        self.root.is_some()
    }

    /// Get the root node ID (NONE while the tree is empty).
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<G> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<G> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the game state stored at a node.
    #[inline]
    pub fn state(&self, id: NodeId) -> &G {
        &self.get(id).state
    }

    /// Get the parent of a node (NONE for the root).
    #[inline]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).parent
    }

    /// Get the children of a node.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Check if a node has no children.
    #[inline]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_leaf()
    }

    /// Check if a node is the current root.
    #[inline]
    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Discard every node and root a fresh tree at the given state.
    pub fn reset_root(&mut self, state: G) -> NodeId {
        self.nodes.clear();
        self.nodes.push(SearchNode::new_root(state));
        self.root = NodeId(0);
        self.root
    }

    /// Add a child to a parent node and return the new child's ID.
    pub fn add_child(&mut self, parent_id: NodeId, action: G::Action, state: G) -> NodeId {
        let child_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new_child(parent_id, action, state));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Make a descendant the new root, keeping its whole subtree.
    ///
    /// The subtree is copied into a fresh arena in breadth-first order so the
    /// abandoned part of the old tree is freed. Play and win counters survive
    /// the move.
    pub fn relocate_root_to(&mut self, new_root: NodeId) {
        if new_root == self.root {
            return;
        }

        let mut compacted: Vec<SearchNode<G>> = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back((new_root, NodeId::NONE));

        while let Some((old_id, new_parent)) = queue.pop_front() {
            let old = &self.nodes[old_id.0 as usize];
            let new_id = NodeId(compacted.len() as u32);

            compacted.push(SearchNode {
                parent: new_parent,
                action: old.action.clone(),
                state: old.state.clone(),
                plays: old.plays,
                wins: old.wins,
                children: Vec::new(),
            });

            if new_parent.is_some() {
                compacted[new_parent.0 as usize].children.push(new_id);
            }

            for &child in &old.children {
                queue.push_back((child, new_id));
            }
        }

        self.nodes = compacted;
        self.root = NodeId(0);
    }

    /// Sort the children of a node with a comparator over the child nodes.
    pub fn sort_children_by<F>(&mut self, id: NodeId, mut compare: F)
    where
        F: FnMut(&SearchNode<G>, &SearchNode<G>) -> std::cmp::Ordering,
    {
        let mut children = std::mem::take(&mut self.nodes[id.0 as usize].children);
        children.sort_by(|&a, &b| compare(&self.nodes[a.0 as usize], &self.nodes[b.0 as usize]));
        self.nodes[id.0 as usize].children = children;
    }

    /// Get statistics about the tree for logging and tests.
    pub fn stats(&self) -> TreeStats {
        if !self.is_rooted() {
            return TreeStats::default();
        }

        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_plays: root.plays,
            root_wins: root.wins,
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|&id| self.compute_max_depth(id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

impl<G: GameState> Default for SearchTree<G> {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone, Default)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_plays: u32,
    pub root_wins: u32,
    pub max_depth: u32,
}
