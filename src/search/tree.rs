//! Arena-based search tree.
//!
//! Every state a search admits is stored once in a flat `Vec`, linked to its
//! parent by index. The frontier only holds `NodeId`s, and a path is
//! recovered by walking parents and reading each state's `last_move`.

use crate::core::Move;
use crate::rules::GameView;

/// Index into the `SearchTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

/// A state together with how it was reached.
#[derive(Clone, Debug)]
pub struct SearchNode<S> {
    pub state: S,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Moves from the root.
    pub depth: u16,
}

/// Flat arena of search nodes. The root is always node 0.
#[derive(Clone, Debug)]
pub struct SearchTree<S> {
    nodes: Vec<SearchNode<S>>,
}

impl<S: GameView> SearchTree<S> {
    /// Create a tree holding only `root`.
    pub fn new(root: S) -> Self {
        let mut nodes = Vec::with_capacity(1024);
        nodes.push(SearchNode {
            state: root,
            parent: NodeId::NONE,
            depth: 0,
        });
        Self { nodes }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    #[must_use]
    pub fn state(&self, id: NodeId) -> &S {
        &self.get(id).state
    }

    /// Add a child of `parent`, returning its ID.
    pub fn alloc(&mut self, state: S, parent: NodeId) -> NodeId {
        let depth = self.get(parent).depth.saturating_add(1);
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(SearchNode { state, parent, depth });
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves leading from the root to `id`, in play order.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.get(id).depth as usize);
        let mut current = id;
        while !current.is_none() {
            let node = self.get(current);
            if node.parent.is_none() {
                break;
            }
            if let Some(mv) = node.state.last_move() {
                moves.push(*mv);
            }
            current = node.parent;
        }
        moves.reverse();
        moves
    }
}
