//! Arena-allocated search tree.
//!
//! Nodes live in a contiguous vector and refer to each other by index, so the
//! child-owns-nothing / parent-owns-children shape of the search tree needs no
//! reference counting, and re-rooting is an index reassignment. Nodes above a
//! new root simply become unreachable and are released with the arena.

use crate::process::DecisionProcess;

/// Index of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// One position in the search tree.
#[derive(Clone, Debug)]
pub struct Node<S: DecisionProcess> {
    /// State snapshot owned by this node.
    pub(crate) state: S,
    /// Cached `state.id()`, fixed at creation. A later mismatch with the live
    /// state is how in-place mutation by the process is detected.
    pub(crate) id: String,
    /// Perspective owner of this state, fixed at creation.
    pub(crate) player: S::Player,
    /// Running sum of playout scores credited to this node, signed by
    /// perspective.
    pub(crate) score: f64,
    /// Number of playouts that terminated at or passed through this node.
    pub(crate) visits: u64,
    /// Legal moves not yet expanded. `None` until first touched by expansion,
    /// then fixed for the node's lifetime; `tried` counts consumption.
    /// `Some(vec![])` is a terminal state and is distinct from `None`.
    pub(crate) untried: Option<Vec<S::Move>>,
    pub(crate) tried: usize,
    /// Children in expansion order, append only.
    pub(crate) children: Vec<NodeId>,
    /// Back-reference for score propagation; `None` for the root.
    pub(crate) parent: Option<NodeId>,
    /// Distance from the root at creation time.
    pub(crate) depth: u32,
}

impl<S: DecisionProcess> Node<S> {
    fn new(state: S, parent: Option<NodeId>, depth: u32) -> Self {
        let id = state.id();
        let player = state.player();
        Self {
            state,
            id,
            player,
            score: 0.0,
            visits: 0,
            untried: None,
            tried: 0,
            children: Vec::new(),
            parent,
            depth,
        }
    }

    /// True once the move list is populated and every entry consumed.
    pub(crate) fn fully_expanded(&self) -> bool {
        match &self.untried {
            Some(moves) => self.tried == moves.len(),
            None => false,
        }
    }

    pub fn visits(&self) -> u64 {
        self.visits
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

/// Node arena plus the index of the current root.
#[derive(Clone, Debug)]
pub struct Tree<S: DecisionProcess> {
    nodes: Vec<Node<S>>,
    root: NodeId,
}

impl<S: DecisionProcess> Tree<S> {
    pub(crate) fn new(initial: S) -> Self {
        Self {
            nodes: vec![Node::new(initial, None, 0)],
            root: NodeId(0),
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<S> {
        &mut self.nodes[id.0]
    }

    /// Append a child of `parent`, returning its id.
    pub(crate) fn add_child(&mut self, parent: NodeId, state: S) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(state, Some(parent), depth));
        self.get_mut(parent).children.push(id);
        id
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node<S> {
        self.get(self.root)
    }

    /// Number of nodes ever created, including any detached by re-rooting.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Make `id` the root, severing its parent link. Accumulated statistics
    /// of the node and its subtree are preserved; former ancestors become
    /// unreachable.
    pub(crate) fn reroot(&mut self, id: NodeId) {
        self.get_mut(id).parent = None;
        self.root = id;
    }

    /// Depth-first search of the reachable tree for a state identity.
    pub(crate) fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let node = self.get(current);
            if node.id == id {
                return Some(current);
            }
            stack.extend(node.children.iter().copied());
        }
        None
    }

    /// Child ids of a node, in expansion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{DecisionProcess, Outcome};
    use rand::Rng;

    // A counter that can only go up, enough to exercise the arena.
    #[derive(Clone, Debug)]
    struct Counter(u8);

    impl DecisionProcess for Counter {
        type Player = ();
        type Move = u8;

        fn legal_moves(&self) -> Vec<u8> {
            vec![1, 2]
        }

        fn apply<R: Rng>(&self, mv: &u8, _rng: &mut R) -> Option<Self> {
            Some(Counter(self.0 + mv))
        }

        fn simulate<R: Rng>(&self, _rng: &mut R) -> Outcome<()> {
            Outcome {
                score: f64::from(self.0),
                winner: (),
                player: (),
            }
        }

        fn id(&self) -> String {
            self.0.to_string()
        }

        fn player(&self) {}
    }

    #[test]
    fn new_tree_has_single_root() {
        let tree = Tree::new(Counter(0));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_node().id(), "0");
        assert_eq!(tree.root_node().parent, None);
        assert_eq!(tree.root_node().depth, 0);
        // Nodes stay debug-printable through the generic state.
        assert!(format!("{:?}", tree.root_node()).contains("visits: 0"));
    }

    #[test]
    fn add_child_links_both_ways() {
        let mut tree = Tree::new(Counter(0));
        let root = tree.root();
        let child = tree.add_child(root, Counter(1));

        assert_eq!(tree.children(root), &[child]);
        assert_eq!(tree.get(child).parent, Some(root));
        assert_eq!(tree.get(child).depth, 1);
    }

    #[test]
    fn find_by_id_walks_the_whole_tree() {
        let mut tree = Tree::new(Counter(0));
        let root = tree.root();
        let a = tree.add_child(root, Counter(1));
        let b = tree.add_child(root, Counter(2));
        let grandchild = tree.add_child(a, Counter(3));

        assert_eq!(tree.find_by_id("3"), Some(grandchild));
        assert_eq!(tree.find_by_id("2"), Some(b));
        assert_eq!(tree.find_by_id("9"), None);
    }

    #[test]
    fn reroot_detaches_and_hides_ancestors() {
        let mut tree = Tree::new(Counter(0));
        let root = tree.root();
        let a = tree.add_child(root, Counter(1));
        let grandchild = tree.add_child(a, Counter(3));

        tree.get_mut(a).visits = 7;
        tree.reroot(a);

        assert_eq!(tree.root(), a);
        assert_eq!(tree.root_node().parent, None);
        assert_eq!(tree.root_node().visits(), 7);
        // The old root is no longer reachable by identity search.
        assert_eq!(tree.find_by_id("0"), None);
        assert_eq!(tree.find_by_id("3"), Some(grandchild));
    }
}
