//! Arena-backed search tree.
//!
//! Nodes live in a single vector owned by the tree and refer to each other
//! by [`NodeId`]. Parent links are plain indices, so path reconstruction
//! needs no shared ownership, and the whole tree is dropped with the search
//! call that built it.

/// Handle of a node inside a [`SearchTree`]
pub type NodeId = usize;

/// A discovered state together with how it was reached
#[derive(Debug, Clone)]
pub struct SearchNode<S, M> {
    pub state: S,
    pub parent: Option<NodeId>,
    pub mv: Option<M>,
    pub depth: usize,
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SearchTree<S, M> {
    nodes: Vec<SearchNode<S, M>>,
}

impl<S, M: Clone> SearchTree<S, M> {
    /// Create a tree holding only the root state (depth 0, no parent, no move).
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![SearchNode {
                state: root_state,
                parent: None,
                mv: None,
                depth: 0,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &SearchNode<S, M> {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree is created with its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `state`, reached from `parent` by `mv`, one level below its parent.
    pub fn attach_child(&mut self, parent: NodeId, state: S, mv: M) -> NodeId {
        let id = self.nodes.len();
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(SearchNode {
            state,
            parent: Some(parent),
            mv: Some(mv),
            depth,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Moves leading from the root to `id`, in playing order.
    ///
    /// Empty for the root itself.
    pub fn path_to(&self, id: NodeId) -> Vec<M> {
        let mut path = Vec::with_capacity(self.nodes[id].depth);
        let mut current = id;
        while let Some(node) = self.nodes.get(current) {
            let (Some(mv), Some(parent)) = (&node.mv, node.parent) else {
                break;
            };
            path.push(mv.clone());
            current = parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let tree: SearchTree<&str, char> = SearchTree::new("start");
        let root = tree.node(tree.root());
        assert_eq!(root.depth, 0);
        assert!(root.parent.is_none());
        assert!(root.mv.is_none());
        assert!(tree.path_to(tree.root()).is_empty());
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_attach_child_and_path() {
        let mut tree = SearchTree::new(0u32);
        let a = tree.attach_child(tree.root(), 1, 'a');
        let b = tree.attach_child(a, 2, 'b');
        let c = tree.attach_child(tree.root(), 3, 'c');
        let d = tree.attach_child(b, 4, 'd');

        assert_eq!(tree.node(d).depth, 3);
        assert_eq!(tree.node(c).depth, 1);
        assert_eq!(tree.node(tree.root()).children, vec![a, c]);
        assert_eq!(tree.node(a).children, vec![b]);

        assert_eq!(tree.path_to(d), vec!['a', 'b', 'd']);
        assert_eq!(tree.path_to(c), vec!['c']);
    }
}
