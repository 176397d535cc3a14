//! Traversal iterators over the tree.
//!
//! Each accessor on [`Tree`][crate::Tree] hands out a fresh iterator
//! borrowing the tree, so every traversal is lazy, finite, and restartable:
//! drop one and ask again to start over from the root.

use std::collections::VecDeque;

use generational_arena::{Arena, Index};

use crate::tree::Node;

/// Breadth-first traversal: the root first, then each deeper level left to
/// right. Backed by a queue of pending nodes.
pub struct LevelOrder<'a, K> {
    nodes: &'a Arena<Node<K>>,
    queue: VecDeque<Index>,
}

impl<'a, K> LevelOrder<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Option<Index>) -> Self {
        Self {
            nodes,
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for LevelOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let front = self.queue.pop_front()?;
        let node = &self.nodes[front];
        if let Some(left) = node.left {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right {
            self.queue.push_back(right);
        }
        Some(&node.key)
    }
}

/// Depth-first traversal visiting left subtree, node, right subtree.
///
/// Over a valid tree this yields keys in ascending comparator order, which
/// is the property the randomized tests lean on.
pub struct InOrder<'a, K> {
    nodes: &'a Arena<Node<K>>,
    stack: Vec<Index>,
    /// Next subtree whose left spine still has to be pushed.
    pending: Option<Index>,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Option<Index>) -> Self {
        Self {
            nodes,
            stack: Vec::new(),
            pending: root,
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        while let Some(n) = self.pending {
            self.stack.push(n);
            self.pending = self.nodes[n].left;
        }
        let n = self.stack.pop()?;
        self.pending = self.nodes[n].right;
        Some(&self.nodes[n].key)
    }
}

/// Depth-first traversal visiting each node before either of its subtrees.
pub struct PreOrder<'a, K> {
    nodes: &'a Arena<Node<K>>,
    stack: Vec<Index>,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Option<Index>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let n = self.stack.pop()?;
        let node = &self.nodes[n];
        // Right pushed first so the left subtree pops first.
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some(&node.key)
    }
}

/// Depth-first traversal visiting both subtrees before the node itself, so
/// the root comes out last.
pub struct PostOrder<'a, K> {
    nodes: &'a Arena<Node<K>>,
    /// The flag marks nodes whose subtrees are already on the stack.
    stack: Vec<(Index, bool)>,
}

impl<'a, K> PostOrder<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Option<Index>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().map(|n| (n, false)).collect(),
        }
    }
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        while let Some((n, expanded)) = self.stack.pop() {
            if expanded {
                return Some(&self.nodes[n].key);
            }
            self.stack.push((n, true));
            let node = &self.nodes[n];
            if let Some(right) = node.right {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left {
                self.stack.push((left, false));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::Tree;

    /// An eleven-key tree covering every rotation case on the way in. The
    /// AVL rebalancing settles it into this shape:
    ///
    /// ```text
    ///             183
    ///         /         \
    ///      142           342
    ///     /   \         /    \
    ///   102   157     206    523
    ///         /          \   /  \
    ///       149         301 444 607
    /// ```
    fn reference_tree() -> Tree<i32> {
        let mut tree = Tree::with_root(342);
        for key in [206, 444, 523, 607, 301, 142, 183, 102, 157, 149] {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn level_order_visits_level_by_level() {
        let tree = reference_tree();
        let keys: Vec<i32> = tree.level_order().copied().collect();
        assert_eq!(
            keys,
            [183, 142, 342, 102, 157, 206, 523, 149, 301, 444, 607]
        );
    }

    #[test]
    fn in_order_is_ascending() {
        let tree = reference_tree();
        let keys: Vec<i32> = tree.in_order().copied().collect();
        assert_eq!(
            keys,
            [102, 142, 149, 157, 183, 206, 301, 342, 444, 523, 607]
        );
    }

    #[test]
    fn pre_order_visits_parents_first() {
        let tree = reference_tree();
        let keys: Vec<i32> = tree.pre_order().copied().collect();
        assert_eq!(
            keys,
            [183, 142, 102, 157, 149, 342, 206, 301, 523, 444, 607]
        );
    }

    #[test]
    fn post_order_visits_parents_last() {
        let tree = reference_tree();
        let keys: Vec<i32> = tree.post_order().copied().collect();
        assert_eq!(
            keys,
            [102, 149, 157, 142, 301, 206, 444, 607, 523, 342, 183]
        );
    }

    #[test]
    fn traversals_restart_from_the_root() {
        let tree = reference_tree();

        let first: Vec<i32> = tree.in_order().copied().collect();
        let second: Vec<i32> = tree.in_order().copied().collect();
        assert_eq!(first, second);

        let mut level = tree.level_order();
        assert_eq!(level.next(), Some(&183));
        drop(level);
        assert_eq!(tree.level_order().next(), Some(&183));
    }

    #[test]
    fn traversals_of_an_empty_tree_are_empty() {
        let tree: Tree<i32> = Tree::new();

        assert_eq!(tree.level_order().next(), None);
        assert_eq!(tree.in_order().next(), None);
        assert_eq!(tree.pre_order().next(), None);
        assert_eq!(tree.post_order().next(), None);
    }

    #[test]
    fn single_node_traversals_agree() {
        let tree = Tree::with_root(7);

        assert_eq!(tree.level_order().copied().collect::<Vec<i32>>(), [7]);
        assert_eq!(tree.in_order().copied().collect::<Vec<i32>>(), [7]);
        assert_eq!(tree.pre_order().copied().collect::<Vec<i32>>(), [7]);
        assert_eq!(tree.post_order().copied().collect::<Vec<i32>>(), [7]);
    }
}
