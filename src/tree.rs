//! The height-balanced tree itself.
//!
//! Nodes are stored in a [`generational_arena::Arena`] and refer to their
//! parent and children by arena [`Index`]. The parent link exists purely so
//! mutations can walk back toward the root re-checking balance factors; it
//! never implies ownership, which is what makes the index representation
//! work without reference counting or unsafe pointer juggling.

use std::cmp::Ordering;
use std::mem;

use generational_arena::{Arena, Index};

use crate::cmp::{Comparator, NaturalOrder};
use crate::error::Error;
use crate::iter::{InOrder, LevelOrder, PostOrder, PreOrder};

/// A single tree vertex: its key, the cached height of the subtree below
/// it (a leaf has height 1), and index links to its relatives.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Option<Index>,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
    pub(crate) height: usize,
}

impl<K> Node<K> {
    fn new(key: K, parent: Option<Index>) -> Self {
        Self {
            key,
            parent,
            left: None,
            right: None,
            height: 1,
        }
    }
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree) storing
/// a set of totally-ordered keys.
///
/// Every mutation descends from the root, edits at a leaf or at the target
/// node, then walks the parent links back up re-checking each ancestor's
/// balance factor and rotating where it reaches ±2. Both insertion and
/// removal leave every node's balance factor in `{-1, 0, 1}`.
///
/// Keys are compared through a [`Comparator`] fixed at construction time;
/// [`NaturalOrder`] (the default) uses the key's own [`Ord`].
///
/// # Examples
///
/// ```
/// use avl_tree::Tree;
///
/// let mut tree = Tree::new();
///
/// tree.insert(5);
/// tree.insert(3);
/// tree.insert(8);
///
/// assert!(tree.contains(&3));
/// assert!(!tree.contains(&7));
///
/// // In-order traversal of a BST is always sorted.
/// let keys: Vec<i32> = tree.in_order().copied().collect();
/// assert_eq!(keys, [3, 5, 8]);
/// ```
#[derive(Clone, Debug)]
pub struct Tree<K, C = NaturalOrder> {
    nodes: Arena<Node<K>>,
    root: Option<Index>,
    cmp: C,
}

impl<K: Ord> Tree<K> {
    /// Generates a new, empty `Tree` ordered by the key's [`Ord`].
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Generates a `Tree` seeded with a single root key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let tree = Tree::with_root(42);
    /// assert!(tree.contains(&42));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn with_root(key: K) -> Self {
        let mut tree = Self::new();
        tree.insert(key);
        tree
    }
}

impl<K, C> Default for Tree<K, C>
where
    C: Comparator<K> + Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, C: Comparator<K>> Tree<K, C> {
    /// Generates a new, empty `Tree` that orders keys with `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use avl_tree::{Comparator, Tree};
    ///
    /// struct ByLength;
    /// impl Comparator<&str> for ByLength {
    ///     fn compare(&self, a: &&str, b: &&str) -> Ordering {
    ///         a.len().cmp(&b.len())
    ///     }
    /// }
    ///
    /// let mut tree = Tree::with_comparator(ByLength);
    /// tree.insert("kiwi");
    /// tree.insert("fig");
    /// tree.insert("banana");
    ///
    /// let keys: Vec<&str> = tree.in_order().copied().collect();
    /// assert_eq!(keys, ["fig", "kiwi", "banana"]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            cmp,
        }
    }

    /// Inserts the given key, returning whether the tree changed. Inserting
    /// a key that compares equal to a stored one is a no-op returning
    /// `false` - equal keys are never routed into a subtree, so no
    /// duplicate node is ever created.
    ///
    /// After the new leaf is linked, every ancestor from its parent up to
    /// the root gets exactly one balance check, and a rotation wherever the
    /// balance factor reaches ±2.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let Some(mut cur) = self.root else {
            self.root = Some(self.nodes.insert(Node::new(key, None)));
            return true;
        };

        let parent = loop {
            match self.cmp.compare(&key, &self.nodes[cur].key) {
                Ordering::Equal => return false,
                Ordering::Less => match self.nodes[cur].left {
                    Some(left) => cur = left,
                    None => {
                        let leaf = self.nodes.insert(Node::new(key, Some(cur)));
                        self.nodes[cur].left = Some(leaf);
                        break cur;
                    }
                },
                Ordering::Greater => match self.nodes[cur].right {
                    Some(right) => cur = right,
                    None => {
                        let leaf = self.nodes.insert(Node::new(key, Some(cur)));
                        self.nodes[cur].right = Some(leaf);
                        break cur;
                    }
                },
            }
        };

        self.rebalance_path(parent);
        true
    }

    /// Returns whether a key comparing equal to `key` is stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2);
    ///
    /// assert!(tree.contains(&2));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes the node with the given key, returning whether one was
    /// found. Removing an absent key is a no-op returning `false` and
    /// leaves the tree untouched.
    ///
    /// A node with two children trades keys with its in-order successor
    /// (the minimum of its right subtree) and the successor, which has at
    /// most one child, is spliced out instead. The ancestors of the splice
    /// point are then re-balance-checked bottom-up, so the balance
    /// invariant also holds after removals.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(10);
    /// tree.insert(5);
    /// tree.insert(15);
    ///
    /// assert!(tree.remove(&5));
    /// assert!(!tree.remove(&5));
    ///
    /// assert!(!tree.contains(&5));
    /// let keys: Vec<i32> = tree.in_order().copied().collect();
    /// assert_eq!(keys, [10, 15]);
    /// ```
    pub fn remove(&mut self, key: &K) -> bool {
        match self.find(key) {
            Some(n) => {
                self.remove_node(n);
                true
            }
            None => false,
        }
    }

    /// Returns the key of the lowest common ancestor of `a` and `b`: the
    /// deepest node whose subtree contains both keys. A key is considered
    /// its own ancestor, so `common_ancestor(&x, &y)` where `x` lies on the
    /// path to `y` returns `x`.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] when the tree has no nodes, and
    /// [`Error::KeyNotFound`] when either key is absent - an absent key has
    /// no ancestors, and answering anyway would be silently wrong.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::with_root(342);
    /// for key in [206, 444, 523, 607, 301, 142, 183, 102, 157, 149] {
    ///     tree.insert(key);
    /// }
    ///
    /// assert_eq!(tree.common_ancestor(&444, &607), Ok(&523));
    /// ```
    pub fn common_ancestor(&self, a: &K, b: &K) -> Result<&K, Error> {
        let mut cur = self.root.ok_or(Error::Empty)?;
        if self.find(a).is_none() || self.find(b).is_none() {
            return Err(Error::KeyNotFound);
        }

        loop {
            let key = &self.nodes[cur].key;
            match (self.cmp.compare(a, key), self.cmp.compare(b, key)) {
                (Ordering::Less, Ordering::Less) => {
                    cur = self.nodes[cur].left.expect("both keys lie in the left subtree");
                }
                (Ordering::Greater, Ordering::Greater) => {
                    cur = self.nodes[cur].right.expect("both keys lie in the right subtree");
                }
                // The paths to the two keys diverge here (or one of them is
                // this node), so this is the deepest shared ancestor.
                _ => return Ok(&self.nodes[cur].key),
            }
        }
    }

    /// Finds the arena index of the node holding `key`, descending by
    /// three-way comparison from the root.
    fn find(&self, key: &K) -> Option<Index> {
        let mut cur = self.root;
        while let Some(n) = cur {
            match self.cmp.compare(key, &self.nodes[n].key) {
                Ordering::Equal => return Some(n),
                Ordering::Less => cur = self.nodes[n].left,
                Ordering::Greater => cur = self.nodes[n].right,
            }
        }
        None
    }

    /// Unlinks the node at `n`, frees its arena slot, and rebalances from
    /// the splice point upward.
    fn remove_node(&mut self, n: Index) {
        let target = match (self.nodes[n].left, self.nodes[n].right) {
            (Some(_), Some(right)) => {
                let mut successor = right;
                while let Some(left) = self.nodes[successor].left {
                    successor = left;
                }
                let (node, succ) = match self.nodes.get2_mut(n, successor) {
                    (Some(node), Some(succ)) => (node, succ),
                    _ => unreachable!("successor search stays within the arena"),
                };
                mem::swap(&mut node.key, &mut succ.key);
                successor
            }
            _ => n,
        };

        // `target` has at most one child; splice it out, handing the
        // surviving child to its grandparent.
        let child = self.nodes[target].left.or(self.nodes[target].right);
        let parent = self.nodes[target].parent;
        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }
        match parent {
            Some(parent) => {
                if self.nodes[parent].left == Some(target) {
                    self.nodes[parent].left = child;
                } else {
                    self.nodes[parent].right = child;
                }
            }
            None => self.root = child,
        }
        self.nodes.remove(target);

        if let Some(parent) = parent {
            self.rebalance_path(parent);
        }
    }

    /// Re-checks the balance of every node from `from` up to the root,
    /// exactly once each in leaf-to-root order.
    fn rebalance_path(&mut self, from: Index) {
        let mut cur = Some(from);
        while let Some(n) = cur {
            let n = self.rebalance(n);
            cur = self.nodes[n].parent;
        }
    }

    /// Refreshes the cached height of `n` and rotates if its balance factor
    /// has left `{-1, 0, 1}`. Returns the index now rooting this subtree.
    fn rebalance(&mut self, n: Index) -> Index {
        self.update_height(n);
        let subtree = match self.balance_factor(n) {
            2 => {
                let left = self.nodes[n].left.expect("left-heavy node has a left child");
                // A right-leaning left child is the left-right case; turn it
                // into left-left before the single rotation.
                if self.balance_factor(left) < 0 {
                    self.rotate_left(left);
                }
                self.rotate_right(n)
            }
            -2 => {
                let right = self.nodes[n].right.expect("right-heavy node has a right child");
                if self.balance_factor(right) > 0 {
                    self.rotate_right(right);
                }
                self.rotate_left(n)
            }
            _ => n,
        };

        if cfg!(debug_assertions) {
            assert!(self.balance_factor(subtree).abs() <= 1);
        }
        subtree
    }

    /// Rotates the subtree at `n` to the right, lifting the left child.
    /// Pure index relinking: no key moves, and every affected parent link
    /// (including the tree root when `n` had no parent) is updated.
    ///
    /// ```text
    ///       n            l
    ///      / \          / \
    ///     l   z   ->   x   n
    ///    / \              / \
    ///   x   y            y   z
    /// ```
    fn rotate_right(&mut self, n: Index) -> Index {
        let l = self.nodes[n].left.expect("rotating right requires a left child");
        let moved = self.nodes[l].right;
        let parent = self.nodes[n].parent;

        self.nodes[n].left = moved;
        if let Some(moved) = moved {
            self.nodes[moved].parent = Some(n);
        }

        self.nodes[l].right = Some(n);
        self.nodes[n].parent = Some(l);
        self.nodes[l].parent = parent;
        self.replace_child(parent, n, l);

        self.update_height(n);
        self.update_height(l);
        l
    }

    /// Mirror image of [`Self::rotate_right`], lifting the right child.
    fn rotate_left(&mut self, n: Index) -> Index {
        let r = self.nodes[n].right.expect("rotating left requires a right child");
        let moved = self.nodes[r].left;
        let parent = self.nodes[n].parent;

        self.nodes[n].right = moved;
        if let Some(moved) = moved {
            self.nodes[moved].parent = Some(n);
        }

        self.nodes[r].left = Some(n);
        self.nodes[n].parent = Some(r);
        self.nodes[r].parent = parent;
        self.replace_child(parent, n, r);

        self.update_height(n);
        self.update_height(r);
        r
    }

    /// Points `parent`'s child slot that held `old` at `new`, or moves the
    /// tree root when there is no parent.
    fn replace_child(&mut self, parent: Option<Index>, old: Index, new: Index) {
        match parent {
            Some(parent) => {
                if self.nodes[parent].left == Some(old) {
                    self.nodes[parent].left = Some(new);
                } else {
                    self.nodes[parent].right = Some(new);
                }
            }
            None => self.root = Some(new),
        }
    }

    fn update_height(&mut self, n: Index) {
        let height = self
            .link_height(self.nodes[n].left)
            .max(self.link_height(self.nodes[n].right))
            + 1;
        self.nodes[n].height = height;
    }

    /// Left subtree height minus right subtree height; positive means
    /// left-heavy.
    fn balance_factor(&self, n: Index) -> isize {
        let left = self.link_height(self.nodes[n].left) as isize;
        let right = self.link_height(self.nodes[n].right) as isize;
        left - right
    }
}

impl<K, C> Tree<K, C> {
    /// The number of keys stored in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree stores no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The height of the tree: 0 when empty, 1 for a lone root. Balancing
    /// keeps this at `O(lg N)` for `N` stored keys.
    pub fn height(&self) -> usize {
        self.link_height(self.root)
    }

    /// The smallest key, found by walking left from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.min(), None);
    ///
    /// tree.insert(5);
    /// tree.insert(3);
    /// tree.insert(8);
    /// assert_eq!(tree.min(), Some(&3));
    /// assert_eq!(tree.max(), Some(&8));
    /// ```
    pub fn min(&self) -> Option<&K> {
        let mut cur = self.root?;
        while let Some(left) = self.nodes[cur].left {
            cur = left;
        }
        Some(&self.nodes[cur].key)
    }

    /// The largest key, found by walking right from the root.
    pub fn max(&self) -> Option<&K> {
        let mut cur = self.root?;
        while let Some(right) = self.nodes[cur].right {
            cur = right;
        }
        Some(&self.nodes[cur].key)
    }

    /// Iterates over the keys breadth-first: the root, then each deeper
    /// level left to right.
    pub fn level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder::new(&self.nodes, self.root)
    }

    /// Iterates over the keys depth-first in ascending comparator order.
    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder::new(&self.nodes, self.root)
    }

    /// Iterates over the keys depth-first, each node before its subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, K> {
        PreOrder::new(&self.nodes, self.root)
    }

    /// Iterates over the keys depth-first, each node after its subtrees.
    pub fn post_order(&self) -> PostOrder<'_, K> {
        PostOrder::new(&self.nodes, self.root)
    }

    /// Cached height of the subtree a child link points at, 0 for an
    /// absent child.
    fn link_height(&self, link: Option<Index>) -> usize {
        link.map_or(0, |n| self.nodes[n].height)
    }
}

#[cfg(test)]
impl<K, C: Comparator<K>> Tree<K, C> {
    /// Walks the whole structure checking the BST order, parent
    /// consistency, cached heights, and the balance invariant.
    fn assert_invariants(&self) {
        if let Some(root) = self.root {
            assert_eq!(self.nodes[root].parent, None, "root must have no parent");
            self.assert_subtree(root);
        }

        let keys: Vec<&K> = self.in_order().collect();
        assert_eq!(keys.len(), self.len());
        for pair in keys.windows(2) {
            assert_eq!(
                self.cmp.compare(pair[0], pair[1]),
                Ordering::Less,
                "in-order keys must be strictly ascending"
            );
        }
    }

    /// Checks one subtree bottom-up and returns its true height.
    fn assert_subtree(&self, n: Index) -> usize {
        let node = &self.nodes[n];
        let left_height = node.left.map_or(0, |left| {
            assert_eq!(self.nodes[left].parent, Some(n));
            self.assert_subtree(left)
        });
        let right_height = node.right.map_or(0, |right| {
            assert_eq!(self.nodes[right].parent, Some(n));
            self.assert_subtree(right)
        });

        assert_eq!(node.height, left_height.max(right_height) + 1);
        assert!((left_height as isize - right_height as isize).abs() <= 1);
        node.height
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and removes we have the same set of keys in the model.
    fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, set: &mut BTreeSet<K>)
    where
        K: Ord + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    assert_eq!(tree.insert(k.clone()), set.insert(k.clone()));
                }
                Op::Remove(k) => {
                    assert_eq!(tree.remove(k), set.remove(k));
                }
                Op::Contains(k) => {
                    assert_eq!(tree.contains(k), set.contains(k));
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.assert_invariants();
            tree.in_order().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn balanced_after_every_insert(xs: Vec<i16>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
                tree.assert_invariants();
            }
            xs.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn balanced_after_every_remove(xs: Vec<i8>, removes: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }
            for x in &removes {
                tree.remove(x);
                tree.assert_invariants();
            }
            removes.iter().all(|x| !tree.contains(x))
        }
    }
}
