//! A height-balanced ordered Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support
//! sorted iteration by visiting the left subtree, then the subtree root, then
//! the right subtree.
//!
//! ## Balancing
//!
//! A plain BST degrades to a linked list when keys arrive in sorted order.
//! The [`Tree`] here is an AVL tree: after every insertion and removal it
//! re-checks the balance factor (left subtree height minus right subtree
//! height) of each node on the mutation path and applies a rotation wherever
//! the factor leaves `{-1, 0, 1}`. This keeps the height at `O(lg N)` for
//! `N` stored keys, so search, insertion, and deletion are all logarithmic.
//!
//! Beyond the usual set-like operations, the tree answers
//! [lowest-common-ancestor][Tree::common_ancestor] queries and exposes
//! [level-order][Tree::level_order], [pre-order][Tree::pre_order],
//! [in-order][Tree::in_order], and [post-order][Tree::post_order] traversals
//! as restartable iterators.
//!
//! Nodes live in an arena and reference each other (including their parent)
//! by index, so the structure is plain safe Rust with no reference cycles.
//! The tree is not internally synchronized; wrap it in a lock to share it
//! across threads.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod cmp;
mod error;
mod iter;
mod tree;


pub use cmp::{Comparator, NaturalOrder};
pub use error::Error;
pub use iter::{InOrder, LevelOrder, PostOrder, PreOrder};
pub use tree::Tree;
