//! Key ordering for the tree.
//!
//! Every comparison the tree makes - during insertion, search, removal, and
//! ancestor queries - goes through a single [`Comparator`] supplied at
//! construction time. Using one three-way comparison everywhere means equal
//! keys are always recognized as equal rather than being routed into a
//! subtree, so duplicates can never be stored twice.

use std::cmp::Ordering;

/// A total order over keys of type `K`.
///
/// Implementations must be consistent: for any `a` and `b`, `compare(a, b)`
/// always returns the same [`Ordering`], and it is the reverse of
/// `compare(b, a)`. The tree applies the same comparator to every operation,
/// so an inconsistent order silently breaks search.
pub trait Comparator<K> {
    /// Compares two keys, returning where `a` sorts relative to `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The [`Comparator`] that uses a key's own [`Ord`] implementation.
///
/// This is the default ordering for [`Tree`][crate::Tree].
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use avl_tree::{Comparator, NaturalOrder};
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<K: Ord> Comparator<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_matches_ord() {
        assert_eq!(NaturalOrder.compare(&3, &3), Ordering::Equal);
        assert_eq!(NaturalOrder.compare(&"a", &"b"), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&10, &2), Ordering::Greater);
    }
}
