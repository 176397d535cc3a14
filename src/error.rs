/// Errors reported by tree queries with preconditions.
///
/// The mutating operations never fail: inserting a present key and removing
/// an absent key are no-ops reported through their `bool` return values.
/// Only [`common_ancestor`][crate::Tree::common_ancestor] has preconditions
/// (a non-empty tree and two present keys), and violating them must surface
/// as an error rather than a silently wrong ancestor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The tree contains no nodes.
    #[error("tree is empty")]
    Empty,
    /// A key passed as a query precondition is not present in the tree.
    #[error("key not found in tree")]
    KeyNotFound,
}
