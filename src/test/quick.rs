use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// the tree in a quicktest.
#[derive(Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the key into the tree
    Insert(K),
    /// Remove the key from the tree
    Remove(K),
    /// Check the tree for the key
    Contains(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Contains(K::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
