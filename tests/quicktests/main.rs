//! Property tests that run every engine through the shared [`SearchTree`] interface.

mod engines;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the data structure
    Insert(K),
    /// Delete the K from the data structure
    Delete(K),
    /// Search for the K
    Search(K),
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Delete(K::arbitrary(g)),
            2 => Op::Search(K::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
