use std::fmt::Debug;

///
/// Keyed
///
/// A record with a unique, stable identifier.
/// The key is what a traversal snapshots and what key-set fetches match on,
/// so it must not change while the record exists.
///

pub trait Keyed {
    type Key: Clone + Debug + Ord;

    fn key(&self) -> Self::Key;
}
