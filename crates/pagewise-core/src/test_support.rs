use crate::{
    db::{
        Dataset, KeyOf, Selection,
        memory::{MemoryDataset, MemorySelection, order_by, predicate},
    },
    error::InternalError,
    page::SelectionWindow,
    traits::Keyed,
};
use std::cell::Cell;

///
/// Post
///
/// Small keyed record used across unit tests.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Post {
    pub(crate) id: u32,
    pub(crate) score: i64,
    pub(crate) published: bool,
}

impl Keyed for Post {
    type Key = u32;

    fn key(&self) -> Self::Key {
        self.id
    }
}

/// Posts `1..=count`, all published, with scores that do not follow id order.
pub(crate) fn seeded_posts(count: u32) -> MemoryDataset<Post> {
    (1..=count)
        .map(|id| Post {
            id,
            score: i64::from((id * 7) % 11),
            published: true,
        })
        .collect()
}

/// Published posts ordered by descending score.
pub(crate) fn published_by_score() -> MemorySelection<Post> {
    MemorySelection::all()
        .filter(predicate(|post: &Post| post.published))
        .order_by(order_by(|a: &Post, b: &Post| b.score.cmp(&a.score)))
}

///
/// FlakyDataset
///
/// Wraps a dataset and fails the key-set fetch once `fail_on_fetch` fetches
/// have already succeeded.
///

pub(crate) struct FlakyDataset<D> {
    inner: D,
    fetches: Cell<usize>,
    fail_on_fetch: usize,
}

impl<D> FlakyDataset<D> {
    pub(crate) const fn new(inner: D, fail_on_fetch: usize) -> Self {
        Self {
            inner,
            fetches: Cell::new(0),
            fail_on_fetch,
        }
    }

    pub(crate) const fn fetches(&self) -> usize {
        self.fetches.get()
    }
}

impl<D: Dataset> Dataset for FlakyDataset<D> {
    type Record = D::Record;
    type Filter = D::Filter;
    type Order = D::Order;

    fn query_keys(
        &self,
        selection: &Selection<Self::Filter, Self::Order>,
    ) -> Result<Vec<KeyOf<Self>>, InternalError> {
        self.inner.query_keys(selection)
    }

    fn query_by_keys(&self, keys: &[KeyOf<Self>]) -> Result<Vec<Self::Record>, InternalError> {
        if self.fetches.get() == self.fail_on_fetch {
            return Err(InternalError::dataset_unavailable("store went away"));
        }
        self.fetches.set(self.fetches.get() + 1);

        self.inner.query_by_keys(keys)
    }

    fn count_matching(&self, filter: Option<&Self::Filter>) -> Result<u64, InternalError> {
        self.inner.count_matching(filter)
    }

    fn query_window(
        &self,
        selection: &Selection<Self::Filter, Self::Order>,
        window: SelectionWindow,
    ) -> Result<Vec<Self::Record>, InternalError> {
        self.inner.query_window(selection, window)
    }
}
