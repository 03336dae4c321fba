//! Module: db::dataset
//! Responsibility: the narrow query seam to an external keyed store.
//! Does not own: query execution, storage, or schema; implementors do.

use crate::{error::InternalError, page::SelectionWindow, traits::Keyed};

///
/// KeyOf
///
/// Key type of a dataset's records.
///

pub type KeyOf<D> = <<D as Dataset>::Record as Keyed>::Key;

///
/// Dataset
///
/// An ordered, filterable, key-addressed collection queried by paging and
/// traversal. Implementations execute the selections; this crate only
/// decides which selections to issue and in what order.
///

pub trait Dataset {
    type Record: Keyed;
    type Filter;
    type Order;

    /// Keys of every record matching the selection, in selection order.
    fn query_keys(
        &self,
        selection: &Selection<Self::Filter, Self::Order>,
    ) -> Result<Vec<KeyOf<Self>>, InternalError>;

    /// Records whose key is in `keys`. Order is not guaranteed and keys
    /// with no record are skipped.
    fn query_by_keys(&self, keys: &[KeyOf<Self>]) -> Result<Vec<Self::Record>, InternalError>;

    /// Number of records matching `filter` (all records when `None`).
    fn count_matching(&self, filter: Option<&Self::Filter>) -> Result<u64, InternalError>;

    /// One `(limit, offset)` slice of the ordered selection.
    fn query_window(
        &self,
        selection: &Selection<Self::Filter, Self::Order>,
        window: SelectionWindow,
    ) -> Result<Vec<Self::Record>, InternalError>;
}

impl<D: Dataset + ?Sized> Dataset for &D {
    type Record = D::Record;
    type Filter = D::Filter;
    type Order = D::Order;

    fn query_keys(
        &self,
        selection: &Selection<Self::Filter, Self::Order>,
    ) -> Result<Vec<KeyOf<Self>>, InternalError> {
        (**self).query_keys(selection)
    }

    fn query_by_keys(&self, keys: &[KeyOf<Self>]) -> Result<Vec<Self::Record>, InternalError> {
        (**self).query_by_keys(keys)
    }

    fn count_matching(&self, filter: Option<&Self::Filter>) -> Result<u64, InternalError> {
        (**self).count_matching(filter)
    }

    fn query_window(
        &self,
        selection: &Selection<Self::Filter, Self::Order>,
        window: SelectionWindow,
    ) -> Result<Vec<Self::Record>, InternalError> {
        (**self).query_window(selection, window)
    }
}

///
/// Selection
///
/// Filter and order applied to a dataset query. Both are optional; an
/// empty selection means every record in the store's natural key order.
///

#[derive(Clone, Debug)]
pub struct Selection<F, O> {
    filter: Option<F>,
    order: Option<O>,
}

impl<F, O> Selection<F, O> {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            filter: None,
            order: None,
        }
    }

    #[must_use]
    pub fn filter(mut self, filter: F) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn order_by(mut self, order: O) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub const fn filter_ref(&self) -> Option<&F> {
        self.filter.as_ref()
    }

    #[must_use]
    pub const fn order_ref(&self) -> Option<&O> {
        self.order.as_ref()
    }
}

impl<F, O> Default for Selection<F, O> {
    fn default() -> Self {
        Self::all()
    }
}

///
/// CountSpec
///
/// Where a page count gets its total from: a total the caller already
/// knows, or a count of the records matching a selection.
///

#[derive(Clone, Debug)]
pub enum CountSpec<F, O> {
    Explicit(u64),
    Matching(Selection<F, O>),
}

impl<F, O> CountSpec<F, O> {
    /// Resolve to a concrete total, querying only when needed.
    pub fn resolve<D>(&self, dataset: &D) -> Result<u64, InternalError>
    where
        D: Dataset<Filter = F, Order = O> + ?Sized,
    {
        match self {
            Self::Explicit(total) => Ok(*total),
            Self::Matching(selection) => dataset.count_matching(selection.filter_ref()),
        }
    }

    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}

impl<F, O> From<u64> for CountSpec<F, O> {
    fn from(total: u64) -> Self {
        Self::Explicit(total)
    }
}

impl<F, O> From<Selection<F, O>> for CountSpec<F, O> {
    fn from(selection: Selection<F, O>) -> Self {
        Self::Matching(selection)
    }
}
