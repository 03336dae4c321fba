//! Module: db::memory
//! Responsibility: in-process reference `Dataset` over a keyed BTreeMap.
//! Does not own: persistence; contents live only as long as the value.

use crate::{
    db::dataset::{Dataset, Selection},
    error::InternalError,
    page::SelectionWindow,
    traits::Keyed,
};
use std::{
    cell::RefCell,
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    fmt,
    rc::Rc,
};

///
/// MemoryFilter
///

pub type MemoryFilter<R> = Rc<dyn Fn(&R) -> bool>;

///
/// MemoryOrder
///
/// Comparator for selection order. Records that compare equal fall back to
/// key order, so every order is total.
///

pub type MemoryOrder<R> = Rc<dyn Fn(&R, &R) -> Ordering>;

///
/// MemorySelection
///

pub type MemorySelection<R> = Selection<MemoryFilter<R>, MemoryOrder<R>>;

/// Wrap a closure as a memory dataset filter.
pub fn predicate<R>(f: impl Fn(&R) -> bool + 'static) -> MemoryFilter<R> {
    Rc::new(f)
}

/// Wrap a closure as a memory dataset order.
pub fn order_by<R>(f: impl Fn(&R, &R) -> Ordering + 'static) -> MemoryOrder<R> {
    Rc::new(f)
}

///
/// MemoryDataset
///
/// Records keyed in a BTreeMap behind a RefCell, so callers can mutate the
/// dataset through a shared reference while a traversal over it is running.
/// Key-set fetches return records in key order, not request order.
///

pub struct MemoryDataset<R: Keyed> {
    rows: RefCell<BTreeMap<R::Key, R>>,
}

impl<R: Keyed + Clone> MemoryDataset<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: RefCell::new(BTreeMap::new()),
        }
    }

    /// Insert or replace a record, returning the previous one.
    pub fn insert(&self, record: R) -> Option<R> {
        self.rows.borrow_mut().insert(record.key(), record)
    }

    /// Apply `f` to the record stored under `key`.
    ///
    /// Returns `false` when no such record exists. `f` must not change the
    /// record's key.
    pub fn update(&self, key: &R::Key, f: impl FnOnce(&mut R)) -> bool {
        let mut rows = self.rows.borrow_mut();
        let Some(row) = rows.get_mut(key) else {
            return false;
        };
        f(row);

        true
    }

    pub fn remove(&self, key: &R::Key) -> Option<R> {
        self.rows.borrow_mut().remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &R::Key) -> Option<R> {
        self.rows.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.borrow().is_empty()
    }

    // Matching records in selection order, ties broken by key.
    fn select(&self, selection: &MemorySelection<R>) -> Vec<R> {
        let rows = self.rows.borrow();
        let mut matching: Vec<R> = rows
            .values()
            .filter(|row| selection.filter_ref().is_none_or(|filter| filter(row)))
            .cloned()
            .collect();

        // BTreeMap iteration is key-ordered and the sort is stable.
        if let Some(order) = selection.order_ref() {
            matching.sort_by(|a, b| order(a, b));
        }

        matching
    }
}

impl<R: Keyed + Clone> Default for MemoryDataset<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Keyed + Clone> FromIterator<R> for MemoryDataset<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let dataset = Self::new();
        for record in iter {
            dataset.insert(record);
        }

        dataset
    }
}

impl<R: Keyed> fmt::Debug for MemoryDataset<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDataset")
            .field("rows", &self.rows.borrow().len())
            .finish()
    }
}

impl<R: Keyed + Clone> Dataset for MemoryDataset<R> {
    type Record = R;
    type Filter = MemoryFilter<R>;
    type Order = MemoryOrder<R>;

    fn query_keys(&self, selection: &MemorySelection<R>) -> Result<Vec<R::Key>, InternalError> {
        Ok(self.select(selection).iter().map(Keyed::key).collect())
    }

    fn query_by_keys(&self, keys: &[R::Key]) -> Result<Vec<R>, InternalError> {
        let wanted: BTreeSet<&R::Key> = keys.iter().collect();
        let rows = self.rows.borrow();

        Ok(wanted
            .into_iter()
            .filter_map(|key| rows.get(key).cloned())
            .collect())
    }

    fn count_matching(&self, filter: Option<&MemoryFilter<R>>) -> Result<u64, InternalError> {
        let rows = self.rows.borrow();
        let count = match filter {
            Some(filter) => rows.values().filter(|row| filter(row)).count(),
            None => rows.len(),
        };

        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    fn query_window(
        &self,
        selection: &MemorySelection<R>,
        window: SelectionWindow,
    ) -> Result<Vec<R>, InternalError> {
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);

        Ok(self
            .select(selection)
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }
}

///
/// TESTS
///
