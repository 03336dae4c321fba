//! Module: db::batch
//! Responsibility: snapshot-then-fetch traversal of every record matching a
//! selection, in fixed-size batches.
//! Does not own: the selection semantics (dataset) or what callbacks do with
//! the records, including mutating them.

mod snapshot;


use crate::{
    db::dataset::{Dataset, Selection},
    error::InternalError,
    obs::sink::{ExecKind, MetricsEvent, Span, record},
    page::PageSize,
    traits::Keyed,
};
use candid::CandidType;
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use snapshot::IdentifierSnapshot;
use std::collections::BTreeMap;

///
/// Batch
///
/// Full records for one chunk of a traversal snapshot, in snapshot order.
/// Shorter than the page size when it is the last chunk or when snapshotted
/// records were deleted before the chunk was fetched.
///

#[derive(Clone, Debug, Deref, Eq, IntoIterator, PartialEq)]
pub struct Batch<R> {
    index: u64,
    #[deref]
    #[into_iterator(owned, ref)]
    records: Vec<R>,
}

impl<R> Batch<R> {
    /// Zero-based position of this batch within its traversal.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    #[must_use]
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

///
/// TraversalReport
///
/// Accounting for one completed traversal.
///

#[derive(CandidType, Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct TraversalReport {
    pub batches: u64,
    pub keys_snapshotted: u64,
    pub records_visited: u64,
    pub keys_missing: u64,
}

///
/// BatchTraversal
///
/// Drives one traversal: snapshot the matching keys once, then fetch and
/// hand over one chunk at a time. Chunk k+1 is never fetched before the
/// callback for chunk k has returned.
///

pub(crate) struct BatchTraversal<'a, D: ?Sized> {
    dataset: &'a D,
    page_size: PageSize,
    debug: bool,
}

impl<'a, D> BatchTraversal<'a, D>
where
    D: Dataset + ?Sized,
{
    #[must_use]
    pub(crate) const fn new(dataset: &'a D, page_size: PageSize, debug: bool) -> Self {
        Self {
            dataset,
            page_size,
            debug,
        }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    pub(crate) fn execute<F>(
        &self,
        selection: &Selection<D::Filter, D::Order>,
        mut on_batch: F,
    ) -> Result<TraversalReport, InternalError>
    where
        F: FnMut(Batch<D::Record>) -> Result<(), InternalError>,
    {
        let mut span = Span::new(ExecKind::Traversal);

        let keys = self.dataset.query_keys(selection)?;
        let fetched_keys = keys.len();
        let mut snapshot = IdentifierSnapshot::capture(keys);
        let snapshotted = len_u64(snapshot.len());

        record(MetricsEvent::SnapshotTaken { keys: snapshotted });
        if snapshot.is_empty() {
            self.debug_log("traversal snapshot empty, nothing to fetch");
        } else if snapshot.len() != fetched_keys {
            self.debug_log(format!(
                "snapshot dropped {} duplicate keys",
                fetched_keys - snapshot.len()
            ));
        }
        self.debug_log(format!(
            "traversal snapshot: {snapshotted} keys, page size {}",
            self.page_size
        ));

        let mut report = TraversalReport {
            keys_snapshotted: snapshotted,
            ..TraversalReport::default()
        };

        while let Some(chunk) = snapshot.next_chunk(self.page_size.as_usize()) {
            let fetched = self.dataset.query_by_keys(chunk)?;
            let records = order_by_snapshot(chunk, fetched);

            let requested = len_u64(chunk.len());
            let returned = len_u64(records.len());
            record(MetricsEvent::BatchFetched {
                requested,
                returned,
            });
            self.debug_log(format!(
                "batch {}: {returned}/{requested} records, {} keys remaining",
                report.batches,
                snapshot.remaining()
            ));

            let batch = Batch {
                index: report.batches,
                records,
            };
            report.batches += 1;
            report.records_visited += returned;
            report.keys_missing += requested.saturating_sub(returned);
            span.add_rows(returned);

            on_batch(batch)?;
        }

        Ok(report)
    }
}

// Place fetched records at their key's position within the chunk. Records
// whose key is outside the chunk, and repeats of a key already placed, are
// dropped so each snapshotted key yields at most one record.
fn order_by_snapshot<R: Keyed>(chunk: &[R::Key], fetched: Vec<R>) -> Vec<R> {
    let positions: BTreeMap<&R::Key, usize> = chunk
        .iter()
        .enumerate()
        .map(|(position, key)| (key, position))
        .collect();
    let mut slots: Vec<Option<R>> = std::iter::repeat_with(|| None).take(chunk.len()).collect();

    for record in fetched {
        let key = record.key();
        if let Some(&position) = positions.get(&key)
            && slots[position].is_none()
        {
            slots[position] = Some(record);
        }
    }

    slots.into_iter().flatten().collect()
}

fn len_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
