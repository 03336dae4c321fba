use crate::{
    db::{
        batch::{Batch, BatchTraversal, TraversalReport},
        dataset::{CountSpec, Dataset, Selection},
        response::{PageResponse, PageSummary},
    },
    error::InternalError,
    obs::sink::{ExecKind, MetricsSink, Span, with_metrics_sink},
    page::{PageRequest, PageSize, SelectionWindow, page_count, page_for_entry},
    range::{PageLinkConfig, PageRange, compute_page_range},
};

///
/// DatasetSession
///
/// Dataset handle with its own page size and policy (debug, metrics).
/// Page size lives on the handle, never in shared state, so two sessions
/// over the same dataset page independently.
///

pub struct DatasetSession<D: Dataset> {
    dataset: D,
    page_size: PageSize,
    debug: bool,
    metrics: Option<&'static dyn MetricsSink>,
}

impl<D: Dataset> DatasetSession<D> {
    #[must_use]
    pub const fn new(dataset: D) -> Self {
        Self {
            dataset,
            page_size: PageSize::DEFAULT,
            debug: false,
            metrics: None,
        }
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn metrics_sink(mut self, sink: &'static dyn MetricsSink) -> Self {
        self.metrics = Some(sink);
        self
    }

    fn with_metrics<T>(&self, f: impl FnOnce() -> T) -> T {
        if let Some(sink) = self.metrics {
            with_metrics_sink(sink, f)
        } else {
            f()
        }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    /// Change the page size for this handle. Zero is rejected.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), InternalError> {
        self.page_size = PageSize::new(page_size)?;

        Ok(())
    }

    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[must_use]
    pub const fn dataset(&self) -> &D {
        &self.dataset
    }

    #[must_use]
    pub fn into_dataset(self) -> D {
        self.dataset
    }

    // ---------------------------------------------------------------------
    // Single-page retrieval
    // ---------------------------------------------------------------------

    /// Load one page of the selection with a single bounded query.
    pub fn page(
        &self,
        page: impl Into<PageRequest>,
        selection: &Selection<D::Filter, D::Order>,
    ) -> Result<PageResponse<D::Record>, InternalError> {
        let page = page.into();
        let window = SelectionWindow::for_page(page, self.page_size);
        self.debug_log(format!(
            "page {page}: limit {} offset {}",
            window.limit, window.offset
        ));

        self.with_metrics(|| {
            let mut span = Span::new(ExecKind::Page);
            let mut records = self.dataset.query_window(selection, window)?;
            records.truncate(self.page_size.as_usize());
            span.set_rows(u64::try_from(records.len()).unwrap_or(u64::MAX));

            Ok::<_, InternalError>(PageResponse::new(page, window, records))
        })
    }

    /// Number of pages for an explicit total or a matching selection.
    pub fn page_count(
        &self,
        count: impl Into<CountSpec<D::Filter, D::Order>>,
    ) -> Result<u64, InternalError> {
        let total = self.resolve_total(&count.into())?;

        Ok(page_count(total, self.page_size))
    }

    /// Page holding the given 1-based entry index.
    #[must_use]
    pub fn page_for_entry(&self, entry_index: u64) -> u64 {
        page_for_entry(entry_index, self.page_size)
    }

    /// Where `page` sits within the total described by `count`.
    pub fn summary(
        &self,
        page: impl Into<PageRequest>,
        count: impl Into<CountSpec<D::Filter, D::Order>>,
    ) -> Result<PageSummary, InternalError> {
        let page = page.into().number();
        let total = self.resolve_total(&count.into())?;
        let pages = page_count(total, self.page_size);

        Ok(PageSummary {
            page,
            page_size: self.page_size.get(),
            total,
            page_count: pages,
            has_previous: page > 1,
            has_next: page < pages,
        })
    }

    /// Page link range for `page`, with the page count filled in from
    /// `count` and the current page from `page`.
    pub fn page_range(
        &self,
        page: impl Into<PageRequest>,
        count: impl Into<CountSpec<D::Filter, D::Order>>,
        config: PageLinkConfig,
    ) -> Result<Option<PageRange>, InternalError> {
        let num_pages = self.page_count(count)?;
        let config = PageLinkConfig {
            num_pages: Some(num_pages),
            current_page: Some(page.into()),
            ..config
        };

        Ok(compute_page_range(&config))
    }

    fn resolve_total(
        &self,
        count: &CountSpec<D::Filter, D::Order>,
    ) -> Result<u64, InternalError> {
        if count.is_explicit() {
            return count.resolve(&self.dataset);
        }

        let total = self.with_metrics(|| {
            let mut span = Span::new(ExecKind::Count);
            let total = count.resolve(&self.dataset)?;
            span.set_rows(total);

            Ok::<_, InternalError>(total)
        })?;
        self.debug_log(format!("count: {total} matching records"));

        Ok(total)
    }

    // ---------------------------------------------------------------------
    // Snapshot traversal
    // ---------------------------------------------------------------------

    /// Visit every record matching `selection` once, one batch at a time.
    ///
    /// Matching keys are captured up front, so the callback may update or
    /// delete records (including in ways that change whether or where they
    /// match) without records being skipped or revisited. Keys deleted
    /// before their batch is fetched are absent from it; records created
    /// after the snapshot are not visited.
    pub fn by_page<F>(
        &self,
        selection: &Selection<D::Filter, D::Order>,
        on_batch: F,
    ) -> Result<TraversalReport, InternalError>
    where
        F: FnMut(Batch<D::Record>) -> Result<(), InternalError>,
    {
        self.with_metrics(|| {
            BatchTraversal::new(&self.dataset, self.page_size, self.debug)
                .execute(selection, on_batch)
        })
    }

    /// Visit every record matching `selection` once, one record at a time.
    pub fn each_by_page<F>(
        &self,
        selection: &Selection<D::Filter, D::Order>,
        mut on_record: F,
    ) -> Result<TraversalReport, InternalError>
    where
        F: FnMut(D::Record) -> Result<(), InternalError>,
    {
        self.by_page(selection, |batch| batch.into_iter().try_for_each(&mut on_record))
    }
}
