use super::*;
use crate::{
    error::{ErrorClass, ErrorOrigin, InternalError},
    obs::{ExecKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all},
    page::{PageRequest, PageSize, SelectionWindow},
    range::{PageLinkConfig, PageToken},
    test_support::{FlakyDataset, Post, published_by_score, seeded_posts},
};
use memory::{MemorySelection, predicate};
use std::cell::RefCell;

fn ids(records: &[Post]) -> Vec<u32> {
    records.iter().map(|post| post.id).collect()
}

#[test]
fn new_session_uses_default_page_size() {
    let session = DatasetSession::new(seeded_posts(1));

    assert_eq!(session.page_size(), PageSize::DEFAULT);
    assert_eq!(session.page_size().get(), 20);
}

#[test]
fn set_page_size_rejects_zero_and_keeps_previous() {
    let mut session = DatasetSession::new(seeded_posts(1));
    session.set_page_size(5).expect("5 is a valid page size");

    let err = session
        .set_page_size(0)
        .expect_err("zero page size must be rejected");

    assert_eq!(err.class, ErrorClass::InvariantViolation);
    assert_eq!(err.origin, ErrorOrigin::Page);
    assert_eq!(session.page_size().get(), 5);
}

#[test]
fn sessions_over_one_dataset_keep_separate_page_sizes() {
    let posts = seeded_posts(30);
    let mut small = DatasetSession::new(&posts);
    let large = DatasetSession::new(&posts);
    small.set_page_size(5).expect("5 is a valid page size");

    assert_eq!(small.page_count(30_u64).expect("explicit total"), 6);
    assert_eq!(large.page_count(30_u64).expect("explicit total"), 2);
}

#[test]
fn page_loads_one_window_of_the_selection() {
    let posts = seeded_posts(25);
    let mut session = DatasetSession::new(&posts);
    session.set_page_size(10).expect("10 is a valid page size");

    let page = session
        .page(3, &MemorySelection::all())
        .expect("page load should succeed");

    assert_eq!(page.page_number(), 3);
    assert_eq!(
        page.window(),
        SelectionWindow {
            limit: 10,
            offset: 20
        }
    );
    assert_eq!(ids(&page), (21..=25).collect::<Vec<_>>());
}

#[test]
fn page_zero_and_negative_load_the_first_page() {
    let posts = seeded_posts(25);
    let session = DatasetSession::new(&posts);
    let first = session
        .page(1, &published_by_score())
        .expect("page load should succeed");

    for raw in [0_i64, -1, i64::MIN] {
        let page = session
            .page(raw, &published_by_score())
            .expect("page load should succeed");
        assert_eq!(page.page_number(), 1);
        assert_eq!(page, first);
    }
}

#[test]
fn page_from_raw_param_clamps_garbage() {
    let posts = seeded_posts(25);
    let session = DatasetSession::new(&posts);

    let page = session
        .page(PageRequest::from_param(Some("two")), &MemorySelection::all())
        .expect("page load should succeed");

    assert_eq!(page.page_number(), 1);
    assert_eq!(page.len(), 20);
}

#[test]
fn page_past_the_end_is_empty() {
    let posts = seeded_posts(25);
    let session = DatasetSession::new(&posts);

    let page = session
        .page(9, &MemorySelection::all())
        .expect("page load should succeed");

    assert!(page.is_empty());
}

#[test]
fn page_count_resolves_explicit_and_matching_totals() {
    let posts = seeded_posts(41);
    posts.update(&1, |post| post.published = false);
    let session = DatasetSession::new(&posts);

    assert_eq!(session.page_count(40_u64).expect("explicit total"), 2);
    assert_eq!(session.page_count(41_u64).expect("explicit total"), 3);
    assert_eq!(session.page_count(0_u64).expect("explicit total"), 0);
    assert_eq!(
        session
            .page_count(published_by_score())
            .expect("matching total"),
        2
    );
    assert_eq!(
        session
            .page_count(MemorySelection::<Post>::all())
            .expect("matching total"),
        3
    );
}

#[test]
fn page_for_entry_uses_session_page_size() {
    let session = DatasetSession::new(seeded_posts(0));

    assert_eq!(session.page_for_entry(21), 2);
    assert_eq!(session.page_for_entry(20), 1);
}

#[test]
fn summary_reports_neighbors() {
    let posts = seeded_posts(45);
    let session = DatasetSession::new(&posts);

    let middle = session
        .summary(2, MemorySelection::<Post>::all())
        .expect("summary should resolve");
    assert_eq!(
        middle,
        PageSummary {
            page: 2,
            page_size: 20,
            total: 45,
            page_count: 3,
            has_previous: true,
            has_next: true,
        }
    );
    assert_eq!(middle.first_entry(), Some(21));

    let last = session.summary(3, 45_u64).expect("explicit summary");
    assert!(last.has_previous);
    assert!(!last.has_next);

    let past = session.summary(7, 45_u64).expect("explicit summary");
    assert_eq!(past.first_entry(), None);
}

#[test]
fn page_range_fills_count_and_current_page() {
    let posts = seeded_posts(400);
    let session = DatasetSession::new(&posts);

    let range = session
        .page_range(10, MemorySelection::<Post>::all(), PageLinkConfig::default())
        .expect("count should resolve")
        .expect("twenty pages should produce a range");

    assert_eq!(range.current_page(), 10);
    assert_eq!(range.tokens().first(), Some(&PageToken::Page(1)));
    assert_eq!(range.tokens().last(), Some(&PageToken::Page(20)));
    assert_eq!(range.tokens().iter().filter(|t| t.is_ellipsis()).count(), 2);
}

#[test]
fn page_range_single_page_is_none() {
    let session = DatasetSession::new(seeded_posts(3));

    let range = session
        .page_range(1, MemorySelection::<Post>::all(), PageLinkConfig::default())
        .expect("count should resolve");

    assert_eq!(range, None);
}

#[test]
fn count_failure_propagates_unchanged() {
    struct DownCount;

    impl Dataset for DownCount {
        type Record = Post;
        type Filter = ();
        type Order = ();

        fn query_keys(&self, _: &Selection<(), ()>) -> Result<Vec<u32>, InternalError> {
            Ok(Vec::new())
        }

        fn query_by_keys(&self, _: &[u32]) -> Result<Vec<Post>, InternalError> {
            Ok(Vec::new())
        }

        fn count_matching(&self, _: Option<&()>) -> Result<u64, InternalError> {
            Err(InternalError::dataset_unavailable("count timed out"))
        }

        fn query_window(
            &self,
            _: &Selection<(), ()>,
            _: SelectionWindow,
        ) -> Result<Vec<Post>, InternalError> {
            Ok(Vec::new())
        }
    }

    let session = DatasetSession::new(DownCount);

    let err = session
        .page_count(Selection::<(), ()>::all())
        .expect_err("count failure should propagate");
    assert!(err.is_unavailable());
    assert_eq!(err.message, "count timed out");

    // An explicit total never touches the dataset.
    assert_eq!(session.page_count(60_u64).expect("explicit total"), 3);
}

#[test]
fn scoped_metrics_sink_captures_session_events() {
    struct CaptureSink(RefCell<Vec<MetricsEvent>>);

    impl MetricsSink for CaptureSink {
        fn record(&self, event: MetricsEvent) {
            self.0.borrow_mut().push(event);
        }
    }

    metrics_reset_all();
    let sink: &'static CaptureSink = Box::leak(Box::new(CaptureSink(RefCell::new(Vec::new()))));
    let posts = seeded_posts(25);
    let session = DatasetSession::new(&posts).metrics_sink(sink);

    session
        .page(2, &MemorySelection::all())
        .expect("page load should succeed");

    assert_eq!(
        *sink.0.borrow(),
        vec![
            MetricsEvent::ExecStart {
                kind: ExecKind::Page
            },
            MetricsEvent::ExecFinish {
                kind: ExecKind::Page,
                rows: 5
            },
        ]
    );
    assert_eq!(metrics_report().ops.page_calls, 0);
}

#[test]
fn global_metrics_count_pages_and_counts() {
    metrics_reset_all();
    let posts = seeded_posts(25);
    let session = DatasetSession::new(&posts);

    session
        .page(1, &MemorySelection::all())
        .expect("page load should succeed");
    session
        .page_count(MemorySelection::<Post>::all())
        .expect("matching total");
    session.page_count(25_u64).expect("explicit total");

    let report = metrics_report();
    assert_eq!(report.ops.page_calls, 1);
    assert_eq!(report.ops.count_calls, 1);
    assert_eq!(report.ops.rows_loaded, 20);
}

#[test]
fn debug_session_still_traverses() {
    let flaky = FlakyDataset::new(seeded_posts(5), usize::MAX);
    let session = DatasetSession::new(&flaky).debug();

    let report = session
        .each_by_page(&published_by_score(), |_| Ok(()))
        .expect("traversal should succeed");

    assert_eq!(report.records_visited, 5);
    assert_eq!(flaky.fetches(), 1);
}

#[test]
fn filtered_traversal_visits_only_matching_records() {
    let posts = seeded_posts(20);
    let session = DatasetSession::new(&posts);
    let even = MemorySelection::<Post>::all().filter(predicate(|post: &Post| post.id % 2 == 0));
    let mut visited = Vec::new();

    session
        .each_by_page(&even, |post| {
            visited.push(post.id);
            Ok(())
        })
        .expect("traversal should succeed");

    assert_eq!(visited, (1..=10).map(|n| n * 2).collect::<Vec<_>>());
}
