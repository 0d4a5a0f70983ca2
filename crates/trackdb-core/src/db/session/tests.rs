use super::*;
use crate::{
    db::{
        query::{
            OrderSpec, PageError, PageWindow, PlanError, UnknownSortField, predicate::Predicate,
        },
        store::MemoryStore,
    },
    error::{ErrorClass, ErrorOrigin},
    model::issue::IssueStatus,
    obs::{metrics_report, metrics_reset_all},
    test_support::{IssueFixture, five_statuses, ids, numbered},
};
use proptest::prelude::*;
use std::{cell::Cell, sync::Mutex};

///
/// CountingStore
/// Wraps a memory store and counts every call that reaches it.
///

struct CountingStore {
    inner: MemoryStore<Issue>,
    calls: Cell<usize>,
}

impl CountingStore {
    fn new(issues: Vec<Issue>) -> Self {
        Self {
            inner: issues.into_iter().collect(),
            calls: Cell::new(0),
        }
    }
}

impl Store<Issue> for CountingStore {
    fn count(&self, predicate: &Predicate) -> Result<u64, InternalError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.count(predicate)
    }

    fn load(
        &self,
        predicate: &Predicate,
        order: &OrderSpec,
        window: PageWindow,
    ) -> Result<Vec<Issue>, InternalError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.load(predicate, order, window)
    }
}

struct FailingStore;

impl Store<Issue> for FailingStore {
    fn count(&self, _: &Predicate) -> Result<u64, InternalError> {
        Err(InternalError::store_internal("disk on fire"))
    }

    fn load(
        &self,
        _: &Predicate,
        _: &OrderSpec,
        _: PageWindow,
    ) -> Result<Vec<Issue>, InternalError> {
        Err(InternalError::store_internal("disk on fire"))
    }
}

/// Ignores the window and returns everything.
struct UnboundedStore(MemoryStore<Issue>);

impl Store<Issue> for UnboundedStore {
    fn count(&self, predicate: &Predicate) -> Result<u64, InternalError> {
        self.0.count(predicate)
    }

    fn load(
        &self,
        predicate: &Predicate,
        order: &OrderSpec,
        _: PageWindow,
    ) -> Result<Vec<Issue>, InternalError> {
        self.0.load(predicate, order, PageWindow { offset: 0, limit: u32::MAX })
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<MetricsEvent>>,
}

impl RecordingSink {
    fn events(&self) -> Vec<MetricsEvent> {
        self.events.lock().expect("sink lock").clone()
    }
}

impl MetricsSink for RecordingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.lock().expect("sink lock").push(event);
    }
}

fn session(issues: Vec<Issue>) -> Session<MemoryStore<Issue>> {
    Session::new(issues.into_iter().collect(), QueryLimits::default())
}

#[test]
fn todo_filter_returns_newest_first_with_totals() {
    let issues = five_statuses();
    let result = session(issues.clone())
        .query_issues(
            &FilterSpec::new().status([IssueStatus::Todo]),
            &SortSpec::desc("createdAt"),
            PaginationSpec::new(1, 10),
        )
        .expect("query");

    assert_eq!(ids(&result.data), vec![issues[2].id, issues[1].id]);
    assert_eq!(result.pagination.total_count, 2);
    assert_eq!(result.pagination.total_pages, 1);
    assert_eq!(result.pagination.page, 1);
    assert_eq!(result.pagination.page_size, 10);
}

#[test]
fn search_matches_title_case_insensitively() {
    let issues = vec![
        IssueFixture::new(1, "Fix API bug").build(),
        IssueFixture::new(2, "Update docs").build(),
        IssueFixture::new(3, "api gateway retry").build(),
    ];
    let result = session(issues.clone())
        .query_issues(
            &FilterSpec::new().search("API"),
            &SortSpec::asc("createdAt"),
            PaginationSpec::default(),
        )
        .expect("query");

    assert_eq!(ids(&result.data), vec![issues[0].id, issues[2].id]);
}

#[test]
fn page_zero_is_rejected_without_store_calls() {
    let session = Session::new(CountingStore::new(numbered(3)), QueryLimits::default());

    let err = session
        .query_issues(
            &FilterSpec::new(),
            &SortSpec::default(),
            PaginationSpec::new(0, 10),
        )
        .expect_err("page 0");

    assert!(err.is_validation());
    assert!(matches!(
        err,
        Error::Plan(PlanError::Page(PageError::PageOutOfRange { page: 0 }))
    ));
    assert_eq!(session.store().calls.get(), 0);
}

#[test]
fn valid_query_makes_one_count_and_one_load() {
    let session = Session::new(CountingStore::new(numbered(3)), QueryLimits::default());

    session
        .query_issues(&FilterSpec::new(), &SortSpec::default(), PaginationSpec::default())
        .expect("query");

    assert_eq!(session.store().calls.get(), 2);
}

#[test]
fn unknown_sort_field_is_rejected_by_name() {
    let session = Session::new(CountingStore::new(numbered(3)), QueryLimits::default());

    let err = session
        .query_issues(
            &FilterSpec::new(),
            &SortSpec::asc("colour"),
            PaginationSpec::default(),
        )
        .expect_err("unknown field");

    assert!(matches!(
        &err,
        Error::Plan(PlanError::Sort(UnknownSortField { field })) if field == "colour"
    ));
    assert_eq!(session.store().calls.get(), 0);
}

#[test]
fn page_size_above_configured_max_is_rejected() {
    let session = Session::new(MemoryStore::<Issue>::new(), QueryLimits::new(20, 10));

    let err = session
        .query_issues(
            &FilterSpec::new(),
            &SortSpec::default(),
            PaginationSpec::new(1, 21),
        )
        .expect_err("too large");

    assert!(err.is_validation());
    assert_eq!(session.limits().max_page_size, 20);
}

#[test]
fn page_size_one_gives_one_page_per_row() {
    let session = session(numbered(4));
    let sort = SortSpec::asc("createdAt");

    for page in 1..=4 {
        let result = session
            .query_issues(&FilterSpec::new(), &sort, PaginationSpec::new(page, 1))
            .expect("query");
        assert_eq!(result.len(), 1);
        assert_eq!(result.pagination.total_pages, 4);
        assert_eq!(result.data[0].identifier, format!("ENG-{page}"));
    }

    let past_end = session
        .query_issues(&FilterSpec::new(), &sort, PaginationSpec::new(5, 1))
        .expect("query");
    assert!(past_end.is_empty());
    assert_eq!(past_end.pagination.total_pages, 4);
    assert_eq!(past_end.pagination.total_count, 4);
}

#[test]
fn empty_result_is_not_an_error() {
    let result = session(numbered(3))
        .query_issues(
            &FilterSpec::new().status([IssueStatus::Cancelled]),
            &SortSpec::default(),
            PaginationSpec::default(),
        )
        .expect("query");

    assert!(result.is_empty());
    assert_eq!(result.pagination.total_count, 0);
    assert_eq!(result.pagination.total_pages, 0);
}

#[test]
fn ties_resolve_identically_across_runs() {
    let issues: Vec<Issue> = (1..=6)
        .map(|n| IssueFixture::new(n, "same title").created_at(100).build())
        .collect();
    let session = session(issues.clone());
    let sort = SortSpec::asc("title");

    let first = session
        .query_issues(&FilterSpec::new(), &sort, PaginationSpec::new(1, 3))
        .expect("query");
    let again = session
        .query_issues(&FilterSpec::new(), &sort, PaginationSpec::new(1, 3))
        .expect("query");

    assert_eq!(first, again);
    assert_eq!(ids(&first.data), ids(&issues[..3]));
}

#[test]
fn store_failure_surfaces_as_internal_error() {
    let session = Session::new(FailingStore, QueryLimits::default());

    let err = session
        .query_issues(&FilterSpec::new(), &SortSpec::default(), PaginationSpec::default())
        .expect_err("store failure");

    assert!(!err.is_validation());
    assert_eq!(err.class(), ErrorClass::Internal);
    assert_eq!(err.origin(), ErrorOrigin::Store);
}

#[test]
fn oversized_store_window_is_an_invariant_violation() {
    let session = Session::new(
        UnboundedStore(numbered(5).into_iter().collect()),
        QueryLimits::default(),
    );

    let err = session
        .query_issues(&FilterSpec::new(), &SortSpec::default(), PaginationSpec::new(1, 2))
        .expect_err("window ignored");

    assert_eq!(err.class(), ErrorClass::InvariantViolation);
    assert_eq!(err.origin(), ErrorOrigin::Executor);
}

#[test]
fn global_counters_track_queries_and_rejections() {
    metrics_reset_all();
    let session = session(five_statuses());

    session
        .query_issues(
            &FilterSpec::new().status([IssueStatus::Todo]),
            &SortSpec::default(),
            PaginationSpec::new(1, 1),
        )
        .expect("query");
    session
        .query_issues(&FilterSpec::new(), &SortSpec::default(), PaginationSpec::new(0, 1))
        .expect_err("page 0");

    let counters = metrics_report().counters;
    assert_eq!(counters.query_calls, 2);
    assert_eq!(counters.rows_matched, 2);
    assert_eq!(counters.rows_returned, 1);
    assert_eq!(counters.validation_rejects, 1);
    assert_eq!(counters.store_errors, 0);
}

#[test]
fn session_sink_receives_events_instead_of_globals() {
    metrics_reset_all();
    let sink = Arc::new(RecordingSink::default());
    let session = Session::new(FailingStore, QueryLimits::default()).metrics_sink(sink.clone());

    session
        .query_issues(&FilterSpec::new(), &SortSpec::default(), PaginationSpec::default())
        .expect_err("store failure");

    assert_eq!(
        sink.events(),
        vec![
            MetricsEvent::QueryStart {
                entity_path: "trackdb::issue",
            },
            MetricsEvent::StoreError {
                entity_path: "trackdb::issue",
            },
        ]
    );
    assert_eq!(metrics_report().counters.query_calls, 0);
}

#[test]
fn omitted_page_size_uses_session_default() {
    let session = Session::new(
        numbered(12).into_iter().collect::<MemoryStore<Issue>>(),
        QueryLimits::new(10, 5),
    );

    let result = session
        .query_issues(&FilterSpec::new(), &SortSpec::default(), PaginationSpec::at(3))
        .expect("default size is within the max");

    assert_eq!(result.len(), 2);
    assert_eq!(result.pagination.page_size, 5);
    assert_eq!(result.pagination.total_pages, 3);
}

#[test]
fn one_session_serves_several_threads() {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session<MemoryStore<Issue>>>();

    let sink = Arc::new(RecordingSink::default());
    let session = session(numbered(6)).metrics_sink(sink.clone());

    std::thread::scope(|scope| {
        for page in 1..=3 {
            let session = &session;
            scope.spawn(move || {
                let result = session
                    .query_issues(&FilterSpec::new(), &SortSpec::default(), PaginationSpec::new(page, 2))
                    .expect("page query");
                assert_eq!(result.len(), 2);
            });
        }
    });

    let finished = sink
        .events()
        .into_iter()
        .filter(|event| matches!(event, MetricsEvent::QueryFinish { .. }))
        .count();
    assert_eq!(finished, 3);
}

proptest! {
    #[test]
    fn concatenated_pages_reproduce_the_full_sequence(
        count in 0u128..30,
        page_size in 1u32..8,
        descending in any::<bool>(),
    ) {
        let session = session(numbered(count));
        let sort = if descending {
            SortSpec::desc("title")
        } else {
            SortSpec::asc("title")
        };

        let full = session
            .query_issues(&FilterSpec::new(), &sort, PaginationSpec::new(1, 100))
            .expect("full query");

        let mut concatenated = Vec::new();
        let mut page = 1;
        loop {
            let result = session
                .query_issues(&FilterSpec::new(), &sort, PaginationSpec::new(page, page_size))
                .expect("page query");
            prop_assert_eq!(result.pagination.total_count, full.pagination.total_count);
            if result.is_empty() {
                prop_assert_eq!(u64::from(page), result.pagination.total_pages + 1);
                break;
            }
            concatenated.extend(result.into_data());
            page += 1;
        }

        prop_assert_eq!(concatenated, full.data);
    }
}
