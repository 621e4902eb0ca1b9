//! Filter-driven synchronisation of the dashboard metrics.
//!
//! Every accepted filter change starts a fresh fetch cycle: each registered
//! metric is marked pending at the new filter version and one request per
//! metric is handed back to the caller to run. Completions come back through
//! [`SyncController::apply`], which compares the result's version with the
//! current filter version and drops anything a later change has superseded.
//!
//! The controller does no scheduling itself. The dashboard view spawns the
//! returned futures on the UI runtime; tests drive them with an executor.
//! Superseded requests are not cancelled, their results are just ignored.

use api::{
    DataFetcher, FilterSnapshot, Gender, MetricId, MetricRequest, MetricResult, MetricSource,
};
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::future::LocalBoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use super::filter::FilterState;
use super::view_model::DashboardViewModel;

/// A request issued for one metric at one filter version.
pub struct PendingFetch {
    pub metric: MetricId,
    pub version: u64,
    pub task: LocalBoxFuture<'static, MetricResult>,
}

/// Outcome of handing a completed result to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    Applied,
    /// The filter moved on since the request was issued.
    Stale,
    /// The metric is not part of this controller's registry.
    Unregistered,
}

pub struct SyncController<S> {
    filter: FilterState,
    changes: UnboundedReceiver<FilterSnapshot>,
    fetcher: DataFetcher<S>,
    requests: Vec<MetricRequest>,
    results: Vec<MetricResult>,
    view: DashboardViewModel,
}

impl<S: MetricSource> SyncController<S> {
    pub fn new(
        mut filter: FilterState,
        fetcher: DataFetcher<S>,
        requests: Vec<MetricRequest>,
    ) -> Self {
        let changes = filter.subscribe();
        let results: Vec<_> = requests.iter().map(|r| MetricResult::idle(r.id)).collect();
        let view = DashboardViewModel::build(filter.snapshot(), &results);
        Self {
            filter,
            changes,
            fetcher,
            requests,
            results,
            view,
        }
    }

    /// Controller over the full metric registry.
    pub fn with_registry(filter: FilterState, fetcher: DataFetcher<S>) -> Self {
        Self::new(filter, fetcher, MetricRequest::registry())
    }

    pub fn filter(&self) -> FilterSnapshot {
        self.filter.snapshot()
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn view_model(&self) -> &DashboardViewModel {
        &self.view
    }

    pub fn result(&self, metric: MetricId) -> Option<&MetricResult> {
        self.results.iter().find(|r| r.metric == metric)
    }

    pub fn results(&self) -> &[MetricResult] {
        &self.results
    }

    /// First cycle for the initial filter.
    pub fn start(&mut self) -> Vec<PendingFetch> {
        let snapshot = self.filter.snapshot();
        self.dispatch(snapshot)
    }

    pub fn set_gender(&mut self, gender: Gender) -> Vec<PendingFetch> {
        self.filter.set_gender(gender);
        self.pump()
    }

    pub fn set_age_min(&mut self, value: u32) -> Vec<PendingFetch> {
        self.filter.set_age_min(value);
        self.pump()
    }

    pub fn set_age_max(&mut self, value: u32) -> Vec<PendingFetch> {
        self.filter.set_age_max(value);
        self.pump()
    }

    /// Drain change notifications and start one cycle for the newest.
    fn pump(&mut self) -> Vec<PendingFetch> {
        let mut latest = None;
        while let Ok(snapshot) = self.changes.try_recv() {
            latest = Some(snapshot);
        }
        latest.map(|snapshot| self.dispatch(snapshot)).unwrap_or_default()
    }

    fn dispatch(&mut self, snapshot: FilterSnapshot) -> Vec<PendingFetch> {
        info!(
            version = snapshot.version,
            gender = %snapshot.gender,
            age_min = snapshot.age_min,
            age_max = snapshot.age_max,
            "filter changed, refreshing metrics"
        );

        let mut fetches = Vec::with_capacity(self.requests.len());
        for (request, slot) in self.requests.iter().zip(self.results.iter_mut()) {
            *slot = MetricResult::pending(request.id, snapshot.version);
            fetches.push(PendingFetch {
                metric: request.id,
                version: snapshot.version,
                task: self.fetcher.fetch(request, snapshot),
            });
        }
        self.refresh_view();
        fetches
    }

    /// Version gate: accept `result` only if it answers the current filter.
    pub fn apply(&mut self, result: MetricResult) -> Reconcile {
        let current = self.filter.version();
        if result.request_version != current {
            debug!(
                metric = result.metric.key(),
                version = result.request_version,
                current,
                "discarding stale result"
            );
            return Reconcile::Stale;
        }

        let Some(slot) = self.results.iter_mut().find(|r| r.metric == result.metric) else {
            warn!(metric = result.metric.key(), "result for unregistered metric");
            return Reconcile::Unregistered;
        };
        *slot = result;
        self.refresh_view();
        Reconcile::Applied
    }

    /// Time out a request. Returns false when the metric already resolved or
    /// the filter moved on.
    pub fn expire(&mut self, metric: MetricId, version: u64) -> bool {
        if version != self.filter.version() {
            return false;
        }
        let Some(slot) = self
            .results
            .iter_mut()
            .find(|r| r.metric == metric && r.is_pending())
        else {
            return false;
        };
        warn!(metric = metric.key(), version, "request timed out");
        *slot = MetricResult::failed(metric, version, "request timed out");
        self.refresh_view();
        true
    }

    /// Run `fetches` concurrently, applying each as it completes.
    pub async fn settle(&mut self, fetches: Vec<PendingFetch>) {
        let mut in_flight: FuturesUnordered<_> = fetches.into_iter().map(|f| f.task).collect();
        while let Some(result) = in_flight.next().await {
            self.apply(result);
        }
    }

    fn refresh_view(&mut self) {
        self.view = DashboardViewModel::build(self.filter.snapshot(), &self.results);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use api::{FetchError, MetricStatus, QueryPairs};
    use futures::executor::block_on;
    use futures::future::{self, FutureExt};
    use serde_json::{json, Value};

    use super::*;
    use crate::core::present::SeriesStatus;

    type Calls = Rc<RefCell<Vec<(String, QueryPairs)>>>;

    /// Answers from the query string so tests can tell cycles apart:
    /// the country payload echoes `max_age` as the count for "FR".
    #[derive(Clone)]
    struct EchoSource {
        calls: Calls,
        fail: Option<&'static str>,
    }

    impl MetricSource for EchoSource {
        fn request_json(
            &self,
            path: &'static str,
            query: QueryPairs,
        ) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
            self.calls.borrow_mut().push((path.to_string(), query.clone()));
            if self.fail == Some(path) {
                return future::ready(Err(FetchError::shape("forced failure"))).boxed_local();
            }
            let max_age: u64 = query
                .iter()
                .find(|(k, _)| *k == "max_age")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or_default();
            let body = match path {
                "/scatterGradesByAge" => json!([{"age": max_age, "average_grade_max": 50.0}]),
                "/PieChart_Climbers_Countries" => json!({"FR": max_age, "US": 5}),
                _ => json!({"0": max_age, "1": 1}),
            };
            future::ready(Ok(body)).boxed_local()
        }
    }

    fn controller(fail: Option<&'static str>) -> (SyncController<EchoSource>, Calls) {
        let calls = Calls::default();
        let source = EchoSource {
            calls: calls.clone(),
            fail,
        };
        let ctrl = SyncController::with_registry(FilterState::default(), DataFetcher::new(source));
        (ctrl, calls)
    }

    fn take(fetches: &mut Vec<PendingFetch>, metric: MetricId) -> PendingFetch {
        let idx = fetches.iter().position(|f| f.metric == metric).unwrap();
        fetches.remove(idx)
    }

    #[test]
    fn starts_idle_then_pending() {
        let (mut ctrl, calls) = controller(None);
        assert!(ctrl.results().iter().all(|r| r.status == MetricStatus::Idle));
        assert!(calls.borrow().is_empty());

        let fetches = ctrl.start();
        assert_eq!(fetches.len(), MetricId::ALL.len());
        assert!(ctrl.results().iter().all(|r| r.is_pending()));
        assert!(ctrl.view_model().is_loading());
    }

    #[test]
    fn initial_country_scenario() {
        let (mut ctrl, _) = controller(None);
        let fetches = ctrl.start();
        block_on(ctrl.settle(fetches));

        let country = &ctrl.view_model().country;
        assert_eq!(country.status, SeriesStatus::Ready);
        assert_eq!(country.labels(), ["FR", "US"]);
        assert_eq!(country.values(), [60, 5]);
        assert!(!ctrl.view_model().is_loading());
    }

    #[test]
    fn rejected_change_issues_no_fetch() {
        let (mut ctrl, calls) = controller(None);
        let fetches = ctrl.set_age_max(17);
        assert!(fetches.is_empty());
        assert!(calls.borrow().is_empty());

        let filter = ctrl.filter();
        assert_eq!((filter.age_min, filter.age_max, filter.version), (18, 60, 0));
    }

    #[test]
    fn queued_changes_collapse_into_latest_cycle() {
        let (mut ctrl, calls) = controller(None);
        ctrl.filter.set_age_max(50);
        ctrl.filter.set_age_max(40);

        let fetches = ctrl.pump();
        assert_eq!(fetches.len(), MetricId::ALL.len());
        assert!(fetches.iter().all(|f| f.version == 2));
        assert!(ctrl.pump().is_empty());

        assert_eq!(calls.borrow().len(), MetricId::ALL.len());
        assert!(calls
            .borrow()
            .iter()
            .all(|(_, query)| query.contains(&("max_age", "40".to_string()))));

        block_on(ctrl.settle(fetches));
        assert_eq!(ctrl.view_model().country.values(), [40, 5]);
    }

    #[test]
    fn slow_old_response_cannot_overwrite_newer() {
        let (mut ctrl, _) = controller(None);
        let mut first = ctrl.set_age_max(50);
        let mut second = ctrl.set_age_max(40);
        assert_eq!(ctrl.filter().version, 2);

        // The newer cycle completes first.
        let newer = block_on(take(&mut second, MetricId::CountryPie).task);
        assert_eq!(ctrl.apply(newer), Reconcile::Applied);

        let older = block_on(take(&mut first, MetricId::CountryPie).task);
        assert_eq!(older.request_version, 1);
        assert_eq!(ctrl.apply(older), Reconcile::Stale);

        let country = ctrl.result(MetricId::CountryPie).unwrap();
        assert_eq!(country.request_version, 2);
        assert_eq!(ctrl.view_model().country.values(), [40, 5]);
    }

    #[test]
    fn superseded_result_leaves_metric_pending() {
        let (mut ctrl, _) = controller(None);
        ctrl.start();
        ctrl.set_gender(Gender::Male);
        ctrl.set_gender(Gender::Female);
        let mut old = ctrl.set_age_min(20);
        let mut current = ctrl.set_age_min(21);
        assert_eq!(ctrl.filter().version, 4);

        let stale = block_on(take(&mut old, MetricId::ExperiencePie).task);
        assert_eq!(stale.request_version, 3);
        assert_eq!(ctrl.apply(stale), Reconcile::Stale);

        let experience = ctrl.result(MetricId::ExperiencePie).unwrap();
        assert!(experience.is_pending());
        assert_eq!(experience.request_version, 4);

        let fresh = block_on(take(&mut current, MetricId::ExperiencePie).task);
        assert_eq!(ctrl.apply(fresh), Reconcile::Applied);
        assert_eq!(
            ctrl.result(MetricId::ExperiencePie).unwrap().status,
            MetricStatus::Ready
        );
    }

    #[test]
    fn failure_is_isolated_to_its_metric() {
        let (mut ctrl, _) = controller(Some("/PieChart_Climbers_Countries"));
        let fetches = ctrl.start();
        block_on(ctrl.settle(fetches));

        let view = ctrl.view_model();
        assert_eq!(view.country.status, SeriesStatus::Failed);
        assert!(view.country.data.is_empty());
        for metric in MetricId::ALL {
            if metric != MetricId::CountryPie {
                assert_eq!(view.series(metric).status, SeriesStatus::Ready, "{metric:?}");
            }
        }
    }

    #[test]
    fn next_change_retries_failed_metric() {
        let (mut ctrl, _) = controller(None);
        let fetches = ctrl.start();
        block_on(ctrl.settle(fetches));
        ctrl.apply(MetricResult::failed(MetricId::GenderPie, 0, "lost"));
        assert_eq!(ctrl.view_model().gender_pie.status, SeriesStatus::Failed);

        let fetches = ctrl.set_gender(Gender::Both);
        assert_eq!(ctrl.view_model().gender_pie.status, SeriesStatus::Loading);
        block_on(ctrl.settle(fetches));
        assert_eq!(ctrl.view_model().gender_pie.status, SeriesStatus::Ready);
    }

    #[test]
    fn gender_filter_reaches_query() {
        let (mut ctrl, calls) = controller(None);
        let fetches = ctrl.set_gender(Gender::Female);
        block_on(ctrl.settle(fetches));

        let calls = calls.borrow();
        let (_, scatter) = calls
            .iter()
            .find(|(path, _)| path == "/scatterGradesByAge")
            .unwrap();
        assert!(scatter.contains(&("sex", "1".to_string())));
        let (_, genders) = calls
            .iter()
            .find(|(path, _)| path == "/PieChart_Climbers_Genders")
            .unwrap();
        assert!(genders.iter().all(|(k, _)| *k != "sex"));
    }

    #[test]
    fn timeout_only_hits_pending_current_version() {
        let (mut ctrl, _) = controller(None);
        let mut fetches = ctrl.start();

        assert!(ctrl.expire(MetricId::AgeGradeScatter, 0));
        assert_eq!(ctrl.view_model().scatter.status, SeriesStatus::Failed);
        // Already failed.
        assert!(!ctrl.expire(MetricId::AgeGradeScatter, 0));

        let country = block_on(take(&mut fetches, MetricId::CountryPie).task);
        ctrl.apply(country);
        assert!(!ctrl.expire(MetricId::CountryPie, 0));
        assert_eq!(ctrl.view_model().country.status, SeriesStatus::Ready);

        ctrl.set_age_max(30);
        assert!(!ctrl.expire(MetricId::GenderBar, 0));
        assert!(ctrl.result(MetricId::GenderBar).unwrap().is_pending());
    }

    #[test]
    fn late_response_after_timeout_is_applied() {
        let (mut ctrl, _) = controller(None);
        let mut fetches = ctrl.start();
        ctrl.expire(MetricId::CountryPie, 0);

        let late = block_on(take(&mut fetches, MetricId::CountryPie).task);
        assert_eq!(ctrl.apply(late), Reconcile::Applied);
        assert_eq!(ctrl.view_model().country.status, SeriesStatus::Ready);
    }

    #[test]
    fn unknown_metric_is_reported() {
        let calls = Calls::default();
        let source = EchoSource { calls, fail: None };
        let mut ctrl = SyncController::new(
            FilterState::default(),
            DataFetcher::new(source),
            vec![MetricRequest::new(MetricId::CountryPie)],
        );
        ctrl.start();
        let outcome = ctrl.apply(MetricResult::failed(MetricId::GenderBar, 0, "x"));
        assert_eq!(outcome, Reconcile::Unregistered);
        assert_eq!(ctrl.view_model().gender_bar.status, SeriesStatus::Idle);
    }
}
