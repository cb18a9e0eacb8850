//! Dashboard Lifecycle
//!
//! `DashboardController` owns the shared page, the chart slots and the
//! polling task. Detail loads write into a caller-owned `ReviewModal`.

use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::{
    ControllerError, InFlightGuard, InFlightPermit, LifecycleState, PointerTarget,
    RefreshOutcome, ReviewModal,
};
use crate::chart::ChartSlots;
use crate::client::{DashboardApi, FetchError};
use crate::format::Locale;
use crate::page::{DocumentOptions, ModalState, Page, PageSnapshot};
use crate::render::{
    apply_repository_table, apply_repository_table_failure, apply_review_list,
    apply_review_list_failure, apply_statistics, apply_statistics_failure, apply_trends,
    detail_error_html, detail_loading_html, render_review_detail, RepositoryTableView,
    ReviewListView, StatisticsView,
};

/// Runtime settings for the controller
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub poll_interval: Duration,
    pub recent_limit: usize,
    pub detail_enabled: bool,
    pub strict_refresh: bool,
    pub locale: Locale,
    pub trends_enabled: bool,
    pub trend_days: u32,
    pub repositories_enabled: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            recent_limit: 10,
            detail_enabled: true,
            strict_refresh: false,
            locale: Locale::Ko,
            trends_enabled: false,
            trend_days: 30,
            repositories_enabled: false,
        }
    }
}

/// Outcomes of one combined refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub statistics: RefreshOutcome,
    pub reviews: RefreshOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<RefreshOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<RefreshOutcome>,
}

/// Fetch history of one endpoint
#[derive(Debug, Clone, Default, Serialize)]
pub struct EndpointHealth {
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Failures since the last success
    pub error_count: u32,
    /// Refreshes skipped by the in-flight guard
    pub skipped: u64,
}

impl EndpointHealth {
    fn record(&mut self, result: Result<(), &FetchError>) {
        match result {
            Ok(()) => {
                self.last_success = Some(Utc::now());
                self.error_count = 0;
            }
            Err(e) => {
                self.last_failure = Some(Utc::now());
                self.last_error = Some(e.to_string());
                self.error_count += 1;
            }
        }
    }
}

#[derive(Debug, Default)]
struct HealthState {
    statistics: EndpointHealth,
    reviews: EndpointHealth,
    trends: EndpointHealth,
    repositories: EndpointHealth,
    last_cycle: Option<CycleReport>,
}

impl HealthState {
    fn endpoint_mut(&mut self, endpoint: Endpoint) -> &mut EndpointHealth {
        match endpoint {
            Endpoint::Statistics => &mut self.statistics,
            Endpoint::Reviews => &mut self.reviews,
            Endpoint::Trends => &mut self.trends,
            Endpoint::Repositories => &mut self.repositories,
        }
    }
}

/// Health summary served by `/health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub state: LifecycleState,
    pub healthy: bool,
    pub uptime_seconds: u64,
    pub cycles_completed: u64,
    pub last_cycle: Option<CycleReport>,
    pub statistics: EndpointHealth,
    pub reviews: EndpointHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends: Option<EndpointHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<EndpointHealth>,
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Statistics,
    Reviews,
    Trends,
    Repositories,
}

impl Endpoint {
    fn name(&self) -> &'static str {
        match self {
            Endpoint::Statistics => "statistics",
            Endpoint::Reviews => "reviews",
            Endpoint::Trends => "trends",
            Endpoint::Repositories => "repositories",
        }
    }
}

enum Admission<'a> {
    Proceed(Option<InFlightPermit<'a>>),
    Skip,
}

/// Shared page, the chart handles that own its canvases, and every review
/// id a rendered list has offered
#[derive(Debug)]
struct DashboardView {
    page: Page,
    charts: ChartSlots,
    known_reviews: HashSet<u64>,
}

/// Dashboard lifecycle and modal controller
pub struct DashboardController {
    api: Arc<dyn DashboardApi>,
    settings: DashboardSettings,
    view: Mutex<DashboardView>,
    started: AtomicBool,
    statistics_guard: InFlightGuard,
    reviews_guard: InFlightGuard,
    trends_guard: InFlightGuard,
    repositories_guard: InFlightGuard,
    health: RwLock<HealthState>,
    cycles: AtomicU64,
    created_at: Instant,
}

impl DashboardController {
    pub fn new(api: Arc<dyn DashboardApi>, settings: DashboardSettings) -> Self {
        Self {
            api,
            view: Mutex::new(DashboardView {
                page: Page::new(settings.locale),
                charts: ChartSlots::default(),
                known_reviews: HashSet::new(),
            }),
            settings,
            started: AtomicBool::new(false),
            statistics_guard: InFlightGuard::new(),
            reviews_guard: InFlightGuard::new(),
            trends_guard: InFlightGuard::new(),
            repositories_guard: InFlightGuard::new(),
            health: RwLock::new(HealthState::default()),
            cycles: AtomicU64::new(0),
            created_at: Instant::now(),
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn state(&self) -> LifecycleState {
        if self.started.load(Ordering::Acquire) {
            LifecycleState::Polling
        } else {
            LifecycleState::Uninitialized
        }
    }

    /// Enter the polling state.
    ///
    /// The first refresh runs immediately, then one every poll interval.
    /// Each refresh is spawned as its own task and is never awaited by the
    /// ticker.
    pub fn start(self: &Arc<Self>) -> Result<JoinHandle<()>, ControllerError> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(ControllerError::AlreadyPolling);
        }

        let period = self.settings.poll_interval.max(Duration::from_millis(1));
        tracing::info!(
            interval_secs = period.as_secs_f64(),
            recent_limit = self.settings.recent_limit,
            strict = self.settings.strict_refresh,
            "Dashboard polling started"
        );

        let controller = Arc::clone(self);
        Ok(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let cycle = Arc::clone(&controller);
                tokio::spawn(async move {
                    cycle.refresh_all().await;
                });
            }
        }))
    }

    /// Refresh statistics and the review list concurrently, plus trends and
    /// repository statistics when enabled. A failure in one does not affect
    /// the others.
    pub async fn refresh_all(&self) -> CycleReport {
        let trends = async {
            if self.settings.trends_enabled {
                Some(self.refresh_trends().await)
            } else {
                None
            }
        };
        let repositories = async {
            if self.settings.repositories_enabled {
                Some(self.refresh_repositories().await)
            } else {
                None
            }
        };

        let (statistics, reviews, trends, repositories) = tokio::join!(
            self.refresh_statistics(),
            self.refresh_reviews(),
            trends,
            repositories
        );

        let cycles = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(
            cycle = cycles,
            ?statistics,
            ?reviews,
            ?trends,
            ?repositories,
            "Refresh cycle complete"
        );

        let report = CycleReport {
            statistics,
            reviews,
            trends,
            repositories,
        };
        self.health.write().await.last_cycle = Some(report);
        report
    }

    pub async fn refresh_statistics(&self) -> RefreshOutcome {
        let _permit = match self.admit(&self.statistics_guard, Endpoint::Statistics).await {
            Admission::Proceed(permit) => permit,
            Admission::Skip => return RefreshOutcome::Skipped,
        };

        let result = self.api.fetch_statistics().await;
        let locale = self.settings.locale;

        let outcome = {
            let mut guard = self.view.lock().await;
            let view = &mut *guard;
            match &result {
                Ok(stats) => {
                    let rendered = StatisticsView::build(stats, self.now(), locale);
                    apply_statistics(&mut view.page, &mut view.charts, rendered);
                    RefreshOutcome::Rendered
                }
                Err(e) => {
                    log_fetch_failure(e, "Failed to load statistics");
                    apply_statistics_failure(&mut view.page, locale);
                    RefreshOutcome::Degraded
                }
            }
        };

        self.record(Endpoint::Statistics, result.as_ref().map(|_| ())).await;
        outcome
    }

    pub async fn refresh_reviews(&self) -> RefreshOutcome {
        let _permit = match self.admit(&self.reviews_guard, Endpoint::Reviews).await {
            Admission::Proceed(permit) => permit,
            Admission::Skip => return RefreshOutcome::Skipped,
        };

        let result = self.api.fetch_recent_reviews(self.settings.recent_limit).await;
        let locale = self.settings.locale;

        let outcome = {
            let mut view = self.view.lock().await;
            match &result {
                Ok(reviews) => {
                    let rendered = ReviewListView::build(reviews, self.now(), locale);
                    apply_review_list(&mut view.page, &rendered, locale, self.settings.detail_enabled);
                    view.known_reviews.extend(reviews.iter().map(|review| review.id));
                    RefreshOutcome::Rendered
                }
                Err(e) => {
                    log_fetch_failure(e, "Failed to load recent reviews");
                    apply_review_list_failure(&mut view.page, locale);
                    RefreshOutcome::Degraded
                }
            }
        };

        self.record(Endpoint::Reviews, result.as_ref().map(|_| ())).await;
        outcome
    }

    /// Redraw the trend chart. A failure leaves the previous chart in place.
    pub async fn refresh_trends(&self) -> RefreshOutcome {
        if !self.settings.trends_enabled {
            return RefreshOutcome::Skipped;
        }
        let _permit = match self.admit(&self.trends_guard, Endpoint::Trends).await {
            Admission::Proceed(permit) => permit,
            Admission::Skip => return RefreshOutcome::Skipped,
        };

        let result = self.api.fetch_trends(self.settings.trend_days).await;

        let outcome = match &result {
            Ok(trends) => {
                let mut guard = self.view.lock().await;
                let view = &mut *guard;
                apply_trends(&mut view.page, &mut view.charts, trends, self.settings.locale);
                RefreshOutcome::Rendered
            }
            Err(e) => {
                log_fetch_failure(e, "Failed to load trends");
                RefreshOutcome::Degraded
            }
        };

        self.record(Endpoint::Trends, result.as_ref().map(|_| ())).await;
        outcome
    }

    pub async fn refresh_repositories(&self) -> RefreshOutcome {
        if !self.settings.repositories_enabled {
            return RefreshOutcome::Skipped;
        }
        let _permit = match self.admit(&self.repositories_guard, Endpoint::Repositories).await {
            Admission::Proceed(permit) => permit,
            Admission::Skip => return RefreshOutcome::Skipped,
        };

        let result = self.api.fetch_repository_statistics().await;
        let locale = self.settings.locale;

        let outcome = {
            let mut view = self.view.lock().await;
            match &result {
                Ok(repositories) => {
                    let rendered = RepositoryTableView::build(repositories, locale);
                    apply_repository_table(&mut view.page, &rendered, locale);
                    RefreshOutcome::Rendered
                }
                Err(e) => {
                    log_fetch_failure(e, "Failed to load repository statistics");
                    apply_repository_table_failure(&mut view.page, locale);
                    RefreshOutcome::Degraded
                }
            }
        };

        self.record(Endpoint::Repositories, result.as_ref().map(|_| ())).await;
        outcome
    }

    /// Whether `id` may be opened: detail must be enabled and the id must
    /// have appeared in a rendered review list
    pub async fn check_selectable(&self, id: u64) -> Result<(), ControllerError> {
        if !self.settings.detail_enabled {
            return Err(ControllerError::DetailDisabled);
        }
        if !self.view.lock().await.known_reviews.contains(&id) {
            return Err(ControllerError::UnknownReview(id));
        }
        Ok(())
    }

    /// Open `modal` for a review and load its detail into it.
    ///
    /// The result is written into the modal content even if the modal was
    /// closed while the request was in flight.
    pub async fn select_review(
        &self,
        modal: &ReviewModal,
        id: u64,
    ) -> Result<RefreshOutcome, ControllerError> {
        self.check_selectable(id).await?;
        let locale = self.settings.locale;

        modal.open(id, detail_loading_html(locale)).await;

        let outcome = match self.api.fetch_review_detail(id).await {
            Ok(detail) => {
                modal
                    .set_content(render_review_detail(&detail, self.now(), locale))
                    .await;
                RefreshOutcome::Rendered
            }
            Err(e) => {
                tracing::error!(
                    review_id = id,
                    endpoint = e.endpoint(),
                    timeout = e.is_timeout(),
                    error = %e,
                    "Failed to load review detail"
                );
                modal.set_content(detail_error_html(locale)).await;
                RefreshOutcome::Degraded
            }
        };
        Ok(outcome)
    }

    pub async fn close_modal(&self, modal: &ReviewModal) {
        modal.hide().await;
    }

    /// Pointer-down on the modal. Only the backdrop closes it; returns
    /// whether the modal was closed.
    pub async fn pointer_down(&self, modal: &ReviewModal, target: PointerTarget) -> bool {
        match target {
            PointerTarget::Backdrop => {
                self.close_modal(modal).await;
                true
            }
            PointerTarget::Content => false,
        }
    }

    /// Shared page plus one viewer's modal as a full HTML document
    pub async fn render_document(&self, modal: &ModalState) -> String {
        let options = DocumentOptions {
            refresh_secs: self.settings.poll_interval.as_secs(),
            show_trends: self.settings.trends_enabled,
            show_repositories: self.settings.repositories_enabled,
        };
        self.view.lock().await.page.render_document(&options, modal)
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        self.view.lock().await.page.snapshot()
    }

    pub async fn health(&self) -> HealthReport {
        let health = self.health.read().await;
        HealthReport {
            state: self.state(),
            healthy: health.statistics.error_count == 0 && health.reviews.error_count == 0,
            uptime_seconds: self.created_at.elapsed().as_secs(),
            cycles_completed: self.cycles.load(Ordering::Relaxed),
            last_cycle: health.last_cycle,
            statistics: health.statistics.clone(),
            reviews: health.reviews.clone(),
            trends: self
                .settings
                .trends_enabled
                .then(|| health.trends.clone()),
            repositories: self
                .settings
                .repositories_enabled
                .then(|| health.repositories.clone()),
        }
    }

    async fn admit<'a>(&self, guard: &'a InFlightGuard, endpoint: Endpoint) -> Admission<'a> {
        if !self.settings.strict_refresh {
            return Admission::Proceed(None);
        }

        match guard.try_acquire() {
            Some(permit) => Admission::Proceed(Some(permit)),
            None => {
                tracing::debug!(endpoint = endpoint.name(), "Previous refresh still in flight, skipping");
                self.health.write().await.endpoint_mut(endpoint).skipped += 1;
                Admission::Skip
            }
        }
    }

    async fn record(&self, endpoint: Endpoint, result: Result<(), &FetchError>) {
        self.health.write().await.endpoint_mut(endpoint).record(result);
    }

    /// Display clock; server timestamps without an offset are read in this
    /// offset
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().into()
    }
}

fn log_fetch_failure(e: &FetchError, message: &str) {
    tracing::error!(
        endpoint = e.endpoint(),
        timeout = e.is_timeout(),
        error = %e,
        "{}",
        message
    );
}
