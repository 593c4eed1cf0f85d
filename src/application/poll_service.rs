// Poll loop - Fetch, evaluate and render on a fixed interval
use crate::application::chart_service::TrendChartRenderer;
use crate::application::dashboard_service::{DashboardRenderer, LAST_UPDATED_SLOT};
use crate::application::reading_source::ReadingSource;
use crate::application::render_target::{ChartCapability, DashboardSurface};
use crate::domain::thresholds::Status;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{RwLock, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const NO_DATA_TEXT: &str = "Last Updated: no data yet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Both renderers ran; `failures` counts isolated slot and chart errors
    Rendered { readings: usize, failures: usize },
    /// The source returned a header-only sheet
    NoData,
    /// Fetch failed; the presentation was left untouched
    FetchFailed(String),
}

/// Receives the outcome of every poll cycle.
pub trait CycleLog {
    fn record_cycle(&mut self, outcome: &CycleOutcome);
}

pub struct Poller<P> {
    source: Arc<dyn ReadingSource>,
    dashboard: DashboardRenderer,
    charts: TrendChartRenderer,
    page: Arc<RwLock<P>>,
    interval: Duration,
}

impl<P> Poller<P>
where
    P: DashboardSurface + ChartCapability + CycleLog + Send + Sync + 'static,
{
    pub fn new(
        source: Arc<dyn ReadingSource>,
        dashboard: DashboardRenderer,
        charts: TrendChartRenderer,
        page: Arc<RwLock<P>>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            dashboard,
            charts,
            page,
            interval,
        }
    }

    #[cfg(test)]
    pub fn charts(&self) -> &TrendChartRenderer {
        &self.charts
    }

    /// Run one fetch-evaluate-render pass.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let started = Instant::now();

        let readings = match self.source.fetch_readings().await {
            Ok(readings) => readings,
            Err(e) => {
                tracing::warn!("Poll cycle abandoned, fetch failed: {:#}", e);
                let outcome = CycleOutcome::FetchFailed(format!("{:#}", e));
                self.page.write().await.record_cycle(&outcome);
                return outcome;
            }
        };

        // Rendering happens under one write lock so readers never see a half-updated page
        let mut page = self.page.write().await;

        let outcome = if readings.is_empty() {
            tracing::debug!("Source has no data rows yet");
            if let Err(e) = page.write_text(LAST_UPDATED_SLOT, NO_DATA_TEXT.to_string()) {
                tracing::warn!("Could not write no-data state: {}", e);
            }
            CycleOutcome::NoData
        } else {
            let dashboard_failures = match self.dashboard.render(&readings, &mut *page) {
                Ok(render) => {
                    for card in render
                        .summary
                        .cards
                        .iter()
                        .filter(|c| c.status == Status::Unsafe)
                    {
                        tracing::warn!(
                            "{} outside WHO limits at {}: {}",
                            card.metric,
                            render.summary.last_updated,
                            card.latest
                        );
                    }
                    render.failures.len()
                }
                Err(e) => {
                    tracing::warn!("Dashboard not rendered: {}", e);
                    1
                }
            };
            let chart_failures = self.charts.render(&readings, &mut *page).failures.len();

            tracing::debug!(
                "Rendered {} readings in {:?}",
                readings.len(),
                started.elapsed()
            );
            CycleOutcome::Rendered {
                readings: readings.len(),
                failures: dashboard_failures + chart_failures,
            }
        };

        page.record_cycle(&outcome);
        outcome
    }

    /// Spawn the loop. The first cycle runs immediately; cycles never overlap and
    /// ticks missed while a cycle is outstanding are skipped.
    pub fn start(self) -> PollHandle<P> {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let mut poller = self;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poller.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        poller.run_cycle().await;
                    }
                }
            }

            tracing::info!("Poll loop stopped");
            poller
        });

        PollHandle {
            stop: stop_tx,
            task,
        }
    }
}

/// Handle to a running poll loop.
pub struct PollHandle<P> {
    stop: oneshot::Sender<()>,
    task: JoinHandle<Poller<P>>,
}

impl<P> PollHandle<P> {
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop after the in-flight cycle (if any) and hand the poller back.
    pub async fn stop(self) -> anyhow::Result<Poller<P>> {
        let _ = self.stop.send(());
        Ok(self.task.await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::ChartOptions;
    use crate::application::dashboard_service::{ALERT_SLOT, DashboardOptions};
    use crate::application::test_support::{FakeSource, RecordingPage, reading};
    use crate::domain::alert::AlertMessage;
    use crate::domain::telemetry::Metric;

    fn poller(source: Arc<FakeSource>, page: Arc<RwLock<RecordingPage>>) -> Poller<RecordingPage> {
        let dashboard = DashboardRenderer::new(DashboardOptions {
            show_average: true,
            average_window: 100,
            alert: Some(AlertMessage::new(
                "ops@example.org".to_string(),
                "Alert".to_string(),
                "Check".to_string(),
            )),
        });
        let charts = TrendChartRenderer::new(ChartOptions {
            fill: true,
            time_of_day_labels: true,
        });
        Poller::new(source, dashboard, charts, page, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_cycle_renders_dashboard_and_charts() {
        let source = Arc::new(FakeSource::new(vec![Ok(vec![reading(
            "2024-01-01 09:00",
            7.0,
            300.0,
            2.0,
            25.0,
        )])]));
        let page = Arc::new(RwLock::new(RecordingPage::default()));
        let mut poller = poller(source, page.clone());

        let outcome = poller.run_cycle().await;
        assert_eq!(
            outcome,
            CycleOutcome::Rendered {
                readings: 1,
                failures: 0
            }
        );

        let page = page.read().await;
        assert_eq!(
            page.surface.text["last-updated"],
            "Last Updated: 2024-01-01 09:00"
        );
        assert_eq!(page.surface.visible.get(ALERT_SLOT), Some(&false));
        assert_eq!(page.charts.calls.len(), 4);
        assert_eq!(page.cycles, vec![outcome]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_page_untouched() {
        let source = Arc::new(FakeSource::new(vec![
            Ok(vec![reading("2024-01-01 09:00", 7.0, 300.0, 2.0, 25.0)]),
            Err("connection refused".to_string()),
        ]));
        let page = Arc::new(RwLock::new(RecordingPage::default()));
        let mut poller = poller(source, page.clone());

        poller.run_cycle().await;
        let before = page.read().await.surface.html.clone();
        let calls_before = page.read().await.charts.calls.len();

        let outcome = poller.run_cycle().await;
        let CycleOutcome::FetchFailed(message) = &outcome else {
            panic!("expected a fetch failure, got {:?}", outcome);
        };
        assert!(message.contains("connection refused"));

        let page = page.read().await;
        assert_eq!(page.surface.html, before);
        assert_eq!(page.charts.calls.len(), calls_before);
        assert_eq!(page.cycles.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_sheet_records_no_data() {
        let source = Arc::new(FakeSource::new(vec![Ok(Vec::new())]));
        let page = Arc::new(RwLock::new(RecordingPage::default()));
        let mut poller = poller(source, page.clone());

        assert_eq!(poller.run_cycle().await, CycleOutcome::NoData);

        let page = page.read().await;
        assert_eq!(page.surface.text["last-updated"], NO_DATA_TEXT);
        assert!(page.surface.html.is_empty());
        assert!(page.charts.calls.is_empty());
    }

    #[tokio::test]
    async fn test_alert_clears_after_safe_cycle() {
        let source = Arc::new(FakeSource::new(vec![
            Ok(vec![reading("a 1", 9.5, 300.0, 2.0, 25.0)]),
            Ok(vec![reading("a 2", 7.5, 300.0, 2.0, 25.0)]),
        ]));
        let page = Arc::new(RwLock::new(RecordingPage::default()));
        let mut poller = poller(source, page.clone());

        poller.run_cycle().await;
        assert_eq!(page.read().await.surface.visible.get(ALERT_SLOT), Some(&true));

        poller.run_cycle().await;
        assert_eq!(page.read().await.surface.visible.get(ALERT_SLOT), Some(&false));
    }

    #[tokio::test]
    async fn test_each_cycle_replaces_charts() {
        let rows = vec![reading("a 1", 7.0, 300.0, 2.0, 25.0)];
        let source = Arc::new(FakeSource::new(vec![Ok(rows.clone()), Ok(rows)]));
        let page = Arc::new(RwLock::new(RecordingPage::default()));
        let mut poller = poller(source, page.clone());

        poller.run_cycle().await;
        let first = poller.charts().registry().get(Metric::Ph);
        poller.run_cycle().await;
        let second = poller.charts().registry().get(Metric::Ph);

        assert!(first.is_some());
        assert_ne!(first, second);
        assert_eq!(page.read().await.charts.configs.len(), 4);
    }

    #[tokio::test]
    async fn test_start_runs_first_cycle_immediately_and_stops() {
        let source = Arc::new(FakeSource::new(Vec::new()));
        let page = Arc::new(RwLock::new(RecordingPage::default()));
        let mut poller = poller(source.clone(), page.clone());
        poller.interval = Duration::from_secs(3600);

        let handle = poller.start();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        handle.stop().await.unwrap();
        assert_eq!(source.fetches(), 1);
        assert_eq!(page.read().await.cycles, vec![CycleOutcome::NoData]);
    }

    #[tokio::test]
    async fn test_loop_keeps_running_after_failures() {
        let source = Arc::new(FakeSource::new(vec![
            Err("timeout".to_string()),
            Err("timeout".to_string()),
        ]));
        let page = Arc::new(RwLock::new(RecordingPage::default()));

        let handle = poller(source.clone(), page.clone()).start();
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.stop().await.unwrap();

        assert!(source.fetches() >= 3);
    }
}
