// Dashboard renderer - Summary cards, last-updated stamp and alert toggle
use crate::application::render_target::{DashboardSurface, RenderError};
use crate::domain::alert::AlertMessage;
use crate::domain::dashboard::{DashboardSummary, MetricCard, WindowAverage};
use crate::domain::telemetry::{Metric, Reading};
use crate::domain::thresholds::evaluate;

pub const LAST_UPDATED_SLOT: &str = "last-updated";
pub const ALERT_SLOT: &str = "alertBtn";

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub show_average: bool,
    pub average_window: usize,
    /// Alert mode is enabled when a message is configured
    pub alert: Option<AlertMessage>,
}

/// Outcome of one dashboard render. Slot failures do not abort the others.
#[derive(Debug, Clone)]
pub struct DashboardRender {
    pub summary: DashboardSummary,
    pub failures: Vec<RenderError>,
}

#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    options: DashboardOptions,
}

impl DashboardRenderer {
    pub fn new(options: DashboardOptions) -> Self {
        Self { options }
    }

    /// Compute latest values, windowed averages and statuses.
    pub fn summarize(&self, readings: &[Reading]) -> Result<DashboardSummary, RenderError> {
        let latest = readings.last().ok_or(RenderError::NoReadings)?;
        let window = self.options.average_window.max(1);
        let recent = &readings[readings.len().saturating_sub(window)..];

        let cards: Vec<MetricCard> = Metric::ALL
            .into_iter()
            .map(|metric| {
                let value = latest.value(metric);
                let average = self.options.show_average.then(|| WindowAverage {
                    window,
                    value: window_mean(recent, metric),
                });
                MetricCard::new(metric, value, average, evaluate(metric, value))
            })
            .collect();

        let mut summary = DashboardSummary::new(latest.time.clone(), cards, None);
        if self.options.alert.is_some() {
            summary.alert_visible = Some(summary.any_unsafe());
        }
        Ok(summary)
    }

    /// Write the summary into the surface's slots.
    pub fn render(
        &self,
        readings: &[Reading],
        surface: &mut dyn DashboardSurface,
    ) -> Result<DashboardRender, RenderError> {
        let summary = self.summarize(readings)?;
        let mut failures = Vec::new();

        let mut record = |result: Result<(), RenderError>| {
            if let Err(e) = result {
                tracing::warn!("Dashboard slot update failed: {}", e);
                failures.push(e);
            }
        };

        record(surface.write_text(
            LAST_UPDATED_SLOT,
            format!("Last Updated: {}", summary.last_updated),
        ));

        for card in &summary.cards {
            record(surface.write_html(&card.metric.card_slot(), card.to_html()));
        }

        if let (Some(alert), Some(visible)) = (&self.options.alert, summary.alert_visible) {
            record(surface.set_action(ALERT_SLOT, alert.mailto_href()));
            record(surface.set_visible(ALERT_SLOT, visible));
        }

        Ok(DashboardRender { summary, failures })
    }
}

/// Arithmetic mean over the slice; NaN entries propagate.
fn window_mean(readings: &[Reading], metric: Metric) -> f64 {
    let sum: f64 = readings.iter().map(|r| r.value(metric)).sum();
    sum / readings.len() as f64
}
