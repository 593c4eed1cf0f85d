// Dashboard domain model
use super::telemetry::Metric;
use super::thresholds::Status;

/// Per-metric summary written into a card slot.
#[derive(Debug, Clone)]
pub struct MetricCard {
    pub metric: Metric,
    pub latest: f64,
    /// Mean over the trailing window, when averaging is enabled
    pub average: Option<WindowAverage>,
    pub status: Status,
}

#[derive(Debug, Clone, Copy)]
pub struct WindowAverage {
    pub window: usize,
    pub value: f64,
}

impl MetricCard {
    pub fn new(
        metric: Metric,
        latest: f64,
        average: Option<WindowAverage>,
        status: Status,
    ) -> Self {
        Self {
            metric,
            latest,
            average,
            status,
        }
    }

    /// Card markup. Non-finite values are printed as-is ("NaN", "inf").
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<h3>{}</h3>\n<p>Latest: <strong>{:.2}</strong></p>\n",
            self.metric.key().to_uppercase(),
            self.latest
        );
        if let Some(avg) = self.average {
            html.push_str(&format!(
                "<p>Avg (Last {}): <strong>{:.2}</strong></p>\n",
                avg.window, avg.value
            ));
        }
        html.push_str(&format!(
            "<p class=\"{}\">{}</p>",
            self.status.css_class(),
            self.status
        ));
        html
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub last_updated: String,
    pub cards: Vec<MetricCard>,
    /// `None` when alert mode is disabled
    pub alert_visible: Option<bool>,
}

impl DashboardSummary {
    pub fn new(last_updated: String, cards: Vec<MetricCard>, alert_visible: Option<bool>) -> Self {
        Self {
            last_updated,
            cards,
            alert_visible,
        }
    }

    #[cfg(test)]
    pub fn card(&self, metric: Metric) -> Option<&MetricCard> {
        self.cards.iter().find(|c| c.metric == metric)
    }

    pub fn any_unsafe(&self) -> bool {
        self.cards.iter().any(|c| c.status == Status::Unsafe)
    }
}
