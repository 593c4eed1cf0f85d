// Presentation ports: named slots and the charting capability
use crate::domain::chart::{ChartConfig, ChartHandle};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no readings to render")]
    NoReadings,
    #[error("presentation slot `{0}` does not exist")]
    MissingSlot(String),
    #[error("chart canvas `{0}` does not exist")]
    MissingCanvas(String),
    #[error("chart canvas `{0}` already holds a chart")]
    CanvasInUse(String),
    #[error("chart series length mismatch: {labels} labels vs {values} values")]
    SeriesLength { labels: usize, values: usize },
}

/// Named presentation slots the dashboard renderer writes into.
pub trait DashboardSurface: Send {
    /// Replace the markup of a slot
    fn write_html(&mut self, slot: &str, html: String) -> Result<(), RenderError>;

    /// Replace the plain text of a slot
    fn write_text(&mut self, slot: &str, text: String) -> Result<(), RenderError>;

    fn set_visible(&mut self, slot: &str, visible: bool) -> Result<(), RenderError>;

    /// Attach an activation link to an actionable slot
    fn set_action(&mut self, slot: &str, href: String) -> Result<(), RenderError>;
}

/// Line-chart capability. Charts are never updated in place: callers destroy
/// the old instance and create a new one.
pub trait ChartCapability: Send {
    fn create(&mut self, canvas: &str, config: ChartConfig) -> Result<ChartHandle, RenderError>;

    fn destroy(&mut self, handle: ChartHandle);
}
