// Trend chart domain models
use serde::Serialize;

/// Opaque id of a chart instance issued by the charting capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChartHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesData {
    pub name: String,
    pub color: String,
    pub fill_color: String,
    pub fill: bool,
    pub tension: f64,
    pub point_radius: u32,
    /// NaN entries serialize as `null`, which the browser draws as a gap
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub subtitle: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub labels: Vec<String>,
    pub series: SeriesData,
}

impl ChartConfig {
    pub fn is_consistent(&self) -> bool {
        self.labels.len() == self.series.values.len()
    }
}
