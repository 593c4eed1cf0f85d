// Trend chart renderer - One line chart per metric, rebuilt every poll cycle
use crate::application::render_target::{ChartCapability, RenderError};
use crate::domain::chart::{ChartConfig, ChartHandle, ChartKind, SeriesData};
use crate::domain::telemetry::{Metric, Reading};
use crate::domain::thresholds::compliance_note;
use std::collections::HashMap;

const LINE_TENSION: f64 = 0.3;
const POINT_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    /// Fill the area beneath the line
    pub fill: bool,
    /// Label the x axis with the time-of-day part of each timestamp only
    pub time_of_day_labels: bool,
}

/// Currently displayed chart per metric.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    handles: HashMap<Metric, ChartHandle>,
}

impl ChartRegistry {
    #[cfg(test)]
    pub fn get(&self, metric: Metric) -> Option<ChartHandle> {
        self.handles.get(&metric).copied()
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.handles.len()
    }

    /// Destroy and forget the chart registered for `metric`, if any.
    pub fn destroy(
        &mut self,
        metric: Metric,
        charts: &mut dyn ChartCapability,
    ) -> Option<ChartHandle> {
        let handle = self.handles.remove(&metric)?;
        charts.destroy(handle);
        Some(handle)
    }

    /// Create a chart for `metric`. Any previous chart is destroyed first.
    pub fn create(
        &mut self,
        metric: Metric,
        config: ChartConfig,
        charts: &mut dyn ChartCapability,
    ) -> Result<ChartHandle, RenderError> {
        self.destroy(metric, charts);
        let handle = charts.create(&metric.canvas_slot(), config)?;
        self.handles.insert(metric, handle);
        Ok(handle)
    }
}

#[derive(Debug, Default)]
pub struct ChartRender {
    pub rendered: Vec<(Metric, ChartHandle)>,
    pub failures: Vec<(Metric, RenderError)>,
}

#[derive(Debug)]
pub struct TrendChartRenderer {
    options: ChartOptions,
    registry: ChartRegistry,
}

impl TrendChartRenderer {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            registry: ChartRegistry::default(),
        }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &ChartRegistry {
        &self.registry
    }

    pub fn build_config(&self, metric: Metric, readings: &[Reading]) -> ChartConfig {
        let labels: Vec<String> = readings
            .iter()
            .map(|r| {
                if self.options.time_of_day_labels {
                    r.time_of_day().to_string()
                } else {
                    r.time.clone()
                }
            })
            .collect();
        let values: Vec<f64> = readings.iter().map(|r| r.value(metric)).collect();
        let latest = values.last().copied().unwrap_or(f64::NAN);

        ChartConfig {
            kind: ChartKind::Line,
            title: format!("{} vs Time", metric.label()),
            subtitle: compliance_note(metric, latest),
            x_axis_title: "Time".to_string(),
            y_axis_title: metric.label().to_string(),
            labels,
            series: SeriesData {
                name: metric.label().to_string(),
                color: metric.color().to_string(),
                fill_color: metric.fill_color().to_string(),
                fill: self.options.fill,
                tension: LINE_TENSION,
                point_radius: POINT_RADIUS,
                values,
            },
        }
    }

    /// Replace the chart for a single metric.
    pub fn render_metric(
        &mut self,
        metric: Metric,
        readings: &[Reading],
        charts: &mut dyn ChartCapability,
    ) -> Result<ChartHandle, RenderError> {
        let config = self.build_config(metric, readings);
        self.registry.create(metric, config, charts)
    }

    /// Rebuild all four charts. A failing metric does not stop the others.
    pub fn render(
        &mut self,
        readings: &[Reading],
        charts: &mut dyn ChartCapability,
    ) -> ChartRender {
        let mut result = ChartRender::default();
        for metric in Metric::ALL {
            match self.render_metric(metric, readings, charts) {
                Ok(handle) => result.rendered.push((metric, handle)),
                Err(e) => {
                    tracing::warn!("Chart for {} not rendered: {}", metric, e);
                    result.failures.push((metric, e));
                }
            }
        }
        result
    }
}
