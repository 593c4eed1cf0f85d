// Recording fakes for the presentation ports
use crate::application::poll_service::{CycleLog, CycleOutcome};
use crate::application::reading_source::ReadingSource;
use crate::application::render_target::{ChartCapability, DashboardSurface, RenderError};
use crate::domain::chart::{ChartConfig, ChartHandle};
use crate::domain::telemetry::Reading;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn reading(time: &str, ph: f64, tds: f64, turbidity: f64, temp: f64) -> Reading {
    Reading::new(time.to_string(), ph, tds, turbidity, temp)
}

#[derive(Default)]
pub struct RecordingSurface {
    pub html: HashMap<String, String>,
    pub text: HashMap<String, String>,
    pub visible: HashMap<String, bool>,
    pub actions: HashMap<String, String>,
    missing: HashSet<String>,
}

impl RecordingSurface {
    /// A surface where the given slots do not exist
    pub fn without(slots: &[&str]) -> Self {
        Self {
            missing: slots.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    fn check(&self, slot: &str) -> Result<(), RenderError> {
        if self.missing.contains(slot) {
            Err(RenderError::MissingSlot(slot.to_string()))
        } else {
            Ok(())
        }
    }
}

impl DashboardSurface for RecordingSurface {
    fn write_html(&mut self, slot: &str, html: String) -> Result<(), RenderError> {
        self.check(slot)?;
        self.html.insert(slot.to_string(), html);
        Ok(())
    }

    fn write_text(&mut self, slot: &str, text: String) -> Result<(), RenderError> {
        self.check(slot)?;
        self.text.insert(slot.to_string(), text);
        Ok(())
    }

    fn set_visible(&mut self, slot: &str, visible: bool) -> Result<(), RenderError> {
        self.check(slot)?;
        self.visible.insert(slot.to_string(), visible);
        Ok(())
    }

    fn set_action(&mut self, slot: &str, href: String) -> Result<(), RenderError> {
        self.check(slot)?;
        self.actions.insert(slot.to_string(), href);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartCall {
    Create { canvas: String, handle: ChartHandle },
    Destroy(ChartHandle),
}

/// Charting capability mock that records every create/destroy call.
#[derive(Default)]
pub struct RecordingCharts {
    pub calls: Vec<ChartCall>,
    pub configs: HashMap<ChartHandle, ChartConfig>,
    next: u64,
    missing: HashSet<String>,
}

impl RecordingCharts {
    pub fn without(canvases: &[&str]) -> Self {
        Self {
            missing: canvases.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn created_on(&self, canvas: &str) -> Vec<ChartHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                ChartCall::Create { canvas: c, handle } if c == canvas => Some(*handle),
                _ => None,
            })
            .collect()
    }
}

impl ChartCapability for RecordingCharts {
    fn create(&mut self, canvas: &str, config: ChartConfig) -> Result<ChartHandle, RenderError> {
        if self.missing.contains(canvas) {
            return Err(RenderError::MissingCanvas(canvas.to_string()));
        }
        if !config.is_consistent() {
            return Err(RenderError::SeriesLength {
                labels: config.labels.len(),
                values: config.series.values.len(),
            });
        }
        self.next += 1;
        let handle = ChartHandle(self.next);
        self.calls.push(ChartCall::Create {
            canvas: canvas.to_string(),
            handle,
        });
        self.configs.insert(handle, config);
        Ok(handle)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.calls.push(ChartCall::Destroy(handle));
        self.configs.remove(&handle);
    }
}

/// Source that replays scripted fetch results, then reports an empty sheet.
pub struct FakeSource {
    responses: Mutex<VecDeque<Result<Vec<Reading>, String>>>,
    fetches: AtomicUsize,
}

impl FakeSource {
    pub fn new(responses: Vec<Result<Vec<Reading>, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadingSource for FakeSource {
    async fn fetch_readings(&self) -> anyhow::Result<Vec<Reading>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(readings)) => Ok(readings),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(Vec::new()),
        }
    }
}

/// Surface, charts and cycle log in one page, as the poller expects.
#[derive(Default)]
pub struct RecordingPage {
    pub surface: RecordingSurface,
    pub charts: RecordingCharts,
    pub cycles: Vec<CycleOutcome>,
}

impl DashboardSurface for RecordingPage {
    fn write_html(&mut self, slot: &str, html: String) -> Result<(), RenderError> {
        self.surface.write_html(slot, html)
    }

    fn write_text(&mut self, slot: &str, text: String) -> Result<(), RenderError> {
        self.surface.write_text(slot, text)
    }

    fn set_visible(&mut self, slot: &str, visible: bool) -> Result<(), RenderError> {
        self.surface.set_visible(slot, visible)
    }

    fn set_action(&mut self, slot: &str, href: String) -> Result<(), RenderError> {
        self.surface.set_action(slot, href)
    }
}

impl ChartCapability for RecordingPage {
    fn create(&mut self, canvas: &str, config: ChartConfig) -> Result<ChartHandle, RenderError> {
        self.charts.create(canvas, config)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        self.charts.destroy(handle)
    }
}

impl CycleLog for RecordingPage {
    fn record_cycle(&mut self, outcome: &CycleOutcome) {
        self.cycles.push(outcome.clone());
    }
}
