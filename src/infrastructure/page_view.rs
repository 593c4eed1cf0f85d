// In-memory page view - The presentation slots and chart canvases served to browsers
use crate::application::dashboard_service::{ALERT_SLOT, LAST_UPDATED_SLOT};
use crate::application::poll_service::{CycleLog, CycleOutcome};
use crate::application::render_target::{ChartCapability, DashboardSurface, RenderError};
use crate::domain::chart::{ChartConfig, ChartHandle};
use crate::domain::telemetry::Metric;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedPage = Arc<RwLock<PageView>>;

#[derive(Debug, Clone, Serialize)]
pub struct SlotState {
    pub html: Option<String>,
    pub text: Option<String>,
    pub visible: bool,
    pub href: Option<String>,
}

impl SlotState {
    fn shown() -> Self {
        Self {
            html: None,
            text: None,
            visible: true,
            href: None,
        }
    }

    fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::shown()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartInstance {
    pub handle: ChartHandle,
    pub config: ChartConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    Rendered,
    NoData,
    FetchFailed,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleStatus {
    pub state: CycleState,
    pub readings: usize,
    pub failures: usize,
    pub detail: Option<String>,
    /// RFC 3339 timestamp of when the cycle finished
    pub at: String,
}

impl From<&CycleOutcome> for CycleStatus {
    fn from(outcome: &CycleOutcome) -> Self {
        let (state, readings, failures, detail) = match outcome {
            CycleOutcome::Rendered { readings, failures } => {
                (CycleState::Rendered, *readings, *failures, None)
            }
            CycleOutcome::NoData => (CycleState::NoData, 0, 0, None),
            CycleOutcome::FetchFailed(message) => {
                (CycleState::FetchFailed, 0, 0, Some(message.clone()))
            }
        };
        Self {
            state,
            readings,
            failures,
            detail,
            at: Utc::now().to_rfc3339(),
        }
    }
}

/// Page layout: one card per metric, a last-updated line, the alert button and
/// one canvas per metric. Writes to anything else fail.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub slots: BTreeMap<String, SlotState>,
    pub charts: BTreeMap<String, Option<ChartInstance>>,
    pub last_cycle: Option<CycleStatus>,
    pub cycles: u64,
    #[serde(skip)]
    next_handle: u64,
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView {
    pub fn new() -> Self {
        let mut slots = BTreeMap::new();
        for metric in Metric::ALL {
            slots.insert(metric.card_slot(), SlotState::shown());
        }
        slots.insert(LAST_UPDATED_SLOT.to_string(), SlotState::shown());
        slots.insert(ALERT_SLOT.to_string(), SlotState::hidden());

        let charts = Metric::ALL
            .into_iter()
            .map(|metric| (metric.canvas_slot(), None))
            .collect();

        Self {
            slots,
            charts,
            last_cycle: None,
            cycles: 0,
            next_handle: 0,
        }
    }

    pub fn shared() -> SharedPage {
        Arc::new(RwLock::new(Self::new()))
    }

    #[cfg(test)]
    pub fn slot(&self, slot: &str) -> Option<&SlotState> {
        self.slots.get(slot)
    }

    #[cfg(test)]
    pub fn chart(&self, canvas: &str) -> Option<&ChartInstance> {
        self.charts.get(canvas).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, slot: &str) -> Result<&mut SlotState, RenderError> {
        self.slots
            .get_mut(slot)
            .ok_or_else(|| RenderError::MissingSlot(slot.to_string()))
    }
}

impl DashboardSurface for PageView {
    fn write_html(&mut self, slot: &str, html: String) -> Result<(), RenderError> {
        self.slot_mut(slot)?.html = Some(html);
        Ok(())
    }

    fn write_text(&mut self, slot: &str, text: String) -> Result<(), RenderError> {
        self.slot_mut(slot)?.text = Some(text);
        Ok(())
    }

    fn set_visible(&mut self, slot: &str, visible: bool) -> Result<(), RenderError> {
        self.slot_mut(slot)?.visible = visible;
        Ok(())
    }

    fn set_action(&mut self, slot: &str, href: String) -> Result<(), RenderError> {
        self.slot_mut(slot)?.href = Some(href);
        Ok(())
    }
}

impl ChartCapability for PageView {
    fn create(&mut self, canvas: &str, config: ChartConfig) -> Result<ChartHandle, RenderError> {
        if !config.is_consistent() {
            return Err(RenderError::SeriesLength {
                labels: config.labels.len(),
                values: config.series.values.len(),
            });
        }
        let entry = self
            .charts
            .get_mut(canvas)
            .ok_or_else(|| RenderError::MissingCanvas(canvas.to_string()))?;
        if entry.is_some() {
            return Err(RenderError::CanvasInUse(canvas.to_string()));
        }

        self.next_handle += 1;
        let handle = ChartHandle(self.next_handle);
        *entry = Some(ChartInstance { handle, config });
        Ok(handle)
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if let Some(entry) = self
            .charts
            .values_mut()
            .find(|entry| matches!(entry, Some(c) if c.handle == handle))
        {
            *entry = None;
        }
    }
}

impl CycleLog for PageView {
    fn record_cycle(&mut self, outcome: &CycleOutcome) {
        self.cycles += 1;
        self.last_cycle = Some(CycleStatus::from(outcome));
    }
}
