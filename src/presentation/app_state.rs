// Application state for HTTP handlers
use crate::infrastructure::page_view::SharedPage;

#[derive(Clone)]
pub struct AppState {
    pub page: SharedPage,
    pub poll_interval_ms: u64,
}
