// Application layer - Renderers, poll loop and the ports they depend on
pub mod chart_service;
pub mod dashboard_service;
pub mod poll_service;
pub mod reading_source;
pub mod render_target;

#[cfg(test)]
pub mod test_support;
