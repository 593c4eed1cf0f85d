// Main entry point - Dependency injection, poll loop and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::TrendChartRenderer;
use crate::application::dashboard_service::DashboardRenderer;
use crate::application::poll_service::Poller;
use crate::infrastructure::config::load_monitor_config;
use crate::infrastructure::page_view::PageView;
use crate::infrastructure::sheet_repository::SheetRepository;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_monitor_config()?;
    let addr = config.bind_addr()?;

    // Create source (infrastructure layer)
    let source = Arc::new(SheetRepository::new(
        config.source.url.clone(),
        config.request_timeout(),
    )?);

    // Create renderers and the page they draw into
    let page = PageView::shared();
    let dashboard = DashboardRenderer::new(config.dashboard_options());
    let charts = TrendChartRenderer::new(config.chart_options());

    // Start polling; the handle lives until the server exits
    let poll_handle = Poller::new(
        source,
        dashboard,
        charts,
        page.clone(),
        config.poll_interval(),
    )
    .start();

    let state = Arc::new(AppState {
        page,
        poll_interval_ms: config.poll.interval_ms,
    });
    let router = presentation::router(state);

    tracing::info!(
        "Starting water-quality-monitor on {}, polling {} every {:?}",
        addr,
        config.source.url,
        config.poll_interval()
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    poll_handle.stop().await?;
    Ok(())
}
