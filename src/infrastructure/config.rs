use crate::application::chart_service::ChartOptions;
use crate::application::dashboard_service::DashboardOptions;
use crate::domain::alert::AlertMessage;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTOo-23u4-0MMRp5rup1gVnNnf8EAiK_wb6L07VxO3LLsbrHhGnki9sZxzJtrysy8c2KUS6Lr9ls0Iw/pub?output=csv";

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorConfig {
    pub source: SourceSettings,
    pub poll: PollSettings,
    pub server: ServerSettings,
    pub dashboard: DashboardSettings,
    pub alert: AlertSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub show_average: bool,
    pub average_window: usize,
    pub alert_enabled: bool,
    pub fill_charts: bool,
    pub time_of_day_labels: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AlertSettings {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MonitorConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_secs)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid server.bind `{}`: {}", self.server.bind, e))
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            show_average: self.dashboard.show_average,
            average_window: self.dashboard.average_window,
            alert: self.dashboard.alert_enabled.then(|| {
                AlertMessage::new(
                    self.alert.recipient.clone(),
                    self.alert.subject.clone(),
                    self.alert.body.clone(),
                )
            }),
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            fill: self.dashboard.fill_charts,
            time_of_day_labels: self.dashboard.time_of_day_labels,
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.source.url.trim().is_empty() {
            anyhow::bail!("source.url must not be empty");
        }
        if self.poll.interval_ms == 0 {
            anyhow::bail!("poll.interval_ms must be greater than zero");
        }
        if self.dashboard.average_window == 0 {
            anyhow::bail!("dashboard.average_window must be greater than zero");
        }
        if self.source.timeout_secs == 0 {
            anyhow::bail!("source.timeout_secs must be greater than zero");
        }
        self.bind_addr()?;
        Ok(())
    }
}

fn builder_with_defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("source.url", DEFAULT_SHEET_URL)?
        .set_default("source.timeout_secs", 10)?
        .set_default("poll.interval_ms", 1000)?
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("dashboard.show_average", true)?
        .set_default("dashboard.average_window", 100)?
        .set_default("dashboard.alert_enabled", true)?
        .set_default("dashboard.fill_charts", true)?
        .set_default("dashboard.time_of_day_labels", true)?
        .set_default("alert.recipient", "water.quality@example.org")?
        .set_default("alert.subject", "Water Quality Alert")?
        .set_default(
            "alert.body",
            "One or more water quality readings are outside WHO safe limits. Please check the monitoring dashboard.",
        )?)
}

// `WQM_POLL__INTERVAL_MS=5000` sets `poll.interval_ms`
fn environment() -> config::Environment {
    config::Environment::with_prefix("WQM")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Defaults, then `config/monitor.toml` if present, then `WQM_*` environment variables.
pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let settings = builder_with_defaults()?
        .add_source(config::File::with_name("config/monitor").required(false))
        .add_source(environment())
        .build()?;

    let config: MonitorConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
