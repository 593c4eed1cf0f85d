// Telemetry data domain models
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One of the four tracked water-quality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Ph,
    Tds,
    Turbidity,
    Temp,
}

impl Metric {
    /// Source column order after the timestamp.
    pub const ALL: [Metric; 4] = [Metric::Ph, Metric::Tds, Metric::Turbidity, Metric::Temp];

    pub fn key(self) -> &'static str {
        match self {
            Metric::Ph => "ph",
            Metric::Tds => "tds",
            Metric::Turbidity => "turbidity",
            Metric::Temp => "temp",
        }
    }

    /// Human label used on chart axes and titles
    pub fn label(self) -> &'static str {
        match self {
            Metric::Ph => "pH",
            Metric::Tds => "TDS (mg/L)",
            Metric::Turbidity => "Turbidity (NTU)",
            Metric::Temp => "Temperature (°C)",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Metric::Ph => "blue",
            Metric::Tds => "green",
            Metric::Turbidity => "orange",
            Metric::Temp => "red",
        }
    }

    /// Translucent variant of `color` for the area under the line
    pub fn fill_color(self) -> &'static str {
        match self {
            Metric::Ph => "rgba(0, 0, 255, 0.2)",
            Metric::Tds => "rgba(0, 128, 0, 0.2)",
            Metric::Turbidity => "rgba(255, 165, 0, 0.2)",
            Metric::Temp => "rgba(255, 0, 0, 0.2)",
        }
    }

    /// Summary card slot, e.g. `ph-card`
    pub fn card_slot(self) -> String {
        format!("{}-card", self.key())
    }

    /// Chart canvas slot, e.g. `phChart`
    pub fn canvas_slot(self) -> String {
        format!("{}Chart", self.key())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown metric key: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// One timestamped row of sensor data. Measurements that failed to parse are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub time: String,
    pub ph: f64,
    pub tds: f64,
    pub turbidity: f64,
    pub temp: f64,
}

impl Reading {
    pub fn new(time: String, ph: f64, tds: f64, turbidity: f64, temp: f64) -> Self {
        Self {
            time,
            ph,
            tds,
            turbidity,
            temp,
        }
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Ph => self.ph,
            Metric::Tds => self.tds,
            Metric::Turbidity => self.turbidity,
            Metric::Temp => self.temp,
        }
    }

    /// Time-of-day part of the timestamp ("2024-01-01 08:30" -> "08:30").
    /// Falls back to the whole timestamp when there is no date prefix.
    pub fn time_of_day(&self) -> &str {
        self.time
            .split_once(' ')
            .map(|(_, rest)| rest.split(' ').next().unwrap_or(rest))
            .unwrap_or(&self.time)
    }
}
