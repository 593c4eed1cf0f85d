// WHO thresholds - Safe ranges per metric and the status verdict derived from them
use super::telemetry::Metric;
use serde::Serialize;
use std::fmt;

/// Allowed range for one metric. `min` is `None` for single-sided limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRange {
    pub min: Option<f64>,
    pub max: f64,
}

impl ThresholdRange {
    const fn upper(max: f64) -> Self {
        Self { min: None, max }
    }

    const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max,
        }
    }

    fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && value <= self.max
    }
}

// Only pH has a lower bound
pub const WHO_PH: ThresholdRange = ThresholdRange::between(6.5, 8.5);
pub const WHO_TDS: ThresholdRange = ThresholdRange::upper(600.0);
pub const WHO_TURBIDITY: ThresholdRange = ThresholdRange::upper(5.0);
pub const WHO_TEMP: ThresholdRange = ThresholdRange::upper(30.0);

pub fn who_threshold(metric: Metric) -> ThresholdRange {
    match metric {
        Metric::Ph => WHO_PH,
        Metric::Tds => WHO_TDS,
        Metric::Turbidity => WHO_TURBIDITY,
        Metric::Temp => WHO_TEMP,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Safe,
    Unsafe,
    Unknown,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Safe => "Safe",
            Status::Unsafe => "Unsafe",
            Status::Unknown => "Unknown",
        }
    }

    /// CSS class applied to the status line of a summary card
    pub fn css_class(self) -> &'static str {
        match self {
            Status::Safe => "safe",
            Status::Unsafe => "unsafe",
            Status::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a value against its WHO range. NaN is always `Unknown`.
pub fn evaluate(metric: Metric, value: f64) -> Status {
    if value.is_nan() {
        return Status::Unknown;
    }
    if who_threshold(metric).contains(value) {
        Status::Safe
    } else {
        Status::Unsafe
    }
}

/// Explanatory WHO compliance text shown under each trend chart title.
pub fn compliance_note(metric: Metric, value: f64) -> String {
    let range = who_threshold(metric);
    match (metric, evaluate(metric, value)) {
        (Metric::Ph, Status::Safe) => format!(
            "Within WHO recommended pH ({}–{})",
            range.min.unwrap_or_default(),
            range.max
        ),
        (Metric::Ph, Status::Unsafe) => format!(
            "⚠️ Out of WHO recommended pH ({}–{})",
            range.min.unwrap_or_default(),
            range.max
        ),
        (Metric::Ph, Status::Unknown) => format!(
            "No valid reading to compare against WHO recommended pH ({}–{})",
            range.min.unwrap_or_default(),
            range.max
        ),
        (_, Status::Safe) => format!("Within WHO recommended limit ({})", range.max),
        (_, Status::Unsafe) => format!("⚠️ Exceeds WHO recommended limit ({})", range.max),
        (_, Status::Unknown) => format!(
            "No valid reading to compare against WHO recommended limit ({})",
            range.max
        ),
    }
}
