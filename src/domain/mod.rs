// Domain layer - Readings, WHO thresholds and dashboard models
pub mod alert;
pub mod chart;
pub mod dashboard;
pub mod telemetry;
pub mod thresholds;
