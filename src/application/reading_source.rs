// Source trait for fetching sensor readings
use crate::domain::telemetry::Reading;
use async_trait::async_trait;

#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Fetch the full reading sequence in source order.
    /// An empty vector means the source currently has no data rows.
    async fn fetch_readings(&self) -> anyhow::Result<Vec<Reading>>;
}
