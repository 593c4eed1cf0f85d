// Published-spreadsheet CSV source
use crate::application::reading_source::ReadingSource;
use crate::domain::telemetry::Reading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SheetRepository {
    client: reqwest::Client,
    url: String,
}

impl SheetRepository {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, url })
    }

    async fn fetch_csv(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "text/csv")
            .send()
            .await
            .context("Failed to send request to sheet source")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Sheet source responded with status {}", status);
        }

        response
            .text()
            .await
            .context("Failed to read sheet response body")
    }
}

#[async_trait]
impl ReadingSource for SheetRepository {
    async fn fetch_readings(&self) -> Result<Vec<Reading>> {
        let body = self.fetch_csv().await?;
        let readings = parse_readings(&body);
        tracing::debug!("Fetched {} readings from {}", readings.len(), self.url);
        Ok(readings)
    }
}

/// Parse a CSV export: the first line is a header, every other non-blank line is
/// `time,ph,tds,turbidity,temp[,...]`. Malformed or missing measurements become NaN.
pub fn parse_readings(body: &str) -> Vec<Reading> {
    body.trim()
        .lines()
        .skip(1)
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Reading {
    let mut fields = line.split(',');
    let time = fields.next().unwrap_or_default().to_string();
    let mut next_value = || fields.next().map(parse_measurement).unwrap_or(f64::NAN);

    let ph = next_value();
    let tds = next_value();
    let turbidity = next_value();
    let temp = next_value();

    Reading::new(time, ph, tds, turbidity, temp)
}

/// Lenient float parse: the longest leading numeric prefix ("25C" -> 25.0),
/// else NaN. Only digit-led text counts, so "inf" and "nan" are NaN.
fn parse_measurement(field: &str) -> f64 {
    numeric_prefix(field.trim())
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn numeric_prefix(field: &str) -> Option<&str> {
    let bytes = field.as_bytes();
    let mut end = 0;
    let mut digits = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
        digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        let mut frac = end + 1;
        while bytes.get(frac).is_some_and(u8::is_ascii_digit) {
            frac += 1;
            digits += 1;
        }
        if digits > 0 {
            end = frac;
        }
    }
    if digits == 0 {
        return None;
    }

    // Optional exponent, only when followed by at least one digit
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits_start = exp;
        while bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            exp += 1;
        }
        if exp > exp_digits_start {
            end = exp;
        }
    }

    Some(&field[..end])
}
