// src/models/mod.rs

pub mod assist;
pub mod chemical;
pub mod equipment;
pub mod location;
pub mod order;

pub use assist::*;
pub use chemical::*;
pub use equipment::*;
pub use location::*;
pub use order::*;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

// ==================== COMMON / SHARED ====================

/// Acknowledgement returned by the backend for create/update calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaveReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

// ==================== WIRE TOLERANCE ====================
//
// NUMERIC columns come back as JSON strings, and dates come back either as
// ISO-8601 or as HTTP dates ("Wed, 01 May 2024 00:00:00 GMT").

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Parses a backend date in any of the formats the backend emits.
pub fn parse_backend_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    // "2024-05-01T00:00:00" / "2024-05-01 00:00:00+00:00"
    if let Some(prefix) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }

    None
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}

pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.map(|n| n.trunc() as i64).unwrap_or(0))
}

pub(crate) fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(parse_backend_date))
}

/// Treats an explicit `null` like a missing key. The backend returns every
/// column of a row, so nullable text columns arrive as `null`.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `YYYY-MM-DD`, or the given placeholder when there is no date.
pub fn date_or(date: Option<NaiveDate>, placeholder: &str) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| placeholder.to_string())
}
