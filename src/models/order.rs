// src/models/order.rs
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::{lenient_date, lenient_f64, null_default};

// ==================== ORDER STATUS ====================

/// Parsing is exact, so "received" is not `Received`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIter)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Received,
    Cancelled,
}

// ==================== PURCHASE ORDER ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub po_number: String,
    #[serde(default, deserialize_with = "null_default")]
    pub supplier: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub order_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_default")]
    pub items: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_cost: f64,
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
}

fn default_status() -> String {
    OrderStatus::Pending.to_string()
}

fn status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

impl Order {
    /// `None` for statuses outside the known taxonomy.
    pub fn known_status(&self) -> Option<OrderStatus> {
        self.status.parse().ok()
    }
}

/// Body of `POST /api/orders` and `PUT /api/orders/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    pub po_number: String,
    pub supplier: String,
    pub order_date: Option<NaiveDate>,
    pub items: String,
    pub total_cost: Option<f64>,
    pub status: String,
}
