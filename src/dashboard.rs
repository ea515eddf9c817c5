// src/dashboard.rs
//! Summary statistics and alert sets for the inventory dashboards.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Chemical, Equipment, EquipmentStatus};

/// Quantities strictly below this are "low stock".
pub const LOW_STOCK_THRESHOLD: f64 = 50.0;

/// Expiry dates at most this many days out are "expiring soon".
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub fn is_low_stock(quantity: f64) -> bool {
    quantity < LOW_STOCK_THRESHOLD
}

/// Ceiling of (expiry − now) in whole days, the expiry taken at midnight UTC.
pub fn days_until(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry_at = expiry.and_time(chrono::NaiveTime::MIN).and_utc();
    let millis = (expiry_at - now).num_milliseconds();
    -((-millis).div_euclid(MILLIS_PER_DAY))
}

/// Includes dates already in the past.
pub fn is_expiring(expiry: NaiveDate, now: DateTime<Utc>) -> bool {
    days_until(expiry, now) <= EXPIRY_WINDOW_DAYS
}

pub fn is_expired(expiry: NaiveDate, now: DateTime<Utc>) -> bool {
    expiry.and_time(chrono::NaiveTime::MIN).and_utc() < now
}

// ==================== CHEMICAL ALERTS ====================

#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    LowStock {
        name: String,
        quantity: f64,
        unit: String,
    },
    Expiry {
        name: String,
        date: NaiveDate,
        expired: bool,
    },
}

impl Alert {
    pub fn title(&self) -> String {
        match self {
            Alert::LowStock { name, .. } => format!("Low Stock: {}", name),
            Alert::Expiry { name, expired: true, .. } => format!("Expired: {}", name),
            Alert::Expiry { name, expired: false, .. } => format!("Expiring Soon: {}", name),
        }
    }

    pub fn detail(&self) -> String {
        match self {
            Alert::LowStock { quantity, unit, .. } => format!("Only {} {} remaining.", quantity, unit),
            Alert::Expiry { date, .. } => format!("Date: {}", date.format("%Y-%m-%d")),
        }
    }

    /// Bootstrap contextual colour.
    pub fn tone(&self) -> &'static str {
        match self {
            Alert::LowStock { .. } => "warning",
            Alert::Expiry { expired: true, .. } => "danger",
            Alert::Expiry { expired: false, .. } => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChemicalSummary {
    pub total: usize,
    pub low_stock: usize,
    pub expiring: usize,
    pub locations: usize,
    /// Low-stock alerts first, then expiry alerts.
    pub alerts: Vec<Alert>,
}

impl ChemicalSummary {
    pub fn compute(chemicals: &[Chemical], location_count: usize, now: DateTime<Utc>) -> Self {
        let low: Vec<&Chemical> = chemicals.iter().filter(|c| is_low_stock(c.quantity)).collect();
        let expiring: Vec<(&Chemical, NaiveDate)> = chemicals
            .iter()
            .filter_map(|c| c.expiry_date.map(|d| (c, d)))
            .filter(|(_, d)| is_expiring(*d, now))
            .collect();

        let mut alerts = Vec::with_capacity(low.len() + expiring.len());
        alerts.extend(low.iter().map(|c| Alert::LowStock {
            name: c.name.clone(),
            quantity: c.quantity,
            unit: c.unit.clone(),
        }));
        alerts.extend(expiring.iter().map(|(c, d)| Alert::Expiry {
            name: c.name.clone(),
            date: *d,
            expired: is_expired(*d, now),
        }));

        Self {
            total: chemicals.len(),
            low_stock: low.len(),
            expiring: expiring.len(),
            locations: location_count,
            alerts,
        }
    }

    /// A chemical that is both low and expiring counts twice.
    pub fn notification_count(&self) -> usize {
        self.low_stock + self.expiring
    }
}

// ==================== EQUIPMENT ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentSummary {
    pub total: usize,
    pub in_maintenance: usize,
    pub broken_or_retired: usize,
}

impl EquipmentSummary {
    pub fn compute(items: &[Equipment]) -> Self {
        let in_maintenance = items
            .iter()
            .filter(|i| i.status() == Some(EquipmentStatus::Maintenance))
            .count();
        let broken_or_retired = items
            .iter()
            .filter(|i| matches!(i.status(), Some(EquipmentStatus::Broken | EquipmentStatus::Retired)))
            .count();

        Self {
            total: items.len(),
            in_maintenance,
            broken_or_retired,
        }
    }
}
