// src/forms.rs
//! Submitted form values and their conversion to save payloads.
//!
//! Fields arrive as strings. Numerics are parsed leniently (blank or
//! unparseable → null), blank optional fields become null, and only the
//! backend validates the record.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ConsoleError, ConsoleResult};
use crate::inventory::{Draft, InventoryEntity};
use crate::models::*;

pub trait EntityForm: DeserializeOwned + Default + Clone + Send + 'static {
    type Entity: InventoryEntity;
    type Draft: Draft<Entity = Self::Entity>;

    /// Pre-fill values for edit mode.
    fn from_record(record: &Self::Entity) -> Self;

    fn to_draft(&self) -> ConsoleResult<Self::Draft>;

    fn is_edit(&self) -> bool;
}

// ==================== FIELD PARSING ====================

fn blank_to_none(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn parse_id(raw: &str, field: &str) -> ConsoleResult<Option<i64>> {
    match blank_to_none(raw) {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ConsoleError::BadRequest(format!("Invalid {}: '{}'", field, value))),
    }
}

pub fn parse_float(raw: &str) -> Option<f64> {
    blank_to_none(raw)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Integer parse that, like the browser, drops a fractional part.
pub fn parse_int(raw: &str) -> Option<i64> {
    let value = blank_to_none(raw)?;
    value
        .parse::<i64>()
        .ok()
        .or_else(|| parse_float(value).map(|f| f.trunc() as i64))
}

pub fn parse_date(raw: &str, field: &str) -> ConsoleResult<Option<NaiveDate>> {
    match blank_to_none(raw) {
        None => Ok(None),
        Some(value) => parse_backend_date(value)
            .map(Some)
            .ok_or_else(|| ConsoleError::BadRequest(format!("Invalid date for {}: '{}'", field, value))),
    }
}

fn optional_text(raw: &str) -> Option<String> {
    blank_to_none(raw).map(|_| raw.to_string())
}

fn date_field(date: Option<NaiveDate>) -> String {
    date_or(date, "")
}

fn id_field(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

// ==================== CHEMICAL ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChemicalForm {
    pub chem_id: String,
    pub name: String,
    pub cas_number: String,
    pub quantity: String,
    pub unit: String,
    pub location_id: String,
    pub expiry_date: String,
    pub safety_notes: String,
}

impl EntityForm for ChemicalForm {
    type Entity = Chemical;
    type Draft = ChemicalDraft;

    fn from_record(c: &Chemical) -> Self {
        Self {
            chem_id: c.id.to_string(),
            name: c.name.clone(),
            cas_number: c.cas_number.clone().unwrap_or_default(),
            quantity: c.quantity.to_string(),
            unit: c.unit.clone(),
            location_id: id_field(c.location_id),
            expiry_date: date_field(c.expiry_date),
            safety_notes: c.safety_notes.clone().unwrap_or_default(),
        }
    }

    fn to_draft(&self) -> ConsoleResult<ChemicalDraft> {
        Ok(ChemicalDraft {
            id: parse_id(&self.chem_id, "id")?,
            name: self.name.clone(),
            cas_number: self.cas_number.clone(),
            quantity: parse_float(&self.quantity),
            unit: self.unit.clone(),
            location_id: parse_id(&self.location_id, "location")?,
            expiry_date: parse_date(&self.expiry_date, "expiry_date")?,
            safety_notes: optional_text(&self.safety_notes),
        })
    }

    fn is_edit(&self) -> bool {
        blank_to_none(&self.chem_id).is_some()
    }
}

// ==================== EQUIPMENT ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EquipmentForm {
    pub item_id: String,
    pub name: String,
    pub manufacturer: String,
    pub model_number: String,
    pub serial_number: String,
    pub quantity: String,
    pub status: String,
    pub location_id: String,
    pub purchase_date: String,
    pub last_maintenance_date: String,
    pub next_maintenance_date: String,
    pub description: String,
}

impl EntityForm for EquipmentForm {
    type Entity = Equipment;
    type Draft = EquipmentDraft;

    fn from_record(e: &Equipment) -> Self {
        Self {
            item_id: e.id.to_string(),
            name: e.name.clone(),
            manufacturer: e.manufacturer.clone().unwrap_or_default(),
            model_number: e.model_number.clone().unwrap_or_default(),
            serial_number: e.serial_number.clone().unwrap_or_default(),
            quantity: e.quantity.to_string(),
            status: e.status.clone(),
            location_id: id_field(e.location_id),
            purchase_date: date_field(e.purchase_date),
            last_maintenance_date: date_field(e.last_maintenance_date),
            next_maintenance_date: date_field(e.next_maintenance_date),
            description: e.description.clone().unwrap_or_default(),
        }
    }

    fn to_draft(&self) -> ConsoleResult<EquipmentDraft> {
        Ok(EquipmentDraft {
            id: parse_id(&self.item_id, "id")?,
            name: self.name.clone(),
            manufacturer: self.manufacturer.clone(),
            model_number: self.model_number.clone(),
            serial_number: self.serial_number.clone(),
            quantity: parse_int(&self.quantity),
            status: if self.status.trim().is_empty() {
                EquipmentStatus::Operational.to_string()
            } else {
                self.status.clone()
            },
            location_id: parse_id(&self.location_id, "location")?,
            purchase_date: parse_date(&self.purchase_date, "purchase_date")?,
            last_maintenance_date: parse_date(&self.last_maintenance_date, "last_maintenance_date")?,
            next_maintenance_date: parse_date(&self.next_maintenance_date, "next_maintenance_date")?,
            description: self.description.clone(),
        })
    }

    fn is_edit(&self) -> bool {
        blank_to_none(&self.item_id).is_some()
    }
}

// ==================== PURCHASE ORDER ====================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderForm {
    pub order_id: String,
    pub submission_token: String,
    pub po_number: String,
    pub supplier: String,
    pub order_date: String,
    pub items: String,
    pub total_cost: String,
    pub status: String,
}

impl OrderForm {
    pub fn from_order(o: &Order) -> Self {
        Self {
            order_id: o.id.to_string(),
            submission_token: String::new(),
            po_number: o.po_number.clone(),
            supplier: o.supplier.clone(),
            order_date: date_field(o.order_date),
            items: o.items.clone(),
            total_cost: o.total_cost.to_string(),
            status: o.status.clone(),
        }
    }

    /// `Some(id)` switches the submit to update-by-id.
    pub fn target_id(&self) -> ConsoleResult<Option<i64>> {
        parse_id(&self.order_id, "order id")
    }

    pub fn to_draft(&self) -> ConsoleResult<OrderDraft> {
        Ok(OrderDraft {
            po_number: self.po_number.clone(),
            supplier: self.supplier.clone(),
            order_date: parse_date(&self.order_date, "order_date")?,
            items: self.items.clone(),
            total_cost: parse_float(&self.total_cost),
            status: if self.status.trim().is_empty() {
                OrderStatus::Pending.to_string()
            } else {
                self.status.clone()
            },
        })
    }
}
