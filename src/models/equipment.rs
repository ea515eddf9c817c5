// src/models/equipment.rs
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use super::{lenient_date, lenient_i64};
use crate::inventory::InventoryEntity;

// ==================== EQUIPMENT STATUS ====================

/// Parsing is exact: the backend stores these labels verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIter)]
pub enum EquipmentStatus {
    Operational,
    Maintenance,
    Broken,
    Retired,
}

impl EquipmentStatus {
    /// Bootstrap badge classes for the status pill.
    pub fn badge_class(status: &str) -> &'static str {
        match status.parse::<EquipmentStatus>() {
            Ok(EquipmentStatus::Maintenance) => "bg-warning text-dark",
            Ok(EquipmentStatus::Broken) => "bg-danger",
            Ok(EquipmentStatus::Retired) => "bg-secondary",
            Ok(EquipmentStatus::Operational) | Err(_) => "bg-success",
        }
    }
}

// ==================== EQUIPMENT ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model_number: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(default = "default_status", deserialize_with = "status_or_default")]
    pub status: String,
    #[serde(default)]
    pub location_id: Option<i64>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_maintenance_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub next_maintenance_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_status() -> String {
    EquipmentStatus::Operational.to_string()
}

fn status_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_status))
}

/// Body of `POST /api/equipments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentDraft {
    pub id: Option<i64>,
    pub name: String,
    pub manufacturer: String,
    pub model_number: String,
    pub serial_number: String,
    pub quantity: Option<i64>,
    pub status: String,
    pub location_id: Option<i64>,
    pub purchase_date: Option<NaiveDate>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_date: Option<NaiveDate>,
    pub description: String,
}

impl Equipment {
    pub fn status(&self) -> Option<EquipmentStatus> {
        self.status.parse().ok()
    }
}

impl InventoryEntity for Equipment {
    const RESOURCE: &'static str = "equipments";
    const LABEL: &'static str = "Equipment";

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location_id(&self) -> Option<i64> {
        self.location_id
    }

    fn joined_location_name(&self) -> Option<&str> {
        self.location_name.as_deref().filter(|n| !n.is_empty())
    }

    fn matches_term(&self, term: &str) -> bool {
        let contains = |field: &Option<String>| {
            field.as_deref().is_some_and(|v| v.to_lowercase().contains(term))
        };
        self.name.to_lowercase().contains(term)
            || contains(&self.model_number)
            || contains(&self.manufacturer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn microscope() -> Equipment {
        serde_json::from_str(
            r#"{"id": 4, "name": "Confocal Microscope", "manufacturer": "Zeiss",
                "model_number": "LSM 980", "serial_number": null, "quantity": 1,
                "status": "Maintenance", "location_id": 2,
                "next_maintenance_date": "2025-03-01T00:00:00"}"#,
        ).unwrap()
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Maintenance".parse::<EquipmentStatus>().unwrap(), EquipmentStatus::Maintenance);
        assert!("maintenance".parse::<EquipmentStatus>().is_err());
        assert_eq!("Retired".parse::<EquipmentStatus>().unwrap(), EquipmentStatus::Retired);
        assert!("Lost".parse::<EquipmentStatus>().is_err());
        let all: Vec<String> = EquipmentStatus::iter().map(|s| s.to_string()).collect();
        assert_eq!(all, ["Operational", "Maintenance", "Broken", "Retired"]);
    }

    #[test]
    fn test_badge_classes() {
        assert_eq!(EquipmentStatus::badge_class("Operational"), "bg-success");
        assert_eq!(EquipmentStatus::badge_class("Maintenance"), "bg-warning text-dark");
        assert_eq!(EquipmentStatus::badge_class("Broken"), "bg-danger");
        assert_eq!(EquipmentStatus::badge_class("Retired"), "bg-secondary");
        assert_eq!(EquipmentStatus::badge_class("???"), "bg-success");
        assert_eq!(EquipmentStatus::badge_class("retired"), "bg-success");
    }

    #[test]
    fn test_null_status_is_operational() {
        let item: Equipment = serde_json::from_str(
            r#"{"id": 5, "name": "Old Balance", "status": null, "quantity": null}"#,
        ).unwrap();
        assert_eq!(item.status, "Operational");
        assert_eq!(item.status(), Some(EquipmentStatus::Operational));

        let item: Equipment = serde_json::from_str(r#"{"id": 6, "name": "Scale"}"#).unwrap();
        assert_eq!(item.status, "Operational");
    }

    #[test]
    fn test_search_fields() {
        let item = microscope();
        assert!(item.matches_term("confocal"));
        assert!(item.matches_term("lsm"));
        assert!(item.matches_term("zeiss"));
        assert!(!item.matches_term("centrifuge"));
        assert_eq!(item.status(), Some(EquipmentStatus::Maintenance));
        assert_eq!(item.next_maintenance_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    }
}
