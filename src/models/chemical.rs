// src/models/chemical.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{lenient_date, lenient_f64, null_default};
use crate::inventory::InventoryEntity;

// ==================== CHEMICAL ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chemical {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub cas_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "null_default")]
    pub unit: String,
    #[serde(default)]
    pub location_id: Option<i64>,
    /// Joined by the list endpoint; the single-record endpoint leaves it out.
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub safety_notes: Option<String>,
}

/// Body of `POST /api/chemicals`. `id: None` creates, `id: Some` updates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemicalDraft {
    pub id: Option<i64>,
    pub name: String,
    pub cas_number: String,
    pub quantity: Option<f64>,
    pub unit: String,
    pub location_id: Option<i64>,
    pub expiry_date: Option<NaiveDate>,
    pub safety_notes: Option<String>,
}

impl Chemical {
    pub fn cas_or_na(&self) -> &str {
        match self.cas_number.as_deref() {
            Some(cas) if !cas.is_empty() => cas,
            _ => "N/A",
        }
    }
}

impl InventoryEntity for Chemical {
    const RESOURCE: &'static str = "chemicals";
    const LABEL: &'static str = "Chemical";

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
        self.name.to_lowercase().contains(term)
            || self
                .cas_number
                .as_deref()
                .is_some_and(|cas| cas.to_lowercase().contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_list_row() {
        let raw = r#"{
            "id": 7, "name": "Acetone", "cas_number": "67-64-1",
            "quantity": "2.50", "unit": "L", "location_id": 3,
            "location_name": "Flammables Cabinet",
            "expiry_date": "Sat, 01 Jun 2024 00:00:00 GMT",
            "safety_notes": null, "created_at": "Mon, 01 Jan 2024 10:00:00 GMT"
        }"#;
        let chem: Chemical = serde_json::from_str(raw).unwrap();
        assert_eq!(chem.quantity, 2.5);
        assert_eq!(chem.expiry_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(chem.joined_location_name(), Some("Flammables Cabinet"));
    }

    #[test]
    fn test_null_unit_decodes() {
        let rows: Vec<Chemical> = serde_json::from_str(
            r#"[{"id": 9, "name": "Legacy Buffer", "cas_number": null, "quantity": null,
                 "unit": null, "location_id": null, "location_name": null}]"#,
        ).unwrap();
        assert_eq!(rows[0].unit, "");
        assert_eq!(rows[0].quantity, 0.0);
        assert_eq!(rows[0].cas_or_na(), "N/A");
    }

    #[test]
    fn test_search_matches_name_and_cas() {
        let chem: Chemical = serde_json::from_str(
            r#"{"id": 1, "name": "Sodium Chloride", "cas_number": "7647-14-5", "quantity": 500, "unit": "g"}"#,
        ).unwrap();
        assert!(chem.matches_term("sodium"));
        assert!(chem.matches_term("chloride"));
        assert!(chem.matches_term("7647"));
        assert!(!chem.matches_term("acetone"));
        assert_eq!(chem.cas_or_na(), "7647-14-5");
    }

    #[test]
    fn test_draft_serializes_nulls() {
        let draft = ChemicalDraft {
            id: None,
            name: "Ethanol".to_string(),
            cas_number: "64-17-5".to_string(),
            quantity: Some(1.0),
            unit: "L".to_string(),
            location_id: None,
            expiry_date: None,
            safety_notes: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value["id"].is_null());
        assert!(value["location_id"].is_null());
        // the backend indexes safety_notes directly, so the key must be present
        assert!(value.as_object().unwrap().contains_key("safety_notes"));
    }
}
