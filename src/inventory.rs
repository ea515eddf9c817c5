// src/inventory.rs
//! Generic inventory plumbing shared by chemicals and equipment.
//!
//! - `InventoryEntity`: what the client, filters and handlers need from a record
//! - `LocationIndex`: id → name lookup built once per dashboard load
//! - `ListFilter`: search term + location selection, applied on every re-render

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::Location;

/// Shown in table rows when a record's location cannot be resolved.
pub const UNKNOWN_LOCATION: &str = "Unknown";
/// Same, in the detail panel.
pub const UNKNOWN_DETAIL_LOCATION: &str = "Unknown Location";

pub trait InventoryEntity: DeserializeOwned + Clone + Send + Sync + 'static {
    /// REST collection under `/api/`.
    const RESOURCE: &'static str;
    /// Human label used in messages ("Chemical not found").
    const LABEL: &'static str;

    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn location_id(&self) -> Option<i64>;

    /// Location name joined in by the backend, when present.
    fn joined_location_name(&self) -> Option<&str> {
        None
    }

    /// `term` is already lower-cased.
    fn matches_term(&self, term: &str) -> bool;
}

/// Save payload for an entity. Lives next to the entity so the client can be generic.
pub trait Draft: Serialize + Send + Sync {
    type Entity: InventoryEntity;

    fn is_update(&self) -> bool;
}

impl Draft for crate::models::ChemicalDraft {
    type Entity = crate::models::Chemical;

    fn is_update(&self) -> bool {
        self.id.is_some()
    }
}

impl Draft for crate::models::EquipmentDraft {
    type Entity = crate::models::Equipment;

    fn is_update(&self) -> bool {
        self.id.is_some()
    }
}

// ==================== LOCATION INDEX ====================

#[derive(Debug, Default, Clone)]
pub struct LocationIndex {
    names: HashMap<i64, String>,
}

impl LocationIndex {
    pub fn from_locations(locations: &[Location]) -> Self {
        Self {
            names: locations.iter().map(|l| (l.id, l.name.clone())).collect(),
        }
    }

    pub fn name(&self, id: i64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Joined name first, then the index, then `fallback`.
    pub fn resolve_or<'a, E: InventoryEntity>(&'a self, entity: &'a E, fallback: &'a str) -> &'a str {
        entity
            .joined_location_name()
            .or_else(|| entity.location_id().and_then(|id| self.name(id)))
            .unwrap_or(fallback)
    }

    pub fn resolve<'a, E: InventoryEntity>(&'a self, entity: &'a E) -> &'a str {
        self.resolve_or(entity, UNKNOWN_LOCATION)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ==================== LIST FILTER ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSelection {
    All,
    Only(i64),
    /// A value that is not a location id; matches nothing.
    Invalid,
}

/// Query string of the dashboard and its table fragment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilter {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ListFilter {
    pub fn term(&self) -> String {
        self.q.as_deref().unwrap_or_default().to_lowercase()
    }

    pub fn location_selection(&self) -> LocationSelection {
        match self.location.as_deref().map(str::trim) {
            None | Some("") => LocationSelection::All,
            Some(raw) => raw
                .parse::<i64>()
                .map(LocationSelection::Only)
                .unwrap_or(LocationSelection::Invalid),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term().is_empty() && self.location_selection() == LocationSelection::All
    }

    pub fn matches<E: InventoryEntity>(&self, entity: &E) -> bool {
        let term = self.term();
        let matches_term = term.is_empty() || entity.matches_term(&term);
        let matches_location = match self.location_selection() {
            LocationSelection::All => true,
            LocationSelection::Only(id) => entity.location_id() == Some(id),
            LocationSelection::Invalid => false,
        };
        matches_term && matches_location
    }

    pub fn apply<'a, E: InventoryEntity>(&self, items: &'a [E]) -> Vec<&'a E> {
        items.iter().filter(|e| self.matches(*e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Chemical;

    fn chem(id: i64, name: &str, cas: &str, location_id: Option<i64>) -> Chemical {
        Chemical {
            id,
            name: name.to_string(),
            cas_number: Some(cas.to_string()),
            quantity: 100.0,
            unit: "g".to_string(),
            location_id,
            location_name: None,
            expiry_date: None,
            safety_notes: None,
        }
    }

    fn filter(q: &str, location: &str) -> ListFilter {
        ListFilter {
            q: Some(q.to_string()),
            location: Some(location.to_string()),
        }
    }

    #[test]
    fn test_location_filter_returns_exact_subset() {
        let items = vec![
            chem(1, "Acetone", "67-64-1", Some(1)),
            chem(2, "Ethanol", "64-17-5", Some(2)),
            chem(3, "Methanol", "67-56-1", Some(1)),
            chem(4, "Toluene", "108-88-3", None),
        ];

        let ids: Vec<i64> = filter("", "1").apply(&items).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(filter("", "").apply(&items).len(), 4);
        assert_eq!(ListFilter::default().apply(&items).len(), 4);
        assert!(filter("", "shelf").apply(&items).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = vec![
            chem(1, "Acetone", "67-64-1", Some(1)),
            chem(2, "Ethanol", "64-17-5", Some(2)),
        ];
        let ids: Vec<i64> = filter("ACET", "").apply(&items).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
        let ids: Vec<i64> = filter("64-17", "").apply(&items).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2]);
        // term and location combine
        assert!(filter("ethanol", "1").apply(&items).is_empty());
    }

    #[test]
    fn test_location_resolution() {
        let index = LocationIndex::from_locations(&[
            Location { id: 1, name: "Shelf A".to_string() },
        ]);
        let mut c = chem(1, "Acetone", "67-64-1", Some(1));
        assert_eq!(index.resolve(&c), "Shelf A");

        c.location_id = Some(99);
        assert_eq!(index.resolve(&c), UNKNOWN_LOCATION);

        c.location_name = Some("Cold Room".to_string());
        assert_eq!(index.resolve(&c), "Cold Room");
    }
}
