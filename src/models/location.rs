// src/models/location.rs
use serde::{Deserialize, Serialize};

/// Storage location (room, shelf, cabinet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
}
