// src/models/assist.rs
//! Payloads of the AI-assisted endpoints (search, hazard scan, lookup).

use serde::{Deserialize, Serialize};

use super::{lenient_opt_f64, null_default};

#[derive(Debug, Clone, Serialize)]
pub struct AssistQuery {
    pub query: String,
}

/// `POST /api/ai-search` response.
///
/// With an empty inventory the backend answers `{matches: [], reason}`,
/// hence the aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiSearchResponse {
    #[serde(default, alias = "matches", deserialize_with = "null_default")]
    pub match_ids: Vec<i64>,
    #[serde(default, alias = "reason")]
    pub explanation: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/check-hazards` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HazardScanResponse {
    #[serde(default)]
    pub safe: bool,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub hazards: Vec<Hazard>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hazard {
    #[serde(default, deserialize_with = "null_default")]
    pub location: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub chemicals: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub risk: String,
}

/// `POST /api/ai-lookup` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupSuggestion {
    #[serde(default)]
    pub cas_number: Option<String>,
    #[serde(default)]
    pub safety_notes: Option<String>,
    #[serde(default)]
    pub recommended_storage: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub expiry_months: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}
