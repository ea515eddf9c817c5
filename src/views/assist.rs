// src/views/assist.rs
//! Fragments for AI search, the hazard scan and chemical lookup.

use maud::{html, Markup};

use super::chemicals::COLUMNS;
use super::components::error_row;
use super::InventoryView;
use crate::error::ConsoleError;
use crate::inventory::LocationIndex;
use crate::models::{Chemical, HazardScanResponse, LookupSuggestion};

const SAFE_FALLBACK: &str = "No incompatible combinations found in any shared storage location.";
const SEVERITY_FALLBACK: &str = "High Risk";

/// Matching rows, preceded by the explanation banner when there is one.
pub fn ai_rows(matches: &[&Chemical], explanation: Option<&str>, index: &LocationIndex) -> Markup {
    html! {
        @if let Some(text) = explanation.filter(|t| !t.is_empty()) {
            tr {
                td colspan=(COLUMNS) class="bg-info bg-opacity-10 text-center text-info small fw-bold py-2" {
                    i class="fa-solid fa-wand-magic-sparkles me-2" {}
                    "AI: \"" (text) "\""
                }
            }
        }
        (Chemical::table_rows(matches, index))
    }
}

pub fn ai_error_row(err: &ConsoleError) -> Markup {
    error_row(COLUMNS, "AI Error: ", err)
}

pub fn hazard_panel(scan: &HazardScanResponse) -> Markup {
    if scan.safe {
        return html! {
            div class="card card-body text-center py-4 text-success" {
                i class="fa-solid fa-check-circle fa-4x mb-3" {}
                h4 { "Inventory Safe!" }
                p class="mb-0" {
                    (scan.analysis.as_deref().filter(|a| !a.is_empty()).unwrap_or(SAFE_FALLBACK))
                }
            }
        };
    }

    html! {
        div class="list-group" {
            @for hazard in &scan.hazards {
                div class="list-group-item list-group-item-danger" {
                    div class="d-flex w-100 justify-content-between" {
                        h5 class="mb-1" {
                            i class="fa-solid fa-radiation me-2" {}
                            "Incompatibility at " strong { (hazard.location) }
                        }
                        small class="badge bg-danger text-uppercase" {
                            (hazard.severity.as_deref().filter(|s| !s.is_empty()).unwrap_or(SEVERITY_FALLBACK))
                        }
                    }
                    p class="mb-1 fw-bold" { (hazard.chemicals.join(" + ")) }
                    small { (hazard.risk) }
                }
            }
        }
    }
}

pub fn hazard_error(err: &ConsoleError) -> Markup {
    html! {
        div class="card card-body text-center py-4 text-danger" {
            i class="fa-solid fa-circle-exclamation fa-3x mb-3" {}
            p { "Error: " (err.to_string()) }
            @if let Some(hint) = err.hint() {
                small { (hint) }
            }
        }
    }
}

pub fn lookup_panel(name: &str, suggestion: &LookupSuggestion) -> Markup {
    let shelf_life = suggestion
        .expiry_months
        .map(|months| format!("{} months", months))
        .unwrap_or_else(|| "Unknown".to_string());

    html! {
        div class="alert alert-info mb-0" {
            h6 class="alert-heading" {
                i class="fa-solid fa-wand-magic-sparkles me-2" {}
                "Suggestions for " (name)
            }
            dl class="row small mb-0" {
                dt class="col-sm-4" { "CAS Number" }
                dd class="col-sm-8" { (suggestion.cas_number.as_deref().unwrap_or("N/A")) }
                dt class="col-sm-4" { "Safety Notes" }
                dd class="col-sm-8" { (suggestion.safety_notes.as_deref().unwrap_or("N/A")) }
                dt class="col-sm-4" { "Storage" }
                dd class="col-sm-8" { (suggestion.recommended_storage.as_deref().unwrap_or("N/A")) }
                dt class="col-sm-4" { "Shelf Life" }
                dd class="col-sm-8" { (shelf_life) }
            }
        }
    }
}

pub fn lookup_hint(message: &str) -> Markup {
    html! {
        div class="alert alert-warning small mb-0" { (message) }
    }
}
