// src/views/chemicals.rs
use maud::{html, Markup};

use super::components::{detail_row, error_row, location_options, message_row, stat_card};
use super::{base, delete_url, detail_url, edit_url, table_url, CurrentPage, DashboardContext, InventoryView, PageConfig};
use crate::dashboard::{is_low_stock, Alert, ChemicalSummary};
use crate::error::ConsoleError;
use crate::forms::ChemicalForm;
use crate::inventory::LocationIndex;
use crate::models::{date_or, Chemical, Location};

pub const COLUMNS: usize = 6;

const SEARCH_PLACEHOLDER: &str = "Search by name, CAS, or formula...";
const AI_PLACEHOLDER: &str = "Ask AI (e.g. 'Show me flammable liquids')... Press Enter";

impl InventoryView for Chemical {
    type Form = ChemicalForm;

    const LIST_PATH: &'static str = "/";
    const FRAGMENT_BASE: &'static str = "/fragments/chemicals";
    const ACTION_BASE: &'static str = "/chemicals";
    const PAGE: CurrentPage = CurrentPage::Chemicals;
    const FORM_PATH: &'static str = "/form.html";

    fn dashboard(items: &[Self], ctx: &DashboardContext) -> Markup {
        let summary = ChemicalSummary::compute(items, ctx.locations.len(), ctx.now);
        let visible = ctx.filter.apply(items);

        let content = html! {
            div class="d-flex justify-content-between align-items-center mb-4" {
                h1 class="h3 mb-0" { "Chemical Inventory" }
                div class="d-flex gap-2" {
                    button class="btn btn-outline-danger"
                        hx-get="/fragments/hazards"
                        hx-target="#hazard-panel"
                        hx-indicator="#hazard-spinner" {
                        i class="fa-solid fa-radiation me-1" {}
                        "Scan Hazards"
                    }
                    @if ctx.ai_mode {
                        a class="btn btn-primary" href="/" title="Back to plain search" {
                            i class="fa-solid fa-wand-magic-sparkles me-1" {} "AI Search"
                        }
                    } @else {
                        a class="btn btn-outline-primary" href="/?mode=ai" title="Search with natural language" {
                            i class="fa-solid fa-wand-magic-sparkles me-1" {} "AI Search"
                        }
                    }
                    a class="btn btn-success" href=(Self::FORM_PATH) {
                        i class="fa-solid fa-plus me-1" {} "Add Chemical"
                    }
                }
            }

            div class="row row-cols-1 row-cols-md-4 g-3 mb-4" {
                (stat_card("Total Chemicals", summary.total, "fa-flask", "primary"))
                (stat_card("Low Stock", summary.low_stock, "fa-triangle-exclamation", "warning"))
                (stat_card("Locations", summary.locations, "fa-warehouse", "info"))
                (stat_card("Notifications", summary.notification_count(), "fa-bell", "danger"))
            }

            div class="row g-4" {
                div class="col-lg-8" {
                    (search_form(ctx))
                    div id="action-feedback" {}
                    div class="card" {
                        div class="table-responsive" {
                            table class="table table-hover align-middle mb-0" {
                                thead class="table-light" {
                                    tr {
                                        th class="ps-4" { "Name" }
                                        th { "CAS Number" }
                                        th { "Stock" }
                                        th { "Location" }
                                        th { "Expiry" }
                                        th class="text-end pe-4" { "Actions" }
                                    }
                                }
                                tbody id="inventory-rows" {
                                    (Self::table_rows(&visible, ctx.index))
                                }
                            }
                        }
                    }
                }
                div class="col-lg-4" {
                    div id="detail-panel" class="mb-4" {}
                    div class="mb-4" {
                        span id="hazard-spinner" class="htmx-indicator text-muted small" {
                            i class="fa-solid fa-spinner fa-spin me-2" {}
                            "Analyzing your inventory for dangerous combinations..."
                        }
                        div id="hazard-panel" {}
                    }
                    (notifications(&summary))
                }
            }
        };

        base(&PageConfig { title: "Chemicals", current_page: Self::PAGE }, content)
    }

    fn table_rows(items: &[&Self], index: &LocationIndex) -> Markup {
        html! {
            @if items.is_empty() {
                (message_row(COLUMNS, "No chemicals found in database.", "text-muted"))
            }
            @for chem in items {
                (table_row(chem, index))
            }
        }
    }

    fn table_error(err: &ConsoleError) -> Markup {
        error_row(COLUMNS, "Error loading chemicals: ", err)
    }

    fn detail_panel(&self, location: &str) -> Markup {
        html! {
            div class="card shadow-sm" {
                div class="card-header d-flex justify-content-between align-items-center" {
                    h2 class="h5 mb-0" { (self.name) }
                    (stock_badge(self.quantity))
                }
                div class="card-body" {
                    table class="table table-sm mb-3" {
                        tbody {
                            (detail_row("CAS Number", self.cas_or_na()))
                            (detail_row("Quantity", &format!("{} {}", self.quantity, self.unit)))
                            (detail_row("Location", location))
                            (detail_row("Expiry", &date_or(self.expiry_date, "No Expiry Date")))
                        }
                    }
                    h3 class="h6" { i class="fa-solid fa-shield-halved me-2 text-danger" {} "Safety Notes" }
                    p class="small" {
                        (self.safety_notes.as_deref().filter(|n| !n.is_empty()).unwrap_or("No specific safety notes recorded."))
                    }
                    div id="detail-feedback" {}
                    div class="d-flex gap-2" {
                        a class="btn btn-sm btn-outline-primary" href=(edit_url::<Self>(self.id)) {
                            i class="fa-solid fa-pen me-1" {} "Edit"
                        }
                        button class="btn btn-sm btn-outline-danger"
                            hx-post=(delete_url::<Self>(self.id))
                            hx-confirm="Are you sure you want to permanently delete this chemical?"
                            hx-target="#detail-feedback" {
                            i class="fa-regular fa-trash-can me-1" {} "Delete"
                        }
                    }
                }
            }
        }
    }

    fn form_page(form: &ChemicalForm, locations: &[Location], error: Option<&str>) -> Markup {
        let editing = crate::forms::EntityForm::is_edit(form);
        let heading = if editing { "Edit Chemical" } else { "Add Chemical" };

        let content = html! {
            div class="row justify-content-center" {
                div class="col-lg-8" {
                    h1 class="h3 mb-4" { (heading) }
                    @if let Some(message) = error {
                        div class="alert alert-danger" role="alert" { (message) }
                    }
                    form method="post" action=(Self::FORM_PATH) class="card card-body" {
                        input type="hidden" name="chem_id" value=(form.chem_id);
                        div class="row g-3" {
                            div class="col-md-8" {
                                label class="form-label" for="name" { "Name" }
                                div class="input-group" {
                                    input class="form-control" id="name" name="name" required value=(form.name);
                                    button type="button" class="btn btn-outline-primary"
                                        hx-post="/fragments/ai-lookup"
                                        hx-include="#name"
                                        hx-target="#lookup-panel" {
                                        i class="fa-solid fa-wand-magic-sparkles me-1" {} "Ask AI"
                                    }
                                }
                            }
                            div class="col-md-4" {
                                label class="form-label" for="cas_number" { "CAS Number" }
                                input class="form-control" id="cas_number" name="cas_number" value=(form.cas_number);
                            }
                            div class="col-12" id="lookup-panel" {}
                            div class="col-md-4" {
                                label class="form-label" for="quantity" { "Quantity" }
                                input class="form-control" id="quantity" name="quantity" type="number" step="any" value=(form.quantity);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="unit" { "Unit" }
                                input class="form-control" id="unit" name="unit" value=(form.unit);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="location_id" { "Location" }
                                select class="form-select" id="location_id" name="location_id" {
                                    (location_options(locations, &form.location_id, "Select location..."))
                                }
                            }
                            div class="col-md-4" {
                                label class="form-label" for="expiry_date" { "Expiry Date" }
                                input class="form-control" id="expiry_date" name="expiry_date" type="date" value=(form.expiry_date);
                            }
                            div class="col-12" {
                                label class="form-label" for="safety_notes" { "Safety Notes" }
                                textarea class="form-control" id="safety_notes" name="safety_notes" rows="3" { (form.safety_notes) }
                            }
                        }
                        div class="d-flex justify-content-end gap-2 mt-4" {
                            a class="btn btn-light" href=(Self::LIST_PATH) { "Cancel" }
                            button type="submit" class="btn btn-primary" { "Save Chemical" }
                        }
                    }
                }
            }
        };

        base(&PageConfig { title: heading, current_page: Self::PAGE }, content)
    }
}

fn search_form(ctx: &DashboardContext) -> Markup {
    let term = ctx.filter.q.as_deref().unwrap_or_default();
    let location = ctx.filter.location.as_deref().unwrap_or_default();

    if ctx.ai_mode {
        return html! {
            form class="d-flex gap-2 mb-3"
                hx-post="/fragments/ai-search"
                hx-target="#inventory-rows"
                hx-sync="this:replace" {
                input class="form-control" type="search" name="q" value=(term) placeholder=(AI_PLACEHOLDER) autofocus;
                select class="form-select w-auto" name="location" disabled {
                    option { "All Locations" }
                }
            }
        };
    }

    html! {
        form class="d-flex gap-2 mb-3" {
            input class="form-control" type="search" name="q" value=(term) placeholder=(SEARCH_PLACEHOLDER)
                hx-get=(table_url::<Chemical>())
                hx-trigger="input changed delay:200ms, search"
                hx-include="closest form"
                hx-sync="closest form:replace"
                hx-target="#inventory-rows";
            select class="form-select w-auto" name="location"
                hx-get=(table_url::<Chemical>())
                hx-trigger="change"
                hx-include="closest form"
                hx-sync="closest form:replace"
                hx-target="#inventory-rows" {
                (location_options(ctx.locations, location, "All Locations"))
            }
        }
    }
}

fn table_row(chem: &Chemical, index: &LocationIndex) -> Markup {
    html! {
        tr {
            td class="ps-4 fw-bold" {
                a href="#" class="text-decoration-none text-dark"
                    hx-get=(detail_url::<Chemical>(chem.id))
                    hx-target="#detail-panel" {
                    (chem.name)
                }
            }
            td class="text-muted" { (chem.cas_or_na()) }
            td { (stock_badge(chem.quantity)) }
            td { small class="text-secondary fw-semibold" { (index.resolve(chem)) } }
            td { (date_or(chem.expiry_date, "N/A")) }
            td class="text-end pe-4" {
                a class="btn btn-sm btn-light text-info me-1" href=(edit_url::<Chemical>(chem.id)) title="Edit" {
                    i class="fa-solid fa-pen" {}
                }
                button class="btn btn-sm btn-light text-danger" title="Delete"
                    hx-post=(delete_url::<Chemical>(chem.id))
                    hx-confirm="Are you sure you want to permanently delete this chemical?"
                    hx-target="#action-feedback" {
                    i class="fa-regular fa-trash-can" {}
                }
            }
        }
    }
}

fn stock_badge(quantity: f64) -> Markup {
    html! {
        @if is_low_stock(quantity) {
            span class="badge bg-warning text-dark rounded-pill" {
                i class="fa-solid fa-triangle-exclamation me-1" {} "Low Stock"
            }
        } @else {
            span class="badge bg-success rounded-pill" {
                i class="fa-solid fa-check me-1" {} "In Stock"
            }
        }
    }
}

fn notifications(summary: &ChemicalSummary) -> Markup {
    html! {
        div class="card" {
            div class="card-header d-flex justify-content-between" {
                span { i class="fa-solid fa-bell me-2" {} "Notifications" }
                @if summary.notification_count() > 0 {
                    span class="badge bg-danger rounded-pill" { (summary.notification_count()) }
                }
            }
            @if summary.alerts.is_empty() {
                div class="p-4 text-center text-muted small" {
                    i class="fa-solid fa-check-circle mb-2 text-success fa-2x" {}
                    p class="mb-0" { "All good! No alerts." }
                }
            } @else {
                @for alert in &summary.alerts {
                    div class={ "p-3 border-bottom d-flex align-items-start bg-opacity-10 bg-" (alert.tone()) } {
                        i class={ "fa-solid mt-1 me-3 text-" (alert.tone()) " " (alert_icon(alert)) } {}
                        div {
                            p class="mb-0 fw-bold text-dark" { (alert.title()) }
                            small class="text-muted" { (alert.detail()) }
                        }
                    }
                }
            }
        }
    }
}

fn alert_icon(alert: &Alert) -> &'static str {
    match alert {
        Alert::LowStock { .. } => "fa-box-open",
        Alert::Expiry { .. } => "fa-clock",
    }
}
