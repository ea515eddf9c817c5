// src/views/equipment.rs
use maud::{html, Markup};
use strum::IntoEnumIterator;

use super::components::{detail_row, error_row, location_options, message_row, stat_card};
use super::{base, delete_url, detail_url, edit_url, table_url, CurrentPage, DashboardContext, InventoryView, PageConfig};
use crate::dashboard::EquipmentSummary;
use crate::error::ConsoleError;
use crate::forms::{EntityForm, EquipmentForm};
use crate::inventory::LocationIndex;
use crate::models::{date_or, Equipment, EquipmentStatus, Location};

pub const COLUMNS: usize = 6;

fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(placeholder)
}

impl InventoryView for Equipment {
    type Form = EquipmentForm;

    const LIST_PATH: &'static str = "/equipment";
    const FRAGMENT_BASE: &'static str = "/fragments/equipment";
    const ACTION_BASE: &'static str = "/equipment";
    const PAGE: CurrentPage = CurrentPage::Equipment;
    const FORM_PATH: &'static str = "/equipment/form";

    fn dashboard(items: &[Self], ctx: &DashboardContext) -> Markup {
        let summary = EquipmentSummary::compute(items);
        let visible = ctx.filter.apply(items);
        let term = ctx.filter.q.as_deref().unwrap_or_default();
        let location = ctx.filter.location.as_deref().unwrap_or_default();

        let content = html! {
            div class="d-flex justify-content-between align-items-center mb-4" {
                h1 class="h3 mb-0" { "Equipment" }
                a class="btn btn-success" href=(Self::FORM_PATH) {
                    i class="fa-solid fa-plus me-1" {} "Add Equipment"
                }
            }

            div class="row row-cols-1 row-cols-md-3 g-3 mb-4" {
                (stat_card("Total Equipment", summary.total, "fa-microscope", "primary"))
                (stat_card("In Maintenance", summary.in_maintenance, "fa-screwdriver-wrench", "warning"))
                (stat_card("Broken / Retired", summary.broken_or_retired, "fa-ban", "danger"))
            }

            div class="row g-4" {
                div class="col-lg-8" {
                    form class="d-flex gap-2 mb-3" {
                        input class="form-control" type="search" name="q" value=(term)
                            placeholder="Search by name, model, or manufacturer..."
                            hx-get=(table_url::<Self>())
                            hx-trigger="input changed delay:200ms, search"
                            hx-include="closest form"
                            hx-sync="closest form:replace"
                            hx-target="#inventory-rows";
                        select class="form-select w-auto" name="location"
                            hx-get=(table_url::<Self>())
                            hx-trigger="change"
                            hx-include="closest form"
                            hx-sync="closest form:replace"
                            hx-target="#inventory-rows" {
                            (location_options(ctx.locations, location, "All Locations"))
                        }
                    }
                    div id="action-feedback" {}
                    div class="card" {
                        div class="table-responsive" {
                            table class="table table-hover align-middle mb-0" {
                                thead class="table-light" {
                                    tr {
                                        th class="ps-4" { "Name" }
                                        th { "Model / Serial" }
                                        th { "Status" }
                                        th { "Location" }
                                        th { "Next Maintenance" }
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
                    div id="detail-panel" {}
                }
            }
        };

        base(&PageConfig { title: "Equipment", current_page: Self::PAGE }, content)
    }

    fn table_rows(items: &[&Self], index: &LocationIndex) -> Markup {
        html! {
            @if items.is_empty() {
                (message_row(COLUMNS, "No equipment found.", "text-muted"))
            }
            @for item in items {
                tr {
                    td class="ps-4 fw-bold" {
                        a href="#" class="text-decoration-none text-dark"
                            hx-get=(detail_url::<Equipment>(item.id))
                            hx-target="#detail-panel" {
                            (item.name)
                        }
                    }
                    td class="text-muted" {
                        small {
                            (or_placeholder(&item.model_number, "N/A")) " / " (or_placeholder(&item.serial_number, "N/A"))
                        }
                    }
                    td { (status_badge(&item.status)) }
                    td { small class="text-secondary fw-semibold" { (index.resolve(*item)) } }
                    td { (date_or(item.next_maintenance_date, "N/A")) }
                    td class="text-end pe-4" {
                        a class="btn btn-sm btn-light text-info me-1" href=(edit_url::<Equipment>(item.id)) title="Edit" {
                            i class="fa-solid fa-pen" {}
                        }
                        button class="btn btn-sm btn-light text-danger" title="Delete"
                            hx-post=(delete_url::<Equipment>(item.id))
                            hx-confirm="Delete this equipment permanently?"
                            hx-target="#action-feedback" {
                            i class="fa-regular fa-trash-can" {}
                        }
                    }
                }
            }
        }
    }

    fn table_error(err: &ConsoleError) -> Markup {
        error_row(COLUMNS, "Error loading equipment: ", err)
    }

    fn detail_panel(&self, location: &str) -> Markup {
        html! {
            div class="card shadow-sm" {
                div class="card-header d-flex justify-content-between align-items-center" {
                    h2 class="h5 mb-0" { (self.name) }
                    (status_badge(&self.status))
                }
                div class="card-body" {
                    table class="table table-sm mb-3" {
                        tbody {
                            (detail_row("Model", or_placeholder(&self.model_number, "N/A")))
                            (detail_row("Manufacturer", or_placeholder(&self.manufacturer, "Unknown")))
                            (detail_row("Location", location))
                            (detail_row("Last Maintenance", &date_or(self.last_maintenance_date, "N/A")))
                            (detail_row("Next Maintenance", &date_or(self.next_maintenance_date, "N/A")))
                        }
                    }
                    p class="small text-muted" { (or_placeholder(&self.description, "No description provided.")) }
                    div id="detail-feedback" {}
                    div class="d-flex gap-2" {
                        a class="btn btn-sm btn-outline-primary" href=(edit_url::<Self>(self.id)) {
                            i class="fa-solid fa-pen me-1" {} "Edit"
                        }
                        button class="btn btn-sm btn-outline-danger"
                            hx-post=(delete_url::<Self>(self.id))
                            hx-confirm="Delete this equipment permanently?"
                            hx-target="#detail-feedback" {
                            i class="fa-regular fa-trash-can me-1" {} "Delete"
                        }
                    }
                }
            }
        }
    }

    fn form_page(form: &EquipmentForm, locations: &[Location], error: Option<&str>) -> Markup {
        let heading = if form.is_edit() { "Edit Equipment" } else { "Add Equipment" };
        let current_status = if form.status.is_empty() {
            EquipmentStatus::Operational.to_string()
        } else {
            form.status.clone()
        };

        let content = html! {
            div class="row justify-content-center" {
                div class="col-lg-8" {
                    h1 class="h3 mb-4" { (heading) }
                    @if let Some(message) = error {
                        div class="alert alert-danger" role="alert" { (message) }
                    }
                    form method="post" action=(Self::FORM_PATH) class="card card-body" {
                        input type="hidden" name="item_id" value=(form.item_id);
                        div class="row g-3" {
                            div class="col-md-6" {
                                label class="form-label" for="name" { "Name" }
                                input class="form-control" id="name" name="name" required value=(form.name);
                            }
                            div class="col-md-6" {
                                label class="form-label" for="manufacturer" { "Manufacturer" }
                                input class="form-control" id="manufacturer" name="manufacturer" value=(form.manufacturer);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="model_number" { "Model Number" }
                                input class="form-control" id="model_number" name="model_number" value=(form.model_number);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="serial_number" { "Serial Number" }
                                input class="form-control" id="serial_number" name="serial_number" value=(form.serial_number);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="quantity" { "Quantity" }
                                input class="form-control" id="quantity" name="quantity" type="number" step="1" value=(form.quantity);
                            }
                            div class="col-md-6" {
                                label class="form-label" for="status" { "Status" }
                                select class="form-select" id="status" name="status" {
                                    @for status in EquipmentStatus::iter() {
                                        option value=(status.as_ref()) selected[status.as_ref() == current_status] { (status.as_ref()) }
                                    }
                                }
                            }
                            div class="col-md-6" {
                                label class="form-label" for="location_id" { "Location" }
                                select class="form-select" id="location_id" name="location_id" {
                                    (location_options(locations, &form.location_id, "Select location..."))
                                }
                            }
                            div class="col-md-4" {
                                label class="form-label" for="purchase_date" { "Purchase Date" }
                                input class="form-control" id="purchase_date" name="purchase_date" type="date" value=(form.purchase_date);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="last_maintenance_date" { "Last Maintenance" }
                                input class="form-control" id="last_maintenance_date" name="last_maintenance_date" type="date" value=(form.last_maintenance_date);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="next_maintenance_date" { "Next Maintenance" }
                                input class="form-control" id="next_maintenance_date" name="next_maintenance_date" type="date" value=(form.next_maintenance_date);
                            }
                            div class="col-12" {
                                label class="form-label" for="description" { "Description" }
                                textarea class="form-control" id="description" name="description" rows="3" { (form.description) }
                            }
                        }
                        div class="d-flex justify-content-end gap-2 mt-4" {
                            a class="btn btn-light" href=(Self::LIST_PATH) { "Cancel" }
                            button type="submit" class="btn btn-primary" { "Save Equipment" }
                        }
                    }
                }
            }
        };

        base(&PageConfig { title: heading, current_page: Self::PAGE }, content)
    }
}

fn status_badge(status: &str) -> Markup {
    html! {
        span class={ "badge rounded-pill " (EquipmentStatus::badge_class(status)) } { (status) }
    }
}
