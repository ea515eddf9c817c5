// src/views/components.rs
//! Small building blocks shared by every page.

use maud::{html, Markup};

use crate::error::ConsoleError;
use crate::models::Location;

pub fn stat_card(label: &str, value: usize, icon: &str, tone: &str) -> Markup {
    html! {
        div class="col" {
            div class={ "card stat-card border-" (tone) } {
                div class="card-body d-flex align-items-center" {
                    i class={ "fa-solid fa-2x me-3 text-" (tone) " " (icon) } {}
                    div {
                        div class="stat-value" { (value) }
                        div class="text-muted small" { (label) }
                    }
                }
            }
        }
    }
}

/// Single full-width row, used for empty tables and load failures.
pub fn message_row(colspan: usize, text: &str, class: &str) -> Markup {
    html! {
        tr {
            td colspan=(colspan) class={ "text-center py-3 " (class) } { (text) }
        }
    }
}

pub fn error_row(colspan: usize, prefix: &str, err: &ConsoleError) -> Markup {
    message_row(colspan, &format!("{}{}", prefix, err), "text-danger")
}

/// Inline alert for a failed action, with the error's hint when it has one.
pub fn error_alert(err: &ConsoleError) -> Markup {
    html! {
        div class="alert alert-danger" role="alert" {
            i class="fa-solid fa-circle-exclamation me-2" {}
            (err.to_string())
            @if let Some(hint) = err.hint() {
                br;
                small { (hint) }
            }
        }
    }
}

/// `<option>`s for a location select; `selected` is the raw submitted value.
pub fn location_options(locations: &[Location], selected: &str, placeholder: &str) -> Markup {
    html! {
        option value="" selected[selected.is_empty()] { (placeholder) }
        @for location in locations {
            @let id = location.id.to_string();
            option value=(id) selected[id == selected] { (location.name) }
        }
    }
}

pub fn detail_row(label: &str, value: &str) -> Markup {
    html! {
        tr {
            th class="text-muted fw-normal w-25" { (label) }
            td { (value) }
        }
    }
}
