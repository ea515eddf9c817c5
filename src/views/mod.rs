// src/views/mod.rs
//! HTML rendering. Every function returns a fresh `Markup`; nothing is
//! patched in place, so actions are bound to the record they were rendered
//! for.

pub mod assist;
pub mod chemicals;
pub mod components;
pub mod equipment;
pub mod layout;
pub mod orders;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use maud::Markup;

use crate::forms::EntityForm;
use crate::inventory::{InventoryEntity, ListFilter, LocationIndex};
use crate::models::Location;

pub use layout::{base, error_page, CurrentPage, PageConfig};

/// Everything a dashboard render needs besides the records.
pub struct DashboardContext<'a> {
    pub locations: &'a [Location],
    pub index: &'a LocationIndex,
    pub filter: &'a ListFilter,
    pub ai_mode: bool,
    pub now: DateTime<Utc>,
}

/// Page- and fragment-level rendering for one inventory entity. The generic
/// handlers in `inventory_handlers` are instantiated once per implementor.
pub trait InventoryView: InventoryEntity {
    type Form: EntityForm<Entity = Self>;

    /// Listing page; saves redirect here.
    const LIST_PATH: &'static str;
    /// Prefix for `/table` and `/{id}` fragments.
    const FRAGMENT_BASE: &'static str;
    /// Prefix for `/{id}/delete`.
    const ACTION_BASE: &'static str;
    const FORM_PATH: &'static str;
    /// Highlighted navbar entry.
    const PAGE: CurrentPage;

    fn dashboard(items: &[Self], ctx: &DashboardContext) -> Markup;

    fn table_rows(items: &[&Self], index: &LocationIndex) -> Markup;

    /// Rows shown when the list itself could not be loaded.
    fn table_error(err: &crate::error::ConsoleError) -> Markup;

    fn detail_panel(&self, location: &str) -> Markup;

    fn form_page(form: &Self::Form, locations: &[Location], error: Option<&str>) -> Markup;
}

pub fn render(markup: Markup) -> HttpResponse {
    render_with_status(StatusCode::OK, markup)
}

pub fn render_with_status(status: StatusCode, markup: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(markup.into_string())
}

fn edit_url<V: InventoryView>(id: i64) -> String {
    format!("{}?id={}", V::FORM_PATH, id)
}

fn delete_url<V: InventoryView>(id: i64) -> String {
    format!("{}/{}/delete", V::ACTION_BASE, id)
}

fn detail_url<V: InventoryView>(id: i64) -> String {
    format!("{}/{}", V::FRAGMENT_BASE, id)
}

fn table_url<V: InventoryView>() -> String {
    format!("{}/table", V::FRAGMENT_BASE)
}
