// src/order_handlers.rs
//! Purchase-order page, modal and actions.
//!
//! The modal is server-rendered: `/orders/new` and `/orders/{id}/edit` open it,
//! any link back to `/orders` closes it, which always resets it to create mode.

use actix_web::http::header;
use actix_web::{web, HttpResponse, ResponseError};
use std::sync::Arc;

use crate::error::ConsoleError;
use crate::forms::OrderForm;
use crate::orders::{ModalMode, OrderModal, TokenCheck};
use crate::views::components::error_alert;
use crate::views::orders::orders_page as render_orders;
use crate::views::{error_page, render, render_with_status, CurrentPage};
use crate::AppState;

const ORDERS_PATH: &str = "/orders";

fn back_to_orders() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, ORDERS_PATH))
        .finish()
}

pub async fn orders_page(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    let orders = app_state.session.client.list_orders().await;
    if let Err(err) = &orders {
        log::warn!("Failed to load orders: {}", err);
    }
    render(render_orders(&orders, &OrderModal::default(), None))
}

pub async fn new_order_page(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    let orders = app_state.session.client.list_orders().await;
    let modal = OrderModal::open_create(app_state.order_guard.issue());
    render(render_orders(&orders, &modal, None))
}

/// Pre-filled from the freshly listed orders, not from a by-id fetch.
pub async fn edit_order_page(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    let orders = app_state.session.client.list_orders().await;

    let modal = match &orders {
        Ok(list) => OrderModal::open_edit(list, id),
        Err(_) => None,
    };

    match modal {
        Some(modal) => render(render_orders(&orders, &modal, None)),
        None if orders.is_ok() => {
            let err = ConsoleError::not_found("Order");
            render_with_status(err.status_code(), error_page(CurrentPage::Orders, &err))
        }
        None => render(render_orders(&orders, &OrderModal::default(), None)),
    }
}

/// Create (blank `order_id`) or update-by-id. Creates must carry an unused
/// submission token; a replayed token is dropped without a backend call.
pub async fn submit_order(
    app_state: web::Data<Arc<AppState>>,
    form: web::Form<OrderForm>,
) -> HttpResponse {
    let form = form.into_inner();

    let target = match form.target_id() {
        Ok(target) => target,
        Err(err) => return reopen_after_failure(&app_state, form, ModalMode::Create, err).await,
    };
    let mode = target.map(ModalMode::Edit).unwrap_or(ModalMode::Create);

    if target.is_none() {
        match app_state.order_guard.consume(&form.submission_token) {
            TokenCheck::Fresh => {}
            TokenCheck::Replayed => {
                log::warn!("Ignoring duplicate order submission (token {})", form.submission_token);
                return back_to_orders();
            }
            TokenCheck::Invalid => {
                let err = ConsoleError::BadRequest("Missing submission token".to_string());
                return reopen_after_failure(&app_state, form, mode, err).await;
            }
        }
    }

    let client = &app_state.session.client;
    let saved = async {
        let draft = form.to_draft()?;
        match target {
            Some(id) => client.update_order(id, &draft).await,
            None => client.create_order(&draft).await,
        }
    }
    .await;

    match saved {
        Ok(receipt) => {
            log::info!(
                "Order {} saved: {}",
                form.po_number,
                receipt.message.as_deref().unwrap_or("ok")
            );
            back_to_orders()
        }
        Err(err) => reopen_after_failure(&app_state, form, mode, err).await,
    }
}

async fn reopen_after_failure(
    app_state: &AppState,
    mut form: OrderForm,
    mode: ModalMode,
    err: ConsoleError,
) -> HttpResponse {
    log::warn!("Failed to save order {}: {}", form.po_number, err);
    if mode == ModalMode::Create {
        form.submission_token = app_state.order_guard.issue().to_string();
    }

    let orders = app_state.session.client.list_orders().await;
    let modal = OrderModal::reopen_with(form, mode);
    render_with_status(
        err.status_code(),
        render_orders(&orders, &modal, Some(&err.to_string())),
    )
}

pub async fn delete_order(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<i64>,
) -> HttpResponse {
    let id = path.into_inner();
    match app_state.session.client.delete_order(id).await {
        Ok(()) => {
            log::info!("Deleted order {}", id);
            HttpResponse::Ok().insert_header(("HX-Refresh", "true")).finish()
        }
        Err(err) => {
            log::warn!("Failed to delete order {}: {}", id, err);
            render(error_alert(&err))
        }
    }
}
