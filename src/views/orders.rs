// src/views/orders.rs
use maud::{html, Markup};
use strum::IntoEnumIterator;

use super::components::{error_row, message_row, stat_card};
use super::{base, CurrentPage, PageConfig};
use crate::error::ConsoleResult;
use crate::models::{date_or, Order, OrderStatus};
use crate::orders::{format_rupees, status_badge_class, OrderModal, OrderSummary};

pub const COLUMNS: usize = 7;

/// `modal_error` is shown inside an open modal after a rejected submit.
pub fn orders_page(orders: &ConsoleResult<Vec<Order>>, modal: &OrderModal, modal_error: Option<&str>) -> Markup {
    let summary = match orders {
        Ok(list) => OrderSummary::from_orders(list),
        Err(_) => OrderSummary::from_orders(&[]),
    };

    let content = html! {
        div class="d-flex justify-content-between align-items-center mb-4" {
            h1 class="h3 mb-0" { "Purchase Orders" }
            a class="btn btn-success" href="/orders/new" {
                i class="fa-solid fa-plus me-1" {} "New Order"
            }
        }

        div class="row row-cols-1 row-cols-md-4 g-3 mb-4" {
            (stat_card("Open Orders", summary.open, "fa-box-open", "primary"))
            (stat_card("Received", summary.received, "fa-circle-check", "success"))
            (stat_card("Pending", summary.pending, "fa-hourglass-half", "warning"))
            div class="col" {
                div class="card stat-card border-info" {
                    div class="card-body d-flex align-items-center" {
                        i class="fa-solid fa-2x me-3 text-info fa-indian-rupee-sign" {}
                        div {
                            div id="stat-spent" class="stat-value" { (summary.spent_display()) }
                            div class="text-muted small" { "Total Spent" }
                        }
                    }
                }
            }
        }

        div id="orders-feedback" {}
        div class="card" {
            div class="table-responsive" {
                table class="table table-hover align-middle mb-0" {
                    thead class="table-light" {
                        tr {
                            th class="ps-4" { "PO Number" }
                            th { "Supplier" }
                            th { "Date" }
                            th { "Items" }
                            th { "Cost" }
                            th { "Status" }
                            th class="text-end pe-4" { "Actions" }
                        }
                    }
                    tbody id="order-rows" {
                        @match orders {
                            Ok(list) => { (order_rows(list)) }
                            Err(err) => { (error_row(COLUMNS, "Error loading orders: ", err)) }
                        }
                    }
                }
            }
        }

        @if modal.open {
            (order_modal(modal, modal_error))
        }
    };

    base(&PageConfig { title: "Orders", current_page: CurrentPage::Orders }, content)
}

pub fn order_rows(orders: &[Order]) -> Markup {
    html! {
        @if orders.is_empty() {
            (message_row(COLUMNS, "No orders found.", "text-muted"))
        }
        @for order in orders {
            tr {
                td class="ps-4 fw-bold" { (order.po_number) }
                td { (order.supplier) }
                td { (date_or(order.order_date, "N/A")) }
                td { (order.items) }
                td { (format_rupees(order.total_cost)) }
                td {
                    span class={ "badge status-badge " (status_badge_class(&order.status)) } { (order.status) }
                }
                td class="text-end pe-4" {
                    a class="btn btn-sm btn-light text-primary me-1" href={ "/orders/" (order.id) "/edit" } title="Edit" {
                        i class="fa-regular fa-pen-to-square" {}
                    }
                    button class="btn btn-sm btn-light text-danger" title="Delete"
                        hx-post={ "/orders/" (order.id) "/delete" }
                        hx-confirm="Delete this order record?"
                        hx-target="#orders-feedback" {
                        i class="fa-regular fa-trash-can" {}
                    }
                }
            }
        }
    }
}

fn order_modal(modal: &OrderModal, error: Option<&str>) -> Markup {
    let form = &modal.form;
    let current_status = if form.status.is_empty() {
        OrderStatus::Pending.to_string()
    } else {
        form.status.clone()
    };

    html! {
        div class="modal show d-block" tabindex="-1" role="dialog" aria-modal="true" {
            div class="modal-dialog modal-lg" {
                form class="modal-content" method="post" action="/orders" {
                    div class="modal-header" {
                        h2 class="modal-title h5" { (modal.title()) }
                        a class="btn-close" href="/orders" aria-label="Close" {}
                    }
                    div class="modal-body" {
                        @if let Some(message) = error {
                            div class="alert alert-danger" role="alert" { (message) }
                        }
                        input type="hidden" name="order_id" value=(form.order_id);
                        input type="hidden" name="submission_token" value=(form.submission_token);
                        div class="row g-3" {
                            div class="col-md-6" {
                                label class="form-label" for="po_number" { "PO Number" }
                                input class="form-control" id="po_number" name="po_number" required value=(form.po_number);
                            }
                            div class="col-md-6" {
                                label class="form-label" for="supplier" { "Supplier" }
                                input class="form-control" id="supplier" name="supplier" value=(form.supplier);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="order_date" { "Order Date" }
                                input class="form-control" id="order_date" name="order_date" type="date" value=(form.order_date);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="total_cost" { "Total Cost (₹)" }
                                input class="form-control" id="total_cost" name="total_cost" type="number" step="0.01" value=(form.total_cost);
                            }
                            div class="col-md-4" {
                                label class="form-label" for="status" { "Status" }
                                select class="form-select" id="status" name="status" {
                                    @for status in OrderStatus::iter() {
                                        option value=(status.as_ref()) selected[status.as_ref() == current_status] {
                                            (status.as_ref())
                                        }
                                    }
                                }
                            }
                            div class="col-12" {
                                label class="form-label" for="items" { "Items" }
                                textarea class="form-control" id="items" name="items" rows="3" { (form.items) }
                            }
                        }
                    }
                    div class="modal-footer" {
                        a class="btn btn-light" href="/orders" { "Cancel" }
                        button type="submit" class="btn btn-primary" { (modal.submit_label()) }
                    }
                }
            }
        }
        div class="modal-backdrop show" {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use uuid::Uuid;

    fn orders() -> Vec<Order> {
        serde_json::from_str(
            r#"[
                {"id": 1, "po_number": "PO-1", "supplier": "Sigma", "order_date": "2024-04-01",
                 "items": "Acetone", "total_cost": "100.50", "status": "Pending"},
                {"id": 2, "po_number": "PO-2", "supplier": "Merck", "order_date": null,
                 "items": "Gloves", "total_cost": 0, "status": "Received"},
                {"id": 3, "po_number": "PO-3", "supplier": "VWR", "items": "Beakers",
                 "total_cost": 49.5, "status": "Shipped"}
            ]"#,
        ).unwrap()
    }

    #[test]
    fn test_page_totals_and_rows() {
        let html = orders_page(&Ok(orders()), &OrderModal::default(), None).into_string();
        assert!(html.contains("₹150.00"));
        assert!(html.contains("₹100.50"));
        assert!(html.contains("N/A"));
        assert!(html.contains("bg-primary"));
        assert!(html.contains("Delete this order record?"));
        assert!(!html.contains("modal-backdrop"));
    }

    #[test]
    fn test_load_failure_row() {
        let err = ConsoleError::Transport("connection refused".into());
        let html = orders_page(&Err(err), &OrderModal::default(), None).into_string();
        assert!(html.contains("Error loading orders: Network error: connection refused"));
        assert!(html.contains("₹0.00"));
    }

    #[test]
    fn test_modal_modes() {
        let list = orders();
        let edit = OrderModal::open_edit(&list, 3).unwrap();
        let html = orders_page(&Ok(list.clone()), &edit, None).into_string();
        assert!(html.contains("Edit Purchase Order"));
        assert!(html.contains("Update Order"));
        assert!(html.contains(r#"<option value="Shipped" selected>Shipped</option>"#));
        assert!(html.contains(r#"name="order_id" value="3""#));

        let token = Uuid::new_v4();
        let create = OrderModal::open_create(token);
        let html = orders_page(&Ok(list), &create, Some("Failed to save order")).into_string();
        assert!(html.contains("New Purchase Order"));
        assert!(html.contains("Create Order"));
        assert!(html.contains(&token.to_string()));
        assert!(html.contains("Failed to save order"));
    }
}
