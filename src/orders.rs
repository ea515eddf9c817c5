// src/orders.rs
//! Purchase-order summary, status display classes, the create/edit modal
//! state and the duplicate-submission guard.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use uuid::Uuid;

use crate::forms::OrderForm;
use crate::models::{Order, OrderStatus};

// ==================== SUMMARY ====================

#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    /// Neither Received nor Cancelled.
    pub open: usize,
    pub received: usize,
    pub pending: usize,
    pub spent: f64,
}

impl OrderSummary {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut summary = Self { open: 0, received: 0, pending: 0, spent: 0.0 };

        for order in orders {
            match order.known_status() {
                Some(OrderStatus::Received) => summary.received += 1,
                Some(OrderStatus::Cancelled) => {}
                Some(OrderStatus::Pending) => {
                    summary.pending += 1;
                    summary.open += 1;
                }
                _ => summary.open += 1,
            }
            summary.spent += order.total_cost;
        }

        summary
    }

    pub fn spent_display(&self) -> String {
        format_rupees(self.spent)
    }
}

pub fn format_rupees(amount: f64) -> String {
    format!("₹{:.2}", amount)
}

/// Status → badge class. Unknown statuses get the neutral class.
pub fn status_badge_class(status: &str) -> &'static str {
    match status.parse::<OrderStatus>() {
        Ok(OrderStatus::Received) => "bg-success",
        Ok(OrderStatus::Shipped) => "bg-primary",
        Ok(OrderStatus::Pending) => "bg-warning text-dark",
        Ok(OrderStatus::Cancelled) => "bg-danger",
        Err(_) => "bg-secondary",
    }
}

// ==================== MODAL ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(i64),
}

/// The shared create/edit modal. Closing always yields `OrderModal::default()`.
#[derive(Debug, Clone)]
pub struct OrderModal {
    pub mode: ModalMode,
    pub form: OrderForm,
    pub open: bool,
}

impl Default for OrderModal {
    fn default() -> Self {
        Self {
            mode: ModalMode::Create,
            form: OrderForm::default(),
            open: false,
        }
    }
}

impl OrderModal {
    pub fn open_create(token: Uuid) -> Self {
        let mut modal = Self::default();
        modal.form.submission_token = token.to_string();
        modal.open = true;
        modal
    }

    /// Pre-fills from the orders already loaded for the page; no refetch.
    pub fn open_edit(orders: &[Order], id: i64) -> Option<Self> {
        let order = orders.iter().find(|o| o.id == id)?;
        Some(Self {
            mode: ModalMode::Edit(id),
            form: OrderForm::from_order(order),
            open: true,
        })
    }

    /// A failed submit keeps the values the user typed.
    pub fn reopen_with(form: OrderForm, mode: ModalMode) -> Self {
        Self { mode, form, open: true }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            ModalMode::Create => "New Purchase Order",
            ModalMode::Edit(_) => "Edit Purchase Order",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            ModalMode::Create => "Create Order",
            ModalMode::Edit(_) => "Update Order",
        }
    }
}

// ==================== SUBMISSION GUARD ====================

const GUARD_CAPACITY: usize = 1024;

#[derive(Debug, PartialEq, Eq)]
pub enum TokenCheck {
    Fresh,
    /// Seen before; the submission is a duplicate.
    Replayed,
    /// Missing or not a UUID.
    Invalid,
}

#[derive(Default)]
struct ConsumedTokens {
    order: VecDeque<Uuid>,
    seen: HashSet<Uuid>,
}

/// One-time tokens for order create forms. Remembers the last
/// `GUARD_CAPACITY` consumed tokens.
#[derive(Default)]
pub struct SubmissionGuard {
    consumed: Mutex<ConsumedTokens>,
}

impl SubmissionGuard {
    pub fn issue(&self) -> Uuid {
        Uuid::new_v4()
    }

    pub fn consume(&self, raw: &str) -> TokenCheck {
        let token = match Uuid::parse_str(raw.trim()) {
            Ok(token) => token,
            Err(_) => return TokenCheck::Invalid,
        };

        let mut consumed = match self.consumed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !consumed.seen.insert(token) {
            return TokenCheck::Replayed;
        }
        consumed.order.push_back(token);
        if consumed.order.len() > GUARD_CAPACITY {
            if let Some(oldest) = consumed.order.pop_front() {
                consumed.seen.remove(&oldest);
            }
        }
        TokenCheck::Fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64, cost: f64, status: &str) -> Order {
        Order {
            id,
            po_number: format!("PO-{}", id),
            supplier: "Sigma".to_string(),
            order_date: None,
            items: String::new(),
            total_cost: cost,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_summary_scenario() {
        let orders = vec![
            order(1, 100.50, "Pending"),
            order(2, 0.0, "Received"),
            order(3, 49.50, "Shipped"),
        ];
        let summary = OrderSummary::from_orders(&orders);
        assert_eq!(summary.spent_display(), "₹150.00");
        assert_eq!(summary.open, 2);
        assert_eq!(summary.received, 1);
        assert_eq!(summary.pending, 1);
    }

    #[test]
    fn test_cancelled_and_unknown_statuses() {
        let orders = vec![order(1, 10.0, "Cancelled"), order(2, 5.0, "Backordered")];
        let summary = OrderSummary::from_orders(&orders);
        assert_eq!(summary.open, 1);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.spent_display(), "₹15.00");

        let summary = OrderSummary::from_orders(&[order(3, 1.0, "received"), order(4, 1.0, "pending")]);
        assert_eq!(summary.received, 0);
        assert_eq!(summary.pending, 0);
        assert_eq!(summary.open, 2);
    }

    #[test]
    fn test_status_badges() {
        assert_eq!(status_badge_class("Received"), "bg-success");
        assert_eq!(status_badge_class("Shipped"), "bg-primary");
        assert_eq!(status_badge_class("Pending"), "bg-warning text-dark");
        assert_eq!(status_badge_class("Cancelled"), "bg-danger");
        assert_eq!(status_badge_class("On hold"), "bg-secondary");
        assert_eq!(status_badge_class("received"), "bg-secondary");
    }

    #[test]
    fn test_modal_edit_then_reset() {
        let orders = vec![order(7, 12.5, "Shipped")];
        let mut modal = OrderModal::open_edit(&orders, 7).unwrap();
        assert_eq!(modal.mode, ModalMode::Edit(7));
        assert_eq!(modal.title(), "Edit Purchase Order");
        assert_eq!(modal.submit_label(), "Update Order");
        assert_eq!(modal.form.po_number, "PO-7");
        assert_eq!(modal.form.order_id, "7");

        modal.reset();
        assert_eq!(modal.mode, ModalMode::Create);
        assert_eq!(modal.title(), "New Purchase Order");
        assert_eq!(modal.submit_label(), "Create Order");
        assert!(modal.form.po_number.is_empty());
        assert!(!modal.open);

        assert!(OrderModal::open_edit(&orders, 8).is_none());
    }

    #[test]
    fn test_submission_token_is_single_use() {
        let guard = SubmissionGuard::default();
        let token = guard.issue().to_string();
        assert_eq!(guard.consume(&token), TokenCheck::Fresh);
        assert_eq!(guard.consume(&token), TokenCheck::Replayed);
        assert_eq!(guard.consume(""), TokenCheck::Invalid);
        assert_eq!(guard.consume(&guard.issue().to_string()), TokenCheck::Fresh);
    }

    #[test]
    fn test_guard_forgets_oldest_tokens() {
        let guard = SubmissionGuard::default();
        let first = guard.issue().to_string();
        guard.consume(&first);
        for _ in 0..GUARD_CAPACITY {
            guard.consume(&guard.issue().to_string());
        }
        assert_eq!(guard.consume(&first), TokenCheck::Fresh);
    }
}
