use chrono::{DateTime, Utc};

use crate::domain::Order;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Records a verified payment against the order.
    ///
    /// Replaying the payment that already settled the order changes nothing.
    /// A different payment for an already paid order is rejected.
    MarkPaid {
        payment_id: String,
        paid_at: DateTime<Utc>,
    },
}

/// Results from OrderActions
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The order moved from created to paid.
    Paid(Order),
    /// The same payment was presented again; the stored record is returned as is.
    AlreadyPaid(Order),
}

impl OrderActionResult {
    pub fn into_order(self) -> Order {
        match self {
            OrderActionResult::Paid(order) | OrderActionResult::AlreadyPaid(order) => order,
        }
    }
}
