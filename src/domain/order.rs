use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Paid,
}

/// A purchase attempt, from gateway order creation to payment confirmation.
///
/// Product fields are copied at creation so later catalog edits never change
/// what a paid order entitles the customer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    pub status: OrderStatus,
    pub product: String,
    pub product_name: String,
    pub download_link: String,
    // Free-form contact details; older records may omit any of them.
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_contact: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

/// Customer details supplied with a create-order request. Not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// What the gateway told us about the remote order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
}

impl Order {
    /// Builds a freshly created order from the gateway's answer.
    pub fn created(
        remote: RemoteOrder,
        product: &Product,
        customer: Customer,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: remote.id,
            amount: remote.amount,
            currency: remote.currency,
            receipt: remote.receipt,
            status: OrderStatus::Created,
            product: product.id.clone(),
            product_name: product.name.clone(),
            download_link: product.download_link.clone(),
            customer_name: customer.name,
            customer_email: customer.email,
            customer_contact: customer.contact,
            created_at,
            payment_id: None,
            paid_at: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == OrderStatus::Paid
    }
}
