//! Payment gateway seam: remote order creation and callback signature checks.

mod razorpay;
mod signature;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RemoteOrder;

pub use razorpay::RazorpayClient;
pub use signature::verify_signature;

#[cfg(test)]
pub(crate) use signature::sign;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Gateway rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Gateway client misconfigured: {0}")]
    Config(String),
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
    #[error("Signing secret is not configured")]
    MissingSecret,
}

/// Audit data attached to a gateway order.
///
/// Every field is always sent; absent customer details go out as empty
/// strings. Nothing here is read back when the payment is verified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderNotes {
    pub product: String,
    pub product_name: String,
    pub download_link: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_contact: String,
    pub venture: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayOrderRequest {
    /// In the currency's minor unit.
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
    pub notes: OrderNotes,
}

/// The gateway's order descriptor, returned verbatim to the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: u64,
    pub currency: String,
    pub receipt: String,
}

impl From<GatewayOrder> for RemoteOrder {
    fn from(order: GatewayOrder) -> Self {
        RemoteOrder {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt,
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, request: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError>;
}
