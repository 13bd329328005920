//! Request and response bodies of the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::clients::{CreateOrderRequest, PaymentConfirmation, VerifyPaymentRequest};
use crate::domain::Customer;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_contact: String,
}

impl From<CreateOrderBody> for CreateOrderRequest {
    fn from(body: CreateOrderBody) -> Self {
        CreateOrderRequest {
            product_id: body.product_id,
            customer: Customer {
                name: body.customer_name,
                email: body.customer_email,
                contact: body.customer_contact,
            },
        }
    }
}

/// Body sent by the original storefront.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCreateOrderBody {
    #[serde(default)]
    pub selected_note: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub contact: String,
}

impl From<LegacyCreateOrderBody> for CreateOrderRequest {
    fn from(body: LegacyCreateOrderBody) -> Self {
        CreateOrderRequest {
            product_id: body.selected_note,
            customer: Customer {
                name: body.name,
                email: body.email,
                contact: body.contact,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentBody {
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub signature: String,
}

impl From<VerifyPaymentBody> for VerifyPaymentRequest {
    fn from(body: VerifyPaymentBody) -> Self {
        VerifyPaymentRequest {
            order_id: body.order_id,
            payment_id: body.payment_id,
            signature: body.signature,
        }
    }
}

/// Callback fields exactly as the gateway's checkout widget names them.
#[derive(Debug, Deserialize)]
pub struct LegacyVerifyPaymentBody {
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
}

impl From<LegacyVerifyPaymentBody> for VerifyPaymentRequest {
    fn from(body: LegacyVerifyPaymentBody) -> Self {
        VerifyPaymentRequest {
            order_id: body.razorpay_order_id,
            payment_id: body.razorpay_payment_id,
            signature: body.razorpay_signature,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedBody {
    pub status: &'static str,
    pub order_id: String,
    pub payment_id: String,
    pub download_link: String,
    pub product_name: String,
}

impl From<PaymentConfirmation> for VerifiedBody {
    fn from(confirmation: PaymentConfirmation) -> Self {
        VerifiedBody {
            status: "ok",
            order_id: confirmation.order_id,
            payment_id: confirmation.payment_id,
            download_link: confirmation.download_link,
            product_name: confirmation.product_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LegacyVerifiedBody {
    pub status: &'static str,
    pub order_id: String,
    pub payment_id: String,
    pub download_link: String,
    pub product_name: String,
}

impl From<PaymentConfirmation> for LegacyVerifiedBody {
    fn from(confirmation: PaymentConfirmation) -> Self {
        LegacyVerifiedBody {
            status: "ok",
            order_id: confirmation.order_id,
            payment_id: confirmation.payment_id,
            download_link: confirmation.download_link,
            product_name: confirmation.product_name,
        }
    }
}
