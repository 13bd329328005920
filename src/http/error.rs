use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::error::CheckoutError;

/// Error response of the order-creation endpoints: `{ "error": ... }`.
#[derive(Debug)]
pub enum OrderApiError {
    Checkout(CheckoutError),
    /// The body was not a JSON object, so no product was selected.
    Body(JsonRejection),
}

impl From<CheckoutError> for OrderApiError {
    fn from(err: CheckoutError) -> Self {
        OrderApiError::Checkout(err)
    }
}

impl From<JsonRejection> for OrderApiError {
    fn from(rejection: JsonRejection) -> Self {
        OrderApiError::Body(rejection)
    }
}

impl IntoResponse for OrderApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            OrderApiError::Body(rejection) => {
                warn!(error = %rejection.body_text(), "Unreadable create-order body");
                (StatusCode::BAD_REQUEST, "Invalid product selection")
            }
            OrderApiError::Checkout(CheckoutError::InvalidProduct(_)) => {
                (StatusCode::BAD_REQUEST, "Invalid product selection")
            }
            OrderApiError::Checkout(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Error creating order"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Error response of the payment-verification endpoints: `{ "status": ... }`.
#[derive(Debug)]
pub enum VerifyApiError {
    Checkout(CheckoutError),
    /// An unreadable callback carries no signature to check.
    Body(JsonRejection),
}

impl From<CheckoutError> for VerifyApiError {
    fn from(err: CheckoutError) -> Self {
        VerifyApiError::Checkout(err)
    }
}

impl From<JsonRejection> for VerifyApiError {
    fn from(rejection: JsonRejection) -> Self {
        VerifyApiError::Body(rejection)
    }
}

impl IntoResponse for VerifyApiError {
    fn into_response(self) -> Response {
        let err = match self {
            VerifyApiError::Checkout(err) => err,
            VerifyApiError::Body(rejection) => {
                warn!(error = %rejection.body_text(), "Unreadable verify-payment body");
                CheckoutError::VerificationFailed
            }
        };
        let (status, body) = match err {
            CheckoutError::VerificationFailed => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "verification_failed" }),
            ),
            CheckoutError::OrderNotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "status": "error", "message": "Order not found" }),
            ),
            CheckoutError::AlreadyPaid(_) => (
                StatusCode::CONFLICT,
                json!({ "status": "error", "message": "Order already paid" }),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "status": "error", "message": "Error verifying payment" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
