use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::gateway::GatewayError;

/// Failures of the checkout flows. Every one of them ends the request.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("Payment verification failed")]
    VerificationFailed,
    #[error("Order not found: {0}")]
    OrderNotFound(String),
    #[error("Payment rejected: {0}")]
    AlreadyPaid(String),
    #[error("Order record refused: {0}")]
    InvalidOrder(String),
    #[error("Order already recorded: {0}")]
    DuplicateOrder(String),
    #[error("Order store error: {0}")]
    Store(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<FrameworkError> for CheckoutError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => CheckoutError::OrderNotFound(id),
            FrameworkError::AlreadyExists(id) => CheckoutError::DuplicateOrder(id),
            FrameworkError::Invalid(reason) => CheckoutError::InvalidOrder(reason),
            FrameworkError::Rejected(reason) => CheckoutError::AlreadyPaid(reason),
            FrameworkError::Storage(reason) => CheckoutError::Store(reason),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                CheckoutError::ActorCommunication(e.to_string())
            }
        }
    }
}
