//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then helpers
//! like [`expect_create`] or [`expect_action`] to assert behavior. For the
//! gateway seam, [`FakeGateway`] records requests and answers with canned
//! orders.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use crate::app_system::CheckoutSystem;
use crate::clients::CheckoutSettings;
use crate::domain::Catalog;
use crate::gateway::{GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway};
use crate::store::OrderStore;

pub const TEST_SECRET: &str = "rzp_test_secret";

/// Creates a mock client and a receiver for asserting requests.
///
/// The client sends to a channel the test controls, so the test plays the
/// actor: it inspects each request and decides the reply.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// In-memory stand-in for the payment gateway.
#[derive(Default)]
pub struct FakeGateway {
    next_id: AtomicU64,
    fail: bool,
    requests: Mutex<Vec<GatewayOrderRequest>>,
}

impl FakeGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<GatewayOrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_order(&self, request: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(GatewayError::Rejected {
                status: 502,
                body: "upstream unavailable".into(),
            });
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayOrder {
            id: format!("order_fake{n}"),
            amount: request.amount,
            currency: request.currency,
            receipt: request.receipt,
        })
    }
}

pub fn test_settings() -> CheckoutSettings {
    CheckoutSettings {
        currency: "INR".into(),
        venture: "CodeZ".into(),
        signing_secret: TEST_SECRET.into(),
    }
}

/// Starts a real system over an order file in `dir`.
pub async fn start_test_system(
    dir: &tempfile::TempDir,
    gateway: Arc<FakeGateway>,
) -> (CheckoutSystem, OrderStore) {
    let path = dir.path().join("orders.json");
    let system = CheckoutSystem::start(
        OrderStore::new(&path),
        Catalog::builtin_notes(),
        gateway,
        test_settings(),
    )
    .await
    .unwrap();
    (system, OrderStore::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::created_order;
    use crate::domain::Order;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Order>(10);

        let create_task = tokio::spawn(async move { client.create(created_order("order_1")).await });

        let (item, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(item.order_id, "order_1");
        responder.send(Ok("order_1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("order_1".to_string()));
    }
}
