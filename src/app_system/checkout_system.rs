use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::clients::{CheckoutClient, CheckoutSettings, OrderClient};
use crate::domain::{Catalog, Order};
use crate::gateway::PaymentGateway;
use crate::store::{OrderStore, StoreError};

const ORDER_MAILBOX_SIZE: usize = 100;

/// The running checkout backend.
///
/// Starts the order actor over the order file, wires it into the checkout
/// client, and tracks the spawned task for shutdown.
pub struct CheckoutSystem {
    pub checkout_client: CheckoutClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CheckoutSystem {
    /// Create and start the system.
    ///
    /// **Startup Order:**
    /// 1. Make sure the order file exists
    /// 2. Start the order actor that owns it
    /// 3. Build the checkout client on top of the order client
    #[instrument(name = "checkout_system", skip_all, fields(orders = %store.path().display()))]
    pub async fn start(
        store: OrderStore,
        catalog: Catalog,
        gateway: Arc<dyn PaymentGateway>,
        settings: CheckoutSettings,
    ) -> Result<Self, StoreError> {
        info!("Starting checkout system");
        store.ensure_initialized().await?;

        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(ORDER_MAILBOX_SIZE, store);
        let order_client = OrderClient::new(order_resource_client);
        let handles = vec![tokio::spawn(order_actor.run())];

        let checkout_client =
            CheckoutClient::new(order_client.clone(), gateway, Arc::new(catalog), settings);

        match order_client.list_orders().await {
            Ok(orders) => info!(orders = orders.len(), "Checkout system started"),
            Err(e) => error!(error = %e, "Order actor did not answer at startup"),
        }

        Ok(Self {
            checkout_client,
            order_client,
            handles,
        })
    }

    /// Drops this system's clients and waits for the actors to drain.
    ///
    /// Clones handed out elsewhere (e.g. to the HTTP router) must be dropped
    /// first, or the actors keep running.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down checkout system");

        drop(self.checkout_client);
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {e:?}"));
            }
        }

        info!("Checkout system shutdown complete");
        Ok(())
    }
}
