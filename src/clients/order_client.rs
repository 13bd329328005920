use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::Order;
use crate::order_actor::{OrderAction, OrderActionResult};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, order);

impl OrderClient {
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn record_order(&self, order: Order) -> Result<String, FrameworkError> {
        debug!("Sending request");
        self.inner.create(order).await
    }

    #[instrument(skip(self, paid_at))]
    pub async fn mark_paid(
        &self,
        order_id: String,
        payment_id: String,
        paid_at: DateTime<Utc>,
    ) -> Result<OrderActionResult, FrameworkError> {
        debug!("Sending request");
        self.inner
            .perform_action(order_id, OrderAction::MarkPaid { payment_id, paid_at })
            .await
    }
}
