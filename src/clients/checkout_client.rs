use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use crate::clients::OrderClient;
use crate::domain::{Catalog, Customer, Order, ProductSummary};
use crate::error::CheckoutError;
use crate::gateway::{verify_signature, GatewayOrder, GatewayOrderRequest, OrderNotes, PaymentGateway};
use crate::order_actor::OrderActionResult;

/// Per-deployment checkout settings.
#[derive(Clone)]
pub struct CheckoutSettings {
    pub currency: String,
    pub venture: String,
    /// Shared secret the gateway signs payment callbacks with.
    pub signing_secret: String,
}

impl fmt::Debug for CheckoutSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutSettings")
            .field("currency", &self.currency)
            .field("venture", &self.venture)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub product_id: String,
    pub customer: Customer,
}

#[derive(Debug, Clone)]
pub struct VerifyPaymentRequest {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Proof of entitlement handed back after a verified payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub download_link: String,
    pub product_name: String,
}

/// Orchestrates the checkout: catalog lookup, gateway order creation and
/// payment verification, with the Order actor as the record keeper.
#[derive(Clone)]
pub struct CheckoutClient {
    orders: OrderClient,
    gateway: Arc<dyn PaymentGateway>,
    catalog: Arc<Catalog>,
    settings: Arc<CheckoutSettings>,
}

impl CheckoutClient {
    pub fn new(
        orders: OrderClient,
        gateway: Arc<dyn PaymentGateway>,
        catalog: Arc<Catalog>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            orders,
            gateway,
            catalog,
            settings: Arc::new(settings),
        }
    }

    pub fn list_products(&self) -> Vec<ProductSummary> {
        self.catalog.summaries()
    }

    /// Creates a gateway order for a catalog product and records it locally.
    ///
    /// Nothing is recorded unless the gateway accepted the order.
    #[instrument(skip(self, request), fields(product_id = %request.product_id))]
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, CheckoutError> {
        info!("Processing create_order request");

        // Step 1: Resolve product
        let Some(product) = self.catalog.get(&request.product_id) else {
            warn!("Unknown product");
            return Err(CheckoutError::InvalidProduct(request.product_id));
        };
        let amount = product
            .amount_in_minor_units()
            .ok_or_else(|| CheckoutError::InvalidProduct(request.product_id.clone()))?;

        // Step 2: Create the remote order
        let now = Utc::now();
        let gateway_request = GatewayOrderRequest {
            amount,
            currency: self.settings.currency.clone(),
            receipt: format!("notes_{}_{}", product.id, now.timestamp_millis()),
            notes: OrderNotes {
                product: product.id.clone(),
                product_name: product.name.clone(),
                download_link: product.download_link.clone(),
                customer_name: request.customer.name.clone(),
                customer_email: request.customer.email.clone(),
                customer_contact: request.customer.contact.clone(),
                venture: self.settings.venture.clone(),
            },
        };

        let gateway_order = self.gateway.create_order(gateway_request).await.map_err(|e| {
            error!(error = %e, "Gateway order creation failed");
            CheckoutError::from(e)
        })?;

        // Step 3: Record the order
        let order = Order::created(gateway_order.clone().into(), product, request.customer, now);
        self.orders.record_order(order).await.map_err(|e| {
            error!(error = %e, order_id = %gateway_order.id, "Failed to record order");
            CheckoutError::from(e)
        })?;

        info!(order_id = %gateway_order.id, amount = gateway_order.amount, "Order created");
        Ok(gateway_order)
    }

    /// Checks a payment callback and, when authentic, marks the order paid.
    #[instrument(
        skip(self, request),
        fields(order_id = %request.order_id, payment_id = %request.payment_id)
    )]
    pub async fn verify_payment(
        &self,
        request: VerifyPaymentRequest,
    ) -> Result<PaymentConfirmation, CheckoutError> {
        info!("Processing verify_payment request");

        // Step 1: Authenticate the callback
        let payload = format!("{}|{}", request.order_id, request.payment_id);
        match verify_signature(&payload, &request.signature, &self.settings.signing_secret) {
            Ok(true) => {}
            Ok(false) => {
                warn!("Signature mismatch");
                return Err(CheckoutError::VerificationFailed);
            }
            Err(e) => {
                warn!(error = %e, "Signature could not be checked");
                return Err(CheckoutError::VerificationFailed);
            }
        }

        // Step 2: Settle the order
        let outcome = self
            .orders
            .mark_paid(request.order_id.clone(), request.payment_id.clone(), Utc::now())
            .await
            .map_err(|e| {
                warn!(error = %e, "Order could not be marked paid");
                CheckoutError::from(e)
            })?;

        match &outcome {
            OrderActionResult::Paid(_) => info!("Order paid"),
            OrderActionResult::AlreadyPaid(_) => info!("Payment replayed for paid order"),
        }
        let order = outcome.into_order();

        debug_assert!(order.is_paid());
        Ok(PaymentConfirmation {
            order_id: order.order_id,
            payment_id: request.payment_id,
            download_link: order.download_link,
            product_name: order.product_name,
        })
    }
}
