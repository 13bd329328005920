use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

use super::{GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway};
use crate::config::GatewayConfig;

/// HTTP client for the Razorpay orders API.
#[derive(Clone)]
pub struct RazorpayClient {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    #[instrument(
        skip(self, request),
        fields(amount = request.amount, currency = %request.currency, receipt = %request.receipt)
    )]
    async fn create_order(&self, request: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/orders", self.base_url);
        debug!(%url, "Sending request");

        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Gateway rejected order");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let order: GatewayOrder = resp.json().await?;
        info!(order_id = %order.id, "Gateway order created");
        Ok(order)
    }
}
