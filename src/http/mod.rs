//! HTTP surface: product listing, order creation, payment verification and
//! the storefront's static files.

mod dto;
mod error;
mod handlers;

use std::path::Path;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::clients::CheckoutClient;

#[derive(Clone)]
pub struct AppState {
    pub checkout: CheckoutClient,
}

impl AppState {
    pub fn new(checkout: CheckoutClient) -> Self {
        Self { checkout }
    }
}

pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/orders", post(handlers::create_order))
        .route("/payments/verify", post(handlers::verify_payment))
        // Paths used by the original storefront.
        .route("/api/get-notes", get(handlers::list_products))
        .route("/api/create-order", post(handlers::legacy_create_order))
        .route("/api/verify-payment", post(handlers::legacy_verify_payment))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };
    app.layer(TraceLayer::new_for_http())
}
