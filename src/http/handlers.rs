use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::dto::{
    CreateOrderBody, LegacyCreateOrderBody, LegacyVerifiedBody, LegacyVerifyPaymentBody,
    VerifiedBody, VerifyPaymentBody,
};
use super::error::{OrderApiError, VerifyApiError};
use super::AppState;
use crate::domain::ProductSummary;
use crate::gateway::GatewayOrder;

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<ProductSummary>> {
    Json(state.checkout.list_products())
}

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderBody>, JsonRejection>,
) -> Result<Json<GatewayOrder>, OrderApiError> {
    let Json(body) = payload?;
    let order = state.checkout.create_order(body.into()).await?;
    Ok(Json(order))
}

pub async fn verify_payment(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPaymentBody>, JsonRejection>,
) -> Result<Json<VerifiedBody>, VerifyApiError> {
    let Json(body) = payload?;
    let confirmation = state.checkout.verify_payment(body.into()).await?;
    Ok(Json(confirmation.into()))
}

pub async fn legacy_create_order(
    State(state): State<AppState>,
    payload: Result<Json<LegacyCreateOrderBody>, JsonRejection>,
) -> Result<Json<GatewayOrder>, OrderApiError> {
    let Json(body) = payload?;
    let order = state.checkout.create_order(body.into()).await?;
    Ok(Json(order))
}

pub async fn legacy_verify_payment(
    State(state): State<AppState>,
    payload: Result<Json<LegacyVerifyPaymentBody>, JsonRejection>,
) -> Result<Json<LegacyVerifiedBody>, VerifyApiError> {
    let Json(body) = payload?;
    let confirmation = state.checkout.verify_payment(body.into()).await?;
    Ok(Json(confirmation.into()))
}
