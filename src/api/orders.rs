//! Order endpoints: checkout, status updates, cancellation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::order::{CreateOrder, Order, UpdateOrderStatus},
};

/// Single-order response
#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub data: Order,
}

/// Order list response
#[derive(Serialize, ToSchema)]
pub struct OrderListResponse {
    pub data: Vec<Order>,
}

/// Order mutation response with a human message
#[derive(Serialize, ToSchema)]
pub struct OrderMessageResponse {
    pub message: String,
    pub data: Order,
}

/// Create an order from a cart
#[utoipa::path(
    post,
    path = "/commandes",
    tag = "commandes",
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid fields", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn create_order(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let order = state.services.orders.create(&request).await?;
    Ok((StatusCode::CREATED, Json(OrderResponse { data: order })))
}

/// Get an order by ID
#[utoipa::path(
    get,
    path = "/commandes/{id}",
    tag = "commandes",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order details", body = OrderResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_order(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderResponse>> {
    let order = state.services.orders.get(id).await?;
    Ok(Json(OrderResponse { data: order }))
}

/// List a visitor's orders, newest first
#[utoipa::path(
    get,
    path = "/commandes/visiteur/{uuid}",
    tag = "commandes",
    params(("uuid" = String, Path, description = "Visitor UUID")),
    responses(
        (status = 200, description = "Visitor's orders", body = OrderListResponse)
    )
)]
pub async fn orders_by_visitor(
    State(state): State<crate::AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<OrderListResponse>> {
    let orders = state.services.orders.list_by_visitor(&uuid).await?;
    Ok(Json(OrderListResponse { data: orders }))
}

/// Update order and/or payment status; each field applies independently
#[utoipa::path(
    put,
    path = "/commandes/{id}/status",
    tag = "commandes",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = UpdateOrderStatus,
    responses(
        (status = 200, description = "Status updated", body = OrderMessageResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Unknown status value", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn update_order_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateOrderStatus>,
) -> AppResult<Json<OrderMessageResponse>> {
    let order = state.services.orders.update_status(id, &request).await?;
    Ok(Json(OrderMessageResponse {
        message: "Statut mis à jour".to_string(),
        data: order,
    }))
}

/// Cancel an order while it is still cancellable
#[utoipa::path(
    put,
    path = "/commandes/{id}/cancel",
    tag = "commandes",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order cancelled", body = OrderMessageResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Order no longer cancellable", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_order(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderMessageResponse>> {
    let order = state.services.orders.cancel(id).await?;
    Ok(Json(OrderMessageResponse {
        message: "Commande annulée".to_string(),
        data: order,
    }))
}
