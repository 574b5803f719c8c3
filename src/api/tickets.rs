//! Ticketing endpoints: availability, purchase, QR validation, cancellation

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::ticket::{AvailabilityQuery, CreateTicket, SlotAvailability, Ticket},
};

/// Availability response: one entry per configured slot
#[derive(Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub data: Vec<SlotAvailability>,
}

/// Single-ticket response
#[derive(Serialize, ToSchema)]
pub struct TicketResponse {
    pub data: Ticket,
}

/// Ticket list response
#[derive(Serialize, ToSchema)]
pub struct TicketListResponse {
    pub data: Vec<Ticket>,
}

/// Ticket mutation response with a human message
#[derive(Serialize, ToSchema)]
pub struct TicketMessageResponse {
    pub message: String,
    pub data: Ticket,
}

/// Remaining capacity per slot for a date and ticket type
#[utoipa::path(
    get,
    path = "/billets/disponibilites",
    tag = "billets",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Per-slot availability", body = AvailabilityResponse),
        (status = 422, description = "Missing or malformed date", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn availability(
    State(state): State<crate::AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let type_ = query.type_.as_deref().unwrap_or("standard");
    let slots = state
        .services
        .availability
        .availability(query.date.as_deref(), type_)
        .await?;
    Ok(Json(AvailabilityResponse { data: slots }))
}

/// Purchase a ticket
#[utoipa::path(
    post,
    path = "/billets",
    tag = "billets",
    request_body = CreateTicket,
    responses(
        (status = 201, description = "Ticket created", body = TicketResponse),
        (status = 422, description = "Invalid fields", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn create_ticket(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateTicket>,
) -> AppResult<(StatusCode, Json<TicketResponse>)> {
    let ticket = state.services.tickets.create(&request).await?;
    Ok((StatusCode::CREATED, Json(TicketResponse { data: ticket })))
}

/// List a visitor's tickets, newest first
#[utoipa::path(
    get,
    path = "/billets/visiteur/{uuid}",
    tag = "billets",
    params(("uuid" = String, Path, description = "Visitor UUID")),
    responses(
        (status = 200, description = "Visitor's tickets", body = TicketListResponse)
    )
)]
pub async fn tickets_by_visitor(
    State(state): State<crate::AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<TicketListResponse>> {
    let tickets = state.services.tickets.list_by_visitor(&uuid).await?;
    Ok(Json(TicketListResponse { data: tickets }))
}

/// Redeem a ticket by scan code
#[utoipa::path(
    post,
    path = "/billets/validate/{qr_code}",
    tag = "billets",
    params(("qr_code" = String, Path, description = "Scan code from the QR")),
    responses(
        (status = 200, description = "Ticket redeemed", body = TicketMessageResponse),
        (status = 404, description = "Unknown scan code", body = crate::error::ErrorResponse),
        (status = 409, description = "Ticket not redeemable; payload carries its current statut", body = crate::error::ErrorResponse)
    )
)]
pub async fn validate_qr_code(
    State(state): State<crate::AppState>,
    Path(qr_code): Path<String>,
) -> AppResult<Json<TicketMessageResponse>> {
    let ticket = state.services.tickets.validate_qr_code(&qr_code).await?;
    Ok(Json(TicketMessageResponse {
        message: "QR Code validé".to_string(),
        data: ticket,
    }))
}

/// Cancel a ticket
#[utoipa::path(
    put,
    path = "/billets/{id}/cancel",
    tag = "billets",
    params(("id" = i64, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket cancelled", body = TicketMessageResponse),
        (status = 404, description = "Ticket not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Used tickets cannot be cancelled", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_ticket(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TicketMessageResponse>> {
    let ticket = state.services.tickets.cancel(id).await?;
    Ok(Json(TicketMessageResponse {
        message: "Billet annulé".to_string(),
        data: ticket,
    }))
}
