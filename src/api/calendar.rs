//! Calendar endpoints (month view, closures, events)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::calendar::{
        CalendarClosure, CalendarEvent, CreateClosure, CreateEvent, MonthQuery, MonthView,
    },
};

/// Month view response
#[derive(Serialize, ToSchema)]
pub struct MonthResponse {
    pub data: MonthView,
}

/// Closure response
#[derive(Serialize, ToSchema)]
pub struct ClosureResponse {
    pub data: CalendarClosure,
}

/// Event response
#[derive(Serialize, ToSchema)]
pub struct EventResponse {
    pub data: CalendarEvent,
}

/// Closures and events within a month
#[utoipa::path(
    get,
    path = "/calendrier",
    tag = "calendrier",
    params(MonthQuery),
    responses(
        (status = 200, description = "Month view", body = MonthResponse),
        (status = 422, description = "Missing or malformed month", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn month(
    State(state): State<crate::AppState>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<MonthResponse>> {
    let view = state.services.calendar.month(query.month.as_deref()).await?;
    Ok(Json(MonthResponse { data: view }))
}

/// Declare a closure day
#[utoipa::path(
    post,
    path = "/calendrier/closures",
    tag = "calendrier",
    request_body = CreateClosure,
    responses(
        (status = 201, description = "Closure created", body = ClosureResponse),
        (status = 422, description = "Invalid fields", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn create_closure(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateClosure>,
) -> AppResult<(StatusCode, Json<ClosureResponse>)> {
    let closure = state.services.calendar.create_closure(&request).await?;
    Ok((StatusCode::CREATED, Json(ClosureResponse { data: closure })))
}

/// Delete a closure
#[utoipa::path(
    delete,
    path = "/calendrier/closures/{id}",
    tag = "calendrier",
    params(("id" = i64, Path, description = "Closure ID")),
    responses(
        (status = 204, description = "Closure deleted"),
        (status = 404, description = "Closure not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_closure(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.calendar.delete_closure(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Declare a capacity event
#[utoipa::path(
    post,
    path = "/calendrier/evenements",
    tag = "calendrier",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 422, description = "Invalid fields", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn create_event(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    let event = state.services.calendar.create_event(&request).await?;
    Ok((StatusCode::CREATED, Json(EventResponse { data: event })))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/calendrier/evenements/{id}",
    tag = "calendrier",
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 404, description = "Event not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_event(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.calendar.delete_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
