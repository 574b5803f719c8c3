//! Visitor profile endpoints (preferences, favorites, history)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::visitor::{ArtworkRef, CreateVisitor, UpdateVisitor, Visitor},
};

/// Single-visitor response
#[derive(Serialize, ToSchema)]
pub struct VisitorResponse {
    pub data: Visitor,
}

/// Visitor mutation response with a human message
#[derive(Serialize, ToSchema)]
pub struct VisitorMessageResponse {
    pub message: String,
    pub data: Visitor,
}

/// Look up or create a visitor profile.
///
/// An existing UUID answers 200 with the stored profile; otherwise 201.
#[utoipa::path(
    post,
    path = "/visiteurs",
    tag = "visiteurs",
    request_body = CreateVisitor,
    responses(
        (status = 200, description = "Existing profile returned", body = VisitorResponse),
        (status = 201, description = "Profile created", body = VisitorResponse),
        (status = 422, description = "Invalid UUID", body = crate::error::ValidationErrorResponse)
    )
)]
pub async fn create_visitor(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateVisitor>,
) -> AppResult<(StatusCode, Json<VisitorResponse>)> {
    let (visitor, created) = state.services.visitors.lookup_or_create(&request).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(VisitorResponse { data: visitor })))
}

/// Get a visitor profile by UUID
#[utoipa::path(
    get,
    path = "/visiteurs/{uuid}",
    tag = "visiteurs",
    params(("uuid" = String, Path, description = "Visitor UUID")),
    responses(
        (status = 200, description = "Visitor profile", body = VisitorResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_visitor(
    State(state): State<crate::AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<VisitorResponse>> {
    let visitor = state.services.visitors.get(&uuid).await?;
    Ok(Json(VisitorResponse { data: visitor }))
}

/// Partial profile update
#[utoipa::path(
    put,
    path = "/visiteurs/{uuid}",
    tag = "visiteurs",
    params(("uuid" = String, Path, description = "Visitor UUID")),
    request_body = UpdateVisitor,
    responses(
        (status = 200, description = "Profile updated", body = VisitorResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_visitor(
    State(state): State<crate::AppState>,
    Path(uuid): Path<String>,
    Json(request): Json<UpdateVisitor>,
) -> AppResult<Json<VisitorResponse>> {
    let visitor = state.services.visitors.update(&uuid, &request).await?;
    Ok(Json(VisitorResponse { data: visitor }))
}

/// Add an artwork to the visitor's favorites
#[utoipa::path(
    post,
    path = "/visiteurs/{uuid}/favorites",
    tag = "visiteurs",
    params(("uuid" = String, Path, description = "Visitor UUID")),
    request_body = ArtworkRef,
    responses(
        (status = 200, description = "Favorite added", body = VisitorMessageResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_favorite(
    State(state): State<crate::AppState>,
    Path(uuid): Path<String>,
    Json(request): Json<ArtworkRef>,
) -> AppResult<Json<VisitorMessageResponse>> {
    let visitor = state
        .services
        .visitors
        .add_favorite(&uuid, request.oeuvre_id)
        .await?;
    Ok(Json(VisitorMessageResponse {
        message: "Œuvre ajoutée aux favoris".to_string(),
        data: visitor,
    }))
}

/// Remove an artwork from the visitor's favorites
#[utoipa::path(
    delete,
    path = "/visiteurs/{uuid}/favorites/{oeuvre_id}",
    tag = "visiteurs",
    params(
        ("uuid" = String, Path, description = "Visitor UUID"),
        ("oeuvre_id" = i64, Path, description = "Artwork ID")
    ),
    responses(
        (status = 200, description = "Favorite removed", body = VisitorMessageResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn remove_favorite(
    State(state): State<crate::AppState>,
    Path((uuid, oeuvre_id)): Path<(String, i64)>,
) -> AppResult<Json<VisitorMessageResponse>> {
    let visitor = state
        .services
        .visitors
        .remove_favorite(&uuid, oeuvre_id)
        .await?;
    Ok(Json(VisitorMessageResponse {
        message: "Œuvre retirée des favoris".to_string(),
        data: visitor,
    }))
}

/// Record an artwork consultation in the visitor's history
#[utoipa::path(
    post,
    path = "/visiteurs/{uuid}/historique",
    tag = "visiteurs",
    params(("uuid" = String, Path, description = "Visitor UUID")),
    request_body = ArtworkRef,
    responses(
        (status = 200, description = "History updated", body = VisitorMessageResponse),
        (status = 404, description = "Visitor not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_to_history(
    State(state): State<crate::AppState>,
    Path(uuid): Path<String>,
    Json(request): Json<ArtworkRef>,
) -> AppResult<Json<VisitorMessageResponse>> {
    let visitor = state
        .services
        .visitors
        .add_to_history(&uuid, request.oeuvre_id)
        .await?;
    Ok(Json(VisitorMessageResponse {
        message: "Œuvre ajoutée à l'historique".to_string(),
        data: visitor,
    }))
}
