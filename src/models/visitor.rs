//! Visitor (visiteur) profile model and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Most entries kept in the consultation history
pub const HISTORY_LIMIT: usize = 50;

/// Visitor profile, created lazily on first client contact
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Visitor {
    pub id: i64,
    /// Client-generated UUID, the primary lookup key
    pub uuid: Uuid,
    pub langue_preferee: String,
    /// Favorite artwork ids, insertion-ordered, no duplicates
    #[schema(value_type = Vec<i64>)]
    pub oeuvres_favorites: Json<Vec<i64>>,
    /// Consulted artwork ids, most-recent-first, capped at 50
    #[schema(value_type = Vec<i64>)]
    pub historique_consultation: Json<Vec<i64>>,
    #[schema(value_type = Object)]
    pub preferences: serde_json::Value,
    pub derniere_visite: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create (or look up) visitor request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVisitor {
    /// Client-generated UUID; one is generated server-side when absent
    pub uuid: Option<String>,
    pub langue: Option<String>,
    #[schema(value_type = Object)]
    pub preferences: Option<serde_json::Value>,
}

/// Partial visitor update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVisitor {
    pub langue_preferee: Option<String>,
    pub oeuvres_favorites: Option<Vec<i64>>,
    pub historique_consultation: Option<Vec<i64>>,
    #[schema(value_type = Object)]
    pub preferences: Option<serde_json::Value>,
    pub derniere_visite: Option<DateTime<Utc>>,
}

/// Favorite / history mutation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ArtworkRef {
    pub oeuvre_id: i64,
}

/// Append to favorites unless already present; order is preserved
pub fn add_favorite(mut favorites: Vec<i64>, oeuvre_id: i64) -> Vec<i64> {
    if !favorites.contains(&oeuvre_id) {
        favorites.push(oeuvre_id);
    }
    favorites
}

/// Remove an artwork from favorites, keeping the remaining order
pub fn remove_favorite(favorites: Vec<i64>, oeuvre_id: i64) -> Vec<i64> {
    favorites.into_iter().filter(|id| *id != oeuvre_id).collect()
}

/// Push an artwork to the front of the history.
///
/// A reinserted id moves to the front instead of duplicating, and the list
/// never grows past [`HISTORY_LIMIT`].
pub fn push_history(history: Vec<i64>, oeuvre_id: i64) -> Vec<i64> {
    let mut updated: Vec<i64> = Vec::with_capacity(history.len() + 1);
    updated.push(oeuvre_id);
    updated.extend(history.into_iter().filter(|id| *id != oeuvre_id));
    updated.truncate(HISTORY_LIMIT);
    updated
}
