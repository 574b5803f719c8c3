//! Visitors repository for database operations

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::visitor::Visitor,
};

#[derive(Clone)]
pub struct VisitorsRepository {
    pool: Pool<Postgres>,
}

impl VisitorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get visitor by UUID
    pub async fn get_by_uuid(&self, uuid: Uuid) -> AppResult<Visitor> {
        self.find_by_uuid(uuid)
            .await?
            .ok_or_else(|| AppError::NotFound("Visiteur introuvable".to_string()))
    }

    /// Find visitor by UUID, None when absent
    pub async fn find_by_uuid(&self, uuid: Uuid) -> AppResult<Option<Visitor>> {
        let visitor = sqlx::query_as::<_, Visitor>("SELECT * FROM visiteurs WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(visitor)
    }

    /// Create a visitor profile
    pub async fn create(
        &self,
        uuid: Uuid,
        langue: &str,
        preferences: &serde_json::Value,
    ) -> AppResult<Visitor> {
        let row = sqlx::query_as::<_, Visitor>(
            r#"
            INSERT INTO visiteurs (uuid, langue_preferee, oeuvres_favorites, historique_consultation, preferences)
            VALUES ($1, $2, '[]'::jsonb, '[]'::jsonb, $3)
            RETURNING *
            "#,
        )
        .bind(uuid)
        .bind(langue)
        .bind(preferences)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Partial update of profile fields; absent fields keep their value
    pub async fn update(
        &self,
        uuid: Uuid,
        langue_preferee: Option<&str>,
        oeuvres_favorites: Option<&[i64]>,
        historique_consultation: Option<&[i64]>,
        preferences: Option<&serde_json::Value>,
        derniere_visite: Option<DateTime<Utc>>,
    ) -> AppResult<Visitor> {
        sqlx::query_as::<_, Visitor>(
            r#"
            UPDATE visiteurs
            SET langue_preferee = COALESCE($1, langue_preferee),
                oeuvres_favorites = COALESCE($2, oeuvres_favorites),
                historique_consultation = COALESCE($3, historique_consultation),
                preferences = COALESCE($4, preferences),
                derniere_visite = COALESCE($5, derniere_visite),
                updated_at = NOW()
            WHERE uuid = $6
            RETURNING *
            "#,
        )
        .bind(langue_preferee)
        .bind(oeuvres_favorites.map(|f| Json(f.to_vec())))
        .bind(historique_consultation.map(|h| Json(h.to_vec())))
        .bind(preferences)
        .bind(derniere_visite)
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Visiteur introuvable".to_string()))
    }

    /// Replace the favorites list
    pub async fn set_favorites(&self, uuid: Uuid, favorites: &[i64]) -> AppResult<Visitor> {
        sqlx::query_as::<_, Visitor>(
            r#"
            UPDATE visiteurs
            SET oeuvres_favorites = $1, updated_at = NOW()
            WHERE uuid = $2
            RETURNING *
            "#,
        )
        .bind(Json(favorites.to_vec()))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Visiteur introuvable".to_string()))
    }

    /// Replace the consultation history and stamp the last visit
    pub async fn set_history(&self, uuid: Uuid, history: &[i64]) -> AppResult<Visitor> {
        sqlx::query_as::<_, Visitor>(
            r#"
            UPDATE visiteurs
            SET historique_consultation = $1, derniere_visite = NOW(), updated_at = NOW()
            WHERE uuid = $2
            RETURNING *
            "#,
        )
        .bind(Json(history.to_vec()))
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Visiteur introuvable".to_string()))
    }
}
