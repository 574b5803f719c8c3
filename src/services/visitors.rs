//! Visitor profile service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::visitor::{
        add_favorite, push_history, remove_favorite, CreateVisitor, UpdateVisitor, Visitor,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
}

impl VisitorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Look up a visitor by UUID, creating the profile on first contact.
    ///
    /// Returns `(visitor, created)`; `created` distinguishes 201 from 200.
    pub async fn lookup_or_create(&self, request: &CreateVisitor) -> AppResult<(Visitor, bool)> {
        let uuid = match request.uuid.as_deref().filter(|u| !u.is_empty()) {
            Some(raw) => parse_uuid(raw)?,
            None => Uuid::new_v4(),
        };

        if let Some(existing) = self.repository.visitors.find_by_uuid(uuid).await? {
            return Ok((existing, false));
        }

        let langue = request.langue.as_deref().unwrap_or("fr");
        let preferences = request
            .preferences
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));

        let visitor = self
            .repository
            .visitors
            .create(uuid, langue, &preferences)
            .await?;
        Ok((visitor, true))
    }

    /// Get a visitor by UUID
    pub async fn get(&self, uuid: &str) -> AppResult<Visitor> {
        let uuid = parse_uuid(uuid)?;
        self.repository.visitors.get_by_uuid(uuid).await
    }

    /// Partial profile update
    pub async fn update(&self, uuid: &str, request: &UpdateVisitor) -> AppResult<Visitor> {
        let uuid = parse_uuid(uuid)?;
        self.repository
            .visitors
            .update(
                uuid,
                request.langue_preferee.as_deref(),
                request.oeuvres_favorites.as_deref(),
                request.historique_consultation.as_deref(),
                request.preferences.as_ref(),
                request.derniere_visite,
            )
            .await
    }

    /// Add an artwork to favorites; adding twice is a no-op
    pub async fn add_favorite(&self, uuid: &str, oeuvre_id: i64) -> AppResult<Visitor> {
        let uuid = parse_uuid(uuid)?;
        let visitor = self.repository.visitors.get_by_uuid(uuid).await?;

        let favorites = add_favorite(visitor.oeuvres_favorites.0, oeuvre_id);
        self.repository.visitors.set_favorites(uuid, &favorites).await
    }

    /// Remove an artwork from favorites
    pub async fn remove_favorite(&self, uuid: &str, oeuvre_id: i64) -> AppResult<Visitor> {
        let uuid = parse_uuid(uuid)?;
        let visitor = self.repository.visitors.get_by_uuid(uuid).await?;

        let favorites = remove_favorite(visitor.oeuvres_favorites.0, oeuvre_id);
        self.repository.visitors.set_favorites(uuid, &favorites).await
    }

    /// Record an artwork consultation: front of the history, deduplicated,
    /// capped, and stamps derniere_visite
    pub async fn add_to_history(&self, uuid: &str, oeuvre_id: i64) -> AppResult<Visitor> {
        let uuid = parse_uuid(uuid)?;
        let visitor = self.repository.visitors.get_by_uuid(uuid).await?;

        let history = push_history(visitor.historique_consultation.0, oeuvre_id);
        self.repository.visitors.set_history(uuid, &history).await
    }
}

fn parse_uuid(uuid: &str) -> AppResult<Uuid> {
    Uuid::parse_str(uuid)
        .map_err(|_| AppError::Validation(FieldErrors::one("uuid", "UUID visiteur invalide.")))
}
