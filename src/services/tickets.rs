//! Ticket lifecycle service

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::enums::{TicketStatus, TicketType},
    models::ticket::{CreateTicket, NewTicket, Ticket},
    repository::Repository,
};

#[derive(Clone)]
pub struct TicketsService {
    repository: Repository,
}

impl TicketsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a ticket after validating the request fields
    pub async fn create(&self, request: &CreateTicket) -> AppResult<Ticket> {
        let ticket = validate_create(request, Utc::now().date_naive())?;
        self.repository.tickets.create(&ticket).await
    }

    /// List a visitor's tickets, newest first
    pub async fn list_by_visitor(&self, uuid: &str) -> AppResult<Vec<Ticket>> {
        let uuid = parse_visitor_uuid(uuid)?;
        self.repository.tickets.list_by_visitor(uuid).await
    }

    /// Redeem a ticket by its scan code.
    ///
    /// The transition is one-way: only a valide ticket can become utilise.
    /// Any other state answers 409 carrying the current status, so scanning
    /// the same code twice yields success then a conflict.
    pub async fn validate_qr_code(&self, qr_code: &str) -> AppResult<Ticket> {
        let ticket = self
            .repository
            .tickets
            .get_by_qr_code(qr_code)
            .await?
            .ok_or_else(|| AppError::NotFound("Billet introuvable".to_string()))?;

        if ticket.statut != TicketStatus::Valide {
            return Err(AppError::Conflict {
                message: "Billet non valide".to_string(),
                statut: Some(ticket.statut.to_string()),
            });
        }

        self.repository
            .tickets
            .set_status(ticket.id, TicketStatus::Utilise)
            .await
    }

    /// Cancel a ticket; a used ticket can no longer be cancelled
    pub async fn cancel(&self, id: i64) -> AppResult<Ticket> {
        let ticket = self.repository.tickets.get_by_id(id).await?;

        if ticket.statut == TicketStatus::Utilise {
            return Err(AppError::conflict("Impossible d'annuler un billet utilisé"));
        }

        self.repository
            .tickets
            .set_status(ticket.id, TicketStatus::Annule)
            .await
    }
}

fn parse_visitor_uuid(uuid: &str) -> AppResult<Uuid> {
    Uuid::parse_str(uuid).map_err(|_| {
        AppError::Validation(FieldErrors::one("visiteur_uuid", "UUID visiteur invalide."))
    })
}

/// Field-level validation of a ticket creation request
fn validate_create(request: &CreateTicket, today: NaiveDate) -> AppResult<NewTicket> {
    let mut errors = FieldErrors::new();

    let visiteur_uuid = match Uuid::parse_str(&request.visiteur_uuid) {
        Ok(uuid) => Some(uuid),
        Err(_) => {
            errors.add("visiteur_uuid", "UUID visiteur invalide.");
            None
        }
    };

    let type_ = match request.type_.parse::<TicketType>() {
        Ok(t) => Some(t),
        Err(_) => {
            errors.add(
                "type",
                "Type de billet invalide (standard, guide, groupe, reduit, enfant, etudiant).",
            );
            None
        }
    };

    if request.prix < Decimal::ZERO {
        errors.add("prix", "Le prix doit être supérieur ou égal à 0.");
    }

    let date_visite = match request.date_visite.as_deref().filter(|d| !d.is_empty()) {
        None => None,
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) if date < today => {
                errors.add("date_visite", "La date de visite doit être aujourd'hui ou après.");
                None
            }
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("date_visite", "Format de date invalide (YYYY-MM-DD).");
                None
            }
        },
    };

    match (visiteur_uuid, type_, errors.is_empty()) {
        (Some(visiteur_uuid), Some(type_), true) => Ok(NewTicket {
            visiteur_uuid,
            type_,
            prix: request.prix,
            date_visite,
            heure_visite: request.heure_visite.clone(),
        }),
        _ => Err(AppError::Validation(errors)),
    }
}
