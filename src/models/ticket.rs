//! Ticket (billet) model and request types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::enums::{TicketStatus, TicketType};

/// Ticket record.
///
/// `visiteur_uuid` is an opaque reference, not a foreign key: tickets survive
/// visitor-profile churn on the kiosk side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Ticket {
    pub id: i64,
    pub visiteur_uuid: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub type_: TicketType,
    #[schema(value_type = f64)]
    pub prix: Decimal,
    /// Planned visit date, when the ticket is bound to a day
    pub date_visite: Option<NaiveDate>,
    /// Visit slot label (e.g. "09:00")
    pub heure_visite: Option<String>,
    /// Unique code embedded in the ticket's QR code, used as redemption key
    pub qr_code: String,
    pub statut: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create ticket request.
///
/// `type` and dates arrive as raw strings and are validated service-side so
/// the client gets field-level 422 messages instead of a body-level reject.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicket {
    pub visiteur_uuid: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[schema(value_type = f64)]
    pub prix: Decimal,
    /// Visit date (YYYY-MM-DD), today or later
    pub date_visite: Option<String>,
    /// Visit slot (HH:MM)
    pub heure_visite: Option<String>,
}

/// Validated ticket data, ready for insertion
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub visiteur_uuid: Uuid,
    pub type_: TicketType,
    pub prix: Decimal,
    pub date_visite: Option<NaiveDate>,
    pub heure_visite: Option<String>,
}

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AvailabilityQuery {
    /// Visit date (YYYY-MM-DD), required
    pub date: Option<String>,
    /// Ticket type (defaults to "standard"); unknown types yield empty slots
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

/// Remaining capacity for one visit slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SlotAvailability {
    /// Slot label (e.g. "09:00")
    pub heure: String,
    /// Effective capacity for the day (after event multipliers)
    pub capacite: i32,
    /// Seats still available
    pub restants: i32,
    pub complet: bool,
}
