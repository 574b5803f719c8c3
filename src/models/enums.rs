//! Shared domain enums (wire values match the original museum API)

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// TicketType
// ---------------------------------------------------------------------------

/// Ticket tariff category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "ticket_type", rename_all = "snake_case")]
pub enum TicketType {
    Standard,
    Guide,
    Groupe,
    Reduit,
    Enfant,
    Etudiant,
}

impl TicketType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketType::Standard => "standard",
            TicketType::Guide => "guide",
            TicketType::Groupe => "groupe",
            TicketType::Reduit => "reduit",
            TicketType::Enfant => "enfant",
            TicketType::Etudiant => "etudiant",
        }
    }
}

impl FromStr for TicketType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(TicketType::Standard),
            "guide" => Ok(TicketType::Guide),
            "groupe" => Ok(TicketType::Groupe),
            "reduit" => Ok(TicketType::Reduit),
            "enfant" => Ok(TicketType::Enfant),
            "etudiant" => Ok(TicketType::Etudiant),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TicketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TicketStatus
// ---------------------------------------------------------------------------

/// Ticket lifecycle state.
///
/// `valide → utilise` (QR redemption, one-way) and `valide → annule`
/// (explicit cancellation). No transition leaves `utilise` or `annule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
pub enum TicketStatus {
    Valide,
    Utilise,
    Annule,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Valide => "valide",
            TicketStatus::Utilise => "utilise",
            TicketStatus::Annule => "annule",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Order fulfilment state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
pub enum OrderStatus {
    EnAttente,
    Confirmee,
    EnPreparation,
    Expediee,
    Livree,
    Annulee,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::EnAttente => "en_attente",
            OrderStatus::Confirmee => "confirmee",
            OrderStatus::EnPreparation => "en_preparation",
            OrderStatus::Expediee => "expediee",
            OrderStatus::Livree => "livree",
            OrderStatus::Annulee => "annulee",
        }
    }

    /// An order may only be cancelled before preparation starts
    pub fn can_be_cancelled(&self) -> bool {
        matches!(self, OrderStatus::EnAttente | OrderStatus::Confirmee)
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_attente" => Ok(OrderStatus::EnAttente),
            "confirmee" => Ok(OrderStatus::Confirmee),
            "en_preparation" => Ok(OrderStatus::EnPreparation),
            "expediee" => Ok(OrderStatus::Expediee),
            "livree" => Ok(OrderStatus::Livree),
            "annulee" => Ok(OrderStatus::Annulee),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Payment state, tracked independently from the order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
pub enum PaymentStatus {
    EnAttente,
    Paye,
    Echec,
    Rembourse,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::EnAttente => "en_attente",
            PaymentStatus::Paye => "paye",
            PaymentStatus::Echec => "echec",
            PaymentStatus::Rembourse => "rembourse",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en_attente" => Ok(PaymentStatus::EnAttente),
            "paye" => Ok(PaymentStatus::Paye),
            "echec" => Ok(PaymentStatus::Echec),
            "rembourse" => Ok(PaymentStatus::Rembourse),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PaymentMethod
// ---------------------------------------------------------------------------

/// How the visitor pays: at the museum desk, or through the external gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    SurPlace,
    Stripe,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::SurPlace => "sur_place",
            PaymentMethod::Stripe => "stripe",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sur_place" => Ok(PaymentMethod::SurPlace),
            "stripe" => Ok(PaymentMethod::Stripe),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_type_round_trips_wire_values() {
        for value in ["standard", "guide", "groupe", "reduit", "enfant", "etudiant"] {
            let parsed: TicketType = value.parse().unwrap();
            assert_eq!(parsed.as_str(), value);
        }
        assert!("adulte".parse::<TicketType>().is_err());
    }

    #[test]
    fn order_cancellability_follows_status() {
        assert!(OrderStatus::EnAttente.can_be_cancelled());
        assert!(OrderStatus::Confirmee.can_be_cancelled());
        assert!(!OrderStatus::EnPreparation.can_be_cancelled());
        assert!(!OrderStatus::Expediee.can_be_cancelled());
        assert!(!OrderStatus::Livree.can_be_cancelled());
        assert!(!OrderStatus::Annulee.can_be_cancelled());
    }

    #[test]
    fn enums_serialize_to_french_wire_values() {
        assert_eq!(
            serde_json::to_value(OrderStatus::EnPreparation).unwrap(),
            serde_json::json!("en_preparation")
        );
        assert_eq!(
            serde_json::to_value(PaymentMethod::SurPlace).unwrap(),
            serde_json::json!("sur_place")
        );
        assert_eq!(
            serde_json::to_value(TicketStatus::Utilise).unwrap(),
            serde_json::json!("utilise")
        );
    }
}
