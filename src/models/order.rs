//! Order (commande) model and request types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{OrderStatus, PaymentMethod, PaymentStatus};

/// Order record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    pub visiteur_id: i64,
    /// Human-readable unique identifier, format CMD-<year>-<4 digits>
    pub numero_commande: String,
    pub statut: OrderStatus,
    #[schema(value_type = f64)]
    pub montant_total: Decimal,
    #[schema(value_type = f64)]
    pub montant_tva: Decimal,
    #[schema(value_type = f64)]
    pub montant_remise: Decimal,
    pub methode_paiement: PaymentMethod,
    pub statut_paiement: PaymentStatus,
    /// Sparse billing contact map (absent fields are omitted, never null)
    #[schema(value_type = Object)]
    pub donnees_facturation: serde_json::Value,
    #[schema(value_type = Object)]
    pub donnees_livraison: serde_json::Value,
    /// Raw line items, serialized at checkout for audit purposes
    pub notes: Option<String>,
    pub date_livraison: Option<DateTime<Utc>>,
    pub tracking_number: Option<String>,
    pub email_confirmation: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One cart line item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineItem {
    #[serde(rename = "type")]
    pub type_: String,
    pub quantite: i64,
    #[schema(value_type = f64)]
    pub prix_unitaire: Decimal,
}

/// Optional billing contact supplied at checkout
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BillingContact {
    pub prenom: Option<String>,
    pub nom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
}

/// Create order request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrder {
    pub visiteur_uuid: String,
    pub items: Vec<OrderLineItem>,
    pub methode_paiement: String,
    /// Billing contact, persisted sparsely into donnees_facturation
    pub visitor: Option<BillingContact>,
}

/// Update order status request; each field applies independently
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatus {
    pub statut: Option<String>,
    pub statut_paiement: Option<String>,
}

/// Sum of line totals over the cart
pub fn compute_total(items: &[OrderLineItem]) -> Decimal {
    items
        .iter()
        .map(|it| it.prix_unitaire * Decimal::from(it.quantite))
        .sum()
}

/// Build the sparse billing map: uuid plus any non-empty contact fields
pub fn billing_payload(visiteur_uuid: &str, contact: Option<&BillingContact>) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(
        "visiteur_uuid".to_string(),
        serde_json::Value::String(visiteur_uuid.to_string()),
    );

    let fields = [
        ("prenom", contact.and_then(|c| c.prenom.as_deref())),
        ("nom", contact.and_then(|c| c.nom.as_deref())),
        ("email", contact.and_then(|c| c.email.as_deref())),
        ("telephone", contact.and_then(|c| c.telephone.as_deref())),
    ];
    for (key, value) in fields {
        if let Some(v) = value {
            if !v.is_empty() {
                map.insert(key.to_string(), serde_json::Value::String(v.to_string()));
            }
        }
    }

    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_is_sum_of_line_totals() {
        let items = vec![OrderLineItem {
            type_: "adulte".to_string(),
            quantite: 2,
            prix_unitaire: dec!(5000),
        }];
        assert_eq!(compute_total(&items), dec!(10000));
    }

    #[test]
    fn total_over_mixed_cart() {
        let items = vec![
            OrderLineItem {
                type_: "standard".to_string(),
                quantite: 3,
                prix_unitaire: dec!(5000),
            },
            OrderLineItem {
                type_: "enfant".to_string(),
                quantite: 2,
                prix_unitaire: dec!(2000),
            },
        ];
        assert_eq!(compute_total(&items), dec!(19000));
    }

    #[test]
    fn billing_payload_omits_empty_fields() {
        let contact = BillingContact {
            prenom: Some("Awa".to_string()),
            nom: Some("".to_string()),
            email: None,
            telephone: Some("+221770000000".to_string()),
        };
        let payload = billing_payload("abc-123", Some(&contact));
        let map = payload.as_object().unwrap();

        assert_eq!(map["visiteur_uuid"], "abc-123");
        assert_eq!(map["prenom"], "Awa");
        assert_eq!(map["telephone"], "+221770000000");
        assert!(!map.contains_key("nom"));
        assert!(!map.contains_key("email"));
    }

    #[test]
    fn billing_payload_without_contact_keeps_uuid_only() {
        let payload = billing_payload("abc-123", None);
        let map = payload.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["visiteur_uuid"], "abc-123");
    }
}
