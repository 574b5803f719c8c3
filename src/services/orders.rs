//! Order / checkout service

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::enums::{OrderStatus, PaymentMethod, PaymentStatus},
    models::order::{billing_payload, compute_total, CreateOrder, Order, UpdateOrderStatus},
    repository::{orders::NewOrder, Repository},
    services::email::EmailService,
};

#[derive(Clone)]
pub struct OrdersService {
    repository: Repository,
    email: EmailService,
}

impl OrdersService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    /// Create an order from a cart.
    ///
    /// The visitor must already exist. On sur_place payment with a billing
    /// email, a confirmation email goes out best-effort: a send failure is
    /// logged and never fails the checkout.
    pub async fn create(&self, request: &CreateOrder) -> AppResult<Order> {
        let (uuid, methode_paiement) = validate_create(request)?;

        let visitor = self.repository.visitors.get_by_uuid(uuid).await?;

        let montant_total = compute_total(&request.items);
        let donnees_facturation =
            billing_payload(&request.visiteur_uuid, request.visitor.as_ref());
        let notes = serde_json::to_string(&request.items)
            .map_err(|e| AppError::Internal(format!("Failed to serialize line items: {}", e)))?;

        let order = self
            .repository
            .orders
            .create(&NewOrder {
                visiteur_id: visitor.id,
                montant_total,
                methode_paiement,
                donnees_facturation,
                notes,
            })
            .await?;

        let email = order
            .donnees_facturation
            .get("email")
            .and_then(|v| v.as_str());
        if methode_paiement == PaymentMethod::SurPlace {
            if let Some(to) = email {
                match self.email.send_order_confirmation(to, &order).await {
                    Ok(()) => {
                        self.repository.orders.mark_confirmation_sent(order.id).await?;
                    }
                    Err(e) => {
                        tracing::warn!(
                            numero_commande = %order.numero_commande,
                            "Confirmation email failed: {}",
                            e
                        );
                    }
                }
            }
        }

        Ok(order)
    }

    /// Get an order by ID
    pub async fn get(&self, id: i64) -> AppResult<Order> {
        self.repository.orders.get_by_id(id).await
    }

    /// List a visitor's orders, newest first
    pub async fn list_by_visitor(&self, uuid: &str) -> AppResult<Vec<Order>> {
        self.repository.orders.list_by_visitor_uuid(uuid).await
    }

    /// Update order and/or payment status independently.
    ///
    /// No cross-field check ties the two states together; the back office
    /// owns that consistency.
    pub async fn update_status(&self, id: i64, request: &UpdateOrderStatus) -> AppResult<Order> {
        let mut errors = FieldErrors::new();

        let statut = match request.statut.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<OrderStatus>() {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.add("statut", "Statut de commande invalide.");
                    None
                }
            },
        };
        let statut_paiement = match request
            .statut_paiement
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            None => None,
            Some(raw) => match raw.parse::<PaymentStatus>() {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.add("statut_paiement", "Statut de paiement invalide.");
                    None
                }
            },
        };
        errors.into_result()?;

        self.repository
            .orders
            .update_status(id, statut, statut_paiement)
            .await
    }

    /// Cancel an order while it is still cancellable.
    ///
    /// Forces the payment status to echec, except when the payment already
    /// went through: a real payment is never silently marked failed.
    pub async fn cancel(&self, id: i64) -> AppResult<Order> {
        let order = self.repository.orders.get_by_id(id).await?;

        if !order.statut.can_be_cancelled() {
            return Err(AppError::Conflict {
                message: "La commande ne peut pas être annulée".to_string(),
                statut: Some(order.statut.to_string()),
            });
        }

        self.repository
            .orders
            .update_status(
                id,
                Some(OrderStatus::Annulee),
                cancellation_payment_status(order.statut_paiement),
            )
            .await
    }
}

/// Payment status to force on cancellation: a settled payment is preserved,
/// anything else is marked failed
fn cancellation_payment_status(current: PaymentStatus) -> Option<PaymentStatus> {
    if current == PaymentStatus::Paye {
        None
    } else {
        Some(PaymentStatus::Echec)
    }
}

/// Field-level validation of an order creation request
fn validate_create(request: &CreateOrder) -> AppResult<(Uuid, PaymentMethod)> {
    let mut errors = FieldErrors::new();

    let uuid = match Uuid::parse_str(&request.visiteur_uuid) {
        Ok(uuid) => Some(uuid),
        Err(_) => {
            errors.add("visiteur_uuid", "UUID visiteur invalide.");
            None
        }
    };

    if request.items.is_empty() {
        errors.add("items", "Au moins un article est requis.");
    }
    for (i, item) in request.items.iter().enumerate() {
        if item.quantite < 1 {
            errors.add(
                format!("items.{}.quantite", i),
                "La quantité doit être au moins 1.",
            );
        }
        if item.prix_unitaire < Decimal::ZERO {
            errors.add(
                format!("items.{}.prix_unitaire", i),
                "Le prix unitaire doit être supérieur ou égal à 0.",
            );
        }
    }

    let methode = match request.methode_paiement.parse::<PaymentMethod>() {
        Ok(m) => Some(m),
        Err(_) => {
            errors.add(
                "methode_paiement",
                "Méthode de paiement invalide (sur_place, stripe).",
            );
            None
        }
    };

    match (uuid, methode, errors.is_empty()) {
        (Some(uuid), Some(methode), true) => Ok((uuid, methode)),
        _ => Err(AppError::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::OrderLineItem;
    use rust_decimal_macros::dec;

    fn request() -> CreateOrder {
        CreateOrder {
            visiteur_uuid: "0191d6a8-5a88-7bbd-9d1e-6c9a3f6b2e10".to_string(),
            items: vec![OrderLineItem {
                type_: "adulte".to_string(),
                quantite: 2,
                prix_unitaire: dec!(5000),
            }],
            methode_paiement: "sur_place".to_string(),
            visitor: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        let (_, methode) = validate_create(&request()).unwrap();
        assert_eq!(methode, PaymentMethod::SurPlace);
    }

    #[test]
    fn empty_cart_is_rejected() {
        let mut req = request();
        req.items.clear();
        match validate_create(&req) {
            Err(AppError::Validation(errors)) => assert!(errors.0.contains_key("items")),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn bad_line_items_are_reported_by_index() {
        let mut req = request();
        req.items.push(OrderLineItem {
            type_: "enfant".to_string(),
            quantite: 0,
            prix_unitaire: dec!(-10),
        });
        match validate_create(&req) {
            Err(AppError::Validation(errors)) => {
                assert!(errors.0.contains_key("items.1.quantite"));
                assert!(errors.0.contains_key("items.1.prix_unitaire"));
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn cancellation_marks_payment_failed_unless_settled() {
        assert_eq!(
            cancellation_payment_status(PaymentStatus::EnAttente),
            Some(PaymentStatus::Echec)
        );
        assert_eq!(
            cancellation_payment_status(PaymentStatus::Echec),
            Some(PaymentStatus::Echec)
        );
        assert_eq!(
            cancellation_payment_status(PaymentStatus::Rembourse),
            Some(PaymentStatus::Echec)
        );
        // A real payment is never silently marked failed
        assert_eq!(cancellation_payment_status(PaymentStatus::Paye), None);
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        let mut req = request();
        req.methode_paiement = "paypal".to_string();
        match validate_create(&req) {
            Err(AppError::Validation(errors)) => {
                assert!(errors.0.contains_key("methode_paiement"))
            }
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }
}
