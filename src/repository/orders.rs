//! Orders repository for database operations

use chrono::{Datelike, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::enums::{OrderStatus, PaymentMethod, PaymentStatus},
    models::order::Order,
};

/// Attempts before giving up on finding a collision-free order number.
///
/// The unique index on commandes.numero_commande is the actual correctness
/// guarantee; this loop is a best-effort pre-check.
const MAX_NUMBER_ATTEMPTS: usize = 10;

/// Order number candidate, format CMD-<year>-<4-digit-random>
pub fn random_order_number(year: i32) -> String {
    let n: u32 = rand::thread_rng().gen_range(1..=9999);
    format!("CMD-{}-{:04}", year, n)
}

/// Validated order data, ready for insertion
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub visiteur_id: i64,
    pub montant_total: Decimal,
    pub methode_paiement: PaymentMethod,
    pub donnees_facturation: serde_json::Value,
    /// Raw line items serialized for the audit trail
    pub notes: String,
}

#[derive(Clone)]
pub struct OrdersRepository {
    pool: Pool<Postgres>,
}

impl OrdersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get order by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Order> {
        sqlx::query_as::<_, Order>("SELECT * FROM commandes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Commande introuvable".to_string()))
    }

    /// List orders whose billing data references the visitor UUID, newest first
    pub async fn list_by_visitor_uuid(&self, uuid: &str) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM commandes
            WHERE donnees_facturation->>'visiteur_uuid' = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(uuid)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    /// Create an order with a collision-free order number
    pub async fn create(&self, order: &NewOrder) -> AppResult<Order> {
        let year = Utc::now().year();

        for _ in 0..MAX_NUMBER_ATTEMPTS {
            let numero = random_order_number(year);

            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM commandes WHERE numero_commande = $1)",
            )
            .bind(&numero)
            .fetch_one(&self.pool)
            .await?;
            if exists {
                continue;
            }

            let result = sqlx::query_as::<_, Order>(
                r#"
                INSERT INTO commandes (
                    visiteur_id, numero_commande, statut, montant_total,
                    montant_tva, montant_remise, methode_paiement, statut_paiement,
                    donnees_facturation, donnees_livraison, notes, email_confirmation
                )
                VALUES ($1, $2, 'en_attente', $3, 0, 0, $4, 'en_attente', $5, '{}'::jsonb, $6, FALSE)
                RETURNING *
                "#,
            )
            .bind(order.visiteur_id)
            .bind(&numero)
            .bind(order.montant_total)
            .bind(order.methode_paiement)
            .bind(&order.donnees_facturation)
            .bind(&order.notes)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(created) => return Ok(created),
                Err(e) if is_unique_violation(&e) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Internal(
            "Could not allocate a unique numero_commande".to_string(),
        ))
    }

    /// Update order and/or payment status; each field applies independently
    pub async fn update_status(
        &self,
        id: i64,
        statut: Option<OrderStatus>,
        statut_paiement: Option<PaymentStatus>,
    ) -> AppResult<Order> {
        sqlx::query_as::<_, Order>(
            r#"
            UPDATE commandes
            SET statut = COALESCE($1, statut),
                statut_paiement = COALESCE($2, statut_paiement),
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(statut)
        .bind(statut_paiement)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Commande introuvable".to_string()))
    }

    /// Record that the confirmation email went out
    pub async fn mark_confirmation_sent(&self, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE commandes SET email_confirmation = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_numbers_follow_cmd_year_format() {
        let numero = random_order_number(2030);
        assert!(numero.starts_with("CMD-2030-"));
        let digits = &numero["CMD-2030-".len()..];
        assert_eq!(digits.len(), 4);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}
