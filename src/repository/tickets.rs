//! Tickets repository for database operations

use std::collections::HashMap;

use chrono::NaiveDate;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{is_unique_violation, AppError, AppResult},
    models::enums::TicketStatus,
    models::ticket::{NewTicket, Ticket},
};

/// Prefix embedded in every scan code
pub const QR_CODE_PREFIX: &str = "MCN-";

/// Length of the random suffix after the prefix
pub const QR_CODE_SUFFIX_LEN: usize = 10;

/// Attempts before giving up on finding a collision-free code.
///
/// The unique index on billets.qr_code is the actual correctness guarantee;
/// this loop is a best-effort pre-check.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Random scan code candidate: MCN- plus 10 uppercase alphanumerics
pub fn random_qr_code() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(QR_CODE_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("{}{}", QR_CODE_PREFIX, suffix)
}

#[derive(Clone)]
pub struct TicketsRepository {
    pool: Pool<Postgres>,
}

impl TicketsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get ticket by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM billets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Billet introuvable".to_string()))
    }

    /// Get ticket by scan code
    pub async fn get_by_qr_code(&self, qr_code: &str) -> AppResult<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM billets WHERE qr_code = $1")
            .bind(qr_code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    /// List a visitor's tickets, newest first
    pub async fn list_by_visitor(&self, visiteur_uuid: Uuid) -> AppResult<Vec<Ticket>> {
        let tickets = sqlx::query_as::<_, Ticket>(
            "SELECT * FROM billets WHERE visiteur_uuid = $1 ORDER BY created_at DESC",
        )
        .bind(visiteur_uuid)
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    /// Create a ticket with a collision-free scan code.
    ///
    /// Generates candidates until one passes the existence pre-check and the
    /// insert; a unique-violation from a concurrent insert retries with a
    /// fresh candidate.
    pub async fn create(&self, ticket: &NewTicket) -> AppResult<Ticket> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let qr_code = random_qr_code();

            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM billets WHERE qr_code = $1)")
                    .bind(&qr_code)
                    .fetch_one(&self.pool)
                    .await?;
            if exists {
                continue;
            }

            let result = sqlx::query_as::<_, Ticket>(
                r#"
                INSERT INTO billets (visiteur_uuid, type, prix, date_visite, heure_visite, qr_code, statut)
                VALUES ($1, $2, $3, $4, $5, $6, 'valide')
                RETURNING *
                "#,
            )
            .bind(ticket.visiteur_uuid)
            .bind(ticket.type_)
            .bind(ticket.prix)
            .bind(ticket.date_visite)
            .bind(&ticket.heure_visite)
            .bind(&qr_code)
            .fetch_one(&self.pool)
            .await;

            match result {
                Ok(created) => return Ok(created),
                Err(e) if is_unique_violation(&e) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::Internal(
            "Could not allocate a unique qr_code".to_string(),
        ))
    }

    /// Transition a ticket to a new status
    pub async fn set_status(&self, id: i64, statut: TicketStatus) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>(
            "UPDATE billets SET statut = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(statut)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Billet introuvable".to_string()))
    }

    /// Tickets sold per slot for a given date and type.
    ///
    /// Counts valide and utilise tickets only; cancelled tickets release
    /// their seat. The type filter compares text so an unknown type simply
    /// matches nothing.
    pub async fn sold_per_slot(
        &self,
        date: NaiveDate,
        type_: &str,
    ) -> AppResult<HashMap<String, i64>> {
        let rows = sqlx::query(
            r#"
            SELECT heure_visite, COUNT(*) AS vendus
            FROM billets
            WHERE date_visite = $1
              AND heure_visite IS NOT NULL
              AND type::text = $2
              AND statut IN ('valide', 'utilise')
            GROUP BY heure_visite
            "#,
        )
        .bind(date)
        .bind(type_)
        .fetch_all(&self.pool)
        .await?;

        let mut sold = HashMap::new();
        for row in rows {
            let slot: String = row.get("heure_visite");
            let count: i64 = row.get("vendus");
            sold.insert(slot, count);
        }
        Ok(sold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn qr_codes_carry_prefix_and_uppercase_suffix() {
        let code = random_qr_code();
        assert!(code.starts_with(QR_CODE_PREFIX));
        let suffix = &code[QR_CODE_PREFIX.len()..];
        assert_eq!(suffix.len(), QR_CODE_SUFFIX_LEN);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn a_thousand_generated_codes_are_distinct() {
        let codes: HashSet<String> = (0..1000).map(|_| random_qr_code()).collect();
        assert_eq!(codes.len(), 1000);
    }
}
