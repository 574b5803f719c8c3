//! Calendar repository (closures, capacity events)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{is_undefined_table, AppError, AppResult},
    models::calendar::{CalendarClosure, CalendarEvent, CreateClosure, CreateEvent},
};

#[derive(Clone)]
pub struct CalendarRepository {
    pool: Pool<Postgres>,
}

impl CalendarRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// True when a closure row matches the exact date.
    ///
    /// Recurring closures are not expanded here; only the stored date counts.
    /// A missing table reads as "not closed" so availability keeps working
    /// before the calendar migrations have run.
    pub async fn is_closed(&self, date: NaiveDate) -> AppResult<bool> {
        let result: Result<bool, sqlx::Error> = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM calendar_closures WHERE date = $1)",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(closed) => Ok(closed),
            Err(e) if is_undefined_table(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Maximum capacity multiplier among the day's events, if any.
    ///
    /// Rows with a null multiplier are ignored. A missing table reads as
    /// "no events".
    pub async fn max_capacity_multiplier(&self, date: NaiveDate) -> AppResult<Option<Decimal>> {
        let result: Result<Option<Decimal>, sqlx::Error> = sqlx::query_scalar(
            r#"
            SELECT MAX(capacity_multiplier)
            FROM calendar_events
            WHERE date = $1 AND capacity_multiplier IS NOT NULL
            "#,
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(max) => Ok(max),
            Err(e) if is_undefined_table(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List closures within a date range, ordered by date
    pub async fn list_closures(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CalendarClosure>> {
        let rows = sqlx::query_as::<_, CalendarClosure>(
            "SELECT * FROM calendar_closures WHERE date >= $1 AND date <= $2 ORDER BY date",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// List events within a date range, ordered by date
    pub async fn list_events(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CalendarEvent>> {
        let rows = sqlx::query_as::<_, CalendarEvent>(
            "SELECT * FROM calendar_events WHERE date >= $1 AND date <= $2 ORDER BY date",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a closure
    pub async fn create_closure(
        &self,
        date: NaiveDate,
        data: &CreateClosure,
    ) -> AppResult<CalendarClosure> {
        let row = sqlx::query_as::<_, CalendarClosure>(
            r#"
            INSERT INTO calendar_closures (date, reason, recurrence)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(&data.reason)
        .bind(&data.recurrence)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete a closure
    pub async fn delete_closure(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM calendar_closures WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Fermeture {} introuvable", id)));
        }
        Ok(())
    }

    /// Create an event
    pub async fn create_event(
        &self,
        date: NaiveDate,
        data: &CreateEvent,
    ) -> AppResult<CalendarEvent> {
        let row = sqlx::query_as::<_, CalendarEvent>(
            r#"
            INSERT INTO calendar_events (date, title, description, capacity_multiplier)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(date)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.capacity_multiplier)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Delete an event
    pub async fn delete_event(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Événement {} introuvable", id)));
        }
        Ok(())
    }
}
