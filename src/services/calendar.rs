//! Calendar service (month view, closures, events)

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult, FieldErrors},
    models::calendar::{
        month_bounds, CalendarClosure, CalendarEvent, CreateClosure, CreateEvent, MonthView,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CalendarService {
    repository: Repository,
}

impl CalendarService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Closures and events within a month (YYYY-MM)
    pub async fn month(&self, month: Option<&str>) -> AppResult<MonthView> {
        let month = month.filter(|m| !m.is_empty()).ok_or_else(|| {
            AppError::Validation(FieldErrors::one("month", "Paramètre month requis (YYYY-MM)."))
        })?;
        let (start, end) = month_bounds(month).ok_or_else(|| {
            AppError::Validation(FieldErrors::one("month", "Format invalide. Utiliser YYYY-MM."))
        })?;

        let closures = self.repository.calendar.list_closures(start, end).await?;
        let events = self.repository.calendar.list_events(start, end).await?;

        Ok(MonthView {
            month: month.to_string(),
            closures,
            events,
        })
    }

    /// Create a closure
    pub async fn create_closure(&self, data: &CreateClosure) -> AppResult<CalendarClosure> {
        let date = parse_date(&data.date)?;
        if let Some(recurrence) = data.recurrence.as_deref() {
            if !matches!(recurrence, "none" | "yearly" | "weekly") {
                return Err(AppError::Validation(FieldErrors::one(
                    "recurrence",
                    "Récurrence invalide (none, yearly, weekly).",
                )));
            }
        }
        self.repository.calendar.create_closure(date, data).await
    }

    /// Delete a closure
    pub async fn delete_closure(&self, id: i64) -> AppResult<()> {
        self.repository.calendar.delete_closure(id).await
    }

    /// Create an event
    pub async fn create_event(&self, data: &CreateEvent) -> AppResult<CalendarEvent> {
        let date = parse_date(&data.date)?;
        if data.title.trim().is_empty() {
            return Err(AppError::Validation(FieldErrors::one(
                "title",
                "Le titre est requis.",
            )));
        }
        self.repository.calendar.create_event(date, data).await
    }

    /// Delete an event
    pub async fn delete_event(&self, id: i64) -> AppResult<()> {
        self.repository.calendar.delete_event(id).await
    }
}

fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(FieldErrors::one("date", "Format de date invalide (YYYY-MM-DD)."))
    })
}
