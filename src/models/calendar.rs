//! Calendar models (closures, capacity events)

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A day (or recurring pattern of days) the museum does not operate.
///
/// `recurrence` ("none", "yearly", "weekly") is stored for administrative
/// display only; the availability check matches the literal date and does not
/// expand recurring patterns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CalendarClosure {
    pub id: i64,
    pub date: NaiveDate,
    pub reason: Option<String>,
    pub recurrence: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A special event adjusting the day's effective capacity.
///
/// Several events may share a day; the resolver keeps the maximum multiplier.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CalendarEvent {
    pub id: i64,
    pub date: NaiveDate,
    pub title: String,
    pub description: Option<String>,
    /// Scales the baseline per-slot capacity (e.g. 0.8 or 1.2); null means 1.0
    #[schema(value_type = Option<f64>)]
    pub capacity_multiplier: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// Create closure request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClosure {
    /// Closure date (YYYY-MM-DD)
    pub date: String,
    pub reason: Option<String>,
    /// none, yearly or weekly
    pub recurrence: Option<String>,
}

/// Create event request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEvent {
    /// Event date (YYYY-MM-DD)
    pub date: String,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub capacity_multiplier: Option<Decimal>,
}

/// Query parameters for the month view
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MonthQuery {
    /// Month to display (YYYY-MM), required
    pub month: Option<String>,
}

/// Month view payload: closures and events inside the month
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthView {
    pub month: String,
    pub closures: Vec<CalendarClosure>,
    pub events: Vec<CalendarEvent>,
}

/// Resolve a YYYY-MM label into the month's first and last day
pub fn month_bounds(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").ok()?;
    let next_month = if start.month() == 12 {
        NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_cover_the_whole_month() {
        let (start, end) = month_bounds("2030-01").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2030, 1, 31).unwrap());
    }

    #[test]
    fn month_bounds_handle_december_and_february() {
        let (start, end) = month_bounds("2029-12").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2029, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2029, 12, 31).unwrap());

        let (_, feb_end) = month_bounds("2028-02").unwrap();
        assert_eq!(feb_end, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn month_bounds_reject_malformed_input() {
        assert!(month_bounds("2030").is_none());
        assert!(month_bounds("2030-13").is_none());
        assert!(month_bounds("not-a-month").is_none());
    }
}
