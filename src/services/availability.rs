//! Visit availability: calendar resolution and per-slot capacity

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;

use crate::{
    config::BookingConfig,
    error::{AppError, AppResult, FieldErrors},
    models::ticket::SlotAvailability,
    repository::Repository,
};

/// Resolved calendar state for one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayContext {
    pub is_closed: bool,
    pub capacity_multiplier: f64,
}

impl Default for DayContext {
    fn default() -> Self {
        Self {
            is_closed: false,
            capacity_multiplier: 1.0,
        }
    }
}

/// Per-slot availability over the configured slot list.
///
/// A closed day zeroes every slot. Otherwise the effective capacity is
/// `floor(base * max(0, multiplier))`; flooring means a shrinking event can
/// only reduce capacity, never round it back up.
pub fn compute_slots(
    slots: &[String],
    base_capacity: i32,
    day: DayContext,
    sold: &HashMap<String, i64>,
) -> Vec<SlotAvailability> {
    if day.is_closed {
        return slots
            .iter()
            .map(|heure| SlotAvailability {
                heure: heure.clone(),
                capacite: 0,
                restants: 0,
                complet: true,
            })
            .collect();
    }

    let effective =
        (f64::from(base_capacity) * day.capacity_multiplier.max(0.0)).floor() as i32;

    slots
        .iter()
        .map(|heure| {
            let vendus = sold.get(heure).copied().unwrap_or(0);
            let restants = (i64::from(effective) - vendus).max(0) as i32;
            SlotAvailability {
                heure: heure.clone(),
                capacite: effective,
                restants,
                complet: restants == 0,
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct AvailabilityService {
    repository: Repository,
    config: BookingConfig,
}

impl AvailabilityService {
    pub fn new(repository: Repository, config: BookingConfig) -> Self {
        Self { repository, config }
    }

    /// Resolve the calendar state for a date: closed flag plus the maximum
    /// event multiplier (1.0 when no event applies)
    pub async fn resolve_day(&self, date: NaiveDate) -> AppResult<DayContext> {
        let is_closed = self.repository.calendar.is_closed(date).await?;
        let capacity_multiplier = self
            .repository
            .calendar
            .max_capacity_multiplier(date)
            .await?
            .and_then(|m| m.to_f64())
            .unwrap_or(1.0);

        Ok(DayContext {
            is_closed,
            capacity_multiplier,
        })
    }

    /// Remaining capacity per slot for a date and ticket type.
    ///
    /// The date is required; an unknown ticket type is not an error, it
    /// simply matches no sold tickets.
    pub async fn availability(
        &self,
        date: Option<&str>,
        type_: &str,
    ) -> AppResult<Vec<SlotAvailability>> {
        let date = date
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                AppError::Validation(FieldErrors::one("date", "Paramètre date requis (YYYY-MM-DD)."))
            })?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AppError::Validation(FieldErrors::one("date", "Format invalide. Utiliser YYYY-MM-DD."))
        })?;

        let day = self.resolve_day(date).await?;

        // No point counting tickets on a closed day
        let sold = if day.is_closed {
            HashMap::new()
        } else {
            self.repository.tickets.sold_per_slot(date, type_).await?
        };

        Ok(compute_slots(
            &self.config.slots,
            self.config.base_capacity_per_slot,
            day,
            &sold,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots() -> Vec<String> {
        crate::config::BookingConfig::default().slots
    }

    #[test]
    fn closed_day_zeroes_every_slot() {
        let day = DayContext {
            is_closed: true,
            capacity_multiplier: 1.2,
        };
        let result = compute_slots(&slots(), 50, day, &HashMap::new());
        assert_eq!(result.len(), 7);
        for slot in result {
            assert_eq!(slot.capacite, 0);
            assert_eq!(slot.restants, 0);
            assert!(slot.complet);
        }
    }

    #[test]
    fn plain_day_uses_base_capacity_exactly() {
        let result = compute_slots(&slots(), 50, DayContext::default(), &HashMap::new());
        for slot in result {
            assert_eq!(slot.capacite, 50);
            assert_eq!(slot.restants, 50);
            assert!(!slot.complet);
        }
    }

    #[test]
    fn shrinking_event_floors_the_capacity() {
        let day = DayContext {
            is_closed: false,
            capacity_multiplier: 0.8,
        };
        let result = compute_slots(&slots(), 50, day, &HashMap::new());
        assert_eq!(result[0].capacite, 40);
    }

    #[test]
    fn expanding_event_floors_too() {
        let day = DayContext {
            is_closed: false,
            capacity_multiplier: 1.25,
        };
        let result = compute_slots(&slots(), 50, day, &HashMap::new());
        assert_eq!(result[0].capacite, 62);
    }

    #[test]
    fn negative_multiplier_clamps_to_zero() {
        let day = DayContext {
            is_closed: false,
            capacity_multiplier: -0.5,
        };
        let result = compute_slots(&slots(), 50, day, &HashMap::new());
        assert_eq!(result[0].capacite, 0);
        assert!(result[0].complet);
    }

    #[test]
    fn sold_tickets_reduce_remaining_and_saturate_at_zero() {
        let mut sold = HashMap::new();
        sold.insert("09:00".to_string(), 48);
        sold.insert("10:00".to_string(), 50);
        sold.insert("11:00".to_string(), 53);

        let result = compute_slots(&slots(), 50, DayContext::default(), &sold);
        assert_eq!(result[0].restants, 2);
        assert!(!result[0].complet);
        assert_eq!(result[1].restants, 0);
        assert!(result[1].complet);
        assert_eq!(result[2].restants, 0);
        assert!(result[2].complet);
        // Untouched slot keeps full capacity
        assert_eq!(result[3].restants, 50);
    }

    #[test]
    fn shrunk_capacity_can_fill_a_previously_open_slot() {
        let mut sold = HashMap::new();
        sold.insert("09:00".to_string(), 40);

        let day = DayContext {
            is_closed: false,
            capacity_multiplier: 0.8,
        };
        let result = compute_slots(&slots(), 50, day, &sold);
        assert_eq!(result[0].capacite, 40);
        assert_eq!(result[0].restants, 0);
        assert!(result[0].complet);
    }
}
