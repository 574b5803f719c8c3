//! Business logic services

pub mod availability;
pub mod calendar;
pub mod email;
pub mod orders;
pub mod tickets;
pub mod visitors;

use crate::{
    config::{BookingConfig, EmailConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub tickets: tickets::TicketsService,
    pub orders: orders::OrdersService,
    pub visitors: visitors::VisitorsService,
    pub calendar: calendar::CalendarService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        booking_config: BookingConfig,
        email_config: EmailConfig,
    ) -> Self {
        let email = email::EmailService::new(email_config);
        Self {
            availability: availability::AvailabilityService::new(
                repository.clone(),
                booking_config,
            ),
            tickets: tickets::TicketsService::new(repository.clone()),
            orders: orders::OrdersService::new(repository.clone(), email.clone()),
            visitors: visitors::VisitorsService::new(repository.clone()),
            calendar: calendar::CalendarService::new(repository),
            email,
        }
    }
}
