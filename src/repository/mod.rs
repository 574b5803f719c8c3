//! Repository layer for database operations

pub mod calendar;
pub mod orders;
pub mod tickets;
pub mod visitors;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub tickets: tickets::TicketsRepository,
    pub orders: orders::OrdersRepository,
    pub visitors: visitors::VisitorsRepository,
    pub calendar: calendar::CalendarRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            tickets: tickets::TicketsRepository::new(pool.clone()),
            orders: orders::OrdersRepository::new(pool.clone()),
            visitors: visitors::VisitorsRepository::new(pool.clone()),
            calendar: calendar::CalendarRepository::new(pool.clone()),
            pool,
        }
    }
}
