//! API handlers for the MCN REST endpoints
//!
//! All v1 routes are public: the kiosk and SPA clients identify themselves
//! with client-generated visitor UUIDs, not sessions.

pub mod calendar;
pub mod health;
pub mod openapi;
pub mod orders;
pub mod pricing;
pub mod tickets;
pub mod visitors;
