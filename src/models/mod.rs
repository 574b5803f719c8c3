//! Data models for the MCN server

pub mod calendar;
pub mod enums;
pub mod order;
pub mod ticket;
pub mod visitor;

// Re-export commonly used types
pub use calendar::{CalendarClosure, CalendarEvent};
pub use enums::{OrderStatus, PaymentMethod, PaymentStatus, TicketStatus, TicketType};
pub use order::Order;
pub use ticket::Ticket;
pub use visitor::Visitor;
