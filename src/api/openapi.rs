//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{calendar, health, orders, pricing, tickets, visitors};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MCN API",
        version = "1.0.0",
        description = "Musée des Civilisations Noires - billetterie et visite REST API",
        contact(name = "MCN", email = "contact@mcn.sn")
    ),
    servers(
        (url = "/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Billets
        tickets::availability,
        tickets::create_ticket,
        tickets::tickets_by_visitor,
        tickets::validate_qr_code,
        tickets::cancel_ticket,
        // Commandes
        orders::create_order,
        orders::get_order,
        orders::orders_by_visitor,
        orders::update_order_status,
        orders::cancel_order,
        // Visiteurs
        visitors::create_visitor,
        visitors::get_visitor,
        visitors::update_visitor,
        visitors::add_favorite,
        visitors::remove_favorite,
        visitors::add_to_history,
        // Calendrier
        calendar::month,
        calendar::create_closure,
        calendar::delete_closure,
        calendar::create_event,
        calendar::delete_event,
        // Tarifs
        pricing::list_tarifs,
    ),
    components(
        schemas(
            // Billets
            crate::models::ticket::Ticket,
            crate::models::ticket::CreateTicket,
            crate::models::ticket::SlotAvailability,
            crate::models::enums::TicketType,
            crate::models::enums::TicketStatus,
            tickets::AvailabilityResponse,
            tickets::TicketResponse,
            tickets::TicketListResponse,
            tickets::TicketMessageResponse,
            // Commandes
            crate::models::order::Order,
            crate::models::order::OrderLineItem,
            crate::models::order::BillingContact,
            crate::models::order::CreateOrder,
            crate::models::order::UpdateOrderStatus,
            crate::models::enums::OrderStatus,
            crate::models::enums::PaymentStatus,
            crate::models::enums::PaymentMethod,
            orders::OrderResponse,
            orders::OrderListResponse,
            orders::OrderMessageResponse,
            // Visiteurs
            crate::models::visitor::Visitor,
            crate::models::visitor::CreateVisitor,
            crate::models::visitor::UpdateVisitor,
            crate::models::visitor::ArtworkRef,
            visitors::VisitorResponse,
            visitors::VisitorMessageResponse,
            // Calendrier
            crate::models::calendar::CalendarClosure,
            crate::models::calendar::CalendarEvent,
            crate::models::calendar::CreateClosure,
            crate::models::calendar::CreateEvent,
            crate::models::calendar::MonthView,
            calendar::MonthResponse,
            calendar::ClosureResponse,
            calendar::EventResponse,
            // Tarifs
            pricing::Tarif,
            pricing::TarifListResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
            crate::error::ValidationErrorResponse,
            crate::error::FieldErrors,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "billets", description = "Billetterie et disponibilités"),
        (name = "commandes", description = "Commandes et paiement"),
        (name = "visiteurs", description = "Profils visiteurs"),
        (name = "calendrier", description = "Fermetures et événements"),
        (name = "tarifs", description = "Grille tarifaire")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
