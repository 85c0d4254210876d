use axum::Router;

use gameroom_application::AppState;

use crate::handlers::{dashboard_handlers, ops_handlers, report_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v2/reports/growth",
            axum::routing::get(report_handlers::growth),
        )
        .route(
            "/v2/reports/tickets-by-game",
            axum::routing::get(report_handlers::tickets_by_game),
        )
        .route(
            "/v2/reports/tickets-by-game-month",
            axum::routing::get(report_handlers::tickets_by_game_month),
        )
        .route(
            "/v2/reports/event-summary",
            axum::routing::get(report_handlers::event_summary),
        )
        .route(
            "/v2/reports/orders-by-event",
            axum::routing::get(report_handlers::orders_by_event),
        )
        .route(
            "/v2/reports/order-values-by-event",
            axum::routing::get(report_handlers::order_values_by_event),
        )
        .route(
            "/v2/reports/heavy-users",
            axum::routing::get(report_handlers::heavy_users),
        )
        .route(
            "/v2/reports/event-top-users",
            axum::routing::get(report_handlers::event_top_users),
        )
        .route(
            "/v2/reports/tickets-by-level",
            axum::routing::get(report_handlers::tickets_by_level),
        )
        .route(
            "/v2/reports/projection",
            axum::routing::get(report_handlers::projection),
        )
        .route(
            "/v2/reports/competitions",
            axum::routing::get(report_handlers::competitions),
        )
        .route(
            "/v2/reports/demographics",
            axum::routing::get(report_handlers::demographics),
        )
        .route(
            "/v2/dashboard",
            axum::routing::get(dashboard_handlers::dashboard_json),
        )
        .route(
            "/dashboard",
            axum::routing::get(dashboard_handlers::dashboard_html),
        )
        .route(
            "/v2/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v2/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
