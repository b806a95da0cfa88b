use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // CATALOG ROUTES (a001)
        // ========================================
        .route(
            "/api/wines",
            get(handlers::a001_wine::list).post(handlers::a001_wine::upsert),
        )
        .route("/api/wines/featured", get(handlers::a001_wine::featured))
        .route("/api/wines/top-rated", get(handlers::a001_wine::top_rated))
        .route("/api/wines/grapes", get(handlers::a001_wine::grapes))
        .route(
            "/api/wines/testdata",
            post(handlers::a001_wine::insert_test_data),
        )
        .route(
            "/api/wines/:slug",
            get(handlers::a001_wine::get_by_slug).delete(handlers::a001_wine::delete),
        )
        // ========================================
        // EVENT ROUTES (a002)
        // ========================================
        .route("/api/events", get(handlers::a002_event::list_upcoming))
        .route(
            "/api/events/testdata",
            post(handlers::a002_event::insert_test_data),
        )
        .route("/api/events/:slug", get(handlers::a002_event::get_by_slug))
        // ========================================
        // BOOKING ROUTES (a003)
        // ========================================
        .route("/api/bookings", post(handlers::a003_booking::create))
        .route(
            "/api/bookings/by-email",
            get(handlers::a003_booking::list_by_email),
        )
        // ========================================
        // CART ROUTES (a004)
        // ========================================
        .route("/api/cart/calculate", post(handlers::a004_cart::calculate))
        // ========================================
        // AI ROUTES (a005)
        // ========================================
        .route("/api/ai/recommend", post(handlers::a005_sommelier::recommend))
        .route("/api/ai/search", get(handlers::a005_sommelier::vector_search))
}
