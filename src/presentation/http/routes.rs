use super::{
    handlers::{admin, auth, companies, health, reviews},
    middleware::admin::require_admin,
    middleware::rate_limit::rate_limit_middleware,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/api/v1/admin/moderation", get(admin::get_company_queue))
        .route("/api/v1/admin/moderation/reviews", get(admin::get_review_queue))
        .route(
            "/api/v1/admin/companies/{id}/approve",
            post(admin::approve_company),
        )
        .route(
            "/api/v1/admin/companies/{id}/reject",
            post(admin::reject_company),
        )
        .route(
            "/api/v1/admin/reviews/{id}/approve",
            post(admin::approve_review),
        )
        .route(
            "/api/v1/admin/reviews/{id}/reject",
            post(admin::reject_review),
        )
        .route(
            "/api/v1/admin/subscriptions/check",
            post(admin::check_subscriptions),
        )
        .route("/api/v1/admin/stats", get(admin::get_stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let submission_routes = Router::new()
        .route("/api/v1/companies", post(companies::submit_company))
        .route(
            "/api/v1/companies/{id}/reviews",
            post(reviews::submit_review),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Public directory
        .route("/api/v1/companies", get(companies::list_companies))
        .route("/api/v1/companies/{id}", get(companies::get_company))
        .route("/api/v1/companies/{id}/reviews", get(reviews::get_reviews))
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::me))
        // Admin login (unprotected)
        .route("/api/v1/admin/login", post(admin::login))
        // Rate-limited submissions
        .merge(submission_routes)
        // Admin (protected by JWT middleware)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
