use axum::{
    Json,
    extract::{Path, Query, State},
};
use bcrypt::verify;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        company::entity::{Company, SubmissionStatus},
        review::entity::Review,
        shared::pagination::PaginationRequest,
    },
    presentation::http::{errors::AppError, middleware::admin::AdminClaims, state::AppState},
};

// --- DTOs ---

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyQueueResponse {
    pub items: Vec<Company>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct ReviewQueueResponse {
    pub items: Vec<Review>,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_companies: i64,
    pub approved_companies: i64,
    pub pending_companies: i64,
    pub rejected_companies: i64,
    pub total_reviews: i64,
    pub reviews_needing_moderation: i64,
    pub paid_subscriptions: i64,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionCheckResponse {
    pub reminders_sent: usize,
    pub downgraded: usize,
}

// --- Handlers ---

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if body.email != state.config.admin_email {
        return Err(AppError::Forbidden("Invalid credentials".to_string()));
    }

    let valid = verify(&body.password, &state.config.admin_password_hash)
        .map_err(|_| AppError::Internal("Password verification failed".to_string()))?;
    if !valid {
        return Err(AppError::Forbidden("Invalid credentials".to_string()));
    }

    // JWT valid for 24 hours
    let exp = (chrono::Utc::now() + chrono::Duration::hours(24)).timestamp() as usize;
    let claims = AdminClaims {
        sub: body.email.clone(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    tracing::info!("Admin login successful");
    Ok(Json(LoginResponse { token }))
}

pub async fn get_company_queue(
    State(state): State<AppState>,
    Query(page): Query<PaginationRequest>,
) -> Result<Json<CompanyQueueResponse>, AppError> {
    let items = state.company_repo.list_moderation_queue(&page).await?;
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM companies WHERE status IN ('PENDING', 'NEEDS_REVIEW')",
    )
    .fetch_one(&state.db)
    .await?;
    Ok(Json(CompanyQueueResponse { items, total }))
}

pub async fn get_review_queue(
    State(state): State<AppState>,
    Query(page): Query<PaginationRequest>,
) -> Result<Json<ReviewQueueResponse>, AppError> {
    let page = page.clamped();
    let items = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE status IN ('PENDING', 'NEEDS_REVIEW') \
         ORDER BY created_at ASC LIMIT $1 OFFSET $2",
    )
    .bind(page.limit)
    .bind(page.offset)
    .fetch_all(&state.db)
    .await?;
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reviews WHERE status IN ('PENDING', 'NEEDS_REVIEW')",
    )
    .fetch_one(&state.db)
    .await?;
    Ok(Json(ReviewQueueResponse { items, total }))
}

pub async fn approve_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .company_repo
        .set_status(id, SubmissionStatus::Approved)
        .await?;
    tracing::info!(company_id = %id, "company approved");
    Ok(Json(serde_json::json!({ "id": id, "status": "APPROVED" })))
}

pub async fn reject_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .company_repo
        .set_status(id, SubmissionStatus::Rejected)
        .await?;
    tracing::info!(company_id = %id, "company rejected");
    Ok(Json(serde_json::json!({ "id": id, "status": "REJECTED" })))
}

pub async fn approve_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .review_repo
        .set_status(id, SubmissionStatus::Approved)
        .await?;
    tracing::info!(review_id = %id, "review approved");
    Ok(Json(serde_json::json!({ "id": id, "status": "APPROVED" })))
}

pub async fn reject_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .review_repo
        .set_status(id, SubmissionStatus::Rejected)
        .await?;
    tracing::info!(review_id = %id, "review rejected");
    Ok(Json(serde_json::json!({ "id": id, "status": "REJECTED" })))
}

/// Manual trigger for the subscription lifecycle pass. Skipped with zero
/// counts when a scheduled pass is already running.
pub async fn check_subscriptions(
    State(state): State<AppState>,
) -> Result<Json<SubscriptionCheckResponse>, AppError> {
    let summary = state.subscription_worker.run_once().await;
    Ok(Json(SubscriptionCheckResponse {
        reminders_sent: summary.reminders_sent,
        downgraded: summary.downgraded,
    }))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let total_companies = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies")
        .fetch_one(&state.db)
        .await?;
    let approved_companies = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM companies WHERE status = 'APPROVED'",
    )
    .fetch_one(&state.db)
    .await?;
    let pending_companies = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM companies WHERE status IN ('PENDING', 'NEEDS_REVIEW')",
    )
    .fetch_one(&state.db)
    .await?;
    let rejected_companies = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM companies WHERE status = 'REJECTED'",
    )
    .fetch_one(&state.db)
    .await?;
    let total_reviews = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews")
        .fetch_one(&state.db)
        .await?;
    let reviews_needing_moderation = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM reviews WHERE status IN ('PENDING', 'NEEDS_REVIEW')",
    )
    .fetch_one(&state.db)
    .await?;
    let paid_subscriptions = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM companies WHERE subscription_level IN ('pro', 'enterprise')",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(StatsResponse {
        total_companies,
        approved_companies,
        pending_companies,
        rejected_companies,
        total_reviews,
        reviews_needing_moderation,
        paid_subscriptions,
    }))
}
