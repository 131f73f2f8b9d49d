use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    application::submit_review::dto::{SubmitReviewRequest, SubmitReviewResponse},
    domain::review::entity::Review,
    presentation::http::{
        errors::AppError, middleware::user::decode_required_user_claims, state::AppState,
    },
};

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewBody {
    #[validate(length(max = 100))]
    pub author_name: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub comment: String,

    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
}

pub async fn submit_review(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<ReviewBody>,
) -> Result<Json<SubmitReviewResponse>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Forbidden("Unauthorized".to_string()))?;
    body.validate()?;

    let request = SubmitReviewRequest {
        company_id,
        author_name: body.author_name,
        comment: body.comment,
        rating: body.rating,
    };
    let response = state.submit_review.execute(request, user_id).await?;
    Ok(Json(response))
}

pub async fn get_reviews(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.review_repo.list_for_company(company_id).await?;
    Ok(Json(reviews))
}
