use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    application::submit_company::dto::{SubmitCompanyRequest, SubmitCompanyResponse},
    domain::{company::entity::Company, shared::pagination::PaginationRequest},
    presentation::http::{
        errors::AppError, middleware::user::decode_required_user_claims, state::AppState,
    },
};

pub async fn submit_company(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SubmitCompanyRequest>,
) -> Result<Json<SubmitCompanyResponse>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let owner_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Forbidden("Unauthorized".to_string()))?;
    body.validate()?;

    let response = state.submit_company.execute(body, owner_id).await?;
    Ok(Json(response))
}

pub async fn list_companies(
    State(state): State<AppState>,
    Query(page): Query<PaginationRequest>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = state.company_repo.list_public(&page).await?;
    Ok(Json(companies))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, AppError> {
    let company = state
        .company_repo
        .find_by_id(id)
        .await?
        .filter(|c| c.status.is_public())
        .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;
    Ok(Json(company))
}
