pub mod sqlx_company_repository;
pub mod sqlx_review_repository;
