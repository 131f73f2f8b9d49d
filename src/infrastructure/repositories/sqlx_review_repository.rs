use crate::domain::{
    company::entity::SubmissionStatus,
    review::{
        entity::{Review, ReviewStamp},
        repository::ReviewRepository,
    },
    shared::errors::DomainError,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxReviewRepository {
    pub pool: PgPool,
}
impl SqlxReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for SqlxReviewRepository {
    async fn create(&self, review: &Review) -> Result<Review, DomainError> {
        let row = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (
                id, company_id, user_id, author_name, comment, rating,
                status, moderation_flags, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10
            ) RETURNING *",
        )
        .bind(review.id)
        .bind(review.company_id)
        .bind(review.user_id)
        .bind(&review.author_name)
        .bind(&review.comment)
        .bind(review.rating)
        .bind(review.status)
        .bind(&review.moderation_flags)
        .bind(review.created_at)
        .bind(review.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(row)
    }

    async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<Review>, DomainError> {
        let rows = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews \
             WHERE company_id = $1 AND status = 'APPROVED' \
             ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(rows)
    }

    async fn set_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE reviews SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Review not found".to_string()));
        }
        Ok(())
    }

    async fn count_approved_by_user(&self, user_id: Uuid) -> Result<i64, DomainError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reviews WHERE user_id = $1 AND status = 'APPROVED'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(count)
    }

    async fn history_for_user(&self, user_id: Uuid) -> Result<Vec<ReviewStamp>, DomainError> {
        let rows = sqlx::query_as::<_, ReviewStamp>(
            "SELECT company_id, status, created_at FROM reviews \
             WHERE user_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(rows)
    }
}
