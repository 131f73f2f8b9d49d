use crate::domain::{
    company::{
        entity::{Company, SubmissionStatus, SubscriptionLevel},
        repository::CompanyRepository,
    },
    shared::{errors::DomainError, pagination::PaginationRequest},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxCompanyRepository {
    pub pool: PgPool,
}
impl SqlxCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for SqlxCompanyRepository {
    async fn create(&self, company: &Company) -> Result<Company, DomainError> {
        let row = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (
                id, name, slug, registry_code, description_et, description_en,
                website, email, category, city, owner_id, status,
                trust_score, moderation_flags, subscription_level, plan_expires_at,
                plan_reminder_sent, plan_downgraded_at, is_verified,
                image_url, tiktok_url, instagram_url, youtube_url, blog_article_url,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6,
                $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16,
                $17, $18, $19,
                $20, $21, $22, $23, $24,
                $25, $26
            ) RETURNING *",
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.slug)
        .bind(&company.registry_code)
        .bind(&company.description_et)
        .bind(&company.description_en)
        .bind(&company.website)
        .bind(&company.email)
        .bind(&company.category)
        .bind(&company.city)
        .bind(company.owner_id)
        .bind(company.status)
        .bind(company.trust_score)
        .bind(&company.moderation_flags)
        .bind(company.subscription_level)
        .bind(company.plan_expires_at)
        .bind(company.plan_reminder_sent)
        .bind(company.plan_downgraded_at)
        .bind(company.is_verified)
        .bind(&company.image_url)
        .bind(&company.tiktok_url)
        .bind(&company.instagram_url)
        .bind(&company.youtube_url)
        .bind(&company.blog_article_url)
        .bind(company.created_at)
        .bind(company.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        let row = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(row)
    }

    async fn list_public(&self, page: &PaginationRequest) -> Result<Vec<Company>, DomainError> {
        let page = page.clamped();
        let rows = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE status = 'APPROVED' \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(rows)
    }

    async fn list_moderation_queue(
        &self,
        page: &PaginationRequest,
    ) -> Result<Vec<Company>, DomainError> {
        let page = page.clamped();
        let rows = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE status IN ('PENDING', 'NEEDS_REVIEW') \
             ORDER BY created_at ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(rows)
    }

    async fn set_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE companies SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Company not found".to_string()));
        }
        Ok(())
    }

    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Company>, DomainError> {
        let rows = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies \
             WHERE subscription_level IN ('pro', 'enterprise') \
               AND plan_reminder_sent = FALSE \
               AND plan_expires_at >= $1 AND plan_expires_at < $2 \
             ORDER BY plan_expires_at ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(rows)
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Company>, DomainError> {
        let rows = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies \
             WHERE subscription_level IN ('pro', 'enterprise') \
               AND plan_expires_at < $1 \
             ORDER BY plan_expires_at ASC",
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(rows)
    }

    async fn mark_reminder_sent(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE companies SET plan_reminder_sent = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(())
    }

    async fn downgrade_to_basic(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE companies SET \
                subscription_level = 'basic', \
                is_verified = FALSE, \
                plan_downgraded_at = $1, \
                plan_reminder_sent = FALSE, \
                image_url = NULL, \
                tiktok_url = NULL, \
                instagram_url = NULL, \
                youtube_url = NULL, \
                blog_article_url = NULL, \
                updated_at = NOW() \
             WHERE id = $2",
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(())
    }

    async fn apply_payment(
        &self,
        id: Uuid,
        level: SubscriptionLevel,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE companies SET \
                subscription_level = $1, \
                plan_expires_at = $2, \
                plan_reminder_sent = FALSE, \
                plan_downgraded_at = NULL, \
                is_verified = TRUE, \
                updated_at = NOW() \
             WHERE id = $3",
        )
        .bind(level)
        .bind(expires_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Company not found".to_string()));
        }
        Ok(())
    }
}
