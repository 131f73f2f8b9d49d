use super::entity::{Company, SubmissionStatus, SubscriptionLevel};
use crate::domain::shared::{errors::DomainError, pagination::PaginationRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: &Company) -> Result<Company, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError>;
    async fn list_public(&self, page: &PaginationRequest) -> Result<Vec<Company>, DomainError>;
    async fn list_moderation_queue(
        &self,
        page: &PaginationRequest,
    ) -> Result<Vec<Company>, DomainError>;
    async fn set_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), DomainError>;

    /// Companies on a paid tier whose `plan_expires_at` falls in `[from, to)`
    /// and whose reminder has not yet been sent this period.
    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Company>, DomainError>;

    /// Companies on a paid tier whose `plan_expires_at` is strictly before `now`.
    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Company>, DomainError>;

    async fn mark_reminder_sent(&self, id: Uuid) -> Result<(), DomainError>;

    /// Drop a company to the free tier: clears the verified badge and every
    /// tier-gated field, stamps `plan_downgraded_at` and resets the reminder
    /// flag so the next paid period can re-trigger it.
    async fn downgrade_to_basic(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DomainError>;

    /// Record a confirmed payment: move to the purchased tier and extend the
    /// paid period. Resets `plan_reminder_sent` for the new period.
    async fn apply_payment(
        &self,
        id: Uuid,
        level: SubscriptionLevel,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
}
