use super::entity::{Review, ReviewStamp};
use crate::domain::company::entity::SubmissionStatus;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<Review, DomainError>;
    async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<Review>, DomainError>;
    async fn set_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), DomainError>;

    /// Number of this user's reviews that ended up approved; feeds the
    /// trusted-user check.
    async fn count_approved_by_user(&self, user_id: Uuid) -> Result<i64, DomainError>;

    /// The user's full review history, newest first; feeds the anti-flood check.
    async fn history_for_user(&self, user_id: Uuid) -> Result<Vec<ReviewStamp>, DomainError>;
}
