use crate::domain::company::entity::SubmissionStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Review {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub author_name: Option<String>,
    pub comment: String,
    pub rating: i16,
    pub status: SubmissionStatus,
    pub moderation_flags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a past review the anti-flood and trust checks need.
///
/// Fetched per submission and never cached; `created_at` ordering decides
/// which review counts as "most recent" (maximum timestamp wins).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ReviewStamp {
    pub company_id: Uuid,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}
