use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, TS)]
#[ts(export)]
pub struct SubmitReviewRequest {
    pub company_id: Uuid,

    #[validate(length(max = 100))]
    pub author_name: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub comment: String,

    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
}

/// What the submitting user gets back: the stored review plus the moderation
/// outcome, so the client can explain a Pending/Rejected result.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct SubmitReviewResponse {
    pub id: Uuid,
    pub status: crate::domain::company::entity::SubmissionStatus,
    pub message: Option<String>,
}
