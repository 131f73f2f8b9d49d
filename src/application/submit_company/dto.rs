use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, TS)]
#[ts(export)]
pub struct SubmitCompanyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 20))]
    pub registry_code: Option<String>,

    #[validate(length(min = 1, max = 10_000))]
    pub description_et: String,

    #[validate(length(max = 10_000))]
    pub description_en: Option<String>,

    // Not validated as a URL here: malformed websites are a screening flag
    // with a score penalty, not a request error.
    #[validate(length(max = 500))]
    pub website: Option<String>,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 100))]
    pub city: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct SubmitCompanyResponse {
    pub id: Uuid,
    pub slug: String,
    pub status: crate::domain::company::entity::SubmissionStatus,
    pub trust_score: i32,
    pub message: String,
}
