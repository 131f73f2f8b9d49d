use crate::{
    application::submit_review::dto::{SubmitReviewRequest, SubmitReviewResponse},
    domain::{
        company::repository::CompanyRepository,
        review::{entity::Review, repository::ReviewRepository},
        shared::errors::DomainError,
    },
    infrastructure::moderation::{
        content::RuleSet,
        engine::{determine_moderation_status, evaluate_anti_flood, is_trusted},
    },
};
use std::sync::Arc;
use tracing::{instrument, warn};
use uuid::Uuid;

/// Seconds two submissions from the same user must be apart at the gate level.
/// This closes the race where parallel requests both pass the anti-flood read
/// before either write lands; the 5-minute cooldown proper is enforced from
/// the persisted history.
const SUBMISSION_GATE_SECONDS: u64 = 10;

pub struct SubmitReviewUseCase {
    reviews: Arc<dyn ReviewRepository>,
    companies: Arc<dyn CompanyRepository>,
    redis: Option<redis::Client>,
    rules: Arc<RuleSet>,
}

impl SubmitReviewUseCase {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        companies: Arc<dyn CompanyRepository>,
        redis: Option<redis::Client>,
        rules: Arc<RuleSet>,
    ) -> Self {
        Self {
            reviews,
            companies,
            redis,
            rules,
        }
    }

    /// Run the full submission pipeline: existence check, concurrency gate,
    /// anti-flood limits, moderation, persistence.
    ///
    /// Trust and anti-flood resolve fail-open when their reads fail; the
    /// submission then proceeds as if from an untrusted user with no history.
    #[instrument(skip(self, request), fields(company_id = %request.company_id, user_id = %user_id))]
    pub async fn execute(
        &self,
        request: SubmitReviewRequest,
        user_id: Uuid,
    ) -> Result<SubmitReviewResponse, DomainError> {
        let company = self
            .companies
            .find_by_id(request.company_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Company not found".to_string()))?;

        self.acquire_submission_gate(user_id).await?;

        let approved_count = match self.reviews.count_approved_by_user(user_id).await {
            Ok(count) => count,
            Err(e) => {
                warn!("trust lookup failed, treating user as untrusted: {}", e);
                0
            }
        };

        let history = match self.reviews.history_for_user(user_id).await {
            Ok(history) => history,
            Err(e) => {
                warn!("review history lookup failed, skipping anti-flood: {}", e);
                vec![]
            }
        };

        let now = chrono::Utc::now();
        let flood = evaluate_anti_flood(&history, company.id, now);
        if let Some(reason) = flood.reason {
            return Err(DomainError::RateLimitExceeded(reason.message()));
        }

        let assessment = determine_moderation_status(
            &request.comment,
            is_trusted(approved_count),
            &self.rules.review,
        );

        let review = Review {
            id: Uuid::now_v7(),
            company_id: company.id,
            user_id,
            author_name: request.author_name,
            comment: request.comment,
            rating: request.rating,
            status: assessment.status,
            moderation_flags: assessment.flags,
            created_at: now,
            updated_at: now,
        };
        let saved = self.reviews.create(&review).await?;

        Ok(SubmitReviewResponse {
            id: saved.id,
            status: saved.status,
            message: assessment.reason,
        })
    }

    /// Short per-user Redis gate (`SET NX EX`). Resolves fail-open when Redis
    /// is unavailable or not configured.
    async fn acquire_submission_gate(&self, user_id: Uuid) -> Result<(), DomainError> {
        let Some(redis) = &self.redis else {
            return Ok(());
        };
        let mut conn = match redis.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("submission gate unavailable, allowing request: {}", e);
                return Ok(());
            }
        };

        let key = format!("review_submit:{}", user_id);
        let set: Result<Option<String>, redis::RedisError> = redis::cmd("SET")
            .arg(&key)
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(SUBMISSION_GATE_SECONDS)
            .query_async(&mut conn)
            .await;
        match set {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(DomainError::RateLimitExceeded(
                "Please wait a few seconds before submitting again".to_string(),
            )),
            Err(e) => {
                warn!("submission gate unavailable, allowing request: {}", e);
                Ok(())
            }
        }
    }
}
