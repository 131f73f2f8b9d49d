//! Review moderation decision logic: status determination, the trusted-user
//! threshold and the anti-flood evaluation.
//!
//! Everything here is pure and synchronous; the async persistence reads happen
//! in the submission use case, which hands the fetched history to
//! [`evaluate_anti_flood`]. Infrastructure failures on those reads resolve
//! fail-open (not trusted / can review), a deliberate availability choice.

use crate::domain::company::entity::SubmissionStatus;
use crate::domain::moderation::verdict::{FloodDecision, FloodReason};
use crate::domain::review::entity::ReviewStamp;
use crate::infrastructure::moderation::content::{ReviewContentRules, check_content_requirements};
use crate::infrastructure::moderation::spam::check_spam_patterns;
use crate::infrastructure::moderation::terms::check_bad_words;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user is trusted once this many of their reviews have been approved.
pub const TRUSTED_MIN_APPROVED_REVIEWS: i64 = 3;

/// Maximum reviews a user may post in any rolling 24-hour window.
pub const MAX_REVIEWS_PER_24H: usize = 5;

/// Minimum gap between two consecutive reviews from the same user.
pub const REVIEW_COOLDOWN_MINUTES: i64 = 5;

/// Full outcome of evaluating a review comment, with the specifics a handler
/// needs for a user-facing message and for the stored moderation flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAssessment {
    pub status: SubmissionStatus,
    pub reason: Option<String>,
    pub flags: Vec<String>,
}

/// Trusted means at least [`TRUSTED_MIN_APPROVED_REVIEWS`] approved reviews.
pub fn is_trusted(approved_review_count: i64) -> bool {
    approved_review_count >= TRUSTED_MIN_APPROVED_REVIEWS
}

/// Decide the moderation status of a review comment, in fixed order:
///
/// 1. blacklist match -> Rejected (terminal, nothing else runs)
/// 2. content requirements fail -> Rejected (terminal)
/// 3. spam patterns -> NeedsReview, even for trusted users
/// 4. otherwise -> Approved, trusted or not
///
/// The final arm intentionally auto-approves clean submissions from untrusted
/// users; there is no separate new-user review tier.
pub fn determine_moderation_status(
    text: &str,
    is_trusted_user: bool,
    rules: &ReviewContentRules,
) -> ReviewAssessment {
    let bad_words = check_bad_words(text);
    if !bad_words.is_clean {
        return ReviewAssessment {
            status: SubmissionStatus::Rejected,
            reason: Some("Comment contains prohibited language".to_string()),
            flags: bad_words
                .found_words
                .iter()
                .map(|w| format!("bad_word:{}", w))
                .collect(),
        };
    }

    let content = check_content_requirements(text, rules);
    if !content.is_valid {
        return ReviewAssessment {
            status: SubmissionStatus::Rejected,
            reason: content.errors.first().map(|e| e.message()),
            flags: content
                .errors
                .iter()
                .map(|e| format!("content:{}", e.code()))
                .collect(),
        };
    }

    let spam = check_spam_patterns(text);
    if spam.is_suspicious {
        return ReviewAssessment {
            status: SubmissionStatus::NeedsReview,
            reason: Some("Comment was flagged for manual review".to_string()),
            flags: spam.reasons.iter().map(|r| r.code().to_string()).collect(),
        };
    }

    let _ = is_trusted_user;
    ReviewAssessment {
        status: SubmissionStatus::Approved,
        reason: None,
        flags: vec![],
    }
}

/// Evaluate the three review rate limits against the user's fetched history,
/// in strict precedence order (the first failing limit wins):
///
/// 1. same company within the last 24 hours
/// 2. five or more reviews within the last 24 hours
/// 3. most recent review (any company) within the last five minutes, reported
///    with the remaining wait in whole minutes (ceiling of remaining ms)
///
/// "Most recent" is the maximum `created_at` in the history, regardless of
/// insertion order.
pub fn evaluate_anti_flood(
    history: &[ReviewStamp],
    company_id: Uuid,
    now: DateTime<Utc>,
) -> FloodDecision {
    let day_ago = now - Duration::hours(24);

    let same_company_24h = history
        .iter()
        .any(|r| r.company_id == company_id && r.created_at > day_ago);
    if same_company_24h {
        return FloodDecision::blocked(FloodReason::AlreadyReviewedCompany24h);
    }

    let total_24h = history.iter().filter(|r| r.created_at > day_ago).count();
    if total_24h >= MAX_REVIEWS_PER_24H {
        return FloodDecision::blocked(FloodReason::TooManyReviews24h);
    }

    if let Some(latest) = history.iter().map(|r| r.created_at).max() {
        let cooldown_ends = latest + Duration::minutes(REVIEW_COOLDOWN_MINUTES);
        if cooldown_ends > now {
            let remaining_ms = (cooldown_ends - now).num_milliseconds();
            let remaining_minutes = (remaining_ms + 59_999) / 60_000;
            return FloodDecision::blocked(FloodReason::CooldownActive { remaining_minutes });
        }
    }

    FloodDecision::allowed()
}
