use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Core domain entity representing a verified-business listing.
///
/// A company is submitted by a user, screened by the content moderation engine,
/// and (once approved) publicly listed in the directory. Paid subscription tiers
/// unlock extra profile fields; the subscription lifecycle worker downgrades
/// expired plans back to the free tier.
///
/// # Lifecycle
/// 1. **Submitted** - screened synchronously at creation time
/// 2. **Approved** - publicly listed and searchable
/// 3. **Pending / NeedsReview** - held in the admin moderation queue
/// 4. **Rejected** - hidden, with the failed rule recorded in `moderation_flags`
///
/// # Invariants
/// - `status` is set exactly once at creation by the moderation engine;
///   only an admin action may overwrite it afterwards
/// - `plan_reminder_sent` is reset to false whenever a new paid period begins
/// - tier-gated fields (`image_url`, the social links, `blog_article_url`) are
///   null whenever `subscription_level` is `Basic`
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Company {
    /// Unique identifier for this company
    pub id: Uuid,

    /// Display name of the business
    pub name: String,

    /// URL-safe slug derived from the name
    pub slug: String,

    /// Estonian business registry code, when the submitter provided one
    pub registry_code: Option<String>,

    /// Business description in Estonian
    pub description_et: Option<String>,

    /// Business description in English
    pub description_en: Option<String>,

    /// Public website of the business
    pub website: Option<String>,

    /// Contact email of the listing owner; downgrade/reminder notifications go here
    pub email: String,

    /// Directory category (e.g., "ehitus", "ilu", "toit")
    pub category: Option<String>,

    /// City or municipality
    pub city: Option<String>,

    /// Identity of the submitting user
    pub owner_id: Uuid,

    /// Moderation outcome assigned at creation, possibly overwritten by an admin
    pub status: SubmissionStatus,

    /// Diagnostic 0-100 trust score from the company screening pass
    pub trust_score: i32,

    /// Reason codes for every screening check that fired
    pub moderation_flags: Vec<String>,

    /// Current paid tier
    pub subscription_level: SubscriptionLevel,

    /// End of the current paid period; null on the free tier
    pub plan_expires_at: Option<DateTime<Utc>>,

    /// Whether the 3-days-before-expiry reminder has gone out for this period
    pub plan_reminder_sent: bool,

    /// When the subscription worker last downgraded this company
    pub plan_downgraded_at: Option<DateTime<Utc>>,

    /// Verified badge; cleared on downgrade
    pub is_verified: bool,

    /// Profile image URL (paid tiers only)
    pub image_url: Option<String>,

    /// TikTok profile link (paid tiers only)
    pub tiktok_url: Option<String>,

    /// Instagram profile link (paid tiers only)
    pub instagram_url: Option<String>,

    /// YouTube channel link (paid tiers only)
    pub youtube_url: Option<String>,

    /// Featured blog article link (paid tiers only)
    pub blog_article_url: Option<String>,

    /// Timestamp when this company was submitted
    pub created_at: DateTime<Utc>,

    /// Timestamp of the most recent modification
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Returns true if this company currently holds a paid tier.
    pub fn has_paid_plan(&self) -> bool {
        self.subscription_level.is_paid()
    }
}

/// Moderation and visibility status shared by companies and reviews.
///
/// Assigned once per submission by the moderation engine; admin actions are
/// the only path that overwrites it afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum SubmissionStatus {
    /// Publicly visible
    Approved,

    /// Held for manual review in the admin queue
    #[default]
    Pending,

    /// Hidden due to a hard moderation failure
    Rejected,

    /// Flagged by a soft moderation check, awaiting an admin decision
    NeedsReview,
}

impl SubmissionStatus {
    /// Returns true if this status allows public visibility.
    pub fn is_public(&self) -> bool {
        matches!(self, SubmissionStatus::Approved)
    }

    /// Returns true if this status requires administrator attention.
    pub fn needs_moderation(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Pending | SubmissionStatus::NeedsReview
        )
    }
}

/// Subscription tier of a company listing.
///
/// The only transitions inside this service are `Basic -> {Pro, Enterprise}`
/// via payment confirmation and `{Pro, Enterprise} -> Basic` via the
/// subscription lifecycle worker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[ts(export)]
pub enum SubscriptionLevel {
    #[default]
    Basic,
    Pro,
    Enterprise,
}

impl SubscriptionLevel {
    pub fn is_paid(&self) -> bool {
        matches!(self, SubscriptionLevel::Pro | SubscriptionLevel::Enterprise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_approved_is_public() {
        assert!(SubmissionStatus::Approved.is_public());
        assert!(!SubmissionStatus::Pending.is_public());
        assert!(!SubmissionStatus::Rejected.is_public());
        assert!(!SubmissionStatus::NeedsReview.is_public());
    }

    #[test]
    fn pending_and_needs_review_sit_in_the_queue() {
        assert!(SubmissionStatus::Pending.needs_moderation());
        assert!(SubmissionStatus::NeedsReview.needs_moderation());
        assert!(!SubmissionStatus::Rejected.needs_moderation());
    }

    #[test]
    fn basic_is_not_a_paid_tier() {
        assert!(!SubscriptionLevel::Basic.is_paid());
        assert!(SubscriptionLevel::Pro.is_paid());
        assert!(SubscriptionLevel::Enterprise.is_paid());
    }
}
