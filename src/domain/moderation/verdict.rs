//! Result types produced by the moderation checks.
//!
//! Every check returns a structured report with enumerated reason codes so
//! callers can exhaustively handle each case and surface a specific,
//! localizable message to the submitting user. "Content is bad" is never an
//! error; only infrastructure failures propagate as `Result::Err`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Outcome of the blacklist scan. Any match is a hard gate: the submission is
/// rejected no matter what the other checks say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadWordsReport {
    pub is_clean: bool,
    pub found_words: Vec<String>,
}

/// A single spam-pattern detector that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SpamReason {
    ContainsUrls,
    ContainsEmail,
    ContainsPhoneNumber,
    ExcessiveCaps,
    RepeatedCharacters,
    RepeatedWords,
}

impl SpamReason {
    /// Stable wire/reason code, stored in `moderation_flags`.
    pub fn code(&self) -> &'static str {
        match self {
            SpamReason::ContainsUrls => "contains_urls",
            SpamReason::ContainsEmail => "contains_email",
            SpamReason::ContainsPhoneNumber => "contains_phone_number",
            SpamReason::ExcessiveCaps => "excessive_caps",
            SpamReason::RepeatedCharacters => "repeated_characters",
            SpamReason::RepeatedWords => "repeated_words",
        }
    }
}

/// Outcome of the spam-pattern scan. A soft gate: suspicious content goes to
/// manual review instead of being rejected outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamReport {
    pub is_suspicious: bool,
    pub reasons: Vec<SpamReason>,
}

/// A content-requirement rule that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case", tag = "rule")]
#[ts(export)]
pub enum ContentError {
    TooShort { min: usize },
    TooLong { max: usize },
    TooFewWords { min: usize },
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    TooManyLinks { max: usize },
}

impl ContentError {
    /// Stable reason code, stored in `moderation_flags`.
    pub fn code(&self) -> &'static str {
        match self {
            ContentError::TooShort { .. } => "too_short",
            ContentError::TooLong { .. } => "too_long",
            ContentError::TooFewWords { .. } => "too_few_words",
            ContentError::NameTooShort { .. } => "name_too_short",
            ContentError::NameTooLong { .. } => "name_too_long",
            ContentError::TooManyLinks { .. } => "too_many_links",
        }
    }

    pub fn message(&self) -> String {
        match self {
            ContentError::TooShort { min } => format!("Text must be at least {} characters", min),
            ContentError::TooLong { max } => format!("Text must be at most {} characters", max),
            ContentError::TooFewWords { min } => format!("Text must contain at least {} words", min),
            ContentError::NameTooShort { min } => {
                format!("Name must be at least {} characters", min)
            }
            ContentError::NameTooLong { max } => format!("Name must be at most {} characters", max),
            ContentError::TooManyLinks { max } => format!("At most {} links are allowed", max),
        }
    }
}

/// Outcome of the content-requirement check. All violations are collected;
/// callers surface the first one to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentReport {
    pub is_valid: bool,
    pub errors: Vec<ContentError>,
}

/// Why a review submission was rate-limited, in check precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case", tag = "reason")]
#[ts(export)]
pub enum FloodReason {
    AlreadyReviewedCompany24h,
    TooManyReviews24h,
    CooldownActive { remaining_minutes: i64 },
}

impl FloodReason {
    pub fn code(&self) -> &'static str {
        match self {
            FloodReason::AlreadyReviewedCompany24h => "already_reviewed_company_24h",
            FloodReason::TooManyReviews24h => "too_many_reviews_24h",
            FloodReason::CooldownActive { .. } => "cooldown_active",
        }
    }

    pub fn message(&self) -> String {
        match self {
            FloodReason::AlreadyReviewedCompany24h => {
                "You have already reviewed this company in the last 24 hours".to_string()
            }
            FloodReason::TooManyReviews24h => {
                "You have posted too many reviews in the last 24 hours".to_string()
            }
            FloodReason::CooldownActive { remaining_minutes } => format!(
                "Please wait {} more minute(s) before posting another review",
                remaining_minutes
            ),
        }
    }
}

/// Outcome of the anti-flood check for a single submission attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloodDecision {
    pub can_review: bool,
    pub reason: Option<FloodReason>,
}

impl FloodDecision {
    pub fn allowed() -> Self {
        Self {
            can_review: true,
            reason: None,
        }
    }

    pub fn blocked(reason: FloodReason) -> Self {
        Self {
            can_review: false,
            reason: Some(reason),
        }
    }
}

/// A company-screening check that fired. Each carries a fixed trust-score
/// penalty; the penalties are diagnostic, approval flips on the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CompanyFlag {
    InvalidContentLength,
    BlacklistedName,
    BlacklistedDescription,
    SuspiciousUrl,
    ExcessiveLinks,
    RepeatingCharacters,
    MalformedWebsiteUrl,
    LocalWebsiteUrl,
}

impl CompanyFlag {
    pub fn code(&self) -> &'static str {
        match self {
            CompanyFlag::InvalidContentLength => "invalid_content_length",
            CompanyFlag::BlacklistedName => "blacklisted_name",
            CompanyFlag::BlacklistedDescription => "blacklisted_description",
            CompanyFlag::SuspiciousUrl => "suspicious_url",
            CompanyFlag::ExcessiveLinks => "excessive_links",
            CompanyFlag::RepeatingCharacters => "repeating_characters",
            CompanyFlag::MalformedWebsiteUrl => "malformed_website_url",
            CompanyFlag::LocalWebsiteUrl => "local_website_url",
        }
    }

    /// Trust-score penalty subtracted from the 100-point baseline.
    pub fn penalty(&self) -> i32 {
        match self {
            CompanyFlag::InvalidContentLength => 50,
            CompanyFlag::BlacklistedName => 80,
            CompanyFlag::BlacklistedDescription => 60,
            CompanyFlag::SuspiciousUrl => 70,
            CompanyFlag::ExcessiveLinks => 40,
            CompanyFlag::RepeatingCharacters => 50,
            CompanyFlag::MalformedWebsiteUrl => 30,
            CompanyFlag::LocalWebsiteUrl => 20,
        }
    }
}

/// Immutable value object produced by the company screening pass.
///
/// The score only ever decreases from the 100-point baseline and is floored at
/// zero; `approved` flips to false the moment any check fails, independent of
/// the remaining score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationResult {
    pub approved: bool,
    pub score: i32,
    pub reason: String,
    pub flags: Vec<CompanyFlag>,
}

impl ModerationResult {
    pub fn flag_codes(&self) -> Vec<String> {
        self.flags.iter().map(|f| f.code().to_string()).collect()
    }
}
