//! Content-requirement rules, parameterized by submission kind.
//!
//! Reviews and business listings have different legitimate use patterns (a
//! business may list its own site once, a review should not), so the two rule
//! sets are tuned independently but live in one place.

use crate::domain::moderation::verdict::{ContentError, ContentReport};
use crate::infrastructure::moderation::spam::count_links;

/// Length and word-count requirements for review comments.
#[derive(Debug, Clone)]
pub struct ReviewContentRules {
    pub min_length: usize,
    pub max_length: usize,
    pub min_words: usize,
}

impl Default for ReviewContentRules {
    fn default() -> Self {
        Self {
            min_length: 10,
            max_length: 2000,
            min_words: 3,
        }
    }
}

/// Requirements for business listing submissions.
#[derive(Debug, Clone)]
pub struct BusinessContentRules {
    pub name_min_length: usize,
    pub name_max_length: usize,
    pub description_min_length: usize,
    pub max_links: usize,
}

impl Default for BusinessContentRules {
    fn default() -> Self {
        Self {
            name_min_length: 3,
            name_max_length: 100,
            description_min_length: 20,
            max_links: 3,
        }
    }
}

/// The full rule set carried in application state; one copy, both kinds.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub review: ReviewContentRules,
    pub business: BusinessContentRules,
}

/// Check a review comment against the length and word-count rules.
///
/// All violations are collected; the caller surfaces the first one.
pub fn check_content_requirements(text: &str, rules: &ReviewContentRules) -> ContentReport {
    let trimmed = text.trim();
    let mut errors = Vec::new();

    let chars = trimmed.chars().count();
    if chars < rules.min_length {
        errors.push(ContentError::TooShort {
            min: rules.min_length,
        });
    }
    if chars > rules.max_length {
        errors.push(ContentError::TooLong {
            max: rules.max_length,
        });
    }
    if trimmed.split_whitespace().count() < rules.min_words {
        errors.push(ContentError::TooFewWords {
            min: rules.min_words,
        });
    }

    ContentReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Check a business name and description against the listing rules.
pub fn check_business_content(
    name: &str,
    description: &str,
    rules: &BusinessContentRules,
) -> ContentReport {
    let name = name.trim();
    let description = description.trim();
    let mut errors = Vec::new();

    let name_chars = name.chars().count();
    if name_chars < rules.name_min_length {
        errors.push(ContentError::NameTooShort {
            min: rules.name_min_length,
        });
    }
    if name_chars > rules.name_max_length {
        errors.push(ContentError::NameTooLong {
            max: rules.name_max_length,
        });
    }
    if description.chars().count() < rules.description_min_length {
        errors.push(ContentError::TooShort {
            min: rules.description_min_length,
        });
    }
    if count_links(description) > rules.max_links {
        errors.push(ContentError::TooManyLinks {
            max: rules.max_links,
        });
    }

    ContentReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moderation::verdict::ContentError;

    #[test]
    fn valid_review_passes() {
        let report =
            check_content_requirements("Great service, would recommend", &Default::default());
        assert!(report.is_valid);
    }

    #[test]
    fn short_review_collects_both_violations() {
        let report = check_content_requirements("ok", &Default::default());
        assert!(!report.is_valid);
        assert!(report.errors.contains(&ContentError::TooShort { min: 10 }));
        assert!(report.errors.contains(&ContentError::TooFewWords { min: 3 }));
    }

    #[test]
    fn overlong_review_is_rejected() {
        let text = "word ".repeat(500);
        let report = check_content_requirements(&text, &Default::default());
        assert!(report.errors.contains(&ContentError::TooLong { max: 2000 }));
    }

    #[test]
    fn word_count_measured_after_trim() {
        let report = check_content_requirements("   two words   ", &Default::default());
        assert!(report.errors.contains(&ContentError::TooFewWords { min: 3 }));
    }

    #[test]
    fn business_name_bounds() {
        let rules = BusinessContentRules::default();
        let long_name = "a".repeat(101);
        assert!(
            check_business_content("ab", "a perfectly fine description here", &rules)
                .errors
                .contains(&ContentError::NameTooShort { min: 3 })
        );
        assert!(
            check_business_content(&long_name, "a perfectly fine description here", &rules)
                .errors
                .contains(&ContentError::NameTooLong { max: 100 })
        );
    }

    #[test]
    fn business_tolerates_up_to_three_links() {
        let rules = BusinessContentRules::default();
        let three = "See https://a.ee ja https://b.ee ning https://c.ee lehekülgi meie kohta";
        assert!(check_business_content("Firma OÜ", three, &rules).is_valid);

        let four = "https://a.ee https://b.ee https://c.ee https://d.ee ja veel palju muud siin";
        assert!(
            check_business_content("Firma OÜ", four, &rules)
                .errors
                .contains(&ContentError::TooManyLinks { max: 3 })
        );
    }
}
