//! Spam-pattern detectors for free-text submissions.
//!
//! Each detector is independent and contributes its own reason code; several
//! can fire on the same text. This layer is a soft gate: suspicious content is
//! routed to manual review, not rejected.

use crate::domain::moderation::verdict::{SpamReason, SpamReport};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_RE: Regex =
        Regex::new(r"(?i)\b(?:https?://|www\.)[^\s]+").expect("valid url regex");
    static ref EMAIL_RE: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex");
    static ref PHONE_RE: Regex =
        Regex::new(r"\+?\d[\d\s\-().]{5,}\d").expect("valid phone regex");
}

/// Number of URL-shaped tokens in the text.
pub fn count_links(text: &str) -> usize {
    URL_RE.find_iter(text).count()
}

fn contains_url(text: &str) -> bool {
    URL_RE.is_match(text)
}

fn contains_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

/// Phone-shaped digit sequences: a candidate run of digits with common
/// separators that contains at least seven actual digits.
fn contains_phone_number(text: &str) -> bool {
    PHONE_RE
        .find_iter(text)
        .any(|m| m.as_str().chars().filter(|c| c.is_ascii_digit()).count() >= 7)
}

/// Excessive capitalization: among words longer than five characters, a word
/// counts as shouted when more than half of its letters are uppercase; the
/// text is flagged when shouted words exceed 30% of those qualifying words.
fn excessive_caps(text: &str) -> bool {
    let qualifying: Vec<&str> = text
        .split_whitespace()
        .filter(|w| w.chars().count() > 5 && w.chars().any(|c| c.is_alphabetic()))
        .collect();
    if qualifying.is_empty() {
        return false;
    }

    let shouted = qualifying
        .iter()
        .filter(|w| {
            let letters = w.chars().filter(|c| c.is_alphabetic()).count();
            let upper = w.chars().filter(|c| c.is_uppercase()).count();
            letters > 0 && upper * 2 > letters
        })
        .count();

    shouted * 100 > qualifying.len() * 30
}

/// Six or more identical characters in a row.
pub fn repeated_characters(text: &str) -> bool {
    let mut run = 0usize;
    let mut prev: Option<char> = None;
    for ch in text.chars() {
        if Some(ch) == prev {
            run += 1;
            if run >= 6 {
                return true;
            }
        } else {
            run = 1;
            prev = Some(ch);
        }
    }
    false
}

/// The same word twice in a row (case-insensitive).
fn repeated_words(text: &str) -> bool {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(|c| c.to_lowercase())
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect();

    tokens.windows(2).any(|pair| pair[0] == pair[1])
}

/// Run every spam detector over the text and collect the reasons that fired.
pub fn check_spam_patterns(text: &str) -> SpamReport {
    let mut reasons = Vec::new();

    if contains_url(text) {
        reasons.push(SpamReason::ContainsUrls);
    }
    if contains_email(text) {
        reasons.push(SpamReason::ContainsEmail);
    }
    if contains_phone_number(text) {
        reasons.push(SpamReason::ContainsPhoneNumber);
    }
    if excessive_caps(text) {
        reasons.push(SpamReason::ExcessiveCaps);
    }
    if repeated_characters(text) {
        reasons.push(SpamReason::RepeatedCharacters);
    }
    if repeated_words(text) {
        reasons.push(SpamReason::RepeatedWords);
    }

    SpamReport {
        is_suspicious: !reasons.is_empty(),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moderation::verdict::SpamReason;

    #[test]
    fn clean_text_is_not_suspicious() {
        let report = check_spam_patterns("Great service, very professional staff");
        assert!(!report.is_suspicious);
        assert!(report.reasons.is_empty());
    }

    #[test]
    fn url_detection_flags_http_and_www() {
        assert!(
            check_spam_patterns("Check out http://example.com for more info")
                .reasons
                .contains(&SpamReason::ContainsUrls)
        );
        assert!(
            check_spam_patterns("visit www.example.com today")
                .reasons
                .contains(&SpamReason::ContainsUrls)
        );
    }

    #[test]
    fn email_detection() {
        let report = check_spam_patterns("write to me at spam@example.com please");
        assert!(report.reasons.contains(&SpamReason::ContainsEmail));
    }

    #[test]
    fn phone_detection_needs_seven_digits() {
        assert!(
            check_spam_patterns("call +372 5555 1234 now")
                .reasons
                .contains(&SpamReason::ContainsPhoneNumber)
        );
        // a year is not a phone number
        assert!(
            !check_spam_patterns("founded in 2019, still going strong")
                .reasons
                .contains(&SpamReason::ContainsPhoneNumber)
        );
    }

    #[test]
    fn multiple_reasons_co_occur() {
        let report =
            check_spam_patterns("BUYBUYBUY NOWWWWWW at http://spam.example and spam@example.com");
        assert!(report.is_suspicious);
        assert!(report.reasons.contains(&SpamReason::ContainsUrls));
        assert!(report.reasons.contains(&SpamReason::ContainsEmail));
        assert!(report.reasons.contains(&SpamReason::RepeatedCharacters));
    }

    #[test]
    fn shouted_long_words_trip_the_caps_detector() {
        let report = check_spam_patterns("AMAZING OFFERS INCREDIBLE DISCOUNT TODAY");
        assert!(report.reasons.contains(&SpamReason::ExcessiveCaps));
    }

    #[test]
    fn normal_capitalization_passes() {
        let report = check_spam_patterns("Professional plumbing services in Tallinn since 2010");
        assert!(!report.reasons.contains(&SpamReason::ExcessiveCaps));
    }

    #[test]
    fn repeated_character_run_of_six() {
        assert!(repeated_characters("soooooo good"));
        assert!(!repeated_characters("sooo good"));
    }

    #[test]
    fn adjacent_duplicate_words() {
        let report = check_spam_patterns("great great service");
        assert!(report.reasons.contains(&SpamReason::RepeatedWords));
    }
}
