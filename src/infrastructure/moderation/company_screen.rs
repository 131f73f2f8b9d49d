//! Screening pass for business listing submissions.
//!
//! Distinct from the review pipeline: every check that fires subtracts a fixed
//! penalty from a 100-point trust score (floored at zero) and records a flag.
//! The score is diagnostic; approval flips to false on the first failed check.
//! Approved listings go straight to the public directory, everything else
//! lands in the admin pending queue.

use crate::domain::moderation::verdict::{CompanyFlag, ModerationResult};
use crate::infrastructure::moderation::content::{BusinessContentRules, check_business_content};
use crate::infrastructure::moderation::spam::{count_links, repeated_characters};
use crate::infrastructure::moderation::terms::check_bad_words;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SHORTENER_RE: Regex = Regex::new(
        r"(?i)\b(?:bit\.ly|tinyurl\.com|goo\.gl|t\.co|is\.gd|cutt\.ly|rb\.gy)/"
    )
    .expect("valid shortener regex");
    static ref THROWAWAY_TLD_RE: Regex =
        Regex::new(r"(?i)https?://[^\s/]+\.(?:tk|ml|ga|cf|gq)(?:/|\b)").expect("valid tld regex");
}

fn has_suspicious_url(text: &str) -> bool {
    SHORTENER_RE.is_match(text) || THROWAWAY_TLD_RE.is_match(text)
}

fn excessive_caps_ratio(text: &str) -> bool {
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    if letters < 10 {
        return false;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper * 10 > letters * 8
}

/// Website URL shape check. `None` means the URL is fine or absent.
fn website_check(website: Option<&str>) -> Option<CompanyFlag> {
    let url = website?.trim();
    if url.is_empty() {
        return None;
    }

    let rest = match url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return Some(CompanyFlag::MalformedWebsiteUrl),
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host = host.split(':').next().unwrap_or("");

    if host == "localhost"
        || host == "127.0.0.1"
        || host.starts_with("192.168.")
        || host.starts_with("10.")
        || host.ends_with(".local")
    {
        return Some(CompanyFlag::LocalWebsiteUrl);
    }
    if !host.contains('.') || host.starts_with('.') || host.ends_with('.') {
        return Some(CompanyFlag::MalformedWebsiteUrl);
    }
    None
}

/// Screen a business submission and produce the immutable moderation result.
///
/// Check order matches the stored flag order: content length, blacklist in
/// name, blacklist in description, suspicious URL patterns, excessive links,
/// repeating characters / shouting, website URL shape.
pub fn moderate_company(
    name: &str,
    description: &str,
    website: Option<&str>,
    rules: &BusinessContentRules,
) -> ModerationResult {
    let mut flags: Vec<CompanyFlag> = Vec::new();

    if !check_business_content(name, description, rules).is_valid {
        flags.push(CompanyFlag::InvalidContentLength);
    }
    if !check_bad_words(name).is_clean {
        flags.push(CompanyFlag::BlacklistedName);
    }
    if !check_bad_words(description).is_clean {
        flags.push(CompanyFlag::BlacklistedDescription);
    }
    if has_suspicious_url(description) {
        flags.push(CompanyFlag::SuspiciousUrl);
    }
    if count_links(description) > rules.max_links {
        flags.push(CompanyFlag::ExcessiveLinks);
    }
    if repeated_characters(description) || excessive_caps_ratio(description) {
        flags.push(CompanyFlag::RepeatingCharacters);
    }
    if let Some(flag) = website_check(website) {
        flags.push(flag);
    }

    let penalty: i32 = flags.iter().map(CompanyFlag::penalty).sum();
    let score = (100 - penalty).max(0);
    let approved = flags.is_empty();
    let reason = if approved {
        "passed all checks".to_string()
    } else {
        flags
            .iter()
            .map(|f| f.code())
            .collect::<Vec<_>>()
            .join(", ")
    };

    ModerationResult {
        approved,
        score,
        reason,
        flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moderation::verdict::CompanyFlag;

    fn rules() -> BusinessContentRules {
        BusinessContentRules::default()
    }

    #[test]
    fn clean_submission_keeps_full_score() {
        let result = moderate_company(
            "Tallinna Torutööd OÜ",
            "Professionaalsed torutööd ja santehnika paigaldus üle Eesti, kiire reageerimine.",
            Some("https://torutood.ee"),
            &rules(),
        );
        assert!(result.approved);
        assert_eq!(result.score, 100);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn any_single_failure_flips_approval() {
        let result = moderate_company(
            "Firma OÜ",
            "Lühike.", // below the 20-char description minimum
            None,
            &rules(),
        );
        assert!(!result.approved);
        assert_eq!(result.score, 50);
        assert_eq!(result.flags, vec![CompanyFlag::InvalidContentLength]);
    }

    #[test]
    fn blacklisted_name_costs_eighty() {
        let result = moderate_company(
            "Kiire Raha OÜ",
            "Pakume kiireid laene ja finantsteenuseid eraisikutele.",
            None,
            &rules(),
        );
        assert!(!result.approved);
        assert!(result.flags.contains(&CompanyFlag::BlacklistedName));
        assert_eq!(result.score, 20);
    }

    #[test]
    fn shortener_links_are_suspicious() {
        let result = moderate_company(
            "Firma OÜ",
            "Vaata meie pakkumisi siit: https://bit.ly/xyz123, parimad hinnad linnas.",
            None,
            &rules(),
        );
        assert!(result.flags.contains(&CompanyFlag::SuspiciousUrl));
    }

    #[test]
    fn failing_every_check_floors_the_score_at_zero() {
        let description = format!(
            "обман обман PARIM PAKKUMINE IIIIIIIII {} {} {} {} {}",
            "https://bit.ly/a", "https://a.tk/b", "http://c.ee", "http://d.ee", "http://e.ee"
        );
        let result = moderate_company("xx", &description, Some("not-a-url"), &rules());
        assert!(!result.approved);
        assert_eq!(result.score, 0);
        assert!(result.flags.len() >= 5);
    }

    #[test]
    fn localhost_website_is_flagged_but_cheap() {
        let result = moderate_company(
            "Firma OÜ",
            "Müüme ehitusmaterjale ja tööriistu üle kogu Eesti alates 2005. aastast.",
            Some("http://localhost:3000"),
            &rules(),
        );
        assert_eq!(result.flags, vec![CompanyFlag::LocalWebsiteUrl]);
        assert_eq!(result.score, 80);
    }

    #[test]
    fn missing_scheme_is_malformed() {
        let result = moderate_company(
            "Firma OÜ",
            "Müüme ehitusmaterjale ja tööriistu üle kogu Eesti alates 2005. aastast.",
            Some("torutood.ee"),
            &rules(),
        );
        assert_eq!(result.flags, vec![CompanyFlag::MalformedWebsiteUrl]);
        assert_eq!(result.score, 70);
    }
}
