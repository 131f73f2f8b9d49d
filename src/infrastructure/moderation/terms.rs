//! Blacklist matching for Estonian, English and Russian content.
//!
//! Single-word terms match on token boundaries after normalization; multi-word
//! phrases match as substrings of the normalized text. A match on any term is a
//! hard gate further up the pipeline.

use crate::domain::moderation::verdict::BadWordsReport;

const PROFANITY_ET: &[&str] = &[
    "sitt", "pask", "persse", "munn", "türa", "lits", "raisk",
];

const PROFANITY_EN: &[&str] = &["fuck", "shit", "bitch", "asshole", "bastard", "cunt"];

const PROFANITY_RU: &[&str] = &["сука", "блядь", "хуй", "пизда", "дерьмо", "мразь"];

const SCAM_ET: &[&str] = &[
    "kiire raha",
    "tasuta raha",
    "garanteeritud kasum",
    "teeni kodus",
    "püramiidskeem",
    "imerohi",
];

const SCAM_EN: &[&str] = &[
    "free money",
    "fast cash",
    "guaranteed profit",
    "get rich quick",
    "click here",
    "crypto giveaway",
    "limited offer act now",
];

const SCAM_RU: &[&str] = &[
    "обман",
    "лохотрон",
    "быстрые деньги",
    "гарантированный доход",
    "заработок на дому",
    "халява",
];

/// Normalize text for matching: lowercase, any non-alphanumeric character
/// becomes a space, runs of whitespace collapse to one. Unicode-aware so the
/// Estonian and Russian vocabularies tokenize correctly.
fn normalize_text(input: &str) -> String {
    let mut normalized = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            normalized.extend(ch.to_lowercase());
        } else {
            normalized.push(' ');
        }
    }
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains_single_word(tokens: &[&str], term: &str) -> bool {
    tokens.iter().any(|token| *token == term)
}

fn contains_phrase(normalized: &str, term: &str) -> bool {
    normalized.contains(term)
}

fn scan_terms(normalized: &str, tokens: &[&str], terms: &[&str], out: &mut Vec<String>) {
    for term in terms {
        let hit = if term.contains(' ') {
            contains_phrase(normalized, term)
        } else {
            contains_single_word(tokens, term)
        };
        if hit {
            out.push((*term).to_string());
        }
    }
}

/// Scan free text against the trilingual profanity and scam-trigger lists.
///
/// Empty or absent text is clean. Returns every matched term; `is_clean` is
/// true iff no term matched. No side effects.
pub fn check_bad_words(text: &str) -> BadWordsReport {
    if text.trim().is_empty() {
        return BadWordsReport {
            is_clean: true,
            found_words: vec![],
        };
    }

    let normalized = normalize_text(text);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let mut found = Vec::new();
    for list in [
        PROFANITY_ET,
        PROFANITY_EN,
        PROFANITY_RU,
        SCAM_ET,
        SCAM_EN,
        SCAM_RU,
    ] {
        scan_terms(&normalized, &tokens, list, &mut found);
    }

    BadWordsReport {
        is_clean: found.is_empty(),
        found_words: found,
    }
}

#[cfg(test)]
mod tests {
    use super::check_bad_words;

    #[test]
    fn clean_text_has_no_matches() {
        let report = check_bad_words("Väga hea teenindus, soovitan soojalt");
        assert!(report.is_clean);
        assert!(report.found_words.is_empty());
    }

    #[test]
    fn empty_text_is_clean() {
        assert!(check_bad_words("").is_clean);
        assert!(check_bad_words("   ").is_clean);
    }

    #[test]
    fn russian_scam_trigger_matches_inside_sentence() {
        let report = check_bad_words("фигня полная, это обман");
        assert!(!report.is_clean);
        assert!(report.found_words.contains(&"обман".to_string()));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(!check_bad_words("FREE MONEY for everyone").is_clean);
        assert!(!check_bad_words("PERSSE saatku kõik").is_clean);
    }

    #[test]
    fn single_words_need_token_boundaries() {
        // "sitting" contains "sitt" as a substring but not as a token
        assert!(check_bad_words("we were sitting in the office").is_clean);
    }

    #[test]
    fn phrases_match_across_punctuation() {
        assert!(!check_bad_words("Kiire  raha! Juba täna!").is_clean);
    }
}
