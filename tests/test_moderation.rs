use chrono::{Duration, Utc};
use kontrollitud::domain::company::entity::SubmissionStatus;
use kontrollitud::domain::moderation::verdict::{CompanyFlag, FloodReason};
use kontrollitud::domain::review::entity::ReviewStamp;
use kontrollitud::infrastructure::moderation::{
    company_screen::moderate_company,
    content::{BusinessContentRules, ReviewContentRules},
    engine::{determine_moderation_status, evaluate_anti_flood, is_trusted},
};
use uuid::Uuid;

fn review_rules() -> ReviewContentRules {
    ReviewContentRules::default()
}

#[test]
fn profane_review_is_rejected_before_anything_else() {
    let assessment = determine_moderation_status("фигня полная, это обман", true, &review_rules());
    assert_eq!(assessment.status, SubmissionStatus::Rejected);
    assert!(
        assessment
            .flags
            .iter()
            .any(|f| f.starts_with("bad_word:")),
        "expected a blacklist flag, got {:?}",
        assessment.flags
    );
}

#[test]
fn clean_first_review_is_approved_without_trust() {
    assert!(!is_trusted(0));
    let assessment = determine_moderation_status(
        "Suurepärane teenindus, jäin väga rahule, soovitan kõigile",
        false,
        &review_rules(),
    );
    assert_eq!(assessment.status, SubmissionStatus::Approved);
}

#[test]
fn link_dropping_goes_to_manual_review_even_from_trusted_users() {
    let assessment = determine_moderation_status(
        "Väga hea firma, vaadake ka http://minu-leht.ee lisainfoks",
        true,
        &review_rules(),
    );
    assert_eq!(assessment.status, SubmissionStatus::NeedsReview);
    assert!(assessment.flags.contains(&"contains_urls".to_string()));
}

#[test]
fn review_and_business_thresholds_differ() {
    // 15 chars passes the review minimum (10) but not the business
    // description minimum (20)
    let text = "hea firma jah!!";
    assert_eq!(
        determine_moderation_status(text, false, &review_rules()).status,
        SubmissionStatus::Approved
    );
    let result = moderate_company("Firma OÜ", text, None, &BusinessContentRules::default());
    assert!(result.flags.contains(&CompanyFlag::InvalidContentLength));
}

#[test]
fn same_company_block_outranks_the_cooldown() {
    let now = Utc::now();
    let company = Uuid::now_v7();
    let history = vec![ReviewStamp {
        company_id: company,
        status: SubmissionStatus::Approved,
        created_at: now - Duration::minutes(2),
    }];
    let decision = evaluate_anti_flood(&history, company, now);
    assert_eq!(decision.reason, Some(FloodReason::AlreadyReviewedCompany24h));
}

#[test]
fn cooldown_wait_is_reported_in_whole_minutes_rounded_up() {
    let now = Utc::now();
    let history = vec![ReviewStamp {
        company_id: Uuid::now_v7(),
        status: SubmissionStatus::Pending,
        created_at: now - Duration::seconds(30),
    }];
    let decision = evaluate_anti_flood(&history, Uuid::now_v7(), now);
    match decision.reason {
        Some(FloodReason::CooldownActive { remaining_minutes }) => {
            assert_eq!(remaining_minutes, 5);
        }
        other => panic!("expected cooldown, got {:?}", other),
    }
}

#[test]
fn company_screening_score_never_goes_negative() {
    let description = "обман PARIM PAKKUMINE KIIRLAEN IIIIIIIII \
                       https://bit.ly/a https://b.tk/x http://c.ee http://d.ee http://e.ee";
    let result = moderate_company("xx", description, Some("not-a-url"), &BusinessContentRules::default());
    assert!(!result.approved);
    assert_eq!(result.score, 0);
}

#[test]
fn clean_company_submission_is_approved_with_full_score() {
    let result = moderate_company(
        "Tartu Ehitus OÜ",
        "Üldehitus ja renoveerimistööd Tartus ja Lõuna-Eestis, kogemus aastast 2010.",
        Some("https://tartuehitus.ee"),
        &BusinessContentRules::default(),
    );
    assert!(result.approved);
    assert_eq!(result.score, 100);
    assert_eq!(result.reason, "passed all checks");
}
