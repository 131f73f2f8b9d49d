use crate::{
    application::submit_company::dto::{SubmitCompanyRequest, SubmitCompanyResponse},
    domain::{
        company::{
            entity::{Company, SubmissionStatus, SubscriptionLevel},
            repository::CompanyRepository,
        },
        moderation::verdict::ModerationResult,
        shared::errors::DomainError,
    },
    infrastructure::moderation::{
        company_screen::moderate_company,
        content::{BusinessContentRules, RuleSet},
    },
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct SubmitCompanyUseCase {
    companies: Arc<dyn CompanyRepository>,
    rules: Arc<RuleSet>,
}

impl SubmitCompanyUseCase {
    pub fn new(companies: Arc<dyn CompanyRepository>, rules: Arc<RuleSet>) -> Self {
        Self { companies, rules }
    }

    /// Screen the submission and persist it with the screening outcome baked
    /// in. A clean submission is listed immediately; anything flagged goes to
    /// the admin moderation queue as Pending.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn execute(
        &self,
        request: SubmitCompanyRequest,
        owner_id: Uuid,
    ) -> Result<SubmitCompanyResponse, DomainError> {
        let result = screen_descriptions(&request, &self.rules.business);

        let status = if result.approved {
            SubmissionStatus::Approved
        } else {
            SubmissionStatus::Pending
        };
        if !result.approved {
            info!(
                score = result.score,
                flags = ?result.flags,
                "company submission held for moderation"
            );
        }

        let now = chrono::Utc::now();
        let id = Uuid::now_v7();
        let company = Company {
            id,
            slug: slugify(&request.name, id),
            name: request.name,
            registry_code: request.registry_code,
            description_et: Some(request.description_et),
            description_en: request.description_en,
            website: request.website,
            email: request.email,
            category: request.category,
            city: request.city,
            owner_id,
            status,
            trust_score: result.score,
            moderation_flags: result.flag_codes(),
            subscription_level: SubscriptionLevel::Basic,
            plan_expires_at: None,
            plan_reminder_sent: false,
            plan_downgraded_at: None,
            is_verified: false,
            image_url: None,
            tiktok_url: None,
            instagram_url: None,
            youtube_url: None,
            blog_article_url: None,
            created_at: now,
            updated_at: now,
        };
        let saved = self.companies.create(&company).await?;

        let message = if result.approved {
            "Company listed".to_string()
        } else {
            "Company submitted for review".to_string()
        };
        Ok(SubmitCompanyResponse {
            id: saved.id,
            slug: saved.slug,
            status: saved.status,
            trust_score: saved.trust_score,
            message,
        })
    }
}

/// Screen every language variant of the description. The listing gets the
/// worst score and the union of flags, so a clean Estonian text cannot smuggle
/// a spammy English one past the gate.
fn screen_descriptions(
    request: &SubmitCompanyRequest,
    rules: &BusinessContentRules,
) -> ModerationResult {
    let mut result = moderate_company(
        &request.name,
        &request.description_et,
        request.website.as_deref(),
        rules,
    );
    if let Some(description_en) = request.description_en.as_deref() {
        let en = moderate_company(&request.name, description_en, request.website.as_deref(), rules);
        result.approved = result.approved && en.approved;
        result.score = result.score.min(en.score);
        for flag in en.flags {
            if !result.flags.contains(&flag) {
                result.flags.push(flag);
            }
        }
        if !result.approved {
            result.reason = result
                .flags
                .iter()
                .map(|f| f.code())
                .collect::<Vec<_>>()
                .join(", ");
        }
    }
    result
}

/// URL-safe slug: lowercased ASCII alphanumerics with single dashes, suffixed
/// with a fragment of the id so two same-named companies never collide.
fn slugify(name: &str, id: Uuid) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars().flat_map(char::to_lowercase) {
        let mapped = match ch {
            'a'..='z' | '0'..='9' => Some(ch),
            'õ' | 'ö' | 'ó' | 'ò' => Some('o'),
            'ä' | 'á' | 'à' | 'å' => Some('a'),
            'ü' | 'ú' | 'ù' => Some('u'),
            'š' => Some('s'),
            'ž' => Some('z'),
            'é' | 'è' | 'ë' => Some('e'),
            _ => None,
        };
        match mapped {
            Some(c) => {
                slug.push(c);
                last_dash = false;
            }
            None if !last_dash => {
                slug.push('-');
                last_dash = true;
            }
            None => {}
        }
    }
    let slug = slug.trim_matches('-');
    let id_str = id.simple().to_string();
    let tail = &id_str[id_str.len() - 8..];
    if slug.is_empty() {
        tail.to_string()
    } else {
        format!("{}-{}", slug, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::{screen_descriptions, slugify};
    use crate::application::submit_company::dto::SubmitCompanyRequest;
    use crate::domain::moderation::verdict::CompanyFlag;
    use crate::infrastructure::moderation::content::BusinessContentRules;
    use uuid::Uuid;

    fn request(description_en: Option<&str>) -> SubmitCompanyRequest {
        SubmitCompanyRequest {
            name: "Tartu Ehitus OÜ".to_string(),
            registry_code: None,
            description_et: "Üldehitus ja renoveerimistööd Tartus ja Lõuna-Eestis.".to_string(),
            description_en: description_en.map(str::to_string),
            website: None,
            email: "info@tartuehitus.ee".to_string(),
            category: None,
            city: None,
        }
    }

    #[test]
    fn slugs_are_lowercase_dashed_and_suffixed() {
        let id = Uuid::now_v7();
        let slug = slugify("Tallinna Torutööd OÜ", id);
        assert!(slug.starts_with("tallinna-torutood-ou-"));
        assert!(!slug.contains("--"));
    }

    #[test]
    fn uppercase_diacritics_transliterate_instead_of_dashing() {
        let id = Uuid::now_v7();
        let slug = slugify("ÕHTUNE ÄRI OÜ", id);
        assert!(slug.starts_with("ohtune-ari-ou-"));
    }

    #[test]
    fn all_symbol_names_still_get_a_slug() {
        let id = Uuid::now_v7();
        let slug = slugify("!!!", id);
        assert_eq!(slug.len(), 8);
    }

    #[test]
    fn both_description_languages_are_screened() {
        let rules = BusinessContentRules::default();

        let clean = screen_descriptions(
            &request(Some("General construction and renovation in southern Estonia.")),
            &rules,
        );
        assert!(clean.approved);
        assert_eq!(clean.score, 100);

        let dirty = screen_descriptions(
            &request(Some("Guaranteed profit for every investor who joins us today.")),
            &rules,
        );
        assert!(!dirty.approved);
        assert_eq!(dirty.score, 40);
        assert_eq!(dirty.flags, vec![CompanyFlag::BlacklistedDescription]);
        assert_eq!(dirty.reason, "blacklisted_description");
    }

    #[test]
    fn missing_english_description_screens_estonian_only() {
        let result = screen_descriptions(&request(None), &BusinessContentRules::default());
        assert!(result.approved);
        assert_eq!(result.score, 100);
    }
}
