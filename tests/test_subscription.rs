use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use kontrollitud::domain::company::entity::{Company, SubmissionStatus, SubscriptionLevel};
use kontrollitud::domain::company::repository::CompanyRepository;
use kontrollitud::domain::shared::{errors::DomainError, pagination::PaginationRequest};
use kontrollitud::infrastructure::email::mailer::Mailer;
use kontrollitud::workers::subscription_checker::SubscriptionCheckWorker;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use uuid::Uuid;

struct FakeCompanyRepository {
    companies: Mutex<Vec<Company>>,
}

impl FakeCompanyRepository {
    fn new(companies: Vec<Company>) -> Self {
        Self {
            companies: Mutex::new(companies),
        }
    }

    fn get(&self, id: Uuid) -> Company {
        self.companies
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .expect("company in fake store")
    }
}

#[async_trait]
impl CompanyRepository for FakeCompanyRepository {
    async fn create(&self, company: &Company) -> Result<Company, DomainError> {
        self.companies.lock().unwrap().push(company.clone());
        Ok(company.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_public(&self, _page: &PaginationRequest) -> Result<Vec<Company>, DomainError> {
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.status.is_public())
            .cloned()
            .collect())
    }

    async fn list_moderation_queue(
        &self,
        _page: &PaginationRequest,
    ) -> Result<Vec<Company>, DomainError> {
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.status.needs_moderation())
            .cloned()
            .collect())
    }

    async fn set_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), DomainError> {
        let mut companies = self.companies.lock().unwrap();
        let company = companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound("Company not found".to_string()))?;
        company.status = status;
        Ok(())
    }

    async fn find_expiring_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Company>, DomainError> {
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                c.subscription_level.is_paid()
                    && !c.plan_reminder_sent
                    && c.plan_expires_at
                        .map(|e| e >= from && e < to)
                        .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<Company>, DomainError> {
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                c.subscription_level.is_paid()
                    && c.plan_expires_at.map(|e| e < now).unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn mark_reminder_sent(&self, id: Uuid) -> Result<(), DomainError> {
        let mut companies = self.companies.lock().unwrap();
        if let Some(company) = companies.iter_mut().find(|c| c.id == id) {
            company.plan_reminder_sent = true;
        }
        Ok(())
    }

    async fn downgrade_to_basic(&self, id: Uuid, now: DateTime<Utc>) -> Result<(), DomainError> {
        let mut companies = self.companies.lock().unwrap();
        if let Some(company) = companies.iter_mut().find(|c| c.id == id) {
            company.subscription_level = SubscriptionLevel::Basic;
            company.is_verified = false;
            company.plan_downgraded_at = Some(now);
            company.plan_reminder_sent = false;
            company.image_url = None;
            company.tiktok_url = None;
            company.instagram_url = None;
            company.youtube_url = None;
            company.blog_article_url = None;
        }
        Ok(())
    }

    async fn apply_payment(
        &self,
        id: Uuid,
        level: SubscriptionLevel,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut companies = self.companies.lock().unwrap();
        if let Some(company) = companies.iter_mut().find(|c| c.id == id) {
            company.subscription_level = level;
            company.plan_expires_at = Some(expires_at);
            company.plan_reminder_sent = false;
            company.plan_downgraded_at = None;
            company.is_verified = true;
        }
        Ok(())
    }
}

struct FakeMailer {
    fail: AtomicBool,
    sent: Mutex<Vec<(String, String)>>,
}

impl FakeMailer {
    fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent_to(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(to, _)| to.clone())
            .collect()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("provider down");
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

fn paid_company(name: &str, expires_in: Duration, now: DateTime<Utc>) -> Company {
    Company {
        id: Uuid::now_v7(),
        name: name.to_string(),
        slug: format!("{}-test", name.to_lowercase()),
        registry_code: None,
        description_et: Some("Testettevõte tasulise paketiga".to_string()),
        description_en: None,
        website: None,
        email: format!("{}@example.ee", name.to_lowercase()),
        category: None,
        city: None,
        owner_id: Uuid::now_v7(),
        status: SubmissionStatus::Approved,
        trust_score: 100,
        moderation_flags: vec![],
        subscription_level: SubscriptionLevel::Pro,
        plan_expires_at: Some(now + expires_in),
        plan_reminder_sent: false,
        plan_downgraded_at: None,
        is_verified: true,
        image_url: Some("https://cdn.example.ee/img.png".to_string()),
        tiktok_url: None,
        instagram_url: Some("https://instagram.com/test".to_string()),
        youtube_url: None,
        blog_article_url: Some("https://blog.example.ee/artikkel".to_string()),
        created_at: now - Duration::days(100),
        updated_at: now - Duration::days(1),
    }
}

fn worker(
    repo: Arc<FakeCompanyRepository>,
    mailer: Arc<FakeMailer>,
) -> SubscriptionCheckWorker {
    SubscriptionCheckWorker::new(repo, mailer, 86_400, 2)
}

#[tokio::test]
async fn reminders_cover_exactly_the_three_day_window() {
    let now = Utc::now();
    let inside = paid_company("sees", Duration::days(3) + Duration::hours(2), now);
    let too_soon = paid_company("vara", Duration::days(2) + Duration::hours(23), now);
    let too_late = paid_company("hilja", Duration::days(4) + Duration::minutes(1), now);
    let inside_id = inside.id;

    let repo = Arc::new(FakeCompanyRepository::new(vec![inside, too_soon, too_late]));
    let mailer = Arc::new(FakeMailer::new());
    let w = worker(repo.clone(), mailer.clone());

    let matched = w.send_expiration_reminders(now).await;
    assert_eq!(matched, 1);
    assert_eq!(mailer.sent_to(), vec!["sees@example.ee".to_string()]);
    assert!(repo.get(inside_id).plan_reminder_sent);
}

#[tokio::test]
async fn already_reminded_companies_are_not_reminded_again() {
    let now = Utc::now();
    let mut company = paid_company("korra", Duration::days(3) + Duration::hours(1), now);
    company.plan_reminder_sent = true;

    let repo = Arc::new(FakeCompanyRepository::new(vec![company]));
    let mailer = Arc::new(FakeMailer::new());
    let w = worker(repo, mailer.clone());

    assert_eq!(w.send_expiration_reminders(now).await, 0);
    assert!(mailer.sent_to().is_empty());
}

#[tokio::test]
async fn failed_reminder_email_leaves_the_flag_unset_for_retry() {
    let now = Utc::now();
    let company = paid_company("katki", Duration::days(3) + Duration::hours(1), now);
    let id = company.id;

    let repo = Arc::new(FakeCompanyRepository::new(vec![company]));
    let mailer = Arc::new(FakeMailer::new());
    mailer.fail.store(true, Ordering::SeqCst);
    let w = worker(repo.clone(), mailer.clone());

    // the company still counts as matched, but stays eligible next pass
    assert_eq!(w.send_expiration_reminders(now).await, 1);
    assert!(!repo.get(id).plan_reminder_sent);
}

#[tokio::test]
async fn expired_plans_are_downgraded_and_stripped_of_tier_fields() {
    let now = Utc::now();
    let company = paid_company("aegunud", Duration::hours(-1), now);
    let id = company.id;

    let repo = Arc::new(FakeCompanyRepository::new(vec![company]));
    let mailer = Arc::new(FakeMailer::new());
    let w = worker(repo.clone(), mailer.clone());

    assert_eq!(w.downgrade_expired_subscriptions(now).await, 1);

    let downgraded = repo.get(id);
    assert_eq!(downgraded.subscription_level, SubscriptionLevel::Basic);
    assert!(!downgraded.is_verified);
    assert_eq!(downgraded.plan_downgraded_at, Some(now));
    assert!(!downgraded.plan_reminder_sent);
    assert!(downgraded.image_url.is_none());
    assert!(downgraded.instagram_url.is_none());
    assert!(downgraded.blog_article_url.is_none());
    assert_eq!(mailer.sent_to(), vec!["aegunud@example.ee".to_string()]);
}

#[tokio::test]
async fn downgrade_is_idempotent_across_passes() {
    let now = Utc::now();
    let company = paid_company("topelt", Duration::hours(-2), now);

    let repo = Arc::new(FakeCompanyRepository::new(vec![company]));
    let mailer = Arc::new(FakeMailer::new());
    let w = worker(repo, mailer);

    assert_eq!(w.downgrade_expired_subscriptions(now).await, 1);
    assert_eq!(w.downgrade_expired_subscriptions(now).await, 0);
}

#[tokio::test]
async fn dead_email_provider_does_not_block_downgrades() {
    let now = Utc::now();
    let company = paid_company("pime", Duration::hours(-1), now);
    let id = company.id;

    let repo = Arc::new(FakeCompanyRepository::new(vec![company]));
    let mailer = Arc::new(FakeMailer::new());
    mailer.fail.store(true, Ordering::SeqCst);
    let w = worker(repo.clone(), mailer);

    assert_eq!(w.downgrade_expired_subscriptions(now).await, 1);
    assert_eq!(repo.get(id).subscription_level, SubscriptionLevel::Basic);
}

#[tokio::test]
async fn payment_after_downgrade_rearms_the_reminder() {
    let now = Utc::now();
    let company = paid_company("tagasi", Duration::hours(-1), now);
    let id = company.id;

    let repo = Arc::new(FakeCompanyRepository::new(vec![company]));
    let mailer = Arc::new(FakeMailer::new());
    let w = worker(repo.clone(), mailer);

    assert_eq!(w.downgrade_expired_subscriptions(now).await, 1);

    let new_expiry = now + Duration::days(30);
    repo.apply_payment(id, SubscriptionLevel::Enterprise, new_expiry)
        .await
        .unwrap();

    let renewed = repo.get(id);
    assert_eq!(renewed.subscription_level, SubscriptionLevel::Enterprise);
    assert_eq!(renewed.plan_expires_at, Some(new_expiry));
    assert!(!renewed.plan_reminder_sent);
    assert!(renewed.plan_downgraded_at.is_none());
    assert!(renewed.is_verified);
}

#[tokio::test(start_paused = true)]
async fn slow_email_provider_counts_as_a_failed_send() {
    struct SlowMailer;

    #[async_trait]
    impl Mailer for SlowMailer {
        async fn send(&self, _to: &str, _subject: &str, _html_body: &str) -> anyhow::Result<()> {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            Ok(())
        }
    }

    let now = Utc::now();
    let company = paid_company("aeglane", Duration::days(3) + Duration::hours(1), now);
    let id = company.id;

    let repo = Arc::new(FakeCompanyRepository::new(vec![company]));
    let w = SubscriptionCheckWorker::new(repo.clone(), Arc::new(SlowMailer), 86_400, 2);

    assert_eq!(w.send_expiration_reminders(now).await, 1);
    assert!(!repo.get(id).plan_reminder_sent);
}

#[tokio::test]
async fn run_once_does_reminders_then_downgrades() {
    let now = Utc::now();
    let expiring = paid_company("meenutus", Duration::days(3) + Duration::hours(6), now);
    let expired = paid_company("aegus", Duration::hours(-3), now);

    let repo = Arc::new(FakeCompanyRepository::new(vec![expiring, expired]));
    let mailer = Arc::new(FakeMailer::new());
    let w = worker(repo, mailer.clone());

    let summary = w.run_once().await;
    assert_eq!(summary.reminders_sent, 1);
    assert_eq!(summary.downgraded, 1);
    assert_eq!(mailer.sent_to().len(), 2);
}
