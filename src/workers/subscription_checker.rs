//! Subscription lifecycle worker.
//!
//! Runs on a fixed interval (daily in production) and performs two passes over
//! paid listings: expiry reminders, then downgrades. Both passes are also
//! reachable through the admin trigger endpoint; a `try_lock` guard keeps a
//! manual trigger from overlapping a scheduled run.
//!
//! Downgrades persist before the notification email goes out, so a dead email
//! provider can never leave an expired plan active. Reminders work the other
//! way round: the flag is only set after a successful send, so a failed
//! reminder is retried on the next pass.

use crate::{
    domain::company::{entity::Company, repository::CompanyRepository},
    infrastructure::email::{mailer::Mailer, templates},
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Days before expiry at which the reminder window opens.
pub const REMINDER_LEAD_DAYS: i64 = 3;

/// Counts from one lifecycle pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub reminders_sent: usize,
    pub downgraded: usize,
}

pub struct SubscriptionCheckWorker {
    companies: Arc<dyn CompanyRepository>,
    mailer: Arc<dyn Mailer>,
    interval_seconds: u64,
    email_timeout: std::time::Duration,
    run_guard: Mutex<()>,
}

impl SubscriptionCheckWorker {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        mailer: Arc<dyn Mailer>,
        interval_seconds: u64,
        email_timeout_seconds: u64,
    ) -> Self {
        Self {
            companies,
            mailer,
            interval_seconds: interval_seconds.max(60),
            email_timeout: std::time::Duration::from_secs(email_timeout_seconds.max(1)),
            run_guard: Mutex::new(()),
        }
    }

    pub async fn start(&self) {
        loop {
            self.run_once().await;
            tokio::time::sleep(std::time::Duration::from_secs(self.interval_seconds)).await;
        }
    }

    /// One full lifecycle pass: reminders first, then downgrades. Returns zero
    /// counts without doing anything when another pass holds the guard.
    pub async fn run_once(&self) -> RunSummary {
        let Ok(_guard) = self.run_guard.try_lock() else {
            warn!("subscription check already running, skipping");
            return RunSummary::default();
        };

        let started = std::time::Instant::now();
        let now = Utc::now();
        let summary = RunSummary {
            reminders_sent: self.send_expiration_reminders(now).await,
            downgraded: self.downgrade_expired_subscriptions(now).await,
        };
        info!(
            reminders = summary.reminders_sent,
            downgraded = summary.downgraded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "subscription check complete"
        );
        summary
    }

    /// Remind owners whose paid plan expires in the `[now+3d, now+4d)` window
    /// and who have not been reminded this period. The flag is only set after
    /// the email goes out, so failures retry on the next pass. Returns the
    /// number of matched companies, not successful sends.
    pub async fn send_expiration_reminders(&self, now: DateTime<Utc>) -> usize {
        let (from, to) = reminder_window(now);
        let expiring = match self.companies.find_expiring_between(from, to).await {
            Ok(companies) => companies,
            Err(e) => {
                error!("reminder query failed: {}", e);
                return 0;
            }
        };

        for company in &expiring {
            let Some(expires_at) = company.plan_expires_at else {
                continue;
            };
            let email = templates::plan_expiry_reminder(company, expires_at);
            if self.send(company, &email.subject, &email.html_body).await {
                if let Err(e) = self.companies.mark_reminder_sent(company.id).await {
                    error!(company_id = %company.id, "failed to mark reminder sent: {}", e);
                }
            }
        }
        expiring.len()
    }

    /// Downgrade every paid listing whose plan has expired. The database write
    /// happens before the notification email; a failed email never blocks or
    /// rolls back the downgrade. Returns the number of downgraded companies.
    pub async fn downgrade_expired_subscriptions(&self, now: DateTime<Utc>) -> usize {
        let expired = match self.companies.find_expired(now).await {
            Ok(companies) => companies,
            Err(e) => {
                error!("expired plan query failed: {}", e);
                return 0;
            }
        };

        let mut downgraded = 0usize;
        for company in &expired {
            if let Err(e) = self.companies.downgrade_to_basic(company.id, now).await {
                error!(company_id = %company.id, "downgrade failed: {}", e);
                continue;
            }
            downgraded += 1;
            info!(company_id = %company.id, level = ?company.subscription_level, "plan downgraded to basic");

            let email = templates::plan_downgraded(company);
            self.send(company, &email.subject, &email.html_body).await;
        }
        downgraded
    }

    /// Send with a hard timeout; a timeout counts as a failed send.
    async fn send(&self, company: &Company, subject: &str, html_body: &str) -> bool {
        let send = self.mailer.send(&company.email, subject, html_body);
        match tokio::time::timeout(self.email_timeout, send).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!(company_id = %company.id, "notification email failed: {}", e);
                false
            }
            Err(_) => {
                warn!(company_id = %company.id, "notification email timed out");
                false
            }
        }
    }
}

/// The reminder window `[now + 3 days, now + 4 days)`.
pub fn reminder_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        now + Duration::days(REMINDER_LEAD_DAYS),
        now + Duration::days(REMINDER_LEAD_DAYS + 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_window_is_one_day_wide() {
        let now = Utc::now();
        let (from, to) = reminder_window(now);
        assert_eq!(from, now + Duration::days(3));
        assert_eq!(to - from, Duration::days(1));
    }
}
