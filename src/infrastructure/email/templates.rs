//! HTML bodies for the subscription lifecycle notifications.

use crate::domain::company::entity::Company;
use chrono::{DateTime, Utc};

pub struct EmailContent {
    pub subject: String,
    pub html_body: String,
}

/// Reminder sent three days before a paid plan expires.
pub fn plan_expiry_reminder(company: &Company, expires_at: DateTime<Utc>) -> EmailContent {
    EmailContent {
        subject: format!("Teie {} pakett aegub peagi", plan_label(company)),
        html_body: format!(
            "<p>Tere!</p>\
             <p>Ettevõtte <strong>{}</strong> {} pakett aegub <strong>{}</strong>.</p>\
             <p>Paketi pikendamiseks logige sisse oma kontole. Pikendamata paketi \
             korral viiakse ettevõte automaatselt tasuta paketile ja lisaväljad \
             eemaldatakse profiililt.</p>\
             <p>Kontrollitud.ee</p>",
            company.name,
            plan_label(company),
            expires_at.format("%d.%m.%Y"),
        ),
    }
}

/// Notification sent after an expired plan has been downgraded to the free tier.
pub fn plan_downgraded(company: &Company) -> EmailContent {
    EmailContent {
        subject: "Teie pakett on aegunud".to_string(),
        html_body: format!(
            "<p>Tere!</p>\
             <p>Ettevõtte <strong>{}</strong> tasuline pakett on aegunud ja ettevõte \
             on viidud tasuta paketile. Profiili lisaväljad ja kontrollitud märgis \
             on eemaldatud.</p>\
             <p>Paketi saab igal hetkel uuesti aktiveerida oma kontolt.</p>\
             <p>Kontrollitud.ee</p>",
            company.name,
        ),
    }
}

fn plan_label(company: &Company) -> &'static str {
    use crate::domain::company::entity::SubscriptionLevel;
    match company.subscription_level {
        SubscriptionLevel::Basic => "tasuta",
        SubscriptionLevel::Pro => "Pro",
        SubscriptionLevel::Enterprise => "Enterprise",
    }
}
