//! Outbound transactional email.
//!
//! Delivery goes through an HTTP email API rather than raw SMTP; the provider
//! is configured with `EMAIL_API_URL` and `EMAIL_API_KEY`. The trait keeps the
//! subscription worker testable without a network.

use async_trait::async_trait;
use serde::Serialize;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    from: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: Option<String>, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()> {
        let mut request = self.client.post(&self.api_url).json(&SendRequest {
            from: &self.from,
            to,
            subject,
            html: html_body,
        });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("email API returned {}: {}", status, body);
        }
        Ok(())
    }
}
