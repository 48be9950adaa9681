//! Resend HTTP API client (`POST /emails`).

use std::time::Duration;

use serde::Serialize;

use valentine_common::types::Acceptance;

use crate::error::NotifyError;
use crate::mailer::{Mailer, SendFuture};
use crate::message::{SUBJECT, render_text};

/// Request body of `POST /emails`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResendEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

pub struct ResendMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
    to: String,
}

impl ResendMailer {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            from: from.into(),
            to: to.into(),
        })
    }

    pub fn email_for(&self, acceptance: &Acceptance) -> ResendEmail {
        ResendEmail {
            from: self.from.clone(),
            to: vec![self.to.clone()],
            subject: SUBJECT.to_string(),
            text: render_text(acceptance),
        }
    }

    async fn deliver(&self, acceptance: &Acceptance) -> Result<(), NotifyError> {
        let email = self.email_for(acceptance);
        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                provider: "resend",
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(
            valentine = %acceptance.valentine,
            no_count = acceptance.no_count,
            "Acceptance email sent via Resend"
        );
        Ok(())
    }
}

impl Mailer for ResendMailer {
    fn name(&self) -> &'static str {
        "resend"
    }

    fn send<'a>(&'a self, acceptance: &'a Acceptance) -> SendFuture<'a> {
        Box::pin(self.deliver(acceptance))
    }
}
