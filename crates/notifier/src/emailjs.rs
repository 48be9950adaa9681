//! EmailJS REST client (`POST /api/v1.0/email/send`).
//!
//! Server-side calls need "Allow EmailJS API for non-browser applications"
//! enabled on the account; the private key is sent as `accessToken` when set.

use std::time::Duration;

use serde::Serialize;

use valentine_common::config::EmailJsConfig;
use valentine_common::types::Acceptance;

use crate::error::NotifyError;
use crate::mailer::{Mailer, SendFuture};
use crate::message::TemplateParams;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailJsRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub template_params: TemplateParams,
}

pub struct EmailJsMailer {
    client: reqwest::Client,
    config: EmailJsConfig,
}

impl EmailJsMailer {
    pub fn new(config: EmailJsConfig, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn request_for(&self, acceptance: &Acceptance) -> EmailJsRequest {
        EmailJsRequest {
            service_id: self.config.service_id.clone(),
            template_id: self.config.template_id.clone(),
            user_id: self.config.public_key.clone(),
            access_token: self.config.private_key.clone(),
            template_params: TemplateParams::new(
                acceptance,
                &self.config.to_email,
                self.config.person_name.as_deref(),
            ),
        }
    }

    async fn deliver(&self, acceptance: &Acceptance) -> Result<(), NotifyError> {
        let url = format!(
            "{}/api/v1.0/email/send",
            self.config.api_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .json(&self.request_for(acceptance))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                provider: "emailjs",
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(valentine = %acceptance.valentine, "Acceptance email sent via EmailJS");
        Ok(())
    }
}

impl Mailer for EmailJsMailer {
    fn name(&self) -> &'static str {
        "emailjs"
    }

    fn send<'a>(&'a self, acceptance: &'a Acceptance) -> SendFuture<'a> {
        Box::pin(self.deliver(acceptance))
    }
}
