//! Fan-out of one acceptance to the configured email channels.

use std::sync::Arc;
use std::time::Duration;

use valentine_common::config::AppConfig;
use valentine_common::types::Acceptance;

use crate::emailjs::EmailJsMailer;
use crate::error::NotifyError;
use crate::mailer::{Mailer, Unconfigured};
use crate::resend::ResendMailer;

/// Sends through the primary mailer and reports its outcome. Secondary
/// mailers run detached; their failures are only logged.
pub struct Dispatcher {
    primary: Arc<dyn Mailer>,
    secondary: Vec<Arc<dyn Mailer>>,
}

impl Dispatcher {
    pub fn new(primary: Arc<dyn Mailer>, secondary: Vec<Arc<dyn Mailer>>) -> Self {
        Self { primary, secondary }
    }

    /// Resend as primary, EmailJS as secondary when fully configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        let timeout = Duration::from_secs(config.notify_timeout_secs);

        let primary: Arc<dyn Mailer> = match (&config.resend_api_key, &config.notify_email) {
            (Some(key), Some(to)) => Arc::new(ResendMailer::new(
                config.resend_api_url.as_str(),
                key.as_str(),
                config.email_from.as_str(),
                to.as_str(),
                timeout,
            )?),
            _ => {
                tracing::warn!("RESEND_API_KEY or NOTIFY_EMAIL not set; notifications will fail");
                Arc::new(Unconfigured::new("resend"))
            }
        };

        let mut secondary: Vec<Arc<dyn Mailer>> = Vec::new();
        if let Some(emailjs) = config.emailjs() {
            secondary.push(Arc::new(EmailJsMailer::new(emailjs, timeout)?));
        }

        tracing::info!(
            primary = primary.name(),
            secondary = secondary.len(),
            "Notification dispatcher ready"
        );
        Ok(Self::new(primary, secondary))
    }

    #[cfg(test)]
    fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    #[cfg(test)]
    fn secondary_count(&self) -> usize {
        self.secondary.len()
    }

    pub async fn deliver(&self, acceptance: &Acceptance) -> Result<(), NotifyError> {
        for mailer in &self.secondary {
            let mailer = Arc::clone(mailer);
            let acceptance = acceptance.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send(&acceptance).await {
                    tracing::warn!(
                        mailer = mailer.name(),
                        error = %e,
                        "Best-effort notification failed"
                    );
                }
            });
        }

        self.primary.send(acceptance).await.inspect_err(|e| {
            tracing::error!(mailer = self.primary.name(), error = %e, "Notification failed");
        })
    }
}
