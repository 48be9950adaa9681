use std::net::SocketAddr;

/// Default sender used when `EMAIL_FROM` is not set.
pub const DEFAULT_EMAIL_FROM: &str = "Valentine Bot <hello@0xb13.xyz>";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// Name shown on the card (`MY_VAL`), `None` when unset or blank
    pub my_valentine: Option<String>,

    /// Resend API key for email delivery
    pub resend_api_key: Option<String>,

    /// Resend API base URL
    pub resend_api_url: String,

    /// Email sender address
    pub email_from: String,

    /// Recipient of acceptance notifications
    pub notify_email: Option<String>,

    /// EmailJS service id
    pub emailjs_service_id: Option<String>,

    /// EmailJS template id
    pub emailjs_template_id: Option<String>,

    /// EmailJS public key (sent as `user_id`)
    pub emailjs_public_key: Option<String>,

    /// EmailJS private key (sent as `accessToken`), optional
    pub emailjs_private_key: Option<String>,

    /// EmailJS API base URL
    pub emailjs_api_url: String,

    /// Timeout for outbound email API calls in seconds (default: 10)
    pub notify_timeout_secs: u64,

    /// Maximum accepted request body size in bytes (default: 16 KiB)
    pub body_limit_bytes: usize,
}

/// Complete EmailJS settings, present only when every required field is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub to_email: String,
    pub api_url: String,
    /// Configured valentine name (`MY_VAL`), sent as `person_name`
    pub person_name: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("BIND_ADDR must be a valid socket address"))?,
            my_valentine: non_blank(std::env::var("MY_VAL").ok()),
            resend_api_key: non_blank(std::env::var("RESEND_API_KEY").ok()),
            resend_api_url: std::env::var("RESEND_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| DEFAULT_EMAIL_FROM.to_string()),
            notify_email: non_blank(std::env::var("NOTIFY_EMAIL").ok()),
            emailjs_service_id: non_blank(std::env::var("EMAILJS_SERVICE_ID").ok()),
            emailjs_template_id: non_blank(std::env::var("EMAILJS_TEMPLATE_ID").ok()),
            emailjs_public_key: non_blank(std::env::var("EMAILJS_PUBLIC_KEY").ok()),
            emailjs_private_key: non_blank(std::env::var("EMAILJS_PRIVATE_KEY").ok()),
            emailjs_api_url: std::env::var("EMAILJS_API_URL")
                .unwrap_or_else(|_| "https://api.emailjs.com".to_string()),
            notify_timeout_secs: std::env::var("NOTIFY_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("NOTIFY_TIMEOUT_SECS must be a valid u64"))?,
            body_limit_bytes: std::env::var("BODY_LIMIT_BYTES")
                .unwrap_or_else(|_| "16384".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("BODY_LIMIT_BYTES must be a valid usize"))?,
        })
    }

    /// EmailJS settings, if the channel is fully configured.
    pub fn emailjs(&self) -> Option<EmailJsConfig> {
        Some(EmailJsConfig {
            service_id: self.emailjs_service_id.clone()?,
            template_id: self.emailjs_template_id.clone()?,
            public_key: self.emailjs_public_key.clone()?,
            private_key: self.emailjs_private_key.clone(),
            to_email: self.notify_email.clone()?,
            api_url: self.emailjs_api_url.clone(),
            person_name: self.my_valentine.clone(),
        })
    }
}

/// Trim a value and drop it when nothing is left.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
