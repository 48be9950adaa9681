//! Email content for an acceptance.

use chrono::SecondsFormat;
use serde::Serialize;

use valentine_common::types::Acceptance;

pub const SUBJECT: &str = "Happy Valentine's 🌹";

/// EmailJS `person_name` when no valentine name is configured.
pub const UNKNOWN_PERSON: &str = "Unknown";

/// Plain-text body of the notification email.
pub fn render_text(acceptance: &Acceptance) -> String {
    let meta = &acceptance.metadata;
    format!(
        "Hello there,\n\
         \n\
         {name}😍💘 accepted your proposal! Hurrayyy!!\n\
         \n\
         They said no {no_count} times.\n\
         \n\
         Time: {time}\n\
         \n\
         Regards,\n\
         Cupid\n\
         \n\
         --- Metadata ---\n\
         IP: {ip}\n\
         Geo: {city}, {region}, {country} ({postal})\n\
         UA: {ua}\n\
         Lang: {lang}\n",
        name = acceptance.valentine,
        no_count = acceptance.no_count,
        time = acceptance.local_time,
        ip = meta.ip,
        city = meta.city,
        region = meta.region,
        country = meta.country,
        postal = meta.postal,
        ua = meta.user_agent,
        lang = meta.language,
    )
}

/// Variables handed to the EmailJS template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub to_email: String,
    pub person_name: String,
    pub no_count: String,
    pub timestamp: String,
}

impl TemplateParams {
    /// `person_name` is the configured valentine name, not the request's,
    /// so an unnamed card reports `"Unknown"`.
    pub fn new(acceptance: &Acceptance, to_email: &str, person_name: Option<&str>) -> Self {
        Self {
            to_email: to_email.to_string(),
            person_name: person_name
                .filter(|n| !n.is_empty())
                .unwrap_or(UNKNOWN_PERSON)
                .to_string(),
            no_count: acceptance.no_count.to_string(),
            timestamp: acceptance
                .received_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
