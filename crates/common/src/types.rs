use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name used when the request does not say who accepted.
pub const DEFAULT_VALENTINE: &str = "Jane Doe";

/// Placeholder for metadata the request did not carry.
pub const UNKNOWN: &str = "unknown";

/// Body of `POST /api/notify`. Every field is optional.
///
/// `noCount` is taken as any JSON value and coerced by [`no_count_from`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    #[serde(default)]
    pub my_valentine: Option<String>,
    #[serde(default)]
    pub no_count: Option<Value>,
    #[serde(default)]
    pub local_time: Option<String>,
}

/// Client details taken from request headers, for the email footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    pub ip: String,
    pub user_agent: String,
    pub language: String,
    pub country: String,
    pub region: String,
    pub city: String,
    pub postal: String,
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self {
            ip: UNKNOWN.to_string(),
            user_agent: UNKNOWN.to_string(),
            language: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            postal: UNKNOWN.to_string(),
        }
    }
}

impl RequestMetadata {
    /// Extract metadata from proxy and browser headers.
    ///
    /// The client IP is the first entry of `x-forwarded-for`. Geo fields come
    /// from the edge network's `x-vercel-ip-*` headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let ip = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(',').next().unwrap_or_default().trim().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            ip,
            user_agent: header_or_unknown(headers, "user-agent"),
            language: header_or_unknown(headers, "accept-language"),
            country: header_or_unknown(headers, "x-vercel-ip-country"),
            region: header_or_unknown(headers, "x-vercel-ip-country-region"),
            city: header_or_unknown(headers, "x-vercel-ip-city"),
            postal: header_or_unknown(headers, "x-vercel-ip-postal-code"),
        }
    }
}

fn header_or_unknown(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// A visitor said yes. Request fields with defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acceptance {
    pub valentine: String,
    pub no_count: i64,
    pub local_time: String,
    pub metadata: RequestMetadata,
    pub received_at: DateTime<Utc>,
}

impl Acceptance {
    pub fn from_request(
        request: NotifyRequest,
        metadata: RequestMetadata,
        received_at: DateTime<Utc>,
    ) -> Self {
        let valentine = request
            .my_valentine
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VALENTINE.to_string());
        let local_time = request
            .local_time
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| received_at.format("%d %b %Y, %H:%M").to_string());

        Self {
            valentine,
            no_count: request.no_count.as_ref().map_or(0, no_count_from),
            local_time,
            metadata,
            received_at,
        }
    }
}

/// Integers pass through, floats truncate, numeric strings parse.
/// Anything else counts as zero.
pub fn no_count_from(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}
