//! Flag storage on top of the request's cookie jar.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use valentine_engine::flags::FlagStore;

/// Lifetime of the flag cookies. Matches what the page script writes.
pub const COOKIE_MAX_AGE: Duration = Duration::days(365);

/// Reads come from the request cookies. Writes become `Set-Cookie` headers
/// once the jar is returned as part of the response.
#[derive(Debug, Clone, Default)]
pub struct FlagCookies(CookieJar);

impl FlagCookies {
    pub fn new(jar: CookieJar) -> Self {
        Self(jar)
    }

    pub fn into_jar(self) -> CookieJar {
        self.0
    }
}

impl FlagStore for FlagCookies {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|c| c.value().to_string())
    }

    fn set(&mut self, key: &str, value: String) {
        let cookie = Cookie::build((key.to_string(), value))
            .path("/")
            .max_age(COOKIE_MAX_AGE)
            .same_site(SameSite::Lax);
        self.0 = std::mem::take(&mut self.0).add(cookie);
    }
}
