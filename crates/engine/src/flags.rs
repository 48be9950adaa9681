//! Client-persisted flags and their type-coercing readers.
//!
//! The browser keeps two values under fixed keys. They are plain strings on
//! the wire, so every read coerces and falls back when the value is missing
//! or unreadable.

use std::collections::BTreeMap;

pub const ACCEPTED_KEY: &str = "val_accepted_v1";
pub const NO_COUNT_KEY: &str = "val_noCount_v1";

/// A string key/value store the flags are persisted in.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// `"true"` is true, any other stored text is false, absent is `fallback`.
pub fn read_bool(store: &impl FlagStore, key: &str, fallback: bool) -> bool {
    match store.get(key) {
        None => fallback,
        Some(v) => v == "true",
    }
}

/// Leading-integer parse of the stored text, `fallback` when absent or when
/// no digits lead the value.
pub fn read_int(store: &impl FlagStore, key: &str, fallback: i64) -> i64 {
    store
        .get(key)
        .and_then(|v| parse_int_prefix(&v))
        .unwrap_or(fallback)
}

/// Parse an optionally signed decimal integer at the start of `s`, ignoring
/// leading whitespace and anything after the digits. Saturates on overflow.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    })
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}
