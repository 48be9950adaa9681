//! Card state: has the visitor said yes, and how often did they say no.

use serde::{Deserialize, Serialize};

use crate::flags::{ACCEPTED_KEY, FlagStore, NO_COUNT_KEY, read_bool, read_int};

/// Text under the buttons while the question is still open.
pub const HINT: &str = "“No” seems a bit harsh, no? 😈";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    pub accepted: bool,
    pub no_count: i64,
}

impl CardState {
    /// Read both flags, falling back to a fresh card.
    pub fn load(store: &impl FlagStore) -> Self {
        Self {
            accepted: read_bool(store, ACCEPTED_KEY, false),
            no_count: read_int(store, NO_COUNT_KEY, 0),
        }
    }

    pub fn save(&self, store: &mut impl FlagStore) {
        store.set(ACCEPTED_KEY, self.accepted.to_string());
        store.set(NO_COUNT_KEY, self.no_count.to_string());
    }

    pub fn accept(&mut self) {
        self.accepted = true;
    }

    pub fn record_no(&mut self) {
        self.no_count = self.no_count.saturating_add(1);
    }

    /// Heading for the current state. Blank names count as no name.
    pub fn heading(&self, name: Option<&str>) -> String {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        match (self.accepted, name) {
            (false, Some(name)) => format!("{}, will you be my valentine?", name),
            (false, None) => "Will you be my valentine?".to_string(),
            (true, Some(name)) => format!("Hey there, {}🦋💖, my valentine!🌹", name),
            (true, None) => "Hey there, my valentine!".to_string(),
        }
    }
}
