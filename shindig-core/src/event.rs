//! The singleton event record.
//!
//! The event datetime is stored as the string the `datetime-local` form
//! input submits (`YYYY-MM-DDTHH:MM`). It is parsed at render time so that
//! a malformed value degrades to placeholder text instead of an error.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// The upcoming event shown on the public page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    /// ISO-8601 local datetime, e.g. `2026-09-12T18:00`
    pub datetime: String,
    pub location: String,
    pub description: String,
    /// Older event files may predate this field
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Default for Event {
    fn default() -> Self {
        Event {
            title: "Our next gathering".to_string(),
            datetime: "2030-01-01T18:00".to_string(),
            location: "To be announced".to_string(),
            description: "Details coming soon.".to_string(),
            active: true,
        }
    }
}

impl Event {
    /// Parse the stored datetime, tolerating an optional seconds part.
    pub fn parsed_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.datetime, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.datetime, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }

    pub fn formatted_date(&self) -> String {
        match self.parsed_datetime() {
            Some(dt) => dt.format("%A, %-d %B %Y").to_string(),
            None => "Invalid date".to_string(),
        }
    }

    pub fn formatted_time(&self) -> String {
        match self.parsed_datetime() {
            Some(dt) => dt.format("%H:%M").to_string(),
            None => "Invalid time".to_string(),
        }
    }

    /// Whole days between today and the event date. Negative means the
    /// event is in the past; `None` means the datetime did not parse.
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        let event_date = self.parsed_datetime()?.date();
        Some((event_date - today).num_days())
    }
}
