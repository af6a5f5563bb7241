//! The date-keyed event model.
//!
//! Events serialize with the camelCase field names of the persisted mapping
//! (`startTime`, `endTime`), and keep the legacy `time` field some seed
//! entries carry instead of `startTime`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DaygridError, DaygridResult};
use crate::time;

/// Fallback color for events that don't carry one.
pub const DEFAULT_COLOR: &str = "#6366f1";

/// The full calendar state: one insertion-ordered event list per day.
///
/// A date key is never present with an empty list; removing the last event
/// of a day removes the key.
pub type EventMap = BTreeMap<NaiveDate, Vec<Event>>;

/// A single timed calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,

    /// Start time as "HH:MM". Events created through the form always set
    /// this; some seed entries use `time` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// Legacy start field carried by older seed data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Optional end time as "HH:MM", strictly after the start when present.
    /// Absent means a zero-duration point event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    /// Display color; any string is accepted and stored as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Event {
    /// Build a form-style event with an explicit start time.
    pub fn timed(
        title: impl Into<String>,
        start: impl Into<String>,
        end: Option<String>,
        color: Option<String>,
    ) -> Self {
        Event {
            title: title.into(),
            start_time: Some(start.into()),
            time: None,
            end_time: end.filter(|e| !e.is_empty()),
            color,
        }
    }

    /// The effective start label: `startTime`, falling back to `time`.
    pub fn start_label(&self) -> Option<&str> {
        self.start_time.as_deref().or(self.time.as_deref())
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    /// "09:00" or "09:00 - 10:30", for display.
    pub fn time_span(&self) -> String {
        let start = self.start_label().unwrap_or("--:--");
        match self.end_time.as_deref() {
            Some(end) => format!("{start} - {end}"),
            None => start.to_string(),
        }
    }
}

/// Validate form input before it becomes an event.
///
/// Blocking errors, surfaced synchronously: nothing is mutated when this
/// fails. The soft conflict check is separate and advisory.
pub fn validate_new_event(title: &str, start: &str, end: Option<&str>) -> DaygridResult<()> {
    if title.trim().is_empty() || start.trim().is_empty() {
        return Err(DaygridError::Validation(
            "please provide an event title and start time".to_string(),
        ));
    }

    let start_minutes = time::to_minutes(start)?;

    if let Some(end) = end.filter(|e| !e.is_empty()) {
        if time::to_minutes(end)? <= start_minutes {
            return Err(DaygridError::Validation(
                "end time must be after start time".to_string(),
            ));
        }
    }

    Ok(())
}
