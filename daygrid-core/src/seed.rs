//! Seed data: the fetched JSON array of date-tagged events.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::event::{Event, EventMap};

/// One element of the seed resource: an event plus the date it belongs to.
///
/// Older seed data uses `time` instead of `startTime`; both are kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedEntry {
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl SeedEntry {
    pub fn into_event(self) -> Event {
        Event {
            title: self.title,
            start_time: self.start_time,
            time: self.time,
            end_time: self.end_time,
            color: self.color,
        }
    }
}

/// Group seed entries into per-day lists, preserving input order within
/// each day.
pub fn group_by_date(entries: Vec<SeedEntry>) -> EventMap {
    let mut grouped = EventMap::new();
    for entry in entries {
        grouped
            .entry(entry.date)
            .or_default()
            .push(entry.into_event());
    }
    grouped
}
