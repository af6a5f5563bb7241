//! Overlap detection against a day's events.

use crate::event::Event;
use crate::time;

/// Whether a candidate interval overlaps any existing event on the day.
///
/// Advisory only: the caller warns the user, who may insert anyway. A
/// missing end means a zero-duration candidate at its start.
pub fn has_conflict(existing: &[Event], start: &str, end: Option<&str>) -> bool {
    let candidate = Event {
        title: String::new(),
        start_time: Some(start.to_string()),
        time: None,
        end_time: end.filter(|e| !e.is_empty()).map(str::to_string),
        color: None,
    };

    existing.iter().any(|event| time::overlaps(&candidate, event))
}

/// One flag per event: true iff it overlaps at least one OTHER event in the
/// list (self excluded). Derived on every read, never stored.
pub fn conflict_flags(events: &[Event]) -> Vec<bool> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            events
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && time::overlaps(event, other))
        })
        .collect()
}
