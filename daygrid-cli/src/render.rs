//! Terminal rendering for the calendar views.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use daygrid_core::conflict;
use daygrid_core::event::{Event, EventMap};
use daygrid_core::storage::{LocalStore, SEEN_WELCOME_KEY};
use owo_colors::OwoColorize;
use tracing::warn;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Print the onboarding banner once, then record the dismissal flag.
pub fn maybe_welcome(storage: &LocalStore) {
    if storage.contains(SEEN_WELCOME_KEY) {
        return;
    }

    println!(
        "{}",
        "Welcome! Add events with `daygrid add`; `daygrid watch` fires a popup & sound when they start."
            .yellow()
    );
    println!();

    if let Err(err) = storage.put(SEEN_WELCOME_KEY, "true") {
        warn!(error = %err, "failed to record welcome dismissal");
    }
}

/// Agenda view for one day: indices, time spans, and overlap highlighting.
pub fn day(date: NaiveDate, events: &[Event]) -> String {
    if events.is_empty() {
        return format!("  {}", format!("No events on {}", date).dimmed());
    }

    let flags = conflict::conflict_flags(events);
    let mut lines = vec![format!("  Events on {}", date)];

    for (index, (event, overlapping)) in events.iter().zip(flags).enumerate() {
        let mut line = format!(
            "  [{}] {}  {}  {}",
            index,
            event.time_span().dimmed(),
            event.title,
            event.color_or_default().dimmed()
        );
        if overlapping {
            line = format!("{} {}", line, "overlaps".red());
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// Month grid: one cell per day with its event count, `!` when any events
/// that day overlap each other.
pub fn month_grid(year: i32, month: u32, events: &EventMap) -> Result<String> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("Invalid month {}-{:02}", year, month))?;
    let days = days_in_month(first);
    let offset = first.weekday().num_days_from_sunday() as usize;

    let mut lines = vec![
        format!("  {}", first.format("%B %Y").bold()),
        format!("  {}", WEEKDAYS.map(|d| format!("{:<7}", d)).join("")),
    ];

    let mut row = "  ".to_string();
    for _ in 0..offset {
        row.push_str(&" ".repeat(7));
    }

    for day in 1..=days {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .with_context(|| format!("Invalid day {}-{:02}-{:02}", year, month, day))?;
        row.push_str(&cell(date, events));

        if date.weekday().num_days_from_sunday() == 6 {
            lines.push(row.trim_end().to_string());
            row = "  ".to_string();
        }
    }
    if !row.trim().is_empty() {
        lines.push(row.trim_end().to_string());
    }

    Ok(lines.join("\n"))
}

fn cell(date: NaiveDate, events: &EventMap) -> String {
    let day_events = events.get(&date).map_or(&[][..], Vec::as_slice);

    if day_events.is_empty() {
        return format!("{:>3}    ", date.day());
    }

    let overlapping = conflict::conflict_flags(day_events)
        .into_iter()
        .any(|flag| flag);

    // Pad before coloring so escape codes don't skew the column width.
    if overlapping {
        let count = format!("{:<2}", format!("·{}", day_events.len()));
        format!("{:>3} {}{}", date.day(), count.blue(), "!".red())
    } else {
        let count = format!("{:<3}", format!("·{}", day_events.len()));
        format!("{:>3} {}", date.day(), count.blue())
    }
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = match first.month() {
        12 => NaiveDate::from_ymd_opt(first.year() + 1, 1, 1),
        m => NaiveDate::from_ymd_opt(first.year(), m + 1, 1),
    };
    next.map_or(31, |next| next.signed_duration_since(first).num_days() as u32)
}
