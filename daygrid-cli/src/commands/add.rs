use anyhow::Result;
use chrono::NaiveDate;
use daygrid_core::conflict;
use daygrid_core::event::{self, Event};
use daygrid_core::store::EventStore;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

pub fn run(
    store: &mut EventStore,
    date: NaiveDate,
    title: String,
    start: String,
    end: Option<String>,
    color: String,
    yes: bool,
) -> Result<()> {
    // Blocking validation: nothing is mutated when this fails.
    event::validate_new_event(&title, &start, end.as_deref())?;

    // Soft conflict: advisory only, the user may add anyway.
    if conflict::has_conflict(store.events_on(date), &start, end.as_deref()) {
        println!(
            "{}",
            "This event overlaps with an existing event.".yellow()
        );
        if !yes {
            let proceed = Confirm::new()
                .with_prompt("  Add anyway?")
                .default(false)
                .interact()?;
            if !proceed {
                println!("{}", "  Not added.".dimmed());
                return Ok(());
            }
        }
    }

    let event = Event::timed(title, start, end, Some(color));
    let span = event.time_span();
    let summary = event.title.clone();
    store.add(date, event);

    println!(
        "{}",
        format!("  Added: {} on {} ({})", summary, date, span).green()
    );
    Ok(())
}
