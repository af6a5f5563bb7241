use anyhow::Result;
use chrono::NaiveDate;
use daygrid_core::store::EventStore;
use owo_colors::OwoColorize;

pub fn run(store: &mut EventStore, date: NaiveDate, index: usize) -> Result<()> {
    let title = store
        .events_on(date)
        .get(index)
        .map(|event| event.title.clone());

    store.remove(date, index)?;

    let title = title.unwrap_or_default();
    println!(
        "{}",
        format!("  Removed: {} from {}", title, date).green()
    );

    if store.events_on(date).is_empty() {
        println!("{}", format!("  {} has no events left.", date).dimmed());
    }

    Ok(())
}
