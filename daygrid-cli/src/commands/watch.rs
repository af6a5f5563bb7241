use std::sync::Arc;

use anyhow::Result;
use daygrid_core::config::DaygridConfig;
use daygrid_core::schedule::ReminderScheduler;
use daygrid_core::store::EventStore;
use owo_colors::OwoColorize;
use tracing::warn;

use crate::presenter::DesktopPresenter;
use crate::seed;

/// Stay resident: arm reminder timers for the current event set, overlay
/// seed data once it arrives, and re-arm whenever the store changes.
pub async fn run(config: &DaygridConfig, mut store: EventStore) -> Result<()> {
    let presenter = Arc::new(DesktopPresenter::new(config.sound.clone()));
    let mut scheduler = ReminderScheduler::new(presenter);
    let mut revisions = store.changes();

    // Arm from persisted state first so reminders work even when the seed
    // fetch is slow or fails.
    scheduler.rearm(store.events());
    print_status(&store);

    // One-time seed overlay; every failure path degrades to local state.
    if let Some(url) = &config.seed_url {
        match seed::fetch(url).await {
            Ok(entries) => store.merge_seed(entries),
            Err(err) => warn!(error = %err, url, "seed fetch failed; starting from local state"),
        }
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                scheduler.rearm(store.events());
                print_status(&store);
            }
        }
    }

    scheduler.cancel_all();
    println!("{}", "  Stopped watching.".dimmed());
    Ok(())
}

fn print_status(store: &EventStore) {
    let events: usize = store.events().values().map(Vec::len).sum();
    println!(
        "{}",
        format!(
            "  Watching {} events across {} days. Ctrl-C to stop.",
            events,
            store.events().len()
        )
        .dimmed()
    );
}
