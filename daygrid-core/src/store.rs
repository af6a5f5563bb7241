//! The persisted event store.
//!
//! Holds the in-memory `EventMap` and writes the whole mapping back to the
//! local key-value store after every mutation. Persistence failures are
//! logged and swallowed; the in-memory state stays authoritative for the
//! rest of the session.
//!
//! Every content change bumps a revision watch channel so the reminder
//! scheduler can re-arm deterministically instead of relying on an implicit
//! refresh cycle.

use chrono::NaiveDate;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::{DaygridError, DaygridResult};
use crate::event::{Event, EventMap};
use crate::seed::{self, SeedEntry};
use crate::storage::{EVENTS_KEY, LocalStore};

pub struct EventStore {
    events: EventMap,
    storage: LocalStore,
    revision: watch::Sender<u64>,
}

impl EventStore {
    /// Open the store, loading any previously persisted mapping.
    ///
    /// Absent or corrupt state yields an empty mapping; loading never fails.
    pub fn open(storage: LocalStore) -> Self {
        let events = load_events(&storage);
        let (revision, _) = watch::channel(0);
        EventStore {
            events,
            storage,
            revision,
        }
    }

    pub fn events(&self) -> &EventMap {
        &self.events
    }

    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.events.get(&date).map_or(&[], Vec::as_slice)
    }

    pub fn snapshot(&self) -> EventMap {
        self.events.clone()
    }

    /// Subscribe to content changes. The value is a revision counter; every
    /// add, remove and seed merge bumps it.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Append an event to a day, creating the day when absent.
    pub fn add(&mut self, date: NaiveDate, event: Event) {
        self.events.entry(date).or_default().push(event);
        self.persist();
        self.bump();
    }

    /// Remove the event at `index` on `date`. Removing the last event of a
    /// day removes the date key entirely.
    ///
    /// The caller only ever offers indices it just listed, so an
    /// out-of-range index is a contract violation and fails.
    pub fn remove(&mut self, date: NaiveDate, index: usize) -> DaygridResult<()> {
        let Some(day) = self.events.get_mut(&date) else {
            return Err(DaygridError::IndexOutOfRange { date, index });
        };
        if index >= day.len() {
            return Err(DaygridError::IndexOutOfRange { date, index });
        }

        day.remove(index);
        if day.is_empty() {
            self.events.remove(&date);
        }

        self.persist();
        self.bump();
        Ok(())
    }

    /// Overlay seed data onto the store.
    ///
    /// Entries are grouped by date; each seed date REPLACES any locally
    /// saved list for that exact date key. Last-writer-wins at date
    /// granularity, not event granularity.
    pub fn merge_seed(&mut self, entries: Vec<SeedEntry>) {
        for (date, day) in seed::group_by_date(entries) {
            self.events.insert(date, day);
        }
        self.persist();
        self.bump();
    }

    /// Serialize the full mapping and write it back. Non-fatal: a failed
    /// write is logged and the session carries on from memory.
    pub fn persist(&self) {
        let serialized = match serde_json::to_string(&self.events) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "failed to serialize events; keeping in-memory state");
                return;
            }
        };

        if let Err(err) = self.storage.put(EVENTS_KEY, &serialized) {
            warn!(error = %err, "failed to persist events; keeping in-memory state");
        }
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

fn load_events(storage: &LocalStore) -> EventMap {
    let Some(raw) = storage.get(EVENTS_KEY) else {
        return EventMap::new();
    };

    match serde_json::from_str::<EventMap>(&raw) {
        Ok(mut events) => {
            // Hand-edited state may carry empty day lists; the invariant is
            // that a date key never maps to an empty list.
            events.retain(|_, day| !day.is_empty());
            events
        }
        Err(err) => {
            debug!(error = %err, "persisted events failed to parse; starting empty");
            EventMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::EVENTS_KEY;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn open_store(dir: &tempfile::TempDir) -> EventStore {
        EventStore::open(LocalStore::open(dir.path()))
    }

    fn standup() -> Event {
        Event::timed("Standup", "09:00", None, None)
    }

    #[test]
    fn add_creates_day_and_remove_deletes_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let day = date("2024-06-01");

        store.add(day, standup());
        assert_eq!(store.events_on(day).len(), 1);
        assert_eq!(store.events().len(), 1);

        store.remove(day, 0).unwrap();
        assert!(store.events().is_empty());
        assert!(!store.events().contains_key(&day));
    }

    #[test]
    fn remove_keeps_day_while_events_remain() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let day = date("2024-06-01");

        store.add(day, standup());
        store.add(day, Event::timed("Review", "15:00", None, None));
        store.remove(day, 0).unwrap();

        assert_eq!(store.events_on(day).len(), 1);
        assert_eq!(store.events_on(day)[0].title, "Review");
    }

    #[test]
    fn remove_out_of_range_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let day = date("2024-06-01");

        assert!(matches!(
            store.remove(day, 0),
            Err(DaygridError::IndexOutOfRange { .. })
        ));

        store.add(day, standup());
        assert!(matches!(
            store.remove(day, 1),
            Err(DaygridError::IndexOutOfRange { index: 1, .. })
        ));
        // The failed remove mutated nothing.
        assert_eq!(store.events_on(day).len(), 1);
    }

    #[test]
    fn mutations_persist_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let day = date("2024-06-01");

        {
            let mut store = open_store(&dir);
            store.add(day, standup());
        }

        let reloaded = open_store(&dir);
        assert_eq!(reloaded.events_on(day).len(), 1);
        assert_eq!(reloaded.events_on(day)[0].title, "Standup");
    }

    #[test]
    fn corrupt_state_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStore::open(dir.path());
        storage.put(EVENTS_KEY, "{not json").unwrap();

        let store = EventStore::open(storage);
        assert!(store.events().is_empty());
    }

    #[test]
    fn empty_day_lists_are_pruned_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStore::open(dir.path());
        storage
            .put(
                EVENTS_KEY,
                r#"{"2024-06-01":[],"2024-06-02":[{"title":"Kept","startTime":"10:00"}]}"#,
            )
            .unwrap();

        let store = EventStore::open(storage);
        assert!(!store.events().contains_key(&date("2024-06-01")));
        assert_eq!(store.events_on(date("2024-06-02")).len(), 1);
    }

    #[test]
    fn seed_merge_replaces_whole_day_lists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let seeded_day = date("2024-06-01");
        let untouched_day = date("2024-06-03");

        store.add(seeded_day, Event::timed("Local only", "08:00", None, None));
        store.add(untouched_day, standup());

        let raw = r#"[
            {"date":"2024-06-01","title":"Seeded","startTime":"10:00"}
        ]"#;
        let entries: Vec<SeedEntry> = serde_json::from_str(raw).unwrap();
        store.merge_seed(entries);

        // The seeded date overwrites the local list; other dates survive.
        let day = store.events_on(seeded_day);
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].title, "Seeded");
        assert_eq!(store.events_on(untouched_day).len(), 1);
    }

    #[test]
    fn every_mutation_bumps_the_revision() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let day = date("2024-06-01");
        let revisions = store.changes();

        assert_eq!(*revisions.borrow(), 0);
        store.add(day, standup());
        assert_eq!(*revisions.borrow(), 1);
        store.merge_seed(Vec::new());
        assert_eq!(*revisions.borrow(), 2);
        store.remove(day, 0).unwrap();
        assert_eq!(*revisions.borrow(), 3);
    }
}
