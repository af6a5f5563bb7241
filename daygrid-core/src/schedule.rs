//! Reminder timers.
//!
//! The scheduler is a stateless watcher rebuilt from scratch whenever the
//! store's content changes. Two mechanisms per event, both armed on rearm:
//!
//! - a one-shot timer at the event's start instant, armed only when that
//!   instant lies strictly within the next 24 hours; the precise,
//!   drift-tolerant primary alert.
//! - a 1-second poll that fires when the wall clock reads the event's
//!   hour:minute at second zero. The poll checks hour/minute/second only,
//!   never the date, so it re-fires daily for stale dates and can double up
//!   with the one-shot inside the same minute. Intentional duplication
//!   risk, kept as-is.
//!
//! Timers are keyed by event identity in a single map so cancellation is
//! precise: rearm and teardown abort the whole set atomically.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, Timelike};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::event::EventMap;
use crate::time;

const POLL_PERIOD: Duration = Duration::from_secs(1);

/// Reminder sink. The CLI installs a desktop-notification implementation.
pub trait Notifier: Send + Sync {
    /// Deliver a reminder carrying the event's title and start label.
    fn notify(&self, title: &str, time: &str);
}

/// Source of local wall-clock time. `SystemClock` in production; tests
/// inject fixed clocks so the per-second poll is deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Timer identity: which event (by day and list position) and which of the
/// two mechanisms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum TimerKey {
    OneShot { date: NaiveDate, slot: usize },
    Poll { date: NaiveDate, slot: usize },
}

pub struct ReminderScheduler {
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    timers: HashMap<TimerKey, JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_clock(notifier, Arc::new(SystemClock))
    }

    pub fn with_clock(notifier: Arc<dyn Notifier>, clock: Arc<dyn Clock>) -> Self {
        ReminderScheduler {
            notifier,
            clock,
            timers: HashMap::new(),
        }
    }

    /// Rebuild the timer set from a store snapshot.
    ///
    /// Cancels every previously armed timer first, then arms the pair of
    /// mechanisms for each event with a parseable start label. Events whose
    /// labels don't parse arm nothing.
    pub fn rearm(&mut self, events: &EventMap) {
        self.cancel_all();
        let now = self.clock.now();

        for (date, day) in events {
            for (slot, event) in day.iter().enumerate() {
                let Some(label) = event.start_label() else {
                    continue;
                };
                let Ok(start_minutes) = time::to_minutes(label) else {
                    continue;
                };
                let (hour, minute) = (start_minutes / 60, start_minutes % 60);

                if let Some(delay) = one_shot_delay(*date, hour, minute, now) {
                    let notifier = self.notifier.clone();
                    let title = event.title.clone();
                    let label = label.to_string();
                    let handle = tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        notifier.notify(&title, &label);
                    });
                    self.timers
                        .insert(TimerKey::OneShot { date: *date, slot }, handle);
                }

                let notifier = self.notifier.clone();
                let clock = self.clock.clone();
                let title = event.title.clone();
                let label = label.to_string();
                let handle = tokio::spawn(async move {
                    let first = tokio::time::Instant::now() + POLL_PERIOD;
                    let mut ticks = tokio::time::interval_at(first, POLL_PERIOD);
                    loop {
                        ticks.tick().await;
                        let now = clock.now();
                        if now.hour() == hour && now.minute() == minute && now.second() == 0 {
                            notifier.notify(&title, &label);
                        }
                    }
                });
                self.timers
                    .insert(TimerKey::Poll { date: *date, slot }, handle);
            }
        }

        debug!(timers = self.timers.len(), "reminder timers armed");
    }

    /// Abort and clear every armed timer.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
    }

    pub fn armed_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Delay until `date` at `hour:minute` local time, when that instant lies
/// strictly within the next 24 hours. Ambiguous local times (DST fold)
/// resolve to the earlier instant; nonexistent ones arm nothing.
fn one_shot_delay(
    date: NaiveDate,
    hour: u32,
    minute: u32,
    now: DateTime<Local>,
) -> Option<Duration> {
    let instant = date.and_hms_opt(hour, minute, 0)?;
    let instant = instant.and_local_timezone(Local).earliest()?;

    let until = instant.signed_duration_since(now);
    if until > ChronoDuration::zero() && until < ChronoDuration::hours(24) {
        until.to_std().ok()
    } else {
        None
    }
}
