//! Core library for daygrid.
//!
//! This crate holds everything with actual logic in it:
//! - `event` and `time` for the date-keyed event model and clock math
//! - `store` for the persisted event mapping
//! - `conflict` for overlap detection
//! - `schedule` for the reminder timers
//!
//! The CLI crate layers rendering, prompts and desktop notifications on top.

pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod schedule;
pub mod seed;
pub mod storage;
pub mod store;
pub mod time;

pub use error::{DaygridError, DaygridResult};
pub use event::{DEFAULT_COLOR, Event, EventMap};
