pub mod add;
pub mod events;
pub mod remove;
pub mod watch;
