//! Command-line interface
//!
//! Argument definitions and command handlers for the `vacances_scolaires`
//! binary.

pub mod args;
pub mod commands;

pub use args::{CacheArgs, CalendarArgs, Cli, Commands, GlobalArgs, StatusArgs};
pub use commands::{handle_cache, handle_calendar, handle_status};
