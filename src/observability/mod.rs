//! Observability for keyplan
//!
//! Structured JSON-lines logging with typed event names.
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes a planning outcome
//! 2. Synchronous, no background threads
//! 3. Deterministic output (sorted field keys)
//!
//! The planner itself never logs; callers log around it.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log an event at INFO, or WARN for degraded outcomes
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    if event.is_warning() {
        Logger::warn(event.as_str(), fields);
    } else {
        Logger::info(event.as_str(), fields);
    }
}
