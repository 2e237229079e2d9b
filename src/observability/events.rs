//! Observable events
//!
//! Every structured log line names one of these events.

use std::fmt;

/// Observable events in keyplan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Startup
    /// Configuration file loaded
    ConfigLoaded,
    /// One schema file parsed
    SchemaFileLoaded,
    /// Schema directory fully loaded
    SchemasLoaded,

    // Planning
    /// Request received
    RequestReceived,
    /// Key-based access path resolved
    PlanResolved,
    /// No key-based path, full scan required
    PlanScanFallback,
    /// Request rejected before planning
    RequestRejected,

    // Check
    /// Schema check finished
    CheckComplete,

    /// A command exited with an error
    CommandFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaFileLoaded => "SCHEMA_FILE_LOADED",
            Event::SchemasLoaded => "SCHEMAS_LOADED",
            Event::RequestReceived => "REQUEST_RECEIVED",
            Event::PlanResolved => "PLAN_RESOLVED",
            Event::PlanScanFallback => "PLAN_SCAN_FALLBACK",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::CheckComplete => "CHECK_COMPLETE",
            Event::CommandFailed => "COMMAND_FAILED",
        }
    }

    /// Returns true if the event reports a degraded outcome
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::PlanScanFallback | Event::RequestRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
