//! Observable events
//!
//! Events are explicit and typed; their string form is what appears in the
//! `event` key of a log line.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Listener bound, ready for requests
    Serving,
    /// Server could not start (FATAL)
    ServeFailed,
    /// Configured key hash is not a SHA-256 digest; every key is refused
    KeyHashUnconfigured,

    // Requests
    /// Key check failed
    RequestRejected,
    /// Operation finished and its body was encoded
    ExportComplete,
    /// Operation failed after authentication
    ExportFailed,

    // Local dumps
    /// Dump run started
    DumpBegin,
    /// One table written
    DumpTableWritten,
    /// Dump run complete
    DumpComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "SQLEXPORT_SERVING",
            Event::ServeFailed => "SQLEXPORT_SERVE_FAILED",
            Event::KeyHashUnconfigured => "API_KEY_HASH_UNCONFIGURED",

            Event::RequestRejected => "REQUEST_REJECTED",
            Event::ExportComplete => "EXPORT_COMPLETE",
            Event::ExportFailed => "EXPORT_FAILED",

            Event::DumpBegin => "DUMP_BEGIN",
            Event::DumpTableWritten => "DUMP_TABLE_WRITTEN",
            Event::DumpComplete => "DUMP_COMPLETE",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ServeFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
