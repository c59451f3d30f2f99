//! Observability subsystem
//!
//! Structured JSON logging of typed lifecycle and request events.
//!
//! # Usage
//!
//! ```ignore
//! use sqlexport::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ExportComplete, &[("operation", "tables")]);
//! ```
//!
//! Keys, key hashes and database passwords are never passed as fields.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields, at the severity the event implies
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_for(event), event.as_str(), fields);
}

fn severity_for(event: Event) -> Severity {
    match event {
        e if e.is_fatal() => Severity::Fatal,
        Event::RequestRejected | Event::KeyHashUnconfigured => Severity::Warn,
        Event::ExportFailed => Severity::Error,
        _ => Severity::Info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_severity() {
        assert_eq!(severity_for(Event::ServeFailed), Severity::Fatal);
        assert_eq!(severity_for(Event::RequestRejected), Severity::Warn);
        assert_eq!(severity_for(Event::KeyHashUnconfigured), Severity::Warn);
        assert_eq!(severity_for(Event::ExportFailed), Severity::Error);
        assert_eq!(severity_for(Event::ExportComplete), Severity::Info);
    }

    #[test]
    fn test_log_event() {
        // This just verifies no panic
        log_event(Event::ConfigLoaded);
        log_event_with_fields(Event::ExportComplete, &[("operation", "tables")]);
    }
}
