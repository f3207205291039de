//! iCalendar generation.
//!
//! Turns dataset events into VEVENTs and wraps them in a VCALENDAR document
//! according to RFC 5545. Escaping and line folding are left to `icalendar`.

mod generate;

pub use generate::{CalendarBuilder, event_description, event_summary, event_uid};
