//! Core types for the KockatýKalendár iCal builder.
//!
//! This crate provides everything the `kalendar` binary needs:
//! - `event` for the typed event model and its localized labels
//! - `dataset` for locating and loading a school year's events
//! - `filter` for the school, science and organizer predicates
//! - `ics` for turning events into iCalendar documents
//! - `batch` for single and all-combinations output

pub mod batch;
pub mod config;
pub mod constants;
pub mod contestants;
pub mod dataset;
pub mod error;
pub mod event;
pub mod filter;
pub mod ics;

pub use error::{KalendarError, KalendarResult};
pub use event::*;
