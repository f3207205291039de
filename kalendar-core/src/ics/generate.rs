//! ICS file generation.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Property, ValueType};

use crate::config::KalendarConfig;
use crate::constants::{CANCELLED_PREFIX, PRODID};
use crate::contestants::format_contestants;
use crate::error::KalendarResult;
use crate::event::{Event, organizer_label};

/// Builds calendar documents with a fixed timezone and UID domain.
#[derive(Debug, Clone)]
pub struct CalendarBuilder {
    tz: Tz,
    uid_domain: String,
}

impl CalendarBuilder {
    pub fn new(config: &KalendarConfig) -> KalendarResult<Self> {
        Ok(CalendarBuilder {
            tz: config.tz()?,
            uid_domain: config.uid_domain.clone(),
        })
    }

    /// Map one dataset event to a VEVENT
    pub fn build_event(&self, event: &Event) -> icalendar::Event {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event_uid(event, &self.uid_domain));
        ics_event.summary(&event_summary(event));

        // DTSTAMP is derived from the event itself so regenerated files are identical
        ics_event.add_property("DTSTAMP", self.dtstamp(event.date.start));

        add_date_property(&mut ics_event, "DTSTART", event.date.start);

        // DTEND is exclusive, the dataset's end date is not
        if let Some(end) = event.date.end {
            add_date_property(&mut ics_event, "DTEND", end.succ_opt().unwrap_or(end));
        }

        ics_event.description(&event_description(event));

        if let Some(ref link) = event.link {
            ics_event.add_property("URL", link);
        }

        ics_event.done()
    }

    /// Generate a whole .ics document. `name` becomes X-WR-CALNAME.
    pub fn build_calendar<'a>(
        &self,
        name: Option<&str>,
        events: impl IntoIterator<Item = &'a Event>,
    ) -> String {
        let mut cal = Calendar::new();

        if let Some(name) = name {
            cal.append_property(Property::new("X-WR-CALNAME", name));
        }

        for event in events {
            cal.push(self.build_event(event));
        }

        finalize_ics(&cal.done().to_string())
    }

    /// Local midnight of `date` in the reference timezone, as UTC
    fn dtstamp(&self, date: NaiveDate) -> String {
        let midnight = date.and_time(NaiveTime::MIN);
        let utc = self
            .tz
            .from_local_datetime(&midnight)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| midnight.and_utc());

        utc.format("%Y%m%dT%H%M%SZ").to_string()
    }
}

/// Stable identifier: MD5 of the name and the start date (YYYYMMDD)
pub fn event_uid(event: &Event, domain: &str) -> String {
    let seed = format!("{}{}", event.name, event.date.start.format("%Y%m%d"));
    format!("{:x}@{}", md5::compute(seed.as_bytes()), domain)
}

pub fn event_summary(event: &Event) -> String {
    if event.cancelled {
        format!("{}{}", CANCELLED_PREFIX, event.name)
    } else {
        event.name.clone()
    }
}

/// Plain-text description: classification line, optional info,
/// organizers and optional link.
pub fn event_description(event: &Event) -> String {
    let sciences = event
        .sciences
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ");

    let mut description = format!(
        "{} | {} | {}\n",
        event.kind.label(),
        sciences,
        format_contestants(&event.contestants)
    );

    if let Some(ref info) = event.info {
        description.push_str(&format!("\n{}\n", info));
    }

    let organizers = event
        .organizers
        .iter()
        .map(|o| organizer_label(o))
        .collect::<Vec<_>>()
        .join(", ");
    description.push_str(&format!("\nOrganizátor(i): {}", organizers));

    if let Some(ref link) = event.link {
        description.push_str(&format!("\n{}", link));
    }

    description
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn finalize_ics(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}
