//! Event filters.
//!
//! Each dimension has its own small predicate with the requested values
//! bound at construction. `EventFilter` ANDs the three together.

use std::str::FromStr;

use crate::constants::ANY;
use crate::error::{KalendarError, KalendarResult};
use crate::event::{Event, SchoolLevel, Science, is_known_organizer, organizer_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchoolFilter {
    Any,
    Level(SchoolLevel),
}

impl SchoolFilter {
    /// Half-open ranges are asymmetric: an upper bound of secondary school
    /// admits every elementary pupil, and a lower bound of elementary school
    /// admits every secondary student.
    pub fn matches(&self, event: &Event) -> bool {
        let requested = match self {
            SchoolFilter::Any => return true,
            SchoolFilter::Level(level) => *level,
        };

        match (event.contestants.min.school, event.contestants.max.school) {
            (None, None) => true,
            (None, Some(max)) => {
                max == SchoolLevel::Secondary || requested == SchoolLevel::Elementary
            }
            (Some(min), None) => {
                min == SchoolLevel::Elementary || requested == SchoolLevel::Secondary
            }
            (Some(min), Some(max)) => requested == min || requested == max,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            SchoolFilter::Any => ANY,
            SchoolFilter::Level(level) => level.id(),
        }
    }
}

impl FromStr for SchoolFilter {
    type Err = KalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ANY {
            return Ok(SchoolFilter::Any);
        }
        s.parse::<SchoolLevel>().map(SchoolFilter::Level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScienceFilter {
    Any,
    OneOf(Vec<Science>),
}

impl ScienceFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            ScienceFilter::Any => true,
            ScienceFilter::OneOf(sciences) => sciences.iter().any(|s| event.sciences.contains(s)),
        }
    }

    pub fn parse<S: AsRef<str>>(values: &[S]) -> KalendarResult<Self> {
        if is_any(values) {
            return Ok(ScienceFilter::Any);
        }
        values
            .iter()
            .map(|v| v.as_ref().parse::<Science>())
            .collect::<KalendarResult<Vec<_>>>()
            .map(ScienceFilter::OneOf)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizerFilter {
    Any,
    OneOf(Vec<String>),
}

impl OrganizerFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            OrganizerFilter::Any => true,
            OrganizerFilter::OneOf(organizers) => {
                organizers.iter().any(|o| event.organizers.contains(o))
            }
        }
    }

    /// Only organizers with a known label are accepted as filter values.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> KalendarResult<Self> {
        if is_any(values) {
            return Ok(OrganizerFilter::Any);
        }
        values
            .iter()
            .map(|v| {
                let id = v.as_ref();
                if is_known_organizer(id) {
                    Ok(id.to_string())
                } else {
                    Err(KalendarError::InvalidFilter {
                        kind: "organizer",
                        value: id.to_string(),
                    })
                }
            })
            .collect::<KalendarResult<Vec<_>>>()
            .map(OrganizerFilter::OneOf)
    }
}

fn is_any<S: AsRef<str>>(values: &[S]) -> bool {
    values.is_empty() || values.iter().any(|v| v.as_ref() == ANY)
}

/// All three filter dimensions of one generated calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub school: SchoolFilter,
    pub science: ScienceFilter,
    pub organizer: OrganizerFilter,
}

impl Default for EventFilter {
    fn default() -> Self {
        EventFilter {
            school: SchoolFilter::Any,
            science: ScienceFilter::Any,
            organizer: OrganizerFilter::Any,
        }
    }
}

impl EventFilter {
    /// Build a filter from command-line style values, rejecting unknown ones.
    pub fn parse<S: AsRef<str>>(
        school: &str,
        sciences: &[S],
        organizers: &[S],
    ) -> KalendarResult<Self> {
        Ok(EventFilter {
            school: school.parse()?,
            science: ScienceFilter::parse(sciences)?,
            organizer: OrganizerFilter::parse(organizers)?,
        })
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.school.matches(event) && self.science.matches(event) && self.organizer.matches(event)
    }

    /// Events passing every filter, in their original order
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }

    /// Short human description used in the calendar name, e.g. "ZŠ | MAT | Trojsten"
    pub fn describe(&self) -> Option<String> {
        let mut parts = Vec::new();

        if let SchoolFilter::Level(level) = self.school {
            parts.push(level.label().to_string());
        }
        if let ScienceFilter::OneOf(sciences) = &self.science {
            parts.push(sciences.iter().map(|s| s.label()).collect::<Vec<_>>().join(", "));
        }
        if let OrganizerFilter::OneOf(organizers) = &self.organizer {
            parts.push(
                organizers
                    .iter()
                    .map(|o| organizer_label(o))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SchoolLevel::{Elementary, Secondary};
    use crate::event::{ContestantBound, Contestants, EventDate, EventType};
    use chrono::NaiveDate;

    fn make_event(name: &str, min: ContestantBound, max: ContestantBound) -> Event {
        Event {
            name: name.to_string(),
            cancelled: false,
            date: EventDate {
                start: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                end: None,
            },
            contestants: Contestants { min, max },
            kind: EventType::Competition,
            sciences: vec![Science::Math],
            organizers: vec!["trojsten".to_string()],
            info: None,
            link: None,
        }
    }

    fn open() -> ContestantBound {
        ContestantBound::default()
    }

    fn only(level: SchoolLevel) -> SchoolFilter {
        SchoolFilter::Level(level)
    }

    #[test]
    fn open_range_passes_every_school() {
        let event = make_event("Open", open(), open());
        assert!(SchoolFilter::Any.matches(&event));
        assert!(only(Elementary).matches(&event));
        assert!(only(Secondary).matches(&event));
    }

    #[test]
    fn upper_bound_secondary_admits_both_levels() {
        let event = make_event("Up to SŠ", open(), ContestantBound::new(Secondary, 2));
        assert!(only(Elementary).matches(&event));
        assert!(only(Secondary).matches(&event));
    }

    #[test]
    fn upper_bound_elementary_admits_only_elementary() {
        let event = make_event("Up to ZŠ", open(), ContestantBound::new(Elementary, 9));
        assert!(only(Elementary).matches(&event));
        assert!(!only(Secondary).matches(&event));
    }

    #[test]
    fn lower_bound_elementary_admits_both_levels() {
        let event = make_event("From ZŠ", ContestantBound::new(Elementary, 5), open());
        assert!(only(Elementary).matches(&event));
        assert!(only(Secondary).matches(&event));
    }

    #[test]
    fn lower_bound_secondary_admits_only_secondary() {
        let event = make_event("From SŠ", ContestantBound::new(Secondary, 1), open());
        assert!(!only(Elementary).matches(&event));
        assert!(only(Secondary).matches(&event));
    }

    #[test]
    fn closed_range_matches_either_endpoint_level() {
        let mixed = make_event(
            "Mixed",
            ContestantBound::new(Elementary, 5),
            ContestantBound::new(Secondary, 2),
        );
        assert!(only(Elementary).matches(&mixed));
        assert!(only(Secondary).matches(&mixed));

        let secondary = make_event(
            "SŠ only",
            ContestantBound::new(Secondary, 1),
            ContestantBound::new(Secondary, 4),
        );
        assert!(!only(Elementary).matches(&secondary));
        assert!(only(Secondary).matches(&secondary));
    }

    #[test]
    fn science_filter_needs_intersection() {
        let mut event = make_event("Science", open(), open());
        event.sciences = vec![Science::Physics, Science::Informatics];

        assert!(ScienceFilter::Any.matches(&event));
        assert!(ScienceFilter::OneOf(vec![Science::Math, Science::Informatics]).matches(&event));
        assert!(!ScienceFilter::OneOf(vec![Science::Math]).matches(&event));
    }

    #[test]
    fn organizer_filter_needs_intersection() {
        let mut event = make_event("Organizers", open(), open());
        event.organizers = vec!["sezam".to_string(), "gjh".to_string()];

        assert!(OrganizerFilter::Any.matches(&event));
        assert!(OrganizerFilter::OneOf(vec!["sezam".to_string()]).matches(&event));
        assert!(!OrganizerFilter::OneOf(vec!["trojsten".to_string()]).matches(&event));
    }

    #[test]
    fn any_everywhere_keeps_all_events_in_order() {
        let events = vec![
            make_event("A", ContestantBound::new(Secondary, 1), open()),
            make_event("B", open(), open()),
            make_event("C", open(), ContestantBound::new(Elementary, 4)),
        ];

        let filtered = EventFilter::default().apply(&events);
        let names: Vec<_> = filtered.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn dimensions_are_combined_with_and() {
        let mut physics = make_event("Physics", open(), open());
        physics.sciences = vec![Science::Physics];
        let math = make_event("Math", ContestantBound::new(Secondary, 1), open());
        let events = vec![physics, math];

        let filter = EventFilter {
            school: only(Elementary),
            science: ScienceFilter::OneOf(vec![Science::Math]),
            organizer: OrganizerFilter::Any,
        };
        assert!(filter.apply(&events).is_empty());

        let filter = EventFilter {
            school: only(Secondary),
            ..filter
        };
        let names: Vec<_> = filter.apply(&events).iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Math"]);
    }

    #[test]
    fn parse_accepts_any_and_known_values() {
        let filter = EventFilter::parse("ss", &["mat", "inf"], &["any"]).unwrap();
        assert_eq!(filter.school, only(Secondary));
        assert_eq!(
            filter.science,
            ScienceFilter::OneOf(vec![Science::Math, Science::Informatics])
        );
        assert_eq!(filter.organizer, OrganizerFilter::Any);

        let filter = EventFilter::parse::<&str>("any", &[], &[]).unwrap();
        assert_eq!(filter, EventFilter::default());
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(matches!(
            EventFilter::parse("vs", &["mat"], &["any"]),
            Err(KalendarError::InvalidFilter { kind: "school", .. })
        ));
        assert!(matches!(
            EventFilter::parse("any", &["chem"], &["any"]),
            Err(KalendarError::InvalidFilter { kind: "science", .. })
        ));
        assert!(matches!(
            EventFilter::parse("any", &["mat"], &["gjh"]),
            Err(KalendarError::InvalidFilter { kind: "organizer", .. })
        ));
    }

    #[test]
    fn describe_names_active_dimensions() {
        assert_eq!(EventFilter::default().describe(), None);

        let filter = EventFilter::parse("zs", &["mat"], &["trojsten"]).unwrap();
        assert_eq!(filter.describe().as_deref(), Some("ZŠ | MAT | Trojsten"));
    }
}
