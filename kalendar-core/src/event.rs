//! Event model.
//!
//! These types mirror the records published in a school year's dataset.
//! Closed enumerations carry their dataset ids and Slovak display labels;
//! organizers are an open set and only some of them have a label.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::KalendarError;

/// An event from the dataset
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEvent")]
pub struct Event {
    pub name: String,
    pub cancelled: bool,
    pub date: EventDate,
    pub contestants: Contestants,
    pub kind: EventType,
    /// Never empty, in dataset order without duplicates
    pub sciences: Vec<Science>,
    pub organizers: Vec<String>,
    pub info: Option<String>,
    pub link: Option<String>,
}

/// Day-granularity schedule. `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EventDate {
    pub start: NaiveDate,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// Audience range of an event. A bound without a school level is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Contestants {
    #[serde(default)]
    pub min: ContestantBound,
    #[serde(default)]
    pub max: ContestantBound,
}

impl Contestants {
    pub fn is_open(&self) -> bool {
        self.min.school.is_none() && self.max.school.is_none()
    }
}

/// One end of an audience range, e.g. 5th grade of elementary school.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBound")]
pub struct ContestantBound {
    pub school: Option<SchoolLevel>,
    pub year: Option<u32>,
}

impl ContestantBound {
    pub fn new(school: SchoolLevel, year: u32) -> Self {
        ContestantBound {
            school: Some(school),
            year: Some(year),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum SchoolLevel {
    #[serde(rename = "zs")]
    Elementary,
    #[serde(rename = "ss")]
    Secondary,
}

impl SchoolLevel {
    pub const ALL: [SchoolLevel; 2] = [SchoolLevel::Elementary, SchoolLevel::Secondary];

    pub fn id(&self) -> &'static str {
        match self {
            SchoolLevel::Elementary => "zs",
            SchoolLevel::Secondary => "ss",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchoolLevel::Elementary => "ZŠ",
            SchoolLevel::Secondary => "SŠ",
        }
    }
}

impl FromStr for SchoolLevel {
    type Err = KalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchoolLevel::ALL
            .into_iter()
            .find(|level| level.id() == s)
            .ok_or_else(|| KalendarError::InvalidFilter {
                kind: "school",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for SchoolLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum EventType {
    #[serde(rename = "sutaz")]
    Competition,
    #[serde(rename = "seminar")]
    Seminar,
    #[serde(rename = "sustredenie")]
    TrainingCamp,
    #[serde(rename = "vikendovka")]
    TrainingWeekend,
    #[serde(rename = "tabor")]
    Camp,
    #[serde(rename = "olympiada")]
    Olympiad,
    #[serde(rename = "prednasky")]
    LectureSeries,
    #[serde(rename = "other")]
    Other,
}

impl EventType {
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Competition => "súťaž",
            EventType::Seminar => "seminár",
            EventType::TrainingCamp => "sústredenie",
            EventType::TrainingWeekend => "víkendovka",
            EventType::Camp => "tábor",
            EventType::Olympiad => "olympiáda",
            EventType::LectureSeries => "prednášky",
            EventType::Other => "iný druh akcie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Science {
    #[serde(rename = "mat")]
    Math,
    #[serde(rename = "fyz")]
    Physics,
    #[serde(rename = "inf")]
    Informatics,
    #[serde(rename = "other")]
    Other,
}

impl Science {
    pub const ALL: [Science; 4] = [
        Science::Math,
        Science::Physics,
        Science::Informatics,
        Science::Other,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Science::Math => "mat",
            Science::Physics => "fyz",
            Science::Informatics => "inf",
            Science::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Science::Math => "MAT",
            Science::Physics => "FYZ",
            Science::Informatics => "INF",
            Science::Other => "iné",
        }
    }
}

impl FromStr for Science {
    type Err = KalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Science::ALL
            .into_iter()
            .find(|science| science.id() == s)
            .ok_or_else(|| KalendarError::InvalidFilter {
                kind: "science",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Science {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Organizer ids with a display label, in the order the batch mode walks them.
pub const KNOWN_ORGANIZERS: [&str; 8] = [
    "trojsten", "p-mat", "sezam", "riesky", "strom", "siov", "iuventa", "matfyz",
];

/// Display label of an organizer id. Unknown ids are returned verbatim.
pub fn organizer_label(id: &str) -> &str {
    match id {
        "trojsten" => "Trojsten",
        "p-mat" => "P-mat",
        "sezam" => "SEZAM",
        "riesky" => "Riešky",
        "strom" => "Strom",
        "siov" => "ŠIOV",
        "iuventa" => "Iuventa",
        "matfyz" => "FMFI UK",
        other => other,
    }
}

pub fn is_known_organizer(id: &str) -> bool {
    KNOWN_ORGANIZERS.contains(&id)
}

/// Dataset shape of an event, validated into `Event`.
#[derive(Deserialize)]
struct RawEvent {
    name: String,
    #[serde(default)]
    cancelled: bool,
    date: EventDate,
    #[serde(default)]
    contestants: Contestants,
    #[serde(rename = "type")]
    kind: EventType,
    sciences: Vec<Science>,
    #[serde(default)]
    organizers: Vec<String>,
    #[serde(default)]
    info: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

impl TryFrom<RawEvent> for Event {
    type Error = String;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        if raw.name.trim().is_empty() {
            return Err("event has an empty name".to_string());
        }

        let mut sciences: Vec<Science> = Vec::with_capacity(raw.sciences.len());
        for science in raw.sciences {
            if !sciences.contains(&science) {
                sciences.push(science);
            }
        }
        if sciences.is_empty() {
            return Err(format!("event '{}' has no sciences", raw.name));
        }

        Ok(Event {
            name: raw.name,
            cancelled: raw.cancelled,
            date: raw.date,
            contestants: raw.contestants,
            kind: raw.kind,
            sciences,
            organizers: raw.organizers,
            info: raw.info,
            link: raw.link,
        })
    }
}

/// A bound is either `{"type": "zs", "year": 5}` or the compact `"zs5"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBound {
    Compact(String),
    Full {
        #[serde(rename = "type", default)]
        school: Option<SchoolLevel>,
        #[serde(default)]
        year: Option<u32>,
    },
}

impl TryFrom<RawBound> for ContestantBound {
    type Error = String;

    fn try_from(raw: RawBound) -> Result<Self, Self::Error> {
        match raw {
            RawBound::Full { school, year } => Ok(ContestantBound { school, year }),
            RawBound::Compact(s) => parse_compact_bound(&s),
        }
    }
}

fn parse_compact_bound(s: &str) -> Result<ContestantBound, String> {
    let invalid = || format!("invalid contestant bound '{}'", s);

    let (level, year) = match (s.get(..2), s.get(2..)) {
        (Some(level), Some(year)) => (level, year),
        _ => return Err(invalid()),
    };
    let school = level.parse::<SchoolLevel>().map_err(|_| invalid())?;
    let year = if year.is_empty() {
        None
    } else {
        Some(year.parse::<u32>().map_err(|_| invalid())?)
    };

    Ok(ContestantBound {
        school: Some(school),
        year,
    })
}
