//! Single and all-combinations calendar generation.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::constants::ANY;
use crate::error::{KalendarError, KalendarResult};
use crate::event::{Event, KNOWN_ORGANIZERS, SchoolLevel, Science};
use crate::filter::{EventFilter, OrganizerFilter, SchoolFilter, ScienceFilter};
use crate::ics::CalendarBuilder;

const CALENDAR_NAME: &str = "KockatýKalendár";

/// One calendar of the all-combinations tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination {
    /// Relative to the output directory
    pub path: PathBuf,
    pub filter: EventFilter,
}

/// What happened to each combination of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, KalendarError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn calendar_name(filter: &EventFilter) -> String {
    match filter.describe() {
        Some(description) => format!("{} ({})", CALENDAR_NAME, description),
        None => CALENDAR_NAME.to_string(),
    }
}

/// Filter `events` and render them as one calendar document
pub fn generate(builder: &CalendarBuilder, events: &[Event], filter: &EventFilter) -> String {
    let selected = filter.apply(events);
    debug!(selected = selected.len(), total = events.len(), "Filtered events");
    builder.build_calendar(Some(calendar_name(filter).as_str()), selected)
}

/// Every school × science calendar at `<school>/<science>.ics`, followed by
/// every science × organizer calendar at `any/<science>/<organizer>.ics`.
pub fn all_combinations() -> Vec<Combination> {
    let schools = SchoolLevel::ALL
        .into_iter()
        .map(SchoolFilter::Level)
        .chain([SchoolFilter::Any]);

    let mut combinations = Vec::new();

    for school in schools {
        for (science_id, science) in science_options() {
            combinations.push(Combination {
                path: PathBuf::from(school.id()).join(format!("{}.ics", science_id)),
                filter: EventFilter {
                    school,
                    science,
                    organizer: OrganizerFilter::Any,
                },
            });
        }
    }

    for science in Science::ALL {
        let organizers = KNOWN_ORGANIZERS
            .into_iter()
            .map(|id| (id, OrganizerFilter::OneOf(vec![id.to_string()])))
            .chain([(ANY, OrganizerFilter::Any)]);

        for (organizer_id, organizer) in organizers {
            combinations.push(Combination {
                path: PathBuf::from(ANY)
                    .join(science.id())
                    .join(format!("{}.ics", organizer_id)),
                filter: EventFilter {
                    school: SchoolFilter::Any,
                    science: ScienceFilter::OneOf(vec![science]),
                    organizer,
                },
            });
        }
    }

    combinations
}

fn science_options() -> impl Iterator<Item = (&'static str, ScienceFilter)> {
    Science::ALL
        .into_iter()
        .map(|science| (science.id(), ScienceFilter::OneOf(vec![science])))
        .chain([(ANY, ScienceFilter::Any)])
}

/// Write one calendar per combination under `out_dir`. A failed write is
/// recorded and the remaining combinations are still attempted.
pub fn write_all(builder: &CalendarBuilder, events: &[Event], out_dir: &Path) -> BatchReport {
    let mut report = BatchReport::default();

    for combination in all_combinations() {
        let path = out_dir.join(&combination.path);
        let content = generate(builder, events, &combination.filter);

        match write_calendar(&path, &content) {
            Ok(()) => {
                debug!(path = %path.display(), "Wrote calendar");
                report.written.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not write calendar");
                report.failed.push((path, e));
            }
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "Batch finished"
    );
    report
}

/// Write `content` to `path`, creating parent directories as needed
pub fn write_calendar(path: &Path, content: &str) -> KalendarResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
