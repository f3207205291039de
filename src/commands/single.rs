use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use kalendar_core::Event;
use kalendar_core::batch::{generate, write_calendar};
use kalendar_core::filter::EventFilter;
use kalendar_core::ics::CalendarBuilder;

use crate::status;

pub fn run(
    builder: &CalendarBuilder,
    events: &[Event],
    filter: &EventFilter,
    output: &str,
) -> Result<()> {
    let ics = generate(builder, events, filter);

    if output == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(ics.as_bytes()).context("Could not write to standard output")?;
        stdout.flush()?;
    } else {
        write_calendar(Path::new(output), &ics)
            .with_context(|| format!("Could not write '{}'", output))?;
    }

    status::ok("Generated iCal.");
    Ok(())
}
