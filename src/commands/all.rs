use std::path::Path;

use anyhow::Result;
use kalendar_core::Event;
use kalendar_core::batch::write_all;
use kalendar_core::ics::CalendarBuilder;

use crate::status;

pub fn run(builder: &CalendarBuilder, events: &[Event], out_dir: &Path) -> Result<()> {
    let report = write_all(builder, events, out_dir);

    for (path, e) in &report.failed {
        status::error(&format!("{}: {}", path.display(), e));
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} calendars could not be written",
            report.failed.len(),
            report.failed.len() + report.written.len()
        );
    }

    status::ok(&format!(
        "Generated {} iCal files in '{}'.",
        report.written.len(),
        out_dir.display()
    ));
    Ok(())
}
