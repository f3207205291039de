mod commands;
mod logging;
mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use kalendar_core::config::KalendarConfig;
use kalendar_core::dataset::DatasetResolver;
use kalendar_core::filter::EventFilter;
use kalendar_core::ics::CalendarBuilder;
use tracing::debug;

#[derive(Parser)]
#[command(name = "kalendar")]
#[command(version, about = "KockatýKalendár.sk iCal builder")]
struct Cli {
    /// Source JSON file or URL to use while building. Defaults to current school year.
    #[arg(short, long)]
    data_source: Option<String>,

    /// School type to filter output (any, zs, ss)
    #[arg(long, default_value = "any")]
    school: String,

    /// Sciences to filter output (any, mat, fyz, inf, other)
    #[arg(long, num_args = 1.., default_value = "any")]
    science: Vec<String>,

    /// Organizers to filter output (any, or organizer ids)
    #[arg(long, num_args = 1.., default_value = "any")]
    organizer: Vec<String>,

    /// Generate every school, science and organizer combination
    #[arg(long)]
    all: bool,

    /// Output file, or "-" for standard output
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Root directory of the --all output. Defaults to the configured output_dir.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        status::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = KalendarConfig::load().context("Could not load configuration")?;

    // Validate filters before anything is fetched
    let filter = if cli.all {
        None
    } else {
        Some(EventFilter::parse(
            &cli.school,
            cli.science.as_slice(),
            cli.organizer.as_slice(),
        )?)
    };
    debug!(?filter, all = cli.all, "Parsed arguments");

    let builder = CalendarBuilder::new(&config)?;
    let resolver = DatasetResolver::new(&config);

    let source = resolver.locate(cli.data_source.as_deref(), Local::now().date_naive())?;
    status::ok(&format!("Using '{}' as data source.", source));

    let events = resolver
        .load(&source)
        .with_context(|| format!("Could not read data from '{}'", source))?;
    status::work("Generating iCal file...");

    match filter {
        Some(filter) => commands::single::run(&builder, &events, &filter, &cli.output),
        None => {
            let out_dir = cli.output_dir.unwrap_or_else(|| config.output_dir.clone());
            commands::all::run(&builder, &events, &out_dir)
        }
    }
}
