mod commands;
mod error;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kunai_core::config::{OutputFormat, load_config};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kunai")]
#[command(about = "Compare organizer and attendee copies of iCalendar scheduling objects")]
struct Cli {
    /// Output format; overrides `output.format` from the configuration
    #[arg(long, value_enum)]
    format: Option<Format>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether two versions differ in anything but alarms
    OrganizerDiff { old: PathBuf, new: PathBuf },
    /// Check whether an attendee's copy only changes what they may change
    AttendeeMerge {
        organizer: PathBuf,
        attendee_copy: PathBuf,

        /// Calendar address of the attendee, e.g. "mailto:alex@example.com"
        #[arg(short, long)]
        attendee: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    let config = load_config()?;
    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let format = cli.format.map_or(config.output.format, OutputFormat::from);

    let verdict = match cli.command {
        Commands::OrganizerDiff { old, new } => commands::organizer_diff(&old, &new)?,
        Commands::AttendeeMerge {
            organizer,
            attendee_copy,
            attendee,
        } => commands::attendee_merge(&organizer, &attendee_copy, &attendee)?,
    };

    println!("{}", render::render(&verdict, format)?);
    Ok(verdict.passed())
}
