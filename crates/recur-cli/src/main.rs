//! `recur` CLI -- convert recurring-date widget settings to and from RRULE strings.
//!
//! ## Usage
//!
//! ```sh
//! # Decode a rule into widget settings (stdin → stdout)
//! echo 'FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE' | recur decode
//!
//! # Decode against a specific DTSTART in a timezone
//! recur decode -i rule.txt --dtstart 2026-02-17T14:00:00 --timezone Europe/Berlin
//!
//! # Encode settings JSON into an RRULE
//! recur encode -i settings.json -o rule.txt
//!
//! # Fill in the rrule of every submitted field item
//! recur massage -i items.json
//!
//! # Show the options a widget offers
//! recur options --config widget.toml --current MONTHLY
//! ```
//!
//! Set `RUST_LOG=recur_mapper=debug` (or pass `-v`) to see mapping decisions on stderr.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use recur_mapper::{FieldItem, Frequency, RecurrenceSettings, WidgetConfig, WidgetOptions};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "recur",
    version,
    about = "Recurring-date widget settings <-> RRULE converter"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log mapping decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an RRULE into widget settings JSON
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// DTSTART the rule is anchored to (defaults to now)
        #[arg(long)]
        dtstart: Option<String>,
        /// IANA timezone for a local --dtstart
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// Encode widget settings JSON into an RRULE
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Compute the rrule of every item in a JSON array of submitted field items
    Massage {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Show the repeat options and controls a widget renders
    Options {
        /// Widget config TOML (all frequencies allowed if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Frequency currently selected in the field
        #[arg(long)]
        current: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode {
            input,
            output,
            dtstart,
            timezone,
        } => {
            let rule = read_input(input.as_deref())?;
            let reference = match dtstart {
                Some(dtstart) => recur_mapper::parse_reference(&dtstart, &timezone)
                    .context("Failed to resolve --dtstart")?,
                None => Utc::now(),
            };
            let settings =
                recur_mapper::from_rule(&rule, reference).context("Failed to decode RRULE")?;
            let pretty = serde_json::to_string_pretty(&settings)?;
            write_output(output.as_deref(), &format!("{}\n", pretty))?;
        }
        Commands::Encode { input, output } => {
            let json = read_input(input.as_deref())?;
            let settings: RecurrenceSettings =
                serde_json::from_str(&json).context("Failed to parse settings JSON")?;
            let rule = recur_mapper::to_rule(&settings).context("Failed to encode settings")?;
            write_output(output.as_deref(), &format!("{}\n", rule))?;
        }
        Commands::Massage { input, output } => {
            let json = read_input(input.as_deref())?;
            let items: Vec<FieldItem> =
                serde_json::from_str(&json).context("Failed to parse field items JSON")?;
            let items = recur_mapper::massage_values(items).context("Failed to encode items")?;
            let pretty = serde_json::to_string_pretty(&items)?;
            write_output(output.as_deref(), &format!("{}\n", pretty))?;
        }
        Commands::Options { config, current } => {
            let config = match config {
                Some(path) => WidgetConfig::load(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => WidgetConfig::default(),
            };
            let current = current
                .as_deref()
                .map(str::parse::<Frequency>)
                .transpose()
                .context("Invalid --current")?;
            let options = WidgetOptions::build(&config, current);
            println!("{}", serde_json::to_string_pretty(&options)?);
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise warnings only, or debug for this workspace with `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,recur_mapper=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
