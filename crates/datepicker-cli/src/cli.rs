//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use datepicker_engine::{CalendarDate, YearMonth};

/// Drive a date-picker controller from the terminal.
#[derive(Debug, Parser)]
#[command(name = "datepicker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON picker config (camelCase keys).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Treat this day as today instead of reading the clock.
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    pub today: Option<CalendarDate>,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Pretty,
    /// JSON.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the month grid.
    Grid {
        /// Month to show; defaults to the selection's month or today's.
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<YearMonth>,

        /// Selected date.
        #[arg(long, value_name = "YYYY-MM-DD")]
        select: Option<CalendarDate>,

        /// Earliest selectable date.
        #[arg(long, value_name = "YYYY-MM-DD")]
        min: Option<CalendarDate>,

        /// Latest selectable date.
        #[arg(long, value_name = "YYYY-MM-DD")]
        max: Option<CalendarDate>,

        /// First day of the week, 0 = Sunday.
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
        first_day: Option<u8>,
    },

    /// Resolve free text to a date.
    Parse {
        text: String,

        /// Resolve relative expressions against this day instead of today.
        #[arg(long, value_name = "YYYY-MM-DD")]
        reference: Option<CalendarDate>,
    },

    /// Format a date.
    Format {
        date: CalendarDate,

        /// Pattern such as "dddd, MMMM Do YYYY"; defaults to the configured one.
        #[arg(long)]
        pattern: Option<String>,
    },

    /// Replay a picker session script, one command per line.
    Session {
        /// Script file; reads stdin when omitted.
        file: Option<PathBuf>,
    },
}
