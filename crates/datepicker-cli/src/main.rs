//! datepicker CLI entry point.

mod cli;
mod render;
mod session;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use datepicker_engine::{
    CalendarController, CalendarDate, FixedClock, ParseResult, PickerConfig, YearMonth,
};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, OutputFormat};
use crate::render::GridReport;
use crate::session::Outcome;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = load_config(cli.config.as_deref())?;
    let format = cli.output;

    match cli.command {
        Commands::Grid {
            month,
            select,
            min,
            max,
            first_day,
        } => {
            if let Some(first_day) = first_day {
                config.first_day_of_week = first_day;
            }
            let mut controller = build_controller(config, cli.today)?;
            if min.is_some() || max.is_some() {
                controller.set_bounds(min, max)?;
            }
            if let Some(date) = select {
                controller
                    .select_date(date)
                    .with_context(|| format!("cannot select {date}"))?;
            }
            if let Some(month) = month {
                controller.navigate_month(months_between(controller.view(), month));
            }

            match format {
                OutputFormat::Json => print_json(&GridReport::new(&controller))?,
                OutputFormat::Pretty => println!("{}", render::grid_text(&controller)),
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Parse { text, reference } => {
            let controller = build_controller(config, cli.today)?;
            let reference = reference.unwrap_or_else(|| controller.today());
            let result = controller.parse_text(&text, reference);

            match (format, result) {
                (OutputFormat::Json, _) => print_json(&result)?,
                (OutputFormat::Pretty, ParseResult::Resolved(date)) => println!("{date}"),
                (OutputFormat::Pretty, ParseResult::Unparsed) => {
                    eprintln!("could not parse '{text}'");
                }
            }
            Ok(if result.is_resolved() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Format { date, pattern } => {
            let controller = build_controller(config, cli.today)?;
            let text = match pattern {
                Some(pattern) => controller.format_text(date, &pattern)?,
                None => controller.pattern().format(date),
            };

            match format {
                OutputFormat::Json => print_json(&json!({ "date": date, "text": text }))?,
                OutputFormat::Pretty => println!("{text}"),
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Session { file } => {
            let script = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("reading session script {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading session script from stdin")?;
                    buf
                }
            };
            let steps = session::parse_script(&script)?;
            let mut controller = build_controller(config, cli.today)?;
            run_session(&mut controller, &steps, format)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PickerConfig> {
    let Some(path) = path else {
        return Ok(PickerConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = PickerConfig::from_json(&json)
        .with_context(|| format!("loading config {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

fn build_controller(config: PickerConfig, today: Option<CalendarDate>) -> Result<CalendarController> {
    let controller = match today {
        Some(today) => CalendarController::with_clock(config, FixedClock(today))?,
        None => CalendarController::new(config)?,
    };
    Ok(controller)
}

fn months_between(from: YearMonth, to: YearMonth) -> i64 {
    (i64::from(to.year()) - i64::from(from.year())) * 12 + i64::from(to.month())
        - i64::from(from.month())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_session(
    controller: &mut CalendarController,
    steps: &[(usize, String, session::Step)],
    format: OutputFormat,
) -> Result<()> {
    for (line, command, step) in steps {
        let outcome = session::apply(controller, step);
        let snapshot = controller.snapshot();

        match format {
            OutputFormat::Json => {
                let mut record = json!({ "line": line, "command": command, "state": snapshot });
                match &outcome {
                    Outcome::Rejected(err) => record["error"] = json!(err.to_string()),
                    Outcome::Input(validity) => record["validity"] = json!(validity),
                    Outcome::ShowGrid => record["grid"] = serde_json::to_value(controller.render_grid())?,
                    Outcome::Done => {}
                }
                println!("{}", serde_json::to_string(&record)?);
            }
            OutputFormat::Pretty => {
                println!("> {command}");
                match &outcome {
                    Outcome::Rejected(err) => println!("  error: {err}"),
                    Outcome::ShowGrid => {
                        for row in render::grid_text(controller).lines() {
                            println!("  {row}");
                        }
                    }
                    Outcome::Input(_) | Outcome::Done => {}
                }
                println!("  {}", render::state_line(&snapshot));
            }
        }
    }
    Ok(())
}
