mod cli;
mod config;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;
use date_range::{humanize_duration, DateRange, RangeInput};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let tz = config.timezone(cli.tz.as_deref())?;

    match &cli.command {
        Commands::Parse { expression } => {
            let expression = expression.join(" ");
            let range = DateRange::parse_in(&expression, tz)
                .with_context(|| format!("failed to parse '{expression}'"))?;
            print_json(&range)?;
        }
        Commands::Duration { range } => {
            let range = load_range(range, tz)?;
            let duration = range.duration()?;
            print_json(&json!({
                "seconds": duration.num_seconds(),
                "human": humanize_duration(duration),
            }))?;
        }
        Commands::Overlap { a, b } => {
            let a = load_range(a, tz)?;
            let b = parse_input(b)?;
            let overlap = a
                .overlap_duration(&b)
                .context("failed to compute overlap")?;
            print_json(&json!({
                "seconds": overlap.num_seconds(),
                "human": humanize_duration(overlap),
                "overlaps": overlap.num_seconds() > 0,
            }))?;
        }
        Commands::Humanize { range, now } => {
            let range = load_range(range, tz)?;
            let now = match now {
                Some(s) => DateTime::parse_from_rfc3339(s)
                    .with_context(|| format!("invalid --now '{s}'"))?
                    .with_timezone(&Utc),
                None => Utc::now(),
            };
            println!("{}", range.humanize(now));
        }
    }

    Ok(())
}

/// A JSON string or object is read as JSON, anything else as an expression.
fn parse_input(arg: &str) -> Result<RangeInput> {
    let trimmed = arg.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('"') {
        let value: serde_json::Value =
            serde_json::from_str(arg).with_context(|| format!("invalid JSON '{arg}'"))?;
        return Ok(RangeInput::from_json(&value)?);
    }
    Ok(RangeInput::Expression(arg.to_string()))
}

fn load_range(arg: &str, tz: Tz) -> Result<DateRange> {
    let input = parse_input(arg)?;
    DateRange::new(input, tz).with_context(|| format!("failed to parse '{arg}'"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
