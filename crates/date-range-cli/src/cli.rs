//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Turn loose date expressions ("Q3 18", "dec 25 2020 18:31", "TBD") into
/// time intervals.
#[derive(Debug, Parser)]
#[command(name = "date-range", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// IANA time zone for the instants (overrides the configured zone).
    #[arg(long, global = true)]
    pub tz: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse an expression and print its granularity and instants as JSON.
    Parse {
        /// The expression; multiple arguments are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        expression: Vec<String>,
    },

    /// Print the length of a range.
    Duration {
        /// The expression, or a JSON literal `{"granularity", "from", "to"}`.
        range: String,
    },

    /// Print how much two ranges overlap (negative: the gap between them).
    Overlap {
        /// First range: an expression or a JSON literal.
        a: String,

        /// Second range: an expression or a JSON literal.
        b: String,
    },

    /// Print a short human-readable label for a range.
    Humanize {
        /// The expression, or a JSON literal.
        range: String,

        /// Reference instant (RFC 3339) instead of the current time.
        #[arg(long)]
        now: Option<String>,
    },
}
