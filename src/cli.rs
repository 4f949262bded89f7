//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Lay out calendar events on a week or day time grid.
///
/// Reads events as JSON and prints grid geometry and event placements as JSON.
#[derive(Debug, Parser)]
#[command(name = "calendar-layout", version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a layout settings file (TOML).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Place events from a JSON file on the grid.
    Layout {
        /// JSON array of events.
        #[arg(long)]
        events: PathBuf,

        /// Any date inside the week to render (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Render a single day instead of the whole week.
        #[arg(long)]
        day: bool,
    },

    /// Print the time grid rows and columns.
    Grid {
        /// Any date inside the week to render (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Render a single day instead of the whole week.
        #[arg(long)]
        day: bool,
    },

    /// Print the grid cell under a pointer, or null when outside the grid.
    Locate {
        /// Any date inside the week to render (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Pointer x in pixels.
        #[arg(long, allow_negative_numbers = true)]
        x: f64,

        /// Pointer y in pixels.
        #[arg(long, allow_negative_numbers = true)]
        y: f64,

        /// Container width in pixels.
        #[arg(long)]
        width: f64,

        /// Container height in pixels.
        #[arg(long)]
        height: f64,

        /// Container left offset in pixels.
        #[arg(long, default_value_t = 0.0)]
        left: f64,

        /// Container top offset in pixels.
        #[arg(long, default_value_t = 0.0)]
        top: f64,
    },

    /// Print the effective settings as TOML.
    Settings {
        /// Write the effective settings back to the settings file.
        #[arg(long)]
        save: bool,
    },
}
