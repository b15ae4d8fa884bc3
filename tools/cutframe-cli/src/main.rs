//! Cutframe CLI: inspect and exercise the timeline engine from the shell.
//!
//! Usage:
//!   cutframe remap <SEGMENTS>            Build and summarize a remap table
//!   cutframe analyze <CURSOR>            Smooth telemetry and find zoom regions
//!   cutframe plan <CURSOR> <SEGMENTS>    Compute per-frame export geometry

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cutframe_common::config::{config_file_path, AppConfig, LoggingConfig};
use cutframe_timeline_model::zoom::ZoomSensitivity;

mod commands;

#[derive(Parser)]
#[command(
    name = "cutframe",
    about = "Timeline remapping and overlay geometry for edited screen recordings",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the remap table for a segment list
    Remap {
        /// Path to a JSON array of segments
        segments: PathBuf,

        /// Print every table entry
        #[arg(long)]
        dump: bool,
    },

    /// Extract interactions, smooth the cursor path, and generate zoom regions
    Analyze {
        /// Path to the recorder's cursor telemetry JSON
        cursor: PathBuf,

        /// Zoom sensitivity: subtle|balanced|dramatic
        #[arg(long, default_value = "balanced")]
        sensitivity: ZoomSensitivity,

        /// Zoom level for generated regions (defaults to the configured level)
        #[arg(long)]
        zoom_level: Option<f64>,

        /// Cursor resampling rate (defaults to the configured output rate)
        #[arg(long)]
        fps: Option<u32>,
    },

    /// Compute per-frame export geometry
    Plan {
        /// Path to the recorder's cursor telemetry JSON
        cursor: PathBuf,

        /// Path to a JSON array of segments
        segments: PathBuf,

        /// Cursor settings JSON (defaults apply when omitted)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Output file for the frame plan (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output width
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Output height
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Output frame rate (defaults to the configured output rate)
        #[arg(long)]
        fps: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_problem) = AppConfig::read();

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    cutframe_common::logging::init_logging(&LoggingConfig {
        level,
        json: cli.json_logs || config.logging.json,
    });

    if let Some(e) = &config_problem {
        tracing::warn!(
            path = %config_file_path().display(),
            error = %e,
            "Invalid config, using defaults"
        );
    }

    config.validate()?;

    let defaults = &config.processing;
    match cli.command {
        Commands::Remap { segments, dump } => commands::remap::run(segments, dump, defaults),
        Commands::Analyze {
            cursor,
            sensitivity,
            zoom_level,
            fps,
        } => commands::analyze::run(
            cursor,
            sensitivity,
            zoom_level.unwrap_or(defaults.zoom_level),
            fps.unwrap_or(defaults.output_frame_rate),
        ),
        Commands::Plan {
            cursor,
            segments,
            settings,
            output,
            width,
            height,
            fps,
        } => commands::plan::run(commands::plan::PlanArgs {
            cursor,
            segments,
            settings,
            output,
            width,
            height,
            fps: fps.unwrap_or(defaults.output_frame_rate),
            defaults: defaults.clone(),
        }),
    }
}
