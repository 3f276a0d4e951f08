use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trackdiff",
    about = "Line-level diff of two text tracks: edits, merges, splits, and shifts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log classification decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum TrackFormat {
    /// Pick by file extension: `.srt` is SubRip, anything else plain text
    Auto,
    Srt,
    Plain,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two tracks and report every discrepancy
    Diff(DiffArgs),
    /// Print the extracted lines of a track with their positions
    Lines(LinesArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// The reference track
    pub one: PathBuf,
    /// The track checked against the reference
    pub two: PathBuf,
    /// Label for the first track (default: "one")
    #[arg(long)]
    pub label_one: Option<String>,
    /// Label for the second track (default: "two")
    #[arg(long)]
    pub label_two: Option<String>,
    /// Minimum similarity for edits, merges, and splits (default: 0.6)
    #[arg(long)]
    pub cutoff: Option<f64>,
    /// TOML file with diff settings; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "auto")]
    pub track_format: TrackFormat,
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct LinesArgs {
    pub track: PathBuf,
    #[arg(long, value_enum, default_value = "auto")]
    pub track_format: TrackFormat,
    /// Show the normalized comparison key next to each line
    #[arg(long)]
    pub normalized: bool,
}
