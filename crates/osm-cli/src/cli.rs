use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "osm-way",
    about = "Inspect OpenStreetMap ways and build osmChange fragments for node edits",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with change output settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the node ids of a way in order
    Nodes(WayArgs),
    /// Report whether a way is closed
    Closed(WayArgs),
    /// Show the address tags of a closed way
    Address(WayArgs),
    /// Apply node edits and print the resulting way fragment
    Change(ChangeArgs),
}

#[derive(Args)]
pub struct WayArgs {
    /// Way document as returned by the API (`<osm><way>..</way></osm>`)
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ChangeArgs {
    /// Way document as returned by the API
    pub file: PathBuf,
    /// Node ids to append
    #[arg(long = "add", allow_negative_numbers = true)]
    pub add: Vec<i64>,
    /// Node ids to remove
    #[arg(long = "remove", allow_hyphen_values = true)]
    pub remove: Vec<String>,
    /// Changeset the edit belongs to (required without --base)
    #[arg(long)]
    pub changeset: Option<u64>,
    /// Existing osmChange document to patch instead of generating one
    #[arg(long)]
    pub base: Option<PathBuf>,
    /// Write the fragment on a single line
    #[arg(long)]
    pub compact: bool,
}
