//! CLI definitions for the zotsearch command-line interface.
//!
//! Four subcommands: `build` runs the ETL and writes the index artifact,
//! `search` answers a one-shot query, `repl` is an interactive query loop
//! with per-query timing, and `inspect` summarizes an artifact.

pub mod display;

use clap::{Parser, Subcommand};

use zotsearch::build::fetch::DEFAULT_REMOTE_PREFIX;

#[derive(Parser)]
#[command(
    name = "zotsearch",
    about = "Fuzzy search over a static university course catalog",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index artifact from the raw course/instructor caches
    Build {
        /// Directory holding (or receiving) the raw cache files
        #[arg(short, long, default_value = "cache")]
        cache_dir: String,

        /// Output path for the index artifact
        #[arg(short, long, default_value = "index.json")]
        output: String,

        /// Remote prefix to fetch missing caches from
        #[arg(long, default_value = DEFAULT_REMOTE_PREFIX)]
        remote: String,
    },

    /// Search an index artifact and display ranked results
    Search {
        /// Path to the index artifact
        index: String,

        /// Query string ("cs 161", "ge-5b", "compiler design", ...)
        query: String,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Restrict results to entity types
        /// (GE_CATEGORY, DEPARTMENT, COURSE, INSTRUCTOR)
        #[arg(short, long, value_delimiter = ',')]
        types: Vec<String>,

        /// Emit results as JSON instead of the human-readable table
        #[arg(long)]
        json: bool,
    },

    /// Interactive query loop against an index artifact
    Repl {
        /// Path to the index artifact
        index: String,
    },

    /// Summarize an index artifact
    Inspect {
        /// Path to the index artifact
        index: String,
    },
}
