use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Browse and play a music catalog kept as a directory tree.
#[derive(Parser, Debug)]
#[command(name = "tunewalk", version, about)]
pub struct Cli {
    /// Read the library from a local directory instead of the configured repository
    #[arg(long, value_name = "DIR")]
    pub local: Option<PathBuf>,

    /// Directory the walk starts from (overrides `library.root_path`)
    #[arg(long, value_name = "PATH")]
    pub root: Option<String>,

    /// Enable shuffle once the library is loaded
    #[arg(long)]
    pub shuffle: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Default, PartialEq, Eq)]
pub enum Command {
    /// Walk the library, print the playlist and exit
    Scan {
        /// Print the playlist as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive console
    #[default]
    Play,
    /// Print the effective configuration as TOML
    Config,
}
