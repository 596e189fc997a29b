//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "livedemo",
    version,
    about = "Replay scripted shell sessions as if typed live"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a session file as if typing it live
    Play {
        /// Session file to replay
        file: PathBuf,

        /// Typing speed multiplier (overrides the session's speed directive)
        #[arg(short, long)]
        speed: Option<f64>,

        /// Prompt theme (overrides the session's prompt directive)
        #[arg(short, long)]
        prompt: Option<String>,

        /// Shell to execute commands with
        #[arg(long)]
        shell: Option<PathBuf>,
    },

    /// Record an interactive session into a session file
    Record {
        /// Output session file
        #[arg(default_value = "session.sh")]
        file: PathBuf,

        /// Shell to execute commands with
        #[arg(long)]
        shell: Option<PathBuf>,

        /// Prompt theme to record into the session
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// List built-in prompt themes
    Themes {
        /// Render a preview prompt for each theme
        #[arg(short, long)]
        preview: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
