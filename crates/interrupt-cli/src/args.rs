//! Command-line argument definitions for the Interrupt CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the command, its input and output paths,
//! the configuration file and the logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Interrupt diagnostic tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

/// The operation to perform.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a JSON record file into diagnostic text
    Encode {
        /// Path to the JSON record file, or `-` for stdin
        input: String,

        /// Path to the output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Decode diagnostic text into a JSON tree
    Decode {
        /// Path to the diagnostic text, or `-` for stdin
        input: String,

        /// Path to the output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}
