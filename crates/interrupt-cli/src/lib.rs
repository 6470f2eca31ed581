//! CLI logic for the Interrupt diagnostic tool.
//!
//! `interrupt encode` turns a JSON record file into diagnostic text;
//! `interrupt decode` turns diagnostic text back into a JSON tree.

pub mod error_adapter;

mod args;
mod config;
mod record_file;

pub use args::{Args, Command};
pub use record_file::RecordFile;

use std::{
    fs,
    io::{self, Read as _, Write as _},
};

use log::info;

use interrupt::{Encoder, InterruptError, config::OutputConfig};

/// Input path that reads from stdin.
const STDIN: &str = "-";

/// Run the Interrupt CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `InterruptError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed record files
/// - Malformed context dumps in decoded text
pub fn run(args: &Args) -> Result<(), InterruptError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Encode { input, output } => {
            info!(input_path = input; "Encoding record");

            let source = read_input(input)?;
            let record = RecordFile::from_json(&source)?.into_record()?;
            let blob = Encoder::new(app_config.encoder().clone()).encode(&record);

            write_output(output.as_deref(), &blob)?;
            info!(qualified:% = record.qualified(); "Record encoded");
        }
        Command::Decode { input, output } => {
            info!(input_path = input; "Decoding text");

            let source = read_input(input)?;
            let node = interrupt::decode(&source)?;
            let json = render_json(&node, app_config.output())?;

            write_output(output.as_deref(), &json)?;
            info!(diagnostic = node.is_some(); "Text decoded");
        }
    }

    Ok(())
}

fn read_input(path: &str) -> Result<String, InterruptError> {
    if path == STDIN {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    Ok(fs::read_to_string(path)?)
}

fn write_output(path: Option<&str>, content: &str) -> Result<(), InterruptError> {
    match path {
        Some(path) => fs::write(path, content)?,
        None => io::stdout().write_all(content.as_bytes())?,
    }
    Ok(())
}

fn render_json(value: &impl serde::Serialize, output: &OutputConfig) -> Result<String, InterruptError> {
    let mut json = if output.pretty() {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');
    Ok(json)
}
