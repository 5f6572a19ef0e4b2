//! Command-line front end for gbdk_map
//!
//! Loads a map file, picks a registered export format and invokes it with
//! the map and the output path, the same way an editor's "Export As" menu
//! would.

use clap::Parser;
use gbdk_map_core::{load_map, LoadError};
use gbdk_map_export::{FormatRegistry, GBDK_C_FORMAT_ID};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Suffixes stripped from the input file name when deriving the default output
const MAP_SUFFIXES: &[&str] = &[".map.json", ".tmj", ".json"];

/// Export the first tile layer of a Tiled map as GBDK C files
#[derive(Parser, Debug)]
#[command(name = "tiled2gbdk", author, version, about, long_about = None)]
pub struct Args {
    /// Map file (Tiled JSON `.tmj`/`.json`, or `.map.json`)
    #[arg(required_unless_present = "list_formats")]
    pub input: Option<PathBuf>,

    /// Output path; `<name>.h` and `<name>.c` are written next to it
    /// [default: the input file name with a `.c` extension]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format id [default: chosen from the output extension]
    #[arg(short, long)]
    pub format: Option<String>,

    /// List registered export formats and exit
    #[arg(long)]
    pub list_formats: bool,
}

/// Errors reported by the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to load map: {0}")]
    Load(#[from] LoadError),

    #[error("Unknown export format '{0}'")]
    UnknownFormat(String),

    #[error("{0}")]
    Export(String),

    #[error("No input map given")]
    MissingInput,
}

/// Run the exporter for parsed arguments
pub fn run(args: &Args) -> Result<(), CliError> {
    let registry = FormatRegistry::with_builtin_formats();

    if args.list_formats {
        for (id, format) in registry.formats() {
            println!("{id}\t{}\t{}", format.name(), format.extensions().join(", "));
        }
        return Ok(());
    }

    let input = args.input.as_deref().ok_or(CliError::MissingInput)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));

    let format = match &args.format {
        Some(id) => registry
            .format(id)
            .ok_or_else(|| CliError::UnknownFormat(id.clone()))?,
        None => registry
            .format_for_path(&output)
            .or_else(|| registry.format(GBDK_C_FORMAT_ID))
            .ok_or_else(|| CliError::UnknownFormat(GBDK_C_FORMAT_ID.to_string()))?,
    };

    let map = load_map(input)?;
    tracing::debug!(
        "Loaded {}x{} map with {} layer(s) from {}",
        map.width,
        map.height,
        map.layer_count(),
        input.display()
    );

    tracing::info!("Exporting {} as {}", input.display(), format.name());
    format.write(&map, &output).map_err(CliError::Export)
}

/// Default output path: the input's directory and name, with a `.c` extension
pub fn default_output_path(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let lower = file_name.to_ascii_lowercase();

    let stem = MAP_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix) && lower.len() > suffix.len())
        .map(|suffix| &file_name[..file_name.len() - suffix.len()])
        .unwrap_or_else(|| {
            input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name.as_str())
        });

    input.with_file_name(format!("{stem}.c"))
}
