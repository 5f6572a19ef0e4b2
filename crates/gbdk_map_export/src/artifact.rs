//! Rendered header/source file pair
//!
//! An [`ExportArtifact`] is built entirely in memory before anything is
//! written, so a failed render never leaves a partial file behind.

use gbdk_map_core::Map;
use std::fs;
use std::path::{Path, PathBuf};

use crate::encode::{flatten_layer, render_byte_list};
use crate::exporter::select_tile_layer;
use crate::identifier::base_identifier;
use crate::ExportError;

/// The two text files produced by one export
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Identifier used for the guard, macros, array symbol and file names
    pub identifier: String,
    /// Width of the exported layer in tiles
    pub width: u32,
    /// Height of the exported layer in tiles
    pub height: u32,
    /// Destination of the declaration file (`<id>.h`)
    pub header_path: PathBuf,
    /// Destination of the definition file (`<id>.c`)
    pub source_path: PathBuf,
    /// Declaration file contents
    pub header: String,
    /// Definition file contents
    pub source: String,
}

impl ExportArtifact {
    /// Render both files for the first tile layer of `map`.
    ///
    /// The files are placed next to `output_path`, named after its sanitized stem.
    pub fn render(map: &Map, output_path: &Path) -> Result<Self, ExportError> {
        let layer = select_tile_layer(map)?;
        let identifier = base_identifier(output_path);
        let (width, height) = (layer.width(), layer.height());

        let bytes = flatten_layer(layer);
        let header = render_header(&identifier, width, height);
        let source = render_source(&identifier, &bytes);

        let dir = output_path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self {
            header_path: dir.join(format!("{identifier}.h")),
            source_path: dir.join(format!("{identifier}.c")),
            identifier,
            width,
            height,
            header,
            source,
        })
    }

    /// Write the header, then the source, overwriting existing files.
    ///
    /// If the source cannot be written the header is removed again, so a
    /// failed write leaves neither file behind.
    pub fn write(&self) -> Result<(), ExportError> {
        write_file(&self.header_path, &self.header)?;

        if let Err(e) = write_file(&self.source_path, &self.source) {
            remove_partial(&self.header_path);
            return Err(e);
        }

        tracing::info!("Header file exported to {}", self.header_path.display());
        tracing::info!("Tilemap file exported to {}", self.source_path.display());
        Ok(())
    }
}

fn remove_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!("Removed partially exported {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Render the declaration file
pub fn render_header(identifier: &str, width: u32, height: u32) -> String {
    let guard = format!("__{identifier}_h_INCLUDE");
    let lines = [
        format!("#ifndef {guard}"),
        format!("#define {guard}"),
        String::new(),
        format!("#define {identifier}Width {width}"),
        format!("#define {identifier}Height {height}"),
        String::new(),
        format!("extern const unsigned char {identifier}[];"),
        String::new(),
        "#endif".to_string(),
        String::new(),
    ];
    lines.join("\n")
}

/// Render the definition file
pub fn render_source(identifier: &str, bytes: &[u8]) -> String {
    format!(
        "#include \"{identifier}.h\"\n\nconst unsigned char {identifier}[] = {{{}\n}};\n",
        render_byte_list(bytes)
    )
}
