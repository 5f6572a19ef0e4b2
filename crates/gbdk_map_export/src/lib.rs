//! gbdk_map_export - GBDK C file export for tile maps
//!
//! Converts the first tile layer of a [`Map`](gbdk_map_core::Map) into a
//! pair of files usable with GBDK's `set_bkg_tiles` / `set_win_tiles`:
//!
//! - **`<id>.h`** - include guard, `<id>Width` / `<id>Height` macros and an
//!   `extern` declaration of the tile array
//! - **`<id>.c`** - the tile array itself, one byte per cell in row-major order
//!
//! `<id>` is derived from the requested output file name.
//!
//! # Example
//!
//! ```rust,ignore
//! use gbdk_map_core::load_tiled_map;
//! use gbdk_map_export::export;
//!
//! let map = load_tiled_map(Path::new("level1.tmj"))?;
//! let artifact = export(&map, Path::new("build/level1.c"))?;
//! println!("wrote {}", artifact.source_path.display());
//! ```

pub mod artifact;
pub mod encode;
pub mod exporter;
pub mod format;
pub mod identifier;

pub use artifact::ExportArtifact;
pub use encode::{encode_tile, flatten_layer, render_byte_list, VALUES_PER_LINE};
pub use exporter::{export, select_tile_layer};
pub use format::{FormatRegistry, GbdkCFileFormat, MapFormat, GBDK_C_FORMAT_ID};
pub use identifier::{base_identifier, sanitize_identifier};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export failed: No Tile Layer found.")]
    NoTileLayerFound,

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
