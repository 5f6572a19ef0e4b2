//! Export entry point

use gbdk_map_core::{Layer, Map};
use std::path::Path;
use std::time::Instant;

use crate::artifact::ExportArtifact;
use crate::ExportError;

/// Find the first top-level tile layer. Later tile layers are ignored.
pub fn select_tile_layer(map: &Map) -> Result<&Layer, ExportError> {
    let mut tile_layers = map.layers().enumerate().filter(|(_, l)| l.is_tile_layer());

    let (index, layer) = tile_layers.next().ok_or(ExportError::NoTileLayerFound)?;
    tracing::debug!("Exporting tile layer {} ('{}')", index, layer.name);

    let ignored = tile_layers.count();
    if ignored > 0 {
        tracing::debug!("Ignoring {} additional tile layer(s)", ignored);
    }
    Ok(layer)
}

/// Export the first tile layer of `map` as `<id>.h` and `<id>.c` next to `output_path`.
///
/// Nothing is written if the map has no tile layer.
pub fn export(map: &Map, output_path: &Path) -> Result<ExportArtifact, ExportError> {
    let started = Instant::now();

    let artifact = ExportArtifact::render(map, output_path)?;
    artifact.write()?;

    tracing::info!("Export completed in {:?}", started.elapsed());
    Ok(artifact)
}
