//! Loading maps saved by the Tiled editor
//!
//! Reads the Tiled JSON map format (`.tmj`, or `.json` when exported) and
//! converts it to a [`Map`]. Global tile ids are resolved against the map's
//! tilesets so every cell holds the tile's index inside its own tileset,
//! the same value Tiled reports as a cell's `tileId`.
//!
//! Maps in this crate's own serialized form (`*.map.json`) are read as-is
//! by [`load_map`].

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::layer::{Cell, Layer, LayerData};
use crate::map::Map;

/// Bits Tiled stores in a global tile id for flipping and rotation
const FLIP_FLAGS_MASK: u32 = 0xF000_0000;

/// Suffix of maps stored in this crate's own JSON form
const NATIVE_MAP_SUFFIX: &str = ".map.json";

/// Errors that can occur when loading a map
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Layer '{layer}' uses unsupported tile data encoding '{encoding}'")]
    UnsupportedEncoding { layer: String, encoding: String },

    #[error("Infinite maps are not supported")]
    InfiniteMap,

    #[error("Layer '{layer}' has {found} tiles, expected {expected}")]
    DataLength {
        layer: String,
        expected: u64,
        found: u64,
    },
}

#[derive(Debug, Deserialize)]
struct TiledMap {
    width: u32,
    height: u32,
    #[serde(default)]
    infinite: bool,
    #[serde(default)]
    layers: Vec<TiledLayer>,
    #[serde(default)]
    tilesets: Vec<TiledTilesetRef>,
}

#[derive(Debug, Deserialize)]
struct TiledTilesetRef {
    firstgid: u32,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TiledLayer {
    #[serde(rename = "tilelayer")]
    Tiles {
        #[serde(default)]
        name: String,
        #[serde(default = "default_visible")]
        visible: bool,
        #[serde(default)]
        width: u32,
        #[serde(default)]
        height: u32,
        #[serde(default)]
        data: Option<TiledData>,
        #[serde(default)]
        encoding: Option<String>,
        #[serde(default)]
        compression: Option<String>,
    },
    #[serde(rename = "objectgroup")]
    Objects {
        #[serde(default)]
        name: String,
        #[serde(default = "default_visible")]
        visible: bool,
    },
    #[serde(rename = "imagelayer")]
    Image {
        #[serde(default)]
        name: String,
        #[serde(default = "default_visible")]
        visible: bool,
        #[serde(default)]
        image: Option<String>,
    },
    #[serde(rename = "group")]
    Group {
        #[serde(default)]
        name: String,
        #[serde(default = "default_visible")]
        visible: bool,
        #[serde(default)]
        layers: Vec<TiledLayer>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TiledData {
    Gids(Vec<u32>),
    Encoded(String),
}

fn default_visible() -> bool {
    true
}

/// Load a map from disk, choosing the reader from the file name
pub fn load_map(path: &Path) -> Result<Map, LoadError> {
    let content = std::fs::read_to_string(path)?;
    let is_native = path
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(NATIVE_MAP_SUFFIX))
        .unwrap_or(false);

    if is_native {
        tracing::debug!("Reading native map {}", path.display());
        let map: Map = serde_json::from_str(&content)?;
        check_layers(&map.layers)?;
        Ok(map)
    } else {
        tracing::debug!("Reading Tiled map {}", path.display());
        parse_tiled_map(&content)
    }
}

/// Load a map in Tiled JSON format from disk
pub fn load_tiled_map(path: &Path) -> Result<Map, LoadError> {
    let content = std::fs::read_to_string(path)?;
    parse_tiled_map(&content)
}

/// Parse a map from a Tiled JSON string
pub fn parse_tiled_map(json: &str) -> Result<Map, LoadError> {
    let tiled: TiledMap = serde_json::from_str(json)?;
    if tiled.infinite {
        return Err(LoadError::InfiniteMap);
    }

    let mut first_gids: Vec<u32> = tiled.tilesets.iter().map(|t| t.firstgid).collect();
    first_gids.sort_unstable();

    let layers = tiled
        .layers
        .into_iter()
        .map(|layer| convert_layer(layer, &first_gids))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Map {
        width: tiled.width,
        height: tiled.height,
        layers,
    })
}

fn convert_layer(layer: TiledLayer, first_gids: &[u32]) -> Result<Layer, LoadError> {
    let converted = match layer {
        TiledLayer::Tiles {
            name,
            visible,
            width,
            height,
            data,
            encoding,
            compression,
        } => {
            if let Some(compression) = compression.filter(|c| !c.is_empty()) {
                return Err(LoadError::UnsupportedEncoding {
                    layer: name,
                    encoding: compression,
                });
            }
            let gids = match data {
                Some(TiledData::Gids(gids)) => gids,
                Some(TiledData::Encoded(_)) => {
                    return Err(LoadError::UnsupportedEncoding {
                        layer: name,
                        encoding: encoding.unwrap_or_else(|| "base64".to_string()),
                    });
                }
                None => Vec::new(),
            };
            check_data_length(&name, width, height, gids.len())?;
            let cells = gids.into_iter().map(|gid| gid_to_cell(gid, first_gids)).collect();
            let mut layer = Layer::from_cells(name, width, height, cells);
            layer.visible = visible;
            layer
        }
        TiledLayer::Objects { name, visible } => {
            let mut layer = Layer::new_object_layer(name);
            layer.visible = visible;
            layer
        }
        TiledLayer::Image {
            name,
            visible,
            image,
        } => {
            let mut layer = Layer::new_image_layer(name, image.filter(|i| !i.is_empty()));
            layer.visible = visible;
            layer
        }
        TiledLayer::Group {
            name,
            visible,
            layers,
        } => {
            let children = layers
                .into_iter()
                .map(|child| convert_layer(child, first_gids))
                .collect::<Result<Vec<_>, _>>()?;
            let mut layer = Layer::new_group_layer(name, children);
            layer.visible = visible;
            layer
        }
    };
    Ok(converted)
}

/// Tile data must cover the declared grid exactly
fn check_data_length(layer: &str, width: u32, height: u32, found: usize) -> Result<(), LoadError> {
    let expected = u64::from(width) * u64::from(height);
    let found = found as u64;
    if found != expected {
        return Err(LoadError::DataLength {
            layer: layer.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn check_layers(layers: &[Layer]) -> Result<(), LoadError> {
    for layer in layers {
        match &layer.data {
            LayerData::Tiles {
                width,
                height,
                cells,
            } => check_data_length(&layer.name, *width, *height, cells.len())?,
            LayerData::Group { layers } => check_layers(layers)?,
            LayerData::Objects | LayerData::Image { .. } => {}
        }
    }
    Ok(())
}

/// Resolve a global tile id to a cell holding the tileset-local index.
///
/// `first_gids` must be sorted ascending.
fn gid_to_cell(gid: u32, first_gids: &[u32]) -> Cell {
    let gid = gid & !FLIP_FLAGS_MASK;
    if gid == 0 {
        return Cell::EMPTY;
    }
    let first_gid = first_gids
        .iter()
        .rev()
        .find(|&&first| first <= gid)
        .copied()
        .unwrap_or(1);
    Cell::new(gid - first_gid)
}
