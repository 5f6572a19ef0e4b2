//! Core data structures for gbdk_map
//!
//! This crate provides the types the exporter reads a tile map through:
//! - `Map` - A map with tile-grid dimensions and an ordered list of layers
//! - `Layer` - A single layer (tiles, objects, image or group)
//! - `Cell` - One grid position of a tile layer, possibly empty
//! - `tiled` - Loading maps saved by the Tiled editor in its JSON format

mod layer;
mod map;
pub mod tiled;

pub use layer::{Cell, Layer, LayerData, LayerType};
pub use map::Map;
pub use tiled::{load_map, load_tiled_map, parse_tiled_map, LoadError};
