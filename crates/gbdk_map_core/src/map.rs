//! Map type: tile-grid dimensions plus an ordered layer list

use serde::{Deserialize, Serialize};

use crate::layer::Layer;

/// A tile map as seen by the exporter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Map {
    /// Width in tiles
    pub width: u32,
    /// Height in tiles
    pub height: u32,
    /// Layers in their defined order, bottom to top
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Map {
    /// Create an empty map with the given tile-grid dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
        }
    }

    /// Append a layer on top of the existing ones
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Number of top-level layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Get a top-level layer by index
    pub fn layer_at(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Iterate over top-level layers in order. Group children are not visited.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_order() {
        let map = Map::new(4, 4)
            .with_layer(Layer::new_object_layer("Objects"))
            .with_layer(Layer::new_tile_layer("Ground", 4, 4));

        assert_eq!(map.layer_count(), 2);
        assert_eq!(map.layer_at(0).unwrap().name, "Objects");
        assert_eq!(map.layer_at(1).unwrap().name, "Ground");
        assert!(map.layer_at(2).is_none());
    }

    #[test]
    fn test_map_json_roundtrip() {
        let map = Map::new(2, 2).with_layer(Layer::new_tile_layer("Ground", 2, 2));

        let json = serde_json::to_string_pretty(&map).unwrap();
        let parsed: Map = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.width, 2);
        assert_eq!(parsed.height, 2);
        assert_eq!(parsed.layer_count(), 1);
        assert!(parsed.layers[0].is_tile_layer());
    }
}
