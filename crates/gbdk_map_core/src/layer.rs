//! Layer types for tile, object, image and group layers

use serde::{Deserialize, Serialize};

/// A single grid position of a tile layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell {
    /// Tileset index, `None` when nothing is placed here
    pub tile: Option<u32>,
}

impl Cell {
    /// An empty cell
    pub const EMPTY: Cell = Cell { tile: None };

    /// Create a cell holding the given tile index
    pub fn new(tile: u32) -> Self {
        Self { tile: Some(tile) }
    }

    /// Convert a host tile id, where negative values (`-1`) mean empty
    pub fn from_raw(tile_id: i64) -> Self {
        Self {
            tile: u32::try_from(tile_id).ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tile.is_none()
    }
}

/// A map layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    pub data: LayerData,
}

fn default_visible() -> bool {
    true
}

impl Layer {
    /// Create a new tile layer with every cell empty
    pub fn new_tile_layer(name: impl Into<String>, width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            name: name.into(),
            visible: true,
            data: LayerData::Tiles {
                width,
                height,
                cells: vec![Cell::EMPTY; size],
            },
        }
    }

    /// Create a tile layer from row-major cells
    pub fn from_cells(name: impl Into<String>, width: u32, height: u32, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            data: LayerData::Tiles {
                width,
                height,
                cells,
            },
        }
    }

    /// Create a new object layer
    pub fn new_object_layer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            data: LayerData::Objects,
        }
    }

    /// Create a new image layer
    pub fn new_image_layer(name: impl Into<String>, image: Option<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            data: LayerData::Image { image },
        }
    }

    /// Create a new group layer containing the given children
    pub fn new_group_layer(name: impl Into<String>, layers: Vec<Layer>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            data: LayerData::Group { layers },
        }
    }

    /// Get the type of this layer
    pub fn layer_type(&self) -> LayerType {
        match &self.data {
            LayerData::Tiles { .. } => LayerType::Tiles,
            LayerData::Objects => LayerType::Objects,
            LayerData::Image { .. } => LayerType::Image,
            LayerData::Group { .. } => LayerType::Group,
        }
    }

    /// Whether this layer exposes a tile grid
    pub fn is_tile_layer(&self) -> bool {
        matches!(self.data, LayerData::Tiles { .. })
    }

    /// Grid width in tiles, zero for layers without a grid
    pub fn width(&self) -> u32 {
        match &self.data {
            LayerData::Tiles { width, .. } => *width,
            _ => 0,
        }
    }

    /// Grid height in tiles, zero for layers without a grid
    pub fn height(&self) -> u32 {
        match &self.data {
            LayerData::Tiles { height, .. } => *height,
            _ => 0,
        }
    }

    /// Get the cell at (x, y) if this is a tile layer and the position is in bounds.
    ///
    /// Positions inside the grid that have no stored cell read as empty.
    pub fn cell_at(&self, x: u32, y: u32) -> Option<Cell> {
        match &self.data {
            LayerData::Tiles {
                width,
                height,
                cells,
            } => {
                if x >= *width || y >= *height {
                    return None;
                }
                let index = y as usize * *width as usize + x as usize;
                Some(cells.get(index).copied().unwrap_or(Cell::EMPTY))
            }
            _ => None,
        }
    }

    /// Set the cell at (x, y). Returns false if out of bounds or not a tile layer.
    pub fn set_cell(&mut self, x: u32, y: u32, cell: Cell) -> bool {
        match &mut self.data {
            LayerData::Tiles {
                width,
                height,
                cells,
            } => {
                if x >= *width || y >= *height {
                    return false;
                }
                let size = *width as usize * *height as usize;
                if cells.len() < size {
                    cells.resize(size, Cell::EMPTY);
                }
                cells[y as usize * *width as usize + x as usize] = cell;
                true
            }
            _ => false,
        }
    }
}

/// The type of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerType {
    Tiles,
    Objects,
    Image,
    Group,
}

/// The data contained in a layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LayerData {
    /// Tile layer with a row-major grid of cells
    Tiles {
        width: u32,
        height: u32,
        cells: Vec<Cell>,
    },
    /// Object layer; its contents are never read by the exporter
    Objects,
    /// Image layer
    Image {
        #[serde(default)]
        image: Option<String>,
    },
    /// Group layer holding nested layers
    Group { layers: Vec<Layer> },
}
