//! Tile byte encoding and array body rendering

use gbdk_map_core::Layer;
use std::fmt::Write;

/// Number of values per line in the rendered array body
pub const VALUES_PER_LINE: usize = 10;

const LINE_INDENT: &str = "    ";
const SEPARATOR: &str = ", ";

/// Encode a tile index as one byte. Empty cells become 0, indices wrap modulo 256.
pub fn encode_tile(tile: Option<u32>) -> u8 {
    match tile {
        Some(index) => (index % 256) as u8,
        None => 0,
    }
}

/// Flatten a tile layer into bytes, row by row from the top, left to right.
///
/// Layers without a grid produce no bytes.
pub fn flatten_layer(layer: &Layer) -> Vec<u8> {
    let (width, height) = (layer.width(), layer.height());
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| encode_tile(layer.cell_at(x, y).and_then(|cell| cell.tile)))
        .collect()
}

/// Render bytes as the body of a C array initializer.
///
/// Each value is written as `0x%02x`. A line break and indent precede every
/// value whose position is a multiple of [`VALUES_PER_LINE`]; values are
/// separated by `", "` and the last separator is dropped.
pub fn render_byte_list(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 6 + bytes.len() / VALUES_PER_LINE * 5);
    for (i, byte) in bytes.iter().enumerate() {
        if i % VALUES_PER_LINE == 0 {
            out.push('\n');
            out.push_str(LINE_INDENT);
        }
        // Writing to a String cannot fail
        let _ = write!(out, "0x{:02x}", byte);
        out.push_str(SEPARATOR);
    }
    if out.ends_with(SEPARATOR) {
        out.truncate(out.len() - SEPARATOR.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbdk_map_core::Cell;

    #[test]
    fn test_encode_tile() {
        assert_eq!(encode_tile(None), 0x00);
        assert_eq!(encode_tile(Some(0)), 0x00);
        assert_eq!(encode_tile(Some(5)), 0x05);
        assert_eq!(encode_tile(Some(255)), 0xff);
        assert_eq!(encode_tile(Some(256)), 0x00);
        assert_eq!(encode_tile(Some(300)), 0x2c);
    }

    #[test]
    fn test_flatten_is_row_major() {
        let width = 3;
        let height = 4;
        let cells = (0..width * height).map(Cell::new).collect();
        let layer = Layer::from_cells("Ground", width, height, cells);

        let bytes = flatten_layer(&layer);
        assert_eq!(bytes.len(), (width * height) as usize);
        for (k, byte) in bytes.iter().enumerate() {
            let (x, y) = (k as u32 % width, k as u32 / width);
            let expected = encode_tile(layer.cell_at(x, y).unwrap().tile);
            assert_eq!(*byte, expected, "Mismatch at k={k}");
        }
    }

    #[test]
    fn test_flatten_non_tile_layer() {
        assert!(flatten_layer(&Layer::new_object_layer("Objects")).is_empty());
    }

    #[test]
    fn test_render_short_list() {
        assert_eq!(
            render_byte_list(&[0x05, 0x00, 0x2c, 0x00]),
            "\n    0x05, 0x00, 0x2c, 0x00"
        );
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_byte_list(&[]), "");
    }

    #[test]
    fn test_render_wraps_every_ten_values() {
        let bytes: Vec<u8> = (0..21).collect();
        let rendered = render_byte_list(&bytes);

        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            "    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, "
        );
        assert!(lines[2].starts_with("    0x0a, "));
        assert_eq!(lines[3], "    0x14");
        assert!(!rendered.ends_with(", "));
    }

    #[test]
    fn test_render_exact_multiple_of_ten() {
        let bytes = [0xffu8; 10];
        let rendered = render_byte_list(&bytes);
        assert_eq!(rendered.matches('\n').count(), 1);
        assert!(rendered.ends_with("0xff"));
    }
}
