//! Named export formats
//!
//! Hosts look formats up by id or by the extension of the chosen output
//! file, then hand them the map and the full output path.

use gbdk_map_core::Map;
use std::path::Path;

use crate::exporter::export;

/// Registration id of the GBDK C file format
pub const GBDK_C_FORMAT_ID: &str = "TiledToGbdkCFileExport";

/// A map export format invoked with a map and a full output path
pub trait MapFormat {
    /// Human-readable name shown to the user
    fn name(&self) -> &str;

    /// File extensions this format produces, without the leading dot
    fn extensions(&self) -> &[&str];

    /// Write the map. Errors are returned as a message for the user.
    fn write(&self, map: &Map, path: &Path) -> Result<(), String>;
}

/// Tile array as a GBDK C source and header pair
#[derive(Debug, Default, Clone, Copy)]
pub struct GbdkCFileFormat;

impl MapFormat for GbdkCFileFormat {
    fn name(&self) -> &str {
        "GBDK C file"
    }

    fn extensions(&self) -> &[&str] {
        &["c", "h"]
    }

    fn write(&self, map: &Map, path: &Path) -> Result<(), String> {
        export(map, path).map(|_| ()).map_err(|e| e.to_string())
    }
}

/// Registry of export formats keyed by id, in registration order
#[derive(Default)]
pub struct FormatRegistry {
    formats: Vec<(String, Box<dyn MapFormat>)>,
}

impl FormatRegistry {
    /// Registry holding every format this crate provides
    pub fn with_builtin_formats() -> Self {
        let mut registry = Self::default();
        registry.register_format(GBDK_C_FORMAT_ID, Box::new(GbdkCFileFormat));
        registry
    }

    /// Register a format. An existing format with the same id is replaced.
    pub fn register_format(&mut self, id: impl Into<String>, format: Box<dyn MapFormat>) {
        let id = id.into();
        if let Some(entry) = self.formats.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = format;
        } else {
            self.formats.push((id, format));
        }
    }

    /// Look a format up by id
    pub fn format(&self, id: &str) -> Option<&dyn MapFormat> {
        self.formats
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, format)| format.as_ref())
    }

    /// Find the first format producing the extension of `path` (case-insensitive)
    pub fn format_for_path(&self, path: &Path) -> Option<&dyn MapFormat> {
        let ext = path.extension()?.to_string_lossy();
        self.formats
            .iter()
            .find(|(_, format)| {
                format
                    .extensions()
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(&ext))
            })
            .map(|(_, format)| format.as_ref())
    }

    /// Iterate over `(id, format)` pairs in registration order
    pub fn formats(&self) -> impl Iterator<Item = (&str, &dyn MapFormat)> {
        self.formats
            .iter()
            .map(|(id, format)| (id.as_str(), format.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gbdk_map_core::{Cell, Layer};

    struct NamedFormat(&'static str, &'static [&'static str]);

    impl MapFormat for NamedFormat {
        fn name(&self) -> &str {
            self.0
        }

        fn extensions(&self) -> &[&str] {
            self.1
        }

        fn write(&self, _map: &Map, _path: &Path) -> Result<(), String> {
            Ok(())
        }
    }

    #[test]
    fn builtin_format_lookup() {
        let registry = FormatRegistry::with_builtin_formats();

        let format = registry.format(GBDK_C_FORMAT_ID).unwrap();
        assert_eq!(format.name(), "GBDK C file");
        assert!(registry.format("unknown").is_none());

        assert_eq!(
            registry.format_for_path(Path::new("level1.C")).unwrap().name(),
            "GBDK C file"
        );
        assert_eq!(
            registry.format_for_path(Path::new("level1.h")).unwrap().name(),
            "GBDK C file"
        );
        assert!(registry.format_for_path(Path::new("level1.tmj")).is_none());
        assert!(registry.format_for_path(Path::new("level1")).is_none());
    }

    #[test]
    fn register_replaces_same_id() {
        let mut registry = FormatRegistry::with_builtin_formats();
        registry.register_format("csv", Box::new(NamedFormat("CSV", &["csv"])));
        registry.register_format(GBDK_C_FORMAT_ID, Box::new(NamedFormat("Custom C", &["c"])));

        let ids: Vec<&str> = registry.formats().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![GBDK_C_FORMAT_ID, "csv"]);
        assert_eq!(registry.format(GBDK_C_FORMAT_ID).unwrap().name(), "Custom C");
    }

    #[test]
    fn gbdk_format_reports_error_message() {
        let tmp = tempfile::tempdir().unwrap();
        let map = Map::new(1, 1).with_layer(Layer::new_object_layer("Objects"));

        let result = GbdkCFileFormat.write(&map, &tmp.path().join("level1.c"));
        assert_eq!(
            result,
            Err("Export failed: No Tile Layer found.".to_string())
        );
    }

    #[test]
    fn gbdk_format_writes_files() {
        let tmp = tempfile::tempdir().unwrap();
        let map = Map::new(1, 1).with_layer(Layer::from_cells("Ground", 1, 1, vec![Cell::new(1)]));

        GbdkCFileFormat
            .write(&map, &tmp.path().join("one.c"))
            .unwrap();
        let source = std::fs::read_to_string(tmp.path().join("one.c")).unwrap();
        assert!(source.contains("{\n    0x01\n};"));
    }
}
