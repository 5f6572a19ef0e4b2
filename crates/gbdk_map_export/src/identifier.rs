//! C identifier derivation from output file names

use std::path::Path;

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
///
/// Characters are counted in UTF-16 code units, so a character outside the
/// Basic Multilingual Plane becomes `__`. Applying it twice gives the same
/// result as applying it once.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        } else {
            out.extend(std::iter::repeat('_').take(c.len_utf16()));
        }
    }
    out
}

/// Derive the base identifier from an output path.
///
/// Uses the file name up to its last `.` (`maps/level1.c` gives `level1`,
/// `world.v2.c` gives `world_v2`, `.c` gives an empty identifier).
pub fn base_identifier(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let stem = match file_name.rfind('.') {
        Some(dot) => &file_name[..dot],
        None => &file_name[..],
    };
    sanitize_identifier(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("level1"), "level1");
        assert_eq!(sanitize_identifier("my map v2"), "my_map_v2");
        assert_eq!(sanitize_identifier("a-b_c"), "a-b_c");
        assert_eq!(sanitize_identifier("caf\u{e9}!"), "caf__");
        assert_eq!(sanitize_identifier(""), "");
        assert_eq!(sanitize_identifier("\u{1f600}x"), "__x");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["level1", "my map v2", "w(e)i.r/d", "\u{1f600}x", "--__--"] {
            let once = sanitize_identifier(input);
            assert_eq!(sanitize_identifier(&once), once, "Failed for {input}");
        }
    }

    #[test]
    fn test_base_identifier() {
        assert_eq!(base_identifier(Path::new("level1.c")), "level1");
        assert_eq!(base_identifier(Path::new("my map v2.c")), "my_map_v2");
        assert_eq!(base_identifier(Path::new("out/world.v2.h")), "world_v2");
        assert_eq!(base_identifier(Path::new("noext")), "noext");
        assert_eq!(base_identifier(Path::new("out/.c")), "");
        assert_eq!(base_identifier(Path::new(".hidden.map.c")), "_hidden_map");
    }
}
