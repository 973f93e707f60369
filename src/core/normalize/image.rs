//! Derived image columns
//!
//! Image names, file formats and resolution strings are derived from the
//! descriptor the uploader produced. Nothing here touches image content.

use crate::domain::known::UNKNOWN;

/// Strips the trailing extension from a file name
///
/// Only the last dot-suffix is removed, and only when it is non-empty and
/// contains no `/`.
///
/// # Examples
///
/// ```
/// use grantha_export::core::normalize::strip_extension;
///
/// assert_eq!(strip_extension("page01.tif"), "page01");
/// assert_eq!(strip_extension("leaf.12.jpeg"), "leaf.12");
/// assert_eq!(strip_extension("README"), "README");
/// ```
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() && !name[dot + 1..].contains('/') => &name[..dot],
        _ => name,
    }
}

/// Upper-case file format, e.g. `"TIF"` for `".tif"`
///
/// Uses the declared extension when present, otherwise the suffix of `name`.
/// Returns `"Unknown"` when neither yields a format.
pub fn file_format(extension: Option<&str>, name: &str) -> String {
    let declared = extension
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.strip_prefix('.').unwrap_or(ext));

    let format = match declared {
        Some(ext) => ext.to_uppercase(),
        None => {
            let stem = strip_extension(name);
            if stem.len() == name.len() {
                String::new()
            } else {
                name[stem.len() + 1..].to_uppercase()
            }
        }
    };

    if format.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        format
    }
}

/// Formats a resolution pair as `"{h}x{v}"`
///
/// Each component is rounded to the nearest integer, halves rounding up.
/// Anything other than two finite numbers that round to a whole dpi between
/// 1 and `u32::MAX` yields `"Unknown"`.
///
/// # Examples
///
/// ```
/// use grantha_export::core::normalize::resolution_dpi;
///
/// assert_eq!(resolution_dpi(Some(&[300.4, 300.6][..])), "300x301");
/// assert_eq!(resolution_dpi(Some(&[-72.0, 72.0][..])), "Unknown");
/// assert_eq!(resolution_dpi(None), "Unknown");
/// ```
pub fn resolution_dpi(dpi: Option<&[f64]>) -> String {
    match dpi {
        Some(&[h, v]) => match (dpi_component(h), dpi_component(v)) {
            (Some(h), Some(v)) => format!("{h}x{v}"),
            _ => UNKNOWN.to_string(),
        },
        _ => UNKNOWN.to_string(),
    }
}

/// One rounded resolution component, if it is a usable dpi
fn dpi_component(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    let rounded = (value + 0.5).floor();
    if rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("page01.tif", "page01" ; "simple")]
    #[test_case("a.jpg", "a" ; "short")]
    #[test_case("leaf.12.jpeg", "leaf.12" ; "only last suffix")]
    #[test_case("noext", "noext" ; "no dot")]
    #[test_case("trailing.", "trailing." ; "empty suffix kept")]
    #[test_case("dir.v2/scan", "dir.v2/scan" ; "dot before slash")]
    fn test_strip_extension(name: &str, expected: &str) {
        assert_eq!(strip_extension(name), expected);
    }

    #[test_case(Some(".tif"), "page01.tif", "TIF" ; "declared")]
    #[test_case(Some("jpg"), "a.jpg", "JPG" ; "declared without dot")]
    #[test_case(Some(".Jpeg"), "a.jpeg", "JPEG" ; "mixed case")]
    #[test_case(None, "scan.png", "PNG" ; "derived from name")]
    #[test_case(Some("  "), "scan.png", "PNG" ; "blank falls back to name")]
    #[test_case(None, "scan", "Unknown" ; "nothing to derive")]
    #[test_case(Some("."), "scan", "Unknown" ; "dot only")]
    fn test_file_format(extension: Option<&str>, name: &str, expected: &str) {
        assert_eq!(file_format(extension, name), expected);
    }

    #[test]
    fn test_resolution_rounding() {
        assert_eq!(resolution_dpi(Some(&[300.4, 300.6][..])), "300x301");
        assert_eq!(resolution_dpi(Some(&[600.0, 600.0][..])), "600x600");
        assert_eq!(resolution_dpi(Some(&[299.5, 72.49][..])), "300x72");
    }

    #[test]
    fn test_resolution_unknown() {
        assert_eq!(resolution_dpi(None), "Unknown");
        assert_eq!(resolution_dpi(Some(&[][..])), "Unknown");
        assert_eq!(resolution_dpi(Some(&[300.0][..])), "Unknown");
        assert_eq!(resolution_dpi(Some(&[300.0, 300.0, 1.0][..])), "Unknown");
        assert_eq!(resolution_dpi(Some(&[f64::NAN, 300.0][..])), "Unknown");
        assert_eq!(resolution_dpi(Some(&[300.0, f64::INFINITY][..])), "Unknown");
    }

    #[test_case(-72.0 ; "negative")]
    #[test_case(-0.5 ; "negative half")]
    #[test_case(0.0 ; "zero")]
    #[test_case(0.49 ; "rounds to zero")]
    #[test_case(5.0e9 ; "beyond u32")]
    #[test_case(1.0e300 ; "huge")]
    fn test_resolution_out_of_range(component: f64) {
        assert_eq!(resolution_dpi(Some(&[component, 300.0][..])), "Unknown");
        assert_eq!(resolution_dpi(Some(&[300.0, component][..])), "Unknown");
    }

    #[test]
    fn test_resolution_bounds() {
        assert_eq!(resolution_dpi(Some(&[0.5, 1.0][..])), "1x1");
        assert_eq!(resolution_dpi(Some(&[4294967295.0, 2400.5][..])), "4294967295x2401");
    }
}
