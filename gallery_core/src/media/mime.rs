//! MIME type tables and normalization

/// SVG images, only served when native SVG rendering is enabled
pub const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Media types offered to a gallery when the caller does not supply a list
pub const DEFAULT_MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/x-xbitmap",
    "image/webp",
    "image/tiff",
];

/// Types the preview generator can rasterize
pub const PREVIEW_RASTER_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/x-xbitmap",
    "image/webp",
    "image/tiff",
];

/// Normalize a MIME type for comparison
///
/// Trims whitespace, drops parameters (`; charset=...`) and lower-cases.
pub fn normalize(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Check that a normalized MIME type has the `type/subtype` shape
pub fn is_well_formed(mime_type: &str) -> bool {
    let mut parts = mime_type.splitn(2, '/');
    match (parts.next(), parts.next()) {
        (Some(kind), Some(subtype)) => {
            !kind.is_empty()
                && !subtype.is_empty()
                && !subtype.contains('/')
                && !mime_type.contains(char::is_whitespace)
        }
        _ => false,
    }
}

/// Whether previews can be generated for this (normalized) type
pub fn supports_raster_preview(mime_type: &str) -> bool {
    PREVIEW_RASTER_TYPES.contains(&mime_type)
}
