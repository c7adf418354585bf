//! File extension to MIME type table
//!
//! The local adapter has no content sniffing; the type of a file is decided
//! by its extension alone, matched case-insensitively.

use std::path::Path;

/// Type reported for files whose extension is not in the table
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Known extensions and their MIME types
pub const MIME_BY_EXTENSION: &[(&str, &str)] = &[
    // Raster images
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("xbm", "image/x-xbitmap"),
    ("webp", "image/webp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("heic", "image/heic"),
    // Vector images
    ("svg", "image/svg+xml"),
    // Video
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("mov", "video/quicktime"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("avi", "video/x-msvideo"),
    // Documents
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("pdf", "application/pdf"),
];

/// MIME type for a file name or path
pub fn mime_for_path(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return DEFAULT_MIME_TYPE;
    };

    MIME_BY_EXTENSION
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, mime_type)| *mime_type)
        .unwrap_or(DEFAULT_MIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_are_unique() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        for (ext, _) in MIME_BY_EXTENSION {
            assert!(seen.insert(ext), "Duplicate extension found: {ext}");
        }
    }

    #[test]
    fn test_extensions_are_lowercase() {
        for (ext, _) in MIME_BY_EXTENSION {
            assert_eq!(*ext, ext.to_lowercase());
        }
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a/b/photo.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("PHOTO.JPEG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("drawing.svg")), "image/svg+xml");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "text/plain");
    }

    #[test]
    fn test_unknown_extension_uses_default() {
        assert_eq!(mime_for_path(Path::new("archive.xyz")), DEFAULT_MIME_TYPE);
        assert_eq!(mime_for_path(Path::new("Makefile")), DEFAULT_MIME_TYPE);
        assert_eq!(mime_for_path(Path::new(".nomedia")), DEFAULT_MIME_TYPE);
    }
}
