use crate::media::mime;
use crate::storage::File;

/// Whether the preview generator could produce a thumbnail for `file`
///
/// Only checks readability and type. Nothing is fetched or rendered.
pub(crate) fn is_preview_eligible<F: File>(file: &F) -> bool {
    if !file.is_readable() {
        return false;
    }
    match file.mime_type() {
        Ok(mime_type) => mime::supports_raster_preview(&mime::normalize(&mime_type)),
        Err(e) => {
            log::debug!("No MIME type for file {}: {e}", file.id());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use crate::error::StorageError;
    use crate::storage::FileId;

    struct StubFile {
        readable: bool,
        mime_type: Option<&'static str>,
    }

    impl File for StubFile {
        fn id(&self) -> FileId {
            7
        }
        fn name(&self) -> Option<&str> {
            None
        }
        fn is_readable(&self) -> bool {
            self.readable
        }
        fn mime_type(&self) -> Result<String> {
            self.mime_type
                .map(str::to_string)
                .ok_or_else(|| StorageError::other("broken entry").into())
        }
        fn size(&self) -> u64 {
            0
        }
        fn mtime(&self) -> Option<i64> {
            None
        }
        fn etag(&self) -> &str {
            ""
        }
        fn is_shared_with_user(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_readable_raster_file_is_eligible() {
        let file = StubFile {
            readable: true,
            mime_type: Some("image/JPEG"),
        };
        assert!(is_preview_eligible(&file));
    }

    #[test]
    fn test_unreadable_file_is_not_eligible() {
        let file = StubFile {
            readable: false,
            mime_type: Some("image/jpeg"),
        };
        assert!(!is_preview_eligible(&file));
    }

    #[test]
    fn test_broken_file_is_not_eligible() {
        let file = StubFile {
            readable: true,
            mime_type: None,
        };
        assert!(!is_preview_eligible(&file));
    }

    #[test]
    fn test_vector_and_video_are_not_eligible() {
        for mime_type in ["image/svg+xml", "video/mp4", "application/pdf"] {
            let file = StubFile {
                readable: true,
                mime_type: Some(mime_type),
            };
            assert!(!is_preview_eligible(&file), "{mime_type} should not be eligible");
        }
    }
}
