#[cfg(test)]
mod progress_tests {
    use gallery_cli::progress::{ProgressRenderer, ScanStats, format_bytes, format_count};
    use gallery_core::{DiscoveryEvent, MediaDescriptor, SkipReason};

    fn found(file_id: u64, size: u64) -> DiscoveryEvent {
        DiscoveryEvent::MediaFound {
            descriptor: MediaDescriptor {
                path: Some(format!("{file_id}.jpg")),
                file_id,
                mime_type: "image/jpeg".to_string(),
                mtime: None,
                etag: format!("etag-{file_id}"),
                size,
                shared_with_user: false,
            },
            previewable: true,
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "folder"), "1 folder");
        assert_eq!(format_count(2, "folder"), "2 folders");
    }

    #[test]
    fn test_progress_renderer_handles_events() {
        let mut renderer = ProgressRenderer::hidden();

        renderer.handle_event(&DiscoveryEvent::FolderEntered {
            path: Some(String::new()),
        });
        renderer.handle_event(&found(1, 1024));
        renderer.handle_event(&DiscoveryEvent::FileSkipped {
            path: Some("notes.txt".to_string()),
            file_id: 2,
            reason: SkipReason::UnsupportedType,
        });
        renderer.handle_event(&DiscoveryEvent::FolderSkipped {
            path: Some("hidden".to_string()),
            reason: SkipReason::Marker,
        });
        renderer.handle_event(&found(3, 1024));

        assert_eq!(
            renderer.stats(),
            ScanStats {
                folders: 1,
                media: 2,
                skipped: 2,
                bytes: 2048,
            }
        );

        // Finish should not panic
        renderer.finish();
    }
}
