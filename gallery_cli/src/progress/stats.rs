//! Running counts of a discovery walk

use gallery_core::DiscoveryEvent;

use super::utils::{format_bytes, format_count};

/// What a walk has seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Folders entered, the root included
    pub folders: u64,
    /// Qualifying files
    pub media: u64,
    /// Folders and files left out
    pub skipped: u64,
    /// Total size of the qualifying files
    pub bytes: u64,
}

impl ScanStats {
    /// Count one walk event
    pub fn record(&mut self, event: &DiscoveryEvent) {
        match event {
            DiscoveryEvent::FolderEntered { .. } => self.folders += 1,
            DiscoveryEvent::FolderSkipped { .. } | DiscoveryEvent::FileSkipped { .. } => {
                self.skipped += 1
            }
            DiscoveryEvent::MediaFound { descriptor, .. } => {
                self.media += 1;
                self.bytes += descriptor.size;
            }
        }
    }

    /// One-line description, e.g. `3 media files in 2 folders (3.00 KB), 1 skipped`
    pub fn summary(&self) -> String {
        format!(
            "{} in {} ({}), {} skipped",
            format_count(self.media, "media file"),
            format_count(self.folders, "folder"),
            format_bytes(self.bytes),
            self.skipped
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::{MediaDescriptor, SkipReason};

    fn found(size: u64) -> DiscoveryEvent {
        DiscoveryEvent::MediaFound {
            descriptor: MediaDescriptor {
                path: None,
                file_id: 1,
                mime_type: "image/jpeg".to_string(),
                mtime: None,
                etag: String::new(),
                size,
                shared_with_user: false,
            },
            previewable: true,
        }
    }

    #[test]
    fn test_record_counts_events() {
        let mut stats = ScanStats::default();
        stats.record(&DiscoveryEvent::FolderEntered {
            path: Some(String::new()),
        });
        stats.record(&found(1024));
        stats.record(&found(2048));
        stats.record(&DiscoveryEvent::FolderSkipped {
            path: Some("hidden".to_string()),
            reason: SkipReason::Marker,
        });

        assert_eq!(
            stats,
            ScanStats {
                folders: 1,
                media: 2,
                skipped: 1,
                bytes: 3072,
            }
        );
        assert_eq!(stats.summary(), "2 media files in 1 folder (3.00 KB), 1 skipped");
    }
}
