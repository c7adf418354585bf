//! Scan and info command orchestrator
//!
//! This module handles the business logic of the `scan` and `info` commands,
//! coordinating between the CLI, the local storage adapter and the core
//! discovery service. Walks run on the blocking thread pool.

use crate::error::{CliError, CliResult, ErrorContext};
use crate::progress::{
    ChannelObserver, ScanStats, create_progress_infrastructure, render_progress,
};
use crate::storage::{LocalFolder, LocalStorage};
use gallery_core::media::mime;
use gallery_core::{
    DiscoveryConfig, File, FileId, FeatureSet, MediaDescriptor, MediaDiscovery, MediaQuery,
};
use log::debug;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Options for a scan
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// MIME types to accept; the configured types when empty
    pub media_types: Vec<String>,
    /// Features enabled on top of the configured ones
    pub features: Vec<String>,
    /// Draw a spinner while walking
    pub show_progress: bool,
    /// Give up when the walk takes longer
    pub timeout: Option<Duration>,
}

/// Outcome of a scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub media: Vec<MediaDescriptor>,
    pub stats: ScanStats,
    pub elapsed: Duration,
}

/// Orchestrator for the scan and info commands
pub struct ScanOrchestrator {
    config: DiscoveryConfig,
}

impl ScanOrchestrator {
    /// Create an orchestrator, rejecting an invalid configuration
    pub fn new(config: DiscoveryConfig) -> CliResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Build the query for a scan from the configuration and the options
    pub fn query(&self, options: &ScanOptions) -> CliResult<MediaQuery> {
        let media_types = if options.media_types.is_empty() {
            &self.config.media_types
        } else {
            &options.media_types
        };
        let features = FeatureSet::parse(self.config.features.iter().chain(&options.features));
        debug!(
            "Query: types {media_types:?}, features {:?}",
            features.iter().collect::<Vec<_>>()
        );

        Ok(MediaQuery::new(media_types, &features)?)
    }

    /// Discover the media under `path`
    pub async fn scan(&self, path: &Path, options: ScanOptions) -> CliResult<ScanReport> {
        let storage = open_storage(path)?;
        let root = storage.root_folder()?;

        let query = self.query(&options)?;
        let service = MediaDiscovery::new(storage, self.config.clone())?;

        let (observer, rx) = create_progress_infrastructure();
        let observer = options.show_progress.then_some(observer);
        let renderer = options
            .show_progress
            .then(|| tokio::spawn(render_progress(rx)));

        debug!("Scanning {}", path.display());
        let start = Instant::now();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let walk = tokio::task::spawn_blocking(move || {
            run_walk(&service, &root, &query, observer.as_ref(), &flag)
        });

        let joined = match options.timeout {
            Some(limit) => match tokio::time::timeout(limit, walk).await {
                Ok(joined) => joined,
                Err(_) => {
                    cancelled.store(true, Ordering::Relaxed);
                    if let Some(handle) = renderer {
                        handle.abort();
                    }
                    return Err(CliError::timeout(limit)
                        .with_context("path", &path.display().to_string()));
                }
            },
            None => walk.await,
        };
        let (media, stats) =
            joined.map_err(|e| CliError::general(&format!("Discovery task failed: {e}")))?;

        // The walk dropped its sender, so the renderer is finishing
        if let Some(handle) = renderer {
            let _ = handle.await;
        }

        let elapsed = start.elapsed();
        debug!("Scan finished in {elapsed:?}: {}", stats.summary());
        Ok(ScanReport {
            media,
            stats,
            elapsed,
        })
    }

    /// Describe the readable file with identifier `id` under `root`
    pub async fn info(&self, root: &Path, id: FileId) -> CliResult<MediaDescriptor> {
        let storage = open_storage(root)?;
        let root = storage.root().to_path_buf();
        let service = MediaDiscovery::new(storage, self.config.clone())?;

        let lookup = tokio::task::spawn_blocking(move || -> CliResult<MediaDescriptor> {
            let file = service.resolve_file(id)?;
            let mime_type = mime::normalize(&file.mime_type()?);
            let path = relative_path(&root, file.path());
            Ok(MediaDescriptor::from_file(&file, path, mime_type))
        });

        lookup
            .await
            .map_err(|e| CliError::general(&format!("Lookup task failed: {e}")))?
    }
}

/// Drive a walk to the end or until `cancelled` is set
fn run_walk(
    service: &MediaDiscovery<LocalStorage>,
    root: &LocalFolder,
    query: &MediaQuery,
    observer: Option<&ChannelObserver>,
    cancelled: &AtomicBool,
) -> (Vec<MediaDescriptor>, ScanStats) {
    let mut stats = ScanStats::default();
    let mut media = Vec::new();

    for event in service.walk(root, query) {
        if cancelled.load(Ordering::Relaxed) {
            debug!("Walk cancelled after {}", stats.summary());
            break;
        }

        stats.record(&event);
        if let Some(observer) = observer {
            observer.observe(&event);
        }
        media.extend(event.into_media());
    }

    (media, stats)
}

fn open_storage(path: &Path) -> CliResult<LocalStorage> {
    if !path.exists() {
        return Err(CliError::filesystem(&format!("Path not found: {}", path.display()))
            .with_context("path", &path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(CliError::misuse(&format!(
            "Not a directory: {}",
            path.display()
        )));
    }

    Ok(LocalStorage::open(path)?)
}

/// Path of `path` below `root`, joined with `/`
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("beach.jpg"), b"jpeg").unwrap();
        fs::write(base.join("logo.svg"), b"<svg/>").unwrap();
        fs::write(base.join("notes.txt"), b"text").unwrap();

        let album = base.join("album");
        fs::create_dir(&album).unwrap();
        fs::write(album.join("one.jpg"), b"one").unwrap();

        let deeper = album.join("deeper");
        fs::create_dir(&deeper).unwrap();
        fs::write(deeper.join("two.png"), b"two").unwrap();

        let hidden = base.join("hidden");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join(".nomedia"), b"").unwrap();
        fs::write(hidden.join("secret.jpg"), b"secret").unwrap();

        dir
    }

    fn orchestrator() -> ScanOrchestrator {
        ScanOrchestrator::new(DiscoveryConfig::default()).unwrap()
    }

    /// Many folders of files, so a walk takes measurable time
    fn create_large_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        for folder in 0..100 {
            let path = dir.path().join(format!("folder{folder:03}"));
            fs::create_dir(&path).unwrap();
            for file in 0..20 {
                fs::write(path.join(format!("photo{file:02}.jpg")), b"jpeg").unwrap();
            }
        }
        dir
    }

    fn paths(report: &ScanReport) -> Vec<&str> {
        report
            .media
            .iter()
            .filter_map(|m| m.path.as_deref())
            .collect()
    }

    #[tokio::test]
    async fn test_scan_uses_configured_types() {
        let dir = create_test_directory();

        let report = orchestrator()
            .scan(dir.path(), ScanOptions::default())
            .await
            .unwrap();

        assert_eq!(
            paths(&report),
            vec!["album/deeper/two.png", "album/one.jpg", "beach.jpg"]
        );
        assert_eq!(report.stats.media, 3);
        assert_eq!(report.stats.folders, 3);
    }

    #[tokio::test]
    async fn test_scan_with_types_and_features() {
        let dir = create_test_directory();
        let options = ScanOptions {
            media_types: vec!["image/jpeg".to_string()],
            features: vec!["native_svg".to_string()],
            ..Default::default()
        };

        let report = orchestrator().scan(dir.path(), options).await.unwrap();

        assert_eq!(paths(&report), vec!["album/one.jpg", "beach.jpg", "logo.svg"]);
    }

    #[tokio::test]
    async fn test_scan_max_depth() {
        let dir = create_test_directory();
        let config = DiscoveryConfig {
            max_depth: Some(0),
            ..Default::default()
        };

        let report = ScanOrchestrator::new(config)
            .unwrap()
            .scan(dir.path(), ScanOptions::default())
            .await
            .unwrap();

        assert_eq!(paths(&report), vec!["beach.jpg"]);
    }

    #[tokio::test]
    async fn test_scan_missing_path() {
        let dir = TempDir::new().unwrap();

        let err = orchestrator()
            .scan(&dir.path().join("missing"), ScanOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.exit_code() as i32, 4);
    }

    #[tokio::test]
    async fn test_scan_rejects_malformed_type() {
        let dir = create_test_directory();
        let options = ScanOptions {
            media_types: vec!["jpeg".to_string()],
            ..Default::default()
        };

        let err = orchestrator().scan(dir.path(), options).await.unwrap_err();

        assert_eq!(err.exit_code() as i32, 2);
    }

    #[tokio::test]
    async fn test_info_resolves_file() {
        let dir = create_test_directory();
        let report = orchestrator()
            .scan(dir.path(), ScanOptions::default())
            .await
            .unwrap();
        let wanted = report.media[1].clone();

        let media = orchestrator().info(dir.path(), wanted.file_id).await.unwrap();

        assert_eq!(media, wanted);
    }

    #[tokio::test]
    async fn test_info_rejects_folders() {
        let dir = create_test_directory();
        let storage = LocalStorage::open(dir.path()).unwrap();
        let root_id = gallery_core::Folder::id(&storage.root_folder().unwrap());

        let err = orchestrator().info(dir.path(), root_id).await.unwrap_err();

        assert_eq!(err.exit_code() as i32, 3);
    }

    #[tokio::test]
    async fn test_scan_timeout() {
        let dir = create_large_directory();
        let options = ScanOptions {
            timeout: Some(Duration::ZERO),
            ..Default::default()
        };

        let err = orchestrator().scan(dir.path(), options).await.unwrap_err();

        assert_eq!(err.exit_code() as i32, 5);
        assert!(err.to_string().contains("Discovery did not finish"));
    }

    #[tokio::test]
    async fn test_scan_within_timeout() {
        let dir = create_test_directory();
        let options = ScanOptions {
            timeout: Some(Duration::from_secs(60)),
            ..Default::default()
        };

        let report = orchestrator().scan(dir.path(), options).await.unwrap();

        assert_eq!(report.media.len(), 3);
    }

    #[test]
    fn test_cancelled_walk_stops() {
        let dir = create_large_directory();
        let storage = LocalStorage::open(dir.path()).unwrap();
        let root = storage.root_folder().unwrap();
        let service = MediaDiscovery::with_defaults(storage);
        let query = DiscoveryConfig::default().query().unwrap();

        let (media, stats) = run_walk(&service, &root, &query, None, &AtomicBool::new(true));
        assert!(media.is_empty());
        assert_eq!(stats, ScanStats::default());

        let (media, stats) = run_walk(&service, &root, &query, None, &AtomicBool::new(false));
        assert_eq!(media.len(), 2000);
        assert_eq!(stats.folders, 101);
    }

    #[test]
    fn test_relative_path() {
        let root = Path::new("/srv/photos");
        assert_eq!(
            relative_path(root, Path::new("/srv/photos/2015/a.jpg")),
            Some("2015/a.jpg".to_string())
        );
        assert_eq!(relative_path(root, Path::new("/elsewhere/a.jpg")), None);
    }
}
