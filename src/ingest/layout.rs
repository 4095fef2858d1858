//! Output directory tree of one ingestion run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::IngestError;

/// Persisted payload file name, relative to the output root.
pub const API_DATA_FILE: &str = "api-data.json";
/// Attachment directory name when downloads get their own subdirectory.
pub const DOWNLOADS_DIR: &str = "downloads";
/// Directory reserved for images produced by downstream processing.
pub const IMAGES_DIR: &str = "images";
/// Directory reserved for text extracted by downstream processing.
pub const TEXTS_DIR: &str = "extracted_texts";

/// Where attachments are written inside the output root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadsPlacement {
    /// `<root>/downloads/`
    #[default]
    Subdirectory,
    /// `<root>/` itself
    Root,
}

/// Directory tree of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Output root; holds `api-data.json`.
    pub root: PathBuf,
    /// Attachment destination.
    pub downloads: PathBuf,
    /// Reserved for downstream image extraction.
    pub images: PathBuf,
    /// Reserved for downstream text extraction.
    pub texts: PathBuf,
}

impl OutputLayout {
    /// Derives the directory tree under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, placement: DownloadsPlacement) -> Self {
        let root = root.into();
        let downloads = match placement {
            DownloadsPlacement::Subdirectory => root.join(DOWNLOADS_DIR),
            DownloadsPlacement::Root => root.clone(),
        };
        Self {
            images: root.join(IMAGES_DIR),
            texts: root.join(TEXTS_DIR),
            downloads,
            root,
        }
    }

    /// Names attachments must avoid: the payload file and the reserved
    /// directories, when downloads land in the output root.
    #[must_use]
    pub fn reserved_names(&self) -> &'static [&'static str] {
        if self.downloads == self.root {
            &[API_DATA_FILE, IMAGES_DIR, TEXTS_DIR]
        } else {
            &[]
        }
    }

    /// Path of the persisted payload.
    #[must_use]
    pub fn api_data_path(&self) -> PathBuf {
        self.root.join(API_DATA_FILE)
    }

    /// Removes any previous tree at `root`, then creates every directory.
    ///
    /// Old contents are never merged into a new run.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Layout`] when removal or creation fails.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn prepare(&self) -> Result<(), IngestError> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => info!("removed previous output directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no previous output directory");
            }
            Err(e) => return Err(IngestError::layout(&self.root, e)),
        }

        for dir in [&self.root, &self.downloads, &self.images, &self.texts] {
            create_dir(dir).await?;
        }
        Ok(())
    }
}

async fn create_dir(dir: &Path) -> Result<(), IngestError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| IngestError::layout(dir, e))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_new_subdirectory_placement() {
        let layout = OutputLayout::new("/out", DownloadsPlacement::Subdirectory);
        assert_eq!(layout.downloads, PathBuf::from("/out/downloads"));
        assert_eq!(layout.images, PathBuf::from("/out/images"));
        assert_eq!(layout.texts, PathBuf::from("/out/extracted_texts"));
        assert_eq!(layout.api_data_path(), PathBuf::from("/out/api-data.json"));
    }

    #[test]
    fn test_new_root_placement() {
        let layout = OutputLayout::new("/out", DownloadsPlacement::Root);
        assert_eq!(layout.downloads, layout.root);
        assert_eq!(
            layout.reserved_names(),
            &[API_DATA_FILE, IMAGES_DIR, TEXTS_DIR]
        );
        assert!(
            OutputLayout::new("/out", DownloadsPlacement::Subdirectory)
                .reserved_names()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_prepare_creates_all_directories() {
        let temp = TempDir::new().unwrap();
        let layout = OutputLayout::new(temp.path().join("run"), DownloadsPlacement::Subdirectory);

        layout.prepare().await.unwrap();

        for dir in [&layout.root, &layout.downloads, &layout.images, &layout.texts] {
            assert!(dir.is_dir(), "{} missing", dir.display());
        }
    }

    #[tokio::test]
    async fn test_prepare_discards_previous_contents() {
        let temp = TempDir::new().unwrap();
        let layout = OutputLayout::new(temp.path().join("run"), DownloadsPlacement::Subdirectory);
        std::fs::create_dir_all(&layout.downloads).unwrap();
        std::fs::write(layout.downloads.join("stale.pdf"), b"old").unwrap();
        std::fs::write(layout.root.join("notes.txt"), b"old").unwrap();

        layout.prepare().await.unwrap();

        assert!(!layout.downloads.join("stale.pdf").exists());
        assert!(!layout.root.join("notes.txt").exists());
        assert!(layout.downloads.is_dir());
    }
}
