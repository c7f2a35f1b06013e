//! Provides pipeline configuration: where artifacts and the error report
//! live, and the default capture parameters.
//!
//! Configuration is a small JSON file; every field has a default so a missing
//! or partial file still yields a working pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::ThumbnailStore;
use crate::generator::{GenerateOptions, DEFAULT_CLIP_FRAMES, DEFAULT_IMAGE_SIZE};
use crate::report::ReportSink;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Pipeline settings with sensible defaults.
///
/// # Examples
/// ```
/// use turntable::config::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.image_size, 256);
/// assert!(config.thumbnail_root.ends_with("thumbnails"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Flat directory holding all generated artifacts.
    pub thumbnail_root: PathBuf,
    /// Error report document path.
    pub report_path: PathBuf,
    /// Square resolution of both artifacts.
    pub image_size: u32,
    /// Turntable clip length in frames.
    pub clip_frames: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            thumbnail_root: default_thumbnail_root(),
            report_path: PathBuf::from("thumbnail_errors.json"),
            image_size: DEFAULT_IMAGE_SIZE,
            clip_frames: DEFAULT_CLIP_FRAMES,
        }
    }
}

impl PipelineConfig {
    /// Loads configuration from a JSON file. Absent fields fall back to
    /// their defaults.
    ///
    /// # Errors
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the artifact store this configuration describes.
    pub fn store(&self) -> ThumbnailStore {
        ThumbnailStore::new(&self.thumbnail_root)
    }

    /// Returns the error report sink this configuration describes.
    pub fn sink(&self) -> ReportSink {
        ReportSink::new(&self.report_path)
    }

    /// Returns the capture options this configuration describes.
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            image_size: self.image_size,
            clip_frames: self.clip_frames,
        }
    }
}

fn default_thumbnail_root() -> PathBuf {
    dirs::cache_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("turntable").join("thumbnails"))
        .unwrap_or_else(|| PathBuf::from("thumbnails"))
}
