//! Importing user-selected images into the media directory.
//!
//! A picked image goes through two steps before a post may reference it:
//! the input is parsed into an [`ImageRef`], then local files are copied
//! into the media directory so the post keeps pointing at a file the app
//! owns. Remote references are kept as-is.

use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;
use uuid::Uuid;

use crate::models::ImageRef;

/// Errors raised while importing an image
#[derive(Debug, Error)]
pub enum MediaError {
    /// Source path does not exist
    #[error("image not found: {0}")]
    NotFound(PathBuf),

    /// Source path is a directory or something else that isn't a file
    #[error("not a file: {0}")]
    NotAFile(PathBuf),

    /// File extension isn't a known image format
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Copy failed
    #[error("failed to copy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The directory imported images are copied into
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    dir: PathBuf,
}

impl MediaLibrary {
    /// Library rooted at `dir` (created on first import)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether `path` already lives in this library
    pub fn contains(&self, path: &Path) -> bool {
        path.parent().is_some_and(|parent| parent == self.dir)
    }

    /// Persist an image so a post can reference it.
    ///
    /// Local files are validated and copied under a fresh name; remote
    /// references and files already in the library are returned unchanged.
    pub async fn import(&self, source: ImageRef) -> Result<ImageRef, MediaError> {
        let path = match source {
            ImageRef::Remote(_) => return Ok(source),
            ImageRef::Local(path) => path,
        };

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(MediaError::NotFound(path));
            }
            Err(source) => return Err(MediaError::Io { path, source }),
        };
        if !metadata.is_file() {
            return Err(MediaError::NotAFile(path));
        }
        if ImageFormat::from_path(&path).is_err() {
            return Err(MediaError::UnsupportedFormat(path));
        }
        if self.contains(&path) {
            return Ok(ImageRef::Local(path));
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| MediaError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let target = self.dir.join(library_file_name(&path));
        tracing::debug!("Copying {} -> {}", path.display(), target.display());
        tokio::fs::copy(&path, &target)
            .await
            .map_err(|source| MediaError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(ImageRef::Local(target))
    }
}

/// Unique file name keeping the original name as a suffix
fn library_file_name(source: &Path) -> String {
    let original = source
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
    format!("{}-{original}", Uuid::new_v4().simple())
}
