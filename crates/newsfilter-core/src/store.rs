//! Feed cache file storage with XDG path support.
//!
//! Feeds and their items are stored as JSON at `~/.cache/nf/feeds.json`
//! unless another path is given.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::feed::RssFeed;

/// Default cache filename.
const CACHE_FILENAME: &str = "feeds.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "nf";

/// Errors that can occur during feed storage operations.
#[derive(Debug, Error)]
pub enum FeedStoreError {
    /// Failed to determine XDG cache directory.
    #[error("failed to determine cache directory: no valid home directory found")]
    NoCacheDir,

    /// I/O error during file read.
    #[error("failed to read feed cache '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write feed cache '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create cache directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for feed store operations.
pub type Result<T> = std::result::Result<T, FeedStoreError>;

/// Persistent storage for feeds.
///
/// # Example
///
/// ```no_run
/// use newsfilter_core::FeedStore;
///
/// let store = FeedStore::new()?;
/// let feeds = store.load_or_default()?;
/// store.save(&feeds)?;
/// # Ok::<(), newsfilter_core::FeedStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FeedStore {
    /// Path to the cache file.
    path: PathBuf,
}

impl FeedStore {
    /// Creates a store at the default XDG cache path.
    ///
    /// # Errors
    ///
    /// Returns `FeedStoreError::NoCacheDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates a store with a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the default XDG cache path for the feed file.
    ///
    /// On Unix: `~/.cache/nf/feeds.json`
    ///
    /// # Errors
    ///
    /// Returns `FeedStoreError::NoCacheDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(FeedStoreError::NoCacheDir)?;

        Ok(project_dirs.cache_dir().join(CACHE_FILENAME))
    }

    /// Returns the path to the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the feeds from disk.
    ///
    /// # Errors
    ///
    /// - Returns `FeedStoreError::ReadError` if the file cannot be read.
    /// - Returns `FeedStoreError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<Vec<RssFeed>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| FeedStoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        let feeds: Vec<RssFeed> = serde_json::from_str(&contents)?;
        tracing::debug!(path = %self.path.display(), feeds = feeds.len(), "loaded feed cache");
        Ok(feeds)
    }

    /// Loads the feeds, returning an empty list if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `FeedStoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `FeedStoreError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<Vec<RssFeed>> {
        match self.load() {
            Ok(feeds) => Ok(feeds),
            Err(FeedStoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the feeds to disk.
    ///
    /// Creates the parent directory if needed and writes through a temporary
    /// file that is renamed into place.
    ///
    /// # Errors
    ///
    /// - Returns `FeedStoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `FeedStoreError::WriteError` if the file cannot be written.
    /// - Returns `FeedStoreError::Json` if serialization fails.
    pub fn save(&self, feeds: &[RssFeed]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| FeedStoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(feeds)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| FeedStoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| FeedStoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    /// Returns true if the cache file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
