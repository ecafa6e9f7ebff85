//! Persistent snapshot of the sandbox registry.
//!
//! Each CLI invocation loads one consistent snapshot from a JSON catalog
//! file, applies a single operation, and writes the result back. The
//! catalog stands in for the cluster's own durable state when no transport
//! is configured; interleaved invocations each observe the snapshot taken
//! at the instant of their call.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use thiserror::Error;

use crate::store::StoreSnapshot;

/// Errors raised while reading or writing the catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Raised when the catalog path has no filename component.
    #[error("catalog path {path} is missing a filename")]
    InvalidPath {
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// Raised when file system operations fail.
    #[error("failed to access {path}: {message}")]
    Io {
        /// Path that could not be accessed.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
    /// Raised when existing catalog content cannot be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse {
        /// Path that could not be parsed.
        path: Utf8PathBuf,
        /// Parser error message.
        message: String,
    },
}

/// Reads and writes registry snapshots at a fixed path.
#[derive(Clone, Debug)]
pub struct Catalog {
    path: Utf8PathBuf,
}

impl Catalog {
    /// Creates a catalog over the given file path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the catalog file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Loads the registry snapshot, returning an empty one when the catalog
    /// file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the file cannot be read or parsed.
    pub fn load(&self) -> Result<StoreSnapshot, CatalogError> {
        let (parent, file_name) = self.split_path()?;
        let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoreSnapshot::default());
            }
            Err(err) => {
                return Err(CatalogError::Io {
                    path: parent.to_path_buf(),
                    message: err.to_string(),
                });
            }
        };

        let contents = match dir.read_to_string(file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(StoreSnapshot::default());
            }
            Err(err) => {
                return Err(CatalogError::Io {
                    path: self.path.clone(),
                    message: err.to_string(),
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(StoreSnapshot::default());
        }
        serde_json::from_str(&contents).map_err(|err| CatalogError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        })
    }

    /// Writes the registry snapshot, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the file cannot be serialized or
    /// written.
    pub fn save(&self, snapshot: &StoreSnapshot) -> Result<(), CatalogError> {
        let (parent, file_name) = self.split_path()?;
        Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|err| {
            CatalogError::Io {
                path: parent.to_path_buf(),
                message: err.to_string(),
            }
        })?;
        let dir =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| CatalogError::Io {
                path: parent.to_path_buf(),
                message: err.to_string(),
            })?;

        let rendered =
            serde_json::to_string_pretty(snapshot).map_err(|err| CatalogError::Parse {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        dir.write(file_name, rendered)
            .map_err(|err| CatalogError::Io {
                path: self.path.clone(),
                message: err.to_string(),
            })
    }

    fn split_path(&self) -> Result<(&Utf8Path, &str), CatalogError> {
        let parent = self.path.parent().unwrap_or_else(|| Utf8Path::new("."));
        let file_name = self.path.file_name().ok_or_else(|| CatalogError::InvalidPath {
            path: self.path.clone(),
        })?;
        Ok((parent, file_name))
    }
}
