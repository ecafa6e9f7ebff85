//! Collaborator contracts for the volume registry and telemetry source.
//!
//! The core never talks to the storage cluster directly: it consumes a
//! [`VolumeRepository`] for record lookups and a [`StatsProvider`] for
//! telemetry, both injected by the caller. The traits return boxed futures
//! so implementations may suspend on a remote round trip.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::volume::{IoPriority, Volume, VolumeFormat, VolumeStats};

/// Errors raised by repository and stats collaborators.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    /// Raised when no live volume has the requested name.
    #[error("volume {name} not found")]
    NotFound {
        /// Name that did not resolve.
        name: String,
    },
    /// Raised when no live volume has the requested id. Weak parent lookups
    /// surface this cleanly instead of dangling.
    #[error("volume id {id} not found")]
    IdNotFound {
        /// Id that did not resolve.
        id: String,
    },
    /// Raised when a create names a volume that already exists.
    #[error("volume {name} already exists")]
    DuplicateName {
        /// Name that collided.
        name: String,
    },
    /// Raised when a clone or snapshot names a nonexistent source volume.
    #[error("parent volume {name} not found")]
    ParentNotFound {
        /// Source name that did not resolve.
        name: String,
    },
    /// Raised when the volume's state prevents the operation, such as
    /// deleting while attached.
    #[error("volume {name} is attached and cannot be deleted")]
    InUse {
        /// Name of the attached volume.
        name: String,
    },
    /// Raised when a request is missing a required field or carries an
    /// inconsistent value.
    #[error("invalid volume request: {0}")]
    Validation(String),
    /// Raised when the backing cluster cannot be reached. Retries belong to
    /// the transport, not to this core.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Transport-level failure description.
        message: String,
    },
}

/// Distinguishes the two derived volume kinds at creation time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DerivedKind {
    /// Create an independent writable copy.
    Clone,
    /// Create a point-in-time reference.
    Snapshot,
}

/// Source reference for a derived volume.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VolumeOrigin {
    /// Which derived kind to create.
    pub kind: DerivedKind,
    /// Name of the live source volume.
    pub source: String,
}

impl VolumeOrigin {
    /// Origin describing a clone of the named volume.
    #[must_use]
    pub fn clone_of(source: impl Into<String>) -> Self {
        Self {
            kind: DerivedKind::Clone,
            source: source.into(),
        }
    }

    /// Origin describing a snapshot of the named volume.
    #[must_use]
    pub fn snapshot_of(source: impl Into<String>) -> Self {
        Self {
            kind: DerivedKind::Snapshot,
            source: source.into(),
        }
    }
}

/// Parameters for creating a volume, clone, or snapshot.
///
/// Derived volumes inherit size, format, replication factor, and I/O
/// priority from their source; the explicit values apply to plain volumes
/// only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VolumeSpec {
    /// Name for the new volume.
    pub name: String,
    /// Capacity in bytes. Ignored when `origin` is set.
    pub size_bytes: u64,
    /// Filesystem format. Ignored when `origin` is set.
    pub format: VolumeFormat,
    /// Replication factor. Ignored when `origin` is set.
    pub ha_level: u32,
    /// I/O scheduling priority. Ignored when `origin` is set.
    pub io_priority: IoPriority,
    /// Present when creating a clone or snapshot.
    pub origin: Option<VolumeOrigin>,
}

impl VolumeSpec {
    /// Starts a builder for a [`VolumeSpec`].
    #[must_use]
    pub fn builder() -> VolumeSpecBuilder {
        VolumeSpecBuilder::new()
    }

    /// Validates the spec, returning a descriptive error when a required
    /// field is missing or inconsistent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] when the name is empty, a plain
    /// volume has zero capacity, or an origin names no source.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.name.is_empty() {
            return Err(StoreError::Validation(String::from("name")));
        }
        match &self.origin {
            Some(origin) if origin.source.is_empty() => {
                Err(StoreError::Validation(String::from("origin.source")))
            }
            Some(_) => Ok(()),
            None if self.size_bytes == 0 => {
                Err(StoreError::Validation(String::from("size_bytes")))
            }
            None => Ok(()),
        }
    }
}

/// Builder for [`VolumeSpec`] that defers trimming and validation to
/// construction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VolumeSpecBuilder {
    name: String,
    size_bytes: u64,
    format: VolumeFormat,
    ha_level: Option<u32>,
    io_priority: IoPriority,
    origin: Option<VolumeOrigin>,
}

impl VolumeSpecBuilder {
    /// Creates an empty builder; the name must be populated before build.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the volume name.
    #[must_use]
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = value.into();
        self
    }

    /// Sets the capacity in bytes.
    #[must_use]
    pub const fn size_bytes(mut self, value: u64) -> Self {
        self.size_bytes = value;
        self
    }

    /// Sets the filesystem format.
    #[must_use]
    pub const fn format(mut self, value: VolumeFormat) -> Self {
        self.format = value;
        self
    }

    /// Sets the replication factor.
    #[must_use]
    pub const fn ha_level(mut self, value: u32) -> Self {
        self.ha_level = Some(value);
        self
    }

    /// Sets the I/O scheduling priority.
    #[must_use]
    pub const fn io_priority(mut self, value: IoPriority) -> Self {
        self.io_priority = value;
        self
    }

    /// Marks the spec as a clone or snapshot of a source volume.
    #[must_use]
    pub fn origin(mut self, value: Option<VolumeOrigin>) -> Self {
        self.origin = value;
        self
    }

    /// Builds and validates the [`VolumeSpec`], trimming string inputs.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] when a required field is empty or
    /// inconsistent.
    pub fn build(self) -> Result<VolumeSpec, StoreError> {
        let spec = VolumeSpec {
            name: self.name.trim().to_owned(),
            size_bytes: self.size_bytes,
            format: self.format,
            ha_level: self.ha_level.unwrap_or(1),
            io_priority: self.io_priority,
            origin: self.origin.map(|origin| VolumeOrigin {
                kind: origin.kind,
                source: origin.source.trim().to_owned(),
            }),
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Future returned by repository and stats operations.
pub type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Registry of volume records, keyed by unique name and permanent id.
///
/// Implementations are the source of truth; the core performs no caching,
/// so every call reflects the registry state at that instant.
pub trait VolumeRepository {
    /// Creates a volume, clone, or snapshot from the given spec.
    fn create<'a>(&'a self, spec: &'a VolumeSpec) -> RepoFuture<'a, Volume>;

    /// Fetches a live volume by name.
    fn get<'a>(&'a self, name: &'a str) -> RepoFuture<'a, Volume>;

    /// Fetches a live volume by id. Used for weak parent lookups, which must
    /// surface [`StoreError::IdNotFound`] cleanly when the parent is gone.
    fn get_by_id<'a>(&'a self, id: &'a str) -> RepoFuture<'a, Volume>;

    /// Returns a finite snapshot of every live volume. Order is stable
    /// within a process run.
    fn list(&self) -> RepoFuture<'_, Vec<Volume>>;

    /// Deletes a live volume by name. Repeated deletion of the same name
    /// fails with [`StoreError::NotFound`].
    fn delete<'a>(&'a self, name: &'a str) -> RepoFuture<'a, ()>;
}

/// Source of per-volume I/O telemetry.
pub trait StatsProvider {
    /// Fetches the counters registered for a volume id, failing with
    /// [`StoreError::IdNotFound`] when the volume has none (for example
    /// after deletion).
    fn stats_for<'a>(&'a self, volume_id: &'a str) -> RepoFuture<'a, VolumeStats>;
}
