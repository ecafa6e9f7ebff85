//! Batch description of volumes.
//!
//! The describe workflow resolves a request (explicit names or every live
//! volume) against the repository, enriches each record with its telemetry,
//! and renders the canonical description blocks. Resolution is
//! all-or-nothing: one unknown name fails the whole batch with an aggregate
//! error and no partial output.

mod format;

use thiserror::Error;

use crate::repository::{StatsProvider, StoreError, VolumeRepository};
use crate::volume::Volume;

pub use format::{format_volume, human_size, join_blocks};

/// Errors surfaced while describing volumes.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DescribeError {
    /// Raised when one or more requested names do not resolve. The whole
    /// batch fails; no descriptions are returned.
    #[error("volume(s) not found: {}", .names.join(", "))]
    NotFound {
        /// Every requested name that failed to resolve.
        names: Vec<String>,
    },
    /// Raised when the repository or stats collaborator fails.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves describe requests into rendered description blocks.
#[derive(Clone, Debug)]
pub struct Describer<R> {
    repository: R,
}

impl<R> Describer<R>
where
    R: VolumeRepository + StatsProvider,
{
    /// Creates a describer over the given repository handle.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Describes the named volumes, or every live volume when `names` is
    /// empty. Each resolved volume appears exactly once, in the
    /// repository's listing order for the all-volumes form.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::NotFound`] naming every unresolvable
    /// requested volume, or [`DescribeError::Store`] when a collaborator
    /// fails mid-batch. Either way no partial output is produced.
    pub async fn describe(&self, names: &[String]) -> Result<Vec<String>, DescribeError> {
        let volumes = if names.is_empty() {
            self.repository.list().await?
        } else {
            self.resolve(names).await?
        };

        let mut blocks = Vec::with_capacity(volumes.len());
        for volume in &volumes {
            let stats = self.repository.stats_for(&volume.id).await?;
            blocks.push(format_volume(volume, &stats));
        }
        Ok(blocks)
    }

    /// Resolves explicit names, deduplicating repeats and collecting every
    /// missing name before failing.
    async fn resolve(&self, names: &[String]) -> Result<Vec<Volume>, DescribeError> {
        let mut resolved: Vec<Volume> = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.repository.get(name).await {
                Ok(volume) => {
                    if !resolved.iter().any(|seen| seen.id == volume.id) {
                        resolved.push(volume);
                    }
                }
                Err(StoreError::NotFound { .. }) => missing.push(name.clone()),
                Err(other) => return Err(other.into()),
            }
        }
        if missing.is_empty() {
            Ok(resolved)
        } else {
            Err(DescribeError::NotFound { names: missing })
        }
    }
}
