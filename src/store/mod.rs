//! In-memory volume registry backing the client.
//!
//! [`MemoryStore`] is the reference implementation of the
//! [`VolumeRepository`] and [`StatsProvider`] contracts. It enforces the
//! registry invariants (live-name uniqueness, permanent ids, weak parent
//! references) and keeps each volume's telemetry beside its record so
//! deletion removes both atomically. The store is a cheap cloneable handle;
//! clones share one registry.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::{
    DerivedKind, RepoFuture, StatsProvider, StoreError, VolumeRepository, VolumeSpec,
};
use crate::volume::{AttachState, Volume, VolumeKind, VolumeStats, VolumeStatus};

/// A volume together with its registered telemetry.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct VolumeRecord {
    /// The volume record.
    pub volume: Volume,
    /// Counters registered for the volume.
    pub stats: VolumeStats,
}

/// Serializable snapshot of the whole registry.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StoreSnapshot {
    /// Every live record, in insertion order.
    pub volumes: Vec<VolumeRecord>,
}

/// In-memory registry of volumes and their stats.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Vec<VolumeRecord>>>,
}

impl MemoryStore {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a registry from a previously taken snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(snapshot.volumes)),
        }
    }

    /// Takes a consistent snapshot of every live record.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            volumes: self.lock().clone(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<VolumeRecord>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates a volume, clone, or snapshot from the given spec.
    ///
    /// Derived volumes capture the source's id as an immutable weak
    /// reference and inherit its size, format, replication factor, and I/O
    /// priority.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for an invalid spec,
    /// [`StoreError::DuplicateName`] when the name denotes a live volume,
    /// and [`StoreError::ParentNotFound`] when the origin names no live
    /// source.
    pub fn create(&self, spec: &VolumeSpec) -> Result<Volume, StoreError> {
        spec.validate()?;
        let mut records = self.lock();

        if records.iter().any(|record| record.volume.name == spec.name) {
            return Err(StoreError::DuplicateName {
                name: spec.name.clone(),
            });
        }

        let source = match &spec.origin {
            Some(origin) => Some(
                records
                    .iter()
                    .find(|record| record.volume.name == origin.source)
                    .map(|record| record.volume.clone())
                    .ok_or_else(|| StoreError::ParentNotFound {
                        name: origin.source.clone(),
                    })?,
            ),
            None => None,
        };

        let kind = match (&spec.origin, &source) {
            (Some(origin), Some(parent)) => match origin.kind {
                DerivedKind::Clone => VolumeKind::Clone {
                    parent_id: parent.id.clone(),
                },
                DerivedKind::Snapshot => VolumeKind::Snapshot {
                    parent_id: parent.id.clone(),
                },
            },
            _ => VolumeKind::Plain,
        };

        let volume = Volume {
            id: Uuid::new_v4().to_string(),
            name: spec.name.clone(),
            size_bytes: source.as_ref().map_or(spec.size_bytes, |p| p.size_bytes),
            format: source.as_ref().map_or(spec.format, |p| p.format),
            ha_level: source.as_ref().map_or(spec.ha_level, |p| p.ha_level),
            io_priority: source.as_ref().map_or(spec.io_priority, |p| p.io_priority),
            created_at: Utc::now(),
            kind,
            shared: false,
            status: VolumeStatus::Up,
            state: AttachState::Detached,
            replication_status: AttachState::Detached,
        };

        records.push(VolumeRecord {
            volume: volume.clone(),
            stats: VolumeStats::default(),
        });
        Ok(volume)
    }

    /// Fetches a live volume by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no live volume has that name.
    pub fn get(&self, name: &str) -> Result<Volume, StoreError> {
        self.lock()
            .iter()
            .find(|record| record.volume.name == name)
            .map(|record| record.volume.clone())
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_owned(),
            })
    }

    /// Fetches a live volume by id, tolerating deleted parents by surfacing
    /// a clean error rather than dangling.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdNotFound`] when no live volume has that id.
    pub fn get_by_id(&self, id: &str) -> Result<Volume, StoreError> {
        self.lock()
            .iter()
            .find(|record| record.volume.id == id)
            .map(|record| record.volume.clone())
            .ok_or_else(|| StoreError::IdNotFound { id: id.to_owned() })
    }

    /// Returns every live volume in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Volume> {
        self.lock()
            .iter()
            .map(|record| record.volume.clone())
            .collect()
    }

    /// Deletes a live volume and its stats. Other volumes, including
    /// derivatives holding the deleted volume's id, are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no live volume has that name
    /// and [`StoreError::InUse`] when the volume is attached.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut records = self.lock();
        let position = records
            .iter()
            .position(|record| record.volume.name == name)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_owned(),
            })?;
        let attached = records
            .get(position)
            .is_some_and(|record| record.volume.state == AttachState::Attached);
        if attached {
            return Err(StoreError::InUse {
                name: name.to_owned(),
            });
        }
        records.remove(position);
        Ok(())
    }

    /// Binds the volume to a compute context. The replication status
    /// mirrors the transition.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no live volume has that name.
    pub fn attach(&self, name: &str) -> Result<(), StoreError> {
        self.set_state(name, AttachState::Attached)
    }

    /// Releases the volume from its compute context.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no live volume has that name.
    pub fn detach(&self, name: &str) -> Result<(), StoreError> {
        self.set_state(name, AttachState::Detached)
    }

    fn set_state(&self, name: &str, state: AttachState) -> Result<(), StoreError> {
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|record| record.volume.name == name)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_owned(),
            })?;
        record.volume.state = state;
        record.volume.replication_status = state;
        Ok(())
    }

    /// Sets the shared flag on a live volume.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no live volume has that name.
    pub fn set_shared(&self, name: &str, shared: bool) -> Result<(), StoreError> {
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|record| record.volume.name == name)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_owned(),
            })?;
        record.volume.shared = shared;
        Ok(())
    }

    /// Replaces the counters registered for a volume id. Called when the
    /// cluster reports fresh telemetry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdNotFound`] for unknown ids and
    /// [`StoreError::Validation`] when `bytes_used` exceeds the volume's
    /// capacity.
    pub fn record_stats(&self, volume_id: &str, stats: VolumeStats) -> Result<(), StoreError> {
        let mut records = self.lock();
        let record = records
            .iter_mut()
            .find(|record| record.volume.id == volume_id)
            .ok_or_else(|| StoreError::IdNotFound {
                id: volume_id.to_owned(),
            })?;
        if stats.bytes_used > record.volume.size_bytes {
            return Err(StoreError::Validation(format!(
                "bytes_used {} exceeds capacity {}",
                stats.bytes_used, record.volume.size_bytes
            )));
        }
        record.stats = stats;
        Ok(())
    }

    /// Fetches the counters registered for a volume id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdNotFound`] when the volume has no registered
    /// stats, for example after deletion.
    pub fn stats_for(&self, volume_id: &str) -> Result<VolumeStats, StoreError> {
        self.lock()
            .iter()
            .find(|record| record.volume.id == volume_id)
            .map(|record| record.stats)
            .ok_or_else(|| StoreError::IdNotFound {
                id: volume_id.to_owned(),
            })
    }
}

impl VolumeRepository for MemoryStore {
    fn create<'a>(&'a self, spec: &'a VolumeSpec) -> RepoFuture<'a, Volume> {
        Box::pin(async move { Self::create(self, spec) })
    }

    fn get<'a>(&'a self, name: &'a str) -> RepoFuture<'a, Volume> {
        Box::pin(async move { Self::get(self, name) })
    }

    fn get_by_id<'a>(&'a self, id: &'a str) -> RepoFuture<'a, Volume> {
        Box::pin(async move { Self::get_by_id(self, id) })
    }

    fn list(&self) -> RepoFuture<'_, Vec<Volume>> {
        Box::pin(async move { Ok(Self::list(self)) })
    }

    fn delete<'a>(&'a self, name: &'a str) -> RepoFuture<'a, ()> {
        Box::pin(async move { Self::delete(self, name) })
    }
}

impl StatsProvider for MemoryStore {
    fn stats_for<'a>(&'a self, volume_id: &'a str) -> RepoFuture<'a, VolumeStats> {
        Box::pin(async move { Self::stats_for(self, volume_id) })
    }
}
