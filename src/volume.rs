//! Volume records and the enumerations that describe their configuration
//! and lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bytes in one GiB, the unit user-facing sizes are given in.
pub const BYTES_PER_GIB: u64 = 1 << 30;

/// On-disk filesystem format captured at volume creation.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum VolumeFormat {
    /// XFS filesystem.
    #[default]
    Xfs,
    /// ext4 filesystem.
    Ext4,
    /// Raw block device without a filesystem.
    None,
}

impl VolumeFormat {
    /// Returns the canonical upper-case label used in descriptions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xfs => "XFS",
            Self::Ext4 => "EXT4",
            Self::None => "NONE",
        }
    }

    /// Parses a case-insensitive label such as `xfs` or `EXT4`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "xfs" => Some(Self::Xfs),
            "ext4" => Some(Self::Ext4),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Relative I/O scheduling priority captured at volume creation.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum IoPriority {
    /// No priority requested; the cluster chooses.
    #[default]
    None,
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl IoPriority {
    /// Returns the canonical upper-case label used in descriptions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Parses a case-insensitive label such as `high`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Operational status reported by the cluster for a volume.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum VolumeStatus {
    /// The volume is healthy and serving I/O.
    #[default]
    Up,
    /// The volume is offline.
    Down,
}

impl VolumeStatus {
    /// Returns the canonical upper-case label used in descriptions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

/// Whether a volume is bound to a compute context.
///
/// Attachment gates deletion: an attached volume cannot be deleted until it
/// is detached again.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AttachState {
    /// Bound to a compute context.
    Attached,
    /// Not bound to any compute context.
    #[default]
    Detached,
}

impl AttachState {
    /// Returns the label used in descriptions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attached => "Attached",
            Self::Detached => "Detached",
        }
    }
}

/// How a volume came into existence, tagged with its parent reference.
///
/// The parent id is a weak reference: captured once at creation, never
/// mutated, and still valid metadata after the parent volume has been
/// deleted.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum VolumeKind {
    /// Created directly, with no originating volume.
    Plain,
    /// Independent writable copy of another volume.
    Clone {
        /// Id of the volume the clone was taken from.
        parent_id: String,
    },
    /// Space-efficient point-in-time reference to another volume.
    Snapshot {
        /// Id of the volume the snapshot was taken from.
        parent_id: String,
    },
}

impl VolumeKind {
    /// Returns the captured parent id for clones and snapshots.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Self::Plain => None,
            Self::Clone { parent_id } | Self::Snapshot { parent_id } => Some(parent_id.as_str()),
        }
    }
}

/// A logical storage volume as tracked by the client.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Volume {
    /// Globally unique identifier, assigned at creation and never reused.
    pub id: String,
    /// Name, unique among currently existing volumes.
    pub name: String,
    /// Capacity in bytes, fixed at creation.
    pub size_bytes: u64,
    /// Filesystem format, fixed at creation.
    pub format: VolumeFormat,
    /// Replication factor, fixed at creation.
    pub ha_level: u32,
    /// I/O scheduling priority, fixed at creation.
    pub io_priority: IoPriority,
    /// Creation instant in UTC.
    pub created_at: DateTime<Utc>,
    /// Origin of the volume, carrying the parent reference for clones and
    /// snapshots.
    pub kind: VolumeKind,
    /// Whether the volume is shared between consumers.
    pub shared: bool,
    /// Operational status reported by the cluster.
    pub status: VolumeStatus,
    /// Attachment to a compute context.
    pub state: AttachState,
    /// Replication subsystem state. Mirrors [`Volume::state`] today but is
    /// stored independently so the two can diverge later.
    pub replication_status: AttachState,
}

/// Per-volume I/O counters supplied by the cluster out of band.
///
/// All counters except `ios_in_progress` are monotonic; `bytes_used` never
/// exceeds the volume's capacity.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct VolumeStats {
    /// Completed read operations.
    pub reads: u64,
    /// Milliseconds spent in reads.
    pub reads_ms: u64,
    /// Bytes read.
    pub bytes_read: u64,
    /// Completed write operations.
    pub writes: u64,
    /// Milliseconds spent in writes.
    pub writes_ms: u64,
    /// Bytes written.
    pub bytes_written: u64,
    /// Operations currently in flight.
    pub ios_in_progress: u64,
    /// Capacity currently consumed, in bytes.
    pub bytes_used: u64,
}
