//! Core library for the Basalt storage CLI.
//!
//! The crate models logical volumes and their derivatives (clones and
//! snapshots), tracks lineage through immutable weak parent references,
//! and renders the canonical volume description consumed by the CLI's
//! output layers. The registry and telemetry source are injected behind
//! the [`repository`] traits so the core stays independent of any cluster
//! transport.

pub mod catalog;
pub mod config;
pub mod describe;
pub mod lineage;
pub mod repository;
pub mod store;
pub mod test_support;
pub mod volume;

pub use catalog::{Catalog, CatalogError};
pub use config::{ClientConfig, ConfigError};
pub use describe::{DescribeError, Describer, format_volume, human_size, join_blocks};
pub use lineage::LineageTracker;
pub use repository::{
    DerivedKind, RepoFuture, StatsProvider, StoreError, VolumeOrigin, VolumeRepository,
    VolumeSpec, VolumeSpecBuilder,
};
pub use store::{MemoryStore, StoreSnapshot, VolumeRecord};
pub use volume::{
    AttachState, IoPriority, Volume, VolumeFormat, VolumeKind, VolumeStats, VolumeStatus,
};
