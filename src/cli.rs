//! Command-line interface definitions for the `basalt` binary.
//!
//! This module isolates the clap parser structures so the build script can
//! reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `basalt` binary.
#[derive(Debug, Parser)]
#[command(
    name = "basalt",
    about = "Manage volumes, clones, and snapshots on a Basalt storage cluster",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Create a new volume.
    #[command(name = "create", about = "Create a new volume")]
    Create(CreateCommand),
    /// Create a writable copy of an existing volume.
    #[command(name = "clone", about = "Create a writable copy of a volume")]
    Clone(CloneCommand),
    /// Create a point-in-time snapshot of an existing volume.
    #[command(name = "snapshot", about = "Create a point-in-time snapshot of a volume")]
    Snapshot(SnapshotCommand),
    /// Delete a volume, clone, or snapshot.
    #[command(name = "delete", about = "Delete a volume, clone, or snapshot")]
    Delete(DeleteCommand),
    /// Attach a volume to the local compute context.
    #[command(name = "attach", about = "Attach a volume to the local compute context")]
    Attach(AttachCommand),
    /// Detach a volume from its compute context.
    #[command(name = "detach", about = "Detach a volume from its compute context")]
    Detach(DetachCommand),
    /// List the names of every live volume.
    #[command(name = "list", about = "List the names of every live volume")]
    List,
    /// Describe volumes in the canonical key/value format.
    #[command(name = "describe", about = "Describe volumes in the canonical key/value format")]
    Describe(DescribeCommand),
}

/// Arguments for the `basalt create` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct CreateCommand {
    /// Name for the new volume.
    pub(crate) name: String,
    /// Capacity in GiB. Defaults to the configured size.
    #[arg(long, value_name = "GIB")]
    pub(crate) size_gb: Option<u32>,
    /// Filesystem format (xfs, ext4, or none). Defaults to the configured
    /// format.
    #[arg(long, value_name = "FORMAT")]
    pub(crate) format: Option<String>,
    /// Replication factor. Defaults to the configured level.
    #[arg(long, value_name = "LEVEL")]
    pub(crate) ha: Option<u32>,
    /// I/O priority (none, low, medium, or high). Defaults to the
    /// configured priority.
    #[arg(long, value_name = "PRIORITY")]
    pub(crate) io_priority: Option<String>,
    /// Mark the volume as shared between consumers.
    #[arg(long)]
    pub(crate) shared: bool,
}

/// Arguments for the `basalt clone` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct CloneCommand {
    /// Name of the source volume.
    pub(crate) source: String,
    /// Name for the new clone.
    pub(crate) name: String,
}

/// Arguments for the `basalt snapshot` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct SnapshotCommand {
    /// Name of the source volume.
    pub(crate) source: String,
    /// Name for the new snapshot.
    pub(crate) name: String,
}

/// Arguments for the `basalt delete` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct DeleteCommand {
    /// Name of the volume to delete.
    pub(crate) name: String,
}

/// Arguments for the `basalt attach` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct AttachCommand {
    /// Name of the volume to attach.
    pub(crate) name: String,
}

/// Arguments for the `basalt detach` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct DetachCommand {
    /// Name of the volume to detach.
    pub(crate) name: String,
}

/// Arguments for the `basalt describe` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct DescribeCommand {
    /// Volume names to describe. Describes every live volume when omitted.
    pub(crate) names: Vec<String>,
}
