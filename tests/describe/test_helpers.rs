//! Shared fixtures and helpers for describe BDD scenarios.

use basalt::test_support::sample_stats;
use basalt::volume::BYTES_PER_GIB;
use basalt::{DescribeError, Describer, MemoryStore, VolumeOrigin, VolumeSpec};
use rstest::fixture;

/// Name of the seeded source volume.
pub const SOURCE: &str = "testVol";
/// Name of the seeded clone.
pub const CLONE: &str = "cloneVol";
/// Name of the seeded snapshot.
pub const SNAPSHOT: &str = "snapVol";

#[derive(Clone, Debug)]
pub enum DescribeOutcome {
    Blocks(Vec<String>),
    Failure(String),
}

#[derive(Clone, Debug)]
pub struct DescribeContext {
    pub store: MemoryStore,
    pub source_id: Option<String>,
    pub outcome: Option<DescribeOutcome>,
}

#[fixture]
pub fn describe_context() -> DescribeContext {
    DescribeContext {
        store: MemoryStore::new(),
        source_id: None,
        outcome: None,
    }
}

/// Seeds the source/clone/snapshot trio with sample telemetry and returns
/// the source volume id.
pub fn seed_lifecycle(store: &MemoryStore) -> String {
    let spec = VolumeSpec::builder()
        .name(SOURCE)
        .size_bytes(BYTES_PER_GIB)
        .build()
        .unwrap_or_else(|err| panic!("source spec should build: {err}"));
    let source = store
        .create(&spec)
        .unwrap_or_else(|err| panic!("source should create: {err}"));

    let clone_spec = VolumeSpec::builder()
        .name(CLONE)
        .origin(Some(VolumeOrigin::clone_of(SOURCE)))
        .build()
        .unwrap_or_else(|err| panic!("clone spec should build: {err}"));
    let clone = store
        .create(&clone_spec)
        .unwrap_or_else(|err| panic!("clone should create: {err}"));

    let snap_spec = VolumeSpec::builder()
        .name(SNAPSHOT)
        .origin(Some(VolumeOrigin::snapshot_of(SOURCE)))
        .build()
        .unwrap_or_else(|err| panic!("snapshot spec should build: {err}"));
    let snap = store
        .create(&snap_spec)
        .unwrap_or_else(|err| panic!("snapshot should create: {err}"));

    for id in [&source.id, &clone.id, &snap.id] {
        store
            .record_stats(id, sample_stats())
            .unwrap_or_else(|err| panic!("stats should record: {err}"));
    }
    source.id
}

/// Drives the async describe workflow from synchronous step code.
pub fn run_describe(store: &MemoryStore, names: &[String]) -> Result<Vec<String>, DescribeError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| panic!("runtime should build: {err}"));
    runtime.block_on(async { Describer::new(store.clone()).describe(names).await })
}
