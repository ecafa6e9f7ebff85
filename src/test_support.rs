//! Test support utilities shared across unit and integration tests.

use crate::repository::{
    RepoFuture, StatsProvider, StoreError, VolumeRepository, VolumeSpec,
};
use crate::volume::{Volume, VolumeStats};

/// Counters matching the fixed telemetry used by conformance tests:
/// `bytes_used` renders as `1.1 GiB`.
#[must_use]
pub const fn sample_stats() -> VolumeStats {
    VolumeStats {
        reads: 12_345,
        reads_ms: 1,
        bytes_read: 1_234_567,
        writes: 9_876,
        writes_ms: 2,
        bytes_written: 7_654_321,
        ios_in_progress: 987,
        bytes_used: 1_181_116_006,
    }
}

/// Returns `n` GiB in bytes.
#[must_use]
pub const fn gib(n: u64) -> u64 {
    n * (1 << 30)
}

/// Splits a description block into `(key, value)` pairs.
///
/// Parsing tolerates one leading blank line as a compatibility shim for
/// collaborators that split batches naively; the canonical emission never
/// contains one. Values keep everything after the first colon, so
/// timestamps survive intact.
#[must_use]
pub fn parse_block(block: &str) -> Vec<(String, String)> {
    block
        .lines()
        .skip_while(|line| line.is_empty())
        .map(|line| {
            line.split_once(':').map_or_else(
                || (line.trim().to_owned(), String::new()),
                |(key, value)| (key.trim().to_owned(), value.trim().to_owned()),
            )
        })
        .collect()
}

/// Returns the value rendered for `key` in a description block.
#[must_use]
pub fn field_value(block: &str, key: &str) -> Option<String> {
    parse_block(block)
        .into_iter()
        .find(|(found, _)| found == key)
        .map(|(_, value)| value)
}

/// Repository double whose every operation fails with
/// [`StoreError::Unavailable`], for exercising transport-failure
/// propagation.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnreachableRepository;

impl UnreachableRepository {
    fn unavailable<T>() -> Result<T, StoreError> {
        Err(StoreError::Unavailable {
            message: String::from("cluster endpoint did not respond"),
        })
    }
}

impl VolumeRepository for UnreachableRepository {
    fn create<'a>(&'a self, _spec: &'a VolumeSpec) -> RepoFuture<'a, Volume> {
        Box::pin(async move { Self::unavailable() })
    }

    fn get<'a>(&'a self, _name: &'a str) -> RepoFuture<'a, Volume> {
        Box::pin(async move { Self::unavailable() })
    }

    fn get_by_id<'a>(&'a self, _id: &'a str) -> RepoFuture<'a, Volume> {
        Box::pin(async move { Self::unavailable() })
    }

    fn list(&self) -> RepoFuture<'_, Vec<Volume>> {
        Box::pin(async move { Self::unavailable() })
    }

    fn delete<'a>(&'a self, _name: &'a str) -> RepoFuture<'a, ()> {
        Box::pin(async move { Self::unavailable() })
    }
}

impl StatsProvider for UnreachableRepository {
    fn stats_for<'a>(&'a self, _volume_id: &'a str) -> RepoFuture<'a, VolumeStats> {
        Box::pin(async move { Self::unavailable() })
    }
}
