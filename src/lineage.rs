//! Parent resolution for clones and snapshots.

use crate::repository::{StoreError, VolumeRepository};
use crate::volume::Volume;

/// Resolves a volume's parent through the repository.
///
/// The tracker holds no state of its own: every lookup goes through
/// [`VolumeRepository::get_by_id`], so the answer always reflects the
/// registry at the instant of the call. Clones and snapshots resolve
/// identically; they differ only in their kind tag.
#[derive(Clone, Debug)]
pub struct LineageTracker<R> {
    repository: R,
}

impl<R: VolumeRepository> LineageTracker<R> {
    /// Creates a tracker over the given repository handle.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns the parent volume, or `None` when the volume is plain or the
    /// parent has since been deleted. A deleted parent is a normal outcome
    /// of the weak reference, not a failure.
    ///
    /// # Errors
    ///
    /// Propagates repository failures other than the parent id being
    /// absent, such as [`StoreError::Unavailable`].
    pub async fn parent_of(&self, volume: &Volume) -> Result<Option<Volume>, StoreError> {
        let Some(parent_id) = volume.kind.parent_id() else {
            return Ok(None);
        };
        match self.repository.get_by_id(parent_id).await {
            Ok(parent) => Ok(Some(parent)),
            Err(StoreError::IdNotFound { .. }) => Ok(None),
            Err(other) => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{VolumeOrigin, VolumeSpec};
    use crate::store::MemoryStore;

    fn plain_spec(name: &str) -> VolumeSpec {
        VolumeSpec::builder()
            .name(name)
            .size_bytes(1 << 30)
            .build()
            .expect("spec should build")
    }

    #[tokio::test]
    async fn plain_volume_has_no_parent() {
        let store = MemoryStore::new();
        let volume = store.create(&plain_spec("plain")).expect("create");

        let tracker = LineageTracker::new(store);
        let parent = tracker.parent_of(&volume).await.expect("lookup");
        assert!(parent.is_none());
    }

    #[tokio::test]
    async fn clone_resolves_to_its_source() {
        let store = MemoryStore::new();
        let source = store.create(&plain_spec("source")).expect("create source");
        let spec = VolumeSpec::builder()
            .name("copy")
            .origin(Some(VolumeOrigin::clone_of("source")))
            .build()
            .expect("spec should build");
        let copy = store.create(&spec).expect("create clone");

        let tracker = LineageTracker::new(store);
        let parent = tracker.parent_of(&copy).await.expect("lookup");
        assert_eq!(parent.map(|volume| volume.id), Some(source.id));
    }

    #[tokio::test]
    async fn deleted_parent_resolves_to_none_without_error() {
        let store = MemoryStore::new();
        store.create(&plain_spec("source")).expect("create source");
        let spec = VolumeSpec::builder()
            .name("snap")
            .origin(Some(VolumeOrigin::snapshot_of("source")))
            .build()
            .expect("spec should build");
        let snap = store.create(&spec).expect("create snapshot");
        store.delete("source").expect("delete source");

        let tracker = LineageTracker::new(store);
        let parent = tracker.parent_of(&snap).await.expect("lookup");
        assert!(parent.is_none(), "weak reference should tolerate deletion");
    }
}
