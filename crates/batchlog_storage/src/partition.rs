//! Partition handles and the partition catalog.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use batchlog_codec::PartitionId;

use crate::error::{StorageError, StorageResult};

/// Name of the partition with id 0.
pub const DEFAULT_PARTITION_NAME: &str = "default";

/// Shared handle to a partition.
///
/// Clones share one allocation. Two handles are equal when they name the
/// same partition id.
#[derive(Clone)]
pub struct PartitionHandle {
    inner: Arc<PartitionInfo>,
}

#[derive(Debug)]
struct PartitionInfo {
    id: PartitionId,
    name: String,
}

impl PartitionHandle {
    /// Creates a handle for `id` named `name`.
    #[must_use]
    pub fn new(id: PartitionId, name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(PartitionInfo {
                id,
                name: name.into(),
            }),
        }
    }

    /// Handle for the default partition.
    #[must_use]
    pub fn default_partition() -> Self {
        Self::new(PartitionId::DEFAULT, DEFAULT_PARTITION_NAME)
    }

    /// The partition id written into scoped frames.
    #[must_use]
    pub fn id(&self) -> PartitionId {
        self.inner.id
    }

    /// The partition name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }
}

impl PartialEq for PartitionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for PartitionHandle {}

impl fmt::Debug for PartitionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionHandle")
            .field("id", &self.inner.id.as_u32())
            .field("name", &self.inner.name)
            .finish()
    }
}

/// Catalog of live partitions.
///
/// Slots are indexed by partition id. Dropped ids stay vacant and are never
/// handed out again.
#[derive(Debug)]
pub struct PartitionRegistry {
    slots: Vec<Option<PartitionHandle>>,
    by_name: HashMap<String, PartitionId>,
}

impl Default for PartitionRegistry {
    fn default() -> Self {
        let default = PartitionHandle::default_partition();
        let mut by_name = HashMap::new();
        by_name.insert(default.name().to_string(), default.id());
        Self {
            slots: vec![Some(default)],
            by_name,
        }
    }
}

impl PartitionRegistry {
    /// Creates a catalog holding only the default partition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `name`, creating the partition if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::PartitionLimit`] if no ids remain.
    pub fn open(&mut self, name: &str) -> StorageResult<PartitionHandle> {
        if let Some(handle) = self.get(name) {
            return Ok(handle);
        }

        let id = u32::try_from(self.slots.len()).map_err(|_| StorageError::PartitionLimit)?;
        let handle = PartitionHandle::new(PartitionId::new(id), name);
        self.slots.push(Some(handle.clone()));
        self.by_name.insert(name.to_string(), handle.id());
        Ok(handle)
    }

    /// Looks up a live partition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PartitionHandle> {
        let id = self.by_name.get(name)?;
        self.by_id(*id)
    }

    /// Looks up a live partition by id.
    #[must_use]
    pub fn by_id(&self, id: PartitionId) -> Option<PartitionHandle> {
        self.slots.get(id.as_u32() as usize)?.clone()
    }

    /// Removes a partition.
    ///
    /// # Errors
    ///
    /// Returns an error for the default partition or an unknown handle.
    pub fn remove(&mut self, handle: &PartitionHandle) -> StorageResult<()> {
        if handle.id().is_default() {
            return Err(StorageError::DefaultPartition);
        }

        let removed = self
            .slots
            .get_mut(handle.id().as_u32() as usize)
            .and_then(Option::take)
            .ok_or_else(|| StorageError::partition_not_found(handle.name()))?;
        self.by_name.remove(removed.name());
        Ok(())
    }

    /// All live partitions ordered by id.
    #[must_use]
    pub fn handles(&self) -> Vec<PartitionHandle> {
        self.slots.iter().flatten().cloned().collect()
    }
}
