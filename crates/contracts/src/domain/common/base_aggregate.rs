use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Base aggregate with the fields every aggregate shares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Unique identifier of the record
    pub id: Id,
    /// Business code of the record (e.g. "LD-2025-001", "QT-12345")
    pub code: String,
    /// Lifecycle metadata
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// Create a fresh aggregate
    pub fn new(id: Id, code: String) -> Self {
        Self {
            id,
            code,
            metadata: EntityMetadata::new(),
        }
    }

    /// Create an aggregate from existing metadata (loading from the DB)
    pub fn with_metadata(id: Id, code: String, metadata: EntityMetadata) -> Self {
        Self { id, code, metadata }
    }

    /// Refresh the updated_at timestamp
    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
