use super::EntityMetadata;

/// Trait for aggregate roots
///
/// Defines the required instance accessors and the static metadata every
/// aggregate class in the system declares.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    // ============================================================================
    // Instance accessors
    // ============================================================================

    fn id(&self) -> Self::Id;

    /// Business code of the record (e.g. "LD-2025-001")
    fn code(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Aggregate class metadata
    // ============================================================================

    /// Index of the aggregate in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name for the DB (e.g. "lead")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Lead")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Leads")
    fn list_name() -> &'static str;

    // ============================================================================
    // Default implementations
    // ============================================================================

    /// Full aggregate name (e.g. "a001_lead")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// DB table name; identical to the full name
    fn table_name() -> String {
        Self::full_name()
    }
}
