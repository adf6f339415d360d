use super::{AggregateId, EntityMetadata};

/// Aggregate root contract
///
/// Every stored record exposes its id, lifecycle metadata and the static
/// names used for tables, logs and UI headings.
pub trait AggregateRoot {
    type Id: AggregateId;

    fn id(&self) -> Self::Id;

    fn metadata(&self) -> &EntityMetadata;

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name used for the table (e.g. "room_type")
    fn collection_name() -> &'static str;

    /// Singular UI name (e.g. "Room type")
    fn element_name() -> &'static str;

    /// Plural UI name (e.g. "Room types")
    fn list_name() -> &'static str;

    /// Full aggregate name, also the table name (e.g. "a001_room_type")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
