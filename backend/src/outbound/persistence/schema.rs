//! Diesel table definitions for the traveler tables.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! The relational `travelers` table is reached through parameterised raw SQL
//! only, so it has no entry here.

diesel::table! {
    /// Document store: one JSON document per traveler and partition.
    traveler_documents (partition_key, id) {
        /// Partition key (the traveler's country).
        partition_key -> Text,
        /// Traveler identifier, unique within a partition.
        id -> Text,
        /// Serialised traveler.
        body -> Jsonb,
        /// Insertion timestamp.
        created_at -> Timestamptz,
    }
}
