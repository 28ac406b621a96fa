//! Outbound adapters implementing the traveler store ports.
//!
//! - **persistence**: PostgreSQL-backed stores using Diesel
//! - **memory**: process-local stores for development and tests
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
