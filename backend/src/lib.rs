//! Traveler service library.
//!
//! Travelers are kept in two stores: a document store partitioned by
//! country and a relational table keyed by a numeric row id. The
//! [`domain`] holds the entities, validation, and use-case services;
//! [`inbound`] exposes them over HTTP and [`outbound`] provides the store
//! adapters.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
