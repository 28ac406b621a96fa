//! Request middleware.
//!
//! Purpose: attach a per-request trace identifier and span to every call.

pub mod trace;

pub use trace::Trace;
