//! HTTP middleware and extractors for request processing.
//!
//! Provides caller identity, the trusted subnet gate, and observability.

pub mod identity;
pub mod tracing;
pub mod trusted_subnet;
