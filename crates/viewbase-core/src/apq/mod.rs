//! Operation hashing — the stable identity a persisted-query cache or
//! cache-scope fingerprint is built from.
//!
//! Persisted-query *storage* (looking up a hash to recover the original
//! operation text) is an external collaborator's concern, not the core's —
//! see the PURPOSE & SCOPE non-goals. What the core owns is producing the
//! hash itself and counting how often it is reused, since both feed the
//! cache-key contract every request crosses.
//!
//! # Security Considerations
//!
//! Cache keys MUST include variables to prevent data leakage between
//! requests with different variable values.
//!
//! # Module Contents
//!
//! - **hasher**: operation hashing with SHA-256 (pure Rust implementation)
//! - **metrics**: hash-reuse counters for monitoring

pub mod hasher;
pub mod metrics;

// Re-export key types for convenience
pub use hasher::{hash_query, hash_query_with_variables, verify_hash, verify_hash_with_variables};
pub use metrics::ApqMetrics;
