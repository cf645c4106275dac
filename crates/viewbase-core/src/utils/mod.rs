//! Utility modules for ViewBase.
//!
//! # Modules
//!
//! - `casing`: String case conversion (snake_case, camelCase, PascalCase)
//! - `opaque_id`: opaque ID encoding to prevent enumeration attacks
//! - `vector`: pgvector support for similarity search

pub mod casing;
pub mod opaque_id;
pub mod vector;

// Re-export commonly used items
pub use casing::{normalize_field_path, to_camel_case, to_snake_case};
pub use opaque_id::OpaqueId;
pub use vector::{PlaceholderStyle, VectorParam, VectorQueryBuilder, VectorSearchQuery};
