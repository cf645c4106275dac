//! ViewBase - compiled GraphQL execution engine for relational databases.
//!
//! This crate is a thin re-export of [`viewbase_core`]. It exists so that
//! downstream consumers can depend on a single, stably-named crate while the
//! workspace underneath is free to split or regroup.

pub use viewbase_core::{
    config::ViewBaseConfig, error::Result, error::ViewBaseError, runtime::Executor,
    schema::CompiledSchema,
};

pub use viewbase_core::VERSION;
