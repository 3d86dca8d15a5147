//! Subcommand implementations.

pub mod eval;
pub mod ingest;
pub mod query;
pub mod serve;
