//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for durable slot storage
//! - An in-memory map for tests
//! - Sample tickets for first-run seeding

pub mod duckdb;
pub mod memory;
pub mod seed;
