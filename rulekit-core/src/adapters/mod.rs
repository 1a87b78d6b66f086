//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB for the Store port (durable)
//! - In-memory maps for the Store port (tests, embedding)
//! - Demo data generator for demo mode

pub mod demo;
pub mod duckdb;
pub mod memory;
