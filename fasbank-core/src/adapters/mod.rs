//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON files for the store ports (the production backend)
//! - In-memory state for the store ports (tests, embedding)
//! - Apilayer HTTP client for the RateFetcher port

pub mod apilayer;
pub mod json_file;
pub mod memory;
