//! Planets - a small planet registry service
//!
//! Planets are registered by name, enriched from the Star Wars API catalog
//! (the number of films a planet appears in) and persisted as JSON documents
//! on local disk or S3. The HTTP API offers:
//! - Create (catalog lookup + persist)
//! - Read by id
//! - List with an exact-match name filter
//! - Delete by id

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod types;

pub use error::{Error, Result};
