//! mlmeta Core
//!
//! Core types for querying an ML metadata store.
//!
//! This crate contains:
//! - Filter expressions: Composable predicates rendered into the service's
//!   textual query language
//! - Resource names: Store and context paths
//! - Records: Raw shapes returned by the service
//! - Models: Typed views over records with fields derived from naming
//!   conventions
//! - Table: Column-oriented projection of models for display
//!
//! Everything here is pure data; network access lives in `mlmeta-client`.

pub mod error;
pub mod filter;
pub mod model;
pub mod record;
pub mod resource;
pub mod table;
