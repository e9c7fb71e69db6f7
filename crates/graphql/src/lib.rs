//! GraphQL API surface for the Syllabus training catalog.
//!
//! This crate exposes the catalog over the Relay connection pattern:
//! trainings and discounts as paginated connections with opaque
//! cursors, plus point lookups by opaque global id. It depends only on
//! the `syllabus-core` ports; any [`syllabus_core::ports::Catalog`]
//! implementation can sit behind the schema.
//!
//! # Modules
//!
//! - [`schema`] - Query root, GraphQL types, and schema construction
//! - [`server`] - Axum HTTP server for the schema
//! - [`types`] - Schema type alias

pub mod schema;
pub mod server;
pub mod types;

pub use schema::{build_schema, CatalogQuery, MAX_PAGE_SIZE, MAX_QUERY_COMPLEXITY, MAX_QUERY_DEPTH};
pub use server::{serve, serve_with_shutdown, ServerConfig};
pub use types::SyllabusSchema;
