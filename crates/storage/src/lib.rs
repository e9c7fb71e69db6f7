//! Storage adapters for the Syllabus catalog.
//!
//! The domain layer only sees the [`syllabus_core::ports::DataSource`]
//! and [`syllabus_core::ports::Catalog`] ports; this crate provides the
//! in-memory reference implementation used by the server binary and the
//! test suites. A database-backed adapter would slot in behind the same
//! ports.

mod memory;

pub use memory::{CatalogSeed, MemoryCatalog};
