//! Core domain layer for the Syllabus training catalog.
//!
//! This crate contains the domain models, port traits (interfaces), and the
//! connection-resolution services. It follows hexagonal architecture
//! principles - this is the innermost layer with no dependencies on
//! infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   syllabus (binary)                     │
//! ├─────────────────────────────────────────────────────────┤
//! │              syllabus-graphql (API surface)             │
//! ├─────────────────────────────────────────────────────────┤
//! │            syllabus-storage (catalog adapter)           │
//! ├─────────────────────────────────────────────────────────┤
//! │            syllabus-core  ← YOU ARE HERE                │
//! │            (models, ports, services, cursor)            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Domain models (Training, Discount, order fields)
//! - [`ports`] - Interface traits for adapters to implement
//! - [`services`] - Connection resolution and input normalization
//! - [`cursor`] - Opaque pagination cursor codec
//! - [`error`] - Domain error types
//!
//! # Key Concepts
//!
//! ## Ports
//!
//! The one port here is [`ports::DataSource`]: an ordered, filterable,
//! countable view over a backing collection. The resolver never touches
//! storage directly; adapters implement the port and the engine stays
//! storage-agnostic.
//!
//! ## Connections
//!
//! List queries resolve to Relay-style connections: edges paired with
//! opaque cursors, page info, and a total count. [`services::resolve`]
//! implements the pagination algorithm once, generically, for every
//! connection type in the schema.

pub mod cursor;
pub mod error;
pub mod models;
pub mod ports;
pub mod services;
