//! Error types for the catalog domain layer.
//!
//! This module defines two error tiers:
//!
//! - [`SourceError`] - Failures raised by data-source adapters
//! - [`ResolveError`] - Connection-resolution failures (caller errors plus
//!   wrapped source failures)
//!
//! Error conversion is automatic via `From` implementations, allowing `?`
//! to work across the port boundary.

use thiserror::Error;

// =============================================================================
// Data-Source Errors
// =============================================================================

/// Failures raised by a data-source adapter.
///
/// The resolver surfaces these unchanged and never retries; retry policy,
/// if any, belongs to the adapter.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backing collection could not be reached or answered with an
    /// I/O-level failure (includes timeouts on the adapter's calls).
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Resolution Errors
// =============================================================================

/// Connection-resolution failures.
///
/// The `Malformed*`/`Invalid*`/`CursorNotInRange` variants are caller
/// errors, detected before any data-source call and never retried.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A cursor string failed to decode.
    #[error("Malformed cursor: {0}")]
    MalformedCursor(String),

    /// A cursor decoded correctly but references an item outside the
    /// active filter+order (e.g. a cursor minted under another ordering,
    /// or for an item belonging to a different parent).
    #[error("Cursor does not belong to the requested range: {0}")]
    CursorNotInRange(String),

    /// `first` or `last` was negative.
    #[error("Invalid pagination argument: {0}")]
    InvalidPaginationArgument(String),

    /// A required filter key was missing or unusable.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// The requested order field is not in the allowed enumeration for
    /// this connection type.
    #[error("Invalid order field: {0}")]
    InvalidOrderField(String),

    /// The data source failed; surfaced unchanged.
    #[error("Data source error: {0}")]
    DataSource(#[from] SourceError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for data-source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for connection resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
