//! Pagination types for list queries.
//!
//! These types implement Relay-style cursor pagination, commonly used
//! with GraphQL but also applicable to other APIs.

use crate::ports::OrderField;

/// Opaque cursor for pagination.
///
/// The cursor value is implementation-specific and should be treated
/// as an opaque token by clients. See [`crate::cursor`] for the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub value: String,
}

/// Pagination parameters for list queries.
///
/// Supports forward pagination (`first`/`after`) and backward
/// pagination (`last`/`before`). When both `first` and `last` are
/// given, the resolver applies the bounds, truncates to `first` from
/// the head, then to `last` from the tail.
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    /// Number of items to fetch (forward pagination).
    pub first: Option<i32>,
    /// Cursor to start after (forward pagination, exclusive).
    pub after: Option<Cursor>,
    /// Number of items to fetch (backward pagination).
    pub last: Option<i32>,
    /// Cursor to end before (backward pagination, exclusive).
    pub before: Option<Cursor>,
}

impl Pagination {
    /// Forward pagination shorthand.
    pub fn first(n: i32) -> Self {
        Self {
            first: Some(n),
            ..Default::default()
        }
    }
}

/// Paginated result set with edges and page info.
///
/// This is the Relay connection pattern for cursor-based pagination.
/// Constructed per request and discarded after serialization; holds no
/// state across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection<T> {
    /// List of edges (node + cursor pairs), in the requested order.
    pub edges: Vec<Edge<T>>,
    /// Information about the current page.
    pub page_info: PageInfo,
    /// Total count of items matching the filter, independent of the
    /// pagination window.
    pub total_count: Option<i64>,
}

/// A single item in a paginated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<T> {
    /// The actual item.
    pub node: T,
    /// Cursor for this item (used for pagination).
    pub cursor: Cursor,
}

/// Information about the current page in a paginated result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Whether at least one more item exists strictly after the last
    /// edge under the active filter+order.
    pub has_next_page: bool,
    /// Whether at least one more item exists strictly before the first
    /// edge under the active filter+order.
    pub has_previous_page: bool,
    /// Cursor of the first item in this page (None when empty).
    pub start_cursor: Option<Cursor>,
    /// Cursor of the last item in this page (None when empty).
    pub end_cursor: Option<Cursor>,
}

/// Ordering direction for sorted queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

/// The effective ordering of a connection: a field from the closed
/// per-connection enumeration plus a direction.
///
/// Ties on the primary field always break by tiebreak id ascending,
/// regardless of `direction`, so pagination stays deterministic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ordering<F: OrderField> {
    pub field: F,
    pub direction: OrderDirection,
}

impl<F: OrderField> Ordering<F> {
    pub fn new(field: F, direction: OrderDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: F) -> Self {
        Self {
            field,
            direction: OrderDirection::Asc,
        }
    }
}
