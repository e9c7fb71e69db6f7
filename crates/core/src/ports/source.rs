//! Port trait for data sources.
//!
//! [`DataSource`] defines the storage interface consumed by the
//! connection resolver: an ordered, filterable view over a backing
//! collection. Implementations live in the infrastructure layer
//! (e.g. `syllabus-storage`), which is also where any retry or caching
//! policy belongs - the resolver surfaces source failures unchanged.

use async_trait::async_trait;

use crate::cursor::{CursorBound, CursorValue};
use crate::error::SourceResult;
use crate::models::{Discount, DiscountId, Training, TrainingId};

use super::pagination::Ordering;

// =============================================================================
// Node & Field Traits
// =============================================================================

/// A sortable field drawn from a connection type's closed enumeration.
///
/// `Default` is the documented stable ordering applied when the caller
/// supplies none; it must keep cursors well-defined (ties still break
/// by tiebreak id).
pub trait OrderField: Copy + Eq + Default + Send + Sync + 'static {
    /// Stable name embedded in cursors.
    fn as_str(&self) -> &'static str;

    /// Inverse of [`as_str`](Self::as_str). `None` for names outside
    /// the enumeration.
    fn parse(name: &str) -> Option<Self>;
}

/// An entity that can appear in a connection.
///
/// Nodes are immutable snapshots returned by the data source; the
/// engine never mutates them.
pub trait ConnectionNode: Clone + Send + Sync + 'static {
    type Field: OrderField;

    /// Unique identifier used to total-order items whose primary sort
    /// value is equal.
    fn tiebreak_id(&self) -> &str;

    /// The node's sort value for a given order field.
    fn sort_value(&self, field: Self::Field) -> CursorValue;
}

// =============================================================================
// Filter Types
// =============================================================================

/// Filter options for training queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingFilter {}

/// Filter options for discount queries.
///
/// The parent training is mandatory: discount lists only exist in the
/// context of one training. Nested resolution injects it from the
/// parent's identity; top-level callers must supply it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountFilter {
    pub training_id: TrainingId,
}

// =============================================================================
// Data-Source Trait
// =============================================================================

/// Which end of the effective ordering a limited fetch truncates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDirection {
    /// Keep the head of the range (forward pagination).
    Forward,
    /// Keep the tail of the range (backward pagination).
    Backward,
}

/// Ordered, filterable view over a backing collection.
///
/// The source is expected to produce slices already sorted under the
/// requested ordering (primary field per direction, tiebreak id
/// ascending); the resolver does not sort in memory. All methods are
/// read-only and safe to call concurrently.
#[async_trait]
pub trait DataSource<N: ConnectionNode>: Send + Sync {
    type Filter: Send + Sync;

    /// Count all items matching `filter`, independent of pagination.
    async fn count_matching(&self, filter: &Self::Filter) -> SourceResult<u64>;

    /// Fetch the ordered slice matching `filter` between two exclusive
    /// bounds.
    ///
    /// The returned items are always in effective order; `direction`
    /// only selects which end `limit` truncates from. Bounds are
    /// positional (sort value + tiebreak id), never cursor-string
    /// equality, so they locate correctly even if the bounding item
    /// was deleted.
    async fn range_matching(
        &self,
        filter: &Self::Filter,
        order: Ordering<N::Field>,
        lower_exclusive: Option<&CursorBound>,
        upper_exclusive: Option<&CursorBound>,
        limit: Option<usize>,
        direction: FetchDirection,
    ) -> SourceResult<Vec<N>>;

    /// Cheap existence probe: does at least one matching item lie
    /// strictly beyond `boundary` in the given direction?
    async fn exists_beyond(
        &self,
        filter: &Self::Filter,
        order: Ordering<N::Field>,
        boundary: &CursorBound,
        direction: FetchDirection,
    ) -> SourceResult<bool>;

    /// Membership probe: does an item matching `filter` sit exactly at
    /// `bound`? Backs the cursor-in-range check for `after`/`before`
    /// arguments.
    async fn contains(&self, filter: &Self::Filter, bound: &CursorBound) -> SourceResult<bool>;
}

// =============================================================================
// Composite Catalog
// =============================================================================

/// Combined read access to the catalog's collections.
///
/// This is what the API layer holds: one object exposing each
/// connection's data source plus point lookups by identifier.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Data source backing training connections.
    fn trainings(&self) -> &dyn DataSource<Training, Filter = TrainingFilter>;

    /// Data source backing discount connections.
    fn discounts(&self) -> &dyn DataSource<Discount, Filter = DiscountFilter>;

    /// Look up a training by id.
    async fn training_by_id(&self, id: &TrainingId) -> SourceResult<Option<Training>>;

    /// Look up a discount by id.
    async fn discount_by_id(&self, id: &DiscountId) -> SourceResult<Option<Discount>>;
}

/// Compare two nodes under an ordering.
///
/// Primary comparison on the sort value (reversed for descending),
/// ties broken by tiebreak id ascending regardless of direction.
/// Adapters can use this directly when the backing collection cannot
/// sort for them.
pub fn compare_nodes<N: ConnectionNode>(
    a: &N,
    b: &N,
    order: Ordering<N::Field>,
) -> std::cmp::Ordering {
    let primary = apply_direction(
        a.sort_value(order.field).cmp(&b.sort_value(order.field)),
        order.direction,
    );
    primary.then_with(|| a.tiebreak_id().cmp(b.tiebreak_id()))
}

/// Compare a node against a positional bound under an ordering.
///
/// Same comparison rule as [`compare_nodes`], with the bound standing
/// in for a (possibly absent) item.
pub fn compare_to_bound<N: ConnectionNode>(
    node: &N,
    bound: &CursorBound,
    order: Ordering<N::Field>,
) -> std::cmp::Ordering {
    let primary = apply_direction(
        node.sort_value(order.field).cmp(&bound.value),
        order.direction,
    );
    primary.then_with(|| node.tiebreak_id().cmp(bound.id.as_str()))
}

fn apply_direction(
    ordering: std::cmp::Ordering,
    direction: super::pagination::OrderDirection,
) -> std::cmp::Ordering {
    match direction {
        super::pagination::OrderDirection::Asc => ordering,
        super::pagination::OrderDirection::Desc => ordering.reverse(),
    }
}
