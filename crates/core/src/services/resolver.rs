//! Connection resolution.
//!
//! [`resolve`] is the single pagination algorithm behind every
//! connection in the schema: it validates pagination arguments, turns
//! `after`/`before` cursors into positional bounds, asks the data
//! source for the bounded slice, and assembles edges, page info, and
//! the total count. It is stateless and read-only per invocation;
//! concurrent calls against the same source are safe.
//!
//! Resolution is all-or-nothing: on any error, no partial connection
//! is returned.

use tracing::debug;

use crate::cursor::{self, CursorBound};
use crate::error::{ResolveError, ResolveResult};
use crate::models::{Discount, DiscountOrderField, TrainingId};
use crate::ports::{
    Connection, ConnectionNode, Cursor, DataSource, DiscountFilter, Edge, FetchDirection,
    OrderField, Ordering, PageInfo, Pagination,
};

/// Resolve one page of a connection.
///
/// `after`/`before` bound the range (exclusive, positional); `first`
/// truncates from the head, then `last` from the tail when both are
/// given. The produced edge order always matches `order`, ties broken
/// by tiebreak id ascending.
pub async fn resolve<N, S>(
    source: &S,
    filter: &S::Filter,
    order: Ordering<N::Field>,
    pagination: &Pagination,
) -> ResolveResult<Connection<N>>
where
    N: ConnectionNode,
    S: DataSource<N> + ?Sized,
{
    // Caller-error validation happens before any data-source call.
    let first = page_size(pagination.first, "first")?;
    let last = page_size(pagination.last, "last")?;
    let lower = decode_bound(order, pagination.after.as_ref(), "after")?;
    let upper = decode_bound(order, pagination.before.as_ref(), "before")?;

    // A cursor that decodes but points at an item outside the active
    // filter must not silently widen or shift the range.
    for (bound, arg) in [(&lower, "after"), (&upper, "before")] {
        if let Some(bound) = bound {
            if !source.contains(filter, bound).await? {
                return Err(ResolveError::CursorNotInRange(format!(
                    "{arg} cursor does not match any item under the active filter"
                )));
            }
        }
    }

    let total = source.count_matching(filter).await?;

    let nodes = match (first, last) {
        // Backward-only pagination keeps the tail of the bounded range.
        (None, Some(n)) => {
            source
                .range_matching(
                    filter,
                    order,
                    lower.as_ref(),
                    upper.as_ref(),
                    Some(n),
                    FetchDirection::Backward,
                )
                .await?
        }
        (f, l) => {
            let mut nodes = source
                .range_matching(
                    filter,
                    order,
                    lower.as_ref(),
                    upper.as_ref(),
                    f,
                    FetchDirection::Forward,
                )
                .await?;
            if let Some(n) = l {
                if nodes.len() > n {
                    nodes.drain(..nodes.len() - n);
                }
            }
            nodes
        }
    };

    let edges: Vec<Edge<N>> = nodes
        .into_iter()
        .map(|node| {
            let cursor = Cursor {
                value: cursor::encode(
                    order.field,
                    node.sort_value(order.field),
                    node.tiebreak_id(),
                ),
            };
            Edge { node, cursor }
        })
        .collect();

    let page_info = match (edges.first(), edges.last()) {
        (Some(head), Some(tail)) => {
            let head_bound = bound_of(&head.node, order.field);
            let tail_bound = bound_of(&tail.node, order.field);
            PageInfo {
                has_next_page: source
                    .exists_beyond(filter, order, &tail_bound, FetchDirection::Forward)
                    .await?,
                has_previous_page: source
                    .exists_beyond(filter, order, &head_bound, FetchDirection::Backward)
                    .await?,
                start_cursor: Some(head.cursor.clone()),
                end_cursor: Some(tail.cursor.clone()),
            }
        }
        // Empty page: both flags false, both cursors absent; the total
        // count above still stands.
        _ => PageInfo::default(),
    };

    debug!(total, edges = edges.len(), "resolved connection");

    Ok(Connection {
        edges,
        page_info,
        total_count: Some(total as i64),
    })
}

/// Resolve a training's discount connection.
///
/// The discount filter's mandatory parent key is pinned to the parent
/// training here, so nested callers can neither omit nor override it.
pub async fn resolve_training_discounts<S>(
    source: &S,
    training_id: TrainingId,
    order: Ordering<DiscountOrderField>,
    pagination: &Pagination,
) -> ResolveResult<Connection<Discount>>
where
    S: DataSource<Discount, Filter = DiscountFilter> + ?Sized,
{
    let filter = DiscountFilter { training_id };
    resolve(source, &filter, order, pagination).await
}

fn page_size(value: Option<i32>, arg: &str) -> ResolveResult<Option<usize>> {
    match value {
        None => Ok(None),
        Some(n) if n < 0 => Err(ResolveError::InvalidPaginationArgument(format!(
            "{arg} must be non-negative, got {n}"
        ))),
        Some(n) => Ok(Some(n as usize)),
    }
}

fn decode_bound<F: OrderField>(
    order: Ordering<F>,
    cursor: Option<&Cursor>,
    arg: &str,
) -> ResolveResult<Option<CursorBound>> {
    let Some(cursor) = cursor else {
        return Ok(None);
    };
    let (field, bound) = cursor::decode::<F>(&cursor.value)?;
    // Cursors are only comparable under the ordering that minted them.
    if field != order.field {
        return Err(ResolveError::CursorNotInRange(format!(
            "{arg} cursor was created under order field '{}', active order field is '{}'",
            field.as_str(),
            order.field.as_str()
        )));
    }
    Ok(Some(bound))
}

fn bound_of<N: ConnectionNode>(node: &N, field: N::Field) -> CursorBound {
    CursorBound {
        value: node.sort_value(field),
        id: node.tiebreak_id().to_string(),
    }
}
