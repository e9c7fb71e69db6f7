//! Filter and order normalization.
//!
//! List queries arrive with loosely-typed filter/order input (strings on
//! non-GraphQL transports, enums on GraphQL). Normalization happens
//! here, at the boundary: raw input either maps onto the closed
//! per-connection enumerations or is rejected - never coerced. Pure
//! validation, no side effects.

use crate::error::{ResolveError, ResolveResult};
use crate::models::TrainingId;
use crate::ports::{DiscountFilter, OrderDirection, OrderField, Ordering};

/// Raw, transport-agnostic order input.
#[derive(Debug, Clone, Default)]
pub struct RawOrder {
    /// Requested sort field name, e.g. `"expiresOn"`.
    pub field: Option<String>,
    /// Requested direction, `"ASC"` or `"DESC"` (case-insensitive).
    pub direction: Option<String>,
}

/// Raw discount filter input.
#[derive(Debug, Clone, Default)]
pub struct RawDiscountFilter {
    pub training_id: Option<String>,
}

/// Validate raw order input against a connection type's closed field
/// enumeration, applying the documented default when absent.
pub fn normalize_order<F: OrderField>(raw: Option<&RawOrder>) -> ResolveResult<Ordering<F>> {
    let Some(raw) = raw else {
        return Ok(Ordering::default());
    };

    let field = match raw.field.as_deref() {
        None => F::default(),
        Some(name) => F::parse(name)
            .ok_or_else(|| ResolveError::InvalidOrderField(format!("'{name}' is not sortable")))?,
    };

    let direction = match raw.direction.as_deref() {
        None => OrderDirection::default(),
        Some(d) if d.eq_ignore_ascii_case("asc") => OrderDirection::Asc,
        Some(d) if d.eq_ignore_ascii_case("desc") => OrderDirection::Desc,
        Some(d) => {
            return Err(ResolveError::InvalidOrderField(format!(
                "direction '{d}' is not ASC or DESC"
            )));
        }
    };

    Ok(Ordering::new(field, direction))
}

/// Validate a raw discount filter.
///
/// The parent training id is mandatory; a missing or empty value is a
/// caller error, not a "match everything" request.
pub fn normalize_discount_filter(raw: Option<&RawDiscountFilter>) -> ResolveResult<DiscountFilter> {
    let training_id = raw
        .and_then(|f| f.training_id.as_deref())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ResolveError::InvalidFilter("trainingId is required".into()))?;

    Ok(DiscountFilter {
        training_id: TrainingId::new(training_id),
    })
}
