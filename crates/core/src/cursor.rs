//! Opaque pagination cursor codec.
//!
//! A cursor pins an item's position under one specific filter+order
//! combination. It embeds three things: the order field it was minted
//! under, the item's sort value for that field, and the item's unique
//! identifier as tiebreak. The tiebreak is what keeps pagination
//! well-defined across duplicate sort values.
//!
//! Encoding is base64 (URL-safe, unpadded) over a compact JSON token.
//! Cursors deliberately carry no storage offsets, so concurrent writes
//! to the backing collection never invalidate them structurally.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, ResolveResult};
use crate::ports::OrderField;

// =============================================================================
// Sort Values
// =============================================================================

/// A sort-key value captured inside a cursor.
///
/// Closed set of value shapes an order field can produce. `Null` sorts
/// before everything else (items missing an optional sort field group at
/// the start of an ascending scan).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v", rename_all = "snake_case")]
pub enum CursorValue {
    Null,
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl CursorValue {
    fn rank(&self) -> u8 {
        match self {
            CursorValue::Null => 0,
            CursorValue::Int(_) => 1,
            CursorValue::Text(_) => 2,
            CursorValue::Timestamp(_) => 3,
        }
    }
}

impl Ord for CursorValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CursorValue::*;
        match (self, other) {
            (Int(a), Int(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            // Mixed variants only occur for Null against a value; rank
            // ordering puts Null first.
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CursorValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Bounds
// =============================================================================

/// A decoded cursor position: the (sort value, tiebreak id) pair that
/// locates one item in the effective ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorBound {
    pub value: CursorValue,
    pub id: String,
}

// =============================================================================
// Codec
// =============================================================================

/// Wire shape of a cursor before base64. Field names are single letters
/// to keep cursors short.
#[derive(Serialize, Deserialize)]
struct CursorToken {
    f: String,
    v: CursorValue,
    id: String,
}

/// Encode a cursor for an item under the given order field.
pub fn encode<F: OrderField>(field: F, value: CursorValue, tiebreak_id: &str) -> String {
    let token = CursorToken {
        f: field.as_str().to_string(),
        v: value,
        id: tiebreak_id.to_string(),
    };
    // A struct of strings and tagged scalars cannot fail JSON serialization.
    let json = serde_json::to_vec(&token).expect("cursor token serialization cannot fail");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a cursor string into its order field and position.
///
/// Fails with [`ResolveError::MalformedCursor`] when the string is not
/// base64/JSON or names a field outside this connection type's closed
/// enumeration.
pub fn decode<F: OrderField>(cursor: &str) -> ResolveResult<(F, CursorBound)> {
    let bytes = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|e| ResolveError::MalformedCursor(format!("invalid base64: {e}")))?;
    let token: CursorToken = serde_json::from_slice(&bytes)
        .map_err(|e| ResolveError::MalformedCursor(format!("invalid token: {e}")))?;
    let field = F::parse(&token.f).ok_or_else(|| {
        ResolveError::MalformedCursor(format!("unknown order field '{}'", token.f))
    })?;
    Ok((
        field,
        CursorBound {
            value: token.v,
            id: token.id,
        },
    ))
}
