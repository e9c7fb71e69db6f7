//! GraphQL schema definition.
//!
//! This module provides the catalog schema: trainings and discounts as
//! Relay connections, point lookups by opaque global id, and the
//! enum/input types callers use to order and filter discount lists.

use std::sync::Arc;

use async_graphql::{
    ComplexObject, Context, EmptyMutation, EmptySubscription, Error, Result, Schema, ID,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};

use syllabus_core::models;
use syllabus_core::ports::{Catalog, Cursor, Ordering, Pagination, TrainingFilter};
use syllabus_core::services::{
    normalize_discount_filter, resolve, resolve_training_discounts, RawDiscountFilter,
};

use crate::types::SyllabusSchema;

// -----------------------------------------------------------------------------
// Schema Configuration
// -----------------------------------------------------------------------------

/// Maximum query depth to prevent deeply nested queries (DoS protection).
/// Note: GraphQL introspection requires depth ~13, so we use 15 to allow it.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Maximum query complexity score (DoS protection).
/// Each field has a default complexity of 1, nested objects multiply.
pub const MAX_QUERY_COMPLEXITY: usize = 500;

/// Upper bound applied to `first`/`last` at this boundary. Negative
/// values are not clamped; the resolver rejects them as caller errors.
pub const MAX_PAGE_SIZE: i32 = 100;

// -----------------------------------------------------------------------------
// Schema Builder
// -----------------------------------------------------------------------------

/// Build the catalog schema over any [`Catalog`] implementation.
///
/// Includes query depth and complexity limits for DoS protection.
pub fn build_schema(catalog: Arc<dyn Catalog>) -> SyllabusSchema {
    Schema::build(CatalogQuery, EmptyMutation, EmptySubscription)
        .data(catalog)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
        .finish()
}

// -----------------------------------------------------------------------------
// Global Identifiers
// -----------------------------------------------------------------------------

const TRAINING_TYPE: &str = "Training";
const DISCOUNT_TYPE: &str = "Discount";

/// Wrap an internal identifier in an opaque global handle.
///
/// Callers never see raw storage identifiers, so those can change
/// without breaking external references.
fn to_global_id(type_name: &str, id: &str) -> ID {
    ID(BASE64.encode(format!("{type_name}:{id}")))
}

/// Decode a global handle into its node type name and internal id.
fn from_global_id(id: &ID) -> Result<(String, String)> {
    let decoded = BASE64
        .decode(id.as_str())
        .map_err(|_| Error::new("Malformed id"))?;
    let decoded = String::from_utf8(decoded).map_err(|_| Error::new("Malformed id"))?;
    let (type_name, raw) = decoded
        .split_once(':')
        .ok_or_else(|| Error::new("Malformed id"))?;
    Ok((type_name.to_string(), raw.to_string()))
}

/// Decode a global handle, requiring a specific node type.
fn expect_global_id(id: &ID, type_name: &str) -> Result<String> {
    let (ty, raw) = from_global_id(id)?;
    if ty != type_name {
        return Err(Error::new(format!(
            "Id references a {ty}, expected a {type_name}"
        )));
    }
    Ok(raw)
}

// -----------------------------------------------------------------------------
// Pagination Arguments
// -----------------------------------------------------------------------------

fn page_args(
    after: Option<String>,
    first: Option<i32>,
    before: Option<String>,
    last: Option<i32>,
) -> Pagination {
    let clamp = |n: Option<i32>| n.map(|v| v.min(MAX_PAGE_SIZE));
    Pagination {
        first: clamp(first),
        after: after.map(|value| Cursor { value }),
        last: clamp(last),
        before: before.map(|value| Cursor { value }),
    }
}

// -----------------------------------------------------------------------------
// Query Root
// -----------------------------------------------------------------------------

/// Query root for the training catalog.
#[derive(Default)]
pub struct CatalogQuery;

#[async_graphql::Object]
impl CatalogQuery {
    /// List trainings, ordered by title ascending.
    async fn trainings<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        after: Option<String>,
        first: Option<i32>,
        before: Option<String>,
        last: Option<i32>,
    ) -> Result<TrainingConnection> {
        let catalog = ctx.data::<Arc<dyn Catalog>>()?;
        let connection = resolve(
            catalog.trainings(),
            &TrainingFilter::default(),
            Ordering::default(),
            &page_args(after, first, before, last),
        )
        .await?;
        Ok(TrainingConnection::from(connection))
    }

    /// Get a training by id.
    async fn training<'ctx>(&self, ctx: &Context<'ctx>, id: ID) -> Result<Option<Training>> {
        let catalog = ctx.data::<Arc<dyn Catalog>>()?;
        let raw = expect_global_id(&id, TRAINING_TYPE)?;
        let training = catalog
            .training_by_id(&models::TrainingId::new(raw))
            .await?;
        Ok(training.map(Training::from))
    }

    /// List a training's discounts with pagination, filtering, and ordering.
    ///
    /// The filter is mandatory: discount lists only exist per training.
    async fn discounts<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        after: Option<String>,
        first: Option<i32>,
        before: Option<String>,
        last: Option<i32>,
        filter: Option<DiscountFilterInput>,
        order_by: Option<DiscountOrder>,
    ) -> Result<DiscountConnection> {
        let catalog = ctx.data::<Arc<dyn Catalog>>()?;

        let raw_filter = filter
            .map(|f| {
                let training_id = expect_global_id(&f.training_id, TRAINING_TYPE)?;
                Ok::<_, Error>(RawDiscountFilter {
                    training_id: Some(training_id),
                })
            })
            .transpose()?;
        let filter = normalize_discount_filter(raw_filter.as_ref())?;

        let connection = resolve(
            catalog.discounts(),
            &filter,
            discount_ordering(order_by),
            &page_args(after, first, before, last),
        )
        .await?;
        Ok(DiscountConnection::from(connection))
    }

    /// Get a discount by id.
    async fn discount<'ctx>(&self, ctx: &Context<'ctx>, id: ID) -> Result<Option<Discount>> {
        let catalog = ctx.data::<Arc<dyn Catalog>>()?;
        let raw = expect_global_id(&id, DISCOUNT_TYPE)?;
        let discount = catalog
            .discount_by_id(&models::DiscountId::new(raw))
            .await?;
        Ok(discount.map(Discount::from))
    }
}

// -----------------------------------------------------------------------------
// GraphQL Types
// -----------------------------------------------------------------------------

/// Ordering direction.
#[derive(async_graphql::Enum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderDirection {
    /// Specifies an ascending order for a given orderBy argument.
    #[default]
    Asc,
    /// Specifies a descending order for a given orderBy argument.
    Desc,
}

impl From<OrderDirection> for syllabus_core::ports::OrderDirection {
    fn from(direction: OrderDirection) -> Self {
        match direction {
            OrderDirection::Asc => syllabus_core::ports::OrderDirection::Asc,
            OrderDirection::Desc => syllabus_core::ports::OrderDirection::Desc,
        }
    }
}

/// Sortable discount fields.
#[derive(async_graphql::Enum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscountOrderField {
    /// Discount code (the default ordering).
    #[default]
    Code,
    /// Percentage taken off the training price.
    DiscountPercentage,
    /// Expiry date; discounts without one sort first ascending.
    ExpiresOn,
}

impl From<DiscountOrderField> for models::DiscountOrderField {
    fn from(field: DiscountOrderField) -> Self {
        match field {
            DiscountOrderField::Code => models::DiscountOrderField::Code,
            DiscountOrderField::DiscountPercentage => {
                models::DiscountOrderField::DiscountPercentage
            }
            DiscountOrderField::ExpiresOn => models::DiscountOrderField::ExpiresOn,
        }
    }
}

/// Discount ordering input.
#[derive(async_graphql::InputObject, Debug, Default)]
pub struct DiscountOrder {
    pub field: Option<DiscountOrderField>,
    pub direction: Option<OrderDirection>,
}

/// Discount filter input; pins the parent training.
#[derive(async_graphql::InputObject, Debug)]
#[graphql(name = "DiscountFilter")]
pub struct DiscountFilterInput {
    pub training_id: ID,
}

fn discount_ordering(order_by: Option<DiscountOrder>) -> Ordering<models::DiscountOrderField> {
    order_by
        .map(|o| {
            Ordering::new(
                o.field.unwrap_or_default().into(),
                o.direction.unwrap_or_default().into(),
            )
        })
        .unwrap_or_default()
}

/// Training type.
#[derive(async_graphql::SimpleObject)]
#[graphql(complex)]
pub struct Training {
    pub id: ID,
    pub title: String,
    pub objectives: String,
    pub curriculum: String,
    pub overview: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    #[graphql(skip)]
    internal_id: models::TrainingId,
}

#[ComplexObject]
impl Training {
    /// This training's discounts.
    ///
    /// The parent filter is injected from this training's identity;
    /// it cannot be supplied or omitted by the caller.
    async fn discounts<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        after: Option<String>,
        first: Option<i32>,
        before: Option<String>,
        last: Option<i32>,
        order_by: Option<DiscountOrder>,
    ) -> Result<DiscountConnection> {
        let catalog = ctx.data::<Arc<dyn Catalog>>()?;
        let connection = resolve_training_discounts(
            catalog.discounts(),
            self.internal_id.clone(),
            discount_ordering(order_by),
            &page_args(after, first, before, last),
        )
        .await?;
        Ok(DiscountConnection::from(connection))
    }
}

impl From<models::Training> for Training {
    fn from(t: models::Training) -> Self {
        Self {
            id: to_global_id(TRAINING_TYPE, t.id.as_str()),
            title: t.title,
            objectives: t.objectives,
            curriculum: t.curriculum,
            overview: t.overview,
            start_date: t.start_date,
            internal_id: t.id,
        }
    }
}

/// Discount type.
#[derive(async_graphql::SimpleObject)]
pub struct Discount {
    pub id: ID,
    pub code: String,
    pub discount_percentage: i32,
    pub description: Option<String>,
    pub expires_on: Option<DateTime<Utc>>,
}

impl From<models::Discount> for Discount {
    fn from(d: models::Discount) -> Self {
        Self {
            id: to_global_id(DISCOUNT_TYPE, d.id.as_str()),
            code: d.code,
            discount_percentage: d.discount_percentage,
            description: d.description,
            expires_on: d.expires_on,
        }
    }
}

// -----------------------------------------------------------------------------
// Connection Types (Relay-style pagination)
// -----------------------------------------------------------------------------

#[derive(async_graphql::SimpleObject)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl From<syllabus_core::ports::PageInfo> for PageInfo {
    fn from(info: syllabus_core::ports::PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor.map(|c| c.value),
            end_cursor: info.end_cursor.map(|c| c.value),
        }
    }
}

/// Generate Relay-style connection types (Edge + Connection) with From impl.
macro_rules! define_connection {
    ($node:ty, $core_model:ty, $edge:ident, $connection:ident) => {
        #[derive(async_graphql::SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
        }

        #[derive(async_graphql::SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub page_info: PageInfo,
            /// Total count is not part of the Relay connection spec,
            /// but the schema extends it, matching the data source's
            /// count of all items behind the filter.
            pub total_count: Option<i64>,
        }

        impl From<syllabus_core::ports::Connection<$core_model>> for $connection {
            fn from(conn: syllabus_core::ports::Connection<$core_model>) -> Self {
                Self {
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|edge| $edge {
                            node: <$node>::from(edge.node),
                            cursor: edge.cursor.value,
                        })
                        .collect(),
                    page_info: PageInfo::from(conn.page_info),
                    total_count: conn.total_count,
                }
            }
        }
    };
}

define_connection!(Training, models::Training, TrainingEdge, TrainingConnection);
define_connection!(Discount, models::Discount, DiscountEdge, DiscountConnection);
