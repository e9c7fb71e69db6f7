//! GraphQL type definitions.

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

use crate::schema::CatalogQuery;

/// The catalog GraphQL schema type.
pub type SyllabusSchema = Schema<CatalogQuery, EmptyMutation, EmptySubscription>;
