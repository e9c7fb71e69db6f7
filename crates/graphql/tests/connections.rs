//! Full schema execution tests against the in-memory catalog.

use std::sync::Arc;

use async_graphql::{Request, Response, Variables};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use syllabus_core::models::{Discount, DiscountId, Training, TrainingId};
use syllabus_core::ports::Catalog;
use syllabus_graphql::{build_schema, SyllabusSchema};
use syllabus_storage::{CatalogSeed, MemoryCatalog};

fn training(id: &str, title: &str) -> Training {
    Training {
        id: TrainingId::new(id),
        title: title.into(),
        objectives: "objectives".into(),
        curriculum: "curriculum".into(),
        overview: None,
        start_date: None,
    }
}

fn discount(id: &str, training: &str, code: &str, pct: i32, month: u32) -> Discount {
    Discount {
        id: DiscountId::new(id),
        training_id: TrainingId::new(training),
        code: code.into(),
        discount_percentage: pct,
        description: None,
        expires_on: Some(Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap()),
    }
}

fn schema() -> SyllabusSchema {
    let catalog = MemoryCatalog::from_seed(CatalogSeed {
        trainings: vec![
            training("t-1", "Rust for Backend Engineers"),
            training("t-2", "GraphQL in Practice"),
        ],
        discounts: vec![
            discount("d-a", "t-1", "A", 10, 1),
            discount("d-b", "t-1", "B", 20, 6),
            discount("d-c", "t-1", "C", 30, 12),
            discount("d-x", "t-2", "X", 50, 3),
        ],
    });
    build_schema(Arc::new(catalog) as Arc<dyn Catalog>)
}

fn global_id(type_name: &str, id: &str) -> String {
    BASE64.encode(format!("{type_name}:{id}"))
}

async fn execute(schema: &SyllabusSchema, query: &str, variables: Value) -> Response {
    schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await
}

fn data(response: Response) -> Value {
    assert!(
        response.errors.is_empty(),
        "unexpected errors: {:?}",
        response.errors
    );
    response.data.into_json().unwrap()
}

const DISCOUNTS_QUERY: &str = r#"
    query Discounts($filter: DiscountFilter, $after: String, $first: Int, $last: Int) {
        discounts(
            filter: $filter
            after: $after
            first: $first
            last: $last
            orderBy: { field: EXPIRES_ON, direction: ASC }
        ) {
            edges { node { code } cursor }
            pageInfo { hasNextPage hasPreviousPage startCursor endCursor }
            totalCount
        }
    }
"#;

fn edge_codes(connection: &Value) -> Vec<&str> {
    connection["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["code"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn first_two_discounts_by_expiry() {
    let schema = schema();
    let vars = json!({ "filter": { "trainingId": global_id("Training", "t-1") }, "first": 2 });
    let result = data(execute(&schema, DISCOUNTS_QUERY, vars).await);
    let connection = &result["discounts"];

    assert_eq!(edge_codes(connection), vec!["A", "B"]);
    assert_eq!(connection["pageInfo"]["hasNextPage"], json!(true));
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], json!(false));
    assert_eq!(connection["totalCount"], json!(3));
}

#[tokio::test]
async fn after_cursor_returns_remainder() {
    let schema = schema();
    let t1 = global_id("Training", "t-1");

    let vars = json!({ "filter": { "trainingId": t1 }, "first": 2 });
    let page = data(execute(&schema, DISCOUNTS_QUERY, vars).await);
    let end_cursor = page["discounts"]["pageInfo"]["endCursor"].clone();

    let vars = json!({ "filter": { "trainingId": t1 }, "after": end_cursor });
    let rest = data(execute(&schema, DISCOUNTS_QUERY, vars).await);
    let connection = &rest["discounts"];

    assert_eq!(edge_codes(connection), vec!["C"]);
    assert_eq!(connection["pageInfo"]["hasNextPage"], json!(false));
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], json!(true));
    assert_eq!(connection["totalCount"], json!(3));
}

#[tokio::test]
async fn negative_first_is_rejected() {
    let schema = schema();
    let vars = json!({ "filter": { "trainingId": global_id("Training", "t-1") }, "first": -1 });
    let response = execute(&schema, DISCOUNTS_QUERY, vars).await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("non-negative"));
}

#[tokio::test]
async fn missing_filter_is_rejected() {
    let schema = schema();
    let response = execute(&schema, DISCOUNTS_QUERY, json!({ "first": 2 })).await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("trainingId"));
}

#[tokio::test]
async fn cursor_from_another_training_is_rejected() {
    let schema = schema();

    let vars = json!({ "filter": { "trainingId": global_id("Training", "t-2") }, "first": 1 });
    let page = data(execute(&schema, DISCOUNTS_QUERY, vars).await);
    let foreign_cursor = page["discounts"]["pageInfo"]["endCursor"].clone();

    let vars = json!({
        "filter": { "trainingId": global_id("Training", "t-1") },
        "after": foreign_cursor,
    });
    let response = execute(&schema, DISCOUNTS_QUERY, vars).await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("range"));
}

#[tokio::test]
async fn nested_discounts_are_pinned_to_parent() {
    let schema = schema();
    let query = r#"
        query Training($id: ID!) {
            training(id: $id) {
                title
                discounts(first: 10) {
                    edges { node { code } }
                    totalCount
                }
            }
        }
    "#;

    let vars = json!({ "id": global_id("Training", "t-2") });
    let result = data(execute(&schema, query, vars).await);

    assert_eq!(result["training"]["title"], json!("GraphQL in Practice"));
    assert_eq!(
        edge_codes(&result["training"]["discounts"]),
        vec!["X"]
    );
    assert_eq!(result["training"]["discounts"]["totalCount"], json!(1));
}

#[tokio::test]
async fn trainings_are_ordered_by_title() {
    let schema = schema();
    let query = r#"
        {
            trainings(first: 10) {
                edges { node { title } }
                totalCount
            }
        }
    "#;
    let result = data(execute(&schema, query, json!({})).await);

    let titles: Vec<&str> = result["trainings"]["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["GraphQL in Practice", "Rust for Backend Engineers"]);
    assert_eq!(result["trainings"]["totalCount"], json!(2));
}

#[tokio::test]
async fn lookups_use_opaque_ids() {
    let schema = schema();
    let query = r#"
        query Discount($id: ID!) {
            discount(id: $id) { id code discountPercentage }
        }
    "#;

    let vars = json!({ "id": global_id("Discount", "d-b") });
    let result = data(execute(&schema, query, vars).await);
    assert_eq!(result["discount"]["code"], json!("B"));
    assert_eq!(result["discount"]["discountPercentage"], json!(20));
    // L'id exposé reste le handle opaque, pas l'identifiant interne
    assert_eq!(result["discount"]["id"], json!(global_id("Discount", "d-b")));

    // Un id du mauvais type est refusé
    let vars = json!({ "id": global_id("Training", "t-1") });
    let response = execute(&schema, query, vars).await;
    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.contains("expected a Discount"));
}

#[tokio::test]
async fn unknown_ids_resolve_to_null() {
    let schema = schema();
    let query = r#"
        query Training($id: ID!) {
            training(id: $id) { title }
        }
    "#;
    let vars = json!({ "id": global_id("Training", "t-404") });
    let result = data(execute(&schema, query, vars).await);
    assert_eq!(result["training"], json!(null));
}
