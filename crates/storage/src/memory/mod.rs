//! In-memory catalog adapter.
//!
//! Holds the seeded collections behind a `parking_lot::RwLock` and
//! answers the data-source port by sorting/slicing snapshots with the
//! comparator helpers from `syllabus-core`. Reads never block each
//! other; the engine above is stateless, so concurrent resolution
//! against this adapter is safe.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use syllabus_core::cursor::CursorBound;
use syllabus_core::error::SourceResult;
use syllabus_core::models::{Discount, DiscountId, Training, TrainingId};
use syllabus_core::ports::{
    compare_nodes, compare_to_bound, Catalog, ConnectionNode, DataSource, DiscountFilter,
    FetchDirection, Ordering, TrainingFilter,
};

// =============================================================================
// Seed Data
// =============================================================================

/// Serializable catalog contents, loaded from a JSON seed file by the
/// server binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub trainings: Vec<Training>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
}

// =============================================================================
// Memory Catalog
// =============================================================================

#[derive(Default)]
struct CatalogData {
    trainings: Vec<Training>,
    discounts: Vec<Discount>,
}

/// In-memory implementation of the catalog ports.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<CatalogData>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: CatalogSeed) -> Self {
        debug!(
            trainings = seed.trainings.len(),
            discounts = seed.discounts.len(),
            "seeding memory catalog"
        );
        Self {
            inner: RwLock::new(CatalogData {
                trainings: seed.trainings,
                discounts: seed.discounts,
            }),
        }
    }

    pub fn insert_training(&self, training: Training) {
        self.inner.write().trainings.push(training);
    }

    pub fn insert_discount(&self, discount: Discount) {
        self.inner.write().discounts.push(discount);
    }

    fn matching_trainings(&self, _filter: &TrainingFilter) -> Vec<Training> {
        self.inner.read().trainings.clone()
    }

    fn matching_discounts(&self, filter: &DiscountFilter) -> Vec<Discount> {
        self.inner
            .read()
            .discounts
            .iter()
            .filter(|d| d.training_id == filter.training_id)
            .cloned()
            .collect()
    }
}

// =============================================================================
// Range Helpers
// =============================================================================

/// Sort a matching snapshot, cut it to the exclusive bounds, and keep
/// `limit` items from the end `direction` selects. Items come back in
/// effective order either way.
fn paged_range<N: ConnectionNode>(
    mut rows: Vec<N>,
    order: Ordering<N::Field>,
    lower: Option<&CursorBound>,
    upper: Option<&CursorBound>,
    limit: Option<usize>,
    direction: FetchDirection,
) -> Vec<N> {
    rows.sort_by(|a, b| compare_nodes(a, b, order));
    rows.retain(|n| {
        lower.is_none_or(|b| compare_to_bound(n, b, order).is_gt())
            && upper.is_none_or(|b| compare_to_bound(n, b, order).is_lt())
    });
    if let Some(limit) = limit {
        match direction {
            FetchDirection::Forward => rows.truncate(limit),
            FetchDirection::Backward => {
                if rows.len() > limit {
                    rows.drain(..rows.len() - limit);
                }
            }
        }
    }
    rows
}

fn any_beyond<N: ConnectionNode>(
    rows: &[N],
    order: Ordering<N::Field>,
    boundary: &CursorBound,
    direction: FetchDirection,
) -> bool {
    rows.iter().any(|n| {
        let cmp = compare_to_bound(n, boundary, order);
        match direction {
            FetchDirection::Forward => cmp.is_gt(),
            FetchDirection::Backward => cmp.is_lt(),
        }
    })
}

fn any_at<N: ConnectionNode>(rows: &[N], bound: &CursorBound) -> bool {
    rows.iter().any(|n| n.tiebreak_id() == bound.id)
}

// =============================================================================
// Port Implementations
// =============================================================================

#[async_trait]
impl DataSource<Training> for MemoryCatalog {
    type Filter = TrainingFilter;

    async fn count_matching(&self, filter: &TrainingFilter) -> SourceResult<u64> {
        Ok(self.matching_trainings(filter).len() as u64)
    }

    async fn range_matching(
        &self,
        filter: &TrainingFilter,
        order: Ordering<<Training as ConnectionNode>::Field>,
        lower_exclusive: Option<&CursorBound>,
        upper_exclusive: Option<&CursorBound>,
        limit: Option<usize>,
        direction: FetchDirection,
    ) -> SourceResult<Vec<Training>> {
        Ok(paged_range(
            self.matching_trainings(filter),
            order,
            lower_exclusive,
            upper_exclusive,
            limit,
            direction,
        ))
    }

    async fn exists_beyond(
        &self,
        filter: &TrainingFilter,
        order: Ordering<<Training as ConnectionNode>::Field>,
        boundary: &CursorBound,
        direction: FetchDirection,
    ) -> SourceResult<bool> {
        Ok(any_beyond(
            &self.matching_trainings(filter),
            order,
            boundary,
            direction,
        ))
    }

    async fn contains(&self, filter: &TrainingFilter, bound: &CursorBound) -> SourceResult<bool> {
        Ok(any_at(&self.matching_trainings(filter), bound))
    }
}

#[async_trait]
impl DataSource<Discount> for MemoryCatalog {
    type Filter = DiscountFilter;

    async fn count_matching(&self, filter: &DiscountFilter) -> SourceResult<u64> {
        Ok(self.matching_discounts(filter).len() as u64)
    }

    async fn range_matching(
        &self,
        filter: &DiscountFilter,
        order: Ordering<<Discount as ConnectionNode>::Field>,
        lower_exclusive: Option<&CursorBound>,
        upper_exclusive: Option<&CursorBound>,
        limit: Option<usize>,
        direction: FetchDirection,
    ) -> SourceResult<Vec<Discount>> {
        Ok(paged_range(
            self.matching_discounts(filter),
            order,
            lower_exclusive,
            upper_exclusive,
            limit,
            direction,
        ))
    }

    async fn exists_beyond(
        &self,
        filter: &DiscountFilter,
        order: Ordering<<Discount as ConnectionNode>::Field>,
        boundary: &CursorBound,
        direction: FetchDirection,
    ) -> SourceResult<bool> {
        Ok(any_beyond(
            &self.matching_discounts(filter),
            order,
            boundary,
            direction,
        ))
    }

    async fn contains(&self, filter: &DiscountFilter, bound: &CursorBound) -> SourceResult<bool> {
        Ok(any_at(&self.matching_discounts(filter), bound))
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    fn trainings(&self) -> &dyn DataSource<Training, Filter = TrainingFilter> {
        self
    }

    fn discounts(&self) -> &dyn DataSource<Discount, Filter = DiscountFilter> {
        self
    }

    async fn training_by_id(&self, id: &TrainingId) -> SourceResult<Option<Training>> {
        Ok(self
            .inner
            .read()
            .trainings
            .iter()
            .find(|t| &t.id == id)
            .cloned())
    }

    async fn discount_by_id(&self, id: &DiscountId) -> SourceResult<Option<Discount>> {
        Ok(self
            .inner
            .read()
            .discounts
            .iter()
            .find(|d| &d.id == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use syllabus_core::cursor::CursorValue;
    use syllabus_core::models::DiscountOrderField;
    use syllabus_core::ports::{OrderDirection, Pagination};
    use syllabus_core::services::resolve;

    fn seed() -> CatalogSeed {
        let expires = |y, m| Some(Utc.with_ymd_and_hms(y, m, 1, 0, 0, 0).unwrap());
        CatalogSeed {
            trainings: vec![
                Training {
                    id: TrainingId::new("t-1"),
                    title: "Rust for Backend Engineers".into(),
                    objectives: "Own a production service".into(),
                    curriculum: "Ownership, async, deployment".into(),
                    overview: None,
                    start_date: expires(2024, 9),
                },
                Training {
                    id: TrainingId::new("t-2"),
                    title: "GraphQL in Practice".into(),
                    objectives: "Design stable APIs".into(),
                    curriculum: "Schemas, connections, federation".into(),
                    overview: Some("Two-day workshop".into()),
                    start_date: None,
                },
            ],
            discounts: vec![
                Discount {
                    id: DiscountId::new("d-a"),
                    training_id: TrainingId::new("t-1"),
                    code: "A".into(),
                    discount_percentage: 10,
                    description: None,
                    expires_on: expires(2024, 1),
                },
                Discount {
                    id: DiscountId::new("d-b"),
                    training_id: TrainingId::new("t-1"),
                    code: "B".into(),
                    discount_percentage: 20,
                    description: None,
                    expires_on: expires(2024, 6),
                },
                Discount {
                    id: DiscountId::new("d-c"),
                    training_id: TrainingId::new("t-1"),
                    code: "C".into(),
                    discount_percentage: 30,
                    description: None,
                    expires_on: expires(2024, 12),
                },
                Discount {
                    id: DiscountId::new("d-x"),
                    training_id: TrainingId::new("t-2"),
                    code: "X".into(),
                    discount_percentage: 50,
                    description: None,
                    expires_on: expires(2024, 3),
                },
            ],
        }
    }

    fn by_expiry() -> Ordering<DiscountOrderField> {
        Ordering::ascending(DiscountOrderField::ExpiresOn)
    }

    fn t1() -> DiscountFilter {
        DiscountFilter {
            training_id: TrainingId::new("t-1"),
        }
    }

    fn bound_of(catalog: &MemoryCatalog, id: &str) -> CursorBound {
        let data = catalog.inner.read();
        let d = data.discounts.iter().find(|d| d.id.as_str() == id).unwrap();
        CursorBound {
            value: d.sort_value(DiscountOrderField::ExpiresOn),
            id: d.id.as_str().to_string(),
        }
    }

    #[tokio::test]
    async fn test_bounds_are_exclusive_and_positional() {
        let catalog = MemoryCatalog::from_seed(seed());
        let after_a = bound_of(&catalog, "d-a");
        let before_c = bound_of(&catalog, "d-c");

        let rows = catalog
            .discounts()
            .range_matching(
                &t1(),
                by_expiry(),
                Some(&after_a),
                Some(&before_c),
                None,
                FetchDirection::Forward,
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "B");
    }

    #[tokio::test]
    async fn test_bound_still_positions_after_item_removed() {
        let catalog = MemoryCatalog::from_seed(seed());
        let after_b = bound_of(&catalog, "d-b");
        catalog.inner.write().discounts.retain(|d| d.code != "B");

        // La borne reste positionnelle même si l'élément a disparu
        let rows = catalog
            .discounts()
            .range_matching(
                &t1(),
                by_expiry(),
                Some(&after_b),
                None,
                None,
                FetchDirection::Forward,
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "C");
    }

    #[tokio::test]
    async fn test_backward_limit_keeps_tail_in_effective_order() {
        let catalog = MemoryCatalog::from_seed(seed());
        let rows = catalog
            .discounts()
            .range_matching(&t1(), by_expiry(), None, None, Some(2), FetchDirection::Backward)
            .await
            .unwrap();

        let codes: Vec<&str> = rows.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn test_exists_beyond_and_contains_respect_filter() {
        let catalog = MemoryCatalog::from_seed(seed());
        let at_c = bound_of(&catalog, "d-c");
        let at_x = bound_of(&catalog, "d-x");

        let discounts = catalog.discounts();
        assert!(!discounts
            .exists_beyond(&t1(), by_expiry(), &at_c, FetchDirection::Forward)
            .await
            .unwrap());
        assert!(discounts
            .exists_beyond(&t1(), by_expiry(), &at_c, FetchDirection::Backward)
            .await
            .unwrap());

        // d-x appartient à t-2, pas à t-1
        assert!(!discounts.contains(&t1(), &at_x).await.unwrap());
        assert!(discounts
            .contains(
                &DiscountFilter {
                    training_id: TrainingId::new("t-2"),
                },
                &at_x
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_trainings_default_order_is_title_ascending() {
        let catalog = MemoryCatalog::from_seed(seed());
        let conn = resolve(
            catalog.trainings(),
            &TrainingFilter::default(),
            Ordering::default(),
            &Pagination::default(),
        )
        .await
        .unwrap();

        let titles: Vec<&str> = conn.edges.iter().map(|e| e.node.title.as_str()).collect();
        assert_eq!(titles, vec!["GraphQL in Practice", "Rust for Backend Engineers"]);
    }

    #[tokio::test]
    async fn test_missing_start_date_sorts_first_ascending() {
        let catalog = MemoryCatalog::from_seed(seed());
        let order = Ordering::new(
            syllabus_core::models::TrainingOrderField::StartDate,
            OrderDirection::Asc,
        );
        let conn = resolve(
            catalog.trainings(),
            &TrainingFilter::default(),
            order,
            &Pagination::default(),
        )
        .await
        .unwrap();

        // t-2 n'a pas de date de début: il vient en premier
        assert_eq!(conn.edges[0].node.id, TrainingId::new("t-2"));
        assert_eq!(
            conn.edges[0].node.sort_value(syllabus_core::models::TrainingOrderField::StartDate),
            CursorValue::Null
        );
    }

    #[tokio::test]
    async fn test_resolver_scenario_through_adapter() {
        let catalog = MemoryCatalog::from_seed(seed());
        let conn = resolve(catalog.discounts(), &t1(), by_expiry(), &Pagination::first(2))
            .await
            .unwrap();

        let codes: Vec<&str> = conn.edges.iter().map(|e| e.node.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert!(conn.page_info.has_next_page);
        assert!(!conn.page_info.has_previous_page);
        assert_eq!(conn.total_count, Some(3));
    }

    #[tokio::test]
    async fn test_seed_roundtrips_through_json() {
        let seed = seed();
        let json = serde_json::to_string(&seed).unwrap();
        let parsed: CatalogSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.trainings, seed.trainings);
        assert_eq!(parsed.discounts, seed.discounts);
    }
}
