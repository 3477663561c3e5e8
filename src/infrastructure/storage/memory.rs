//! In-memory tariff repository

use std::collections::BTreeSet;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, RouteKey, TariffRepository, TariffRow};

/// In-memory tariff table for development, tests and embedding.
///
/// Rows are keyed by their route, so the key uniqueness invariant holds by
/// construction.
pub struct InMemoryTariffRepository {
    rows: DashMap<RouteKey, TariffRow>,
}

impl InMemoryTariffRepository {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
        }
    }

    /// Build a repository from rows, rejecting invalid or duplicate routes.
    pub fn from_rows(rows: impl IntoIterator<Item = TariffRow>) -> DomainResult<Self> {
        let repo = Self::new();
        for row in rows {
            if repo.rows.contains_key(&row.route) {
                return Err(DomainError::Validation(format!(
                    "duplicate tariff route {}",
                    row.route
                )));
            }
            repo.insert(row)?;
        }
        Ok(repo)
    }

    /// Insert or replace the row for its route. Returns the replaced row.
    pub fn insert(&self, row: TariffRow) -> DomainResult<Option<TariffRow>> {
        row.validate()?;
        debug!("Tariff row stored for {}", row.route);
        Ok(self.rows.insert(row.route.clone(), row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for InMemoryTariffRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TariffRepository for InMemoryTariffRepository {
    async fn find_by_route(&self, route: &RouteKey) -> DomainResult<Option<TariffRow>> {
        Ok(self.rows.get(route).map(|r| r.value().clone()))
    }

    async fn list_regions(&self) -> DomainResult<Vec<String>> {
        let regions: BTreeSet<String> = self
            .rows
            .iter()
            .flat_map(|e| {
                let key = e.key();
                [key.origin_region.clone(), key.destination_region.clone()]
            })
            .collect();
        Ok(regions.into_iter().collect())
    }

    async fn list_classifications(&self, region: &str) -> DomainResult<Vec<String>> {
        let mut labels = BTreeSet::new();
        for entry in self.rows.iter() {
            let key = entry.key();
            if key.origin_region == region {
                labels.insert(key.origin_classification.clone());
            }
            if key.destination_region == region {
                labels.insert(key.destination_classification.clone());
            }
        }
        Ok(labels.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tariff::fixtures::sample_row;

    fn row(origin: (&str, &str), destination: (&str, &str)) -> TariffRow {
        TariffRow {
            route: RouteKey::new(origin.0, origin.1, destination.0, destination.1),
            ..sample_row()
        }
    }

    #[tokio::test]
    async fn lookup_is_exact_match() {
        let repo = InMemoryTariffRepository::new();
        repo.insert(sample_row()).unwrap();

        let hit = repo.find_by_route(&sample_row().route).await.unwrap();
        assert_eq!(hit, Some(sample_row()));

        let lower = RouteKey::new("mg", "METROPOLITANA", "SP", "CAPITAL");
        assert!(repo.find_by_route(&lower).await.unwrap().is_none());

        let reversed = RouteKey::new("SP", "CAPITAL", "MG", "METROPOLITANA");
        assert!(repo.find_by_route(&reversed).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_is_sorted_and_deduplicated() {
        let repo = InMemoryTariffRepository::from_rows([
            row(("ES", "CAPITAL"), ("ES", "CAPITAL")),
            row(("ES", "CAPITAL"), ("MG", "CAPITAL")),
            row(("ES", "INTERIOR"), ("SP", "CAPITAL")),
            row(("MG", "METROPOLITANA"), ("SP", "CAPITAL")),
        ])
        .unwrap();

        assert_eq!(repo.list_regions().await.unwrap(), vec!["ES", "MG", "SP"]);
        assert_eq!(
            repo.list_classifications("ES").await.unwrap(),
            vec!["CAPITAL", "INTERIOR"]
        );
        assert_eq!(
            repo.list_classifications("MG").await.unwrap(),
            vec!["CAPITAL", "METROPOLITANA"]
        );
        assert!(repo.list_classifications("XX").await.unwrap().is_empty());
    }

    #[test]
    fn duplicate_routes_are_rejected() {
        let err = InMemoryTariffRepository::from_rows([sample_row(), sample_row()])
            .err()
            .unwrap();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn insert_replaces_existing_route() {
        let repo = InMemoryTariffRepository::new();
        assert!(repo.insert(sample_row()).unwrap().is_none());
        let mut cheaper = sample_row();
        cheaper.dispatch_fee = 1000;
        let replaced = repo.insert(cheaper).unwrap();
        assert_eq!(replaced, Some(sample_row()));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn invalid_rows_are_rejected() {
        let mut bad = sample_row();
        bad.dispatch_fee = -5;
        let repo = InMemoryTariffRepository::new();
        assert!(repo.insert(bad).is_err());
        assert!(repo.is_empty());
    }
}
