//! Pricing engine: resolves the tariff row for a route and prices the request

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use tracing::{debug, info, warn};

use crate::domain::pricing::{self, PricingBreakdown, PricingPolicy, PricingRequest};
use crate::domain::{DomainError, DomainResult, TariffRepository};

/// Service computing freight quotes.
///
/// Holds no mutable state; one instance is shared by every request.
pub struct PricingEngine {
    tariffs: Arc<dyn TariffRepository>,
    policy: PricingPolicy,
}

impl PricingEngine {
    pub fn new(tariffs: Arc<dyn TariffRepository>, policy: PricingPolicy) -> Self {
        Self { tariffs, policy }
    }

    /// Compute a quote.
    ///
    /// Fails with [`DomainError::RouteNotFound`] when no tariff row matches
    /// the route, and with [`DomainError::Validation`] when an amount
    /// overflows. The request is assumed to be validated upstream.
    pub async fn compute(&self, request: &PricingRequest) -> DomainResult<PricingBreakdown> {
        let row = match self.tariffs.find_by_route(&request.route).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                warn!("No tariff row for route {}", request.route);
                metrics::counter!("freight_quotes_total", "outcome" => "route_not_found")
                    .increment(1);
                return Err(DomainError::RouteNotFound);
            }
            Err(e) => {
                metrics::counter!("freight_quotes_total", "outcome" => "error").increment(1);
                return Err(e);
            }
        };

        debug!(
            route = %row.route,
            tier = ?pricing::WeightTier::for_weight(request.weight_kg),
            "Tariff row resolved"
        );

        let breakdown = match pricing::price(&row, request, &self.policy) {
            Ok(breakdown) => breakdown,
            Err(e) => {
                warn!(
                    route = %request.route,
                    weight_kg = %request.weight_kg,
                    "Quote rejected: {}",
                    e
                );
                metrics::counter!("freight_quotes_total", "outcome" => "rejected").increment(1);
                return Err(e);
            }
        };

        metrics::counter!("freight_quotes_total", "outcome" => "priced").increment(1);
        if let Some(total) = breakdown.total.to_f64() {
            metrics::histogram!("freight_quote_total_amount").record(total);
        }

        info!(
            route = %request.route,
            weight_kg = %request.weight_kg,
            hazardous = request.hazardous,
            difficult_delivery = request.difficult_delivery,
            total = %breakdown.format_total(),
            "Freight quote computed"
        );

        Ok(breakdown)
    }

    /// Region codes for selection inputs.
    pub async fn regions(&self) -> DomainResult<Vec<String>> {
        self.tariffs.list_regions().await
    }

    /// Classification labels for a region; empty when the region is unknown.
    pub async fn classifications(&self, region: &str) -> DomainResult<Vec<String>> {
        self.tariffs.list_classifications(region).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tariff::fixtures::sample_row;
    use crate::domain::RouteKey;
    use crate::infrastructure::storage::InMemoryTariffRepository;
    use rust_decimal::Decimal;

    fn engine() -> PricingEngine {
        let repo = InMemoryTariffRepository::new();
        repo.insert(sample_row()).unwrap();
        PricingEngine::new(Arc::new(repo), PricingPolicy::default())
    }

    #[tokio::test]
    async fn compute_prices_known_route() {
        let req = PricingRequest::new(sample_row().route, Decimal::from(100), Decimal::from(1000));
        let bd = engine().compute(&req).await.unwrap();
        assert_eq!(bd.weight_charge, Decimal::new(11250, 2));
        assert_eq!(bd.toll, Decimal::new(219, 2));
    }

    #[tokio::test]
    async fn compute_fails_for_unknown_route() {
        let req = PricingRequest::new(
            RouteKey::new("XX", "INEXISTENTE", "YY", "INEXISTENTE"),
            Decimal::TEN,
            Decimal::from(1000),
        );
        let err = engine().compute(&req).await.unwrap_err();
        assert!(matches!(err, DomainError::RouteNotFound));
    }

    #[tokio::test]
    async fn compute_rejects_overflowing_weight() {
        let weight = Decimal::from_str_exact("10000000000000000000000000000").unwrap();
        let req = PricingRequest::new(sample_row().route, weight, Decimal::from(1000));
        let err = engine().compute(&req).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn regions_pass_through() {
        let engine = engine();
        assert_eq!(engine.regions().await.unwrap(), vec!["MG", "SP"]);
        assert_eq!(engine.classifications("SP").await.unwrap(), vec!["CAPITAL"]);
        assert!(engine.classifications("XX").await.unwrap().is_empty());
    }
}
