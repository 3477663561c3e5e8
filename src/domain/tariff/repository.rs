//! Tariff repository interface

use async_trait::async_trait;

use super::model::{RouteKey, TariffRow};
use crate::domain::DomainResult;

/// Read access to the tariff table.
///
/// The route key is unique, so a lookup yields at most one row. Listing
/// methods return sorted, de-duplicated values.
#[async_trait]
pub trait TariffRepository: Send + Sync {
    async fn find_by_route(&self, route: &RouteKey) -> DomainResult<Option<TariffRow>>;

    /// Region codes appearing as origin or destination of any row.
    async fn list_regions(&self) -> DomainResult<Vec<String>>;

    /// Classification labels used with `region` on either end of a route.
    /// Unknown regions yield an empty list.
    async fn list_classifications(&self, region: &str) -> DomainResult<Vec<String>>;
}
