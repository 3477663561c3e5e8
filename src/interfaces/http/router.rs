//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, routing::post, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::PricingEngine;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::freight::{self, FreightState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        freight::quote,
        freight::list_regions,
        freight::list_classifications,
    ),
    components(
        schemas(
            ApiResponse<freight::QuoteResponse>,
            ApiResponse<Vec<String>>,
            freight::QuoteRequest,
            freight::QuoteResponse,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Freight", description = "Freight quotes and tariff route lookups"),
    ),
    info(
        title = "Freight Pricing API",
        version = "1.0.0",
        description = "Itemized freight quotes from a route tariff table"
    )
)]
pub struct ApiDoc;

/// Build the HTTP router.
///
/// `db` feeds the health probe; pass `None` when tariffs come from memory.
/// `/metrics` is mounted only when a Prometheus handle is supplied.
pub fn create_api_router(
    engine: Arc<PricingEngine>,
    db: Option<DatabaseConnection>,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    let freight_routes = Router::new()
        .route("/quote", post(freight::quote))
        .route("/regions", get(freight::list_regions))
        .route(
            "/regions/{region}/classifications",
            get(freight::list_classifications),
        )
        .with_state(FreightState { engine });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .nest("/api/v1/freight", freight_routes);

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
