//! Freight quote REST API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use super::dto::{QuoteRequest, QuoteResponse};
use crate::application::PricingEngine;
use crate::domain::{DomainError, PricingRequest};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::support::errors::ROUTE_NOT_FOUND_MESSAGE;

/// State shared by the freight routes
#[derive(Clone)]
pub struct FreightState {
    pub engine: Arc<PricingEngine>,
}

type ApiError = (StatusCode, Json<ApiResponse<()>>);

fn error_response(e: DomainError) -> ApiError {
    match e {
        DomainError::RouteNotFound => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(ROUTE_NOT_FOUND_MESSAGE)),
        ),
        DomainError::Validation(msg) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::error(msg)))
        }
        DomainError::Storage(msg) => {
            error!("Tariff storage failure: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Tariff storage unavailable")),
            )
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/freight/quote",
    tag = "Freight",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Itemized quote", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 404, description = "No tariff row for the route"),
        (status = 422, description = "Invalid request fields")
    )
)]
pub async fn quote(
    State(state): State<FreightState>,
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, ApiError> {
    let request = PricingRequest::from(req);
    request.validate().map_err(error_response)?;

    let breakdown = state
        .engine
        .compute(&request)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(breakdown.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/freight/regions",
    tag = "Freight",
    responses(
        (status = 200, description = "Region codes present in the tariff table", body = ApiResponse<Vec<String>>)
    )
)]
pub async fn list_regions(
    State(state): State<FreightState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let regions = state.engine.regions().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(regions)))
}

#[utoipa::path(
    get,
    path = "/api/v1/freight/regions/{region}/classifications",
    tag = "Freight",
    params(("region" = String, Path, description = "Two-letter region code")),
    responses(
        (status = 200, description = "Classification labels; empty for an unknown region", body = ApiResponse<Vec<String>>)
    )
)]
pub async fn list_classifications(
    State(state): State<FreightState>,
    Path(region): Path<String>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let labels = state
        .engine
        .classifications(&region)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(labels)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_not_found_maps_to_fixed_404() {
        let (status, Json(body)) = error_response(DomainError::RouteNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.as_deref(), Some("freight route not found"));
    }

    #[test]
    fn storage_error_hides_details() {
        let (status, Json(body)) = error_response(DomainError::Storage("disk on fire".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.error.unwrap_or_default().contains("disk"));
    }

    #[test]
    fn validation_maps_to_422() {
        let (status, _) = error_response(DomainError::Validation("bad region".into()));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
