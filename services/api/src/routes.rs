use crate::infra::{dataset_from_csv, AppState, ReportDefaults};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use lead_pulse::allocation::BudgetAllocation;
use lead_pulse::error::AppError;
use lead_pulse::forecast::{CostForecastPoint, MonthlyCost};
use lead_pulse::leads::LeadRecord;
use lead_pulse::reporting::{
    ConversionAnalysis, CostAnalysis, DuplicateKeys, LeadQualityReport, PerformanceSummary,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct LeadSheetRequest {
    pub(crate) leads_csv: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DuplicatesRequest {
    pub(crate) leads_csv: String,
    #[serde(default)]
    pub(crate) keys: Option<DuplicateKeys>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AllocationRequest {
    pub(crate) leads_csv: String,
    pub(crate) total_budget: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastRequest {
    pub(crate) leads_csv: String,
    #[serde(default)]
    pub(crate) periods: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OverviewResponse {
    pub(crate) count: usize,
    pub(crate) leads: Vec<LeadRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DuplicatesResponse {
    pub(crate) keys: DuplicateKeys,
    pub(crate) count: usize,
    pub(crate) leads: Vec<LeadRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForecastResponse {
    pub(crate) periods: usize,
    pub(crate) history: Vec<MonthlyCost>,
    pub(crate) forecast: Vec<CostForecastPoint>,
}

pub(crate) fn lead_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/leads/overview", post(overview_endpoint))
        .route("/api/v1/leads/performance", post(performance_endpoint))
        .route("/api/v1/leads/quality", post(quality_endpoint))
        .route("/api/v1/leads/conversion", post(conversion_endpoint))
        .route("/api/v1/leads/cost", post(cost_endpoint))
        .route("/api/v1/leads/duplicates", post(duplicates_endpoint))
        .route("/api/v1/leads/allocation", post(allocation_endpoint))
        .route("/api/v1/leads/forecast", post(forecast_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn overview_endpoint(
    Json(payload): Json<LeadSheetRequest>,
) -> Result<Json<OverviewResponse>, AppError> {
    let leads = dataset_from_csv(payload.leads_csv)?.records().to_vec();
    Ok(Json(OverviewResponse {
        count: leads.len(),
        leads,
    }))
}

pub(crate) async fn performance_endpoint(
    Json(payload): Json<LeadSheetRequest>,
) -> Result<Json<PerformanceSummary>, AppError> {
    let dataset = dataset_from_csv(payload.leads_csv)?;
    Ok(Json(dataset.performance()))
}

pub(crate) async fn quality_endpoint(
    Json(payload): Json<LeadSheetRequest>,
) -> Result<Json<LeadQualityReport>, AppError> {
    let dataset = dataset_from_csv(payload.leads_csv)?;
    Ok(Json(dataset.quality()))
}

pub(crate) async fn conversion_endpoint(
    Json(payload): Json<LeadSheetRequest>,
) -> Result<Json<ConversionAnalysis>, AppError> {
    let dataset = dataset_from_csv(payload.leads_csv)?;
    Ok(Json(dataset.conversion()))
}

pub(crate) async fn cost_endpoint(
    Json(payload): Json<LeadSheetRequest>,
) -> Result<Json<CostAnalysis>, AppError> {
    let dataset = dataset_from_csv(payload.leads_csv)?;
    Ok(Json(dataset.cost()))
}

pub(crate) async fn duplicates_endpoint(
    Json(payload): Json<DuplicatesRequest>,
) -> Result<Json<DuplicatesResponse>, AppError> {
    let DuplicatesRequest { leads_csv, keys } = payload;
    let keys = keys.unwrap_or(DuplicateKeys::StateZipName);
    let leads = dataset_from_csv(leads_csv)?.duplicates(keys);

    Ok(Json(DuplicatesResponse {
        keys,
        count: leads.len(),
        leads,
    }))
}

pub(crate) async fn allocation_endpoint(
    Json(payload): Json<AllocationRequest>,
) -> Result<Json<BudgetAllocation>, AppError> {
    let AllocationRequest {
        leads_csv,
        total_budget,
    } = payload;

    let dataset = dataset_from_csv(leads_csv)?;
    let allocation = dataset.allocate(total_budget)?;
    debug!(
        rows = dataset.len(),
        status = ?allocation.status,
        "allocation request served"
    );

    Ok(Json(allocation))
}

pub(crate) async fn forecast_endpoint(
    Extension(defaults): Extension<ReportDefaults>,
    Json(payload): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, AppError> {
    let ForecastRequest { leads_csv, periods } = payload;
    let periods = periods.unwrap_or(defaults.forecast_periods);

    let dataset = dataset_from_csv(leads_csv)?;
    let forecast = dataset.forecast_costs(&defaults.forecaster(), periods)?;

    Ok(Json(ForecastResponse {
        periods,
        history: dataset.monthly_costs().points().to_vec(),
        forecast,
    }))
}
