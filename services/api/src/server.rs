use crate::cli::ServeArgs;
use crate::infra::{AppState, ReportDefaults};
use crate::routes::lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_pulse::config::AppConfig;
use lead_pulse::error::AppError;
use lead_pulse::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = lead_routes()
        .layer(Extension(ReportDefaults::from(&config.reporting)))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        forecast_periods = config.reporting.forecast_periods,
        max_forecast_periods = config.reporting.max_forecast_periods,
        "lead reporting service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
