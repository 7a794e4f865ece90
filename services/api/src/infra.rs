use lead_pulse::config::{ConfigError, ReportingConfig};
use lead_pulse::error::AppError;
use lead_pulse::forecast::LinearTrendForecaster;
use lead_pulse::leads::{LeadDataset, LeadImporter};
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Request-independent report settings shared with every handler.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportDefaults {
    pub(crate) forecast_periods: usize,
    pub(crate) max_forecast_periods: usize,
}

impl ReportDefaults {
    pub(crate) fn forecaster(&self) -> LinearTrendForecaster {
        LinearTrendForecaster::with_max_periods(self.max_forecast_periods)
    }
}

impl From<&ReportingConfig> for ReportDefaults {
    fn from(config: &ReportingConfig) -> Self {
        Self {
            forecast_periods: config.forecast_periods,
            max_forecast_periods: config.max_forecast_periods,
        }
    }
}

pub(crate) fn dataset_from_csv(csv: String) -> Result<LeadDataset, AppError> {
    let reader = Cursor::new(csv.into_bytes());
    Ok(LeadImporter::from_reader(reader)?)
}

/// Resolves the sheet named on the command line, falling back to the
/// configured default.
pub(crate) fn dataset_from_path(
    explicit: Option<PathBuf>,
    config: &ReportingConfig,
) -> Result<LeadDataset, AppError> {
    let path = explicit
        .or_else(|| config.leads_csv.clone())
        .ok_or(ConfigError::MissingLeadSheet)?;
    Ok(LeadImporter::from_path(path)?)
}
