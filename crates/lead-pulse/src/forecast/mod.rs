mod history;
mod linear;

pub use history::{MonthlyCost, MonthlyCostHistory};
pub use linear::{LinearTrendForecaster, DEFAULT_INTERVAL_Z};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Months forecast when the caller does not ask for a specific horizon.
pub const DEFAULT_FORECAST_PERIODS: usize = 3;

/// Longest horizon a forecaster will produce unless configured otherwise.
pub const MAX_FORECAST_PERIODS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("cost forecast needs at least {required} months of history, found {available}")]
    InsufficientHistory { required: usize, available: usize },
    #[error("forecast horizon of {periods} months is out of range (at most {max})")]
    HorizonOutOfRange { periods: usize, max: usize },
}

/// A predicted monthly cost with its uncertainty band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostForecastPoint {
    pub month: NaiveDate,
    pub predicted: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Produces monthly cost predictions for the months following the history.
pub trait CostForecaster {
    fn forecast(
        &self,
        history: &MonthlyCostHistory,
        periods: usize,
    ) -> Result<Vec<CostForecastPoint>, ForecastError>;
}
