use super::history::{months_between, MonthlyCostHistory};
use super::{CostForecastPoint, CostForecaster, ForecastError, MAX_FORECAST_PERIODS};
use chrono::Months;

/// z-score of an 80% two-sided interval.
pub const DEFAULT_INTERVAL_Z: f64 = 1.2816;

/// Least-squares trend over the month index, with an interval sized from the
/// residual spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrendForecaster {
    pub interval_z: f64,
    pub max_periods: usize,
}

impl LinearTrendForecaster {
    pub fn with_max_periods(max_periods: usize) -> Self {
        Self {
            max_periods,
            ..Self::default()
        }
    }
}

impl Default for LinearTrendForecaster {
    fn default() -> Self {
        Self {
            interval_z: DEFAULT_INTERVAL_Z,
            max_periods: MAX_FORECAST_PERIODS,
        }
    }
}

impl CostForecaster for LinearTrendForecaster {
    fn forecast(
        &self,
        history: &MonthlyCostHistory,
        periods: usize,
    ) -> Result<Vec<CostForecastPoint>, ForecastError> {
        let out_of_range = ForecastError::HorizonOutOfRange {
            periods,
            max: self.max_periods,
        };
        if periods > self.max_periods {
            return Err(out_of_range);
        }

        let points = history.points();
        if points.len() < 2 {
            return Err(ForecastError::InsufficientHistory {
                required: 2,
                available: points.len(),
            });
        }

        let origin = points[0].month;
        let last = points[points.len() - 1].month;
        let xs: Vec<f64> = points
            .iter()
            .map(|point| months_between(origin, point.month) as f64)
            .collect();
        let ys: Vec<f64> = points.iter().map(|point| point.cost).collect();

        let n = points.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;
        let (sxx, sxy) = xs
            .iter()
            .zip(&ys)
            .fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
                (sxx + (x - x_mean).powi(2), sxy + (x - x_mean) * (y - y_mean))
            });

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let residual_sd = if points.len() > 2 {
            let sse: f64 = xs
                .iter()
                .zip(&ys)
                .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
                .sum();
            (sse / (n - 2.0)).sqrt()
        } else {
            0.0
        };
        let half_width = self.interval_z * residual_sd;

        let last_x = months_between(origin, last) as f64;
        (1..=periods)
            .map(|step| -> Result<CostForecastPoint, ForecastError> {
                let month = u32::try_from(step)
                    .ok()
                    .and_then(|step| last.checked_add_months(Months::new(step)))
                    .ok_or_else(|| out_of_range.clone())?;
                let predicted = intercept + slope * (last_x + step as f64);
                Ok(CostForecastPoint {
                    month,
                    predicted,
                    lower: predicted - half_width,
                    upper: predicted + half_width,
                })
            })
            .collect()
    }
}
