mod conversion;
mod cost;
mod duplicates;
mod performance;
mod quality;
pub mod views;

pub use conversion::conversion_analysis;
pub use cost::cost_analysis;
pub use duplicates::{find_duplicates, DuplicateKeys, LeadKeyField};
pub use performance::{format_currency, performance_summary};
pub use quality::lead_quality;
pub use views::{
    CategoryCount, ConversionAnalysis, CostAnalysis, LeadQualityReport, PerformanceSummary,
    PullThroughEntry, SourcePerformance, StateCost,
};

use crate::leads::LeadRecord;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator` rounded for display, or 0 when the denominator is
/// not positive.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        round2(numerator / denominator)
    } else {
        0.0
    }
}

pub(crate) fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        round2(numerator / denominator * 100.0)
    } else {
        0.0
    }
}

/// Headline totals shared by the performance and cost pages.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SheetTotals {
    pub(crate) leads: usize,
    pub(crate) cost: f64,
    pub(crate) converted: f64,
    pub(crate) outbound_calls: f64,
    pub(crate) appointments_completed: f64,
}

impl SheetTotals {
    pub(crate) fn from_records(records: &[LeadRecord]) -> Self {
        records.iter().fold(
            Self {
                leads: records.len(),
                ..Self::default()
            },
            |mut totals, record| {
                totals.cost += record.cost.unwrap_or(0.0);
                totals.converted += record.converted_count.unwrap_or(0.0);
                totals.outbound_calls += record.outbound_calls.unwrap_or(0.0);
                totals.appointments_completed += record.appointments_completed.unwrap_or(0.0);
                totals
            },
        )
    }

    pub(crate) fn cost_per_lead(&self) -> f64 {
        ratio(self.cost, self.leads as f64)
    }

    pub(crate) fn cost_per_acquisition(&self) -> f64 {
        ratio(self.cost, self.converted)
    }
}
