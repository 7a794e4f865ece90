mod domain;
mod normalizer;
mod parser;

pub use domain::LeadRecord;
pub use normalizer::{coerce_date, coerce_number, parse_conversion_flag};

use crate::allocation::{allocate_budget, AllocationError, BudgetAllocation};
use crate::forecast::{CostForecastPoint, CostForecaster, ForecastError, MonthlyCostHistory};
use crate::reporting::{
    self, ConversionAnalysis, CostAnalysis, DuplicateKeys, LeadQualityReport, PerformanceSummary,
};
use parser::ParseOutcome;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LeadImportError {
    #[error("failed to read lead sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lead CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("lead sheet is missing the required '{0}' column")]
    MissingColumn(&'static str),
}

/// Loads lead sheets exported as CSV.
pub struct LeadImporter;

impl LeadImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LeadDataset, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<LeadDataset, LeadImportError> {
        match parser::parse_records(reader)? {
            ParseOutcome::Records(records) => {
                debug!(rows = records.len(), "lead sheet imported");
                Ok(LeadDataset::new(records))
            }
            ParseOutcome::MissingColumn(column) => Err(LeadImportError::MissingColumn(column)),
        }
    }
}

/// The in-memory lead table. Every report is recomputed from it on demand.
#[derive(Debug, Clone, Default)]
pub struct LeadDataset {
    records: Vec<LeadRecord>,
}

impl LeadDataset {
    pub fn new(records: Vec<LeadRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LeadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn performance(&self) -> PerformanceSummary {
        reporting::performance_summary(&self.records)
    }

    pub fn quality(&self) -> LeadQualityReport {
        reporting::lead_quality(&self.records)
    }

    pub fn conversion(&self) -> ConversionAnalysis {
        reporting::conversion_analysis(&self.records)
    }

    pub fn cost(&self) -> CostAnalysis {
        reporting::cost_analysis(&self.records)
    }

    pub fn duplicates(&self, keys: DuplicateKeys) -> Vec<LeadRecord> {
        reporting::find_duplicates(&self.records, keys)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn allocate(&self, total_budget: f64) -> Result<BudgetAllocation, AllocationError> {
        allocate_budget(&self.records, total_budget)
    }

    pub fn monthly_costs(&self) -> MonthlyCostHistory {
        MonthlyCostHistory::from_records(&self.records)
    }

    pub fn forecast_costs<F: CostForecaster + ?Sized>(
        &self,
        forecaster: &F,
        periods: usize,
    ) -> Result<Vec<CostForecastPoint>, ForecastError> {
        forecaster.forecast(&self.monthly_costs(), periods)
    }
}
