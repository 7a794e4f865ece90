//! Budget allocation across lead sources.
//!
//! Only converted leads feed the model. Each source's cost per acquisition
//! (CPA) drives two candidate plans: a uniform split, and a split weighted by
//! inverse CPA so cheaper-to-convert sources get more money. Both plans report
//! how many conversions the allocated budget is expected to buy.

mod strategy;

use crate::leads::LeadRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("total budget must be a positive amount, got {0}")]
    InvalidBudget(f64),
}

/// Converted-lead totals for a single source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceAggregate {
    pub source: String,
    pub cost: f64,
    pub converted_count: f64,
    pub cost_per_acquisition: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceAllocation {
    pub source: String,
    pub cost: f64,
    pub converted_count: f64,
    pub cost_per_acquisition: f64,
    pub weight: f64,
    pub uniform_allocation: f64,
    pub uniform_predicted_conversions: f64,
    pub weighted_allocation: f64,
    pub weighted_predicted_conversions: f64,
    /// Set when the source converted at zero cost. Its predicted conversions
    /// are reported as 0 because any share would buy an unbounded number.
    pub unbounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    Ok,
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAllocation {
    pub status: AllocationStatus,
    pub total_budget: f64,
    pub sources: Vec<SourceAllocation>,
    pub uniform_predicted_total: f64,
    pub weighted_predicted_total: f64,
}

impl BudgetAllocation {
    /// Sentinel returned when no source has converted leads to learn from.
    pub fn no_data(total_budget: f64) -> Self {
        Self {
            status: AllocationStatus::NoData,
            total_budget,
            sources: Vec::new(),
            uniform_predicted_total: 0.0,
            weighted_predicted_total: 0.0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.status == AllocationStatus::Ok
    }
}

/// Groups converted leads by source and drops sources without conversions
/// or with a negative total cost. Rows are ordered by source label.
pub fn aggregate_converted_sources(records: &[LeadRecord]) -> Vec<SourceAggregate> {
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for record in records.iter().filter(|record| record.converted) {
        let Some(source) = record.source.as_deref() else {
            continue;
        };

        let (cost, converted) = totals.entry(source).or_insert((0.0, 0.0));
        *cost += record.cost.unwrap_or(0.0);
        *converted += record.converted_count.unwrap_or(0.0);
    }

    totals
        .into_iter()
        .filter(|(_, (_, converted))| *converted > 0.0)
        .filter(|(source, (cost, _))| {
            if *cost < 0.0 {
                warn!(source, cost, "negative source cost; left out of allocation");
            }
            *cost >= 0.0
        })
        .map(|(source, (cost, converted))| SourceAggregate {
            source: source.to_string(),
            cost,
            converted_count: converted,
            cost_per_acquisition: cost / converted,
        })
        .collect()
}

/// Splits `total_budget` across converted lead sources using the uniform and
/// inverse-CPA strategies.
///
/// Returns [`BudgetAllocation::no_data`] when there are no converted leads or
/// every source has a zero converted count. A budget that is not a positive,
/// finite amount is rejected.
pub fn allocate_budget(
    records: &[LeadRecord],
    total_budget: f64,
) -> Result<BudgetAllocation, AllocationError> {
    if !total_budget.is_finite() || total_budget <= 0.0 {
        return Err(AllocationError::InvalidBudget(total_budget));
    }

    if !records.iter().any(|record| record.converted) {
        info!(rows = records.len(), "no converted leads; allocation has no data");
        return Ok(BudgetAllocation::no_data(total_budget));
    }

    let aggregates = aggregate_converted_sources(records);
    if aggregates.is_empty() {
        info!("converted leads carry no conversions; allocation has no data");
        return Ok(BudgetAllocation::no_data(total_budget));
    }

    let uniform = strategy::uniform_share(total_budget, aggregates.len());
    let cpas: Vec<f64> = aggregates
        .iter()
        .map(|aggregate| aggregate.cost_per_acquisition)
        .collect();
    let weights = strategy::inverse_cpa_weights(&cpas);

    let sources: Vec<SourceAllocation> = aggregates
        .into_iter()
        .zip(weights)
        .map(|(aggregate, weight)| {
            let weighted = weight * total_budget;
            SourceAllocation {
                uniform_allocation: uniform,
                uniform_predicted_conversions: strategy::predicted_conversions(
                    uniform,
                    aggregate.cost_per_acquisition,
                ),
                weighted_allocation: weighted,
                weighted_predicted_conversions: strategy::predicted_conversions(
                    weighted,
                    aggregate.cost_per_acquisition,
                ),
                weight,
                unbounded: aggregate.cost_per_acquisition == 0.0,
                source: aggregate.source,
                cost: aggregate.cost,
                converted_count: aggregate.converted_count,
                cost_per_acquisition: aggregate.cost_per_acquisition,
            }
        })
        .collect();

    let uniform_predicted_total: f64 = sources
        .iter()
        .map(|source| source.uniform_predicted_conversions)
        .sum();
    let weighted_predicted_total: f64 = sources
        .iter()
        .map(|source| source.weighted_predicted_conversions)
        .sum();

    debug!(
        sources = sources.len(),
        total_budget, uniform_predicted_total, weighted_predicted_total, "budget allocated"
    );

    Ok(BudgetAllocation {
        status: AllocationStatus::Ok,
        total_budget,
        sources,
        uniform_predicted_total,
        weighted_predicted_total,
    })
}
