use tracing::warn;

/// Equal split of the budget across `sources` buckets.
pub(crate) fn uniform_share(total_budget: f64, sources: usize) -> f64 {
    if sources == 0 {
        0.0
    } else {
        total_budget / sources as f64
    }
}

/// Normalized inverse-CPA weights. The weights sum to one; a cheaper source
/// gets a larger weight.
///
/// A CPA of zero has an unbounded inverse, so when any source acquired leads
/// for free those sources split the whole weight evenly and the rest get
/// nothing.
pub(crate) fn inverse_cpa_weights(cost_per_acquisition: &[f64]) -> Vec<f64> {
    let free_sources = cost_per_acquisition
        .iter()
        .filter(|cpa| **cpa == 0.0)
        .count();

    if free_sources > 0 {
        warn!(
            free_sources,
            "sources with zero acquisition cost receive the full weighted budget"
        );
        let share = 1.0 / free_sources as f64;
        return cost_per_acquisition
            .iter()
            .map(|cpa| if *cpa == 0.0 { share } else { 0.0 })
            .collect();
    }

    let inverse: Vec<f64> = cost_per_acquisition.iter().map(|cpa| 1.0 / cpa).collect();
    let total: f64 = inverse.iter().sum();
    inverse.into_iter().map(|weight| weight / total).collect()
}

/// Conversions a budget share is expected to buy at the given CPA. Undefined
/// for a zero CPA, reported as zero.
pub(crate) fn predicted_conversions(share: f64, cost_per_acquisition: f64) -> f64 {
    if cost_per_acquisition == 0.0 {
        0.0
    } else {
        share / cost_per_acquisition
    }
}
