use super::views::{PerformanceSummary, SourcePerformance};
use super::{ratio, round2, SheetTotals};
use crate::leads::LeadRecord;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct SourceTally {
    leads: usize,
    converted: f64,
    outbound_calls: f64,
    cost: f64,
}

pub fn performance_summary(records: &[LeadRecord]) -> PerformanceSummary {
    let totals = SheetTotals::from_records(records);

    let mut by_source: BTreeMap<&str, SourceTally> = BTreeMap::new();
    for record in records {
        let Some(source) = record.source.as_deref() else {
            continue;
        };

        let tally = by_source.entry(source).or_default();
        if record.lead_id.is_some() {
            tally.leads += 1;
        }
        tally.converted += record.converted_count.unwrap_or(0.0);
        tally.outbound_calls += record.outbound_calls.unwrap_or(0.0);
        tally.cost += record.cost.unwrap_or(0.0);
    }

    let sources = by_source
        .into_iter()
        .map(|(source, tally)| SourcePerformance {
            source: source.to_string(),
            leads: tally.leads,
            converted: tally.converted,
            outbound_calls: tally.outbound_calls,
            cost: round2(tally.cost),
            cost_per_lead: ratio(tally.cost, tally.leads as f64),
            cost_per_acquisition: (tally.converted > 0.0)
                .then(|| round2(tally.cost / tally.converted)),
        })
        .collect();

    PerformanceSummary {
        total_leads: totals.leads,
        outbound_calls: totals.outbound_calls,
        converted: totals.converted,
        total_cost: totals.cost,
        formatted_cost: format_currency(totals.cost),
        cost_per_lead: totals.cost_per_lead(),
        cost_per_acquisition: totals.cost_per_acquisition(),
        sources,
    }
}

/// Compact currency label used on summary cards: `$1.25M`, `$3.40K`, `$12.00`.
pub fn format_currency(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.2}K", value / 1_000.0)
    } else {
        format!("${value:.2}")
    }
}
