use super::views::{CostAnalysis, StateCost};
use super::{round2, SheetTotals};
use crate::leads::LeadRecord;
use std::collections::BTreeMap;

pub fn cost_analysis(records: &[LeadRecord]) -> CostAnalysis {
    let totals = SheetTotals::from_records(records);

    let mut by_state: BTreeMap<&str, f64> = BTreeMap::new();
    for record in records {
        if let Some(state) = record.state.as_deref() {
            *by_state.entry(state).or_insert(0.0) += record.cost.unwrap_or(0.0);
        }
    }

    CostAnalysis {
        total_cost: totals.cost,
        cost_per_lead: totals.cost_per_lead(),
        cost_per_acquisition: totals.cost_per_acquisition(),
        cost_by_state: by_state
            .into_iter()
            .map(|(state, cost)| StateCost {
                state: state.to_string(),
                cost: round2(cost),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_rolls_up_by_state() {
        let records = vec![
            LeadRecord {
                state: Some("TX".into()),
                ..LeadRecord::new("Google").with_cost(40.0)
            },
            LeadRecord {
                state: Some("TX".into()),
                ..LeadRecord::new("Referral").with_conversions(true, 1.0)
            },
            LeadRecord {
                state: Some("AZ".into()),
                ..LeadRecord::new("Google").with_cost(20.0)
            },
        ];

        let analysis = cost_analysis(&records);
        assert_eq!(analysis.total_cost, 60.0);
        assert_eq!(analysis.cost_per_lead, 20.0);
        assert_eq!(analysis.cost_per_acquisition, 60.0);
        assert_eq!(
            analysis.cost_by_state,
            vec![
                StateCost { state: "AZ".into(), cost: 20.0 },
                StateCost { state: "TX".into(), cost: 40.0 },
            ]
        );
    }
}
