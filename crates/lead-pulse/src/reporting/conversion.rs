use super::views::{ConversionAnalysis, PullThroughEntry};
use super::{percentage, round2, SheetTotals};
use crate::leads::LeadRecord;
use std::collections::BTreeMap;

pub fn conversion_analysis(records: &[LeadRecord]) -> ConversionAnalysis {
    let totals = SheetTotals::from_records(records);
    let total_leads = totals.leads as f64;

    // Closed-won deals only count when the appointment column was filled in.
    let closed_won = records
        .iter()
        .filter(|record| record.is_closed_won() && record.appointments_completed.is_some())
        .count();

    ConversionAnalysis {
        total_leads: totals.leads,
        converted: totals.converted,
        appointments_completed: totals.appointments_completed,
        closed_won,
        conversion_rate: percentage(totals.converted, total_leads),
        avg_days_to_convert: average_days_to_convert(records),
        lead_to_set: percentage(totals.converted, total_leads),
        set_to_sit: percentage(totals.appointments_completed, totals.converted),
        sit_to_close: percentage(closed_won as f64, totals.appointments_completed),
        net_pull_through: percentage(closed_won as f64, total_leads),
        by_state: pull_through_by(records, |record| record.state.as_deref()),
        by_source: pull_through_by(records, |record| record.source.as_deref()),
    }
}

fn average_days_to_convert(records: &[LeadRecord]) -> Option<f64> {
    let days: Vec<i64> = records
        .iter()
        .filter(|record| record.converted_count == Some(1.0))
        .filter_map(LeadRecord::days_to_convert)
        .collect();

    if days.is_empty() {
        return None;
    }

    let total: i64 = days.iter().sum();
    Some(round2(total as f64 / days.len() as f64))
}

fn pull_through_by<F>(records: &[LeadRecord], key: F) -> Vec<PullThroughEntry>
where
    F: Fn(&LeadRecord) -> Option<&str>,
{
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in records {
        let Some(label) = key(record) else {
            continue;
        };

        let (leads, closed_won) = groups.entry(label).or_default();
        if record.lead_id.is_some() {
            *leads += 1;
        }
        if record.is_closed_won() {
            *closed_won += 1;
        }
    }

    groups
        .into_iter()
        .map(|(label, (leads, closed_won))| PullThroughEntry {
            label: label.to_string(),
            total_leads: leads,
            closed_won,
            net_pull_through: percentage(closed_won as f64, leads as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, day)
    }

    fn lead(id: &str, source: &str, state: &str) -> LeadRecord {
        LeadRecord {
            lead_id: Some(id.to_string()),
            state: Some(state.to_string()),
            converted_count: Some(0.0),
            ..LeadRecord::new(source)
        }
    }

    fn sample() -> Vec<LeadRecord> {
        vec![
            LeadRecord {
                converted_count: Some(1.0),
                appointments_completed: Some(1.0),
                stage: Some("Closed-Won".to_string()),
                created_date: date(1),
                approval_date: date(5),
                ..lead("1", "Google", "TX")
            },
            LeadRecord {
                converted_count: Some(1.0),
                appointments_completed: Some(1.0),
                stage: Some("Sit".to_string()),
                created_date: date(2),
                approval_date: date(4),
                ..lead("2", "Google", "CA")
            },
            LeadRecord {
                converted_count: Some(1.0),
                appointments_completed: Some(0.0),
                created_date: date(3),
                ..lead("3", "Referral", "TX")
            },
            LeadRecord {
                stage: Some("closed-won".to_string()),
                ..lead("4", "Referral", "TX")
            },
        ]
    }

    #[test]
    fn funnel_percentages_follow_each_stage() {
        let analysis = conversion_analysis(&sample());

        assert_eq!(analysis.total_leads, 4);
        assert_eq!(analysis.converted, 3.0);
        assert_eq!(analysis.appointments_completed, 2.0);
        assert_eq!(analysis.closed_won, 1);
        assert_eq!(analysis.conversion_rate, 75.0);
        assert_eq!(analysis.lead_to_set, 75.0);
        assert_eq!(analysis.set_to_sit, 66.67);
        assert_eq!(analysis.sit_to_close, 50.0);
        assert_eq!(analysis.net_pull_through, 25.0);
        assert_eq!(analysis.avg_days_to_convert, Some(3.0));
    }

    #[test]
    fn pull_through_groups_count_stage_matches_only() {
        let analysis = conversion_analysis(&sample());

        let texas = analysis
            .by_state
            .iter()
            .find(|entry| entry.label == "TX")
            .expect("texas entry");
        assert_eq!(texas.total_leads, 3);
        assert_eq!(texas.closed_won, 2);
        assert_eq!(texas.net_pull_through, 66.67);

        let labels: Vec<_> = analysis.by_source.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Google", "Referral"]);
    }

    #[test]
    fn empty_sheet_has_zero_rates_and_no_average() {
        let analysis = conversion_analysis(&[]);
        assert_eq!(analysis.conversion_rate, 0.0);
        assert_eq!(analysis.sit_to_close, 0.0);
        assert!(analysis.avg_days_to_convert.is_none());
        assert!(analysis.by_state.is_empty());
    }
}
