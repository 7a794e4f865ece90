use super::duplicates::{find_duplicates, DuplicateKeys};
use super::views::{CategoryCount, LeadQualityReport};
use crate::leads::LeadRecord;
use std::collections::HashMap;

pub fn lead_quality(records: &[LeadRecord]) -> LeadQualityReport {
    LeadQualityReport {
        total_leads: records.len(),
        duplicate_leads: find_duplicates(records, DuplicateKeys::NameZip).len(),
        source_distribution: value_counts(records.iter().map(|r| r.source.as_deref())),
        state_distribution: value_counts(records.iter().map(|r| r.state.as_deref())),
    }
}

/// Counts occurrences of each present label, most frequent first.
pub(crate) fn value_counts<'a>(labels: impl Iterator<Item = Option<&'a str>>) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels.flatten() {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut entries: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}
