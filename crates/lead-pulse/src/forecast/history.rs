use crate::leads::LeadRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyCost {
    /// First day of the calendar month.
    pub month: NaiveDate,
    pub cost: f64,
}

/// Total lead cost per calendar month, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyCostHistory {
    points: Vec<MonthlyCost>,
}

impl MonthlyCostHistory {
    pub fn new(mut points: Vec<MonthlyCost>) -> Self {
        points.sort_by_key(|point| point.month);
        Self { points }
    }

    /// Rolls lead costs up by the sheet's `Year`/`Month` columns. Rows without
    /// a year, a valid month, or a cost are skipped.
    pub fn from_records(records: &[LeadRecord]) -> Self {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            let (Some(year), Some(month), Some(cost)) = (record.year, record.month, record.cost)
            else {
                continue;
            };
            let Some(month_start) = NaiveDate::from_ymd_opt(year, month, 1) else {
                continue;
            };

            *totals.entry(month_start).or_insert(0.0) += cost;
        }

        Self {
            points: totals
                .into_iter()
                .map(|(month, cost)| MonthlyCost { month, cost })
                .collect(),
        }
    }

    pub fn points(&self) -> &[MonthlyCost] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_month(&self) -> Option<NaiveDate> {
        self.points.last().map(|point| point.month)
    }
}

/// Whole calendar months from `from` to `to`.
pub(crate) fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32
}
