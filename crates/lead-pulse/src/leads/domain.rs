use chrono::NaiveDate;
use serde::Serialize;

/// One row of the lead sheet after coercion. Numeric and date cells that could
/// not be parsed are `None` and contribute nothing to sums or means.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeadRecord {
    pub lead_id: Option<String>,
    pub first_name: Option<String>,
    pub source: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub cost: Option<f64>,
    pub converted: bool,
    pub converted_count: Option<f64>,
    pub appointments_completed: Option<f64>,
    pub outbound_calls: Option<f64>,
    pub stage: Option<String>,
    pub created_date: Option<NaiveDate>,
    pub approval_date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl LeadRecord {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_conversions(mut self, converted: bool, converted_count: f64) -> Self {
        self.converted = converted;
        self.converted_count = Some(converted_count);
        self
    }

    pub fn is_closed_won(&self) -> bool {
        self.stage
            .as_deref()
            .map(|stage| stage.trim().eq_ignore_ascii_case("closed-won"))
            .unwrap_or(false)
    }

    /// Whole days between creation and approval, when both dates are known.
    pub fn days_to_convert(&self) -> Option<i64> {
        match (self.created_date, self.approval_date) {
            (Some(created), Some(approved)) => Some((approved - created).num_days()),
            _ => None,
        }
    }
}
