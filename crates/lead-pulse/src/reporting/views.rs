use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcePerformance {
    pub source: String,
    pub leads: usize,
    pub converted: f64,
    pub outbound_calls: f64,
    pub cost: f64,
    pub cost_per_lead: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_acquisition: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_leads: usize,
    pub outbound_calls: f64,
    pub converted: f64,
    pub total_cost: f64,
    pub formatted_cost: String,
    pub cost_per_lead: f64,
    pub cost_per_acquisition: f64,
    pub sources: Vec<SourcePerformance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadQualityReport {
    pub total_leads: usize,
    pub duplicate_leads: usize,
    pub source_distribution: Vec<CategoryCount>,
    pub state_distribution: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullThroughEntry {
    pub label: String,
    pub total_leads: usize,
    pub closed_won: usize,
    pub net_pull_through: f64,
}

/// Funnel view of the sheet: lead → set (converted) → sit (appointment
/// completed) → close (stage `closed-won`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionAnalysis {
    pub total_leads: usize,
    pub converted: f64,
    pub appointments_completed: f64,
    pub closed_won: usize,
    pub conversion_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_days_to_convert: Option<f64>,
    pub lead_to_set: f64,
    pub set_to_sit: f64,
    pub sit_to_close: f64,
    pub net_pull_through: f64,
    pub by_state: Vec<PullThroughEntry>,
    pub by_source: Vec<PullThroughEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateCost {
    pub state: String,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostAnalysis {
    pub total_cost: f64,
    pub cost_per_lead: f64,
    pub cost_per_acquisition: f64,
    pub cost_by_state: Vec<StateCost>,
}
