use crate::cli::{AllocateArgs, ForecastArgs, LeadsCommand};
use crate::infra::dataset_from_path;
use lead_pulse::allocation::BudgetAllocation;
use lead_pulse::config::AppConfig;
use lead_pulse::error::AppError;
use lead_pulse::forecast::CostForecastPoint;
use lead_pulse::leads::LeadRecord;
use lead_pulse::reporting::{
    format_currency, ConversionAnalysis, CostAnalysis, DuplicateKeys, LeadQualityReport,
    PerformanceSummary,
};

pub(crate) fn run_leads_command(command: LeadsCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let reporting = &config.reporting;

    let output = match command {
        LeadsCommand::Overview(args) => {
            render_overview(dataset_from_path(args.csv, reporting)?.records())
        }
        LeadsCommand::Performance(args) => {
            render_performance(&dataset_from_path(args.csv, reporting)?.performance())
        }
        LeadsCommand::Quality(args) => {
            render_quality(&dataset_from_path(args.csv, reporting)?.quality())
        }
        LeadsCommand::Conversion(args) => {
            render_conversion(&dataset_from_path(args.csv, reporting)?.conversion())
        }
        LeadsCommand::Cost(args) => render_cost(&dataset_from_path(args.csv, reporting)?.cost()),
        LeadsCommand::Duplicates(args) => render_duplicates(
            &dataset_from_path(args.csv, reporting)?.duplicates(DuplicateKeys::StateZipName),
        ),
        LeadsCommand::Allocate(AllocateArgs { sheet, budget }) => {
            render_allocation(&dataset_from_path(sheet.csv, reporting)?.allocate(budget)?)
        }
        LeadsCommand::Forecast(ForecastArgs { sheet, periods }) => {
            let periods = periods.unwrap_or(reporting.forecast_periods);
            let dataset = dataset_from_path(sheet.csv, reporting)?;
            render_forecast(&dataset.forecast_costs(&reporting.forecaster(), periods)?)
        }
    };

    println!("{output}");
    Ok(())
}

fn render_overview(leads: &[LeadRecord]) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        format!("Lead overview ({} leads)", leads.len()),
        "Lead ID | Name | Source | State Zip | Cost | Converted | Stage".to_string(),
    ];
    for lead in leads {
        let cost = lead
            .cost
            .map(|cost| format!("${cost:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let converted = if lead.converted { "yes" } else { "no" };
        lines.push(format!(
            "{} | {} | {} | {} {} | {} | {} | {}",
            text(&lead.lead_id),
            text(&lead.first_name),
            text(&lead.source),
            text(&lead.state),
            text(&lead.zip_code),
            cost,
            converted,
            text(&lead.stage)
        ));
    }

    lines.join("\n")
}

fn render_performance(summary: &PerformanceSummary) -> String {
    let mut lines = vec![
        "Performance dashboard".to_string(),
        format!(
            "Leads {} | Outbound calls {} | Converted {} | Cost {} | CPA ${:.2} | CPL ${:.2}",
            summary.total_leads,
            summary.outbound_calls,
            summary.converted,
            summary.formatted_cost,
            summary.cost_per_acquisition,
            summary.cost_per_lead
        ),
        String::new(),
        "Breakdown by source".to_string(),
    ];

    for source in &summary.sources {
        lines.push(format!(
            "- {}: {} leads, {} converted, {} calls, cost ${:.2}, CPA ${:.2}, CPL ${:.2}",
            source.source,
            source.leads,
            source.converted,
            source.outbound_calls,
            source.cost,
            source.cost_per_acquisition.unwrap_or(0.0),
            source.cost_per_lead
        ));
    }

    lines.join("\n")
}

fn render_quality(report: &LeadQualityReport) -> String {
    let mut lines = vec![
        "Lead quality".to_string(),
        format!(
            "Total leads {} | Duplicate leads {}",
            report.total_leads, report.duplicate_leads
        ),
        String::new(),
        "Lead source distribution".to_string(),
    ];
    lines.extend(
        report
            .source_distribution
            .iter()
            .map(|entry| format!("- {}: {}", entry.label, entry.count)),
    );

    lines.push(String::new());
    lines.push("Leads by state".to_string());
    lines.extend(
        report
            .state_distribution
            .iter()
            .map(|entry| format!("- {}: {}", entry.label, entry.count)),
    );

    lines.join("\n")
}

fn render_conversion(analysis: &ConversionAnalysis) -> String {
    let avg_days = analysis
        .avg_days_to_convert
        .map(|days| format!("{days:.2}"))
        .unwrap_or_else(|| "n/a".to_string());

    let mut lines = vec![
        "Conversion analysis".to_string(),
        format!(
            "Conversion rate {:.2}% | Avg days to convert {}",
            analysis.conversion_rate, avg_days
        ),
        format!(
            "Lead to set {:.2}% | Set to sit {:.2}% | Sit to close-won {:.2}% | Net pull-through {:.2}%",
            analysis.lead_to_set,
            analysis.set_to_sit,
            analysis.sit_to_close,
            analysis.net_pull_through
        ),
    ];

    for (title, entries) in [
        ("Net pull-through by state", &analysis.by_state),
        ("Net pull-through by source", &analysis.by_source),
    ] {
        lines.push(String::new());
        lines.push(title.to_string());
        for entry in entries {
            lines.push(format!(
                "- {}: {}/{} closed-won ({:.2}%)",
                entry.label, entry.closed_won, entry.total_leads, entry.net_pull_through
            ));
        }
    }

    lines.join("\n")
}

fn render_cost(analysis: &CostAnalysis) -> String {
    let mut lines = vec![
        "Cost breakdown".to_string(),
        format!(
            "Total cost {} | CPL ${:.2} | CPA ${:.2}",
            format_currency(analysis.total_cost),
            analysis.cost_per_lead,
            analysis.cost_per_acquisition
        ),
        String::new(),
        "Cost by state".to_string(),
    ];
    lines.extend(
        analysis
            .cost_by_state
            .iter()
            .map(|entry| format!("- {}: ${:.2}", entry.state, entry.cost)),
    );

    lines.join("\n")
}

fn render_duplicates(leads: &[LeadRecord]) -> String {
    if leads.is_empty() {
        return "Duplicate leads: none".to_string();
    }

    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let mut lines = vec![format!("Duplicate leads ({})", leads.len())];
    for lead in leads {
        lines.push(format!(
            "- {} | {} | {} {} | {}",
            field(&lead.lead_id),
            field(&lead.first_name),
            field(&lead.state),
            field(&lead.zip_code),
            field(&lead.source)
        ));
    }

    lines.join("\n")
}

fn render_allocation(allocation: &BudgetAllocation) -> String {
    if !allocation.has_data() {
        return format!(
            "Budget allocation for {}: no converted leads with conversions to allocate against",
            format_currency(allocation.total_budget)
        );
    }

    let mut lines = vec![format!(
        "Budget allocation for {}",
        format_currency(allocation.total_budget)
    )];
    for source in &allocation.sources {
        if source.unbounded {
            lines.push(format!(
                "- {}: CPA $0.00 | uniform ${:.2} | weighted ${:.2} | conversions unbounded at zero cost",
                source.source, source.uniform_allocation, source.weighted_allocation
            ));
            continue;
        }
        lines.push(format!(
            "- {}: CPA ${:.2} | uniform ${:.2} -> {:.2} conversions | weighted ${:.2} -> {:.2} conversions",
            source.source,
            source.cost_per_acquisition,
            source.uniform_allocation,
            source.uniform_predicted_conversions,
            source.weighted_allocation,
            source.weighted_predicted_conversions
        ));
    }
    lines.push(format!(
        "Predicted conversions: uniform {:.2} | weighted {:.2}",
        allocation.uniform_predicted_total, allocation.weighted_predicted_total
    ));

    lines.join("\n")
}

fn render_forecast(points: &[CostForecastPoint]) -> String {
    let mut lines = vec!["Cost forecast".to_string()];
    for point in points {
        lines.push(format!(
            "- {}: ${:.2} (${:.2} - ${:.2})",
            point.month.format("%Y-%m"),
            point.predicted,
            point.lower,
            point.upper
        ));
    }

    lines.join("\n")
}
