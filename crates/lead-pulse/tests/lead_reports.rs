use chrono::NaiveDate;
use lead_pulse::forecast::{CostForecaster, LinearTrendForecaster};
use lead_pulse::leads::{LeadDataset, LeadImporter};
use lead_pulse::reporting::{CategoryCount, DuplicateKeys, StateCost};

fn sample_dataset() -> LeadDataset {
    let data = include_bytes!("../Leads_Sample.csv");
    LeadImporter::from_reader(&data[..]).expect("sample sheet imports")
}

#[test]
fn import_drops_blank_rows_and_coerces_bad_cost() {
    let dataset = sample_dataset();
    assert_eq!(dataset.len(), 10);

    let gus = dataset
        .records()
        .iter()
        .find(|record| record.lead_id.as_deref() == Some("L008"))
        .expect("L008 present");
    assert!(gus.cost.is_none());

    let converted = dataset
        .records()
        .iter()
        .filter(|record| record.converted)
        .count();
    assert_eq!(converted, 6);
}

#[test]
fn performance_summary_matches_sheet_totals() {
    let summary = sample_dataset().performance();

    assert_eq!(summary.total_leads, 10);
    assert_eq!(summary.outbound_calls, 25.0);
    assert_eq!(summary.converted, 6.0);
    assert_eq!(summary.total_cost, 850.0);
    assert_eq!(summary.formatted_cost, "$850.00");
    assert_eq!(summary.cost_per_lead, 85.0);
    assert_eq!(summary.cost_per_acquisition, 141.67);

    let facebook = summary
        .sources
        .iter()
        .find(|source| source.source == "Facebook")
        .expect("facebook breakdown");
    assert_eq!(facebook.leads, 4);
    assert_eq!(facebook.cost, 340.0);
    assert_eq!(facebook.cost_per_lead, 85.0);
    assert_eq!(facebook.cost_per_acquisition, Some(170.0));
}

#[test]
fn quality_report_counts_name_zip_duplicates() {
    let report = sample_dataset().quality();

    assert_eq!(report.total_leads, 10);
    assert_eq!(report.duplicate_leads, 4);
    assert_eq!(
        report.source_distribution,
        vec![
            CategoryCount {
                label: "Facebook".to_string(),
                count: 4
            },
            CategoryCount {
                label: "Google Ads".to_string(),
                count: 4
            },
            CategoryCount {
                label: "Referral".to_string(),
                count: 2
            },
        ]
    );
    let states: Vec<_> = report
        .state_distribution
        .iter()
        .map(|entry| entry.label.as_str())
        .collect();
    assert_eq!(states, vec!["CA", "TX", "AZ"]);
}

#[test]
fn conversion_funnel_matches_hand_computed_rates() {
    let analysis = sample_dataset().conversion();

    assert_eq!(analysis.conversion_rate, 60.0);
    assert_eq!(analysis.lead_to_set, 60.0);
    assert_eq!(analysis.appointments_completed, 4.0);
    assert_eq!(analysis.set_to_sit, 66.67);
    assert_eq!(analysis.closed_won, 3);
    assert_eq!(analysis.sit_to_close, 75.0);
    assert_eq!(analysis.net_pull_through, 30.0);
    assert_eq!(analysis.avg_days_to_convert, Some(5.83));

    let referral = analysis
        .by_source
        .iter()
        .find(|entry| entry.label == "Referral")
        .expect("referral pull-through");
    assert_eq!(referral.total_leads, 2);
    assert_eq!(referral.closed_won, 1);
    assert_eq!(referral.net_pull_through, 50.0);
}

#[test]
fn cost_analysis_rolls_up_states() {
    let analysis = sample_dataset().cost();

    assert_eq!(analysis.total_cost, 850.0);
    assert_eq!(
        analysis.cost_by_state,
        vec![
            StateCost {
                state: "AZ".to_string(),
                cost: 200.0
            },
            StateCost {
                state: "CA".to_string(),
                cost: 340.0
            },
            StateCost {
                state: "TX".to_string(),
                cost: 310.0
            },
        ]
    );
}

#[test]
fn duplicate_listing_uses_state_zip_and_name() {
    let duplicates = sample_dataset().duplicates(DuplicateKeys::StateZipName);
    let ids: Vec<_> = duplicates
        .iter()
        .filter_map(|record| record.lead_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["L001", "L004", "L005", "L009"]);
}

#[test]
fn forecast_extends_monthly_history() {
    let dataset = sample_dataset();
    let history = dataset.monthly_costs();
    let costs: Vec<_> = history.points().iter().map(|point| point.cost).collect();
    assert_eq!(costs, vec![200.0, 250.0, 310.0, 90.0]);

    let forecast = dataset
        .forecast_costs(&LinearTrendForecaster::default(), 3)
        .expect("four months is enough history");
    let months: Vec<_> = forecast.iter().map(|point| point.month).collect();
    assert_eq!(
        months,
        vec![
            NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid month"),
            NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid month"),
            NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid month"),
        ]
    );
    assert!(forecast
        .iter()
        .all(|point| point.lower <= point.predicted && point.predicted <= point.upper));
}

struct FlatForecaster(f64);

impl CostForecaster for FlatForecaster {
    fn forecast(
        &self,
        history: &lead_pulse::forecast::MonthlyCostHistory,
        periods: usize,
    ) -> Result<Vec<lead_pulse::forecast::CostForecastPoint>, lead_pulse::forecast::ForecastError>
    {
        let last = history.last_month().expect("history present");
        Ok((1..=periods as u32)
            .map(|step| lead_pulse::forecast::CostForecastPoint {
                month: last + chrono::Months::new(step),
                predicted: self.0,
                lower: self.0,
                upper: self.0,
            })
            .collect())
    }
}

#[test]
fn dataset_accepts_any_forecaster() {
    let forecast = sample_dataset()
        .forecast_costs(&FlatForecaster(42.0), 2)
        .expect("flat forecast");
    assert_eq!(forecast.len(), 2);
    assert!(forecast.iter().all(|point| point.predicted == 42.0));
}
