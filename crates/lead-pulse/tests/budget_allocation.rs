use lead_pulse::allocation::{allocate_budget, AllocationError, AllocationStatus};
use lead_pulse::leads::{LeadImporter, LeadRecord};

const TOLERANCE: f64 = 1e-6;

fn sample_records() -> Vec<LeadRecord> {
    let data = include_bytes!("../Leads_Sample.csv");
    LeadImporter::from_reader(&data[..])
        .expect("sample sheet imports")
        .records()
        .to_vec()
}

#[test]
fn sample_sheet_allocation_favors_cheapest_source() {
    let allocation = allocate_budget(&sample_records(), 3_000.0).expect("valid budget");
    assert_eq!(allocation.status, AllocationStatus::Ok);

    let labels: Vec<_> = allocation
        .sources
        .iter()
        .map(|source| source.source.as_str())
        .collect();
    assert_eq!(labels, vec!["Facebook", "Google Ads", "Referral"]);

    let facebook = &allocation.sources[0];
    let google = &allocation.sources[1];
    let referral = &allocation.sources[2];
    assert!((facebook.cost_per_acquisition - 130.0).abs() < TOLERANCE);
    assert!((google.cost_per_acquisition - 310.0 / 3.0).abs() < TOLERANCE);
    assert!((referral.cost_per_acquisition - 60.0).abs() < TOLERANCE);

    for source in &allocation.sources {
        assert!((source.uniform_allocation - 1_000.0).abs() < TOLERANCE);
    }
    assert!(referral.weighted_allocation > google.weighted_allocation);
    assert!(google.weighted_allocation > facebook.weighted_allocation);

    let weighted_sum: f64 = allocation
        .sources
        .iter()
        .map(|source| source.weighted_allocation)
        .sum();
    assert!((weighted_sum - 3_000.0).abs() < TOLERANCE);

    let expected_uniform = 1_000.0 / 130.0 + 3_000.0 / 310.0 + 1_000.0 / 60.0;
    assert!((allocation.uniform_predicted_total - expected_uniform).abs() < TOLERANCE);
    assert!(allocation.weighted_predicted_total > allocation.uniform_predicted_total);
}

#[test]
fn sheet_without_conversions_reports_no_data() {
    let csv = "Lead Source,Cost,Converted,Converted Count\n\
Google Ads,100,FALSE,0\n\
Facebook,50,,0\n";
    let dataset = LeadImporter::from_reader(csv.as_bytes()).expect("sheet imports");
    let allocation = dataset.allocate(1_000.0).expect("valid budget");

    assert_eq!(allocation.status, AllocationStatus::NoData);
    assert!(allocation.sources.is_empty());
    assert_eq!(allocation.uniform_predicted_total, 0.0);
    assert_eq!(allocation.weighted_predicted_total, 0.0);
}

#[test]
fn flag_text_is_normalized_before_filtering() {
    let csv = "Lead Source,Cost,Converted,Converted Count\n\
X,100, true ,1\n\
Y,200,TRUE,1\n\
Z,300,FALSE,1\n\
W,400,,1\n";
    let dataset = LeadImporter::from_reader(csv.as_bytes()).expect("sheet imports");
    let allocation = dataset.allocate(300.0).expect("valid budget");

    let labels: Vec<_> = allocation
        .sources
        .iter()
        .map(|source| source.source.as_str())
        .collect();
    assert_eq!(labels, vec!["X", "Y"]);
    assert!((allocation.uniform_predicted_total - 2.25).abs() < TOLERANCE);
    assert!((allocation.weighted_predicted_total - 2.5).abs() < TOLERANCE);
}

#[test]
fn single_source_receives_whole_budget_under_both_strategies() {
    let records = vec![LeadRecord::new("Referral")
        .with_cost(90.0)
        .with_conversions(true, 3.0)];
    let allocation = allocate_budget(&records, 600.0).expect("valid budget");

    let only = &allocation.sources[0];
    assert!((only.uniform_allocation - 600.0).abs() < TOLERANCE);
    assert!((only.weighted_allocation - 600.0).abs() < TOLERANCE);
    assert!((only.weight - 1.0).abs() < TOLERANCE);
    assert!((allocation.uniform_predicted_total - 20.0).abs() < TOLERANCE);
    assert!((allocation.weighted_predicted_total - 20.0).abs() < TOLERANCE);
}

#[test]
fn zero_budget_is_rejected() {
    let error = allocate_budget(&sample_records(), 0.0).expect_err("zero budget");
    assert_eq!(error, AllocationError::InvalidBudget(0.0));
}
