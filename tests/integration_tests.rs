use chrono::NaiveDate;
use churn_insights::analyzers::high_risk::{DEFAULT_MAX_TENURE, high_risk_customers};
use churn_insights::analyzers::rates::{churn_rate, churn_rate_by};
use churn_insights::analyzers::sections;
use churn_insights::analyzers::summary::summary_insights;
use churn_insights::dataset::{Column, Dataset, DatasetError, SeniorCitizen};
use churn_insights::report::{weekly_report, write_weekly_report};
use churn_insights::runner::{Runner, run_menu};
use std::io::Cursor;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_churn.csv");

fn load() -> Dataset {
    Dataset::load_and_clean(FIXTURE).expect("Failed to load fixture")
}

#[test]
fn test_load_and_clean_fixture() {
    let dataset = load();

    assert_eq!(dataset.len(), 12);
    assert_eq!(dataset.column_count(), 21);
    assert_eq!(dataset.duplicate_ids(), 1);

    let blank_charges = dataset
        .records()
        .iter()
        .find(|r| r.customer_id == "4472-LVYGI")
        .unwrap();
    assert_eq!(blank_charges.total_charges, 0.0);
    assert_eq!(blank_charges.tenure, 0);

    let seniors = dataset
        .records()
        .iter()
        .filter(|r| r.senior_citizen == SeniorCitizen::Yes)
        .count();
    assert_eq!(seniors, 3);
}

#[test]
fn test_missing_file_is_not_found() {
    let result = Dataset::load_and_clean("tests/fixtures/no_such_file.csv");
    match result {
        Err(DatasetError::NotFound(path)) => assert!(path.ends_with("no_such_file.csv")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_churn_rates_match_hand_computed() {
    let dataset = load();

    let overall = churn_rate(dataset.records());
    assert_eq!(overall.churned, 5);
    assert!((overall.rate.unwrap() - 500.0 / 12.0).abs() < 1e-9);

    let by_contract = churn_rate_by(&dataset, Column::Contract);
    let categories: Vec<_> = by_contract.iter().map(|g| g.category.as_str()).collect();
    assert_eq!(categories, vec!["Month-to-month", "One year", "Two year"]);
    assert_eq!(by_contract[0].rate.total, 8);
    assert_eq!(by_contract[0].rate.rate, Some(62.5));
    assert_eq!(by_contract[1].rate.rate, Some(0.0));

    let by_gender = churn_rate_by(&dataset, Column::Gender);
    assert_eq!(by_gender[0].category, "Female");
    assert_eq!(by_gender[0].rate.rate, Some(50.0));
}

#[test]
fn test_summary_flags_all_three_segments() {
    let insights = summary_insights(&load());

    assert_eq!(
        insights.high_risk_segments,
        vec![
            "Senior Citizens (66.7%)".to_string(),
            "Month-to-month contracts (62.5%)".to_string(),
            "Electronic check payments (75.0%)".to_string(),
        ]
    );
    assert_eq!(insights.recommendations.len(), 5);
}

#[test]
fn test_high_risk_customers() {
    let dataset = load();
    let customers = high_risk_customers(&dataset, DEFAULT_MAX_TENURE);
    assert_eq!(customers.len(), 6);
    assert!(customers.iter().all(|c| c.tenure < 12));
}

#[test]
fn test_cleaned_export_reloads_identically() {
    let dataset = load();
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cleaned.csv");

    dataset.write_csv_path(&path).unwrap();
    let reloaded = Dataset::load_and_clean(&path).unwrap();

    assert_eq!(dataset, reloaded);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.lines().nth(1).unwrap().contains(",no,"));
}

#[test]
fn test_weekly_report_file() {
    let dataset = load();
    let tmp = tempfile::tempdir().unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();

    let path = write_weekly_report(&dataset, tmp.path(), date).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "churn_report_2025-01-06.txt"
    );
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, weekly_report(&dataset, date));
    assert!(content.contains("Total customers: 12\n"));
    assert!(content.contains("Churn rate: 41.7%\n"));
    assert!(content.contains("High-risk customers: 8\n"));
}

#[test]
fn test_sections_are_independent() {
    let dataset = load();

    let services = sections::services(&dataset);
    let internet = services
        .insights()
        .find(|b| b.column == Column::InternetService)
        .unwrap();
    assert_eq!(internet.get("Fiber optic").unwrap().rate, Some(75.0));

    let tenure = sections::tenure_contract(&dataset);
    let binned: usize = tenure
        .histogram
        .iter()
        .map(|b| b.churned + b.retained)
        .sum();
    assert_eq!(binned, 12);
}

#[test]
fn test_menu_session() {
    let dataset = load();
    let runner = Runner::new(&dataset, None);
    let mut out = Vec::new();

    run_menu(&runner, Cursor::new("1\n2\n6\n"), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("- Female churn rate: 50.0%"));
    assert!(text.contains("- Male churn rate: 33.3%"));
    assert!(text.contains("InternetService churn rates:"));
    assert!(text.ends_with("Goodbye!\n"));
}
