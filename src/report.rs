//! Dated plain-text churn report.

use anyhow::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyzers::high_risk::month_to_month_count;
use crate::analyzers::rates::churn_rate;
use crate::dataset::Dataset;
use crate::output::{banner, format_rate, with_thousands};

/// `churn_report_YYYY-MM-DD.txt`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("churn_report_{}.txt", date.format("%Y-%m-%d"))
}

/// Renders the report body for `date`.
pub fn weekly_report(dataset: &Dataset, date: NaiveDate) -> String {
    let rate = churn_rate(dataset.records());

    let mut out = String::new();
    out.push_str(&format!(
        "CHURN ANALYSIS REPORT - {}\n",
        date.format("%Y-%m-%d")
    ));
    out.push_str(&banner());
    out.push_str("\n\n");
    out.push_str(&format!(
        "Total customers: {}\n",
        with_thousands(dataset.len())
    ));
    out.push_str(&format!("Churn rate: {}\n", format_rate(rate.rate, 1)));
    out.push_str(&format!(
        "High-risk customers: {}\n",
        with_thousands(month_to_month_count(dataset))
    ));
    out
}

/// Writes the report into `dir`, creating it if needed, and returns the file path.
#[tracing::instrument(skip(dataset), fields(dir = %dir.display(), date = %date))]
pub fn write_weekly_report(dataset: &Dataset, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(date));
    fs::write(&path, weekly_report(dataset, date))?;
    info!(path = %path.display(), "Report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::summary::MONTH_TO_MONTH;
    use crate::dataset::fixtures::record;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    fn sample() -> Dataset {
        let mut monthly = record("a", true);
        monthly.contract = MONTH_TO_MONTH.to_string();
        Dataset::from_records(vec![monthly, record("b", false), record("c", false)])
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(date()), "churn_report_2024-03-05.txt");
    }

    #[test]
    fn test_weekly_report_body() {
        let body = weekly_report(&sample(), date());
        let lines: Vec<_> = body.lines().collect();
        assert_eq!(lines[0], "CHURN ANALYSIS REPORT - 2024-03-05");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Total customers: 3");
        assert_eq!(lines[4], "Churn rate: 33.3%");
        assert_eq!(lines[5], "High-risk customers: 1");
    }

    #[test]
    fn test_write_weekly_report_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("reports");

        let path = write_weekly_report(&sample(), &dir, date()).unwrap();

        assert_eq!(path, dir.join("churn_report_2024-03-05.txt"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("CHURN ANALYSIS REPORT - 2024-03-05"));
    }
}
