//! Executive summary: overall churn plus three fixed risk segments.

use serde::Serialize;

use crate::analyzers::rates::{ChurnRate, churn_rate, segment_rate};
use crate::dataset::{Column, Dataset};

/// A segment is high risk when its churn rate is strictly above this percentage.
pub const HIGH_RISK_THRESHOLD: f64 = 30.0;

pub const MONTH_TO_MONTH: &str = "Month-to-month";
pub const ELECTRONIC_CHECK: &str = "Electronic check";

/// Segments checked against [`HIGH_RISK_THRESHOLD`], as (label, column, category).
static SEGMENTS: &[(&str, Column, &str)] = &[
    ("Senior Citizens", Column::SeniorCitizen, "yes"),
    ("Month-to-month contracts", Column::Contract, MONTH_TO_MONTH),
    ("Electronic check payments", Column::PaymentMethod, ELECTRONIC_CHECK),
];

/// Printed with every summary regardless of the data.
pub static RECOMMENDATIONS: &[&str] = &[
    "Focus retention efforts on month-to-month customers",
    "Provide additional support for senior citizens",
    "Encourage alternative payment methods over electronic checks",
    "Improve fiber optic service quality and support",
    "Promote add-on services (online security, tech support)",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRisk {
    pub label: &'static str,
    #[serde(flatten)]
    pub rate: ChurnRate,
    pub high_risk: bool,
}

impl SegmentRisk {
    /// Label with the churn rate appended, e.g. `Senior Citizens (41.7%)`.
    pub fn describe(&self) -> String {
        match self.rate.rate {
            Some(rate) => format!("{} ({:.1}%)", self.label, rate),
            None => format!("{} (n/a)", self.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryInsights {
    pub overall_churn_rate: Option<f64>,
    pub segments: Vec<SegmentRisk>,
    pub high_risk_segments: Vec<String>,
    pub recommendations: Vec<&'static str>,
}

pub fn summary_insights(dataset: &Dataset) -> SummaryInsights {
    let overall = churn_rate(dataset.records());

    let segments: Vec<SegmentRisk> = SEGMENTS
        .iter()
        .map(|&(label, column, value)| {
            let rate = segment_rate(dataset, column, value);
            SegmentRisk {
                label,
                rate,
                high_risk: is_high_risk(&rate),
            }
        })
        .collect();

    let high_risk_segments = segments
        .iter()
        .filter(|s| s.high_risk)
        .map(SegmentRisk::describe)
        .collect();

    SummaryInsights {
        overall_churn_rate: overall.rate,
        segments,
        high_risk_segments,
        recommendations: RECOMMENDATIONS.to_vec(),
    }
}

/// Empty segments have no rate and are never flagged.
pub fn is_high_risk(rate: &ChurnRate) -> bool {
    rate.rate.is_some_and(|r| r > HIGH_RISK_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SeniorCitizen;
    use crate::dataset::fixtures::record;

    #[test]
    fn test_threshold_is_strict() {
        let at = ChurnRate {
            total: 10,
            churned: 3,
            rate: Some(30.0),
        };
        let above = ChurnRate {
            total: 10,
            churned: 4,
            rate: Some(40.0),
        };
        assert!(!is_high_risk(&at));
        assert!(is_high_risk(&above));
        assert!(!is_high_risk(&ChurnRate::default()));
    }

    #[test]
    fn test_summary_flags_segments() {
        let mut records = Vec::new();
        // Month-to-month: 2 of 3 churned.
        for (i, churned) in [true, true, false].into_iter().enumerate() {
            let mut r = record(&format!("m{i}"), churned);
            r.contract = MONTH_TO_MONTH.to_string();
            records.push(r);
        }
        // Seniors: 1 of 4 churned.
        for (i, churned) in [true, false, false, false].into_iter().enumerate() {
            let mut r = record(&format!("s{i}"), churned);
            r.senior_citizen = SeniorCitizen::Yes;
            records.push(r);
        }
        let dataset = Dataset::from_records(records);

        let insights = summary_insights(&dataset);
        assert!((insights.overall_churn_rate.unwrap() - 300.0 / 7.0).abs() < 1e-9);
        assert_eq!(
            insights.high_risk_segments,
            vec!["Month-to-month contracts (66.7%)".to_string()]
        );
        assert_eq!(insights.segments.len(), 3);
        assert_eq!(insights.segments[0].rate.rate, Some(25.0));
        assert!(!insights.segments[0].high_risk);
        // No electronic check payers at all.
        assert_eq!(insights.segments[2].rate.total, 0);
        assert!(!insights.segments[2].high_risk);
    }

    #[test]
    fn test_recommendations_are_unconditional() {
        let insights = summary_insights(&Dataset::from_records(Vec::new()));
        assert_eq!(insights.overall_churn_rate, None);
        assert!(insights.high_risk_segments.is_empty());
        assert_eq!(insights.recommendations.len(), 5);
    }
}
