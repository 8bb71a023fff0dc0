use crate::analyzers::summary::MONTH_TO_MONTH;
use crate::dataset::{CustomerRecord, Dataset};

/// Tenure (months) under which a month-to-month customer counts as high risk.
pub const DEFAULT_MAX_TENURE: u32 = 12;

/// Month-to-month customers with tenure strictly below `max_tenure`.
pub fn high_risk_customers(dataset: &Dataset, max_tenure: u32) -> Vec<&CustomerRecord> {
    dataset
        .records()
        .iter()
        .filter(|r| r.contract == MONTH_TO_MONTH && r.tenure < max_tenure)
        .collect()
}

/// Number of month-to-month customers, reported as high risk in the weekly report.
pub fn month_to_month_count(dataset: &Dataset) -> usize {
    dataset
        .records()
        .iter()
        .filter(|r| r.contract == MONTH_TO_MONTH)
        .count()
}
