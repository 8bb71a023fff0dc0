//! The independent analysis sections.
//!
//! Each function reads the cleaned [`Dataset`] and returns a plain data
//! struct. Text rendering lives in [`crate::output`] and chart rendering in
//! [`crate::charts`]; nothing here prints.

use serde::Serialize;

use crate::analyzers::rates::{ChurnRate, ColumnBreakdown, churn_rate};
use crate::analyzers::utility::{mean, stddev};
use crate::dataset::{Column, Dataset};

/// Number of tenure histogram bins.
pub const TENURE_BINS: usize = 30;

/// Service columns called out with per-category churn rates.
pub const SERVICE_INSIGHT_COLUMNS: [Column; 3] = [
    Column::InternetService,
    Column::OnlineSecurity,
    Column::TechSupport,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub rows: usize,
    pub columns: usize,
    /// Every field is typed after cleaning, so this is always zero.
    pub missing_values: usize,
    pub duplicate_ids: usize,
    pub churn: ChurnRate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Demographics {
    pub gender: ColumnBreakdown,
    pub senior_citizen: ColumnBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TenureBin {
    pub start: f64,
    pub end: f64,
    pub churned: usize,
    pub retained: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TenureStats {
    pub count: usize,
    pub mean: f64,
    pub stddev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenureContract {
    pub histogram: Vec<TenureBin>,
    pub churned_tenure: TenureStats,
    pub retained_tenure: TenureStats,
    pub contract: ColumnBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Services {
    pub breakdowns: Vec<ColumnBreakdown>,
}

impl Services {
    /// Breakdowns for the columns in [`SERVICE_INSIGHT_COLUMNS`].
    pub fn insights(&self) -> impl Iterator<Item = &ColumnBreakdown> {
        self.breakdowns
            .iter()
            .filter(|b| SERVICE_INSIGHT_COLUMNS.contains(&b.column))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    pub payment_method: ColumnBreakdown,
}

pub fn overview(dataset: &Dataset) -> Overview {
    Overview {
        rows: dataset.len(),
        columns: dataset.column_count(),
        missing_values: 0,
        duplicate_ids: dataset.duplicate_ids(),
        churn: churn_rate(dataset.records()),
    }
}

pub fn demographics(dataset: &Dataset) -> Demographics {
    Demographics {
        gender: ColumnBreakdown::of(dataset, Column::Gender),
        senior_citizen: ColumnBreakdown::of(dataset, Column::SeniorCitizen),
    }
}

pub fn tenure_contract(dataset: &Dataset) -> TenureContract {
    let churned: Vec<f64> = dataset
        .records()
        .iter()
        .filter(|r| r.churned)
        .map(|r| r.tenure as f64)
        .collect();
    let retained: Vec<f64> = dataset
        .records()
        .iter()
        .filter(|r| !r.churned)
        .map(|r| r.tenure as f64)
        .collect();

    TenureContract {
        histogram: tenure_histogram(dataset, TENURE_BINS),
        churned_tenure: tenure_stats(&churned),
        retained_tenure: tenure_stats(&retained),
        contract: ColumnBreakdown::of(dataset, Column::Contract),
    }
}

pub fn services(dataset: &Dataset) -> Services {
    Services {
        breakdowns: Column::SERVICES
            .iter()
            .map(|&column| ColumnBreakdown::of(dataset, column))
            .collect(),
    }
}

pub fn payment(dataset: &Dataset) -> Payment {
    Payment {
        payment_method: ColumnBreakdown::of(dataset, Column::PaymentMethod),
    }
}

fn tenure_stats(values: &[f64]) -> TenureStats {
    let avg = mean(values);
    TenureStats {
        count: values.len(),
        mean: avg,
        stddev: stddev(values, avg),
    }
}

/// Equal-width bins over the observed tenure range. The last bin is closed
/// on the right so the maximum tenure is counted.
pub fn tenure_histogram(dataset: &Dataset, bins: usize) -> Vec<TenureBin> {
    let tenures = dataset.records().iter().map(|r| r.tenure);
    let (Some(min), Some(max)) = (tenures.clone().min(), tenures.max()) else {
        return Vec::new();
    };

    let (min, max) = (min as f64, max as f64);
    let bins = if max > min { bins.max(1) } else { 1 };
    let width = if max > min { (max - min) / bins as f64 } else { 1.0 };

    let mut histogram: Vec<TenureBin> = (0..bins)
        .map(|i| TenureBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max.max(min + width)
            } else {
                min + width * (i + 1) as f64
            },
            churned: 0,
            retained: 0,
        })
        .collect();

    for record in dataset.records() {
        let idx = (((record.tenure as f64 - min) / width) as usize).min(bins - 1);
        if record.churned {
            histogram[idx].churned += 1;
        } else {
            histogram[idx].retained += 1;
        }
    }

    histogram
}
