//! Churn-rate arithmetic over the whole dataset or a grouping of it.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyzers::utility::pct;
use crate::dataset::{Column, CustomerRecord, Dataset};

/// Churned share of a set of customers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChurnRate {
    pub total: usize,
    pub churned: usize,
    /// Percentage of churned customers, `None` for an empty set.
    pub rate: Option<f64>,
}

impl ChurnRate {
    fn from_counts(total: usize, churned: usize) -> Self {
        ChurnRate {
            total,
            churned,
            rate: (total > 0).then(|| pct(churned, total)),
        }
    }

    pub fn retained(&self) -> usize {
        self.total - self.churned
    }
}

/// Churn rate of a single category within a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRate {
    pub category: String,
    #[serde(flatten)]
    pub rate: ChurnRate,
}

/// All categories of one column with their churn rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnBreakdown {
    pub column: Column,
    pub groups: Vec<GroupRate>,
}

impl ColumnBreakdown {
    pub fn of(dataset: &Dataset, column: Column) -> Self {
        ColumnBreakdown {
            column,
            groups: churn_rate_by(dataset, column),
        }
    }

    /// Looks up the rate for one category.
    pub fn get(&self, category: &str) -> Option<&ChurnRate> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| &g.rate)
    }
}

pub fn churn_rate<'a>(records: impl IntoIterator<Item = &'a CustomerRecord>) -> ChurnRate {
    let (total, churned) = records
        .into_iter()
        .fold((0, 0), |(t, c), r| (t + 1, c + usize::from(r.churned)));
    ChurnRate::from_counts(total, churned)
}

/// Groups the dataset by `column`, one entry per category sorted by name.
pub fn churn_rate_by(dataset: &Dataset, column: Column) -> Vec<GroupRate> {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for record in dataset.records() {
        let entry = counts.entry(column.value(record)).or_default();
        entry.0 += 1;
        if record.churned {
            entry.1 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(category, (total, churned))| GroupRate {
            category: category.to_string(),
            rate: ChurnRate::from_counts(total, churned),
        })
        .collect()
}

/// Churn rate among rows whose `column` equals `value`.
pub fn segment_rate(dataset: &Dataset, column: Column, value: &str) -> ChurnRate {
    churn_rate(
        dataset
            .records()
            .iter()
            .filter(|r| column.value(r) == value),
    )
}
