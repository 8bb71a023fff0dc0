//! Churn analysis over the cleaned dataset.
//!
//! Every analyzer is a pure function of [`crate::dataset::Dataset`]; none of
//! them depends on another's output.

pub mod high_risk;
pub mod rates;
pub mod sections;
pub mod summary;
pub mod utility;
