//! Text rendering of analysis sections.
//!
//! Every writer takes an `io::Write` so the CLI can target stdout and tests
//! can capture into a buffer.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

use crate::analyzers::high_risk::DEFAULT_MAX_TENURE;
use crate::analyzers::rates::{ColumnBreakdown, GroupRate};
use crate::analyzers::sections::{Demographics, Overview, Payment, Services, TenureContract};
use crate::analyzers::summary::SummaryInsights;
use crate::dataset::{CustomerRecord, Dataset};

const BANNER_WIDTH: usize = 50;

pub fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// Writes a section title framed by banners, preceded by a blank line.
pub fn write_heading<W: Write>(w: &mut W, title: &str) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", banner())?;
    writeln!(w, "{title}")?;
    writeln!(w, "{}", banner())?;
    Ok(())
}

/// Formats an optional percentage, `n/a` when the group was empty.
pub fn format_rate(rate: Option<f64>, decimals: usize) -> String {
    match rate {
        Some(r) => format!("{r:.decimals$}%"),
        None => "n/a".to_string(),
    }
}

/// Formats an integer with comma thousands separators.
pub fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn write_overview<W: Write>(w: &mut W, overview: &Overview) -> Result<()> {
    write_heading(w, "DATASET OVERVIEW")?;
    writeln!(w, "Dataset shape: ({}, {})", overview.rows, overview.columns)?;
    writeln!(w, "Missing values: {}", overview.missing_values)?;
    if overview.duplicate_ids > 0 {
        writeln!(w, "Duplicate customer IDs: {}", overview.duplicate_ids)?;
    }
    writeln!(
        w,
        "Churned: {}, Retained: {}",
        overview.churn.churned,
        overview.churn.retained()
    )?;
    writeln!(
        w,
        "Overall churn rate: {}",
        format_rate(overview.churn.rate, 2)
    )?;
    Ok(())
}

pub fn write_demographics<W: Write>(w: &mut W, demographics: &Demographics) -> Result<()> {
    write_heading(w, "DEMOGRAPHIC ANALYSIS")?;
    writeln!(w, "Key Demographics Insights:")?;
    for group in &demographics.gender.groups {
        writeln!(
            w,
            "- {} churn rate: {}",
            group.category,
            format_rate(group.rate.rate, 1)
        )?;
    }
    for group in &demographics.senior_citizen.groups {
        let label = match group.category.as_str() {
            "yes" => "Senior citizens",
            "no" => "Non-senior citizens",
            other => other,
        };
        writeln!(
            w,
            "- {} churn rate: {} ({} customers)",
            label,
            format_rate(group.rate.rate, 1),
            group.rate.total
        )?;
    }
    Ok(())
}

pub fn write_tenure_contract<W: Write>(w: &mut W, section: &TenureContract) -> Result<()> {
    write_heading(w, "TENURE & CONTRACT ANALYSIS")?;
    writeln!(w, "Key Tenure & Contract Insights:")?;
    writeln!(
        w,
        "- Churned customers: mean tenure {:.1} months (sd {:.1})",
        section.churned_tenure.mean, section.churned_tenure.stddev
    )?;
    writeln!(
        w,
        "- Retained customers: mean tenure {:.1} months (sd {:.1})",
        section.retained_tenure.mean, section.retained_tenure.stddev
    )?;
    for group in &section.contract.groups {
        writeln!(
            w,
            "- {} contract churn rate: {}",
            group.category,
            format_rate(group.rate.rate, 1)
        )?;
    }
    Ok(())
}

pub fn write_services<W: Write>(w: &mut W, services: &Services) -> Result<()> {
    write_heading(w, "SERVICE ANALYSIS")?;
    for breakdown in &services.breakdowns {
        writeln!(w, "{}:", breakdown.column.header())?;
        for group in &breakdown.groups {
            write_counts(w, group)?;
        }
    }

    writeln!(w)?;
    writeln!(w, "Key Service Insights:")?;
    for breakdown in services.insights() {
        writeln!(w)?;
        write_breakdown(w, breakdown)?;
    }
    Ok(())
}

pub fn write_payment<W: Write>(w: &mut W, payment: &Payment) -> Result<()> {
    write_heading(w, "PAYMENT METHOD ANALYSIS")?;
    writeln!(w, "Key Payment Method Insights:")?;
    for group in &payment.payment_method.groups {
        writeln!(
            w,
            "- {}: {} churn rate",
            group.category,
            format_rate(group.rate.rate, 1)
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(w: &mut W, insights: &SummaryInsights) -> Result<()> {
    write_heading(w, "EXECUTIVE SUMMARY")?;
    writeln!(
        w,
        "Overall churn rate: {}",
        format_rate(insights.overall_churn_rate, 2)
    )?;
    writeln!(w)?;
    writeln!(w, "High-risk customer segments:")?;
    for segment in &insights.high_risk_segments {
        writeln!(w, "  • {segment}")?;
    }
    writeln!(w)?;
    writeln!(w, "Key Recommendations:")?;
    for recommendation in &insights.recommendations {
        writeln!(w, "  • {recommendation}")?;
    }
    Ok(())
}

/// `<Header> churn rates:` followed by one line per category.
pub fn write_breakdown<W: Write>(w: &mut W, breakdown: &ColumnBreakdown) -> Result<()> {
    writeln!(w, "{} churn rates:", breakdown.column.header())?;
    for group in &breakdown.groups {
        writeln!(
            w,
            "  - {}: {}",
            group.category,
            format_rate(group.rate.rate, 1)
        )?;
    }
    Ok(())
}

fn write_counts<W: Write>(w: &mut W, group: &GroupRate) -> Result<()> {
    writeln!(
        w,
        "  {}: {} retained, {} churned",
        group.category,
        group.rate.retained(),
        group.rate.churned
    )?;
    Ok(())
}

/// Customer count and churn rate for a loaded file.
pub fn write_quick_report<W: Write>(w: &mut W, source: &str, dataset: &Dataset) -> Result<()> {
    let rate = crate::analyzers::rates::churn_rate(dataset.records());
    writeln!(w, "QUICK REPORT for {source}")?;
    writeln!(w, "Total Customers: {}", with_thousands(dataset.len()))?;
    writeln!(w, "Churn Rate: {}", format_rate(rate.rate, 1))?;
    Ok(())
}

/// Lists high-risk customers, at most `limit` of them when given.
pub fn write_high_risk<W: Write>(
    w: &mut W,
    customers: &[&CustomerRecord],
    max_tenure: u32,
    limit: Option<usize>,
) -> Result<()> {
    writeln!(w, "Found {} high-risk customers", customers.len())?;
    if max_tenure != DEFAULT_MAX_TENURE {
        writeln!(w, "(month-to-month, tenure under {max_tenure} months)")?;
    }
    let shown = limit.unwrap_or(customers.len()).min(customers.len());
    for customer in &customers[..shown] {
        writeln!(
            w,
            "  {} tenure={} monthly={:.2} churn={}",
            customer.customer_id,
            customer.tenure,
            customer.monthly_charges,
            if customer.churned { "Yes" } else { "No" }
        )?;
    }
    if shown < customers.len() {
        writeln!(w, "  ... {} more", customers.len() - shown)?;
    }
    Ok(())
}

/// Writes any serializable section as pretty JSON.
pub fn print_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    debug!(bytes = json.len(), "Writing JSON output");
    writeln!(w, "{json}")?;
    Ok(())
}
