//! PNG charts for the analysis sections, drawn with [`plotters`].
//!
//! Every chart is a bar chart of retained vs churned customers, either per
//! category of a column or per tenure bin. Files are written into a caller
//! supplied directory and named after the chart title.

use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::analyzers::rates::ColumnBreakdown;
use crate::analyzers::sections::{Demographics, Overview, Payment, Services, TenureBin, TenureContract};

const CHART_SIZE: (u32, u32) = (1000, 600);
const RETAINED_COLOR: RGBColor = RGBColor(31, 119, 180);
const CHURNED_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to create chart directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// One bar pair: the category label and its retained/churned counts.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub retained: usize,
    pub churned: usize,
}

impl BarGroup {
    pub fn from_breakdown(breakdown: &ColumnBreakdown) -> Vec<BarGroup> {
        breakdown
            .groups
            .iter()
            .map(|g| BarGroup {
                label: g.category.clone(),
                retained: g.rate.retained(),
                churned: g.rate.churned,
            })
            .collect()
    }

    pub fn from_tenure_bins(bins: &[TenureBin]) -> Vec<BarGroup> {
        bins.iter()
            .map(|b| BarGroup {
                label: format!("{:.0}", b.start),
                retained: b.retained,
                churned: b.churned,
            })
            .collect()
    }
}

/// Turns a title into a file name: lowercase, non-alphanumerics collapsed to `_`.
pub fn chart_file_name(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 4);
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
        } else if !name.ends_with('_') {
            name.push('_');
        }
    }
    let trimmed = name.trim_matches('_');
    format!("{trimmed}.png")
}

/// Upper bound of the y axis: the tallest bar plus 10% headroom, at least 1.
fn y_max(groups: &[BarGroup]) -> f64 {
    let tallest = groups
        .iter()
        .map(|g| g.retained.max(g.churned))
        .max()
        .unwrap_or(0);
    (tallest as f64 * 1.1).max(1.0)
}

/// Draws side-by-side retained/churned bars, one pair per group, centred on
/// integer x positions.
pub fn grouped_bar_chart(
    groups: &[BarGroup],
    title: &str,
    x_label: &str,
    output_path: &Path,
) -> Result<()> {
    if groups.is_empty() {
        return Err(ChartError::InvalidData(format!("no groups for '{title}'")));
    }

    let n = groups.len();
    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max(groups))
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
    let label_formatter = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&label_formatter)
        .x_desc(x_label)
        .y_desc("Customers")
        .axis_desc_style(("sans-serif", 15))
        .draw()
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .draw_series(groups.iter().enumerate().map(|(i, g)| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x, g.retained as f64)], RETAINED_COLOR.filled())
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?
        .label("No")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], RETAINED_COLOR.filled()));

    chart
        .draw_series(groups.iter().enumerate().map(|(i, g)| {
            let x = i as f64;
            Rectangle::new([(x, 0.0), (x + 0.4, g.churned as f64)], CHURNED_COLOR.filled())
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?
        .label("Yes")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], CHURNED_COLOR.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    debug!(path = %output_path.display(), "Chart written");
    Ok(())
}

/// Renders charts for the analysis sections into a directory.
pub struct ChartWriter {
    dir: PathBuf,
}

impl ChartWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[cfg(test)]
    fn dir(&self) -> &Path {
        &self.dir
    }

    fn breakdown(&self, title: &str, breakdown: &ColumnBreakdown) -> Result<PathBuf> {
        let path = self.dir.join(chart_file_name(title));
        grouped_bar_chart(
            &BarGroup::from_breakdown(breakdown),
            title,
            breakdown.column.header(),
            &path,
        )?;
        Ok(path)
    }

    pub fn overview(&self, overview: &Overview) -> Result<Vec<PathBuf>> {
        let title = "Count of Customers by Churn Status";
        let path = self.dir.join(chart_file_name(title));
        let groups = [BarGroup {
            label: "All customers".to_string(),
            retained: overview.churn.retained(),
            churned: overview.churn.churned,
        }];
        grouped_bar_chart(&groups, title, "Churn", &path)?;
        Ok(vec![path])
    }

    pub fn demographics(&self, demographics: &Demographics) -> Result<Vec<PathBuf>> {
        Ok(vec![
            self.breakdown("Churn by Gender", &demographics.gender)?,
            self.breakdown("Churn by Senior Citizen Status", &demographics.senior_citizen)?,
        ])
    }

    pub fn tenure_contract(&self, section: &TenureContract) -> Result<Vec<PathBuf>> {
        let title = "Churn Distribution by Tenure (months)";
        let tenure_path = self.dir.join(chart_file_name(title));
        grouped_bar_chart(
            &BarGroup::from_tenure_bins(&section.histogram),
            title,
            "tenure",
            &tenure_path,
        )?;

        Ok(vec![
            tenure_path,
            self.breakdown("Churn by Contract Type", &section.contract)?,
        ])
    }

    pub fn services(&self, services: &Services) -> Result<Vec<PathBuf>> {
        services
            .breakdowns
            .iter()
            .map(|b| self.breakdown(&format!("Churn by {}", b.column.header()), b))
            .collect()
    }

    pub fn payment(&self, payment: &Payment) -> Result<Vec<PathBuf>> {
        Ok(vec![
            self.breakdown("Churn by Payment Method", &payment.payment_method)?,
        ])
    }

    pub fn column(&self, breakdown: &ColumnBreakdown) -> Result<Vec<PathBuf>> {
        Ok(vec![self.breakdown(
            &format!("Churn by {}", breakdown.column.header()),
            breakdown,
        )?])
    }
}

/// Logs the written chart paths.
pub fn log_written(paths: &[PathBuf]) {
    for path in paths {
        info!(path = %path.display(), "Chart saved");
    }
}
