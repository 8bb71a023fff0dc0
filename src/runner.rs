//! Drives analysis sections: compute, print, and chart when a chart
//! directory was configured.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};

use crate::analyzers::rates::ColumnBreakdown;
use crate::analyzers::sections;
use crate::analyzers::summary::{SummaryInsights, summary_insights};
use crate::charts::{ChartError, ChartWriter, log_written};
use crate::dataset::{Column, Dataset};
use crate::output;

pub struct Runner<'a> {
    dataset: &'a Dataset,
    charts: Option<ChartWriter>,
}

impl<'a> Runner<'a> {
    pub fn new(dataset: &'a Dataset, charts: Option<ChartWriter>) -> Self {
        Self { dataset, charts }
    }

    /// Chart failures are logged and do not abort the text output.
    fn chart<F>(&self, render: F)
    where
        F: FnOnce(&ChartWriter) -> Result<Vec<PathBuf>, ChartError>,
    {
        let Some(writer) = &self.charts else {
            return;
        };
        match render(writer) {
            Ok(paths) => log_written(&paths),
            Err(e) => error!(error = %e, "Chart generation failed"),
        }
    }

    pub fn overview<W: Write>(&self, w: &mut W) -> Result<()> {
        let section = sections::overview(self.dataset);
        output::write_overview(w, &section)?;
        self.chart(|c| c.overview(&section));
        Ok(())
    }

    pub fn demographics<W: Write>(&self, w: &mut W) -> Result<()> {
        let section = sections::demographics(self.dataset);
        output::write_demographics(w, &section)?;
        self.chart(|c| c.demographics(&section));
        Ok(())
    }

    pub fn tenure_contract<W: Write>(&self, w: &mut W) -> Result<()> {
        let section = sections::tenure_contract(self.dataset);
        output::write_tenure_contract(w, &section)?;
        self.chart(|c| c.tenure_contract(&section));
        Ok(())
    }

    pub fn services<W: Write>(&self, w: &mut W) -> Result<()> {
        let section = sections::services(self.dataset);
        output::write_services(w, &section)?;
        self.chart(|c| c.services(&section));
        Ok(())
    }

    pub fn payment<W: Write>(&self, w: &mut W) -> Result<()> {
        let section = sections::payment(self.dataset);
        output::write_payment(w, &section)?;
        self.chart(|c| c.payment(&section));
        Ok(())
    }

    pub fn summary<W: Write>(&self, w: &mut W) -> Result<SummaryInsights> {
        let insights = summary_insights(self.dataset);
        output::write_summary(w, &insights)?;
        Ok(insights)
    }

    pub fn breakdown<W: Write>(&self, w: &mut W, column: Column) -> Result<()> {
        let breakdown = ColumnBreakdown::of(self.dataset, column);
        output::write_breakdown(w, &breakdown)?;
        self.chart(|c| c.column(&breakdown));
        Ok(())
    }

    /// Every section in order, ending with the executive summary.
    pub fn full<W: Write>(&self, w: &mut W) -> Result<SummaryInsights> {
        info!(rows = self.dataset.len(), "Running full analysis");
        self.overview(w)?;
        self.demographics(w)?;
        self.tenure_contract(w)?;
        self.services(w)?;
        self.payment(w)?;
        self.summary(w)
    }
}

/// Entries of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Demographics,
    Services,
    Payment,
    Full,
    QuickSummary,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Demographics),
            "2" => Some(MenuChoice::Services),
            "3" => Some(MenuChoice::Payment),
            "4" => Some(MenuChoice::Full),
            "5" => Some(MenuChoice::QuickSummary),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

fn write_menu<W: Write>(w: &mut W) -> Result<()> {
    output::write_heading(w, "CHURN ANALYSIS MENU")?;
    writeln!(w, "1. Demographic Analysis")?;
    writeln!(w, "2. Service Analysis")?;
    writeln!(w, "3. Payment Analysis")?;
    writeln!(w, "4. Full Analysis")?;
    writeln!(w, "5. Quick Summary")?;
    writeln!(w, "6. Exit")?;
    write!(w, "\nEnter your choice (1-6): ")?;
    w.flush()?;
    Ok(())
}

/// Reads menu choices from `input` until `6` or end of input.
pub fn run_menu<R: BufRead, W: Write>(runner: &Runner<'_>, input: R, w: &mut W) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write_menu(w)?;
        let Some(line) = lines.next() else {
            writeln!(w)?;
            break;
        };
        let line = line?;

        match MenuChoice::parse(&line) {
            Some(MenuChoice::Demographics) => runner.demographics(w)?,
            Some(MenuChoice::Services) => runner.services(w)?,
            Some(MenuChoice::Payment) => runner.payment(w)?,
            Some(MenuChoice::Full) => {
                runner.full(w)?;
            }
            Some(MenuChoice::QuickSummary) => runner.overview(w)?,
            Some(MenuChoice::Exit) => {
                writeln!(w, "Goodbye!")?;
                break;
            }
            None => writeln!(w, "Invalid choice. Please try again.")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::record;
    use std::io::Cursor;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![record("a", true), record("b", false)])
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1\n"), Some(MenuChoice::Demographics));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_menu_runs_until_exit() {
        let dataset = dataset();
        let runner = Runner::new(&dataset, None);
        let mut out = Vec::new();

        run_menu(&runner, Cursor::new("3\nx\n6\n5\n"), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("PAYMENT METHOD ANALYSIS"));
        assert!(text.contains("Invalid choice. Please try again."));
        assert!(text.contains("Goodbye!"));
        // Input after exit is never processed.
        assert!(!text.contains("DATASET OVERVIEW"));
    }

    #[test]
    fn test_menu_stops_at_end_of_input() {
        let dataset = dataset();
        let runner = Runner::new(&dataset, None);
        let mut out = Vec::new();

        run_menu(&runner, Cursor::new("5\n"), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("DATASET OVERVIEW"));
        assert!(!text.contains("Goodbye!"));
    }

    #[test]
    fn test_full_runs_every_section() {
        let dataset = dataset();
        let runner = Runner::new(&dataset, None);
        let mut out = Vec::new();

        let insights = runner.full(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        for heading in [
            "DATASET OVERVIEW",
            "DEMOGRAPHIC ANALYSIS",
            "TENURE & CONTRACT ANALYSIS",
            "SERVICE ANALYSIS",
            "PAYMENT METHOD ANALYSIS",
            "EXECUTIVE SUMMARY",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert_eq!(insights.overall_churn_rate, Some(50.0));
    }
}
