//! Loading and cleaning of the customer churn CSV.
//!
//! [`Dataset::load_and_clean`] reads the file once, applies the column
//! coercions in [`record`], and counts duplicated customer ids. The
//! resulting [`Dataset`] is read-only; every analyzer takes it by reference.

mod column;
mod record;

pub use column::Column;
pub use record::{COLUMN_COUNT, CustomerRecord, SeniorCitizen, coerce_total_charges};

use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while loading or exporting the dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("File '{0}' not found!")]
    NotFound(String),

    #[error("Error loading data: {0}")]
    Io(#[from] io::Error),

    #[error("Error loading data: {0}")]
    Csv(#[from] csv::Error),
}

/// The cleaned customer table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<CustomerRecord>,
    duplicate_ids: usize,
}

impl Dataset {
    /// Loads and cleans the CSV at `path`.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_and_clean(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        info!("Loading data");

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DatasetError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let dataset = Self::from_reader(file)?;
        info!(
            rows = dataset.len(),
            columns = COLUMN_COUNT,
            "Data loaded and cleaned"
        );
        Ok(dataset)
    }

    /// Parses and cleans CSV content from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

        let mut records = Vec::new();
        for result in rdr.deserialize() {
            let record: CustomerRecord = result?;
            records.push(record);
        }

        Ok(Self::from_records(records))
    }

    /// Builds a dataset from already parsed records.
    pub fn from_records(records: Vec<CustomerRecord>) -> Self {
        let duplicate_ids = count_duplicate_ids(&records);
        if duplicate_ids > 0 {
            warn!(duplicate_ids, "Found duplicate customer IDs");
        } else {
            debug!(rows = records.len(), "No duplicate customer IDs");
        }

        Self {
            records,
            duplicate_ids,
        }
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_count(&self) -> usize {
        COLUMN_COUNT
    }

    /// Number of rows whose customer id already appeared on an earlier row.
    pub fn duplicate_ids(&self) -> usize {
        self.duplicate_ids
    }

    /// Writes the cleaned table as CSV, headers included.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the cleaned table to `path`, replacing any existing file.
    pub fn write_csv_path(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        debug!(path = %path.display(), rows = self.len(), "Exporting cleaned CSV");
        let file = File::create(path)?;
        self.write_csv(file)
    }
}

fn count_duplicate_ids(records: &[CustomerRecord]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|r| !seen.insert(r.customer_id.as_str()))
        .count()
}
