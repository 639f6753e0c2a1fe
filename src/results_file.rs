//! Results File table reader.
//!
//! Unlike [`crate::program`], a store or range that cannot be read is an
//! error for the caller.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

use crate::{
    data::{Identifier, Record},
    filter::{FieldFilter, apply_filter},
    rows::{RecordShape, shape_records},
    store::TableStore,
};

pub const DEFAULT_RESULTS_FILE_RANGE: &str = "TableResultsFile";
pub const RESULTS_FILE_RACE_FIELD: &str = "raceID";
pub const RESULTS_FILE_ACTIVE_FIELD: &str = "active";

const FLAG_FIELDS: &[&str] = &[RESULTS_FILE_ACTIVE_FIELD];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultsFile(Record);

impl ResultsFile {
    pub fn new(record: Record) -> Self {
        ResultsFile(record)
    }

    pub fn race_id(&self) -> Option<Identifier> {
        self.0.identifier(RESULTS_FILE_RACE_FIELD)
    }

    /// `false` when the table has no `active` column.
    pub fn is_active(&self) -> bool {
        self.0.flag(RESULTS_FILE_ACTIVE_FIELD).unwrap_or(false)
    }

    pub fn record(&self) -> &Record {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct ResultsFileReader {
    range: String,
}

impl Default for ResultsFileReader {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_FILE_RANGE)
    }
}

impl ResultsFileReader {
    pub fn new(range: impl Into<String>) -> Self {
        Self {
            range: range.into(),
        }
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    pub fn load<S: TableStore + ?Sized>(
        &self,
        store: &S,
        store_id: &str,
    ) -> Result<Vec<ResultsFile>> {
        let grid = store.read_range(store_id, &self.range).with_context(|| {
            format!(
                "Loading results files from range '{}' in store '{store_id}'",
                self.range
            )
        })?;
        let shape = RecordShape {
            flags: FLAG_FIELDS,
            skip_blank_headers: true,
            ..RecordShape::default()
        };
        let files: Vec<ResultsFile> = shape_records(&grid, &shape)
            .into_iter()
            .map(ResultsFile)
            .collect();
        debug!(
            "Loaded {} results file(s) from '{}' in store '{store_id}'",
            files.len(),
            self.range
        );
        Ok(files)
    }

    pub fn load_by_race_ids<S, I, V>(
        &self,
        store: &S,
        store_id: &str,
        race_ids: I,
    ) -> Result<Vec<ResultsFile>>
    where
        S: TableStore + ?Sized,
        I: IntoIterator<Item = V>,
        V: Into<Identifier>,
    {
        let filter = FieldFilter::one_of(RESULTS_FILE_RACE_FIELD, race_ids);
        let files = self.load(store, store_id)?;
        Ok(apply_filter(files, &filter, ResultsFile::record))
    }
}
