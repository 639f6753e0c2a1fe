//! Backing stores that hand out named ranges as grids of display strings.
//!
//! A store is addressed by an ID (one workbook) and a range name (one table,
//! header row included). Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: grids held in memory, keyed by store ID and range name.
//! - [`WorkbookStore`]: a directory per workbook with one delimited file per
//!   named range.

mod workbook;

use std::collections::HashMap;

use thiserror::Error;

pub use workbook::{WorkbookStore, parse_delimiter, resolve_encoding};

/// Rows of display-formatted cells, header row included.
pub type Grid = Vec<Vec<String>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store ID '{0}'")]
    InvalidStoreId(String),
    #[error("Store '{0}' not found")]
    StoreNotFound(String),
    #[error("Named range '{range}' not found in store '{store}'")]
    RangeNotFound { store: String, range: String },
    #[error("Reading named range '{range}' from store '{store}'")]
    Read {
        store: String,
        range: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub trait TableStore {
    fn read_range(&self, store_id: &str, range_name: &str) -> Result<Grid, StoreError>;
}

impl<T: TableStore + ?Sized> TableStore for &T {
    fn read_range(&self, store_id: &str, range_name: &str) -> Result<Grid, StoreError> {
        (**self).read_range(store_id, range_name)
    }
}

impl<T: TableStore + ?Sized> TableStore for Box<T> {
    fn read_range(&self, store_id: &str, range_name: &str) -> Result<Grid, StoreError> {
        (**self).read_range(store_id, range_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    stores: HashMap<String, HashMap<String, Grid>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty workbook so that lookups of unknown ranges report
    /// `RangeNotFound` rather than `StoreNotFound`.
    pub fn add_store(&mut self, store_id: &str) -> &mut Self {
        self.stores.entry(store_id.to_string()).or_default();
        self
    }

    pub fn insert_range<R, C>(&mut self, store_id: &str, range_name: &str, rows: R) -> &mut Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let grid = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.stores
            .entry(store_id.to_string())
            .or_default()
            .insert(range_name.to_string(), grid);
        self
    }
}

impl TableStore for MemoryStore {
    fn read_range(&self, store_id: &str, range_name: &str) -> Result<Grid, StoreError> {
        let ranges = self
            .stores
            .get(store_id)
            .ok_or_else(|| StoreError::StoreNotFound(store_id.to_string()))?;
        ranges
            .get(range_name)
            .cloned()
            .ok_or_else(|| StoreError::RangeNotFound {
                store: store_id.to_string(),
                range: range_name.to_string(),
            })
    }
}
