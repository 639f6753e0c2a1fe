use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use encoding_rs::{Encoding, UTF_8};
use log::debug;

use super::{Grid, StoreError, TableStore};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

const RANGE_EXTENSIONS: &[&str] = &["csv", "tsv"];

/// Directory-backed store: `root/<store_id>/<range_name>.csv` (or `.tsv`).
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    root: PathBuf,
    delimiter: Option<u8>,
    encoding: &'static Encoding,
}

impl WorkbookStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            delimiter: None,
            encoding: UTF_8,
        }
    }

    /// Forces a delimiter instead of picking one from the range file extension.
    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn workbook_dir(&self, store_id: &str) -> Result<PathBuf, StoreError> {
        if !is_plain_name(store_id) {
            return Err(StoreError::InvalidStoreId(store_id.to_string()));
        }
        let dir = self.root.join(store_id);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(StoreError::StoreNotFound(store_id.to_string()))
        }
    }

    fn range_file(&self, dir: &Path, range_name: &str) -> Option<PathBuf> {
        if !is_plain_name(range_name) {
            return None;
        }
        RANGE_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{range_name}.{ext}")))
            .find(|path| path.is_file())
    }

    fn read_grid(&self, path: &Path) -> Result<Grid> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(resolve_delimiter(path, self.delimiter))
            .double_quote(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut grid = Grid::new();
        for (row_idx, record) in reader.byte_records().enumerate() {
            let record = record.map_err(|err| anyhow!("Row {}: {err}", row_idx + 1))?;
            let row = record
                .iter()
                .map(|cell| decode_cell(cell, self.encoding))
                .collect::<Result<Vec<_>>>()?;
            grid.push(row);
        }
        Ok(grid)
    }
}

impl TableStore for WorkbookStore {
    fn read_range(&self, store_id: &str, range_name: &str) -> Result<Grid, StoreError> {
        let dir = self.workbook_dir(store_id)?;
        let path = self
            .range_file(&dir, range_name)
            .ok_or_else(|| StoreError::RangeNotFound {
                store: store_id.to_string(),
                range: range_name.to_string(),
            })?;
        debug!("Reading named range '{range_name}' from {path:?}");
        self.read_grid(&path).map_err(|err| StoreError::Read {
            store: store_id.to_string(),
            range: range_name.to_string(),
            source: err.into(),
        })
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

fn resolve_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

fn decode_cell(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode cell with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    match label {
        Some(value) => Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'")),
        None => Ok(UTF_8),
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
