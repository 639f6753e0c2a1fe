//! YAML configuration for workbook location, decoding, and named ranges.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! configuration that reads `./<store_id>/TableProgram.csv` and friends.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::{
    join::{DEFAULT_PROGRAM_RACE_RANGE, RelationshipReader},
    program::{DEFAULT_PROGRAM_RANGE, ProgramReader},
    results_file::{DEFAULT_RESULTS_FILE_RANGE, ResultsFileReader},
    store::{WorkbookStore, parse_delimiter, resolve_encoding},
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RangeNames {
    pub program: String,
    pub results_file: String,
    pub program_race: String,
}

impl Default for RangeNames {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM_RANGE.to_string(),
            results_file: DEFAULT_RESULTS_FILE_RANGE.to_string(),
            program_race: DEFAULT_PROGRAM_RACE_RANGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workbook_root: PathBuf,
    pub encoding: Option<String>,
    pub delimiter: Option<String>,
    pub ranges: RangeNames,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workbook_root: PathBuf::from("."),
            encoding: None,
            delimiter: None,
            ranges: RangeNames::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let config: Config = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing config YAML {path:?}"))?;
        Ok(config)
    }

    /// Relative workbook roots resolve against `base` (usually the config file's directory).
    pub fn resolve_root(&mut self, base: &Path) {
        if self.workbook_root.is_relative() {
            self.workbook_root = base.join(&self.workbook_root);
        }
    }

    pub fn workbook_store(&self) -> Result<WorkbookStore> {
        let encoding = resolve_encoding(self.encoding.as_deref())?;
        let delimiter = self
            .delimiter
            .as_deref()
            .map(parse_delimiter)
            .transpose()
            .map_err(|err| anyhow!("Invalid delimiter in config: {err}"))?;
        Ok(WorkbookStore::new(&self.workbook_root)
            .with_encoding(encoding)
            .with_delimiter(delimiter))
    }

    pub fn program_reader(&self) -> ProgramReader {
        ProgramReader::new(&self.ranges.program)
    }

    pub fn results_file_reader(&self) -> ResultsFileReader {
        ResultsFileReader::new(&self.ranges.results_file)
    }

    pub fn relationship_reader(&self) -> RelationshipReader {
        RelationshipReader::new(&self.ranges.program_race)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("ranges:\n  results_file: RESULTS\n").unwrap();
        assert_eq!(config.workbook_root, PathBuf::from("."));
        assert_eq!(config.ranges.results_file, "RESULTS");
        assert_eq!(config.ranges.program, DEFAULT_PROGRAM_RANGE);
        assert_eq!(config.results_file_reader().range(), "RESULTS");
    }

    #[test]
    fn load_reads_every_setting_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("race-tables.yaml");
        std::fs::write(
            &path,
            "workbook_root: /srv/workbooks\nencoding: windows-1252\ndelimiter: \";\"\n",
        )
        .unwrap();
        let expected = Config {
            workbook_root: PathBuf::from("/srv/workbooks"),
            encoding: Some("windows-1252".to_string()),
            delimiter: Some(";".to_string()),
            ranges: RangeNames::default(),
        };
        assert_eq!(Config::load(&path).unwrap(), expected);
        assert!(Config::load(&dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn invalid_delimiter_and_encoding_are_rejected() {
        let config = Config {
            delimiter: Some("::".to_string()),
            ..Config::default()
        };
        assert!(config.workbook_store().is_err());

        let config = Config {
            encoding: Some("not-an-encoding".to_string()),
            ..Config::default()
        };
        assert!(config.workbook_store().is_err());
    }

    #[test]
    fn resolve_root_only_touches_relative_paths() {
        let mut relative = Config {
            workbook_root: PathBuf::from("books"),
            ..Config::default()
        };
        relative.resolve_root(Path::new("/etc/race"));
        assert_eq!(relative.workbook_root, PathBuf::from("/etc/race/books"));

        let mut absolute = Config {
            workbook_root: PathBuf::from("/data"),
            ..Config::default()
        };
        absolute.resolve_root(Path::new("/etc/race"));
        assert_eq!(absolute.workbook_root, PathBuf::from("/data"));
    }
}
