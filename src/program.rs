//! Program table reader.
//!
//! Read failures are swallowed here: an unreadable store or range yields an
//! empty list, exactly like a table with no programs. Compare
//! [`crate::results_file`], which propagates the same failures.

use log::{debug, warn};
use serde::Serialize;

use crate::{
    data::{Identifier, Record},
    filter::{FieldFilter, apply_filter},
    rows::{RecordShape, shape_records},
    store::TableStore,
};

pub const DEFAULT_PROGRAM_RANGE: &str = "TableProgram";
pub const PROGRAM_ID_FIELD: &str = "id";
pub const PROGRAM_EVENT_FIELD: &str = "eventID";

const HIDDEN_FIELDS: &[&str] = &["races"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Program(Record);

impl Program {
    pub fn new(record: Record) -> Self {
        Program(record)
    }

    pub fn id(&self) -> Identifier {
        self.identifier(PROGRAM_ID_FIELD)
    }

    pub fn event_id(&self) -> Identifier {
        self.identifier(PROGRAM_EVENT_FIELD)
    }

    pub fn record(&self) -> &Record {
        &self.0
    }

    fn identifier(&self, field: &str) -> Identifier {
        self.0
            .identifier(field)
            .unwrap_or_else(|| Identifier::parse(""))
    }
}

impl From<Record> for Program {
    fn from(record: Record) -> Self {
        Program(record)
    }
}

#[derive(Debug, Clone)]
pub struct ProgramReader {
    range: String,
}

impl Default for ProgramReader {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM_RANGE)
    }
}

impl ProgramReader {
    pub fn new(range: impl Into<String>) -> Self {
        Self {
            range: range.into(),
        }
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    /// Every program in the store, or an empty list when the range cannot be read.
    pub fn load<S: TableStore + ?Sized>(&self, store: &S, store_id: &str) -> Vec<Program> {
        let grid = match store.read_range(store_id, &self.range) {
            Ok(grid) => grid,
            Err(err) => {
                warn!("Treating program table as empty: {err}");
                return Vec::new();
            }
        };
        let shape = RecordShape {
            hidden: HIDDEN_FIELDS,
            ..RecordShape::default()
        };
        let programs: Vec<Program> = shape_records(&grid, &shape)
            .into_iter()
            .map(Program)
            .collect();
        debug!(
            "Loaded {} program(s) from '{}' in store '{store_id}'",
            programs.len(),
            self.range
        );
        programs
    }

    pub fn load_by_event<S: TableStore + ?Sized>(
        &self,
        store: &S,
        store_id: &str,
        event_id: impl Into<Identifier>,
    ) -> Vec<Program> {
        let filter = FieldFilter::equals(PROGRAM_EVENT_FIELD, event_id);
        apply_filter(self.load(store, store_id), &filter, Program::record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_range(
            "season",
            DEFAULT_PROGRAM_RANGE,
            [
                ["id", "name", "eventID", "races"],
                ["1", "Heats", "7", "R1,R2"],
                ["", "", "", ""],
                ["2", "Finals", "8", "R3"],
                ["3", "Repechage", "7", ""],
            ],
        );
        store
    }

    #[test]
    fn load_hides_races_and_skips_blank_rows() {
        let programs = ProgramReader::default().load(&store(), "season");
        assert_eq!(programs.len(), 3);
        assert!(programs.iter().all(|p| !p.record().contains("races")));
        assert_eq!(programs[1].record().text("name"), Some("Finals"));
    }

    #[test]
    fn load_swallows_missing_store_and_range() {
        let store = store();
        assert!(ProgramReader::default().load(&store, "missing").is_empty());
        assert!(ProgramReader::new("TableNope").load(&store, "season").is_empty());
    }

    #[test]
    fn load_by_event_accepts_numeric_and_text_ids() {
        let reader = ProgramReader::default();
        let by_number = reader.load_by_event(&store(), "season", 7);
        let by_text = reader.load_by_event(&store(), "season", "7");
        let ids: Vec<_> = by_number.iter().map(|p| p.id().to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(by_number, by_text);
    }

    #[test]
    fn program_without_id_has_blank_identifier() {
        let program = Program::new(Record::new());
        assert_eq!(program.id().as_str(), "");
    }
}
