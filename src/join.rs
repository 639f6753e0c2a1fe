use std::collections::HashSet;

use anyhow::{Context, Result};
use itertools::Itertools;
use log::debug;
use serde::Serialize;

use crate::{
    data::{Identifier, Record},
    program::Program,
    rows::{RecordShape, shape_records},
    store::TableStore,
};

pub const DEFAULT_PROGRAM_RACE_RANGE: &str = "TableProgramRace";
pub const RELATIONSHIP_PROGRAM_FIELD: &str = "programID";
pub const RELATIONSHIP_RACE_FIELD: &str = "raceID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Race {
    pub id: Identifier,
}

impl Race {
    pub fn new(id: impl Into<Identifier>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProgramRaceRelationship {
    #[serde(rename = "programID")]
    pub program_id: Identifier,
    #[serde(rename = "raceID")]
    pub race_id: Identifier,
}

impl ProgramRaceRelationship {
    pub fn new(program_id: impl Into<Identifier>, race_id: impl Into<Identifier>) -> Self {
        Self {
            program_id: program_id.into(),
            race_id: race_id.into(),
        }
    }

    /// `None` when either key column is missing from the row.
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            program_id: record.identifier(RELATIONSHIP_PROGRAM_FIELD)?,
            race_id: record.identifier(RELATIONSHIP_RACE_FIELD)?,
        })
    }
}

/// Programs linked to `race` in ascending numeric ID order.
///
/// Repeated relationship rows link a program once. Programs whose ID is not a
/// number sort after the numeric ones, in source order.
pub fn race_programs(
    programs: &[Program],
    relationships: &[ProgramRaceRelationship],
    race: &Race,
) -> Vec<Program> {
    let program_ids: HashSet<&Identifier> = relationships
        .iter()
        .filter(|relationship| relationship.race_id == race.id)
        .map(|relationship| &relationship.program_id)
        .collect();

    programs
        .iter()
        .filter(|program| program_ids.contains(&program.id()))
        .sorted_by(|a, b| a.id().cmp_numeric(&b.id()))
        .cloned()
        .collect()
}

#[derive(Debug, Clone)]
pub struct RelationshipReader {
    range: String,
}

impl Default for RelationshipReader {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM_RACE_RANGE)
    }
}

impl RelationshipReader {
    pub fn new(range: impl Into<String>) -> Self {
        Self {
            range: range.into(),
        }
    }

    pub fn range(&self) -> &str {
        &self.range
    }

    /// Rows missing either key column are skipped.
    pub fn load<S: TableStore + ?Sized>(
        &self,
        store: &S,
        store_id: &str,
    ) -> Result<Vec<ProgramRaceRelationship>> {
        let grid = store.read_range(store_id, &self.range).with_context(|| {
            format!(
                "Loading program/race relationships from range '{}' in store '{store_id}'",
                self.range
            )
        })?;
        let shape = RecordShape {
            skip_blank_headers: true,
            ..RecordShape::default()
        };
        let relationships: Vec<_> = shape_records(&grid, &shape)
            .iter()
            .filter_map(ProgramRaceRelationship::from_record)
            .collect();
        debug!(
            "Loaded {} relationship(s) from '{}' in store '{store_id}'",
            relationships.len(),
            self.range
        );
        Ok(relationships)
    }
}
