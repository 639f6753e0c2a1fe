mod common;

use std::collections::HashSet;

use common::season_workspace;
use proptest::prelude::*;
use race_tables::{
    data::Record,
    join::{ProgramRaceRelationship, Race, RelationshipReader, race_programs},
    program::{Program, ProgramReader},
    store::WorkbookStore,
};

fn program(id: &str) -> Program {
    Program::new([("id", id)].into_iter().collect::<Record>())
}

fn ids(programs: &[Program]) -> Vec<String> {
    programs.iter().map(|p| p.id().to_string()).collect()
}

#[test]
fn race_programs_returns_numeric_order_for_one_race() {
    let programs = vec![program("2"), program("10"), program("5")];
    let relationships = vec![
        ProgramRaceRelationship::new(2, "R1"),
        ProgramRaceRelationship::new(10, "R1"),
        ProgramRaceRelationship::new(5, "R2"),
    ];

    let result = race_programs(&programs, &relationships, &Race::new("R1"));

    assert_eq!(ids(&result), vec!["2", "10"]);
}

#[test]
fn race_programs_places_non_numeric_ids_last() {
    let programs = vec![program("B"), program("3"), program("A"), program("1")];
    let relationships: Vec<_> = ["A", "B", "1", "3"]
        .into_iter()
        .map(|id| ProgramRaceRelationship::new(id, "R1"))
        .collect();

    let result = race_programs(&programs, &relationships, &Race::new("R1"));

    assert_eq!(ids(&result), vec!["1", "3", "B", "A"]);
}

#[test]
fn race_programs_joins_tables_read_from_a_workbook() {
    let workspace = season_workspace();
    let store = WorkbookStore::new(workspace.path());

    let programs = ProgramReader::default().load(&store, "season");
    let relationships = RelationshipReader::default().load(&store, "season").unwrap();
    let result = race_programs(&programs, &relationships, &Race::new("R1"));

    assert_eq!(ids(&result), vec!["2", "10"]);
    let names: Vec<_> = result
        .iter()
        .filter_map(|p| p.record().text("name"))
        .collect();
    assert_eq!(names, vec!["Heats", "Finals"]);
}

#[test]
fn race_programs_keeps_ids_beyond_float_precision_apart() {
    let programs = vec![
        program("9007199254740993"),
        program("9007199254740992"),
    ];
    let relationships = vec![ProgramRaceRelationship::new(9_007_199_254_740_993u64, "R1")];

    let result = race_programs(&programs, &relationships, &Race::new("R1"));

    assert_eq!(ids(&result), vec!["9007199254740993"]);
}

proptest! {
    #[test]
    fn race_programs_is_sorted_deduplicated_and_race_scoped(
        program_ids in proptest::collection::hash_set(0u32..500, 0..40),
        links in proptest::collection::vec((0u32..500, 0u8..3), 0..80)
    ) {
        let programs: Vec<Program> = program_ids
            .iter()
            .map(|id| program(&id.to_string()))
            .collect();
        let relationships: Vec<ProgramRaceRelationship> = links
            .iter()
            .map(|(program_id, race)| ProgramRaceRelationship::new(*program_id, format!("R{race}")))
            .collect();

        let result = race_programs(&programs, &relationships, &Race::new("R0"));
        let numeric: Vec<u32> = result
            .iter()
            .map(|p| p.id().as_str().parse().unwrap())
            .collect();

        prop_assert!(numeric.windows(2).all(|pair| pair[0] < pair[1]));

        let expected: HashSet<u32> = links
            .iter()
            .filter(|(_, race)| *race == 0)
            .map(|(program_id, _)| *program_id)
            .filter(|program_id| program_ids.contains(program_id))
            .collect();
        let actual: HashSet<u32> = numeric.iter().copied().collect();
        prop_assert_eq!(actual, expected);
        prop_assert_eq!(numeric.len(), result.len());
    }
}
