#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch workbook root that cleans up on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` as named range `range` of workbook `store_id`.
    pub fn write_range(&self, store_id: &str, range: &str, contents: &str) -> PathBuf {
        let dir = self.temp_dir.path().join(store_id);
        fs::create_dir_all(&dir).expect("create workbook dir");
        let path = dir.join(format!("{range}.csv"));
        fs::write(&path, contents).expect("write range file");
        path
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file");
        path
    }
}

pub const PROGRAMS_CSV: &str = "\
id,name,eventID,races
2,Heats,7,\"R1,R2\"
10,Finals,7,R1
,,,
5,Masters,8,R2
";

pub const RESULTS_FILES_CSV: &str = "\
id,raceID,url,active,
1,R1,https://results.example/r1.pdf,TRUE,scratch
2,R2,https://results.example/r2.pdf,FALSE,
,R2,,TRUE,
3,R3,https://results.example/r3.pdf,yes,
";

pub const PROGRAM_RACE_CSV: &str = "\
programID,raceID
2,R1
10,R1
2,R1
5,R2
";

/// Workspace holding one complete workbook named `season`.
pub fn season_workspace() -> TestWorkspace {
    let workspace = TestWorkspace::new();
    workspace.write_range("season", "TableProgram", PROGRAMS_CSV);
    workspace.write_range("season", "TableResultsFile", RESULTS_FILES_CSV);
    workspace.write_range("season", "TableProgramRace", PROGRAM_RACE_CSV);
    workspace
}
