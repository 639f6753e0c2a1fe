//! Grid to record shaping.
//!
//! [`shape_records()`] turns a named range's grid into [`Record`]s: rows with
//! an empty first cell are dropped, the first remaining row supplies field
//! names, and every later row is zipped against it by column index.

use crate::data::{FieldValue, Record, parse_flag};

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordShape<'a> {
    /// Header names never copied into a record.
    pub hidden: &'a [&'a str],
    /// Header names whose cells are coerced with [`parse_flag`].
    pub flags: &'a [&'a str],
    pub skip_blank_headers: bool,
}

impl RecordShape<'_> {
    fn keeps(&self, name: &str) -> bool {
        !(self.hidden.contains(&name) || (self.skip_blank_headers && name.is_empty()))
    }
}

pub fn is_blank_row(row: &[String]) -> bool {
    row.first().is_none_or(|cell| cell.is_empty())
}

pub fn shape_records(grid: &[Vec<String>], shape: &RecordShape<'_>) -> Vec<Record> {
    let mut rows = grid.iter().filter(|row| !is_blank_row(row));
    let Some(headers) = rows.next() else {
        return Vec::new();
    };
    rows.map(|row| shape_row(headers, row, shape)).collect()
}

fn shape_row(headers: &[String], row: &[String], shape: &RecordShape<'_>) -> Record {
    let mut record = Record::new();
    for (idx, name) in headers.iter().enumerate() {
        if !shape.keeps(name) {
            continue;
        }
        let cell = row.get(idx).map(String::as_str).unwrap_or("");
        let value = if shape.flags.contains(&name.as_str()) {
            FieldValue::Flag(parse_flag(cell))
        } else {
            FieldValue::Text(cell.to_string())
        };
        record.insert(name.as_str(), value);
    }
    record
}
