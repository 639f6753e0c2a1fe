use std::collections::HashSet;

use crate::data::{Identifier, Record};

/// Field-level predicate on a record, comparing through [`Identifier`].
#[derive(Debug, Clone)]
pub enum FieldFilter {
    Equals {
        field: String,
        value: Identifier,
    },
    OneOf {
        field: String,
        values: HashSet<Identifier>,
    },
}

impl FieldFilter {
    pub fn equals(field: impl Into<String>, value: impl Into<Identifier>) -> Self {
        FieldFilter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn one_of<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Identifier>,
    {
        FieldFilter::OneOf {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FieldFilter::Equals { field, .. } | FieldFilter::OneOf { field, .. } => field,
        }
    }

    /// Records without the field never match.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(candidate) = record.identifier(self.field()) else {
            return false;
        };
        match self {
            FieldFilter::Equals { value, .. } => candidate == *value,
            FieldFilter::OneOf { values, .. } => values.contains(&candidate),
        }
    }
}

pub fn apply_filter<T, F>(items: Vec<T>, filter: &FieldFilter, record_of: F) -> Vec<T>
where
    F: Fn(&T) -> &Record,
{
    items
        .into_iter()
        .filter(|item| filter.matches(record_of(item)))
        .collect()
}
