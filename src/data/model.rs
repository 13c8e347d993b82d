//! Dataset Model
//! Records, the dataset container and first-seen label ordering.

use std::collections::HashMap;

/// A single observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub length: f64,
    pub width: f64,
    pub label: String,
}

impl Record {
    pub fn new(length: f64, width: f64, label: impl Into<String>) -> Self {
        Self {
            length,
            width,
            label: label.into(),
        }
    }
}

/// Numeric fields of a record that charts can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Length,
    Width,
}

impl Field {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Field::Length => record.length,
            Field::Width => record.width,
        }
    }
}

/// Distinct labels kept in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label, returning its position. Existing labels keep theirs.
    pub fn insert(&mut self, label: &str) -> usize {
        if let Some(&i) = self.index.get(label) {
            return i;
        }
        let i = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), i);
        i
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for LabelSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = LabelSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

/// Read-only collection of records produced by the loader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    labels: LabelSet,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let labels = records.iter().map(|r| r.label.as_str()).collect();
        Self { records, labels }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct labels in first-seen order.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// `(min, max)` of a numeric field, or `None` for an empty dataset.
    pub fn extent(&self, field: Field) -> Option<(f64, f64)> {
        self.records
            .iter()
            .map(|r| field.value(r))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    /// Values of `field` grouped by label, groups in first-seen label order.
    pub fn values_by_label(&self, field: Field) -> Vec<(String, Vec<f64>)> {
        let mut groups: Vec<(String, Vec<f64>)> = self
            .labels
            .iter()
            .map(|l| (l.to_string(), Vec::new()))
            .collect();
        for record in &self.records {
            if let Some(i) = self.labels.position(&record.label) {
                groups[i].1.push(field.value(record));
            }
        }
        groups
    }
}
