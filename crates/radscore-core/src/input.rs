use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A value exactly as the form produced it.
///
/// Number inputs usually arrive as text so that locale decimal separators
/// survive until the normalizer sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RawValue {
    Bool(bool),
    Number(f64),
    Text(String),
    /// Selected option ids of a multi-select.
    List(Vec<String>),
    /// Dynamic row table; each row maps column id to value.
    Rows(Vec<BTreeMap<String, RawValue>>),
}

impl RawValue {
    /// Blank text and empty selections count as "not supplied".
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::List(items) => items.is_empty(),
            RawValue::Rows(rows) => rows.is_empty(),
            RawValue::Bool(_) | RawValue::Number(_) => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

/// Field id to raw value, as submitted by one "Calculate" action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct CalculatorInput {
    fields: BTreeMap<String, RawValue>,
}

impl CalculatorInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and the CLI.
    pub fn with(mut self, id: &str, value: impl Into<RawValue>) -> Self {
        self.fields.insert(id.to_string(), value.into());
        self
    }

    pub fn with_list(mut self, id: &str, ids: &[&str]) -> Self {
        let ids = ids.iter().map(|s| s.to_string()).collect();
        self.fields.insert(id.to_string(), RawValue::List(ids));
        self
    }

    pub fn with_rows(mut self, id: &str, rows: Vec<CalculatorInput>) -> Self {
        let rows = rows.into_iter().map(|r| r.fields).collect();
        self.fields.insert(id.to_string(), RawValue::Rows(rows));
        self
    }

    pub fn insert(&mut self, id: &str, value: RawValue) {
        self.fields.insert(id.to_string(), value);
    }

    pub fn remove(&mut self, id: &str) -> Option<RawValue> {
        self.fields.remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&RawValue> {
        self.fields.get(id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.fields.iter()
    }
}

impl From<BTreeMap<String, RawValue>> for CalculatorInput {
    fn from(fields: BTreeMap<String, RawValue>) -> Self {
        Self { fields }
    }
}
