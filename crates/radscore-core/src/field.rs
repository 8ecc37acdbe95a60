use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

/// How a field's raw value is parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    Number {
        min: Option<f64>,
        max: Option<f64>,
        /// Reject fractional values (item scores, counts).
        integer: bool,
    },
    Choice {
        options: Vec<ChoiceOption>,
    },
    MultiChoice {
        options: Vec<ChoiceOption>,
    },
    /// Checkbox; absent means unticked.
    Flag,
    Text,
    /// Dynamic table of fixed-shape rows.
    Rows {
        columns: Vec<FieldSpec>,
    },
}

/// A declared input of a calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub unit: Option<String>,
}

impl FieldSpec {
    fn new(id: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            required: true,
            unit: None,
        }
    }

    pub fn number(id: &str, label: &str) -> Self {
        Self::new(
            id,
            label,
            FieldKind::Number {
                min: None,
                max: None,
                integer: false,
            },
        )
    }

    /// Whole number within `[min, max]`.
    pub fn integer(id: &str, label: &str, min: f64, max: f64) -> Self {
        Self::new(
            id,
            label,
            FieldKind::Number {
                min: Some(min),
                max: Some(max),
                integer: true,
            },
        )
    }

    pub fn choice(id: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self::new(
            id,
            label,
            FieldKind::Choice {
                options: to_options(options),
            },
        )
    }

    pub fn multi_choice(id: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self::new(
            id,
            label,
            FieldKind::MultiChoice {
                options: to_options(options),
            },
        )
    }

    pub fn flag(id: &str, label: &str) -> Self {
        let mut spec = Self::new(id, label, FieldKind::Flag);
        spec.required = false;
        spec
    }

    pub fn text(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn rows(id: &str, label: &str, columns: Vec<FieldSpec>) -> Self {
        Self::new(id, label, FieldKind::Rows { columns })
    }

    /// Inclusive lower bound for a number field.
    pub fn min(mut self, value: f64) -> Self {
        if let FieldKind::Number { min, .. } = &mut self.kind {
            *min = Some(value);
        }
        self
    }

    /// Inclusive upper bound for a number field.
    pub fn max(mut self, value: f64) -> Self {
        if let FieldKind::Number { max, .. } = &mut self.kind {
            *max = Some(value);
        }
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Wording for a "please ..." prompt: choices are selected, the rest entered.
    pub fn prompt_verb(&self) -> &'static str {
        match self.kind {
            FieldKind::Choice { .. } | FieldKind::MultiChoice { .. } => "select",
            _ => "enter",
        }
    }
}

fn to_options(options: &[(&str, &str)]) -> Vec<ChoiceOption> {
    options
        .iter()
        .map(|(id, label)| ChoiceOption {
            id: id.to_string(),
            label: label.to_string(),
        })
        .collect()
}
