//! Input normalizer: coerces raw form values into typed fields.
//!
//! Every declared field is parsed by its [`FieldKind`]. Missing required
//! fields are gathered into one [`ValidationKind::MissingInput`] error and
//! reported ahead of malformed values; the evaluator only ever sees a fully
//! typed [`Normalized`] map.
//!
//! [`ValidationKind::MissingInput`]: crate::error::ValidationKind::MissingInput

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::field::{ChoiceOption, FieldKind, FieldSpec};
use crate::input::{CalculatorInput, RawValue};

/// Decimal separator convention for numeric text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NumberLocale {
    /// Accept either `.` or a lone `,` as the decimal separator.
    #[default]
    Auto,
    Dot,
    Comma,
}

/// Parse numeric text. Thousands grouping is not accepted in any locale,
/// so `1,234.5` is rejected rather than guessed at.
pub fn parse_number(raw: &str, locale: NumberLocale) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let canonical = match locale {
        NumberLocale::Dot => {
            if trimmed.contains(',') {
                return None;
            }
            trimmed.to_string()
        }
        NumberLocale::Comma => {
            if trimmed.contains('.') || trimmed.matches(',').count() > 1 {
                return None;
            }
            trimmed.replace(',', ".")
        }
        NumberLocale::Auto => {
            let commas = trimmed.matches(',').count();
            if commas > 1 || (commas == 1 && trimmed.contains('.')) {
                return None;
            }
            trimmed.replace(',', ".")
        }
    };

    // `f64::from_str` also accepts "inf" and "NaN"; clinical inputs never are.
    if !canonical
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }

    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A parsed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Choice(String),
    Choices(Vec<String>),
    Flag(bool),
    Text(String),
    /// Only the complete rows survive normalization.
    Rows(Vec<Normalized>),
}

/// Typed view over one submitted form (or one row of a row table).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    values: BTreeMap<String, Value>,
    prompts: BTreeMap<String, String>,
}

impl Normalized {
    pub fn is_present(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn number(&self, id: &str) -> Result<f64, ValidationError> {
        self.opt_number(id).ok_or_else(|| self.missing(id))
    }

    pub fn opt_number(&self, id: &str) -> Option<f64> {
        match self.values.get(id) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn choice(&self, id: &str) -> Result<&str, ValidationError> {
        self.opt_choice(id).ok_or_else(|| self.missing(id))
    }

    pub fn opt_choice(&self, id: &str) -> Option<&str> {
        match self.values.get(id) {
            Some(Value::Choice(c)) => Some(c.as_str()),
            _ => None,
        }
    }

    /// Selected ids of a multi-select, empty when nothing was picked.
    pub fn choices(&self, id: &str) -> &[String] {
        match self.values.get(id) {
            Some(Value::Choices(c)) => c,
            _ => &[],
        }
    }

    pub fn flag(&self, id: &str) -> bool {
        matches!(self.values.get(id), Some(Value::Flag(true)))
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        match self.values.get(id) {
            Some(Value::Text(t)) => Some(t.as_str()),
            _ => None,
        }
    }

    pub fn rows(&self, id: &str) -> &[Normalized] {
        match self.values.get(id) {
            Some(Value::Rows(rows)) => rows,
            _ => &[],
        }
    }

    /// MissingInput for a field the rubric needs in this particular branch.
    pub fn missing(&self, id: &str) -> ValidationError {
        let message = self
            .prompts
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("Please enter {id}"));
        ValidationError::missing(vec![id.to_string()], message)
    }
}

/// Parse `input` against the declared `fields`.
pub fn normalize(
    fields: &[FieldSpec],
    input: &CalculatorInput,
    locale: NumberLocale,
) -> Result<Normalized, ValidationError> {
    let mut out = Normalized::default();
    let mut missing: Vec<&FieldSpec> = Vec::new();
    let mut invalid: Option<ValidationError> = None;

    for spec in fields {
        out.prompts.insert(spec.id.clone(), prompt(spec));

        let raw = input.get(&spec.id).filter(|raw| !raw.is_blank());
        let Some(raw) = raw else {
            if matches!(spec.kind, FieldKind::Flag) {
                out.values.insert(spec.id.clone(), Value::Flag(false));
            } else if spec.required {
                missing.push(spec);
            }
            continue;
        };

        match parse_field(spec, raw, locale) {
            Ok(Value::Rows(rows)) if rows.is_empty() => {
                if spec.required {
                    missing.push(spec);
                }
            }
            Ok(value) => {
                out.values.insert(spec.id.clone(), value);
            }
            Err(e) => {
                if invalid.is_none() {
                    invalid = Some(e);
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(missing_error(&missing));
    }
    if let Some(e) = invalid {
        return Err(e);
    }
    Ok(out)
}

fn parse_field(spec: &FieldSpec, raw: &RawValue, locale: NumberLocale) -> Result<Value, ValidationError> {
    match &spec.kind {
        FieldKind::Number { min, max, integer } => {
            let n = match raw {
                RawValue::Number(n) if n.is_finite() => *n,
                RawValue::Text(s) => parse_number(s, locale).ok_or_else(|| {
                    ValidationError::invalid_format(
                        &spec.id,
                        format!("{} must be a number (got '{}')", spec.label, s.trim()),
                    )
                })?,
                _ => {
                    return Err(ValidationError::invalid_format(
                        &spec.id,
                        format!("{} must be a number", spec.label),
                    ));
                }
            };
            if *integer && n.fract() != 0.0 {
                return Err(ValidationError::invalid_format(
                    &spec.id,
                    format!("{} must be a whole number", spec.label),
                ));
            }
            check_range(spec, n, *min, *max)?;
            Ok(Value::Number(n))
        }
        FieldKind::Choice { options } => {
            let id = option_id(raw).ok_or_else(|| not_an_option(spec, raw))?;
            if !is_option(options, &id) {
                return Err(not_an_option(spec, raw));
            }
            Ok(Value::Choice(id))
        }
        FieldKind::MultiChoice { options } => {
            let ids: Vec<String> = match raw {
                RawValue::List(ids) => ids.iter().map(|s| s.trim().to_string()).collect(),
                other => vec![option_id(other).ok_or_else(|| not_an_option(spec, other))?],
            };
            let mut selected: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if !is_option(options, &id) {
                    return Err(ValidationError::invalid_format(
                        &spec.id,
                        format!("'{id}' is not a valid option for {}", spec.label),
                    ));
                }
                if !selected.contains(&id) {
                    selected.push(id);
                }
            }
            Ok(Value::Choices(selected))
        }
        FieldKind::Flag => {
            let flag = match raw {
                RawValue::Bool(b) => Some(*b),
                RawValue::Number(n) if *n == 0.0 || *n == 1.0 => Some(*n == 1.0),
                RawValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => Some(true),
                    "false" | "no" | "off" | "0" => Some(false),
                    _ => None,
                },
                _ => None,
            };
            flag.map(Value::Flag).ok_or_else(|| {
                ValidationError::invalid_format(&spec.id, format!("{} must be checked or unchecked", spec.label))
            })
        }
        FieldKind::Text => match raw {
            RawValue::Text(s) => Ok(Value::Text(s.trim().to_string())),
            RawValue::Number(n) => Ok(Value::Text(n.to_string())),
            _ => Err(ValidationError::invalid_format(
                &spec.id,
                format!("{} must be text", spec.label),
            )),
        },
        FieldKind::Rows { columns } => {
            let RawValue::Rows(rows) = raw else {
                return Err(ValidationError::invalid_format(
                    &spec.id,
                    format!("{} must be a list of rows", spec.label),
                ));
            };
            // Incomplete rows are still being typed; they are skipped, not errors.
            let complete = rows
                .iter()
                .filter_map(|row| normalize(columns, &CalculatorInput::from(row.clone()), locale).ok())
                .collect();
            Ok(Value::Rows(complete))
        }
    }
}

fn check_range(spec: &FieldSpec, n: f64, min: Option<f64>, max: Option<f64>) -> Result<(), ValidationError> {
    let message = match (min, max) {
        (Some(lo), Some(hi)) if n < lo || n > hi => format!("{} must be between {lo} and {hi}", spec.label),
        (Some(lo), None) if n < lo => format!("{} must be at least {lo}", spec.label),
        (None, Some(hi)) if n > hi => format!("{} must be at most {hi}", spec.label),
        _ => return Ok(()),
    };
    Err(ValidationError::out_of_range(&spec.id, message))
}

fn option_id(raw: &RawValue) -> Option<String> {
    match raw {
        RawValue::Text(s) => Some(s.trim().to_string()),
        // Numeric selects ("PI-RADS 3") may arrive as numbers.
        RawValue::Number(n) if n.fract() == 0.0 => Some(format!("{n:.0}")),
        _ => None,
    }
}

fn is_option(options: &[ChoiceOption], id: &str) -> bool {
    options.iter().any(|o| o.id == id)
}

fn not_an_option(spec: &FieldSpec, raw: &RawValue) -> ValidationError {
    let shown = match raw {
        RawValue::Text(s) => s.trim().to_string(),
        RawValue::Number(n) => n.to_string(),
        RawValue::Bool(b) => b.to_string(),
        RawValue::List(_) | RawValue::Rows(_) => "a list".to_string(),
    };
    ValidationError::invalid_format(&spec.id, format!("'{shown}' is not a valid option for {}", spec.label))
}

fn prompt(spec: &FieldSpec) -> String {
    format!("Please {} {}", spec.prompt_verb(), sentence_case(&spec.label))
}

fn missing_error(missing: &[&FieldSpec]) -> ValidationError {
    let ids = missing.iter().map(|s| s.id.clone()).collect();
    let message = match missing {
        [only] => prompt(only),
        many => {
            let labels: Vec<&str> = many.iter().map(|s| s.label.as_str()).collect();
            format!("Please complete all required fields: {}", labels.join(", "))
        }
    };
    ValidationError::missing(ids, message)
}

/// "Maximum diameter" reads as "maximum diameter" mid-sentence; acronyms
/// such as "eGFR" or "T2W score" are left alone.
fn sentence_case(label: &str) -> String {
    let mut chars = label.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(second)) if first.is_uppercase() && second.is_lowercase() => {
            let mut out = first.to_lowercase().to_string();
            out.push(second);
            out.extend(chars);
            out
        }
        _ => label.to_string(),
    }
}
