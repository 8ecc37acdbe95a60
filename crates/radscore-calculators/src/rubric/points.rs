//! Point-sum rubrics: every axis contributes points, the total is then
//! bucketed with [`classify`](super::bands::classify).

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;

use super::bands::{classify, Band};

#[derive(Debug, Clone, Copy)]
pub struct PointOption {
    pub id: &'static str,
    pub label: &'static str,
    pub points: i32,
}

pub const fn opt(id: &'static str, label: &'static str, points: i32) -> PointOption {
    PointOption { id, label, points }
}

/// One scored feature of a rubric.
#[derive(Debug, Clone, Copy)]
pub enum PointAxis {
    /// Mutually exclusive options.
    Choice {
        field: &'static str,
        label: &'static str,
        options: &'static [PointOption],
    },
    /// Any number of options; their points add up.
    Multi {
        field: &'static str,
        label: &'static str,
        options: &'static [PointOption],
    },
    /// Checkbox worth a fixed number of points.
    Flag {
        field: &'static str,
        label: &'static str,
        points: i32,
    },
    /// Numeric value scored by the band it falls in.
    Bands {
        field: &'static str,
        label: &'static str,
        unit: &'static str,
        bands: &'static [Band<i32>],
    },
    /// `points` for every full `step` of a numeric value.
    PerUnit {
        field: &'static str,
        label: &'static str,
        unit: &'static str,
        step: f64,
        points: i32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointLine {
    pub axis: &'static str,
    pub detail: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointSum {
    pub total: i32,
    pub lines: Vec<PointLine>,
}

impl PointSum {
    /// "Composition: Solid (2 points)" per axis.
    pub fn breakdown(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|l| format!("{}: {} ({})", l.axis, l.detail, format::points(l.points)))
            .collect()
    }

    pub fn points_for(&self, axis: &str) -> Option<i32> {
        self.lines.iter().find(|l| l.axis == axis).map(|l| l.points)
    }
}

impl PointAxis {
    pub fn field(&self) -> &'static str {
        match self {
            PointAxis::Choice { field, .. }
            | PointAxis::Multi { field, .. }
            | PointAxis::Flag { field, .. }
            | PointAxis::Bands { field, .. }
            | PointAxis::PerUnit { field, .. } => *field,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PointAxis::Choice { label, .. }
            | PointAxis::Multi { label, .. }
            | PointAxis::Flag { label, .. }
            | PointAxis::Bands { label, .. }
            | PointAxis::PerUnit { label, .. } => *label,
        }
    }

    /// The form field this axis reads, derived from the same table that
    /// scores it.
    pub fn field_spec(&self) -> FieldSpec {
        match self {
            PointAxis::Choice { field, label, options } => FieldSpec::choice(field, label, &option_pairs(options)),
            PointAxis::Multi { field, label, options } => {
                FieldSpec::multi_choice(field, label, &option_pairs(options))
            }
            PointAxis::Flag { field, label, .. } => FieldSpec::flag(field, label),
            PointAxis::Bands { field, label, unit, .. } | PointAxis::PerUnit { field, label, unit, .. } => {
                let spec = FieldSpec::number(field, label).min(0.0);
                if unit.is_empty() { spec } else { spec.unit(unit) }
            }
        }
    }

    pub fn score(&self, values: &Normalized) -> Result<PointLine, ValidationError> {
        let (detail, points) = match self {
            PointAxis::Choice { field, options, .. } => {
                let id = values.choice(field)?;
                let option = find_option(field, options, id)?;
                (option.label.to_string(), option.points)
            }
            PointAxis::Multi { field, options, .. } => {
                let selected = values.choices(field);
                if selected.is_empty() {
                    return Err(values.missing(field));
                }
                let mut labels = Vec::with_capacity(selected.len());
                let mut points = 0;
                for id in selected {
                    let option = find_option(field, options, id)?;
                    labels.push(option.label);
                    points += option.points;
                }
                (labels.join(", "), points)
            }
            PointAxis::Flag { field, points, .. } => {
                if values.flag(field) {
                    ("present".to_string(), *points)
                } else {
                    ("absent".to_string(), 0)
                }
            }
            PointAxis::Bands { field, label, unit, bands } => {
                let value = values.number(field)?;
                let points = classify(bands, value).copied().ok_or_else(|| {
                    ValidationError::out_of_range(
                        field,
                        format!("{label} of {} is outside the scored range", format::plain(value)),
                    )
                })?;
                (with_unit(value, unit), points)
            }
            PointAxis::PerUnit { field, label, unit, step, points } => {
                let value = values.number(field)?;
                let too_large = || {
                    ValidationError::out_of_range(
                        field,
                        format!("{label} of {} is too large to score", format::plain(value)),
                    )
                };
                let steps = (value / step).floor();
                if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&steps) {
                    return Err(too_large());
                }
                let points = (steps as i32).checked_mul(*points).ok_or_else(too_large)?;
                (with_unit(value, unit), points)
            }
        };

        Ok(PointLine {
            axis: self.label(),
            detail,
            points,
        })
    }
}

/// Score every axis; the first axis that cannot be scored aborts the sum.
pub fn sum_points(axes: &[PointAxis], values: &Normalized) -> Result<PointSum, ValidationError> {
    let lines = axes
        .iter()
        .map(|axis| axis.score(values))
        .collect::<Result<Vec<_>, _>>()?;
    let total = lines
        .iter()
        .try_fold(0i32, |acc, l| acc.checked_add(l.points))
        .ok_or_else(|| {
            // Blame the axis contributing the most points.
            let field = axes
                .iter()
                .zip(&lines)
                .max_by_key(|(_, l)| l.points)
                .map_or("", |(axis, _)| axis.field());
            ValidationError::out_of_range(field, "Point total is too large to score")
        })?;
    Ok(PointSum { total, lines })
}

fn option_pairs(options: &[PointOption]) -> Vec<(&str, &str)> {
    options.iter().map(|o| (o.id, o.label)).collect()
}

fn find_option<'a>(field: &str, options: &'a [PointOption], id: &str) -> Result<&'a PointOption, ValidationError> {
    options
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| ValidationError::invalid_format(field, format!("'{id}' is not a valid option")))
}

fn with_unit(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format::plain(value)
    } else {
        format!("{} {unit}", format::plain(value))
    }
}
