use std::ops::Bound::{Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::{Calculator, Specialty};

/// International Prostate Symptom Score, tracked over several timepoints.
pub struct Ipss;

const SYMPTOMS: [(&str, &str); 7] = [
    ("q1", "Incomplete emptying"),
    ("q2", "Frequency"),
    ("q3", "Intermittency"),
    ("q4", "Urgency"),
    ("q5", "Weak stream"),
    ("q6", "Straining"),
    ("q7", "Nocturia"),
];

const MAX_TOTAL: f64 = 35.0;

/// A drop of this many points between first and last timepoint is the
/// smallest change patients perceive as improvement.
const MEANINGFUL_CHANGE: i32 = 3;

const SEVERITY: &[Band<&str>] = &[
    Band::new(Unbounded, Included(7.0), "Mild"),
    Band::new(Included(8.0), Included(19.0), "Moderate"),
    Band::new(Included(20.0), Unbounded, "Severe"),
];

const QOL_LABELS: [&str; 7] = [
    "Delighted",
    "Pleased",
    "Mostly satisfied",
    "Mixed",
    "Mostly dissatisfied",
    "Unhappy",
    "Terrible",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Timepoint {
    pub label: String,
    pub total: u32,
    pub qol: u32,
}

impl Timepoint {
    pub fn severity(&self) -> &'static str {
        classify(SEVERITY, f64::from(self.total)).copied().unwrap_or("Severe")
    }

    pub fn qol_label(&self) -> &'static str {
        QOL_LABELS.get(self.qol as usize).copied().unwrap_or("Terrible")
    }
}

impl Calculator for Ipss {
    fn id(&self) -> &str {
        "ipss"
    }

    fn name(&self) -> &str {
        "IPSS (International Prostate Symptom Score)"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Urology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let mut columns = vec![FieldSpec::text("label", "Timepoint").optional()];
            columns.extend(SYMPTOMS.iter().map(|(id, label)| FieldSpec::integer(id, label, 0.0, 5.0)));
            columns.push(FieldSpec::integer("qol", "Quality of life", 0.0, 6.0));
            vec![FieldSpec::rows("timepoints", "Timepoints", columns)]
        });
        &FIELDS
    }

    fn missing_message(&self, _missing: &[String]) -> Option<String> {
        Some("Please complete at least one timepoint (all 7 questions and quality of life)".to_string())
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let timepoints = values
            .rows("timepoints")
            .iter()
            .enumerate()
            .map(|(i, row)| timepoint(i, row))
            .collect::<Result<Vec<_>, ValidationError>>()?;
        let (Some(first), Some(last)) = (timepoints.first(), timepoints.last()) else {
            return Err(values.missing("timepoints"));
        };

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(last.total))
            .with_category(last.severity())
            .entry("Total Score", format::out_of(f64::from(last.total), MAX_TOTAL, 0))
            .entry("Severity", last.severity())
            .entry("Quality of Life", format!("{} ({})", last.qol, last.qol_label()));

        for tp in &timepoints {
            result = result.breakdown_line(format!(
                "{}: {} / 35 ({}), QoL {} ({})",
                tp.label,
                tp.total,
                tp.severity(),
                tp.qol,
                tp.qol_label()
            ));
        }

        if timepoints.len() > 1 {
            let change = last.total as i32 - first.total as i32;
            let mut shown = format!("{change:+} points");
            if first.total > 0 {
                let pct = f64::from(change) / f64::from(first.total) * 100.0;
                shown.push_str(&format!(" ({pct:+.1}%)"));
            }
            result = result.entry(format!("Change from {} to {}", first.label, last.label), shown);
            if change <= -MEANINGFUL_CHANGE {
                result = result.note("A decrease of 3 or more points is a clinically meaningful improvement");
            } else if change >= MEANINGFUL_CHANGE {
                result = result.note("Symptoms worsened by 3 or more points since the first timepoint");
            }
        }

        Ok(result.recommend(match last.severity() {
            "Mild" => "Watchful waiting and lifestyle measures",
            "Moderate" => "Consider medical therapy (alpha-blocker, 5-ARI) and reassess",
            _ => "Medical therapy; urology referral to discuss procedural options",
        }))
    }
}

fn timepoint(index: usize, row: &Normalized) -> Result<Timepoint, ValidationError> {
    let mut total = 0;
    for (id, _) in SYMPTOMS {
        total += row.number(id)? as u32;
    }
    let label = match row.text("label") {
        Some(label) => label.to_string(),
        None => format!("Timepoint {}", index + 1),
    };
    Ok(Timepoint {
        label,
        total,
        qol: row.number("qol")? as u32,
    })
}
