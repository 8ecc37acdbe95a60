use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::{Calculator, Specialty};

/// Sexual Health Inventory for Men (IIEF-5): five items scored 1-5.
pub struct Shim;

const QUESTIONS: [(&str, &str); 5] = [
    ("q1", "Confidence that you could get and keep an erection"),
    ("q2", "Erections hard enough for penetration"),
    ("q3", "Able to maintain erection after penetration"),
    ("q4", "Difficulty maintaining erection to completion of intercourse"),
    ("q5", "Intercourse satisfactory"),
];

const SEVERITY: &[Band<&str>] = &[
    Band::new(Included(22.0), Unbounded, "No erectile dysfunction"),
    Band::new(Included(17.0), Excluded(22.0), "Mild erectile dysfunction"),
    Band::new(Included(12.0), Excluded(17.0), "Mild to moderate erectile dysfunction"),
    Band::new(Included(8.0), Excluded(12.0), "Moderate erectile dysfunction"),
    Band::new(Unbounded, Excluded(8.0), "Severe erectile dysfunction"),
];

impl Calculator for Shim {
    fn id(&self) -> &str {
        "shim"
    }

    fn name(&self) -> &str {
        "SHIM (IIEF-5)"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Urology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            QUESTIONS
                .iter()
                .map(|(id, label)| FieldSpec::integer(id, label, 1.0, 5.0))
                .collect()
        });
        &FIELDS
    }

    fn missing_message(&self, missing: &[String]) -> Option<String> {
        Some(format!("Please answer all 5 questions — {} remaining", missing.len()))
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let mut total = 0.0;
        let mut lines = Vec::with_capacity(QUESTIONS.len());
        for (i, (id, label)) in QUESTIONS.iter().enumerate() {
            let answer = values.number(id)?;
            total += answer;
            lines.push(format!("Q{}. {label}: {}", i + 1, format::plain(answer)));
        }

        let severity = classify(SEVERITY, total).copied().unwrap_or("Severe erectile dysfunction");
        let mut result = ScoreResult::new(self.id())
            .with_score(total)
            .with_category(severity)
            .entry("Total Score", format::out_of(total, 25.0, 0))
            .entry("Interpretation", severity);
        for line in lines {
            result = result.breakdown_line(line);
        }
        Ok(result.note("Score range 5-25; ≤ 21 suggests erectile dysfunction"))
    }
}
