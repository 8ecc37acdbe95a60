use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::{ChoiceOption, FieldKind, FieldSpec};
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::tree::{advance_capped, finding, most_severe, GradedFinding};
use crate::{Calculator, Specialty};

/// AAST Organ Injury Scale for spleen, liver and kidney.
///
/// The grade is the most severe selected finding. Multiple injuries
/// advance the grade by one, but only up to Grade III.
pub struct Aast;

/// "Advance one grade for multiple injuries up to grade III."
const MULTIPLE_INJURY_CEILING: u8 = 3;

struct Organ {
    id: &'static str,
    label: &'static str,
    findings: &'static [GradedFinding],
}

const SPLEEN: &[GradedFinding] = &[
    finding("spleen_subcapsular_lt10", "Subcapsular hematoma <10% surface area", 1),
    finding("spleen_laceration_lt1", "Capsular laceration <1 cm depth", 1),
    finding("spleen_subcapsular_10_50", "Subcapsular hematoma 10-50% surface area", 2),
    finding("spleen_intraparenchymal_lt5", "Intraparenchymal hematoma <5 cm", 2),
    finding("spleen_laceration_1_3", "Laceration 1-3 cm depth, no trabecular vessel", 2),
    finding("spleen_subcapsular_gt50", "Subcapsular hematoma >50% or expanding", 3),
    finding("spleen_ruptured_hematoma", "Ruptured subcapsular or parenchymal hematoma", 3),
    finding("spleen_intraparenchymal_ge5", "Intraparenchymal hematoma ≥5 cm or expanding", 3),
    finding("spleen_laceration_gt3", "Laceration >3 cm depth or involving trabecular vessels", 3),
    finding("spleen_devascularization_gt25", "Segmental or hilar vessel laceration, >25% devascularization", 4),
    finding("spleen_shattered", "Shattered spleen", 5),
    finding("spleen_hilar_devascularization", "Hilar vascular injury devascularizing the spleen", 5),
];

const LIVER: &[GradedFinding] = &[
    finding("liver_subcapsular_lt10", "Subcapsular hematoma <10% surface area", 1),
    finding("liver_laceration_lt1", "Capsular tear <1 cm depth", 1),
    finding("liver_subcapsular_10_50", "Subcapsular hematoma 10-50% surface area", 2),
    finding("liver_intraparenchymal_lt10", "Intraparenchymal hematoma <10 cm diameter", 2),
    finding("liver_laceration_1_3", "Laceration 1-3 cm depth, <10 cm length", 2),
    finding("liver_subcapsular_gt50", "Subcapsular hematoma >50% or expanding", 3),
    finding("liver_ruptured_hematoma", "Ruptured subcapsular or parenchymal hematoma", 3),
    finding("liver_intraparenchymal_gt10", "Intraparenchymal hematoma >10 cm or expanding", 3),
    finding("liver_laceration_gt3", "Laceration >3 cm depth", 3),
    finding("liver_disruption_25_75", "Parenchymal disruption 25-75% of a hepatic lobe", 4),
    finding("liver_disruption_gt75", "Parenchymal disruption >75% of a hepatic lobe", 5),
    finding("liver_juxtahepatic_venous", "Juxtahepatic venous injury (retrohepatic IVC, hepatic veins)", 5),
    finding("liver_avulsion", "Hepatic avulsion", 6),
];

const KIDNEY: &[GradedFinding] = &[
    finding("kidney_contusion", "Contusion with normal imaging", 1),
    finding("kidney_subcapsular_nonexpanding", "Subcapsular hematoma, nonexpanding, no laceration", 1),
    finding("kidney_perirenal_nonexpanding", "Nonexpanding perirenal hematoma confined to retroperitoneum", 2),
    finding("kidney_laceration_lt1", "Laceration <1 cm depth, no urinary extravasation", 2),
    finding("kidney_laceration_gt1", "Laceration >1 cm depth, no collecting system involvement", 3),
    finding("kidney_collecting_system", "Laceration into the collecting system", 4),
    finding("kidney_main_vessel_contained", "Main renal artery or vein injury with contained hemorrhage", 4),
    finding("kidney_shattered", "Shattered kidney", 5),
    finding("kidney_hilar_avulsion", "Avulsion of the renal hilum devascularizing the kidney", 5),
];

const ORGANS: &[Organ] = &[
    Organ {
        id: "spleen",
        label: "Spleen",
        findings: SPLEEN,
    },
    Organ {
        id: "liver",
        label: "Liver",
        findings: LIVER,
    },
    Organ {
        id: "kidney",
        label: "Kidney",
        findings: KIDNEY,
    },
];

impl Calculator for Aast {
    fn id(&self) -> &str {
        "aast"
    }

    fn name(&self) -> &str {
        "AAST Organ Injury Scale"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Trauma
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let organs: Vec<(&str, &str)> = ORGANS.iter().map(|o| (o.id, o.label)).collect();
            let findings = ORGANS
                .iter()
                .flat_map(|o| o.findings)
                .map(|f| ChoiceOption {
                    id: f.id.to_string(),
                    label: f.label.to_string(),
                })
                .collect();
            vec![
                FieldSpec::choice("organ", "Injured organ", &organs),
                FieldSpec {
                    id: "findings".to_string(),
                    label: "Injury findings".to_string(),
                    kind: FieldKind::MultiChoice { options: findings },
                    required: true,
                    unit: None,
                },
                FieldSpec::flag("multiple_injuries", "Multiple injuries to the same organ"),
            ]
        });
        &FIELDS
    }

    fn missing_message(&self, missing: &[String]) -> Option<String> {
        if missing.iter().any(|f| f == "organ") {
            Some("Please select the injured organ".to_string())
        } else if missing.iter().any(|f| f == "findings") {
            Some("Please select at least one injury finding".to_string())
        } else {
            None
        }
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let organ_id = values.choice("organ")?;
        let organ = ORGANS
            .iter()
            .find(|o| o.id == organ_id)
            .ok_or_else(|| ValidationError::invalid_format("organ", format!("'{organ_id}' is not a graded organ")))?;

        let selected = values.choices("findings");
        if let Some(stray) = selected.iter().find(|id| !organ.findings.iter().any(|f| f.id == id.as_str())) {
            return Err(ValidationError::invalid_format(
                "findings",
                format!("Finding '{stray}' does not apply to the {}", organ.label.to_lowercase()),
            ));
        }

        let worst = most_severe(organ.findings, selected)
            .ok_or_else(|| ValidationError::missing(vec!["findings".to_string()], "Please select at least one injury finding"))?;

        let base = worst.grade;
        let multiple = values.flag("multiple_injuries");
        let grade = if multiple {
            advance_capped(base, MULTIPLE_INJURY_CEILING)
        } else {
            base
        };

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(grade))
            .with_category(format!("Grade {}", format::roman(grade)))
            .entry("Organ", organ.label)
            .entry("AAST Grade", format!("Grade {}", format::roman(grade)))
            .entry("Most severe finding", worst.label);

        for f in organ.findings.iter().filter(|f| selected.iter().any(|s| s == f.id)) {
            result = result.breakdown_line(format!("{} (Grade {})", f.label, format::roman(f.grade)));
        }

        if multiple {
            result = if grade > base {
                result.note(format!(
                    "Multiple injuries: advanced from Grade {} to Grade {}",
                    format::roman(base),
                    format::roman(grade)
                ))
            } else {
                result.note(format!(
                    "Multiple injuries: no advancement at Grade {} or above",
                    format::roman(MULTIPLE_INJURY_CEILING)
                ))
            };
        }

        Ok(result.recommend(management(grade)))
    }
}

fn management(grade: u8) -> &'static str {
    match grade {
        1 | 2 => "Low-grade injury: nonoperative management with clinical observation is typical",
        3 => "Intermediate injury: nonoperative management in hemodynamically stable patients; consider angiography if active extravasation",
        4 => "High-grade injury: close monitoring; angioembolization or operative management depending on hemodynamic status",
        _ => "Severe injury: high likelihood of operative or endovascular intervention",
    }
}
