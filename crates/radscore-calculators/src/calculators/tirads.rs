use std::ops::Bound::{Included, Unbounded, Excluded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::rubric::points::{opt, sum_points, PointAxis};
use crate::{Calculator, Specialty};

/// ACR TI-RADS (2017): thyroid nodule risk stratification.
/// Five feature axes summed into TR1-TR5, with size-based FNA advice.
pub struct TiRads;

const AXES: &[PointAxis] = &[
    PointAxis::Choice {
        field: "composition",
        label: "Composition",
        options: &[
            opt("cystic", "Cystic or almost completely cystic", 0),
            opt("spongiform", "Spongiform", 0),
            opt("mixed", "Mixed cystic and solid", 1),
            opt("solid", "Solid or almost completely solid", 2),
        ],
    },
    PointAxis::Choice {
        field: "echogenicity",
        label: "Echogenicity",
        options: &[
            opt("anechoic", "Anechoic", 0),
            opt("hyperechoic_isoechoic", "Hyperechoic or isoechoic", 1),
            opt("hypoechoic", "Hypoechoic", 2),
            opt("very_hypoechoic", "Very hypoechoic", 3),
        ],
    },
    PointAxis::Choice {
        field: "shape",
        label: "Shape",
        options: &[
            opt("wider_than_tall", "Wider-than-tall", 0),
            opt("taller_than_wide", "Taller-than-wide", 3),
        ],
    },
    PointAxis::Choice {
        field: "margin",
        label: "Margin",
        options: &[
            opt("smooth", "Smooth", 0),
            opt("ill_defined", "Ill-defined", 0),
            opt("lobulated_irregular", "Lobulated or irregular", 2),
            opt("extrathyroidal_extension", "Extra-thyroidal extension", 3),
        ],
    },
    PointAxis::Multi {
        field: "echogenic_foci",
        label: "Echogenic foci",
        options: &[
            opt("none", "None", 0),
            opt("comet_tail", "Large comet-tail artifacts", 0),
            opt("macrocalcifications", "Macrocalcifications", 1),
            opt("peripheral", "Peripheral (rim) calcifications", 2),
            opt("punctate", "Punctate echogenic foci", 3),
        ],
    },
];

struct Level {
    code: &'static str,
    label: &'static str,
    /// FNA threshold and follow-up threshold, maximum diameter in cm.
    fna_cm: Option<f64>,
    follow_cm: Option<f64>,
    schedule: &'static str,
}

const TR1: Level = Level {
    code: "TR1",
    label: "Benign",
    fna_cm: None,
    follow_cm: None,
    schedule: "",
};

const LEVELS: &[Band<Level>] = &[
    Band::new(Unbounded, Included(1.0), TR1),
    Band::new(
        Excluded(1.0),
        Included(2.0),
        Level {
            code: "TR2",
            label: "Not suspicious",
            fna_cm: None,
            follow_cm: None,
            schedule: "",
        },
    ),
    Band::new(
        Excluded(2.0),
        Included(3.0),
        Level {
            code: "TR3",
            label: "Mildly suspicious",
            fna_cm: Some(2.5),
            follow_cm: Some(1.5),
            schedule: "at 1, 3 and 5 years",
        },
    ),
    Band::new(
        Excluded(3.0),
        Included(6.0),
        Level {
            code: "TR4",
            label: "Moderately suspicious",
            fna_cm: Some(1.5),
            follow_cm: Some(1.0),
            schedule: "at 1, 2, 3 and 5 years",
        },
    ),
    Band::new(
        Excluded(6.0),
        Unbounded,
        Level {
            code: "TR5",
            label: "Highly suspicious",
            fna_cm: Some(1.0),
            follow_cm: Some(0.5),
            schedule: "annually for up to 5 years",
        },
    ),
];

impl Calculator for TiRads {
    fn id(&self) -> &str {
        "tirads"
    }

    fn name(&self) -> &str {
        "ACR TI-RADS"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Radiology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let mut fields: Vec<FieldSpec> = AXES.iter().map(PointAxis::field_spec).collect();
            fields.push(
                FieldSpec::number("max_diameter_cm", "Maximum diameter")
                    .min(0.0)
                    .unit("cm")
                    .optional(),
            );
            fields
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let sum = sum_points(AXES, values)?;
        let spongiform = values.choice("composition")? == "spongiform";

        let level = if spongiform {
            &TR1
        } else {
            classify(LEVELS, f64::from(sum.total)).ok_or_else(|| {
                ValidationError::out_of_range("composition", format!("total of {} points is not scorable", sum.total))
            })?
        };

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(sum.total))
            .with_category(level.code)
            .entry("Total Points", format::points(sum.total))
            .entry("ACR TI-RADS Category", format!("{} ({})", level.code, level.label));
        for line in sum.breakdown() {
            result = result.breakdown_line(line);
        }
        if spongiform {
            result = result.note("Spongiform nodules are benign; no further points apply (TR1).");
        }

        let size = values.opt_number("max_diameter_cm");
        Ok(result.recommend(recommendation(level, size)))
    }
}

fn recommendation(level: &Level, size_cm: Option<f64>) -> String {
    let (Some(fna), Some(follow)) = (level.fna_cm, level.follow_cm) else {
        return "No FNA".to_string();
    };
    match size_cm {
        Some(size) if size >= fna => format!("FNA if ≥ {fna} cm: nodule measures {} cm, FNA recommended", format::plain(size)),
        Some(size) if size >= follow => format!(
            "Follow-up if ≥ {follow} cm: nodule measures {} cm, ultrasound follow-up {}",
            format::plain(size),
            level.schedule
        ),
        Some(size) => format!("Nodule measures {} cm, below follow-up threshold; no FNA or follow-up", format::plain(size)),
        None => format!("FNA if ≥ {fna} cm; follow-up if ≥ {follow} cm"),
    }
}
