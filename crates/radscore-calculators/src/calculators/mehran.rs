use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::rubric::points::{sum_points, PointAxis};
use crate::{Calculator, Specialty};

/// Mehran score for contrast-induced nephropathy after PCI (Mehran 2004).
pub struct Mehran;

const MAX_CONTRAST_ML: f64 = 10_000.0;

const AXES: &[PointAxis] = &[
    PointAxis::Flag {
        field: "hypotension",
        label: "Hypotension",
        points: 5,
    },
    PointAxis::Flag {
        field: "iabp",
        label: "Intra-aortic balloon pump",
        points: 5,
    },
    PointAxis::Flag {
        field: "chf",
        label: "Congestive heart failure",
        points: 5,
    },
    PointAxis::Bands {
        field: "age",
        label: "Age",
        unit: "years",
        bands: &[
            Band::new(Unbounded, Included(75.0), 0),
            Band::new(Excluded(75.0), Unbounded, 4),
        ],
    },
    PointAxis::Flag {
        field: "anemia",
        label: "Anemia",
        points: 3,
    },
    PointAxis::Flag {
        field: "diabetes",
        label: "Diabetes mellitus",
        points: 3,
    },
    PointAxis::PerUnit {
        field: "contrast_volume",
        label: "Contrast volume",
        unit: "mL",
        step: 100.0,
        points: 1,
    },
    PointAxis::Bands {
        field: "egfr",
        label: "eGFR",
        unit: "mL/min/1.73 m²",
        bands: &[
            Band::new(Unbounded, Excluded(20.0), 6),
            Band::new(Included(20.0), Excluded(40.0), 4),
            Band::new(Included(40.0), Excluded(60.0), 2),
            Band::new(Included(60.0), Unbounded, 0),
        ],
    },
];

struct RiskTier {
    label: &'static str,
    cin: &'static str,
    dialysis: &'static str,
}

const TIERS: &[Band<RiskTier>] = &[
    Band::new(
        Unbounded,
        Included(5.0),
        RiskTier {
            label: "Low Risk",
            cin: "7.5%",
            dialysis: "0.04%",
        },
    ),
    Band::new(
        Excluded(5.0),
        Included(10.0),
        RiskTier {
            label: "Moderate Risk",
            cin: "14.0%",
            dialysis: "0.12%",
        },
    ),
    Band::new(
        Excluded(10.0),
        Included(15.0),
        RiskTier {
            label: "High Risk",
            cin: "26.1%",
            dialysis: "1.09%",
        },
    ),
    Band::new(
        Excluded(15.0),
        Unbounded,
        RiskTier {
            label: "Very High Risk",
            cin: "57.3%",
            dialysis: "12.6%",
        },
    ),
];

impl Calculator for Mehran {
    fn id(&self) -> &str {
        "mehran"
    }

    fn name(&self) -> &str {
        "Mehran CIN Risk Score"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Nephrology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            AXES.iter()
                .map(|axis| match axis.field() {
                    "age" => axis.field_spec().max(120.0),
                    "contrast_volume" => axis.field_spec().max(MAX_CONTRAST_ML),
                    _ => axis.field_spec(),
                })
                .collect()
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let sum = sum_points(AXES, values)?;
        let tier = classify(TIERS, f64::from(sum.total))
            .ok_or_else(|| ValidationError::out_of_range("egfr", "Mehran score is outside the published table"))?;

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(sum.total))
            .with_category(tier.label)
            .entry("Total Score", format::points(sum.total))
            .entry("Risk Category", tier.label)
            .entry("Risk of CIN", tier.cin)
            .entry("Risk of Dialysis", tier.dialysis);
        for line in sum.breakdown() {
            result = result.breakdown_line(line);
        }

        if values.number("egfr")? < 60.0 {
            result = result.note("eGFR below 60 mL/min/1.73 m²: consider pre-procedural hydration and minimising contrast volume");
        }
        Ok(result.recommend(recommendation(sum.total)))
    }
}

fn recommendation(total: i32) -> &'static str {
    if total <= 5 {
        "Standard contrast precautions"
    } else if total <= 10 {
        "Ensure adequate hydration and limit contrast volume"
    } else {
        "High CIN risk: prophylactic hydration, minimal contrast volume and post-procedure creatinine monitoring"
    }
}
