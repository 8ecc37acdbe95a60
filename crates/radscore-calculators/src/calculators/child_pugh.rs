use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::rubric::points::{opt, sum_points, PointAxis};
use crate::{Calculator, Specialty};

/// Child-Pugh classification of chronic liver disease severity.
pub struct ChildPugh;

const AXES: &[PointAxis] = &[
    PointAxis::Bands {
        field: "bilirubin",
        label: "Total bilirubin",
        unit: "mg/dL",
        bands: &[
            Band::new(Unbounded, Excluded(2.0), 1),
            Band::new(Included(2.0), Included(3.0), 2),
            Band::new(Excluded(3.0), Unbounded, 3),
        ],
    },
    PointAxis::Bands {
        field: "albumin",
        label: "Serum albumin",
        unit: "g/dL",
        bands: &[
            Band::new(Excluded(3.5), Unbounded, 1),
            Band::new(Included(2.8), Included(3.5), 2),
            Band::new(Unbounded, Excluded(2.8), 3),
        ],
    },
    PointAxis::Bands {
        field: "inr",
        label: "INR",
        unit: "",
        bands: &[
            Band::new(Unbounded, Excluded(1.7), 1),
            Band::new(Included(1.7), Included(2.2), 2),
            Band::new(Excluded(2.2), Unbounded, 3),
        ],
    },
    PointAxis::Choice {
        field: "ascites",
        label: "Ascites",
        options: &[
            opt("none", "None", 1),
            opt("slight", "Slight", 2),
            opt("moderate", "Moderate to severe", 3),
        ],
    },
    PointAxis::Choice {
        field: "encephalopathy",
        label: "Hepatic encephalopathy",
        options: &[
            opt("none", "None", 1),
            opt("grade1_2", "Grade 1-2", 2),
            opt("grade3_4", "Grade 3-4", 3),
        ],
    },
];

struct ClassRow {
    class: &'static str,
    mortality: &'static str,
}

const CLASSES: &[Band<ClassRow>] = &[
    Band::new(
        Unbounded,
        Included(6.0),
        ClassRow {
            class: "A",
            mortality: "5-10%",
        },
    ),
    Band::new(
        Excluded(6.0),
        Included(9.0),
        ClassRow {
            class: "B",
            mortality: "15-20%",
        },
    ),
    Band::new(
        Excluded(9.0),
        Unbounded,
        ClassRow {
            class: "C",
            mortality: "45-55%",
        },
    ),
];

impl Calculator for ChildPugh {
    fn id(&self) -> &str {
        "child_pugh"
    }

    fn name(&self) -> &str {
        "Child-Pugh Score"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Hepatology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            AXES.iter()
                .map(|axis| match axis.field() {
                    "bilirubin" => axis.field_spec().max(100.0),
                    "albumin" => axis.field_spec().max(10.0),
                    "inr" => axis.field_spec().max(20.0),
                    _ => axis.field_spec(),
                })
                .collect()
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let sum = sum_points(AXES, values)?;
        let row = classify(CLASSES, f64::from(sum.total))
            .ok_or_else(|| ValidationError::out_of_range("bilirubin", "Child-Pugh total is outside the published table"))?;
        let class = format!("Class {}", row.class);

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(sum.total))
            .with_category(class.clone())
            .entry("Total Score", format::points(sum.total))
            .entry("Child-Pugh Class", class)
            .entry("1-year mortality", row.mortality);
        for line in sum.breakdown() {
            result = result.breakdown_line(line);
        }

        Ok(result.recommend(match row.class {
            "A" => "Well-compensated disease; generally a candidate for hepatic resection or locoregional therapy",
            "B" => "Significant functional compromise; weigh locoregional therapy carefully and consider transplant referral",
            _ => "Decompensated disease; evaluate for liver transplantation",
        }))
    }
}
