use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::rubric::points::{opt, sum_points, PointAxis};
use crate::{Calculator, Specialty};

/// R.E.N.A.L. nephrometry score (Kutikov & Uzzo 2009).
///
/// Four scored components (R, E, N, L) sum to 4-12; the anterior/posterior
/// descriptor and hilar flag are appended as suffix letters, e.g. `10ah`.
pub struct RenalNephrometry;

const AXES: &[PointAxis] = &[
    PointAxis::Bands {
        field: "diameter_cm",
        label: "(R)adius, maximal diameter",
        unit: "cm",
        bands: &[
            Band::new(Unbounded, Included(4.0), 1),
            Band::new(Excluded(4.0), Excluded(7.0), 2),
            Band::new(Included(7.0), Unbounded, 3),
        ],
    },
    PointAxis::Choice {
        field: "exophytic",
        label: "(E)xophytic/endophytic",
        options: &[
            opt("ge50", "≥ 50% exophytic", 1),
            opt("lt50", "< 50% exophytic", 2),
            opt("endophytic", "Entirely endophytic", 3),
        ],
    },
    PointAxis::Bands {
        field: "nearness_mm",
        label: "(N)earness to collecting system or sinus",
        unit: "mm",
        bands: &[
            Band::new(Included(7.0), Unbounded, 1),
            Band::new(Excluded(4.0), Excluded(7.0), 2),
            Band::new(Unbounded, Included(4.0), 3),
        ],
    },
    PointAxis::Choice {
        field: "location",
        label: "(L)ocation relative to polar lines",
        options: &[
            opt("polar", "Entirely above the upper or below the lower polar line", 1),
            opt("crosses", "Lesion crosses a polar line", 2),
            opt(
                "central",
                "> 50% across a polar line, crosses the axial midline, or entirely between polar lines",
                3,
            ),
        ],
    },
];

const COMPLEXITY: &[Band<&str>] = &[
    Band::new(Unbounded, Included(6.0), "Low complexity"),
    Band::new(Excluded(6.0), Included(9.0), "Moderate complexity"),
    Band::new(Excluded(9.0), Unbounded, "High complexity"),
];

impl Calculator for RenalNephrometry {
    fn id(&self) -> &str {
        "renal"
    }

    fn name(&self) -> &str {
        "RENAL Nephrometry Score"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Urology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let mut fields: Vec<FieldSpec> = AXES.iter().map(PointAxis::field_spec).collect();
            fields.insert(
                3,
                FieldSpec::choice(
                    "anterior_posterior",
                    "(A)nterior/posterior",
                    &[("anterior", "Anterior (a)"), ("posterior", "Posterior (p)"), ("neither", "Neither (x)")],
                ),
            );
            fields.push(FieldSpec::flag("hilar", "Hilar lesion (touches main renal artery or vein)"));
            fields
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        if values.number("diameter_cm")? <= 0.0 {
            return Err(ValidationError::out_of_range("diameter_cm", "Tumor diameter must be greater than 0 cm"));
        }

        let sum = sum_points(AXES, values)?;
        let suffix = match values.choice("anterior_posterior")? {
            "anterior" => "a",
            "posterior" => "p",
            _ => "x",
        };
        let hilar = if values.flag("hilar") { "h" } else { "" };
        let notation = format!("{}{suffix}{hilar}", sum.total);

        let complexity = classify(COMPLEXITY, f64::from(sum.total)).copied().unwrap_or("High complexity");

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(sum.total))
            .with_category(complexity)
            .entry("RENAL Score", notation)
            .entry("Total Points", sum.total.to_string())
            .entry("Complexity", complexity);
        for line in sum.breakdown() {
            result = result.breakdown_line(line);
        }
        if !hilar.is_empty() {
            result = result.note("Hilar lesion: increased technical complexity for nephron-sparing surgery");
        }

        Ok(result.recommend(match complexity {
            "Low complexity" => "Favorable anatomy for partial nephrectomy or ablation",
            "Moderate complexity" => "Partial nephrectomy feasible; anticipate moderate technical complexity",
            _ => "High complexity: higher risk of complications with nephron-sparing approaches; consider radical nephrectomy where appropriate",
        }))
    }
}
