use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::points::{sum_points, PointAxis};
use crate::{Calculator, Specialty};

/// ASPECTS: Alberta Stroke Program Early CT Score.
/// Ten MCA territory regions; one point is subtracted from 10 for each
/// region with early ischemic change.
pub struct Aspects;

const MAX_SCORE: i32 = 10;

const REGIONS: &[PointAxis] = &[
    PointAxis::Flag { field: "caudate", label: "Caudate (C)", points: -1 },
    PointAxis::Flag { field: "lentiform", label: "Lentiform nucleus (L)", points: -1 },
    PointAxis::Flag { field: "internal_capsule", label: "Internal capsule (IC)", points: -1 },
    PointAxis::Flag { field: "insular_ribbon", label: "Insular ribbon (I)", points: -1 },
    PointAxis::Flag { field: "m1", label: "Anterior MCA cortex (M1)", points: -1 },
    PointAxis::Flag { field: "m2", label: "MCA cortex lateral to insular ribbon (M2)", points: -1 },
    PointAxis::Flag { field: "m3", label: "Posterior MCA cortex (M3)", points: -1 },
    PointAxis::Flag { field: "m4", label: "Anterior MCA territory superior to M1 (M4)", points: -1 },
    PointAxis::Flag { field: "m5", label: "Lateral MCA territory superior to M2 (M5)", points: -1 },
    PointAxis::Flag { field: "m6", label: "Posterior MCA territory superior to M3 (M6)", points: -1 },
];

impl Calculator for Aspects {
    fn id(&self) -> &str {
        "aspects"
    }

    fn name(&self) -> &str {
        "ASPECTS"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Neuroradiology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| REGIONS.iter().map(PointAxis::field_spec).collect());
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let sum = sum_points(REGIONS, values)?;
        let score = MAX_SCORE + sum.total;

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(score))
            .with_category(format!("ASPECTS {score}"))
            .entry("ASPECTS", format!("{score} / {MAX_SCORE}"))
            .entry("Regions involved", (-sum.total).to_string());
        for line in sum.lines.iter().filter(|l| l.points != 0) {
            result = result.breakdown_line(format!("{}: early ischemic change", line.axis));
        }

        result = if score >= 8 {
            result.note("ASPECTS 8-10: small infarct core, associated with favorable outcome")
        } else {
            result.note("ASPECTS ≤ 7: larger infarct core, associated with higher risk of poor outcome and hemorrhage")
        };

        let recommendation = if score >= 6 {
            "ASPECTS ≥ 6 meets the imaging threshold for mechanical thrombectomy (AHA/ASA 2019) when other criteria are met"
        } else {
            "ASPECTS < 6: extensive early ischemic change; thrombectomy benefit is less certain and requires individualised selection"
        };
        Ok(result.recommend(recommendation))
    }
}
