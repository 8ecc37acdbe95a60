use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::{Calculator, Specialty};

/// Adrenal vein sampling for primary aldosteronism: selectivity,
/// lateralization and contralateral suppression.
pub struct AdrenalVeinSampling;

const SELECTIVITY_WITH_COSYNTROPIN: f64 = 3.0;
const SELECTIVITY_WITHOUT_COSYNTROPIN: f64 = 2.0;
const LATERALIZING_INDEX: f64 = 4.0;
const BILATERAL_INDEX: f64 = 3.0;
const SUPPRESSION_INDEX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Right,
    Left,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Right => "right",
            Side::Left => "left",
        }
    }
}

/// Cortisol and aldosterone from one sampling site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub cortisol: f64,
    pub aldosterone: f64,
}

impl Sample {
    pub fn ratio(&self) -> f64 {
        self.aldosterone / self.cortisol
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvsIndices {
    pub selectivity_right: f64,
    pub selectivity_left: f64,
    pub selectivity_threshold: f64,
    pub ratio_right: f64,
    pub ratio_left: f64,
    pub ratio_ivc: f64,
    pub lateralization_index: f64,
    pub dominant: Side,
    pub contralateral_suppression: f64,
}

impl AvsIndices {
    pub fn selective(&self) -> bool {
        self.selectivity_right >= self.selectivity_threshold && self.selectivity_left >= self.selectivity_threshold
    }
}

pub fn indices(right: Sample, left: Sample, ivc: Sample, cosyntropin: bool) -> AvsIndices {
    let (ratio_right, ratio_left, ratio_ivc) = (right.ratio(), left.ratio(), ivc.ratio());
    let (dominant, high, low) = if ratio_right >= ratio_left {
        (Side::Right, ratio_right, ratio_left)
    } else {
        (Side::Left, ratio_left, ratio_right)
    };
    AvsIndices {
        selectivity_right: right.cortisol / ivc.cortisol,
        selectivity_left: left.cortisol / ivc.cortisol,
        selectivity_threshold: if cosyntropin {
            SELECTIVITY_WITH_COSYNTROPIN
        } else {
            SELECTIVITY_WITHOUT_COSYNTROPIN
        },
        ratio_right,
        ratio_left,
        ratio_ivc,
        lateralization_index: high / low,
        dominant,
        contralateral_suppression: low / ratio_ivc,
    }
}

const SITES: [(&str, &str); 3] = [("right", "Right adrenal vein"), ("left", "Left adrenal vein"), ("ivc", "IVC")];

impl Calculator for AdrenalVeinSampling {
    fn id(&self) -> &str {
        "avs"
    }

    fn name(&self) -> &str {
        "Adrenal Vein Sampling"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Endocrinology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let mut fields = vec![FieldSpec::flag("cosyntropin", "Cosyntropin stimulation")];
            for (site, label) in SITES {
                fields.push(FieldSpec::number(&format!("{site}_cortisol"), &format!("{label} cortisol")).min(0.0));
                fields.push(FieldSpec::number(&format!("{site}_aldosterone"), &format!("{label} aldosterone")).min(0.0));
            }
            fields
        });
        &FIELDS
    }

    fn offers_csv(&self) -> bool {
        true
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let [right, left, ivc] = [sample(values, "right")?, sample(values, "left")?, sample(values, "ivc")?];
        let avs = indices(right, left, ivc, values.flag("cosyntropin"));

        let mut result = ScoreResult::new(self.id())
            .with_score(avs.lateralization_index)
            .entry("Selectivity Index (Right)", format::fixed(avs.selectivity_right, 2))
            .entry("Selectivity Index (Left)", format::fixed(avs.selectivity_left, 2))
            .entry("A/C Ratio (Right)", format::fixed(avs.ratio_right, 2))
            .entry("A/C Ratio (Left)", format::fixed(avs.ratio_left, 2))
            .entry("A/C Ratio (IVC)", format::fixed(avs.ratio_ivc, 2))
            .entry("Lateralization Index", format::fixed(avs.lateralization_index, 2))
            .entry("Contralateral Suppression Index", format::fixed(avs.contralateral_suppression, 2))
            .breakdown_line(format!(
                "Selectivity threshold {} ({})",
                format::plain(avs.selectivity_threshold),
                if values.flag("cosyntropin") {
                    "with cosyntropin"
                } else {
                    "without cosyntropin"
                }
            ));

        if !avs.selective() {
            return Ok(result
                .with_category("Non-selective sampling")
                .entry("Interpretation", "Non-selective sampling")
                .note("Selectivity index below threshold: adrenal vein cannulation not confirmed")
                .recommend("Lateralization cannot be interpreted; consider repeat sampling"));
        }

        let interpretation = if avs.lateralization_index >= LATERALIZING_INDEX {
            format!("Lateralized to {}", avs.dominant.label())
        } else if avs.lateralization_index < BILATERAL_INDEX {
            "Bilateral (no lateralization)".to_string()
        } else {
            "Indeterminate (gray zone)".to_string()
        };
        result = result
            .with_category(interpretation.clone())
            .entry("Interpretation", interpretation);
        if avs.contralateral_suppression < SUPPRESSION_INDEX {
            result = result.note("Contralateral suppression index < 1 supports unilateral disease");
        }

        Ok(result.recommend(if avs.lateralization_index >= LATERALIZING_INDEX {
            format!(
                "Unilateral aldosterone excess: consider {} adrenalectomy",
                avs.dominant.label()
            )
        } else {
            "No clear lateralization: medical therapy with a mineralocorticoid receptor antagonist".to_string()
        }))
    }
}

fn sample(values: &Normalized, site: &str) -> Result<Sample, ValidationError> {
    let cortisol_id = format!("{site}_cortisol");
    let cortisol = values.number(&cortisol_id)?;
    if cortisol <= 0.0 {
        return Err(ValidationError::out_of_range(&cortisol_id, "Cortisol must be greater than 0"));
    }
    let aldosterone_id = format!("{site}_aldosterone");
    let aldosterone = values.number(&aldosterone_id)?;
    if aldosterone <= 0.0 {
        return Err(ValidationError::out_of_range(&aldosterone_id, "Aldosterone must be greater than 0"));
    }
    Ok(Sample { cortisol, aldosterone })
}
