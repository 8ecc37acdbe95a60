use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::{Calculator, Specialty};

/// Adrenal CT washout: absolute and relative percentage washout from
/// unenhanced, portal venous and 15-minute delayed attenuation.
pub struct AdrenalWashout;

const ABSOLUTE_ADENOMA_PCT: f64 = 60.0;
const RELATIVE_ADENOMA_PCT: f64 = 40.0;
const LIPID_RICH_HU: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Washout {
    /// Needs the unenhanced phase.
    pub absolute_pct: Option<f64>,
    pub relative_pct: f64,
}

/// APW = (E - D) / (E - U) x 100, RPW = (E - D) / E x 100.
pub fn washout(unenhanced: Option<f64>, enhanced: f64, delayed: f64) -> Result<Washout, ValidationError> {
    if enhanced <= 0.0 {
        return Err(ValidationError::out_of_range(
            "enhanced_hu",
            "Enhanced attenuation must be above 0 HU to calculate washout",
        ));
    }
    let absolute_pct = match unenhanced {
        Some(u) if enhanced <= u => {
            return Err(ValidationError::out_of_range(
                "enhanced_hu",
                "Enhanced attenuation must exceed unenhanced attenuation to calculate absolute washout",
            ));
        }
        Some(u) => Some((enhanced - delayed) / (enhanced - u) * 100.0),
        None => None,
    };
    Ok(Washout {
        absolute_pct,
        relative_pct: (enhanced - delayed) / enhanced * 100.0,
    })
}

impl Calculator for AdrenalWashout {
    fn id(&self) -> &str {
        "adrenal"
    }

    fn name(&self) -> &str {
        "Adrenal CT Washout"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Radiology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::number("unenhanced_hu", "Unenhanced attenuation")
                    .min(-1000.0)
                    .max(3000.0)
                    .unit("HU")
                    .optional(),
                FieldSpec::number("enhanced_hu", "Portal venous attenuation")
                    .min(-1000.0)
                    .max(3000.0)
                    .unit("HU"),
                FieldSpec::number("delayed_hu", "15-minute delayed attenuation")
                    .min(-1000.0)
                    .max(3000.0)
                    .unit("HU"),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let unenhanced = values.opt_number("unenhanced_hu");
        let w = washout(unenhanced, values.number("enhanced_hu")?, values.number("delayed_hu")?)?;

        let lipid_rich = unenhanced.is_some_and(|u| u <= LIPID_RICH_HU);
        let absolute_adenoma = w.absolute_pct.is_some_and(|a| a >= ABSOLUTE_ADENOMA_PCT);
        let relative_adenoma = w.relative_pct >= RELATIVE_ADENOMA_PCT;
        // With an unenhanced phase both washout thresholds must be met.
        let washout_adenoma = if w.absolute_pct.is_some() {
            absolute_adenoma && relative_adenoma
        } else {
            relative_adenoma
        };
        let adenoma = lipid_rich || washout_adenoma;
        let category = if adenoma { "Consistent with adenoma" } else { "Indeterminate" };

        let mut result = ScoreResult::new(self.id())
            .with_score(w.absolute_pct.unwrap_or(w.relative_pct))
            .with_category(category);
        result = match w.absolute_pct {
            Some(a) => result.entry("Absolute Washout", format::percent(a, 1)),
            None => result.entry("Absolute Washout", "Requires unenhanced attenuation"),
        };
        result = result
            .entry("Relative Washout", format::percent(w.relative_pct, 1))
            .entry("Interpretation", category);

        if lipid_rich {
            result = result.note("Unenhanced attenuation ≤10 HU indicates lipid-rich adenoma");
        }
        if absolute_adenoma {
            result = result.note("Absolute washout ≥60% indicates benign adenoma");
        }
        if relative_adenoma {
            result = result.note("Relative washout ≥40% indicates benign adenoma");
        }

        Ok(result.recommend(if adenoma {
            "Findings support a benign adenoma; no further imaging needed if clinically and biochemically concordant"
        } else {
            "Washout below adenoma thresholds; consider biochemical work-up, MRI or follow-up imaging"
        }))
    }
}
