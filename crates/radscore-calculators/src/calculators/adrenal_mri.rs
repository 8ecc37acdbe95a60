use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::{Calculator, Specialty};

/// Adrenal MRI chemical shift imaging: signal intensity index and
/// in-phase to opposed-phase ratio.
pub struct AdrenalChemicalShift;

/// Signal loss strictly above this suggests a lipid-rich adenoma.
const SII_ADENOMA_PCT: f64 = 16.5;

#[derive(Debug, Clone, PartialEq)]
pub struct ChemicalShift {
    pub signal_intensity_index: f64,
    pub chemical_shift_ratio: f64,
}

/// SII = (IP - OP) / IP x 100, CSR = IP / OP.
pub fn chemical_shift(in_phase: f64, opposed_phase: f64) -> Result<ChemicalShift, ValidationError> {
    if in_phase <= 0.0 {
        return Err(ValidationError::out_of_range("in_phase", "In-phase signal intensity must be greater than 0"));
    }
    if opposed_phase <= 0.0 {
        return Err(ValidationError::out_of_range(
            "opposed_phase",
            "Opposed-phase signal intensity must be greater than 0",
        ));
    }
    Ok(ChemicalShift {
        signal_intensity_index: (in_phase - opposed_phase) / in_phase * 100.0,
        chemical_shift_ratio: in_phase / opposed_phase,
    })
}

impl Calculator for AdrenalChemicalShift {
    fn id(&self) -> &str {
        "adrenal_mri"
    }

    fn name(&self) -> &str {
        "Adrenal MRI Chemical Shift"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Radiology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::number("in_phase", "In-phase signal intensity").min(0.0),
                FieldSpec::number("opposed_phase", "Opposed-phase signal intensity").min(0.0),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let cs = chemical_shift(values.number("in_phase")?, values.number("opposed_phase")?)?;
        let adenoma = cs.signal_intensity_index > SII_ADENOMA_PCT;
        let category = if adenoma {
            "Consistent with lipid-rich adenoma"
        } else {
            "Indeterminate"
        };

        let result = ScoreResult::new(self.id())
            .with_score(cs.signal_intensity_index)
            .with_category(category)
            .entry("Signal Intensity Index", format::percent(cs.signal_intensity_index, 1))
            .entry("Chemical Shift Ratio", format::fixed(cs.chemical_shift_ratio, 3))
            .entry("Interpretation", category);

        Ok(result.recommend(if adenoma {
            "Signal loss above 16.5% supports a lipid-rich adenoma"
        } else {
            "No significant signal loss; lipid-poor adenoma not excluded, consider adrenal washout CT"
        }))
    }
}
