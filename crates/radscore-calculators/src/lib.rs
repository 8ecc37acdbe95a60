//! radscore-calculators
//!
//! Scoring engines for the radiology, urology and hepatology reference
//! calculators. Each calculator declares its form fields and maps the
//! normalized input onto a published rubric. Pure functions, no I/O.

pub mod calculators;
pub mod error;
pub mod rubric;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use radscore_core::error::{ValidationError, ValidationKind};
use radscore_core::field::FieldSpec;
use radscore_core::input::CalculatorInput;
use radscore_core::normalize::{normalize, Normalized, NumberLocale};
use radscore_core::result::ScoreResult;

use error::CalcError;

/// Clinical area a calculator is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Specialty {
    Radiology,
    Neuroradiology,
    Urology,
    Hepatology,
    Endocrinology,
    Trauma,
    Nephrology,
    RadiationSafety,
}

impl Specialty {
    pub fn label(&self) -> &'static str {
        match self {
            Specialty::Radiology => "Radiology",
            Specialty::Neuroradiology => "Neuroradiology",
            Specialty::Urology => "Urology",
            Specialty::Hepatology => "Hepatology",
            Specialty::Endocrinology => "Endocrinology",
            Specialty::Trauma => "Trauma",
            Specialty::Nephrology => "Nephrology",
            Specialty::RadiationSafety => "Radiation Safety",
        }
    }
}

/// Trait implemented by each calculator.
pub trait Calculator: Send + Sync {
    /// Unique identifier (e.g., "tirads", "mehran").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "ACR TI-RADS").
    fn name(&self) -> &str;

    fn specialty(&self) -> Specialty;

    /// The form fields this calculator reads.
    fn fields(&self) -> &[FieldSpec];

    /// Apply the rubric to already-normalized input.
    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError>;

    /// Override the generic "please complete ..." wording for missing fields.
    fn missing_message(&self, _missing: &[String]) -> Option<String> {
        None
    }

    /// Whether the result is offered as a CSV download.
    fn offers_csv(&self) -> bool {
        false
    }

    /// Normalize `input` and compute. Missing or malformed input never
    /// reaches [`Calculator::compute`].
    fn evaluate(&self, input: &CalculatorInput, locale: NumberLocale) -> Result<ScoreResult, CalcError> {
        let values = normalize(self.fields(), input, locale).map_err(|e| {
            if e.kind == ValidationKind::MissingInput
                && let Some(message) = self.missing_message(&e.fields)
            {
                return e.with_message(message);
            }
            e
        })?;

        let result = self.compute(&values).map_err(|e| {
            tracing::debug!(calculator = self.id(), error = %e, "rubric rejected input");
            e
        })?;

        tracing::debug!(
            calculator = self.id(),
            score = ?result.score,
            category = ?result.category,
            "calculation complete"
        );
        Ok(result)
    }
}

/// Return all registered calculators.
pub fn all_calculators() -> Vec<Box<dyn Calculator>> {
    vec![
        Box::new(calculators::tirads::TiRads),
        Box::new(calculators::pirads::PiRads),
        Box::new(calculators::orads::ORads),
        Box::new(calculators::nirads::NiRads),
        Box::new(calculators::aspects::Aspects),
        Box::new(calculators::aast::Aast),
        Box::new(calculators::renal::RenalNephrometry),
        Box::new(calculators::ipss::Ipss),
        Box::new(calculators::shim::Shim),
        Box::new(calculators::prostate::ProstateVolume),
        Box::new(calculators::mehran::Mehran),
        Box::new(calculators::mre::Mre),
        Box::new(calculators::child_pugh::ChildPugh),
        Box::new(calculators::meld::MeldNa),
        Box::new(calculators::albi::Albi),
        Box::new(calculators::milan::MilanCriteria),
        Box::new(calculators::adrenal::AdrenalWashout),
        Box::new(calculators::adrenal_mri::AdrenalChemicalShift),
        Box::new(calculators::avs::AdrenalVeinSampling),
        Box::new(calculators::thypro::ThyPro39),
        Box::new(calculators::radiation::DoseConverter),
        Box::new(calculators::radiation::CtEffectiveDose),
    ]
}

/// Look up a calculator by ID.
pub fn get_calculator(id: &str) -> Option<Box<dyn Calculator>> {
    all_calculators().into_iter().find(|c| c.id() == id)
}

/// Look up and run a calculator in one call.
pub fn evaluate(id: &str, input: &CalculatorInput, locale: NumberLocale) -> Result<ScoreResult, CalcError> {
    let calculator = get_calculator(id).ok_or_else(|| CalcError::UnknownCalculator(id.to_string()))?;
    calculator.evaluate(input, locale)
}
