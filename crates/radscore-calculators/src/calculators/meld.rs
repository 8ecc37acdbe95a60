use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::{Calculator, Specialty};

/// MELD-Na (UNOS 2016): MELD with a serum sodium correction.
pub struct MeldNa;

const LAB_FLOOR: f64 = 1.0;
const CREATININE_CEILING: f64 = 4.0;
const SODIUM_MIN: f64 = 125.0;
const SODIUM_MAX: f64 = 137.0;
const SCORE_MIN: f64 = 6.0;
const SCORE_MAX: f64 = 40.0;
/// The sodium correction only applies above this MELD.
const SODIUM_CORRECTION_ABOVE: f64 = 11.0;

struct MortalityRow {
    risk: &'static str,
    mortality: &'static str,
}

const MORTALITY: &[Band<MortalityRow>] = &[
    Band::new(
        Unbounded,
        Included(9.0),
        MortalityRow {
            risk: "Low risk",
            mortality: "1.9%",
        },
    ),
    Band::new(
        Excluded(9.0),
        Included(19.0),
        MortalityRow {
            risk: "Moderate risk",
            mortality: "6.0%",
        },
    ),
    Band::new(
        Excluded(19.0),
        Included(29.0),
        MortalityRow {
            risk: "High risk",
            mortality: "19.6%",
        },
    ),
    Band::new(
        Excluded(29.0),
        Included(39.0),
        MortalityRow {
            risk: "Very high risk",
            mortality: "52.6%",
        },
    ),
    Band::new(
        Excluded(39.0),
        Unbounded,
        MortalityRow {
            risk: "Critical risk",
            mortality: ">70%",
        },
    ),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Meld {
    /// Creatinine after the floor, ceiling and dialysis rules.
    pub creatinine: f64,
    pub bilirubin: f64,
    pub inr: f64,
    /// Sodium clamped to 125-137; `None` when MELD is too low for the correction.
    pub sodium: Option<f64>,
    pub meld: f64,
    pub meld_na: f64,
}

/// MELD = round(10 x (0.957 ln Cr + 0.378 ln Bili + 1.120 ln INR + 0.643)),
/// capped to 6-40. Above 11 the sodium correction
/// MELD + 1.32 (137 - Na) - 0.033 MELD (137 - Na) is applied and rounded.
pub fn meld_na(creatinine: f64, bilirubin: f64, inr: f64, sodium: f64, dialysis: bool) -> Meld {
    let creatinine = if dialysis {
        CREATININE_CEILING
    } else {
        creatinine.clamp(LAB_FLOOR, CREATININE_CEILING)
    };
    let bilirubin = bilirubin.max(LAB_FLOOR);
    let inr = inr.max(LAB_FLOOR);

    let raw = 10.0 * (0.957 * creatinine.ln() + 0.378 * bilirubin.ln() + 1.120 * inr.ln() + 0.643);
    let meld = raw.round().clamp(SCORE_MIN, SCORE_MAX);

    if meld <= SODIUM_CORRECTION_ABOVE {
        return Meld {
            creatinine,
            bilirubin,
            inr,
            sodium: None,
            meld,
            meld_na: meld,
        };
    }

    let na = sodium.clamp(SODIUM_MIN, SODIUM_MAX);
    let deficit = SODIUM_MAX - na;
    let corrected = meld + 1.32 * deficit - 0.033 * meld * deficit;
    Meld {
        creatinine,
        bilirubin,
        inr,
        sodium: Some(na),
        meld,
        meld_na: corrected.round().clamp(SCORE_MIN, SCORE_MAX),
    }
}

impl Calculator for MeldNa {
    fn id(&self) -> &str {
        "meld_na"
    }

    fn name(&self) -> &str {
        "MELD-Na Score"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Hepatology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::number("creatinine", "Serum creatinine").min(0.0).max(30.0).unit("mg/dL"),
                FieldSpec::number("bilirubin", "Total bilirubin").min(0.0).max(100.0).unit("mg/dL"),
                FieldSpec::number("inr", "INR").min(0.0).max(20.0),
                FieldSpec::number("sodium", "Serum sodium").min(100.0).max(180.0).unit("mEq/L"),
                FieldSpec::flag("dialysis", "Dialysis at least twice in the past week, or 24 hours of CVVHD"),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let creatinine = values.number("creatinine")?;
        let sodium = values.number("sodium")?;
        let dialysis = values.flag("dialysis");
        let m = meld_na(creatinine, values.number("bilirubin")?, values.number("inr")?, sodium, dialysis);

        let row = classify(MORTALITY, m.meld_na)
            .ok_or_else(|| ValidationError::out_of_range("creatinine", "MELD-Na is outside the published table"))?;

        let mut result = ScoreResult::new(self.id())
            .with_score(m.meld_na)
            .with_category(row.risk)
            .entry("MELD-Na", format::fixed(m.meld_na, 0))
            .entry("MELD", format::fixed(m.meld, 0))
            .entry("90-day mortality", row.mortality)
            .entry("Risk Category", row.risk)
            .breakdown_line(format!("Creatinine used: {} mg/dL", format::plain(m.creatinine)))
            .breakdown_line(format!("Bilirubin used: {} mg/dL", format::plain(m.bilirubin)))
            .breakdown_line(format!("INR used: {}", format::plain(m.inr)));
        if let Some(na) = m.sodium {
            result = result.breakdown_line(format!("Sodium used: {} mEq/L", format::plain(na)));
        }

        if dialysis {
            result = result.note("Dialysis: creatinine set to 4.0 mg/dL");
        } else if creatinine > CREATININE_CEILING {
            result = result.note("Creatinine capped at 4.0 mg/dL");
        }
        match m.sodium {
            Some(na) if na != sodium => {
                result = result.note(format!("Sodium bounded to {} mEq/L (range 125-137)", format::plain(na)));
            }
            None => {
                result = result.note("MELD 11 or below: sodium correction not applied");
            }
            _ => {}
        }

        Ok(result.recommend(if m.meld_na >= 15.0 {
            "MELD-Na 15 or above: refer for liver transplant evaluation"
        } else {
            "Below the usual transplant listing threshold; reassess with serial labs"
        }))
    }
}
