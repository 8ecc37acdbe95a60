use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::{Calculator, Specialty};

/// Albumin-bilirubin (ALBI) grade of liver function (Johnson 2015).
pub struct Albi;

const BILIRUBIN_MG_DL_TO_UMOL_L: f64 = 17.104;
const ALBUMIN_G_DL_TO_G_L: f64 = 10.0;

struct Grade {
    grade: u8,
    interpretation: &'static str,
}

const GRADES: &[Band<Grade>] = &[
    Band::new(
        Unbounded,
        Included(-2.60),
        Grade {
            grade: 1,
            interpretation: "Best liver function, well compensated",
        },
    ),
    Band::new(
        Excluded(-2.60),
        Included(-1.39),
        Grade {
            grade: 2,
            interpretation: "Intermediate liver function, moderately compensated",
        },
    ),
    Band::new(
        Excluded(-1.39),
        Unbounded,
        Grade {
            grade: 3,
            interpretation: "Worst liver function, poorly compensated",
        },
    ),
];

/// ALBI = 0.66 log10(bilirubin umol/L) - 0.0852 albumin g/L.
pub fn albi_score(bilirubin_umol_l: f64, albumin_g_l: f64) -> f64 {
    0.66 * bilirubin_umol_l.log10() - 0.0852 * albumin_g_l
}

impl Calculator for Albi {
    fn id(&self) -> &str {
        "albi"
    }

    fn name(&self) -> &str {
        "ALBI Grade"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Hepatology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::choice(
                    "units",
                    "Units",
                    &[("si", "SI (albumin g/L, bilirubin µmol/L)"), ("us", "US (albumin g/dL, bilirubin mg/dL)")],
                ),
                FieldSpec::number("albumin", "Serum albumin").min(0.0),
                FieldSpec::number("bilirubin", "Total bilirubin").min(0.0),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let us = values.choice("units")? == "us";
        let albumin = values.number("albumin")?;
        let bilirubin = values.number("bilirubin")?;
        if bilirubin <= 0.0 {
            return Err(ValidationError::out_of_range("bilirubin", "Bilirubin must be greater than 0"));
        }

        let (albumin_g_l, bilirubin_umol_l) = if us {
            (albumin * ALBUMIN_G_DL_TO_G_L, bilirubin * BILIRUBIN_MG_DL_TO_UMOL_L)
        } else {
            (albumin, bilirubin)
        };
        let score = albi_score(bilirubin_umol_l, albumin_g_l);
        let grade = classify(GRADES, score)
            .ok_or_else(|| ValidationError::out_of_range("bilirubin", "ALBI score could not be graded"))?;
        let label = format!("ALBI Grade {}", grade.grade);

        let mut result = ScoreResult::new(self.id())
            .with_score(score)
            .with_category(label.clone())
            .entry("ALBI Score", format::fixed(score, 3))
            .entry("ALBI Grade", label)
            .entry("Interpretation", grade.interpretation);
        if us {
            result = result
                .breakdown_line(format!("Albumin: {} g/L", format::fixed(albumin_g_l, 1)))
                .breakdown_line(format!("Bilirubin: {} µmol/L", format::fixed(bilirubin_umol_l, 1)));
        }
        Ok(result.note("Grade cut-offs: ≤ -2.60 Grade 1, -2.60 to -1.39 Grade 2, > -1.39 Grade 3"))
    }
}
