use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::{Calculator, Specialty};

/// MR elastography liver stiffness: area-weighted mean of the ROI
/// measurements, staged with the 60 Hz 2D GRE cut-offs.
pub struct Mre;

const STAGES: &[Band<&str>] = &[
    Band::new(Unbounded, Excluded(2.5), "Normal"),
    Band::new(Included(2.5), Excluded(2.9), "Normal or inflammation"),
    Band::new(Included(2.9), Excluded(3.5), "Stage 1-2 fibrosis"),
    Band::new(Included(3.5), Excluded(4.0), "Stage 2-3 fibrosis"),
    Band::new(Included(4.0), Excluded(5.0), "Stage 3-4 fibrosis"),
    Band::new(Included(5.0), Unbounded, "Stage 4 fibrosis or cirrhosis"),
];

/// One complete ROI row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roi {
    pub stiffness_kpa: f64,
    pub area_cm2: f64,
}

/// Σ(stiffness × area) / Σ area, or `None` when no area was measured.
pub fn weighted_mean(rois: &[Roi]) -> Option<f64> {
    let total_area: f64 = rois.iter().map(|r| r.area_cm2).sum();
    if total_area <= 0.0 {
        return None;
    }
    let weighted: f64 = rois.iter().map(|r| r.stiffness_kpa * r.area_cm2).sum();
    Some(weighted / total_area)
}

impl Calculator for Mre {
    fn id(&self) -> &str {
        "mre"
    }

    fn name(&self) -> &str {
        "MR Elastography Liver Stiffness"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Hepatology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![FieldSpec::rows(
                "rois",
                "Regions of interest",
                vec![
                    FieldSpec::number("stiffness_kpa", "Stiffness").min(0.0).max(20.0).unit("kPa"),
                    FieldSpec::number("area_cm2", "Area").min(0.0).unit("cm²"),
                ],
            )]
        });
        &FIELDS
    }

    fn missing_message(&self, _missing: &[String]) -> Option<String> {
        Some("Please enter at least one complete ROI (stiffness and area)".to_string())
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let rois = values
            .rows("rois")
            .iter()
            .map(|row| {
                Ok(Roi {
                    stiffness_kpa: row.number("stiffness_kpa")?,
                    area_cm2: row.number("area_cm2")?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let mean = weighted_mean(&rois)
            .ok_or_else(|| ValidationError::out_of_range("rois", "Total ROI area must be greater than 0 cm²"))?;
        let stage = classify(STAGES, mean).copied().unwrap_or("Stage 4 fibrosis or cirrhosis");

        let total_area: f64 = rois.iter().map(|r| r.area_cm2).sum();
        let lowest = rois.iter().map(|r| r.stiffness_kpa).fold(f64::INFINITY, f64::min);
        let highest = rois.iter().map(|r| r.stiffness_kpa).fold(f64::NEG_INFINITY, f64::max);

        let mut result = ScoreResult::new(self.id())
            .with_score(mean)
            .with_category(stage)
            .entry("Weighted Mean Stiffness", format!("{} kPa", format::fixed(mean, 2)))
            .entry("Fibrosis Stage", stage)
            .entry("ROIs Used", rois.len().to_string())
            .entry("Total ROI Area", format!("{} cm²", format::fixed(total_area, 1)))
            .entry(
                "Stiffness Range",
                format!("{}-{} kPa", format::fixed(lowest, 2), format::fixed(highest, 2)),
            );
        for (i, roi) in rois.iter().enumerate() {
            result = result.breakdown_line(format!(
                "ROI {}: {} kPa over {} cm²",
                i + 1,
                format::fixed(roi.stiffness_kpa, 2),
                format::fixed(roi.area_cm2, 1)
            ));
        }
        if mean >= 5.0 {
            result = result.note("Stiffness ≥ 5 kPa is consistent with cirrhosis");
        }

        Ok(result.recommend(if mean < 2.9 {
            "No significant fibrosis; correlate with clinical risk factors"
        } else if mean < 5.0 {
            "Fibrosis present; hepatology follow-up and risk factor management"
        } else {
            "Cirrhosis range: hepatology referral, HCC and varices surveillance"
        }))
    }
}
