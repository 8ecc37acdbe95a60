use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::{Calculator, Specialty};

/// Prostate volume by the ellipsoid formula, and PSA density.
pub struct ProstateVolume;

const ELLIPSOID_FACTOR: f64 = 0.52;
const PSA_DENSITY_CUTOFF: f64 = 0.15;
const DIMENSIONS: [&str; 3] = ["length_cm", "height_cm", "width_cm"];

/// Volume (cm³) = length x height x width x 0.52.
pub fn ellipsoid_volume(length: f64, height: f64, width: f64) -> f64 {
    length * height * width * ELLIPSOID_FACTOR
}

impl Calculator for ProstateVolume {
    fn id(&self) -> &str {
        "prostate_volume"
    }

    fn name(&self) -> &str {
        "Prostate Volume & PSA Density"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Urology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::number("length_cm", "Length (craniocaudal)").min(0.0).max(20.0).unit("cm"),
                FieldSpec::number("height_cm", "Height (anteroposterior)").min(0.0).max(20.0).unit("cm"),
                FieldSpec::number("width_cm", "Width (transverse)").min(0.0).max(20.0).unit("cm"),
                FieldSpec::number("psa", "PSA").min(0.0).max(10_000.0).unit("ng/mL"),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let mut dims = [0.0; 3];
        for (dim, field) in dims.iter_mut().zip(DIMENSIONS) {
            *dim = values.number(field)?;
            if *dim <= 0.0 {
                return Err(ValidationError::out_of_range(field, "Prostate dimensions must be greater than 0 cm"));
            }
        }
        let psa = values.number("psa")?;

        let volume = ellipsoid_volume(dims[0], dims[1], dims[2]);
        let density = psa / volume;
        let elevated = density >= PSA_DENSITY_CUTOFF;
        let category = if elevated { "Elevated PSA density" } else { "Normal PSA density" };

        let result = ScoreResult::new(self.id())
            .with_score(density)
            .with_category(category)
            .entry("Prostate Volume", format!("{} cm³", format::fixed(volume, 2)))
            .entry("PSA Density", format!("{} ng/mL/cm³", format::fixed(density, 3)))
            .entry("Interpretation", category)
            .breakdown_line(format!(
                "{} x {} x {} cm x 0.52",
                format::plain(dims[0]),
                format::plain(dims[1]),
                format::plain(dims[2])
            ));

        Ok(result.recommend(if elevated {
            "PSA density ≥ 0.15 ng/mL/cm³ raises the likelihood of clinically significant cancer; consider MRI and biopsy"
        } else {
            "PSA density below 0.15 ng/mL/cm³"
        }))
    }
}
