use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::{Calculator, Specialty};

/// Radiation dose unit converter: absorbed dose, equivalent dose and
/// activity, each within its own unit system.
pub struct DoseConverter;

/// CT effective dose estimate from CTDIvol and scan length (DLP method).
pub struct CtEffectiveDose;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    AbsorbedDose,
    EquivalentDose,
    Activity,
}

impl Quantity {
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::AbsorbedDose => "Absorbed dose",
            Quantity::EquivalentDose => "Equivalent dose",
            Quantity::Activity => "Activity",
        }
    }
}

/// One unit is `num / den` of the quantity's base unit (Gy, Sv, Bq).
/// Keeping the ratio as two whole numbers makes decimal prefixes exact
/// in both directions.
#[derive(Debug, Clone, Copy)]
pub struct Unit {
    pub id: &'static str,
    pub symbol: &'static str,
    pub quantity: Quantity,
    num: f64,
    den: f64,
}

const fn unit(id: &'static str, symbol: &'static str, quantity: Quantity, num: f64, den: f64) -> Unit {
    Unit {
        id,
        symbol,
        quantity,
        num,
        den,
    }
}

pub const UNITS: &[Unit] = &[
    unit("Gy", "Gy", Quantity::AbsorbedDose, 1.0, 1.0),
    unit("cGy", "cGy", Quantity::AbsorbedDose, 1.0, 100.0),
    unit("mGy", "mGy", Quantity::AbsorbedDose, 1.0, 1_000.0),
    unit("rad", "rad", Quantity::AbsorbedDose, 1.0, 100.0),
    unit("mrad", "mrad", Quantity::AbsorbedDose, 1.0, 100_000.0),
    unit("Sv", "Sv", Quantity::EquivalentDose, 1.0, 1.0),
    unit("mSv", "mSv", Quantity::EquivalentDose, 1.0, 1_000.0),
    unit("uSv", "µSv", Quantity::EquivalentDose, 1.0, 1_000_000.0),
    unit("rem", "rem", Quantity::EquivalentDose, 1.0, 100.0),
    unit("mrem", "mrem", Quantity::EquivalentDose, 1.0, 100_000.0),
    unit("Bq", "Bq", Quantity::Activity, 1.0, 1.0),
    unit("kBq", "kBq", Quantity::Activity, 1_000.0, 1.0),
    unit("MBq", "MBq", Quantity::Activity, 1_000_000.0, 1.0),
    unit("GBq", "GBq", Quantity::Activity, 1_000_000_000.0, 1.0),
    unit("uCi", "µCi", Quantity::Activity, 37_000.0, 1.0),
    unit("mCi", "mCi", Quantity::Activity, 37_000_000.0, 1.0),
    unit("Ci", "Ci", Quantity::Activity, 37_000_000_000.0, 1.0),
];

pub fn find_unit(id: &str) -> Option<&'static Unit> {
    UNITS.iter().find(|u| u.id == id)
}

/// Convert `value` between two units of the same quantity.
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, ValidationError> {
    let from_unit =
        find_unit(from).ok_or_else(|| ValidationError::invalid_format("from_unit", format!("Unknown unit '{from}'")))?;
    let to_unit = find_unit(to).ok_or_else(|| ValidationError::invalid_format("to_unit", format!("Unknown unit '{to}'")))?;
    convert_units(value, from_unit, to_unit)
}

fn convert_units(value: f64, from: &Unit, to: &Unit) -> Result<f64, ValidationError> {
    if from.quantity != to.quantity {
        return Err(ValidationError::invalid_format(
            "to_unit",
            format!(
                "Cannot convert {} ({}) to {} ({})",
                from.symbol,
                from.quantity.label().to_lowercase(),
                to.symbol,
                to.quantity.label().to_lowercase()
            ),
        ));
    }
    if from.id == to.id {
        return Ok(value);
    }
    Ok(value * (from.num * to.den) / (from.den * to.num))
}

impl Calculator for DoseConverter {
    fn id(&self) -> &str {
        "radiation_units"
    }

    fn name(&self) -> &str {
        "Radiation Dose Unit Converter"
    }

    fn specialty(&self) -> Specialty {
        Specialty::RadiationSafety
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let units: Vec<(&str, &str)> = UNITS.iter().map(|u| (u.id, u.symbol)).collect();
            vec![
                FieldSpec::number("value", "Value").min(0.0),
                FieldSpec::choice("from_unit", "From unit", &units),
                FieldSpec::choice("to_unit", "To unit", &units),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let value = values.number("value")?;
        let from = lookup(values, "from_unit")?;
        let to = lookup(values, "to_unit")?;
        let converted = convert_units(value, from, to)?;

        let mut result = ScoreResult::new(self.id())
            .with_score(converted)
            .with_category(to.quantity.label())
            .entry(
                "Result",
                format!("{} {} = {} {}", format::plain(value), from.symbol, format::plain(converted), to.symbol),
            );
        for other in UNITS.iter().filter(|u| u.quantity == from.quantity) {
            result = result.entry(other.symbol, format::plain(convert_units(value, from, other)?));
        }
        if from.quantity == Quantity::AbsorbedDose {
            result = result.note("Gy to Sv requires radiation and tissue weighting factors; not a unit conversion");
        }
        Ok(result)
    }
}

fn lookup(values: &Normalized, field: &str) -> Result<&'static Unit, ValidationError> {
    let id = values.choice(field)?;
    find_unit(id).ok_or_else(|| ValidationError::invalid_format(field, format!("Unknown unit '{id}'")))
}

/// Body region k-factors (mSv per mGy·cm), AAPM Report 96, by age group:
/// newborn, 1 year, 5 years, 10 years, adult.
const K_FACTORS: &[(&str, &str, [f64; 5])] = &[
    ("head", "Head", [0.011, 0.0067, 0.0040, 0.0032, 0.0021]),
    ("head_neck", "Head and neck", [0.013, 0.0085, 0.0057, 0.0042, 0.0031]),
    ("neck", "Neck", [0.017, 0.012, 0.011, 0.0079, 0.0059]),
    ("chest", "Chest", [0.039, 0.026, 0.018, 0.013, 0.014]),
    ("abdomen_pelvis", "Abdomen and pelvis", [0.049, 0.030, 0.020, 0.015, 0.015]),
    ("trunk", "Trunk (chest, abdomen and pelvis)", [0.044, 0.028, 0.019, 0.014, 0.015]),
];

const AGE_GROUPS: &[(&str, &str)] = &[
    ("newborn", "Newborn"),
    ("1y", "1 year"),
    ("5y", "5 years"),
    ("10y", "10 years"),
    ("adult", "Adult"),
];

const ADULT: usize = 4;

/// Average natural background, mSv per year.
const BACKGROUND_MSV_PER_YEAR: f64 = 3.0;

/// Effective dose breakdown for one CT acquisition.
#[derive(Debug, Clone, PartialEq)]
pub struct CtDose {
    pub dlp: f64,
    pub k_factor: f64,
    pub age_multiplier: f64,
    pub effective_dose_msv: f64,
}

/// E = CTDIvol x scan length x adult k-factor x age multiplier.
pub fn ct_effective_dose(ctdivol_mgy: f64, length_cm: f64, region: &str, age_group: &str) -> Result<CtDose, ValidationError> {
    let (_, _, k) = K_FACTORS
        .iter()
        .find(|(id, _, _)| *id == region)
        .ok_or_else(|| ValidationError::invalid_format("region", format!("Unknown body region '{region}'")))?;
    let age = AGE_GROUPS
        .iter()
        .position(|(id, _)| *id == age_group)
        .ok_or_else(|| ValidationError::invalid_format("age_group", format!("Unknown age group '{age_group}'")))?;

    let dlp = ctdivol_mgy * length_cm;
    let k_factor = k[ADULT];
    let age_multiplier = k[age] / k[ADULT];
    Ok(CtDose {
        dlp,
        k_factor,
        age_multiplier,
        effective_dose_msv: dlp * k_factor * age_multiplier,
    })
}

impl Calculator for CtEffectiveDose {
    fn id(&self) -> &str {
        "ct_effective_dose"
    }

    fn name(&self) -> &str {
        "CT Effective Dose"
    }

    fn specialty(&self) -> Specialty {
        Specialty::RadiationSafety
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let regions: Vec<(&str, &str)> = K_FACTORS.iter().map(|(id, label, _)| (*id, *label)).collect();
            vec![
                FieldSpec::number("ctdivol", "CTDIvol").min(0.0).unit("mGy"),
                FieldSpec::number("scan_length_cm", "Scan length").min(0.0).unit("cm"),
                FieldSpec::choice("region", "Body region", &regions),
                FieldSpec::choice("age_group", "Age group", AGE_GROUPS),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let dose = ct_effective_dose(
            values.number("ctdivol")?,
            values.number("scan_length_cm")?,
            values.choice("region")?,
            values.choice("age_group")?,
        )?;

        let years = dose.effective_dose_msv / BACKGROUND_MSV_PER_YEAR;
        Ok(ScoreResult::new(self.id())
            .with_score(dose.effective_dose_msv)
            .entry("Effective Dose", format!("{} mSv", format::fixed(dose.effective_dose_msv, 2)))
            .entry("DLP", format!("{} mGy·cm", format::fixed(dose.dlp, 1)))
            .entry("k-factor", format!("{} mSv/(mGy·cm)", format::plain(dose.k_factor)))
            .entry("Age multiplier", format::fixed(dose.age_multiplier, 2))
            .note(format!(
                "Equivalent to about {} years of natural background radiation ({} mSv/year)",
                format::fixed(years, 1),
                format::plain(BACKGROUND_MSV_PER_YEAR)
            ))
            .note("Effective dose is a population risk metric, not an individual patient dose"))
    }
}
