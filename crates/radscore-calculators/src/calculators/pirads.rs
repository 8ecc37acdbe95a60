use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::tree::{first_match, Rule};
use crate::{Calculator, Specialty};

/// PI-RADS v2.1: prostate MRI lesion assessment.
/// The zone picks the dominant sequence; DCE and DWI act only as the
/// narrow tie-breakers the lexicon defines.
pub struct PiRads;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    Peripheral,
    Transition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dce {
    Positive,
    Negative,
    NotPerformed,
}

struct Lesion {
    zone: Zone,
    t2w: u8,
    dwi: u8,
    dce: Dce,
}

enum Assessment {
    /// Category equals the zone's dominant sequence score.
    Dominant,
    Fixed(u8),
}

const RULES: &[Rule<Lesion, Assessment>] = &[
    Rule {
        when: |l| l.zone == Zone::Peripheral && l.dwi == 3 && l.dce == Dce::Positive,
        then: Assessment::Fixed(4),
        reason: "Peripheral zone DWI 3 upgraded to 4 by positive DCE",
    },
    Rule {
        when: |l| l.zone == Zone::Peripheral,
        then: Assessment::Dominant,
        reason: "Peripheral zone: DWI/ADC is the dominant sequence",
    },
    Rule {
        when: |l| l.zone == Zone::Transition && l.t2w == 2 && l.dwi >= 4,
        then: Assessment::Fixed(3),
        reason: "Transition zone T2W 2 upgraded to 3 by DWI ≥ 4",
    },
    Rule {
        when: |l| l.zone == Zone::Transition && l.t2w == 3 && l.dwi == 5,
        then: Assessment::Fixed(4),
        reason: "Transition zone T2W 3 upgraded to 4 by DWI 5",
    },
    Rule {
        when: |l| l.zone == Zone::Transition,
        then: Assessment::Dominant,
        reason: "Transition zone: T2W is the dominant sequence",
    },
];

const SCORES: &[(&str, &str)] = &[("1", "1"), ("2", "2"), ("3", "3"), ("4", "4"), ("5", "5")];

impl Calculator for PiRads {
    fn id(&self) -> &str {
        "pirads"
    }

    fn name(&self) -> &str {
        "PI-RADS v2.1"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Urology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::choice(
                    "zone",
                    "Zone",
                    &[("peripheral", "Peripheral zone"), ("transition", "Transition zone")],
                ),
                FieldSpec::choice("t2w", "T2W score", SCORES),
                FieldSpec::choice("dwi", "DWI score", SCORES),
                FieldSpec::choice(
                    "dce",
                    "DCE",
                    &[
                        ("positive", "Positive"),
                        ("negative", "Negative"),
                        ("not_performed", "Not performed (biparametric)"),
                    ],
                ),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let lesion = Lesion {
            zone: match values.choice("zone")? {
                "peripheral" => Zone::Peripheral,
                _ => Zone::Transition,
            },
            t2w: sequence_score(values, "t2w")?,
            dwi: sequence_score(values, "dwi")?,
            dce: match values.choice("dce")? {
                "positive" => Dce::Positive,
                "negative" => Dce::Negative,
                _ => Dce::NotPerformed,
            },
        };

        let rule = first_match(RULES, &lesion)
            .ok_or_else(|| ValidationError::invalid_format("zone", "No PI-RADS rule applies to this zone"))?;
        let category = match rule.then {
            Assessment::Fixed(c) => c,
            Assessment::Dominant => match lesion.zone {
                Zone::Peripheral => lesion.dwi,
                Zone::Transition => lesion.t2w,
            },
        };

        Ok(ScoreResult::new(self.id())
            .with_score(f64::from(category))
            .with_category(format!("PI-RADS {category}"))
            .entry("PI-RADS Category", category.to_string())
            .entry("Likelihood", likelihood(category))
            .breakdown_line(format!("T2W {}, DWI {}, DCE {}", lesion.t2w, lesion.dwi, dce_label(lesion.dce)))
            .breakdown_line(rule.reason)
            .recommend(recommendation(category)))
    }
}

fn sequence_score(values: &Normalized, field: &str) -> Result<u8, ValidationError> {
    values
        .choice(field)?
        .parse::<u8>()
        .map_err(|_| ValidationError::invalid_format(field, format!("{field} must be a score from 1 to 5")))
}

fn dce_label(dce: Dce) -> &'static str {
    match dce {
        Dce::Positive => "positive",
        Dce::Negative => "negative",
        Dce::NotPerformed => "not performed",
    }
}

fn likelihood(category: u8) -> &'static str {
    match category {
        1 => "Very low (clinically significant cancer is highly unlikely to be present)",
        2 => "Low (clinically significant cancer is unlikely to be present)",
        3 => "Intermediate (the presence of clinically significant cancer is equivocal)",
        4 => "High (clinically significant cancer is likely to be present)",
        _ => "Very high (clinically significant cancer is highly likely to be present)",
    }
}

fn recommendation(category: u8) -> &'static str {
    match category {
        1 | 2 => "Biopsy not routinely recommended; continue clinical surveillance",
        3 => "Consider biopsy or short-interval MRI follow-up guided by PSA density and clinical risk",
        _ => "MRI-targeted biopsy recommended",
    }
}
