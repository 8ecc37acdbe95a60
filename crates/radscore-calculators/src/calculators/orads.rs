use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::tree::{first_match, Rule};
use crate::{Calculator, Specialty};

/// O-RADS US: ovarian-adnexal lesion risk stratification by ultrasound.
///
/// Ascites or peritoneal nodules force Category 5 ahead of every lesion
/// rule. Diameter, color score and papillary projections are only asked
/// for the lesion types whose rules read them.
pub struct ORads;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lesion {
    Physiologic,
    ClassicBenign,
    SimpleCyst,
    UnilocularSmooth,
    UnilocularIrregular,
    MultilocularSmooth,
    MultilocularIrregular,
    UnilocularSolid,
    MultilocularSolid,
    SolidSmooth,
    SolidIrregular,
}

const LESIONS: &[(&str, &str, Lesion)] = &[
    ("physiologic", "Physiologic (follicle or corpus luteum ≤ 3 cm)", Lesion::Physiologic),
    (
        "classic_benign",
        "Classic benign lesion (hemorrhagic cyst, dermoid, endometrioma, paraovarian cyst, peritoneal inclusion cyst, hydrosalpinx)",
        Lesion::ClassicBenign,
    ),
    ("simple_cyst", "Simple cyst", Lesion::SimpleCyst),
    ("unilocular_smooth", "Unilocular cyst, smooth, non-simple", Lesion::UnilocularSmooth),
    ("unilocular_irregular", "Unilocular cyst, irregular inner wall < 3 mm", Lesion::UnilocularIrregular),
    ("multilocular_smooth", "Multilocular cyst, smooth, no solid component", Lesion::MultilocularSmooth),
    ("multilocular_irregular", "Multilocular cyst, irregular inner wall or septation", Lesion::MultilocularIrregular),
    ("unilocular_solid", "Unilocular cyst with solid component", Lesion::UnilocularSolid),
    ("multilocular_solid", "Bilocular or multilocular cyst with solid component", Lesion::MultilocularSolid),
    ("solid_smooth", "Solid, smooth outer contour", Lesion::SolidSmooth),
    ("solid_irregular", "Solid, irregular outer contour", Lesion::SolidIrregular),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Papillary {
    OneToThree,
    FourOrMore,
    NonPapillary,
}

struct OvarianCase {
    peritoneal_disease: bool,
    lesion: Lesion,
    premenopausal: bool,
    diameter_cm: f64,
    color_score: u8,
    papillary: Papillary,
}

const RULES: &[Rule<OvarianCase, u8>] = &[
    Rule {
        when: |c| c.peritoneal_disease,
        then: 5,
        reason: "Ascites and/or peritoneal nodules",
    },
    Rule {
        when: |c| c.lesion == Lesion::Physiologic,
        then: 1,
        reason: "Physiologic finding in a normal ovary",
    },
    Rule {
        when: |c| c.lesion == Lesion::ClassicBenign && c.diameter_cm < 10.0,
        then: 2,
        reason: "Classic benign lesion < 10 cm",
    },
    Rule {
        when: |c| c.lesion == Lesion::ClassicBenign,
        then: 3,
        reason: "Classic benign lesion ≥ 10 cm",
    },
    Rule {
        when: |c| c.lesion == Lesion::SimpleCyst && c.premenopausal && c.diameter_cm <= 3.0,
        then: 1,
        reason: "Simple cyst ≤ 3 cm in a premenopausal patient (follicle)",
    },
    Rule {
        when: |c| c.lesion == Lesion::SimpleCyst && c.diameter_cm < 10.0,
        then: 2,
        reason: "Simple cyst < 10 cm",
    },
    Rule {
        when: |c| c.lesion == Lesion::SimpleCyst,
        then: 3,
        reason: "Simple cyst ≥ 10 cm",
    },
    Rule {
        when: |c| c.lesion == Lesion::UnilocularSmooth && c.diameter_cm < 10.0,
        then: 2,
        reason: "Unilocular smooth non-simple cyst < 10 cm",
    },
    Rule {
        when: |c| c.lesion == Lesion::UnilocularSmooth,
        then: 3,
        reason: "Unilocular smooth non-simple cyst ≥ 10 cm",
    },
    Rule {
        when: |c| c.lesion == Lesion::UnilocularIrregular,
        then: 3,
        reason: "Unilocular cyst with irregular inner wall < 3 mm",
    },
    Rule {
        when: |c| c.lesion == Lesion::MultilocularSmooth && c.diameter_cm < 10.0 && c.color_score < 4,
        then: 3,
        reason: "Multilocular smooth cyst < 10 cm, color score 1-3",
    },
    Rule {
        when: |c| c.lesion == Lesion::MultilocularSmooth,
        then: 4,
        reason: "Multilocular smooth cyst ≥ 10 cm or color score 4",
    },
    Rule {
        when: |c| c.lesion == Lesion::MultilocularIrregular,
        then: 4,
        reason: "Multilocular cyst with irregular inner wall or septation",
    },
    Rule {
        when: |c| c.lesion == Lesion::UnilocularSolid && c.papillary == Papillary::FourOrMore,
        then: 5,
        reason: "Unilocular cyst with ≥ 4 papillary projections",
    },
    Rule {
        when: |c| c.lesion == Lesion::UnilocularSolid,
        then: 4,
        reason: "Unilocular cyst with 1-3 papillary projections or a non-papillary solid component",
    },
    Rule {
        when: |c| c.lesion == Lesion::MultilocularSolid && c.color_score <= 2,
        then: 4,
        reason: "Multilocular cyst with solid component, color score 1-2",
    },
    Rule {
        when: |c| c.lesion == Lesion::MultilocularSolid,
        then: 5,
        reason: "Multilocular cyst with solid component, color score 3-4",
    },
    Rule {
        when: |c| c.lesion == Lesion::SolidSmooth && c.color_score == 1,
        then: 3,
        reason: "Solid smooth lesion, color score 1",
    },
    Rule {
        when: |c| c.lesion == Lesion::SolidSmooth && c.color_score == 4,
        then: 5,
        reason: "Solid smooth lesion, color score 4",
    },
    Rule {
        when: |c| c.lesion == Lesion::SolidSmooth,
        then: 4,
        reason: "Solid smooth lesion, color score 2-3",
    },
    Rule {
        when: |c| c.lesion == Lesion::SolidIrregular,
        then: 5,
        reason: "Solid lesion with irregular outer contour",
    },
];

struct Category {
    label: &'static str,
    risk: &'static str,
    management: &'static str,
}

static CATEGORIES: [Category; 5] = [
    Category {
        label: "Normal ovary",
        risk: "0%",
        management: "No further management",
    },
    Category {
        label: "Almost certainly benign",
        risk: "< 1%",
        management: "No follow-up or ultrasound follow-up depending on lesion type and menopausal status",
    },
    Category {
        label: "Low risk malignancy",
        risk: "1% to < 10%",
        management: "Ultrasound specialist or MRI (O-RADS MRI); management by gynecologist",
    },
    Category {
        label: "Intermediate risk",
        risk: "10% to < 50%",
        management: "Ultrasound specialist or MRI (O-RADS MRI); gynecologist with gynecologic oncologist consultation",
    },
    Category {
        label: "High risk",
        risk: "≥ 50%",
        management: "Referral to gynecologic oncologist",
    },
];

impl Calculator for ORads {
    fn id(&self) -> &str {
        "orads"
    }

    fn name(&self) -> &str {
        "O-RADS US"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Radiology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let lesions: Vec<(&str, &str)> = LESIONS.iter().map(|(id, label, _)| (*id, *label)).collect();
            vec![
                FieldSpec::flag("peritoneal_disease", "Ascites and/or peritoneal nodules"),
                FieldSpec::choice("lesion", "Lesion type", &lesions),
                FieldSpec::choice(
                    "menopausal_status",
                    "Menopausal status",
                    &[("premenopausal", "Premenopausal"), ("postmenopausal", "Postmenopausal")],
                )
                .optional(),
                FieldSpec::number("max_diameter_cm", "Maximum diameter").min(0.0).unit("cm").optional(),
                FieldSpec::choice(
                    "color_score",
                    "Color score",
                    &[
                        ("1", "1 (no flow)"),
                        ("2", "2 (minimal flow)"),
                        ("3", "3 (moderate flow)"),
                        ("4", "4 (very strong flow)"),
                    ],
                )
                .optional(),
                FieldSpec::choice(
                    "papillary",
                    "Solid component",
                    &[
                        ("1_3", "1-3 papillary projections"),
                        ("4_plus", "≥ 4 papillary projections"),
                        ("non_papillary", "Non-papillary solid component"),
                    ],
                )
                .optional(),
            ]
        });
        &FIELDS
    }

    fn missing_message(&self, missing: &[String]) -> Option<String> {
        missing
            .iter()
            .any(|f| f == "lesion")
            .then(|| "Please select the lesion type".to_string())
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let case = build_case(values)?;
        let rule = first_match(RULES, &case)
            .ok_or_else(|| ValidationError::invalid_format("lesion", "No O-RADS rule applies to this lesion"))?;
        let category = rule.then;
        let info = &CATEGORIES[usize::from(category - 1)];

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(category))
            .with_category(format!("O-RADS {category}"))
            .entry("O-RADS Category", format!("O-RADS {category}"))
            .entry("Risk Category", info.label)
            .entry("Risk of Malignancy", info.risk)
            .breakdown_line(rule.reason);
        if case.peritoneal_disease {
            result = result.note("Peritoneal disease overrides the lesion assessment (O-RADS 5)");
        }
        Ok(result.recommend(info.management))
    }
}

const DIAMETER_LESIONS: &[Lesion] = &[
    Lesion::ClassicBenign,
    Lesion::SimpleCyst,
    Lesion::UnilocularSmooth,
    Lesion::MultilocularSmooth,
];
const MENOPAUSE_LESIONS: &[Lesion] = &[Lesion::SimpleCyst];
const COLOR_SCORE_LESIONS: &[Lesion] = &[Lesion::MultilocularSmooth, Lesion::MultilocularSolid, Lesion::SolidSmooth];
const PAPILLARY_LESIONS: &[Lesion] = &[Lesion::UnilocularSolid];

/// Peritoneal disease decides the category on its own, so nothing else is
/// required once it is present.
fn needs_field(peritoneal_disease: bool, lesion: Lesion, types: &[Lesion]) -> bool {
    !peritoneal_disease && types.contains(&lesion)
}

fn build_case(values: &Normalized) -> Result<OvarianCase, ValidationError> {
    let peritoneal_disease = values.flag("peritoneal_disease");
    let lesion_id = values.choice("lesion")?;
    let lesion = LESIONS
        .iter()
        .find(|(id, _, _)| *id == lesion_id)
        .map(|(_, _, lesion)| *lesion)
        .ok_or_else(|| ValidationError::invalid_format("lesion", format!("'{lesion_id}' is not a lesion type")))?;

    let needs = |types: &[Lesion]| needs_field(peritoneal_disease, lesion, types);

    let diameter_cm = if needs(DIAMETER_LESIONS) {
        values.number("max_diameter_cm")?
    } else {
        values.opt_number("max_diameter_cm").unwrap_or(0.0)
    };

    let premenopausal = if needs(MENOPAUSE_LESIONS) {
        values.choice("menopausal_status")? == "premenopausal"
    } else {
        values.opt_choice("menopausal_status") == Some("premenopausal")
    };

    let color_score = if needs(COLOR_SCORE_LESIONS) {
        values
            .choice("color_score")?
            .parse::<u8>()
            .map_err(|_| ValidationError::invalid_format("color_score", "Color score must be 1 to 4"))?
    } else {
        0
    };

    let papillary = if needs(PAPILLARY_LESIONS) {
        match values.choice("papillary")? {
            "4_plus" => Papillary::FourOrMore,
            "1_3" => Papillary::OneToThree,
            _ => Papillary::NonPapillary,
        }
    } else {
        Papillary::NonPapillary
    };

    Ok(OvarianCase {
        peritoneal_disease,
        lesion,
        premenopausal,
        diameter_cm,
        color_score,
        papillary,
    })
}
