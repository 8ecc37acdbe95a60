use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::tree::{first_match, Rule};
use crate::{Calculator, Specialty};

/// NI-RADS: Neck Imaging Reporting and Data System for post-treatment
/// head and neck cancer surveillance. Primary site and neck are scored
/// separately; PET uptake modifies the contrast-enhanced CT/MR category.
pub struct NiRads;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Site {
    Primary,
    Neck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    One,
    TwoA,
    TwoB,
    Two,
    Three,
    Four,
}

impl Category {
    fn label(self) -> &'static str {
        match self {
            Category::One => "1",
            Category::TwoA => "2a",
            Category::TwoB => "2b",
            Category::Two => "2",
            Category::Three => "3",
            Category::Four => "4",
        }
    }

    fn is_low_suspicion(self) -> bool {
        matches!(self, Category::TwoA | Category::TwoB | Category::Two)
    }

    fn level(self) -> u8 {
        match self {
            Category::One => 1,
            Category::TwoA | Category::TwoB | Category::Two => 2,
            Category::Three => 3,
            Category::Four => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Uptake {
    None,
    Mild,
    Intense,
    NotPerformed,
}

struct Finding {
    id: &'static str,
    label: &'static str,
    site: Site,
    category: Category,
}

const FINDINGS: &[Finding] = &[
    Finding {
        id: "primary_expected",
        label: "Primary: expected post-treatment change, no abnormal enhancement",
        site: Site::Primary,
        category: Category::One,
    },
    Finding {
        id: "primary_superficial",
        label: "Primary: superficial mucosal non-mass enhancement",
        site: Site::Primary,
        category: Category::TwoA,
    },
    Finding {
        id: "primary_deep",
        label: "Primary: deep ill-defined non-mass soft tissue enhancement",
        site: Site::Primary,
        category: Category::TwoB,
    },
    Finding {
        id: "primary_mass",
        label: "Primary: new or enlarging discrete nodule or mass",
        site: Site::Primary,
        category: Category::Three,
    },
    Finding {
        id: "neck_expected",
        label: "Neck: no residual abnormal or new lymph nodes",
        site: Site::Neck,
        category: Category::One,
    },
    Finding {
        id: "neck_equivocal",
        label: "Neck: residual or enlarging node without new necrosis or extranodal extension",
        site: Site::Neck,
        category: Category::Two,
    },
    Finding {
        id: "neck_suspicious",
        label: "Neck: new or enlarging node with necrosis or extranodal extension",
        site: Site::Neck,
        category: Category::Three,
    },
    Finding {
        id: "primary_definite",
        label: "Primary: definite recurrence (biopsy proven or definite progression)",
        site: Site::Primary,
        category: Category::Four,
    },
    Finding {
        id: "neck_definite",
        label: "Neck: definite recurrence (biopsy proven or definite progression)",
        site: Site::Neck,
        category: Category::Four,
    },
];

struct Surveillance {
    site: Site,
    base: Category,
    uptake: Uptake,
}

enum Adjust {
    Keep,
    To(Category),
    /// Category 3 without uptake drops to the site's low-suspicion category.
    ToLowSuspicion,
}

const PET_RULES: &[Rule<Surveillance, Adjust>] = &[
    Rule {
        when: |s| s.base == Category::Four,
        then: Adjust::Keep,
        reason: "Definite recurrence is not modified by PET",
    },
    Rule {
        when: |s| s.uptake == Uptake::None && s.base.is_low_suspicion(),
        then: Adjust::To(Category::One),
        reason: "No FDG uptake: downgraded to NI-RADS 1",
    },
    Rule {
        when: |s| s.uptake == Uptake::None && s.base == Category::Three,
        then: Adjust::ToLowSuspicion,
        reason: "No FDG uptake despite a discrete lesion: downgraded to low suspicion",
    },
    Rule {
        when: |s| s.uptake == Uptake::Intense && s.base.is_low_suspicion(),
        then: Adjust::To(Category::Three),
        reason: "Intense focal FDG uptake: upgraded to NI-RADS 3",
    },
    Rule {
        when: |_| true,
        then: Adjust::Keep,
        reason: "PET concordant with or not available for the CT/MR finding",
    },
];

impl Calculator for NiRads {
    fn id(&self) -> &str {
        "nirads"
    }

    fn name(&self) -> &str {
        "NI-RADS"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Neuroradiology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            let findings: Vec<(&str, &str)> = FINDINGS.iter().map(|f| (f.id, f.label)).collect();
            vec![
                FieldSpec::choice("site", "Site", &[("primary", "Primary site"), ("neck", "Neck (lymph nodes)")]),
                FieldSpec::choice("finding", "Contrast-enhanced CT/MR finding", &findings),
                FieldSpec::choice(
                    "pet_uptake",
                    "FDG PET uptake",
                    &[
                        ("none", "None"),
                        ("mild", "Mild or diffuse"),
                        ("intense", "Intense focal"),
                        ("not_performed", "PET not performed"),
                    ],
                ),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let site = match values.choice("site")? {
            "primary" => Site::Primary,
            _ => Site::Neck,
        };
        let finding_id = values.choice("finding")?;
        let finding = FINDINGS
            .iter()
            .find(|f| f.id == finding_id)
            .ok_or_else(|| ValidationError::invalid_format("finding", format!("'{finding_id}' is not a NI-RADS finding")))?;
        if finding.site != site {
            return Err(ValidationError::invalid_format(
                "finding",
                format!("'{}' does not apply to the selected site", finding.label),
            ));
        }
        let uptake = match values.choice("pet_uptake")? {
            "none" => Uptake::None,
            "mild" => Uptake::Mild,
            "intense" => Uptake::Intense,
            _ => Uptake::NotPerformed,
        };

        let case = Surveillance {
            site,
            base: finding.category,
            uptake,
        };
        let rule = first_match(PET_RULES, &case)
            .ok_or_else(|| ValidationError::invalid_format("pet_uptake", "No NI-RADS modifier applies"))?;
        let category = match rule.then {
            Adjust::Keep => case.base,
            Adjust::To(c) => c,
            Adjust::ToLowSuspicion => match case.site {
                Site::Primary => Category::TwoB,
                Site::Neck => Category::Two,
            },
        };

        let mut result = ScoreResult::new(self.id())
            .with_score(f64::from(category.level()))
            .with_category(format!("NI-RADS {}", category.label()))
            .entry("NI-RADS Category", category.label())
            .entry("Suspicion", suspicion(category))
            .breakdown_line(format!("CT/MR: {} (NI-RADS {})", finding.label, case.base.label()))
            .breakdown_line(rule.reason);
        if category != case.base {
            result = result.note(format!(
                "PET modified the category from {} to {}",
                case.base.label(),
                category.label()
            ));
        }
        Ok(result.recommend(management(category)))
    }
}

fn suspicion(category: Category) -> &'static str {
    match category.level() {
        1 => "No evidence of recurrence",
        2 => "Low suspicion",
        3 => "High suspicion",
        _ => "Definite recurrence",
    }
}

fn management(category: Category) -> &'static str {
    match category {
        Category::One => "Routine surveillance",
        Category::TwoA => "Direct visual inspection",
        Category::TwoB | Category::Two => "Short-interval follow-up (3 months) or PET",
        Category::Three => "Biopsy",
        Category::Four => "Clinical management",
    }
}
