use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::tree::{first_match, Rule};
use crate::{Calculator, Specialty};

/// Milan and UCSF criteria for liver transplantation in hepatocellular
/// carcinoma.
pub struct MilanCriteria;

const SIZE_FIELDS: [&str; 3] = ["tumor1_cm", "tumor2_cm", "tumor3_cm"];

/// Tumor burden as entered: `sizes` holds one diameter per counted tumor
/// up to three.
pub struct TumorBurden {
    pub count: u32,
    pub sizes: Vec<f64>,
    pub vascular_invasion: bool,
    pub extrahepatic: bool,
}

impl TumorBurden {
    pub fn largest(&self) -> f64 {
        self.sizes.iter().copied().fold(0.0, f64::max)
    }

    pub fn total(&self) -> f64 {
        self.sizes.iter().sum()
    }

    fn invasive(&self) -> bool {
        self.vascular_invasion || self.extrahepatic
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Within,
    Exceeds,
    Excluded,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Within => "Within",
            Verdict::Exceeds => "Exceeds",
            Verdict::Excluded => "Excluded",
        }
    }
}

const MILAN: &[Rule<TumorBurden, Verdict>] = &[
    Rule {
        when: |b| b.invasive(),
        then: Verdict::Excluded,
        reason: "Macrovascular invasion or extrahepatic disease",
    },
    Rule {
        when: |b| b.count > 3,
        then: Verdict::Exceeds,
        reason: "More than 3 tumors",
    },
    Rule {
        when: |b| b.count == 1 && b.largest() <= 5.0,
        then: Verdict::Within,
        reason: "Single tumor ≤ 5 cm",
    },
    Rule {
        when: |b| b.count > 1 && b.largest() <= 3.0,
        then: Verdict::Within,
        reason: "2-3 tumors, each ≤ 3 cm",
    },
    Rule {
        when: |_| true,
        then: Verdict::Exceeds,
        reason: "Tumor size beyond Milan limits",
    },
];

const UCSF: &[Rule<TumorBurden, Verdict>] = &[
    Rule {
        when: |b| b.invasive(),
        then: Verdict::Excluded,
        reason: "Macrovascular invasion or extrahepatic disease",
    },
    Rule {
        when: |b| b.count > 3,
        then: Verdict::Exceeds,
        reason: "More than 3 tumors",
    },
    Rule {
        when: |b| b.count == 1 && b.largest() <= 6.5,
        then: Verdict::Within,
        reason: "Single tumor ≤ 6.5 cm",
    },
    Rule {
        when: |b| b.count > 1 && b.largest() <= 4.5 && b.total() <= 8.0,
        then: Verdict::Within,
        reason: "2-3 tumors, largest ≤ 4.5 cm and total diameter ≤ 8 cm",
    },
    Rule {
        when: |_| true,
        then: Verdict::Exceeds,
        reason: "Tumor size beyond UCSF limits",
    },
];

/// Milan and UCSF verdicts with the rule that decided each.
pub fn assess(burden: &TumorBurden) -> [(Verdict, &'static str); 2] {
    [MILAN, UCSF].map(|rules| {
        first_match(rules, burden)
            .map(|rule| (rule.then, rule.reason))
            .unwrap_or((Verdict::Exceeds, ""))
    })
}

impl Calculator for MilanCriteria {
    fn id(&self) -> &str {
        "milan"
    }

    fn name(&self) -> &str {
        "Milan / UCSF Criteria"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Hepatology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            vec![
                FieldSpec::integer("tumor_count", "Number of tumors", 1.0, 50.0),
                FieldSpec::number("tumor1_cm", "Largest tumor diameter").min(0.0).max(50.0).unit("cm"),
                FieldSpec::number("tumor2_cm", "Second tumor diameter")
                    .min(0.0)
                    .max(50.0)
                    .unit("cm")
                    .optional(),
                FieldSpec::number("tumor3_cm", "Third tumor diameter")
                    .min(0.0)
                    .max(50.0)
                    .unit("cm")
                    .optional(),
                FieldSpec::flag("vascular_invasion", "Macrovascular invasion"),
                FieldSpec::flag("extrahepatic", "Extrahepatic spread"),
            ]
        });
        &FIELDS
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let count = values.number("tumor_count")? as u32;
        let mut sizes = Vec::with_capacity(3);
        // Beyond three tumors both criteria are exceeded whatever the sizes.
        let needed = if count > 3 { 1 } else { count as usize };
        for field in &SIZE_FIELDS[..needed] {
            let size = values.number(field)?;
            if size <= 0.0 {
                return Err(ValidationError::out_of_range(field, "Tumor diameter must be greater than 0 cm"));
            }
            sizes.push(size);
        }

        let burden = TumorBurden {
            count,
            sizes,
            vascular_invasion: values.flag("vascular_invasion"),
            extrahepatic: values.flag("extrahepatic"),
        };
        let [(milan, milan_reason), (ucsf, ucsf_reason)] = assess(&burden);

        let category = match (milan, ucsf) {
            (Verdict::Excluded, _) => "Not a transplant candidate by tumor criteria",
            (Verdict::Within, _) => "Within Milan criteria",
            (_, Verdict::Within) => "Beyond Milan, within UCSF criteria",
            _ => "Beyond Milan and UCSF criteria",
        };

        let mut result = ScoreResult::new(self.id())
            .with_category(category)
            .entry("Milan Criteria", milan.label())
            .entry("UCSF Criteria", ucsf.label())
            .entry("Tumor Count", count.to_string())
            .entry("Largest Tumor", format!("{} cm", format::plain(burden.largest())));
        if burden.sizes.len() > 1 {
            result = result.entry("Total Diameter", format!("{} cm", format::plain(burden.total())));
        }
        result = result
            .breakdown_line(format!("Milan: {milan_reason}"))
            .breakdown_line(format!("UCSF: {ucsf_reason}"));

        Ok(result.recommend(match (milan, ucsf) {
            (Verdict::Excluded, _) => "Vascular invasion or extrahepatic disease excludes transplantation; consider systemic or locoregional therapy",
            (Verdict::Within, _) => "Eligible for transplant listing under Milan criteria (MELD exception points)",
            (_, Verdict::Within) => "Consider downstaging or transplant at centers accepting expanded UCSF criteria",
            _ => "Consider downstaging with locoregional therapy before transplant evaluation",
        }))
    }
}
