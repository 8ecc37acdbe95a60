use std::ops::Bound::{Excluded, Included, Unbounded};
use std::sync::LazyLock;

use radscore_core::error::ValidationError;
use radscore_core::field::FieldSpec;
use radscore_core::format;
use radscore_core::normalize::Normalized;
use radscore_core::result::ScoreResult;

use crate::rubric::bands::{classify, Band};
use crate::rubric::composite::{normalized_score, scale_sum, Scale};
use crate::{Calculator, Specialty};

/// ThyPRO-39: thyroid-specific quality of life questionnaire.
///
/// 39 items rated 0 (not at all) to 4 (completely), grouped into thirteen
/// scales. Each scale and the psychosocial composite are normalised to 0-100.
pub struct ThyPro39;

const ITEM_COUNT: usize = 39;
const MAX_ITEM: u32 = 4;

const SCALES: &[Scale] = &[
    Scale { id: "goiter", name: "Goiter symptoms", items: &[1, 2, 3, 4] },
    Scale { id: "hyperthyroid", name: "Hyperthyroid symptoms", items: &[5, 6, 7, 8] },
    Scale { id: "hypothyroid", name: "Hypothyroid symptoms", items: &[9, 10, 11] },
    Scale { id: "eye", name: "Eye symptoms", items: &[12, 13, 14, 15] },
    Scale { id: "tiredness", name: "Tiredness", items: &[16, 17, 18, 19] },
    Scale { id: "cognitive", name: "Cognitive complaints", items: &[20, 21, 22] },
    Scale { id: "anxiety", name: "Anxiety", items: &[23, 24, 25] },
    Scale { id: "depressivity", name: "Depressivity", items: &[26, 27, 28] },
    Scale { id: "emotional_susceptibility", name: "Emotional susceptibility", items: &[29, 30, 31] },
    Scale { id: "impaired_social_life", name: "Impaired social life", items: &[32, 33, 34] },
    Scale { id: "impaired_daily_life", name: "Impaired daily life", items: &[35, 36] },
    Scale { id: "cosmetic", name: "Cosmetic complaints", items: &[37, 38] },
    Scale { id: "overall_qol", name: "Overall QoL impact", items: &[39] },
];

/// Scales feeding the composite. Physical symptom scales stay out.
const COMPOSITE: &[&str] = &[
    "tiredness",
    "cognitive",
    "anxiety",
    "depressivity",
    "emotional_susceptibility",
    "impaired_social_life",
    "impaired_daily_life",
    "overall_qol",
];

/// A boundary value belongs to the lower tier.
const TIERS: &[Band<&str>] = &[
    Band::new(Unbounded, Included(25.0), "Minimal impact"),
    Band::new(Excluded(25.0), Included(50.0), "Moderate impact"),
    Band::new(Excluded(50.0), Included(75.0), "Significant impact"),
    Band::new(Excluded(75.0), Unbounded, "Severe impact"),
];

/// Normalised score of one scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleScore {
    pub id: &'static str,
    pub name: &'static str,
    pub score: f64,
}

/// Full ThyPRO-39 scoring from a 39-item answer sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ThyProScores {
    pub scales: Vec<ScaleScore>,
    pub composite_sum: u32,
    pub composite_max: u32,
    pub composite: f64,
    pub tier: &'static str,
}

/// Score answers `answers[0]` = item 1 .. `answers[38]` = item 39.
pub fn score_answers(answers: &[u32; ITEM_COUNT]) -> ThyProScores {
    let scales = SCALES
        .iter()
        .map(|scale| ScaleScore {
            id: scale.id,
            name: scale.name,
            score: normalized_score(scale_sum(scale, answers), scale.items.len(), MAX_ITEM),
        })
        .collect();

    let composite_scales = SCALES.iter().filter(|s| COMPOSITE.contains(&s.id));
    let (composite_sum, composite_items) = composite_scales.fold((0u32, 0usize), |(sum, items), scale| {
        (sum + scale_sum(scale, answers), items + scale.items.len())
    });
    let composite = normalized_score(composite_sum, composite_items, MAX_ITEM);
    let tier = classify(TIERS, composite).copied().unwrap_or("Severe impact");

    ThyProScores {
        scales,
        composite_sum,
        composite_max: composite_items as u32 * MAX_ITEM,
        composite,
        tier,
    }
}

impl Calculator for ThyPro39 {
    fn id(&self) -> &str {
        "thypro39"
    }

    fn name(&self) -> &str {
        "ThyPRO-39"
    }

    fn specialty(&self) -> Specialty {
        Specialty::Endocrinology
    }

    fn fields(&self) -> &[FieldSpec] {
        static FIELDS: LazyLock<Vec<FieldSpec>> = LazyLock::new(|| {
            (1..=ITEM_COUNT)
                .map(|n| FieldSpec::integer(&format!("q{n}"), &format!("Question {n}"), 0.0, f64::from(MAX_ITEM)))
                .collect()
        });
        &FIELDS
    }

    fn missing_message(&self, missing: &[String]) -> Option<String> {
        Some(format!("Please answer all {ITEM_COUNT} questions — {} remaining", missing.len()))
    }

    fn compute(&self, values: &Normalized) -> Result<ScoreResult, ValidationError> {
        let mut answers = [0u32; ITEM_COUNT];
        for (i, answer) in answers.iter_mut().enumerate() {
            *answer = values.number(&format!("q{}", i + 1))? as u32;
        }

        let scores = score_answers(&answers);
        let mut result = ScoreResult::new(self.id())
            .with_score(scores.composite)
            .with_category(scores.tier)
            .entry("Composite Score", format::out_of(scores.composite, 100.0, 1))
            .entry("Impact", scores.tier);
        for scale in &scores.scales {
            result = result.entry(scale.name, format::fixed(scale.score, 1));
        }
        result = result.breakdown_line(format!(
            "Composite raw sum {} of {} ({} items)",
            scores.composite_sum,
            scores.composite_max,
            scores.composite_max / MAX_ITEM
        ));

        if let Some(worst) = scores
            .scales
            .iter()
            .filter(|s| s.score > 0.0)
            .max_by(|a, b| a.score.total_cmp(&b.score))
        {
            result = result.note(format!("Highest burden: {} ({})", worst.name, format::fixed(worst.score, 1)));
        }

        Ok(result.recommend(match scores.tier {
            "Minimal impact" => "Minimal thyroid-related quality of life impact; routine follow-up",
            "Moderate impact" => "Moderate impact: review symptom control and address the highest-scoring scales",
            "Significant impact" => "Significant impact: consider treatment optimisation and targeted support",
            _ => "Severe impact: prompt clinical review of treatment and psychosocial support recommended",
        }))
    }
}
