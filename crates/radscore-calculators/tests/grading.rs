//! Graded findings and decision trees: AAST, PI-RADS, O-RADS and NI-RADS.

use radscore_calculators::error::CalcError;
use radscore_calculators::evaluate;
use radscore_core::error::{ValidationError, ValidationKind};
use radscore_core::input::CalculatorInput;
use radscore_core::normalize::NumberLocale;
use radscore_core::result::ScoreResult;

fn run(id: &str, input: &CalculatorInput) -> ScoreResult {
    evaluate(id, input, NumberLocale::Auto).unwrap()
}

fn run_err(id: &str, input: &CalculatorInput) -> ValidationError {
    match evaluate(id, input, NumberLocale::Auto).unwrap_err() {
        CalcError::Validation(e) => e,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

// AAST

fn injury(organ: &str, findings: &[&str], multiple: bool) -> CalculatorInput {
    CalculatorInput::new()
        .with("organ", organ)
        .with_list("findings", findings)
        .with("multiple_injuries", multiple)
}

#[test]
fn aast_grade_is_most_severe_finding() {
    let result = run("aast", &injury("spleen", &["spleen_subcapsular_lt10", "spleen_laceration_1_3"], false));
    assert_eq!(result.score, Some(2.0));
    assert_eq!(result.value_of("AAST Grade"), Some("Grade II"));
    assert_eq!(result.value_of("Organ"), Some("Spleen"));
    assert_eq!(result.breakdown.len(), 2);
}

#[test]
fn aast_multiple_injuries_advance_low_grades() {
    let result = run("aast", &injury("spleen", &["spleen_subcapsular_lt10"], true));
    assert_eq!(result.category.as_deref(), Some("Grade II"));
    assert!(result.notes[0].contains("advanced from Grade I to Grade II"));

    let result = run("aast", &injury("kidney", &["kidney_laceration_lt1"], true));
    assert_eq!(result.category.as_deref(), Some("Grade III"));
}

#[test]
fn aast_multiple_injuries_never_exceed_grade_three() {
    let result = run("aast", &injury("spleen", &["spleen_subcapsular_gt50"], true));
    assert_eq!(result.category.as_deref(), Some("Grade III"));
    assert_eq!(result.notes[0], "Multiple injuries: no advancement at Grade III or above");

    let result = run("aast", &injury("liver", &["liver_disruption_25_75"], true));
    assert_eq!(result.category.as_deref(), Some("Grade IV"));
    assert_eq!(result.notes[0], "Multiple injuries: no advancement at Grade III or above");

    let result = run("aast", &injury("liver", &["liver_avulsion"], true));
    assert_eq!(result.category.as_deref(), Some("Grade VI"));
}

#[test]
fn aast_rejects_findings_from_another_organ() {
    let err = run_err("aast", &injury("spleen", &["liver_avulsion"], false));
    assert_eq!(err.kind, ValidationKind::InvalidFormat);
    assert_eq!(err.fields, vec!["findings"]);
}

#[test]
fn aast_missing_messages() {
    let err = run_err("aast", &CalculatorInput::new().with_list("findings", &["kidney_contusion"]));
    assert_eq!(err.message, "Please select the injured organ");

    let err = run_err("aast", &CalculatorInput::new().with("organ", "kidney"));
    assert_eq!(err.message, "Please select at least one injury finding");
}

// PI-RADS

fn prostate(zone: &str, t2w: u8, dwi: u8, dce: &str) -> CalculatorInput {
    CalculatorInput::new()
        .with("zone", zone)
        .with("t2w", f64::from(t2w))
        .with("dwi", f64::from(dwi))
        .with("dce", dce)
}

#[test]
fn pirads_peripheral_zone_follows_dwi() {
    assert_eq!(run("pirads", &prostate("peripheral", 5, 2, "negative")).score, Some(2.0));
    assert_eq!(run("pirads", &prostate("peripheral", 1, 5, "negative")).score, Some(5.0));
}

#[test]
fn pirads_dce_upgrades_peripheral_three_only() {
    let result = run("pirads", &prostate("peripheral", 3, 3, "positive"));
    assert_eq!(result.category.as_deref(), Some("PI-RADS 4"));
    assert_eq!(run("pirads", &prostate("peripheral", 3, 4, "positive")).score, Some(4.0));
    assert_eq!(run("pirads", &prostate("peripheral", 3, 3, "not_performed")).score, Some(3.0));
}

#[test]
fn pirads_transition_zone_follows_t2w_with_dwi_upgrades() {
    assert_eq!(run("pirads", &prostate("transition", 4, 1, "positive")).score, Some(4.0));
    assert_eq!(run("pirads", &prostate("transition", 2, 4, "negative")).score, Some(3.0));
    assert_eq!(run("pirads", &prostate("transition", 2, 3, "negative")).score, Some(2.0));
    assert_eq!(run("pirads", &prostate("transition", 3, 5, "negative")).score, Some(4.0));
    assert_eq!(run("pirads", &prostate("transition", 3, 4, "positive")).score, Some(3.0));
}

#[test]
fn pirads_rejects_scores_outside_one_to_five() {
    let err = run_err("pirads", &prostate("peripheral", 3, 6, "negative"));
    assert_eq!(err.kind, ValidationKind::InvalidFormat);
    assert_eq!(err.fields, vec!["dwi"]);
}

// O-RADS

#[test]
fn orads_peritoneal_disease_overrides_lesion() {
    let input = CalculatorInput::new()
        .with("peritoneal_disease", true)
        .with("lesion", "simple_cyst");
    let result = run("orads", &input);
    assert_eq!(result.category.as_deref(), Some("O-RADS 5"));
    assert_eq!(result.value_of("Risk of Malignancy"), Some("≥ 50%"));
    assert!(!result.notes.is_empty());
}

#[test]
fn orads_simple_cyst_depends_on_size_and_menopause() {
    let cyst = |status: &str, size: f64| {
        CalculatorInput::new()
            .with("lesion", "simple_cyst")
            .with("menopausal_status", status)
            .with("max_diameter_cm", size)
    };
    assert_eq!(run("orads", &cyst("premenopausal", 2.5)).score, Some(1.0));
    assert_eq!(run("orads", &cyst("postmenopausal", 2.5)).score, Some(2.0));
    assert_eq!(run("orads", &cyst("postmenopausal", 10.0)).score, Some(3.0));
}

#[test]
fn orads_solid_lesions_use_color_score() {
    let solid = |score: &str| {
        CalculatorInput::new()
            .with("lesion", "solid_smooth")
            .with("color_score", score)
    };
    assert_eq!(run("orads", &solid("1")).score, Some(3.0));
    assert_eq!(run("orads", &solid("3")).score, Some(4.0));
    assert_eq!(run("orads", &solid("4")).score, Some(5.0));

    let irregular = CalculatorInput::new().with("lesion", "solid_irregular");
    assert_eq!(run("orads", &irregular).score, Some(5.0));
}

#[test]
fn orads_papillary_projections() {
    let cyst = |papillary: &str| {
        CalculatorInput::new()
            .with("lesion", "unilocular_solid")
            .with("papillary", papillary)
    };
    assert_eq!(run("orads", &cyst("4_plus")).score, Some(5.0));
    assert_eq!(run("orads", &cyst("1_3")).score, Some(4.0));
}

#[test]
fn orads_conditionally_required_fields() {
    let err = run_err("orads", &CalculatorInput::new().with("lesion", "classic_benign"));
    assert_eq!(err.kind, ValidationKind::MissingInput);
    assert_eq!(err.fields, vec!["max_diameter_cm"]);

    let err = run_err("orads", &CalculatorInput::new().with("peritoneal_disease", false));
    assert_eq!(err.message, "Please select the lesion type");
}

// NI-RADS

fn surveillance(site: &str, finding: &str, pet: &str) -> CalculatorInput {
    CalculatorInput::new()
        .with("site", site)
        .with("finding", finding)
        .with("pet_uptake", pet)
}

#[test]
fn nirads_base_category_without_pet() {
    let result = run("nirads", &surveillance("primary", "primary_superficial", "not_performed"));
    assert_eq!(result.category.as_deref(), Some("NI-RADS 2a"));
    assert_eq!(result.value_of("Suspicion"), Some("Low suspicion"));
    assert!(result.notes.is_empty());
}

#[test]
fn nirads_absent_uptake_downgrades() {
    let result = run("nirads", &surveillance("primary", "primary_deep", "none"));
    assert_eq!(result.category.as_deref(), Some("NI-RADS 1"));
    assert_eq!(result.notes.len(), 1);

    let result = run("nirads", &surveillance("primary", "primary_mass", "none"));
    assert_eq!(result.category.as_deref(), Some("NI-RADS 2b"));

    let result = run("nirads", &surveillance("neck", "neck_suspicious", "none"));
    assert_eq!(result.category.as_deref(), Some("NI-RADS 2"));
}

#[test]
fn nirads_intense_uptake_upgrades_low_suspicion() {
    let result = run("nirads", &surveillance("neck", "neck_equivocal", "intense"));
    assert_eq!(result.category.as_deref(), Some("NI-RADS 3"));
    assert_eq!(result.recommendation.as_deref(), Some("Biopsy"));
}

#[test]
fn nirads_definite_recurrence_is_never_modified() {
    let result = run("nirads", &surveillance("neck", "neck_definite", "none"));
    assert_eq!(result.category.as_deref(), Some("NI-RADS 4"));
    assert!(result.notes.is_empty());
}

#[test]
fn nirads_finding_must_match_site() {
    let err = run_err("nirads", &surveillance("neck", "primary_mass", "none"));
    assert_eq!(err.kind, ValidationKind::InvalidFormat);
    assert_eq!(err.fields, vec!["finding"]);
}
