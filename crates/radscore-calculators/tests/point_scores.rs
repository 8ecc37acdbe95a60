//! Additive point rubrics: TI-RADS, Mehran, ASPECTS and RENAL.

use radscore_calculators::error::CalcError;
use radscore_calculators::evaluate;
use radscore_core::error::ValidationKind;
use radscore_core::input::CalculatorInput;
use radscore_core::normalize::NumberLocale;
use radscore_core::result::ScoreResult;

fn run(id: &str, input: &CalculatorInput) -> ScoreResult {
    evaluate(id, input, NumberLocale::Auto).unwrap()
}

fn run_err(id: &str, input: &CalculatorInput) -> radscore_core::error::ValidationError {
    match evaluate(id, input, NumberLocale::Auto).unwrap_err() {
        CalcError::Validation(e) => e,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

// TI-RADS

fn nodule(composition: &str, echogenicity: &str, shape: &str, margin: &str, foci: &[&str]) -> CalculatorInput {
    CalculatorInput::new()
        .with("composition", composition)
        .with("echogenicity", echogenicity)
        .with("shape", shape)
        .with("margin", margin)
        .with_list("echogenic_foci", foci)
}

#[test]
fn tirads_solid_hypoechoic_is_tr4() {
    let result = run("tirads", &nodule("solid", "hypoechoic", "wider_than_tall", "smooth", &["none"]));
    assert_eq!(result.score, Some(4.0));
    assert_eq!(result.category.as_deref(), Some("TR4"));
    assert_eq!(result.value_of("Total Points"), Some("4 points"));
    assert_eq!(result.value_of("ACR TI-RADS Category"), Some("TR4 (Moderately suspicious)"));
    assert_eq!(result.breakdown.len(), 5);
}

#[test]
fn tirads_buckets() {
    let cases = [
        (nodule("cystic", "anechoic", "wider_than_tall", "smooth", &["none"]), 0.0, "TR1"),
        (nodule("mixed", "anechoic", "wider_than_tall", "smooth", &["none"]), 1.0, "TR1"),
        (nodule("solid", "anechoic", "wider_than_tall", "smooth", &["none"]), 2.0, "TR2"),
        (nodule("solid", "hyperechoic_isoechoic", "wider_than_tall", "smooth", &["none"]), 3.0, "TR3"),
        (nodule("solid", "very_hypoechoic", "wider_than_tall", "smooth", &["macrocalcifications"]), 6.0, "TR4"),
        (nodule("solid", "hypoechoic", "wider_than_tall", "lobulated_irregular", &["macrocalcifications"]), 7.0, "TR5"),
    ];
    for (input, points, level) in cases {
        let result = run("tirads", &input);
        assert_eq!(result.score, Some(points));
        assert_eq!(result.category.as_deref(), Some(level), "{points} points");
    }
}

#[test]
fn tirads_echogenic_foci_are_additive() {
    let result = run(
        "tirads",
        &nodule("solid", "very_hypoechoic", "taller_than_wide", "extrathyroidal_extension", &["macrocalcifications", "peripheral", "punctate"]),
    );
    // 2 + 3 + 3 + 3 + (1 + 2 + 3)
    assert_eq!(result.score, Some(17.0));
    assert_eq!(result.category.as_deref(), Some("TR5"));
}

#[test]
fn tirads_spongiform_forces_tr1() {
    let result = run("tirads", &nodule("spongiform", "hypoechoic", "wider_than_tall", "smooth", &["none"]));
    assert_eq!(result.score, Some(2.0));
    assert_eq!(result.category.as_deref(), Some("TR1"));
    assert!(result.notes.iter().any(|n| n.contains("Spongiform")));
}

#[test]
fn tirads_size_drives_fna_advice() {
    let base = nodule("solid", "hypoechoic", "wider_than_tall", "smooth", &["none"]);

    let fna = run("tirads", &base.clone().with("max_diameter_cm", 1.6));
    assert!(fna.recommendation.unwrap().contains("FNA recommended"));

    let follow = run("tirads", &base.clone().with("max_diameter_cm", "1,2"));
    assert!(follow.recommendation.unwrap().contains("follow-up"));

    let small = run("tirads", &base.with("max_diameter_cm", 0.5));
    assert!(small.recommendation.unwrap().contains("below follow-up threshold"));
}

#[test]
fn tirads_requires_echogenic_foci() {
    let err = run_err("tirads", &nodule("solid", "hypoechoic", "wider_than_tall", "smooth", &[]));
    assert_eq!(err.kind, ValidationKind::MissingInput);
    assert_eq!(err.fields, vec!["echogenic_foci"]);
}

// Mehran

fn mehran(age: f64, egfr: f64, contrast: f64) -> CalculatorInput {
    CalculatorInput::new()
        .with("age", age)
        .with("egfr", egfr)
        .with("contrast_volume", contrast)
}

#[test]
fn mehran_very_high_risk_fixture() {
    let input = mehran(60.0, 70.0, 0.0)
        .with("chf", true)
        .with("iabp", true)
        .with("diabetes", true)
        .with("anemia", true);
    let result = run("mehran", &input);
    assert_eq!(result.score, Some(16.0));
    assert_eq!(result.value_of("Risk Category"), Some("Very High Risk"));
    assert_eq!(result.value_of("Risk of CIN"), Some("57.3%"));
    assert_eq!(result.value_of("Risk of Dialysis"), Some("12.6%"));
}

#[test]
fn mehran_bucket_edges() {
    let cases = [
        (mehran(60.0, 70.0, 0.0).with("hypotension", true), 5.0, "Low Risk", "7.5%"),
        (mehran(60.0, 70.0, 100.0).with("hypotension", true), 6.0, "Moderate Risk", "14.0%"),
        (mehran(60.0, 70.0, 0.0).with("hypotension", true).with("iabp", true), 10.0, "Moderate Risk", "14.0%"),
        (mehran(60.0, 70.0, 100.0).with("hypotension", true).with("iabp", true), 11.0, "High Risk", "26.1%"),
        (mehran(60.0, 70.0, 0.0).with("hypotension", true).with("iabp", true).with("chf", true), 15.0, "High Risk", "26.1%"),
    ];
    for (input, score, category, cin) in cases {
        let result = run("mehran", &input);
        assert_eq!(result.score, Some(score));
        assert_eq!(result.category.as_deref(), Some(category), "score {score}");
        assert_eq!(result.value_of("Risk of CIN"), Some(cin));
    }
}

#[test]
fn mehran_age_and_egfr_bands() {
    assert_eq!(run("mehran", &mehran(75.0, 60.0, 0.0)).score, Some(0.0));
    assert_eq!(run("mehran", &mehran(76.0, 60.0, 0.0)).score, Some(4.0));
    assert_eq!(run("mehran", &mehran(60.0, 59.9, 0.0)).score, Some(2.0));
    assert_eq!(run("mehran", &mehran(60.0, 40.0, 0.0)).score, Some(2.0));
    assert_eq!(run("mehran", &mehran(60.0, 39.0, 0.0)).score, Some(4.0));
    assert_eq!(run("mehran", &mehran(60.0, 19.0, 0.0)).score, Some(6.0));
}

#[test]
fn mehran_counts_whole_hundreds_of_contrast() {
    assert_eq!(run("mehran", &mehran(60.0, 70.0, 99.0)).score, Some(0.0));
    assert_eq!(run("mehran", &mehran(60.0, 70.0, 199.0)).score, Some(1.0));
    assert_eq!(run("mehran", &mehran(60.0, 70.0, 350.0)).score, Some(3.0));
}

#[test]
fn mehran_rejects_implausible_contrast_volume() {
    let input = mehran(50.0, 70.0, 0.0)
        .with("hypotension", true)
        .with("contrast_volume", "1e12");
    let err = run_err("mehran", &input);
    assert_eq!(err.kind, ValidationKind::OutOfRange);
    assert_eq!(err.fields, vec!["contrast_volume"]);

    assert_eq!(run("mehran", &mehran(60.0, 70.0, 10_000.0)).score, Some(100.0));
}

#[test]
fn mehran_low_egfr_adds_note() {
    let result = run("mehran", &mehran(60.0, 45.0, 0.0));
    assert!(result.notes.iter().any(|n| n.starts_with("eGFR below 60")));
}

#[test]
fn mehran_accepts_comma_decimals() {
    let input = CalculatorInput::new()
        .with("age", "60")
        .with("egfr", "45,5")
        .with("contrast_volume", "150");
    let result = run("mehran", &input);
    assert_eq!(result.score, Some(3.0));
}

// ASPECTS

#[test]
fn aspects_normal_scan_scores_ten() {
    let result = run("aspects", &CalculatorInput::new());
    assert_eq!(result.score, Some(10.0));
    assert_eq!(result.value_of("ASPECTS"), Some("10 / 10"));
    assert!(result.notes[0].starts_with("ASPECTS 8-10"));
}

#[test]
fn aspects_subtracts_one_per_region() {
    let input = CalculatorInput::new()
        .with("caudate", true)
        .with("lentiform", true)
        .with("m2", true)
        .with("m5", true);
    let result = run("aspects", &input);
    assert_eq!(result.score, Some(6.0));
    assert_eq!(result.value_of("Regions involved"), Some("4"));
    assert!(result.notes[0].starts_with("ASPECTS ≤ 7"));
    assert!(result.recommendation.unwrap().starts_with("ASPECTS ≥ 6"));
}

#[test]
fn aspects_never_goes_below_zero() {
    let mut input = CalculatorInput::new();
    for region in ["caudate", "lentiform", "internal_capsule", "insular_ribbon", "m1", "m2", "m3", "m4", "m5", "m6"] {
        input = input.with(region, true);
    }
    let result = run("aspects", &input);
    assert_eq!(result.score, Some(0.0));
    assert!(result.recommendation.unwrap().starts_with("ASPECTS < 6"));
}

// RENAL

fn renal(diameter: f64, nearness: f64) -> CalculatorInput {
    CalculatorInput::new()
        .with("diameter_cm", diameter)
        .with("exophytic", "ge50")
        .with("nearness_mm", nearness)
        .with("anterior_posterior", "anterior")
        .with("location", "polar")
}

#[test]
fn renal_diameter_boundaries() {
    // E = 1, N = 1 (7 mm), L = 1
    assert_eq!(run("renal", &renal(4.0, 7.0)).score, Some(4.0));
    assert_eq!(run("renal", &renal(4.1, 7.0)).score, Some(5.0));
    assert_eq!(run("renal", &renal(7.0, 7.0)).score, Some(6.0));
}

#[test]
fn renal_nearness_boundaries() {
    assert_eq!(run("renal", &renal(3.0, 4.0)).score, Some(6.0));
    assert_eq!(run("renal", &renal(3.0, 5.0)).score, Some(5.0));
}

#[test]
fn renal_notation_suffixes() {
    let result = run("renal", &renal(3.0, 7.0));
    assert_eq!(result.value_of("RENAL Score"), Some("4a"));
    assert_eq!(result.category.as_deref(), Some("Low complexity"));

    let input = renal(7.5, 2.0)
        .with("exophytic", "endophytic")
        .with("anterior_posterior", "neither")
        .with("location", "central")
        .with("hilar", true);
    let result = run("renal", &input);
    assert_eq!(result.value_of("RENAL Score"), Some("12xh"));
    assert_eq!(result.value_of("Complexity"), Some("High complexity"));

    let result = run("renal", &renal(5.0, 5.0).with("anterior_posterior", "posterior").with("location", "crosses"));
    assert_eq!(result.value_of("RENAL Score"), Some("7p"));
    assert_eq!(result.value_of("Complexity"), Some("Moderate complexity"));
}

#[test]
fn renal_zero_diameter_is_out_of_range() {
    let err = run_err("renal", &renal(0.0, 7.0));
    assert_eq!(err.kind, ValidationKind::OutOfRange);
    assert_eq!(err.fields, vec!["diameter_cm"]);
}

#[test]
fn calculation_is_idempotent() {
    let input = mehran(80.0, 30.0, 250.0).with("diabetes", true);
    assert_eq!(run("mehran", &input), run("mehran", &input));

    let input = nodule("solid", "hypoechoic", "taller_than_wide", "smooth", &["punctate"]);
    assert_eq!(run("tirads", &input), run("tirads", &input));
}
