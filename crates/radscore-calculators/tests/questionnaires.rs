use radscore_calculators::calculators::thypro::score_answers;
use radscore_calculators::error::CalcError;
use radscore_calculators::evaluate;
use radscore_core::error::ValidationKind;
use radscore_core::input::CalculatorInput;
use radscore_core::normalize::NumberLocale;

/// Items feeding the ThyPRO-39 composite: 16 to 36 and 39.
fn composite_items() -> Vec<usize> {
    (16..=36).chain([39]).collect()
}

/// Answer sheet with `sum` spread over the composite items, one point at a
/// time, and every other item left at 0.
fn composite_sheet(sum: u32) -> [u32; 39] {
    let mut answers = [0u32; 39];
    let items = composite_items();
    for i in 0..sum as usize {
        answers[items[i % items.len()] - 1] += 1;
    }
    answers
}

fn sheet_input(answers: &[u32; 39]) -> CalculatorInput {
    answers
        .iter()
        .enumerate()
        .fold(CalculatorInput::new(), |input, (i, a)| input.with(&format!("q{}", i + 1), f64::from(*a)))
}

#[test]
fn thypro_all_zero_is_minimal() {
    let scores = score_answers(&[0; 39]);
    assert_eq!(scores.composite, 0.0);
    assert_eq!(scores.tier, "Minimal impact");
    assert!(scores.scales.iter().all(|s| s.score == 0.0));
    assert_eq!(scores.scales.len(), 13);
}

#[test]
fn thypro_all_four_is_severe() {
    let scores = score_answers(&[4; 39]);
    assert_eq!(scores.composite, 100.0);
    assert_eq!(scores.composite_sum, 88);
    assert_eq!(scores.composite_max, 88);
    assert_eq!(scores.tier, "Severe impact");
    assert!(scores.scales.iter().all(|s| s.score == 100.0));
}

#[test]
fn thypro_tier_boundaries_belong_to_lower_tier() {
    let at = |sum| score_answers(&composite_sheet(sum));

    assert_eq!(at(22).composite, 25.0);
    assert_eq!(at(22).tier, "Minimal impact");
    assert_eq!(at(23).tier, "Moderate impact");
    assert_eq!(format!("{:.1}", at(23).composite), "26.1");

    assert_eq!(at(44).composite, 50.0);
    assert_eq!(at(44).tier, "Moderate impact");
    assert_eq!(at(45).tier, "Significant impact");
    assert_eq!(format!("{:.1}", at(45).composite), "51.1");

    assert_eq!(at(66).tier, "Significant impact");
    assert_eq!(at(67).tier, "Severe impact");
}

#[test]
fn thypro_physical_scales_do_not_move_the_composite() {
    let mut answers = [0u32; 39];
    for item in 1..=15 {
        answers[item - 1] = 4;
    }
    let scores = score_answers(&answers);
    assert_eq!(scores.composite, 0.0);
    let goiter = scores.scales.iter().find(|s| s.id == "goiter").unwrap();
    assert_eq!(goiter.score, 100.0);
}

#[test]
fn thypro_calculator_reports_composite_and_scales() {
    let result = evaluate("thypro39", &sheet_input(&composite_sheet(42)), NumberLocale::Auto).unwrap();
    assert_eq!(result.value_of("Composite Score"), Some("47.7 / 100"));
    assert_eq!(result.value_of("Impact"), Some("Moderate impact"));
    assert!(result.value_of("Overall QoL impact").is_some());
}

#[test]
fn thypro_counts_remaining_questions() {
    let mut input = sheet_input(&[1; 39]);
    input.remove("q5");
    input.remove("q39");
    let CalcError::Validation(err) = evaluate("thypro39", &input, NumberLocale::Auto).unwrap_err() else {
        panic!("expected a validation error");
    };
    assert_eq!(err.kind, ValidationKind::MissingInput);
    assert_eq!(err.message, "Please answer all 39 questions — 2 remaining");
}

#[test]
fn thypro_rejects_answers_above_four() {
    let input = sheet_input(&[1; 39]).with("q7", 5.0);
    let CalcError::Validation(err) = evaluate("thypro39", &input, NumberLocale::Auto).unwrap_err() else {
        panic!("expected a validation error");
    };
    assert_eq!(err.kind, ValidationKind::OutOfRange);
}

// IPSS

fn timepoint(label: &str, symptoms: [u32; 7], qol: u32) -> CalculatorInput {
    let input = symptoms
        .iter()
        .enumerate()
        .fold(CalculatorInput::new(), |input, (i, s)| input.with(&format!("q{}", i + 1), f64::from(*s)));
    input.with("label", label).with("qol", f64::from(qol))
}

#[test]
fn ipss_single_timepoint_severity() {
    let input = CalculatorInput::new().with_rows("timepoints", vec![timepoint("Baseline", [3, 3, 2, 2, 3, 2, 2], 4)]);
    let result = evaluate("ipss", &input, NumberLocale::Auto).unwrap();
    assert_eq!(result.score, Some(17.0));
    assert_eq!(result.value_of("Severity"), Some("Moderate"));
    assert_eq!(result.value_of("Quality of Life"), Some("4 (Mostly dissatisfied)"));
    assert!(result.entries.iter().all(|e| !e.label.starts_with("Change")));
}

#[test]
fn ipss_severity_edges() {
    let total = |symptoms| {
        let input = CalculatorInput::new().with_rows("timepoints", vec![timepoint("Visit", symptoms, 0)]);
        evaluate("ipss", &input, NumberLocale::Auto).unwrap().category.unwrap()
    };
    assert_eq!(total([1, 1, 1, 1, 1, 1, 1]), "Mild");
    assert_eq!(total([2, 1, 1, 1, 1, 1, 1]), "Moderate");
    assert_eq!(total([3, 3, 3, 3, 3, 2, 2]), "Moderate");
    assert_eq!(total([3, 3, 3, 3, 3, 3, 2]), "Severe");
}

#[test]
fn ipss_reports_change_between_first_and_last_timepoint() {
    let input = CalculatorInput::new().with_rows(
        "timepoints",
        vec![
            timepoint("Baseline", [3, 3, 3, 3, 3, 3, 2], 5),
            timepoint("3 months", [2, 2, 2, 2, 2, 2, 2], 3),
            timepoint("6 months", [2, 2, 1, 2, 2, 1, 2], 2),
        ],
    );
    let result = evaluate("ipss", &input, NumberLocale::Auto).unwrap();
    assert_eq!(result.score, Some(12.0));
    assert_eq!(result.value_of("Change from Baseline to 6 months"), Some("-8 points (-40.0%)"));
    assert_eq!(result.breakdown.len(), 3);
    assert!(result.notes[0].contains("clinically meaningful"));
}

#[test]
fn ipss_skips_incomplete_timepoints() {
    let partial = CalculatorInput::new().with("label", "Unfinished").with("q1", 4.0);
    let input = CalculatorInput::new().with_rows(
        "timepoints",
        vec![timepoint("Baseline", [1, 1, 1, 1, 1, 1, 1], 1), partial],
    );
    let result = evaluate("ipss", &input, NumberLocale::Auto).unwrap();
    assert_eq!(result.breakdown.len(), 1);
    assert_eq!(result.score, Some(7.0));
}

#[test]
fn ipss_without_complete_timepoint_is_missing() {
    let partial = CalculatorInput::new().with("q1", 4.0);
    let input = CalculatorInput::new().with_rows("timepoints", vec![partial]);
    let CalcError::Validation(err) = evaluate("ipss", &input, NumberLocale::Auto).unwrap_err() else {
        panic!("expected a validation error");
    };
    assert_eq!(err.kind, ValidationKind::MissingInput);
    assert!(err.message.starts_with("Please complete at least one timepoint"));
}

// SHIM

fn shim(answers: [u32; 5]) -> CalculatorInput {
    answers
        .iter()
        .enumerate()
        .fold(CalculatorInput::new(), |input, (i, a)| input.with(&format!("q{}", i + 1), f64::from(*a)))
}

#[test]
fn shim_severity_tiers() {
    let category = |answers| evaluate("shim", &shim(answers), NumberLocale::Auto).unwrap().category.unwrap();
    assert_eq!(category([5, 5, 5, 5, 5]), "No erectile dysfunction");
    assert_eq!(category([5, 5, 4, 4, 4]), "No erectile dysfunction");
    assert_eq!(category([4, 4, 4, 4, 5]), "Mild erectile dysfunction");
    assert_eq!(category([4, 4, 3, 3, 3]), "Mild erectile dysfunction");
    assert_eq!(category([4, 3, 3, 3, 3]), "Mild to moderate erectile dysfunction");
    assert_eq!(category([3, 3, 2, 2, 2]), "Mild to moderate erectile dysfunction");
    assert_eq!(category([3, 2, 2, 2, 2]), "Moderate erectile dysfunction");
    assert_eq!(category([2, 2, 2, 1, 1]), "Moderate erectile dysfunction");
    assert_eq!(category([1, 1, 1, 2, 2]), "Severe erectile dysfunction");
}

#[test]
fn shim_reports_total_out_of_twenty_five() {
    let result = evaluate("shim", &shim([4, 4, 4, 4, 5]), NumberLocale::Auto).unwrap();
    assert_eq!(result.score, Some(21.0));
    assert_eq!(result.value_of("Total Score"), Some("21 / 25"));
    assert_eq!(result.breakdown.len(), 5);
}

#[test]
fn shim_items_are_scored_one_to_five() {
    let CalcError::Validation(err) = evaluate("shim", &shim([0, 3, 3, 3, 3]), NumberLocale::Auto).unwrap_err() else {
        panic!("expected a validation error");
    };
    assert_eq!(err.kind, ValidationKind::OutOfRange);
    assert_eq!(err.fields, vec!["q1"]);

    let mut input = shim([3; 5]);
    input.remove("q4");
    let CalcError::Validation(err) = evaluate("shim", &input, NumberLocale::Auto).unwrap_err() else {
        panic!("expected a validation error");
    };
    assert_eq!(err.message, "Please answer all 5 questions — 1 remaining");
}
