use radscore_core::format;
use radscore_core::result::ScoreResult;

#[test]
fn fixed_precision_helpers() {
    assert_eq!(format::fixed(3.14159, 2), "3.14");
    assert_eq!(format::percent(26.136, 1), "26.1%");
    assert_eq!(format::out_of(47.727, 100.0, 1), "47.7 / 100");
    assert_eq!(format::points(1), "1 point");
    assert_eq!(format::points(-3), "-3 points");
}

#[test]
fn plain_numbers() {
    assert_eq!(format::plain(1000.0), "1000");
    assert_eq!(format::plain(0.5), "0.5");
    assert_eq!(format::plain(37_000_000_000.0), "37000000000");
    assert_eq!(format::plain(0.00001), "1e-5");
}

#[test]
fn roman_grades() {
    let grades: Vec<&str> = (1..=6).map(format::roman).collect();
    assert_eq!(grades, vec!["I", "II", "III", "IV", "V", "VI"]);
}

#[test]
fn display_rows_append_recommendation_and_notes() {
    let result = ScoreResult::new("mehran")
        .with_score(16.0)
        .entry("Total Score", "16 points")
        .note("first")
        .recommend("hydrate")
        .note("second");
    assert_eq!(result.value_of("Total Score"), Some("16 points"));
    assert_eq!(result.value_of("Missing"), None);
    let labels: Vec<String> = result.display_rows().into_iter().map(|(label, _)| label).collect();
    assert_eq!(labels, vec!["Total Score", "Recommendation", "Note", "Note"]);
}

#[test]
fn result_serializes_for_machine_consumers() {
    let result = ScoreResult::new("tirads").with_score(4.0).with_category("TR4");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["calculator_id"], "tirads");
    assert_eq!(json["score"], 4.0);
    assert_eq!(json["category"], "TR4");
}
