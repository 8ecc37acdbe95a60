use radscore_core::error::ValidationKind;
use radscore_core::field::FieldSpec;
use radscore_core::input::{CalculatorInput, RawValue};
use radscore_core::normalize::{normalize, parse_number, NumberLocale};

fn fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::number("diameter", "Maximum diameter").min(0.0).max(50.0),
        FieldSpec::choice("zone", "Zone", &[("pz", "Peripheral"), ("tz", "Transition")]),
        FieldSpec::flag("hilar", "Hilar"),
        FieldSpec::text("note", "Note").optional(),
    ]
}

#[test]
fn parses_comma_decimal_in_auto_locale() {
    assert_eq!(parse_number("4,5", NumberLocale::Auto), Some(4.5));
    assert_eq!(parse_number(" 4.5 ", NumberLocale::Auto), Some(4.5));
    assert_eq!(parse_number("1,234.5", NumberLocale::Auto), None);
    assert_eq!(parse_number("1,2,3", NumberLocale::Auto), None);
}

#[test]
fn strict_locales_reject_the_other_separator() {
    assert_eq!(parse_number("4,5", NumberLocale::Dot), None);
    assert_eq!(parse_number("4.5", NumberLocale::Comma), None);
    assert_eq!(parse_number("4,5", NumberLocale::Comma), Some(4.5));
}

#[test]
fn rejects_non_numeric_and_non_finite_text() {
    assert_eq!(parse_number("abc", NumberLocale::Auto), None);
    assert_eq!(parse_number("inf", NumberLocale::Auto), None);
    assert_eq!(parse_number("NaN", NumberLocale::Auto), None);
    assert_eq!(parse_number("", NumberLocale::Auto), None);
}

#[test]
fn complete_input_is_typed() {
    let input = CalculatorInput::new()
        .with("diameter", "3,2")
        .with("zone", "tz")
        .with("hilar", true);

    let values = normalize(&fields(), &input, NumberLocale::Auto).unwrap();
    assert_eq!(values.number("diameter").unwrap(), 3.2);
    assert_eq!(values.choice("zone").unwrap(), "tz");
    assert!(values.flag("hilar"));
    assert_eq!(values.text("note"), None);
}

#[test]
fn absent_flag_reads_as_unchecked() {
    let input = CalculatorInput::new().with("diameter", 1.0).with("zone", "pz");
    let values = normalize(&fields(), &input, NumberLocale::Auto).unwrap();
    assert!(!values.flag("hilar"));
}

#[test]
fn single_missing_field_gets_a_prompt() {
    let input = CalculatorInput::new().with("diameter", "2");
    let err = normalize(&fields(), &input, NumberLocale::Auto).unwrap_err();
    assert_eq!(err.kind, ValidationKind::MissingInput);
    assert_eq!(err.fields, vec!["zone".to_string()]);
    assert_eq!(err.message, "Please select zone");
}

#[test]
fn every_missing_field_is_named() {
    let input = CalculatorInput::new().with("diameter", "   ");
    let err = normalize(&fields(), &input, NumberLocale::Auto).unwrap_err();
    assert_eq!(err.kind, ValidationKind::MissingInput);
    assert_eq!(err.fields, vec!["diameter".to_string(), "zone".to_string()]);
    assert!(err.message.contains("Maximum diameter"));
    assert!(err.message.contains("Zone"));
}

#[test]
fn missing_is_reported_before_invalid() {
    let input = CalculatorInput::new().with("diameter", "abc");
    let err = normalize(&fields(), &input, NumberLocale::Auto).unwrap_err();
    assert_eq!(err.kind, ValidationKind::MissingInput);
}

#[test]
fn non_numeric_text_is_invalid_format() {
    let input = CalculatorInput::new().with("diameter", "abc").with("zone", "pz");
    let err = normalize(&fields(), &input, NumberLocale::Auto).unwrap_err();
    assert_eq!(err.kind, ValidationKind::InvalidFormat);
    assert_eq!(err.fields, vec!["diameter".to_string()]);
}

#[test]
fn unknown_option_is_invalid_format() {
    let input = CalculatorInput::new().with("diameter", 1.0).with("zone", "cz");
    let err = normalize(&fields(), &input, NumberLocale::Auto).unwrap_err();
    assert_eq!(err.kind, ValidationKind::InvalidFormat);
    assert!(err.message.contains("'cz'"));
}

#[test]
fn bound_violation_is_out_of_range() {
    let input = CalculatorInput::new().with("diameter", "51").with("zone", "pz");
    let err = normalize(&fields(), &input, NumberLocale::Auto).unwrap_err();
    assert_eq!(err.kind, ValidationKind::OutOfRange);
    assert_eq!(err.message, "Maximum diameter must be between 0 and 50");
}

#[test]
fn integer_fields_reject_fractions() {
    let spec = vec![FieldSpec::integer("q1", "Question 1", 0.0, 4.0)];
    let input = CalculatorInput::new().with("q1", "2.5");
    let err = normalize(&spec, &input, NumberLocale::Auto).unwrap_err();
    assert_eq!(err.kind, ValidationKind::InvalidFormat);
}

#[test]
fn numeric_choice_ids_accept_numbers() {
    let spec = vec![FieldSpec::choice("dwi", "DWI score", &[("1", "1"), ("2", "2"), ("3", "3")])];
    let input = CalculatorInput::new().with("dwi", 3.0);
    let values = normalize(&spec, &input, NumberLocale::Auto).unwrap();
    assert_eq!(values.choice("dwi").unwrap(), "3");
}

#[test]
fn multi_choice_dedupes_in_order() {
    let spec = vec![FieldSpec::multi_choice("foci", "Foci", &[("a", "A"), ("b", "B")])];
    let input = CalculatorInput::new().with_list("foci", &["b", "a", "b"]);
    let values = normalize(&spec, &input, NumberLocale::Auto).unwrap();
    assert_eq!(values.choices("foci"), &["b".to_string(), "a".to_string()]);
}

#[test]
fn incomplete_rows_are_dropped() {
    let spec = vec![FieldSpec::rows(
        "rois",
        "ROIs",
        vec![
            FieldSpec::number("kpa", "Stiffness").min(0.0),
            FieldSpec::number("area", "Area").min(0.0),
        ],
    )];
    let input = CalculatorInput::new().with_rows(
        "rois",
        vec![
            CalculatorInput::new().with("kpa", "3,1").with("area", "12"),
            CalculatorInput::new().with("kpa", "2.8"),
            CalculatorInput::new().with("kpa", "x").with("area", "5"),
        ],
    );
    let values = normalize(&spec, &input, NumberLocale::Auto).unwrap();
    let rows = values.rows("rois");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].number("kpa").unwrap(), 3.1);
}

#[test]
fn required_rows_with_nothing_complete_are_missing() {
    let spec = vec![FieldSpec::rows("rois", "ROIs", vec![FieldSpec::number("kpa", "Stiffness")])];
    let input = CalculatorInput::new().with_rows("rois", vec![CalculatorInput::new().with("kpa", "")]);
    let err = normalize(&spec, &input, NumberLocale::Auto).unwrap_err();
    assert_eq!(err.kind, ValidationKind::MissingInput);
}

#[test]
fn raw_values_deserialize_from_plain_json() {
    let input: CalculatorInput =
        serde_json::from_str(r#"{"a": "1,5", "b": true, "c": 2, "d": ["x", "y"], "e": [{"k": "1"}]}"#)
            .unwrap();
    assert_eq!(input.get("a"), Some(&RawValue::Text("1,5".to_string())));
    assert_eq!(input.get("b"), Some(&RawValue::Bool(true)));
    assert_eq!(input.get("c"), Some(&RawValue::Number(2.0)));
    assert!(matches!(input.get("d"), Some(RawValue::List(v)) if v.len() == 2));
    assert!(matches!(input.get("e"), Some(RawValue::Rows(r)) if r.len() == 1));
}
