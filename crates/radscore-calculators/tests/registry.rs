use std::collections::HashSet;

use radscore_calculators::error::CalcError;
use radscore_calculators::{all_calculators, evaluate, get_calculator};
use radscore_core::error::ValidationKind;
use radscore_core::input::CalculatorInput;
use radscore_core::normalize::NumberLocale;

#[test]
fn every_calculator_is_registered_once() {
    let calculators = all_calculators();
    assert_eq!(calculators.len(), 22);

    let ids: HashSet<&str> = calculators.iter().map(|c| c.id()).collect();
    assert_eq!(ids.len(), calculators.len(), "duplicate calculator id");
    for id in [
        "tirads",
        "pirads",
        "orads",
        "nirads",
        "aspects",
        "aast",
        "renal",
        "ipss",
        "mehran",
        "mre",
        "adrenal",
        "avs",
        "thypro39",
        "radiation_units",
        "ct_effective_dose",
        "child_pugh",
        "meld_na",
        "albi",
        "milan",
        "prostate_volume",
        "shim",
        "adrenal_mri",
    ] {
        assert!(ids.contains(id), "missing {id}");
    }
}

#[test]
fn field_ids_are_unique_within_a_calculator() {
    for calculator in all_calculators() {
        let fields = calculator.fields();
        assert!(!fields.is_empty(), "{} declares no fields", calculator.id());
        let ids: HashSet<&str> = fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids.len(), fields.len(), "{} repeats a field id", calculator.id());
    }
}

#[test]
fn lookup_by_id() {
    let tirads = get_calculator("tirads").unwrap();
    assert_eq!(tirads.name(), "ACR TI-RADS");
    assert!(get_calculator("nope").is_none());
}

#[test]
fn unknown_calculator_is_an_error() {
    let err = evaluate("nope", &CalculatorInput::new(), NumberLocale::Auto).unwrap_err();
    assert!(matches!(err, CalcError::UnknownCalculator(id) if id == "nope"));
}

#[test]
fn empty_input_is_missing_input_for_every_calculator() {
    for calculator in all_calculators() {
        // ASPECTS is all flags, so an empty form is a valid normal scan.
        if calculator.id() == "aspects" {
            continue;
        }
        let err = calculator
            .evaluate(&CalculatorInput::new(), NumberLocale::Auto)
            .unwrap_err();
        let CalcError::Validation(err) = err else {
            panic!("{}: expected a validation error", calculator.id());
        };
        assert_eq!(err.kind, ValidationKind::MissingInput, "{}", calculator.id());
        assert!(err.message.starts_with("Please"), "{}: {}", calculator.id(), err.message);
    }
}

#[test]
fn only_adrenal_vein_sampling_offers_csv() {
    let exporting: Vec<String> = all_calculators()
        .iter()
        .filter(|c| c.offers_csv())
        .map(|c| c.id().to_string())
        .collect();
    assert_eq!(exporting, vec!["avs"]);
}
