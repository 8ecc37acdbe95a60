use jiff::civil::date;

use radscore_core::result::ScoreResult;
use radscore_export::csv::export_csv;
use radscore_export::error::ExportError;
use radscore_export::render::{render_report, render_template, ReportContext};

fn avs_result() -> ScoreResult {
    ScoreResult::new("avs")
        .with_score(20.0)
        .with_category("Lateralized to right")
        .entry("Lateralization Index", "20.00")
        .entry("Interpretation", "Lateralized to right")
        .breakdown_line("Selectivity threshold 3 (with cosyntropin)")
        .note("Contralateral suppression index < 1 supports unilateral disease")
        .recommend("Unilateral aldosterone excess: consider right adrenalectomy")
}

#[test]
fn csv_filename_carries_id_and_date() {
    let export = export_csv(&avs_result(), date(2026, 3, 7)).unwrap();
    assert_eq!(export.filename, "avs-2026-03-07.csv");
}

#[test]
fn csv_rows_follow_display_order() {
    let export = export_csv(&avs_result(), date(2026, 3, 7)).unwrap();
    let lines: Vec<&str> = export.content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Field,Value",
            "Lateralization Index,20.00",
            "Interpretation,Lateralized to right",
            "Recommendation,Unilateral aldosterone excess: consider right adrenalectomy",
            "Note,Contralateral suppression index < 1 supports unilateral disease",
        ]
    );
}

#[test]
fn csv_quotes_values_with_commas() {
    let result = ScoreResult::new("ipss").entry("Change from Baseline to 6 months", "-8 points, improved");
    let export = export_csv(&result, date(2026, 1, 1)).unwrap();
    assert!(export.content.contains("\"-8 points, improved\""));
}

#[test]
fn report_lists_entries_and_notes() {
    let result = avs_result();
    let report = render_report(&ReportContext::new("Adrenal Vein Sampling", date(2026, 3, 7), &result)).unwrap();
    assert!(report.starts_with("Adrenal Vein Sampling\nDate: 2026-03-07\n"));
    assert!(report.contains("Lateralization Index: 20.00\n"));
    assert!(report.contains("Breakdown:\n  - Selectivity threshold 3 (with cosyntropin)\n"));
    assert!(report.contains("Recommendation: Unilateral aldosterone excess"));
    assert!(report.contains("Notes:\n  - Contralateral suppression"));
}

#[test]
fn report_omits_empty_sections() {
    let result = ScoreResult::new("aspects").entry("ASPECTS", "10 / 10");
    let report = render_report(&ReportContext::new("ASPECTS", date(2026, 3, 7), &result)).unwrap();
    assert!(report.contains("ASPECTS: 10 / 10"));
    assert!(!report.contains("Breakdown:"));
    assert!(!report.contains("Recommendation:"));
    assert!(!report.contains("Notes:"));
}

#[test]
fn custom_template_sees_result_fields() {
    let result = avs_result();
    let context = ReportContext::new("AVS", date(2026, 3, 7), &result);
    let rendered = render_template("short.txt", "{{ calculator }}: {{ result.category }}", &context).unwrap();
    assert_eq!(rendered, "AVS: Lateralized to right");
}

#[test]
fn broken_template_is_a_parse_error() {
    let result = avs_result();
    let context = ReportContext::new("AVS", date(2026, 3, 7), &result);
    let err = render_template("bad.txt", "{% for %}", &context).unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}
