//! Command bodies. Each returns the text to print so the CLI layer stays a
//! thin parse-and-dispatch shell.

use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

use radscore_calculators::{all_calculators, get_calculator, Calculator, Specialty};
use radscore_core::field::{FieldKind, FieldSpec};
use radscore_core::input::CalculatorInput;
use radscore_core::normalize::NumberLocale;
use radscore_core::result::ScoreResult;
use radscore_export::csv::{export_csv, CsvExport};
use radscore_export::render::{render_report, ReportContext};

use crate::preferences::Preferences;

fn lookup(id: &str) -> eyre::Result<Box<dyn Calculator>> {
    get_calculator(id).ok_or_else(|| eyre::eyre!("unknown calculator '{id}' (see `radscore list`)"))
}

/// Matches "Radiation Safety", "radiation_safety" and "radiation-safety".
pub fn specialty_matches(specialty: Specialty, filter: &str) -> bool {
    let norm = |s: &str| s.to_ascii_lowercase().replace([' ', '-'], "_");
    norm(specialty.label()) == norm(filter)
}

pub fn list(prefs: &Preferences, specialty: Option<&str>, favorites_only: bool) -> String {
    let mut out = String::new();
    for calc in all_calculators() {
        if let Some(filter) = specialty
            && !specialty_matches(calc.specialty(), filter)
        {
            continue;
        }
        let favorite = prefs.is_favorite(calc.id());
        if favorites_only && !favorite {
            continue;
        }
        let star = if favorite { "*" } else { " " };
        let _ = writeln!(out, "{star} {:<18} {:<44} {}", calc.id(), calc.name(), calc.specialty().label());
    }
    out
}

pub fn describe(id: &str) -> eyre::Result<String> {
    let calc = lookup(id)?;
    let mut out = format!("{} ({})\nSpecialty: {}\n\nFields:\n", calc.name(), calc.id(), calc.specialty().label());
    for field in calc.fields() {
        describe_field(&mut out, field, "  ");
    }
    Ok(out)
}

fn describe_field(out: &mut String, field: &FieldSpec, indent: &str) {
    let required = if field.required { "" } else { " (optional)" };
    let unit = field.unit.as_deref().map(|u| format!(" [{u}]")).unwrap_or_default();
    let kind = match &field.kind {
        FieldKind::Number { min, max, integer } => {
            let name = if *integer { "integer" } else { "number" };
            match (min, max) {
                (Some(lo), Some(hi)) => format!("{name} {lo}..{hi}"),
                (Some(lo), None) => format!("{name} >= {lo}"),
                (None, Some(hi)) => format!("{name} <= {hi}"),
                (None, None) => name.to_string(),
            }
        }
        FieldKind::Choice { .. } => "choice".to_string(),
        FieldKind::MultiChoice { .. } => "multi-choice".to_string(),
        FieldKind::Flag => "flag".to_string(),
        FieldKind::Text => "text".to_string(),
        FieldKind::Rows { .. } => "rows".to_string(),
    };
    let _ = writeln!(out, "{indent}{}: {}{unit} <{kind}>{required}", field.id, field.label);
    match &field.kind {
        FieldKind::Choice { options } | FieldKind::MultiChoice { options } => {
            for option in options {
                let _ = writeln!(out, "{indent}    {} = {}", option.id, option.label);
            }
        }
        FieldKind::Rows { columns } => {
            for column in columns {
                describe_field(out, column, &format!("{indent}    "));
            }
        }
        _ => {}
    }
}

/// Read a JSON input map from a file, or stdin when `path` is `-`.
pub fn read_input(path: &str) -> eyre::Result<CalculatorInput> {
    let contents = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| eyre::eyre!("failed to read input {path}: {e}"))?
    };
    parse_input(&contents)
}

pub fn parse_input(contents: &str) -> eyre::Result<CalculatorInput> {
    serde_json::from_str(contents).map_err(|e| eyre::eyre!("input is not a JSON object of field values: {e}"))
}

/// Evaluate and record the calculator as recently used.
pub fn calculate(
    prefs: &mut Preferences,
    id: &str,
    input: &CalculatorInput,
    locale: NumberLocale,
    now: jiff::Timestamp,
) -> eyre::Result<ScoreResult> {
    let calc = lookup(id)?;
    let result = calc.evaluate(input, locale)?;
    prefs.record_recent(calc.id(), now);
    Ok(result)
}

pub fn format_result(result: &ScoreResult, date: jiff::civil::Date, json: bool) -> eyre::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    let calc = lookup(&result.calculator_id)?;
    Ok(render_report(&ReportContext::new(calc.name(), date, result))?)
}

/// Build the CSV for a calculator that offers one and write it into `out_dir`.
pub fn export(result: &ScoreResult, date: jiff::civil::Date, out_dir: &Path) -> eyre::Result<CsvExport> {
    let calc = lookup(&result.calculator_id)?;
    if !calc.offers_csv() {
        return Err(eyre::eyre!("{} does not offer CSV export", calc.name()));
    }
    let export = export_csv(result, date)?;
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&export.filename);
    std::fs::write(&path, export.content.as_bytes())?;
    tracing::info!(path = %path.display(), "csv exported");
    Ok(export)
}

pub fn favorites(prefs: &Preferences) -> String {
    if prefs.favorites.is_empty() {
        return "No favorites yet. Add one with `radscore favorites add <id>`.\n".to_string();
    }
    let mut out = String::new();
    for id in &prefs.favorites {
        let name = get_calculator(id).map(|c| c.name().to_string()).unwrap_or_default();
        let _ = writeln!(out, "{id:<18} {name}");
    }
    out
}

pub fn add_favorite(prefs: &mut Preferences, id: &str) -> eyre::Result<String> {
    let calc = lookup(id)?;
    Ok(if prefs.add_favorite(calc.id()) {
        format!("Added {} to favorites\n", calc.name())
    } else {
        format!("{} is already a favorite\n", calc.name())
    })
}

pub fn remove_favorite(prefs: &mut Preferences, id: &str) -> String {
    if prefs.remove_favorite(id) {
        format!("Removed {id} from favorites\n")
    } else {
        format!("{id} is not a favorite\n")
    }
}

pub fn recents(prefs: &Preferences) -> String {
    if prefs.recents.is_empty() {
        return "No recent calculations.\n".to_string();
    }
    let mut out = String::new();
    for recent in &prefs.recents {
        let name = get_calculator(&recent.calculator_id)
            .map(|c| c.name().to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "{:<18} {:<44} {}", recent.calculator_id, name, recent.used_at);
    }
    out
}
