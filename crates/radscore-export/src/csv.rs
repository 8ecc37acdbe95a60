use jiff::civil::Date;
use serde::Serialize;

use radscore_core::result::ScoreResult;

use crate::error::ExportError;

/// A ready-to-save CSV download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvExport {
    /// `<calculator-id>-<YYYY-MM-DD>.csv`
    pub filename: String,
    pub content: String,
}

/// Write the result's display rows as a two-column `Field,Value` table.
pub fn export_csv(result: &ScoreResult, date: Date) -> Result<CsvExport, ExportError> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(["Field", "Value"])?;
    for (label, value) in result.display_rows() {
        writer.write_record([label.as_str(), value.as_str()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;
    let content = String::from_utf8(bytes).map_err(|e| ExportError::Csv(e.to_string()))?;

    let filename = format!("{}-{date}.csv", result.calculator_id);
    tracing::debug!(filename = %filename, rows = result.entries.len(), "csv export built");
    Ok(CsvExport { filename, content })
}
