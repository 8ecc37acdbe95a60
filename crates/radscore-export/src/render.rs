use jiff::civil::Date;
use serde::Serialize;
use tera::{Context, Tera};

use radscore_core::result::ScoreResult;

use crate::error::ExportError;

/// Default plain-text report layout.
pub const REPORT_TEMPLATE: &str = r#"{{ calculator }}
Date: {{ date }}

{% for entry in result.entries -%}
{{ entry.label }}: {{ entry.value }}
{% endfor -%}
{% if result.breakdown %}
Breakdown:
{% for line in result.breakdown -%}
  - {{ line }}
{% endfor -%}
{% endif -%}
{% if result.recommendation %}
Recommendation: {{ result.recommendation }}
{% endif -%}
{% if result.notes %}
Notes:
{% for note in result.notes -%}
  - {{ note }}
{% endfor -%}
{% endif -%}
"#;

/// Template variables: `calculator` (display name), `date` and `result`.
#[derive(Debug, Serialize)]
pub struct ReportContext<'a> {
    pub calculator: &'a str,
    pub date: String,
    pub result: &'a ScoreResult,
}

impl<'a> ReportContext<'a> {
    pub fn new(calculator: &'a str, date: Date, result: &'a ScoreResult) -> Self {
        Self {
            calculator,
            date: date.to_string(),
            result,
        }
    }
}

/// Render a Tera template against a report context.
///
/// Template names ending in `.html` are autoescaped by Tera; text
/// reports should use a `.txt` name.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    report: &ReportContext<'_>,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(report)?;
    let context = Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render the default text report.
pub fn render_report(report: &ReportContext<'_>) -> Result<String, ExportError> {
    render_template("report.txt", REPORT_TEMPLATE, report)
}
