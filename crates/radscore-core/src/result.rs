use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single display row, e.g. "Composite Score" -> "47.7 / 100".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultEntry {
    pub label: String,
    pub value: String,
}

/// The outcome of one calculation: an ordered label -> string mapping for
/// display, alongside the machine-readable core result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub calculator_id: String,
    /// Primary numeric result (points, grade, percentage, dose).
    pub score: Option<f64>,
    /// Primary categorical result ("TR4", "Grade III", "Very High Risk").
    pub category: Option<String>,
    pub entries: Vec<ResultEntry>,
    pub breakdown: Vec<String>,
    pub recommendation: Option<String>,
    /// Interpretive notes triggered by thresholds.
    pub notes: Vec<String>,
}

impl ScoreResult {
    pub fn new(calculator_id: &str) -> Self {
        Self {
            calculator_id: calculator_id.to_string(),
            score: None,
            category: None,
            entries: Vec::new(),
            breakdown: Vec::new(),
            recommendation: None,
            notes: Vec::new(),
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn entry(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push(ResultEntry {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn breakdown_line(mut self, line: impl Into<String>) -> Self {
        self.breakdown.push(line.into());
        self
    }

    pub fn recommend(mut self, text: impl Into<String>) -> Self {
        self.recommendation = Some(text.into());
        self
    }

    pub fn note(mut self, text: impl Into<String>) -> Self {
        self.notes.push(text.into());
        self
    }

    /// Look up a display value by its label.
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value.as_str())
    }

    /// Entries followed by recommendation and notes, in display order.
    pub fn display_rows(&self) -> Vec<(String, String)> {
        let mut rows: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|e| (e.label.clone(), e.value.clone()))
            .collect();
        if let Some(rec) = &self.recommendation {
            rows.push(("Recommendation".to_string(), rec.clone()));
        }
        for note in &self.notes {
            rows.push(("Note".to_string(), note.clone()));
        }
        rows
    }
}
