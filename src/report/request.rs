//! Report request model
//!
//! Decoding is lenient field by field: a missing or wrong-typed field becomes
//! its empty default instead of rejecting the whole request.

use serde_json::{Map, Value};

pub const DEFAULT_TITLE: &str = "보고서";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSpec {
    pub title: String,
    pub global_summary: String,
    pub analysis_results: Vec<AnalysisResult>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisResult {
    pub group: AnalysisGroup,
    /// Image data URLs in display order.
    pub images: Vec<String>,
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisGroup {
    /// Display id; `None` means "use the group's 1-based position".
    pub id: Option<String>,
    pub pages: Vec<String>,
    pub intent: String,
}

impl Default for ReportSpec {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            global_summary: String::new(),
            analysis_results: Vec::new(),
        }
    }
}

/// Scalar rendered as display text; containers and null yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).and_then(scalar_text).unwrap_or_default()
}

fn list_field<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

impl ReportSpec {
    /// Decode a report request from an already-parsed JSON object.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            title: fields
                .get("title")
                .and_then(scalar_text)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            global_summary: text_field(fields, "global_summary"),
            analysis_results: list_field(fields, "analysis_results")
                .iter()
                .map(AnalysisResult::from_value)
                .collect(),
        }
    }
}

impl AnalysisResult {
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };

        Self {
            group: fields
                .get("group")
                .map(AnalysisGroup::from_value)
                .unwrap_or_default(),
            images: list_field(fields, "images")
                .iter()
                .filter_map(|image| image.as_str().map(str::to_string))
                .collect(),
            analysis: text_field(fields, "analysis"),
        }
    }
}

impl AnalysisGroup {
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self::default();
        };

        Self {
            id: fields.get("id").and_then(scalar_text),
            pages: list_field(fields, "pages")
                .iter()
                .map(|page| scalar_text(page).unwrap_or_else(|| page.to_string()))
                .collect(),
            intent: text_field(fields, "intent"),
        }
    }

    /// Heading label, e.g. `3 (페이지: 4, 5)`, using `position` when no id was given.
    pub fn label(&self, position: usize) -> String {
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| position.to_string());
        let pages = if self.pages.is_empty() {
            "N/A".to_string()
        } else {
            self.pages.join(", ")
        };
        format!("{} (페이지: {})", id, pages)
    }
}
