//! Download filenames for generated reports.

pub const DEFAULT_BASE_NAME: &str = "analysis_report";
pub const REPORT_SUFFIX: &str = "_analysis_report.docx";

/// Reduce a title to a safe base name.
///
/// The last extension is dropped, then everything except alphanumerics,
/// spaces, underscores and hyphens is removed.
pub fn sanitize_base_name(title: &str) -> String {
    let base = title.rsplit_once('.').map_or(title, |(base, _)| base);
    let safe: String = base
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();

    match safe.trim() {
        "" => DEFAULT_BASE_NAME.to_string(),
        trimmed => trimmed.to_string(),
    }
}

pub fn report_filename(title: &str) -> String {
    format!("{}{}", sanitize_base_name(title), REPORT_SUFFIX)
}

/// `Content-Disposition` value with an ASCII fallback and a UTF-8 `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let ascii_fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback,
        urlencoding::encode(filename)
    )
}
