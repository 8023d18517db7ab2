//! Report assembly
//!
//! Builds a downloadable `.docx` report from client-supplied analysis results:
//! lenient request decoding, layout into blocks, then OOXML rendering.

pub mod data_url;
pub mod docx;
pub mod filename;
pub mod layout;
pub mod request;

pub use data_url::decode_data_url;
pub use docx::DOCX_MIME;
pub use filename::{content_disposition, report_filename};
pub use layout::{layout, Block};
pub use request::{AnalysisGroup, AnalysisResult, ReportSpec};

use crate::{Error, Result};
use chrono::{DateTime, Local};

/// Lay out and render a report synchronously.
pub fn build_report_at(spec: &ReportSpec, generated_at: DateTime<Local>) -> Result<Vec<u8>> {
    let blocks = layout(spec, generated_at);
    tracing::debug!("Laid out report '{}' in {} blocks", spec.title, blocks.len());
    docx::render(&blocks)
}

/// Build a report stamped with the current local time.
///
/// Image decoding and archive packing run on the blocking pool.
pub async fn build_report(spec: ReportSpec) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || build_report_at(&spec, Local::now()))
        .await
        .map_err(|e| Error::Invariant(format!("Report task join error: {}", e)))?
}
