//! Report layout
//!
//! Turns a [`ReportSpec`] into an ordered list of [`Block`]s. Rendering to a
//! concrete document format happens separately in [`super::docx`].

use super::data_url::decode_data_url;
use super::request::{AnalysisResult, ReportSpec};
use crate::Result;
use chrono::{DateTime, Local};
use image::ImageFormat;
use std::io::Cursor;

pub const SUMMARY_HEADING: &str = "Executive Summary";
pub const DETAIL_HEADING: &str = "상세 분석 (Detailed Analysis)";
pub const INTENT_LABEL: &str = "분석 초점: ";

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading1(String),
    Heading2(String),
    Paragraph(Vec<Span>),
    PageBreak,
    Image(EmbeddedImage),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

impl Block {
    pub fn text(text: impl Into<String>) -> Self {
        Block::Paragraph(vec![Span::plain(text)])
    }

    pub fn empty() -> Self {
        Block::Paragraph(Vec::new())
    }

    /// Concatenated visible text, used for assertions and logging.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Title(text) | Block::Heading1(text) | Block::Heading2(text) => text.clone(),
            Block::Paragraph(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
            Block::PageBreak | Block::Image(_) => String::new(),
        }
    }
}

/// Image re-encoded as PNG with its pixel dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl EmbeddedImage {
    /// Decode arbitrary image bytes and normalize them to PNG.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)?;
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(Self {
            png,
            width_px: image.width(),
            height_px: image.height(),
        })
    }
}

/// Display title: a trailing `.pdf` is dropped.
pub fn display_title(title: &str) -> &str {
    title.strip_suffix(".pdf").unwrap_or(title)
}

fn lines(text: &str) -> impl Iterator<Item = Block> + '_ {
    text.split('\n').map(Block::text)
}

fn layout_group(blocks: &mut Vec<Block>, position: usize, result: &AnalysisResult) {
    blocks.push(Block::Heading2(format!(
        "그룹 {}",
        result.group.label(position)
    )));
    blocks.push(Block::Paragraph(vec![
        Span::bold(INTENT_LABEL),
        Span::plain(result.group.intent.clone()),
    ]));

    for (index, data_url) in result.images.iter().enumerate() {
        let Some(bytes) = decode_data_url(data_url).filter(|b| !b.is_empty()) else {
            tracing::debug!("Skipping undecodable image {} in group {}", index + 1, position);
            continue;
        };

        match EmbeddedImage::from_bytes(&bytes) {
            Ok(image) => blocks.push(Block::Image(image)),
            Err(e) => {
                tracing::warn!("Failed to embed image {} in group {}: {}", index + 1, position, e);
                blocks.push(Block::text(format!("[이미지 추가 실패: {}]", e)));
            }
        }
    }

    blocks.extend(lines(&result.analysis));
    blocks.push(Block::empty());
}

/// Lay out the full report.
pub fn layout(spec: &ReportSpec, generated_at: DateTime<Local>) -> Vec<Block> {
    let mut blocks = vec![
        Block::Title(display_title(&spec.title).to_string()),
        Block::text(format!(
            "생성일: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        )),
        Block::PageBreak,
        Block::Heading1(SUMMARY_HEADING.to_string()),
    ];
    blocks.extend(lines(&spec.global_summary));

    blocks.push(Block::PageBreak);
    blocks.push(Block::Heading1(DETAIL_HEADING.to_string()));

    for (index, result) in spec.analysis_results.iter().enumerate() {
        layout_group(&mut blocks, index + 1, result);
    }

    blocks
}
