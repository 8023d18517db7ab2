//! OOXML (`.docx`) rendering of laid-out report blocks.

use super::layout::{Block, EmbeddedImage, Span};
use crate::{Error, Result};
use docx_rs::{BreakType, Docx, Paragraph, Pic, Run, Style, StyleType};
use std::io::Cursor;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const EMU_PER_INCH: u64 = 914_400;
/// Display width of embedded images.
const IMAGE_WIDTH_EMU: u64 = 6 * EMU_PER_INCH;

fn styles(docx: Docx) -> Docx {
    docx.add_style(
        Style::new("Title", StyleType::Paragraph)
            .name("Title")
            .size(56),
    )
    .add_style(
        Style::new("Heading1", StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold(),
    )
    .add_style(
        Style::new("Heading2", StyleType::Paragraph)
            .name("Heading 2")
            .size(26)
            .bold(),
    )
}

fn run(span: &Span) -> Run {
    let run = Run::new().add_text(span.text.as_str());
    if span.bold {
        run.bold()
    } else {
        run
    }
}

fn picture(image: &EmbeddedImage) -> Pic {
    let height_emu =
        IMAGE_WIDTH_EMU * u64::from(image.height_px) / u64::from(image.width_px.max(1));
    Pic::new_with_dimensions(image.png.clone(), image.width_px, image.height_px).size(
        u32::try_from(IMAGE_WIDTH_EMU).unwrap_or(u32::MAX),
        u32::try_from(height_emu).unwrap_or(u32::MAX),
    )
}

fn paragraph(block: &Block) -> Paragraph {
    match block {
        Block::Title(text) => Paragraph::new()
            .style("Title")
            .add_run(Run::new().add_text(text.as_str())),
        Block::Heading1(text) => Paragraph::new()
            .style("Heading1")
            .add_run(Run::new().add_text(text.as_str())),
        Block::Heading2(text) => Paragraph::new()
            .style("Heading2")
            .add_run(Run::new().add_text(text.as_str())),
        Block::Paragraph(spans) => spans
            .iter()
            .fold(Paragraph::new(), |p, span| p.add_run(run(span))),
        Block::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
        Block::Image(image) => Paragraph::new().add_run(Run::new().add_image(picture(image))),
    }
}

/// Render blocks into a packed `.docx` archive.
pub fn render(blocks: &[Block]) -> Result<Vec<u8>> {
    let docx = blocks
        .iter()
        .fold(styles(Docx::new()), |docx, block| docx.add_paragraph(paragraph(block)));

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| Error::Document(format!("Failed to pack document: {}", e)))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_produces_zip_archive() {
        let blocks = vec![
            Block::Title("Report".to_string()),
            Block::PageBreak,
            Block::Heading1("Executive Summary".to_string()),
            Block::Paragraph(vec![Span::bold("Label: "), Span::plain("value")]),
            Block::empty(),
        ];

        let bytes = render(&blocks).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_render_with_image() {
        let img = image::RgbaImage::from_pixel(3, 6, image::Rgba([10, 20, 30, 255]));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let embedded = EmbeddedImage::from_bytes(&png).unwrap();

        let with_image = render(&[Block::Image(embedded)]).unwrap();
        let without_image = render(&[Block::empty()]).unwrap();
        assert!(with_image.starts_with(b"PK"));
        assert!(with_image.len() > without_image.len());
    }
}
