use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, SpecialIndentType, Start, Style, StyleType,
};

use crate::{Block, FormatError, Outline};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOCX_FILE_NAME: &str = "SRS_Document.docx";

const BULLET_NUMBERING_ID: usize = 1;

// half-points, title then Heading1..=Heading9
const TITLE_SIZE: usize = 56;
const HEADING_SIZES: [usize; 9] = [36, 28, 24, 22, 22, 22, 20, 20, 20];

/// Serializes an [`Outline`] into a downloadable file.
pub trait DocumentWriter: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn file_name(&self) -> &'static str;

    fn write(&self, outline: &Outline) -> Result<Vec<u8>, FormatError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocxWriter {
    fn styles(docx: Docx) -> Docx {
        let title = Style::new("Title", StyleType::Paragraph)
            .name("Title")
            .size(TITLE_SIZE)
            .bold();

        HEADING_SIZES
            .iter()
            .enumerate()
            .fold(docx.add_style(title), |docx, (i, size)| {
                let level = i + 1;
                docx.add_style(
                    Style::new(format!("Heading{level}"), StyleType::Paragraph)
                        .name(format!("Heading {level}"))
                        .size(*size)
                        .bold(),
                )
            })
    }

    fn bullets(docx: Docx) -> Docx {
        docx.add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )
                .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
    }

    fn paragraph(block: &Block) -> Paragraph {
        match block {
            Block::Heading { text, depth } => Paragraph::new()
                .add_run(Run::new().add_text(text))
                .style(&format!("Heading{depth}")),
            Block::Paragraph { text } => Paragraph::new().add_run(Run::new().add_text(text)),
            Block::Bullet { text } => Paragraph::new()
                .add_run(Run::new().add_text(text))
                .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
        }
    }
}

impl DocumentWriter for DocxWriter {
    fn content_type(&self) -> &'static str {
        DOCX_CONTENT_TYPE
    }

    fn file_name(&self) -> &'static str {
        DOCX_FILE_NAME
    }

    fn write(&self, outline: &Outline) -> Result<Vec<u8>, FormatError> {
        let title = Paragraph::new()
            .add_run(Run::new().add_text(&outline.title))
            .style("Title");

        let docx = Self::bullets(Self::styles(Docx::new())).add_paragraph(title);
        let docx = outline
            .blocks
            .iter()
            .fold(docx, |docx, block| docx.add_paragraph(Self::paragraph(block)));

        let mut buf = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buf)
            .map_err(|e| FormatError::Pack(e.to_string()))?;

        Ok(buf.into_inner())
    }
}
