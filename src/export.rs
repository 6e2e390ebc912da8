//! PDF export. Translates a [`DocumentDescription`] into a genpdf document
//! and either writes it next to the current working directory ("download") or
//! opens it through the platform handler.
//!
//! The renderer is a black box: any failure it reports is folded into a
//! single human-readable [`ExportError`] and surfaced once, with no retry.
//! Re-invoking the export with the same description is always safe because
//! assembly is a pure read of the store.

use std::env;
use std::path::PathBuf;

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::{Document, Element, PaperSize, SimplePageDecorator};
use thiserror::Error;

use crate::document::DocumentDescription;

/// Directory the font family is loaded from, relative to the working
/// directory. The repository ships the directory without the `.ttf` files;
/// see the README for which faces to drop in.
const FONT_DIR: &str = "assets/fonts";
/// Font family name; the loader expects `<family>-Regular.ttf`,
/// `-Bold.ttf`, `-Italic.ttf`, and `-BoldItalic.ttf` under [`FONT_DIR`].
/// Noto Sans TC covers both the English and Traditional Chinese content.
const FONT_FAMILY: &str = "NotoSansTC";

/// Page margins in millimetres, approximating the original 40pt letter
/// layout.
const PAGE_MARGIN_MM: i32 = 14;
const BASE_FONT_SIZE: u8 = 11;
const TITLE_FONT_SIZE: u8 = 14;
const BODY_FONT_SIZE: u8 = 12;
/// Verse table column weights, matching the original 15%/85% split.
const TABLE_WEIGHTS: [usize; 2] = [3, 17];

/// What to do with the rendered artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Write `church-announcements-<lang>.pdf` into the working directory.
    Download,
    /// Render to a temporary file and hand it to the platform opener.
    Open,
}

/// Everything that can go wrong on the export path. Each variant renders to
/// one displayable sentence; the UI shows it in the footer and moves on.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to load PDF fonts from {FONT_DIR}: {0}")]
    Fonts(String),
    #[error("failed to render the PDF: {0}")]
    Render(String),
    #[error("failed to open the rendered PDF: {0}")]
    Open(String),
}

/// Deterministic artifact name for one language's export.
pub fn export_file_name(doc: &DocumentDescription) -> String {
    format!("church-announcements-{}.pdf", doc.language.file_tag())
}

/// Render `doc` and deliver it according to `mode`, returning the path of
/// the written artifact.
pub fn export(doc: &DocumentDescription, mode: ExportMode) -> Result<PathBuf, ExportError> {
    let document = build_pdf(doc)?;
    let file_name = export_file_name(doc);
    let path = match mode {
        ExportMode::Download => PathBuf::from(&file_name),
        ExportMode::Open => env::temp_dir().join(&file_name),
    };

    document
        .render_to_file(&path)
        .map_err(|err| ExportError::Render(err.to_string()))?;

    if mode == ExportMode::Open {
        open::that(&path).map_err(|err| ExportError::Open(err.to_string()))?;
    }

    Ok(path)
}

/// Map the renderer-agnostic description onto genpdf elements: bold title,
/// bold summary, then per day a bold header, a framed two-column verse table
/// with a bold reference column, and an italic message line.
fn build_pdf(doc: &DocumentDescription) -> Result<Document, ExportError> {
    let family = genpdf::fonts::from_files(FONT_DIR, FONT_FAMILY, None)
        .map_err(|err| ExportError::Fonts(err.to_string()))?;

    let mut document = Document::new(family);
    document.set_title(doc.title.as_str());
    document.set_paper_size(PaperSize::Letter);
    document.set_font_size(BASE_FONT_SIZE);
    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    document.set_page_decorator(decorator);

    document.push(
        Paragraph::new(doc.title.as_str())
            .styled(Style::new().bold().with_font_size(TITLE_FONT_SIZE)),
    );
    document.push(Break::new(0.5));
    for line in doc.summary.lines() {
        document
            .push(Paragraph::new(line).styled(Style::new().bold().with_font_size(BODY_FONT_SIZE)));
    }

    for day in &doc.days {
        document.push(Break::new(0.5));
        document.push(
            Paragraph::new(day.header.as_str())
                .styled(Style::new().bold().with_font_size(BODY_FONT_SIZE)),
        );

        if !day.rows.is_empty() {
            let mut table = TableLayout::new(TABLE_WEIGHTS.to_vec());
            table.set_cell_decorator(FrameCellDecorator::new(true, true, false));
            for row in &day.rows {
                table
                    .row()
                    .element(
                        Paragraph::new(row.reference.as_str())
                            .styled(Style::new().bold().with_font_size(BODY_FONT_SIZE))
                            .padded(1),
                    )
                    .element(
                        Paragraph::new(row.text.as_str())
                            .styled(Style::new().with_font_size(BODY_FONT_SIZE))
                            .padded(1),
                    )
                    .push()
                    .map_err(|err| ExportError::Render(err.to_string()))?;
            }
            document.push(table);
        }

        if let Some(message) = &day.message {
            document.push(
                Paragraph::new(message.as_str())
                    .styled(Style::new().italic().with_font_size(BODY_FONT_SIZE)),
            );
        }
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentDescription;
    use crate::models::Language;

    #[test]
    fn file_names_are_deterministic_per_language() {
        let en = DocumentDescription {
            language: Language::English,
            title: String::new(),
            summary: String::new(),
            days: Vec::new(),
        };
        let zh = DocumentDescription {
            language: Language::Chinese,
            ..en.clone()
        };
        assert_eq!(export_file_name(&en), "church-announcements-en.pdf");
        assert_eq!(export_file_name(&zh), "church-announcements-zh.pdf");
    }

    #[test]
    fn missing_fonts_surface_as_a_single_error() {
        // The test environment ships no font files, so the build fails at
        // font loading with the displayable variant rather than a panic.
        let doc = DocumentDescription {
            language: Language::English,
            title: "title".to_string(),
            summary: "summary".to_string(),
            days: Vec::new(),
        };
        let err = build_pdf(&doc).err().expect("font loading should fail");
        assert!(matches!(err, ExportError::Fonts(_)));
        assert!(err.to_string().contains("assets/fonts"));
    }
}
