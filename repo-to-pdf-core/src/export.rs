//! Turns a finished [`Document`] into PDF bytes and saves it.
//!
//! Text is drawn with the builtin Helvetica and Courier fonts, which only cover
//! Latin-1; anything outside it is written as `?`.

use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color as PdfColor, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, Rgb,
    TextItem,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::document::{Color, Document, FontFamily, PlacedLine};

pub const OUTPUT_SUFFIX: &str = "_full_contents.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write PDF to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `<repo>_full_contents.pdf`
pub fn output_filename(repo: &str) -> String {
    format!("{repo}{OUTPUT_SUFFIX}")
}

/// Serialise the document. Page geometry is taken from the document itself.
pub fn to_pdf_bytes(document: &Document, title: &str) -> Vec<u8> {
    let pages: Vec<PdfPage> = document
        .pages()
        .iter()
        .map(|page| {
            let ops = page
                .lines
                .iter()
                .flat_map(|line| line_ops(line, document.height()))
                .collect();
            PdfPage::new(Mm(document.width()), Mm(document.height()), ops)
        })
        .collect();

    let mut warnings = Vec::new();
    let bytes = PdfDocument::new(title)
        .with_pages(pages)
        .save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        warn!(count = warnings.len(), "[EXPORT] PDF writer reported warnings");
    }
    bytes
}

/// Write the document into `output_dir` under the name derived from `repo`.
pub async fn save(document: &Document, repo: &str, output_dir: &Path) -> Result<PathBuf, ExportError> {
    let path = output_dir.join(output_filename(repo));
    let bytes = to_pdf_bytes(document, repo);

    if let Err(source) = tokio::fs::create_dir_all(output_dir).await {
        error!(error = ?source, path = %output_dir.display(), "[EXPORT] Failed to create output directory");
        return Err(ExportError::Io {
            path: output_dir.to_path_buf(),
            source,
        });
    }
    if let Err(source) = tokio::fs::write(&path, &bytes).await {
        error!(error = ?source, path = %path.display(), "[EXPORT] Failed to write PDF");
        return Err(ExportError::Io { path, source });
    }

    info!(
        path = %path.display(),
        size = bytes.len(),
        pages = document.page_count(),
        "[EXPORT] Saved PDF"
    );
    Ok(path)
}

fn line_ops(line: &PlacedLine, page_height: f32) -> Vec<Op> {
    let font = builtin_font(line.style.family);
    vec![
        Op::StartTextSection,
        Op::SetFillColor {
            col: pdf_color(line.style.color),
        },
        Op::SetFontSizeBuiltinFont {
            size: Pt(line.style.size),
            font,
        },
        Op::SetTextCursor {
            pos: Point {
                x: Mm(line.x).into(),
                y: Mm(page_height - line.y).into(),
            },
        },
        Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(latin1_only(&line.text))],
            font,
        },
        Op::EndTextSection,
    ]
}

fn builtin_font(family: FontFamily) -> BuiltinFont {
    match family {
        FontFamily::Proportional => BuiltinFont::Helvetica,
        FontFamily::Monospace => BuiltinFont::Courier,
    }
}

fn pdf_color(color: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
        None,
    ))
}

fn latin1_only(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch,
            _ => '?',
        })
        .collect()
}
