//! Orchestrates one generation run: title block, structure summary, deep walk,
//! and the closing watermark.
//!
//! # Navigation
//! - Entry point: [`assemble`]
//! - Input: [`GenerationRequest`]
//!
//! # Error Handling
//! A [`FetchError`] from any listing aborts the run and the partial document is
//! dropped; file read failures never surface here, the walker renders them.

use chrono::{DateTime, TimeZone};
use tracing::{error, info};

use crate::contract::{ContentFetcher, FetchError};
use crate::document::{Color, Document, FontFamily, PlacedLine, TextStyle};
use crate::page_writer::{BlockStyle, PageWriter};
use crate::structure;
use crate::traverse::Walker;

const TITLE_SIZE: f32 = 14.0;
const TITLE_ADVANCE: f32 = 8.0;
const BRANCH_SIZE: f32 = 10.0;
const BRANCH_ADVANCE: f32 = 10.0;
const SUMMARY_HEADING_SIZE: f32 = 10.0;
const SUMMARY_BODY: BlockStyle = BlockStyle {
    indent: 15.0,
    code: false,
    font_size: 8.0,
    color: Color::BLACK,
};

const WATERMARK_X: f32 = 10.0;
/// Distance of the watermark baseline above the bottom of the printable area.
const WATERMARK_LIFT: f32 = 10.0;
const WATERMARK_STYLE: TextStyle = TextStyle {
    family: FontFamily::Proportional,
    size: 10.0,
    color: Color::grey(150),
};

/// What to render. Identifiers are trusted as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub owner: String,
    pub repo: String,
    /// Branch, tag or commit.
    pub reference: String,
    pub include_empty_directories: bool,
}

/// Render the whole repository behind `fetcher` into a finished document.
pub async fn assemble<F, Tz>(
    fetcher: &F,
    request: &GenerationRequest,
    generated_at: DateTime<Tz>,
) -> Result<Document, FetchError>
where
    F: ContentFetcher + ?Sized,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    info!(
        owner = %request.owner,
        repo = %request.repo,
        reference = %request.reference,
        include_empty = request.include_empty_directories,
        "[ASSEMBLE] Starting document generation"
    );

    let mut writer = PageWriter::default();
    writer.write_heading(
        &format!("Repository: {}/{}", request.owner, request.repo),
        BlockStyle::heading(TITLE_SIZE),
        TITLE_ADVANCE,
    );
    writer.write_heading(
        &format!("Branch: {}", request.reference),
        BlockStyle::heading(BRANCH_SIZE),
        BRANCH_ADVANCE,
    );

    let root_listing = fetcher.list("").await.map_err(|e| {
        error!(error = %e, "[ASSEMBLE] Failed to list repository root");
        e
    })?;

    let summary = structure::format(&structure::build(&root_listing, ""));
    writer.write_block("Directory Structure:", BlockStyle::heading(SUMMARY_HEADING_SIZE));
    writer.write_block(summary.trim_end_matches('\n'), SUMMARY_BODY);

    Walker::new(fetcher, &mut writer, request.include_empty_directories)
        .render_listing(root_listing, 0)
        .await
        .map_err(|e| {
            error!(error = %e, "[ASSEMBLE] Traversal aborted");
            e
        })?;

    stamp_watermark(&mut writer, &watermark_text(&generated_at));

    let document = writer.into_document();
    info!(pages = document.page_count(), "[ASSEMBLE] Document complete");
    Ok(document)
}

/// `PDF generated on Oct 18, 2026, 09:05 PM on RepoToPDF.com`
pub fn watermark_text<Tz>(generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "PDF generated on {} on RepoToPDF.com",
        generated_at.format("%b %-d, %Y, %I:%M %p")
    )
}

/// Placed directly on the last page near the bottom margin, bypassing the cursor.
fn stamp_watermark(writer: &mut PageWriter, text: &str) {
    let document = writer.document_mut();
    let last_page = document.page_count() - 1;
    let y = document.printable_height() - WATERMARK_LIFT;
    document.place_on(
        last_page,
        PlacedLine {
            text: text.to_string(),
            x: WATERMARK_X,
            y,
            style: WATERMARK_STYLE,
        },
    );
}
