//! Pagination engine: flows wrapped text blocks onto fixed-size pages.
//!
//! A [`PageWriter`] is created per generation run and exclusively owns both the
//! [`Document`] and its [`Cursor`]; every render goes through it.

use tracing::debug;

use crate::document::{split_text_to_size, Color, Document, FontFamily, PlacedLine, TextStyle};

/// Baseline of the first line on a fresh page.
pub const TOP_MARGIN: f32 = 20.0;
/// Maximum width of a wrapped line.
pub const MAX_LINE_WIDTH: f32 = 180.0;
/// Intra-block line spacing relative to the line height.
pub const LINE_SPACING: f32 = 0.8;
/// Extra space after every block.
pub const BLOCK_GAP: f32 = 5.0;
/// Room required before a block may start on the current page.
pub const MIN_BLOCK_ROOM: f32 = 10.0;

/// Vertical write position on the active page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    vertical_position: f32,
    page_height: f32,
}

impl Cursor {
    fn new(page_height: f32) -> Self {
        Self {
            vertical_position: TOP_MARGIN,
            page_height,
        }
    }

    pub fn vertical_position(&self) -> f32 {
        self.vertical_position
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    fn reset(&mut self) {
        self.vertical_position = TOP_MARGIN;
    }

    fn fits(&self, required: f32) -> bool {
        self.vertical_position + required <= self.page_height
    }

    /// Moves down, never past the page height budget.
    fn advance(&mut self, by: f32) {
        self.vertical_position = (self.vertical_position + by).min(self.page_height);
    }
}

/// Presentation of one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    /// Left edge in mm.
    pub indent: f32,
    pub code: bool,
    pub font_size: f32,
    pub color: Color,
}

impl BlockStyle {
    /// Entry marker lines.
    pub fn marker() -> Self {
        Self {
            indent: 10.0,
            code: false,
            font_size: 8.0,
            color: Color::BLACK,
        }
    }

    /// File bodies.
    pub fn code() -> Self {
        Self {
            indent: 15.0,
            code: true,
            font_size: 7.0,
            color: Color::BLACK,
        }
    }

    /// In-document read failures.
    pub fn error() -> Self {
        Self {
            indent: 15.0,
            code: false,
            font_size: 8.0,
            color: Color::RED,
        }
    }

    pub fn heading(font_size: f32) -> Self {
        Self {
            indent: 10.0,
            code: false,
            font_size,
            color: Color::BLACK,
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            family: if self.code {
                FontFamily::Monospace
            } else {
                FontFamily::Proportional
            },
            size: self.font_size,
            color: self.color,
        }
    }
}

pub struct PageWriter {
    document: Document,
    cursor: Cursor,
}

impl Default for PageWriter {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

impl PageWriter {
    pub fn new(document: Document) -> Self {
        let cursor = Cursor::new(document.printable_height());
        Self { document, cursor }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Write one block of text, breaking pages between lines as needed.
    pub fn write_block(&mut self, text: &str, style: BlockStyle) {
        self.break_page_if_needed(MIN_BLOCK_ROOM);

        let text_style = style.text_style();
        let line_height = text_style.line_height();
        for line in split_text_to_size(text, &text_style, MAX_LINE_WIDTH) {
            self.break_page_if_needed(line_height);
            self.document.place(PlacedLine {
                text: line,
                x: style.indent,
                y: self.cursor.vertical_position,
                style: text_style,
            });
            self.cursor.advance(line_height * LINE_SPACING);
        }

        self.cursor.advance(BLOCK_GAP);
    }

    /// Write a single unwrapped line at the cursor and move down by `advance`.
    pub fn write_heading(&mut self, text: &str, style: BlockStyle, advance: f32) {
        let text_style = style.text_style();
        self.break_page_if_needed(text_style.line_height());
        self.document.place(PlacedLine {
            text: text.to_string(),
            x: style.indent,
            y: self.cursor.vertical_position,
            style: text_style,
        });
        self.cursor.advance(advance);
    }

    fn break_page_if_needed(&mut self, required: f32) {
        if self.cursor.fits(required) {
            return;
        }
        self.document.new_page();
        self.cursor.reset();
        debug!(
            pages = self.document.page_count(),
            "[PAGE] Started new page"
        );
    }
}
