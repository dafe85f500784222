//! In-memory paginated document: pages of positioned, styled text lines.
//!
//! Units are millimetres on an A4 portrait page, y measured from the top edge
//! (the PDF export flips it). Font sizes are points.
//!
//! The measurement facility uses the standard metrics of the two builtin PDF
//! fonts the export draws with, so wrapping here matches what ends up on paper.

/// A4 portrait.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

/// Distance between the printable area and the bottom edge.
pub const BOTTOM_MARGIN: f32 = 20.0;

/// Ratio between a font size and the height of a line set in it.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

const MM_PER_PT: f32 = 25.4 / 72.0;
const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// Proportional, Helvetica metrics.
    Proportional,
    /// Fixed pitch, Courier metrics.
    Monospace,
}

impl FontFamily {
    /// Advance width of `ch` in thousandths of an em.
    fn glyph_width(&self, ch: char) -> u16 {
        match self {
            FontFamily::Monospace => 600,
            FontFamily::Proportional => helvetica_width(ch),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: u8) -> Self {
        Self::rgb(level, level, level)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    /// Height of one line in document units.
    ///
    /// The size (points) scaled by [`LINE_HEIGHT_FACTOR`] is used as-is in
    /// document units, which is what gives listings their open spacing.
    pub fn line_height(&self) -> f32 {
        self.size * LINE_HEIGHT_FACTOR
    }

    /// Width of `text` in millimetres.
    pub fn text_width(&self, text: &str) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(self.family.glyph_width(ch)))
            .sum();
        units as f32 / 1000.0 * self.size * MM_PER_PT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Left edge, mm from the left of the page.
    pub x: f32,
    /// Baseline, mm from the top of the page.
    pub y: f32,
    pub style: TextStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pages: Vec<Page>,
    width: f32,
    height: f32,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A4 document holding one empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Lowest baseline a line may have.
    pub fn printable_height(&self) -> f32 {
        self.height - BOTTOM_MARGIN
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
    }

    /// Append a line to the last page.
    pub fn place(&mut self, line: PlacedLine) {
        let last = self.pages.len() - 1;
        self.pages[last].lines.push(line);
    }

    /// Append a line to a specific page. Returns false if the page does not exist.
    pub fn place_on(&mut self, page_index: usize, line: PlacedLine) -> bool {
        match self.pages.get_mut(page_index) {
            Some(page) => {
                page.lines.push(line);
                true
            }
            None => false,
        }
    }

    /// Every line with its page index, in placement order.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &PlacedLine)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(index, page)| page.lines.iter().map(move |line| (index, line)))
    }

    /// Texts of every line, in placement order.
    pub fn texts(&self) -> Vec<&str> {
        self.lines().map(|(_, line)| line.text.as_str()).collect()
    }
}

/// Break `text` into lines no wider than `max_width` when set in `style`.
///
/// Hard line breaks are kept, lines are filled word by word, and a word that
/// alone exceeds the width is split between characters.
pub fn split_text_to_size(text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    let normalised = text.replace('\r', "").replace('\t', &" ".repeat(TAB_WIDTH));
    normalised
        .split('\n')
        .flat_map(|paragraph| wrap_paragraph(paragraph, style, max_width))
        .collect()
}

fn wrap_paragraph(paragraph: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut started = false;

    for word in paragraph.split(' ') {
        let candidate = if started {
            format!("{current} {word}")
        } else {
            word.to_string()
        };
        if style.text_width(&candidate) <= max_width {
            current = candidate;
            started = true;
            continue;
        }

        if started {
            lines.push(std::mem::take(&mut current));
        }
        started = true;
        if style.text_width(word) <= max_width {
            current = word.to_string();
            continue;
        }

        for ch in word.chars() {
            current.push(ch);
            if current.chars().count() > 1 && style.text_width(&current) > max_width {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    lines.push(current);
    lines
}

/// Standard Helvetica advance widths for printable ASCII; everything else is
/// measured as a digit.
fn helvetica_width(ch: char) -> u16 {
    const ASCII: [u16; 95] = [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
        278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
        278, 278, 278, 469, 556, 333, // '['..'`'
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
        334, 260, 334, 584, // '{'..'~'
    ];
    match ch {
        ' '..='~' => ASCII[(ch as usize) - 0x20],
        _ => 556,
    }
}
