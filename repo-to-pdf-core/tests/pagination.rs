use repo_to_pdf_core::document::Document;
use repo_to_pdf_core::page_writer::{BlockStyle, PageWriter, BLOCK_GAP, LINE_SPACING, TOP_MARGIN};

fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn long_block_breaks_pages_and_stays_within_budget() {
    let mut writer = PageWriter::default();
    let budget = writer.cursor().page_height();
    writer.write_block(&numbered_lines(200), BlockStyle::code());

    let document = writer.document();
    assert!(document.page_count() >= 4, "pages: {}", document.page_count());
    for (_, line) in document.lines() {
        assert!(line.y >= TOP_MARGIN, "line above top margin: {}", line.y);
        assert!(line.y <= budget, "line past budget: {}", line.y);
    }
    assert_eq!(document.lines().count(), 200);
}

#[test]
fn lines_fill_each_page_top_down_and_restart_at_margin() {
    let mut writer = PageWriter::default();
    writer.write_block(&numbered_lines(120), BlockStyle::code());

    let document = writer.document();
    for page in document.pages() {
        let first = page.lines.first().expect("no blank pages");
        assert_eq!(first.y, TOP_MARGIN);
        assert!(page.lines.windows(2).all(|w| w[0].y < w[1].y));
    }
    let order: Vec<&str> = document.texts();
    assert_eq!(order.first(), Some(&"line 0"));
    assert_eq!(order.last(), Some(&"line 119"));
}

#[test]
fn block_exceeding_remaining_space_breaks_at_least_once() {
    let mut writer = PageWriter::default();
    writer.write_block(&numbered_lines(30), BlockStyle::code());
    assert_eq!(writer.document().page_count(), 1);

    let step = BlockStyle::code().text_style().line_height() * LINE_SPACING;
    let remaining = writer.cursor().page_height() - writer.cursor().vertical_position();
    let needed = (remaining / step).ceil() as usize + 5;
    writer.write_block(&numbered_lines(needed), BlockStyle::code());

    assert!(writer.document().page_count() >= 2);
}

#[test]
fn consecutive_blocks_are_separated_by_the_gap() {
    let mut writer = PageWriter::default();
    writer.write_block("first", BlockStyle::marker());
    writer.write_block("second", BlockStyle::marker());

    let ys: Vec<f32> = writer.document().lines().map(|(_, l)| l.y).collect();
    let step = BlockStyle::marker().text_style().line_height() * LINE_SPACING;
    assert!((ys[1] - ys[0] - (step + BLOCK_GAP)).abs() < 1e-3);
}

#[test]
fn writer_can_continue_an_existing_document() {
    let mut document = Document::new();
    document.new_page();
    let mut writer = PageWriter::new(document);
    writer.write_block("on page two", BlockStyle::marker());

    let (page, _) = writer.document().lines().next().unwrap();
    assert_eq!(page, 1);
}
