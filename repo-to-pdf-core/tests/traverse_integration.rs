mod common;

use common::{dir, file, FakeRepo};
use repo_to_pdf_core::contract::{FetchError, MockContentFetcher, RemoteEntry};
use repo_to_pdf_core::document::Color;
use repo_to_pdf_core::page_writer::PageWriter;
use repo_to_pdf_core::traverse::Walker;

async fn walk_root(repo: &FakeRepo, include_empty: bool) -> Result<PageWriter, FetchError> {
    let mut writer = PageWriter::default();
    Walker::new(repo, &mut writer, include_empty)
        .walk("", 0)
        .await?;
    Ok(writer)
}

#[tokio::test]
async fn renders_depth_first_pre_order_in_listing_order() {
    // Listing order is deliberately not alphabetical.
    let repo = FakeRepo::new()
        .dir("", vec![dir("zeta"), file("b.txt"), dir("alpha")])
        .dir("zeta", vec![file("zeta/z.md"), dir("zeta/inner")])
        .dir("zeta/inner", vec![file("zeta/inner/a.rs")])
        .dir("alpha", vec![file("alpha/x.txt")])
        .content("zeta/z.md", "Z")
        .content("zeta/inner/a.rs", "A")
        .content("b.txt", "B")
        .content("alpha/x.txt", "X");

    let writer = walk_root(&repo, false).await.unwrap();

    assert_eq!(
        writer.document().texts(),
        vec![
            "directory: zeta",
            "  file: zeta/z.md",
            "Z",
            "  directory: zeta/inner",
            "    file: zeta/inner/a.rs",
            "A",
            "file: b.txt",
            "B",
            "directory: alpha",
            "  file: alpha/x.txt",
            "X",
        ]
    );
    assert_eq!(
        repo.calls(),
        vec![
            "list:",
            "list:zeta",
            "read:zeta/z.md",
            "list:zeta/inner",
            "read:zeta/inner/a.rs",
            "read:b.txt",
            "list:alpha",
            "read:alpha/x.txt",
        ]
    );
}

#[tokio::test]
async fn empty_directory_is_skipped_without_touching_siblings() {
    let repo = FakeRepo::new()
        .dir("", vec![file("a.txt"), dir("empty"), file("c.txt")])
        .content("a.txt", "a")
        .content("c.txt", "c");

    let writer = walk_root(&repo, false).await.unwrap();

    assert_eq!(
        writer.document().texts(),
        vec!["file: a.txt", "a", "file: c.txt", "c"]
    );
    let listings: Vec<String> = repo
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("list:"))
        .collect();
    assert_eq!(listings, vec!["list:", "list:empty"]);
}

#[tokio::test]
async fn empty_directory_is_kept_when_requested() {
    let repo = FakeRepo::new()
        .dir("", vec![dir("empty"), file("a.txt")])
        .content("a.txt", "a");

    let writer = walk_root(&repo, true).await.unwrap();

    assert_eq!(
        writer.document().texts(),
        vec!["directory: empty", "file: a.txt", "a"]
    );
}

#[tokio::test]
async fn failed_read_renders_error_line_and_continues() {
    let repo = FakeRepo::new()
        .dir("", vec![file("a.txt"), file("broken.txt"), file("c.txt")])
        .content("a.txt", "A")
        .content("c.txt", "C");

    let writer = walk_root(&repo, false).await.unwrap();
    let lines: Vec<_> = writer.document().lines().map(|(_, l)| l.clone()).collect();
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();

    assert_eq!(texts[..3], ["file: a.txt", "A", "file: broken.txt"]);
    assert!(texts[3].starts_with("Error reading file: "));
    assert!(texts[3].contains("500"));
    assert_eq!(lines[3].style.color, Color::RED);
    assert_eq!(texts[4..], ["file: c.txt", "C"]);
}

#[tokio::test]
async fn license_and_media_markers_are_distinguished() {
    let repo = FakeRepo::new()
        .dir("", vec![file("LICENSE"), file("shot.PNG")])
        .content("LICENSE", "MIT");

    let writer = walk_root(&repo, false).await.unwrap();

    assert_eq!(
        writer.document().texts(),
        vec!["license file: LICENSE", "MIT", "multimedia file: shot.PNG"]
    );
    assert!(!repo.calls().contains(&"read:shot.PNG".to_string()));
}

#[tokio::test]
async fn nested_listing_failure_aborts_walk() {
    let repo = FakeRepo::new()
        .dir("", vec![file("a.txt"), dir("sub"), file("never.txt")])
        .content("a.txt", "a")
        .fail_listing("sub");

    let result = walk_root(&repo, false).await;

    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    assert!(!repo.calls().contains(&"read:never.txt".to_string()));
}

#[tokio::test]
async fn empty_directory_triggers_no_recursive_listing() {
    let mut fetcher = MockContentFetcher::new();
    fetcher
        .expect_list()
        .withf(|path: &str| path.is_empty())
        .times(1)
        .returning(|_| {
            Ok(vec![
                RemoteEntry::directory("empty"),
                RemoteEntry::file("keep.md", "https://raw.example/keep.md"),
            ])
        });
    fetcher
        .expect_list()
        .withf(|path: &str| path == "empty")
        .times(1)
        .returning(|_| Ok(vec![]));
    fetcher
        .expect_read_raw()
        .times(1)
        .returning(|_| Ok("# keep".to_string()));

    let mut writer = PageWriter::default();
    Walker::new(&fetcher, &mut writer, false)
        .walk("", 0)
        .await
        .expect("walk should succeed");

    assert_eq!(writer.document().texts(), vec!["file: keep.md", "# keep"]);
}
