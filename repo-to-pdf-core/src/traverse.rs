//! Depth-first, pre-order walk of a remote tree, rendering as it goes.
//!
//! Fetches are strictly sequential: one listing, then each child in listing
//! order, recursing into directories before moving on to the next sibling.
//! A failed listing aborts the walk; a failed file read is rendered in place.

use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::contract::{Category, ContentFetcher, FetchError, RemoteEntry};
use crate::page_writer::{BlockStyle, PageWriter};

/// Indentation prepended to marker lines once per depth level.
pub const INDENT_UNIT: &str = "  ";

pub struct Walker<'a, F: ContentFetcher + ?Sized> {
    fetcher: &'a F,
    writer: &'a mut PageWriter,
    include_empty_directories: bool,
}

impl<'a, F: ContentFetcher + ?Sized> Walker<'a, F> {
    pub fn new(fetcher: &'a F, writer: &'a mut PageWriter, include_empty_directories: bool) -> Self {
        Self {
            fetcher,
            writer,
            include_empty_directories,
        }
    }

    /// Fetch the listing of `path` and render it at `depth`.
    pub async fn walk(&mut self, path: &str, depth: usize) -> Result<(), FetchError> {
        let entries = self.fetcher.list(path).await?;
        debug!(path, depth, entries = entries.len(), "[WALK] Listed directory");
        self.render_listing(entries, depth).await
    }

    /// Render an already fetched listing at `depth`, recursing into directories.
    pub fn render_listing(
        &mut self,
        entries: Vec<RemoteEntry>,
        depth: usize,
    ) -> BoxFuture<'_, Result<(), FetchError>> {
        async move {
            for entry in entries {
                let category = classify(&entry);
                if category == Category::Directory {
                    self.visit_directory(&entry, depth).await?;
                    continue;
                }
                self.write_marker(&entry, category, depth);
                if category.renders_content() {
                    self.render_content(&entry).await;
                }
            }
            Ok(())
        }
        .boxed()
    }

    async fn visit_directory(&mut self, entry: &RemoteEntry, depth: usize) -> Result<(), FetchError> {
        let children = self.fetcher.list(&entry.path).await?;
        if children.is_empty() && !self.include_empty_directories {
            info!(path = %entry.path, "[WALK] Skipping empty directory");
            return Ok(());
        }
        self.write_marker(entry, Category::Directory, depth);
        self.render_listing(children, depth + 1).await
    }

    async fn render_content(&mut self, entry: &RemoteEntry) {
        match self.fetcher.read_raw(entry).await {
            Ok(text) => self.writer.write_block(&text, BlockStyle::code()),
            Err(e) => {
                warn!(path = %entry.path, error = %e, "[WALK] Could not read file content");
                self.writer
                    .write_block(&format!("Error reading file: {e}"), BlockStyle::error());
            }
        }
    }

    fn write_marker(&mut self, entry: &RemoteEntry, category: Category, depth: usize) {
        debug!(path = %entry.path, ?category, depth, "[WALK] Rendering entry");
        let line = marker_line(entry, category, depth);
        self.writer.write_block(&line, BlockStyle::marker());
    }
}

/// `<indent><label>: <path>`
pub fn marker_line(entry: &RemoteEntry, category: Category, depth: usize) -> String {
    format!(
        "{}{}: {}",
        INDENT_UNIT.repeat(depth),
        category.marker_label(),
        entry.path
    )
}
