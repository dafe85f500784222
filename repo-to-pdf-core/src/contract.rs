//! # contract: remote listing interface and the shared data model
//!
//! This module defines the single trait (`ContentFetcher`) through which the
//! traversal engine talks to a remote repository, together with the plain data
//! types that cross that seam.
//!
//! ## Interface & Extensibility
//! - Implement [`ContentFetcher`] to render from a new remote (GitHub is provided
//!   in [`crate::fetch`]).
//! - Listing failures are [`FetchError`] and abort a run; raw-content failures are
//!   [`ContentReadError`] and are rendered in-document instead.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so tests (and downstream crates with the
//!   `test-export-mocks` feature) get a `MockContentFetcher`.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

/// Kind of a remote node, as reported by the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a listed remote path. Immutable once produced by a fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Path relative to the repository root, `/` separated.
    pub path: String,
    /// Last path segment.
    pub name: String,
    pub kind: EntryKind,
    /// Where the raw bytes of a file can be retrieved. `None` for directories.
    pub content_ref: Option<String>,
}

impl RemoteEntry {
    pub fn file(path: impl Into<String>, content_ref: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: last_segment(&path),
            path,
            kind: EntryKind::File,
            content_ref: Some(content_ref.into()),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: last_segment(&path),
            path,
            kind: EntryKind::Directory,
            content_ref: None,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

fn last_segment(path: &str) -> String {
    path.rsplit('/').next().unwrap_or(path).to_string()
}

/// Rendering category of an entry. Every entry maps to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Directory,
    LicenseText,
    MultimediaBinary,
    OrdinaryText,
}

impl Category {
    /// Label used in marker lines.
    pub fn marker_label(&self) -> &'static str {
        match self {
            Category::Directory => "directory",
            Category::LicenseText => "license file",
            Category::MultimediaBinary => "multimedia file",
            Category::OrdinaryText => "file",
        }
    }

    /// Whether the raw content of an entry in this category is fetched and rendered.
    pub fn renders_content(&self) -> bool {
        matches!(self, Category::LicenseText | Category::OrdinaryText)
    }
}

/// A directory listing request did not succeed. Fatal for the whole run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch repository contents: {0}")]
    Transport(String),
    #[error("Failed to fetch repository contents: {url} returned {status}")]
    Status { status: u16, url: String },
    #[error("Failed to decode repository listing: {0}")]
    Decode(String),
    #[error("Failed to fetch repository contents: invalid API base URL {0}")]
    InvalidUrl(String),
}

/// Raw content of a single file could not be read. Recovered locally.
#[derive(Debug, Error)]
pub enum ContentReadError {
    #[error("no download location for {0}")]
    MissingDownloadUrl(String),
    #[error("{0}")]
    Transport(String),
    #[error("{url} returned {status}")]
    Status { status: u16, url: String },
}

/// Resolves remote paths to listings and file content for one repository at one ref.
///
/// Calls are strictly sequential from the traversal; no caching is expected, the
/// same path may be requested more than once per run.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// List the immediate children of `path` (`""` is the repository root), in
    /// the order the remote returns them.
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, FetchError>;

    /// Retrieve the raw text of a file entry.
    async fn read_raw(&self, entry: &RemoteEntry) -> Result<String, ContentReadError>;
}
