//! [`ContentFetcher`] backed by the GitHub "contents" REST endpoint.
//!
//! One request per call, no retries, no caching. A configured token is sent as
//! `Authorization: token <value>` on listing requests only; raw downloads go to
//! the `download_url` GitHub hands out.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::contract::{ContentFetcher, ContentReadError, EntryKind, FetchError, RemoteEntry};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Coordinates of one repository at one ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    pub api_base_url: String,
    pub owner: String,
    pub repo: String,
    pub reference: String,
    pub token: Option<String>,
}

impl GitHubConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            reference: reference.into(),
            token: None,
        }
    }

    /// `{base}/repos/{owner}/{repo}/contents/{path}`, every segment percent-encoded.
    fn contents_url(&self, path: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.api_base_url)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.api_base_url.clone()))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

/// One element of a contents listing as GitHub serialises it.
#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    download_url: Option<String>,
}

impl ContentItem {
    /// Symlinks and submodules are not rendered.
    fn into_entry(self) -> Option<RemoteEntry> {
        let kind = match self.kind.as_str() {
            "file" => EntryKind::File,
            "dir" => EntryKind::Directory,
            other => {
                debug!(path = %self.path, kind = other, "[FETCH] Ignoring entry of unsupported type");
                return None;
            }
        };
        Some(RemoteEntry {
            path: self.path,
            name: self.name,
            kind,
            content_ref: self.download_url,
        })
    }
}

pub struct GitHubFetcher {
    client: Client,
    config: GitHubConfig,
}

impl GitHubFetcher {
    pub fn new(config: GitHubConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("repo-to-pdf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        info!(
            owner = %config.owner,
            repo = %config.repo,
            reference = %config.reference,
            token_set = config.token.is_some(),
            "[FETCH] Initialised GitHub fetcher"
        );
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }
}

#[async_trait]
impl ContentFetcher for GitHubFetcher {
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, FetchError> {
        let url = self.config.contents_url(path)?;
        debug!(url = %url, "[FETCH] Requesting listing");

        let mut request = self
            .client
            .get(url.clone())
            .query(&[("ref", self.config.reference.as_str())]);
        if let Some(token) = &self.config.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, url = %url, "[FETCH] Listing request failed");
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "[FETCH] Listing returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let items = response.json::<Vec<ContentItem>>().await.map_err(|e| {
            error!(error = ?e, url = %url, "[FETCH] Failed to decode listing");
            FetchError::Decode(e.to_string())
        })?;

        Ok(items.into_iter().filter_map(ContentItem::into_entry).collect())
    }

    async fn read_raw(&self, entry: &RemoteEntry) -> Result<String, ContentReadError> {
        let url = entry
            .content_ref
            .as_deref()
            .ok_or_else(|| ContentReadError::MissingDownloadUrl(entry.path.clone()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ContentReadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentReadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ContentReadError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contents_url_handles_root_and_nested_paths() {
        let mut config = GitHubConfig::new("octo", "hello", "main");
        config.api_base_url = "http://localhost:9000/".into();
        assert_eq!(
            config.contents_url("").unwrap().as_str(),
            "http://localhost:9000/repos/octo/hello/contents"
        );
        assert_eq!(
            config.contents_url("src/lib").unwrap().as_str(),
            "http://localhost:9000/repos/octo/hello/contents/src/lib"
        );
    }

    #[test]
    fn contents_url_escapes_reserved_characters_per_segment() {
        let config = GitHubConfig::new("octo", "hello", "main");
        assert_eq!(
            config.contents_url("docs/C#/50% off?.md").unwrap().as_str(),
            "https://api.github.com/repos/octo/hello/contents/docs/C%23/50%25%20off%3F.md"
        );
    }

    #[test]
    fn contents_url_keeps_base_path_prefix() {
        let mut config = GitHubConfig::new("octo", "hello", "main");
        config.api_base_url = "https://ghe.example.com/api/v3".into();
        assert_eq!(
            config.contents_url("a").unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/octo/hello/contents/a"
        );
    }

    #[test]
    fn unparsable_base_url_is_reported() {
        let mut config = GitHubConfig::new("octo", "hello", "main");
        config.api_base_url = "not a url".into();
        assert!(matches!(config.contents_url(""), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn listing_json_maps_to_entries_and_drops_submodules() {
        let body = r#"[
            {"name": "src", "path": "src", "type": "dir", "download_url": null, "sha": "a"},
            {"name": "README.md", "path": "README.md", "type": "file",
             "download_url": "https://raw.githubusercontent.com/o/r/main/README.md"},
            {"name": "vendor", "path": "vendor", "type": "submodule", "download_url": null}
        ]"#;
        let items: Vec<ContentItem> = serde_json::from_str(body).unwrap();
        let entries: Vec<RemoteEntry> = items.into_iter().filter_map(ContentItem::into_entry).collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], RemoteEntry::directory("src"));
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(
            entries[1].content_ref.as_deref(),
            Some("https://raw.githubusercontent.com/o/r/main/README.md")
        );
    }
}
