#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use repo_to_pdf_core::contract::{ContentFetcher, ContentReadError, FetchError, RemoteEntry};

/// In-memory remote tree. Unknown paths list as empty directories.
#[derive(Default)]
pub struct FakeRepo {
    listings: HashMap<String, Vec<RemoteEntry>>,
    contents: HashMap<String, String>,
    failing_listings: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, path: &str, children: Vec<RemoteEntry>) -> Self {
        self.listings.insert(path.to_string(), children);
        self
    }

    pub fn content(mut self, path: &str, text: &str) -> Self {
        self.contents.insert(path.to_string(), text.to_string());
        self
    }

    pub fn fail_listing(mut self, path: &str) -> Self {
        self.failing_listings.insert(path.to_string());
        self
    }

    /// `list:<path>` / `read:<path>` in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn file(path: &str) -> RemoteEntry {
    RemoteEntry::file(path, format!("https://raw.example/{path}"))
}

pub fn dir(path: &str) -> RemoteEntry {
    RemoteEntry::directory(path)
}

#[async_trait]
impl ContentFetcher for FakeRepo {
    async fn list(&self, path: &str) -> Result<Vec<RemoteEntry>, FetchError> {
        self.calls.lock().unwrap().push(format!("list:{path}"));
        if self.failing_listings.contains(path) {
            return Err(FetchError::Status {
                status: 404,
                url: format!("https://api.example/{path}"),
            });
        }
        Ok(self.listings.get(path).cloned().unwrap_or_default())
    }

    async fn read_raw(&self, entry: &RemoteEntry) -> Result<String, ContentReadError> {
        self.calls.lock().unwrap().push(format!("read:{}", entry.path));
        self.contents
            .get(&entry.path)
            .cloned()
            .ok_or_else(|| ContentReadError::Status {
                status: 500,
                url: entry.content_ref.clone().unwrap_or_default(),
            })
    }
}
