#![doc = "repo-to-pdf-core: traversal, pagination and PDF assembly for rendering a remote repository."]

//! This crate contains the whole document-generation pipeline. Process-level
//! concerns (argument parsing, config files, logging setup) live in the CLI crate.
//!
//! # Usage
//! Build a [`fetch::GitHubFetcher`] (or any [`contract::ContentFetcher`]), call
//! [`assemble::assemble`], then [`export::save`] the returned document.

pub mod assemble;
pub mod classify;
pub mod contract;
pub mod document;
pub mod export;
pub mod fetch;
pub mod page_writer;
pub mod structure;
pub mod traverse;

pub use assemble::{assemble, GenerationRequest};
pub use contract::{Category, ContentFetcher, ContentReadError, EntryKind, FetchError, RemoteEntry};
pub use document::Document;
