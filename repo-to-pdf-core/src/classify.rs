//! Pure classification of remote entries into rendering categories.
//!
//! Rules are an ordered list; the first one that matches wins.

use crate::contract::{Category, EntryKind, RemoteEntry};

const LICENSE_MARKERS: &[&str] = &["license", "licence"];

/// Extensions a license file may carry. A license file without any extension also qualifies.
const LICENSE_EXTENSIONS: &[&str] = &[".md", ".txt"];

const MULTIMEDIA_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico", ".tif", ".tiff",
    ".mp4", ".mov", ".avi", ".mkv", ".webm", ".mp3", ".wav", ".ogg", ".flac", ".m4a",
];

type Rule = fn(&RemoteEntry, &Lowered) -> Option<Category>;

const RULES: &[Rule] = &[directory_rule, license_rule, multimedia_rule];

struct Lowered {
    name: String,
    path: String,
}

/// Map an entry to exactly one [`Category`]. Deterministic, no I/O.
pub fn classify(entry: &RemoteEntry) -> Category {
    let lowered = Lowered {
        name: entry.name.to_lowercase(),
        path: entry.path.to_lowercase(),
    };
    RULES
        .iter()
        .find_map(|rule| rule(entry, &lowered))
        .unwrap_or(Category::OrdinaryText)
}

fn directory_rule(entry: &RemoteEntry, _: &Lowered) -> Option<Category> {
    (entry.kind == EntryKind::Directory).then_some(Category::Directory)
}

fn license_rule(_: &RemoteEntry, lowered: &Lowered) -> Option<Category> {
    let mentions_license = LICENSE_MARKERS
        .iter()
        .any(|marker| lowered.name.contains(marker) || lowered.path.contains(marker));
    if !mentions_license {
        return None;
    }
    let license_suffix = !lowered.name.contains('.')
        || LICENSE_EXTENSIONS
            .iter()
            .any(|ext| lowered.path.ends_with(ext));
    license_suffix.then_some(Category::LicenseText)
}

fn multimedia_rule(_: &RemoteEntry, lowered: &Lowered) -> Option<Category> {
    MULTIMEDIA_EXTENSIONS
        .iter()
        .any(|ext| lowered.path.ends_with(ext))
        .then_some(Category::MultimediaBinary)
}
