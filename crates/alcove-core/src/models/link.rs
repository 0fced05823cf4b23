//! Link model and the built-in starter catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::util::local_id;

/// An external site shown as a workspace pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Record identifier (local-synthetic until remotely persisted, or a
    /// fixed catalog id for built-in entries)
    pub id: String,
    /// Display name
    pub name: String,
    /// Target URL; the natural key for remote upserts
    pub url: String,
    /// Pinned links sort ahead of everything else
    #[serde(default)]
    pub pinned: bool,
    /// Relative sort position; catalog entries without one sort last
    #[serde(default)]
    pub order: Option<i64>,
}

impl Link {
    /// Create a new link with a local-synthetic id.
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: local_id("link-"),
            name: name.into(),
            url: url.into(),
            pinned: false,
            order: None,
        }
    }
}

/// Default link ids retired from the catalog; stored copies are dropped.
const REMOVED_DEFAULT_IDS: [&str; 1] = ["tiktok"];

fn catalog_link(id: &str, name: &str, url: &str, pinned: bool) -> Link {
    Link {
        id: id.to_string(),
        name: name.to_string(),
        url: url.to_string(),
        pinned,
        order: None,
    }
}

/// Built-in starter links seeded into an empty workspace.
#[must_use]
pub fn default_links() -> Vec<Link> {
    vec![
        catalog_link("youtube", "YouTube", "https://www.youtube.com", true),
        catalog_link("gmail", "Gmail", "https://mail.google.com", true),
        catalog_link("calendar", "Google Calendar", "https://calendar.google.com", false),
        catalog_link("maps", "Google Maps", "https://www.google.com/maps", false),
        catalog_link("drive", "Google Drive", "https://drive.google.com", false),
        catalog_link("docs", "Google Docs", "https://docs.google.com", false),
        catalog_link("github", "GitHub", "https://github.com", false),
        catalog_link("chatgpt", "ChatGPT", "https://chatgpt.com", false),
        catalog_link("claude", "Claude", "https://claude.ai", false),
        catalog_link("wikipedia", "Wikipedia", "https://www.wikipedia.org", false),
        catalog_link("reddit", "Reddit", "https://www.reddit.com", false),
        catalog_link("x", "X", "https://x.com", false),
        catalog_link("netflix", "Netflix", "https://www.netflix.com", false),
        catalog_link("spotify", "Spotify", "https://open.spotify.com", false),
        catalog_link("amazon", "Amazon", "https://www.amazon.com", false),
        catalog_link("translate", "Google Translate", "https://translate.google.com", false),
    ]
}

/// Reconcile a stored link list against the built-in catalog.
///
/// Retired defaults are dropped, duplicate ids collapse to their first
/// occurrence, and catalog entries missing from the list are appended in
/// catalog order.
#[must_use]
pub fn merge_defaults(stored: Vec<Link>) -> Vec<Link> {
    let mut seen = HashSet::new();
    let mut merged: Vec<Link> = stored
        .into_iter()
        .filter(|link| !REMOVED_DEFAULT_IDS.contains(&link.id.as_str()))
        .filter(|link| seen.insert(link.id.clone()))
        .collect();

    for candidate in default_links() {
        if seen.insert(candidate.id.clone()) {
            merged.push(candidate);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_link_gets_local_id() {
        let link = Link::new("Example", "https://example.com");
        assert!(link.id.starts_with("link-"));
        assert!(!link.pinned);
        assert_eq!(link.order, None);
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = default_links();
        let ids: HashSet<&str> = catalog.iter().map(|link| link.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_catalog_urls_are_https() {
        assert!(default_links()
            .iter()
            .all(|link| link.url.starts_with("https://")));
    }

    #[test]
    fn test_merge_defaults_seeds_empty_list() {
        assert_eq!(merge_defaults(Vec::new()), default_links());
    }

    #[test]
    fn test_merge_defaults_keeps_stored_entries_first() {
        let mut custom = Link::new("My Blog", "https://blog.example.com");
        custom.id = "blog".to_string();

        let merged = merge_defaults(vec![custom.clone()]);
        assert_eq!(merged[0], custom);
        assert_eq!(merged.len(), default_links().len() + 1);
    }

    #[test]
    fn test_merge_defaults_drops_duplicate_ids() {
        let youtube = catalog_link("youtube", "YouTube again", "https://youtube.com", false);
        let merged = merge_defaults(vec![youtube.clone(), youtube]);

        let count = merged.iter().filter(|link| link.id == "youtube").count();
        assert_eq!(count, 1);
        assert_eq!(merged[0].name, "YouTube again");
    }

    #[test]
    fn test_merge_defaults_filters_retired_ids() {
        let retired = catalog_link("tiktok", "TikTok", "https://www.tiktok.com", false);
        let merged = merge_defaults(vec![retired]);
        assert!(merged.iter().all(|link| link.id != "tiktok"));
    }

    #[test]
    fn test_merge_defaults_does_not_duplicate_existing_defaults() {
        let merged = merge_defaults(default_links());
        assert_eq!(merged, default_links());
    }
}
