use async_trait::async_trait;

use crate::model::{normalize_for_search, EntityType, SearchOptions, SearchResponse, SearchResult};
use crate::provider::{SearchError, SearchProvider};
use crate::routing::{APP_ID_PREFIX, HELP_DOC_ID_PREFIX};

#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub kind: EntityType,
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub keywords: &'static [&'static str],
}

impl CatalogEntry {
    pub fn id(&self) -> String {
        match self.kind {
            EntityType::HelpDoc => format!("{HELP_DOC_ID_PREFIX}{}", self.slug),
            _ => format!("{APP_ID_PREFIX}{}", self.slug),
        }
    }

    fn matches(&self, normalized_query: &str) -> bool {
        normalize_for_search(self.title).contains(normalized_query)
            || self
                .keywords
                .iter()
                .any(|kw| normalize_for_search(kw).contains(normalized_query))
    }

    fn to_result(self) -> SearchResult {
        SearchResult::new(&self.id(), self.kind, self.title).with_content(self.summary)
    }
}

pub fn built_in_entries() -> &'static [CatalogEntry] {
    &[
        CatalogEntry {
            kind: EntityType::App,
            slug: "contacts",
            title: "Contacts",
            summary: "People, phone numbers and addresses",
            keywords: &["people", "address book", "phone"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "notes",
            title: "Notes",
            summary: "Write and organize notes",
            keywords: &["memo", "journal", "markdown"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "email",
            title: "Email",
            summary: "Read and send mail",
            keywords: &["mail", "inbox"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "files",
            title: "Files",
            summary: "Browse stored files",
            keywords: &["storage", "upload", "folder"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "documents",
            title: "Documents",
            summary: "PDFs and text documents",
            keywords: &["pdf", "docs"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "photos",
            title: "Photos",
            summary: "Photo library",
            keywords: &["images", "pictures", "gallery"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "videos",
            title: "Videos",
            summary: "Video library",
            keywords: &["movies", "clips"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "audio",
            title: "Audio",
            summary: "Music, albums and playlists",
            keywords: &["music", "songs", "playlist", "album"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "ai",
            title: "AI Chat",
            summary: "Conversations with the assistant",
            keywords: &["assistant", "chat", "llm"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "keychain",
            title: "Keychain",
            summary: "Stored keys and credentials",
            keywords: &["keys", "passwords", "credentials"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "analytics",
            title: "Analytics",
            summary: "Usage and duration charts",
            keywords: &["stats", "charts", "duration"],
        },
        CatalogEntry {
            kind: EntityType::App,
            slug: "settings",
            title: "Settings",
            summary: "Preferences and configuration",
            keywords: &["preferences", "config", "options"],
        },
        CatalogEntry {
            kind: EntityType::HelpDoc,
            slug: "getting-started",
            title: "Getting Started",
            summary: "First steps with the desktop and windows",
            keywords: &["intro", "welcome", "basics"],
        },
        CatalogEntry {
            kind: EntityType::HelpDoc,
            slug: "search",
            title: "Searching Your Data",
            summary: "Filters, keyboard shortcuts and result types",
            keywords: &["find", "filters", "shortcuts"],
        },
        CatalogEntry {
            kind: EntityType::HelpDoc,
            slug: "backup-restore",
            title: "Backup and Restore",
            summary: "Export and import your encrypted database",
            keywords: &["export", "import", "backup"],
        },
        CatalogEntry {
            kind: EntityType::HelpDoc,
            slug: "keyboard-shortcuts",
            title: "Keyboard Shortcuts",
            summary: "Every shortcut in one place",
            keywords: &["keys", "hotkeys", "shortcuts"],
        },
    ]
}

pub fn search_catalog(query: &str, options: &SearchOptions) -> SearchResponse {
    let query = query.trim();
    let normalized = normalize_for_search(query);
    let matches: Vec<&CatalogEntry> = built_in_entries()
        .iter()
        .filter(|entry| options.admits(entry.kind))
        .filter(|entry| {
            query.is_empty() || (!normalized.is_empty() && entry.matches(&normalized))
        })
        .collect();

    SearchResponse {
        count: matches.len(),
        hits: matches
            .into_iter()
            .take(options.limit)
            .map(|entry| entry.to_result())
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogProvider;

#[async_trait]
impl SearchProvider for CatalogProvider {
    async fn search(
        &self,
        text: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse, SearchError> {
        Ok(search_catalog(text, options))
    }
}
