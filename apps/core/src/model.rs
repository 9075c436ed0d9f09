use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    App,
    HelpDoc,
    Contact,
    Note,
    Email,
    File,
    Playlist,
    Album,
    AiConversation,
}

impl EntityType {
    pub const ALL: [EntityType; 9] = [
        EntityType::App,
        EntityType::HelpDoc,
        EntityType::Contact,
        EntityType::Note,
        EntityType::Email,
        EntityType::File,
        EntityType::Playlist,
        EntityType::Album,
        EntityType::AiConversation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::HelpDoc => "help_doc",
            Self::Contact => "contact",
            Self::Note => "note",
            Self::Email => "email",
            Self::File => "file",
            Self::Playlist => "playlist",
            Self::Album => "album",
            Self::AiConversation => "ai_conversation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::App => "Apps",
            Self::HelpDoc => "Help Docs",
            Self::Contact => "Contacts",
            Self::Note => "Notes",
            Self::Email => "Emails",
            Self::File => "Files",
            Self::Playlist => "Playlists",
            Self::Album => "Albums",
            Self::AiConversation => "AI Conversations",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::App => "app-window",
            Self::HelpDoc => "book-open",
            Self::Contact => "user",
            Self::Note => "sticky-note",
            Self::Email => "mail",
            Self::File => "file",
            Self::Playlist => "list-music",
            Self::Album => "disc",
            Self::AiConversation => "message-square",
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity type '{0}'")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        EntityType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownEntityType(value.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub entity_type: EntityType,
    pub document: ResultDocument,
}

impl SearchResult {
    pub fn new(id: &str, entity_type: EntityType, title: &str) -> Self {
        Self {
            id: id.to_string(),
            entity_type,
            document: ResultDocument {
                title: title.to_string(),
                content: None,
                metadata: None,
            },
        }
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.document.content = Some(content.to_string());
        self
    }

    pub fn with_metadata(mut self, metadata: &str) -> Self {
        self.document.metadata = Some(metadata.to_string());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<SearchResult>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_types: Option<Vec<EntityType>>,
    pub limit: usize,
}

impl SearchOptions {
    pub fn compose(filters: &FilterSet, limit: usize) -> Self {
        let entity_types = if filters.is_empty() {
            None
        } else {
            Some(filters.as_slice().to_vec())
        };
        Self {
            entity_types,
            limit,
        }
    }

    pub fn admits(&self, kind: EntityType) -> bool {
        self.entity_types
            .as_ref()
            .map(|types| types.contains(&kind))
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterToggle {
    All(AllTypes),
    Type(EntityType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllTypes {
    All,
}

impl FilterToggle {
    pub const ALL: FilterToggle = FilterToggle::All(AllTypes::All);
}

impl From<EntityType> for FilterToggle {
    fn from(value: EntityType) -> Self {
        Self::Type(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(Vec<EntityType>);

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, kind: EntityType) -> bool {
        self.0.contains(&kind)
    }

    pub fn as_slice(&self) -> &[EntityType] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn toggle(&mut self, kind: EntityType) -> bool {
        if let Some(position) = self.0.iter().position(|active| *active == kind) {
            self.0.remove(position);
            false
        } else {
            self.0.push(kind);
            true
        }
    }
}

pub fn normalize_for_search(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
