use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{SearchOptions, SearchResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("search index unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("file lookup failed: {0}")]
    Store(String),
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, text: &str, options: &SearchOptions)
        -> Result<SearchResponse, SearchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOpenTarget {
    Document,
    Audio,
    Photo,
    Video,
    File,
}

impl FileOpenTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Photo => "photo",
            Self::Video => "video",
            Self::File => "file",
        }
    }
}

impl Display for FileOpenTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait FileTargetResolver: Send + Sync {
    async fn resolve_file_open_target(&self, file_id: &str)
        -> Result<FileOpenTarget, ResolveError>;
}
