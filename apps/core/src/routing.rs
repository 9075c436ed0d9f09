use serde::{Serialize, Serializer};

use crate::model::EntityType;
use crate::provider::FileOpenTarget;

pub const APP_ID_PREFIX: &str = "app:";
pub const HELP_DOC_ID_PREFIX: &str = "help-doc:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Mobile,
    Desktop,
}

impl Viewport {
    pub fn from_is_mobile(is_mobile: bool) -> Self {
        if is_mobile {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowType {
    Contacts,
    Notes,
    Email,
    Audio,
    Ai,
    Help,
    Documents,
    Photos,
    Videos,
    Files,
    App(String),
}

impl WindowType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Contacts => "contacts",
            Self::Notes => "notes",
            Self::Email => "email",
            Self::Audio => "audio",
            Self::Ai => "ai",
            Self::Help => "help",
            Self::Documents => "documents",
            Self::Photos => "photos",
            Self::Videos => "videos",
            Self::Files => "files",
            Self::App(name) => name,
        }
    }
}

impl Serialize for WindowType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowPayload {
    ContactId(String),
    NoteId(String),
    EmailId(String),
    AlbumId(String),
    ConversationId(String),
    HelpDocId(String),
    DocumentId(String),
    AudioId(String),
    PhotoId(String),
    VideoId(String),
    FileId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteTarget {
    Navigate {
        path: String,
    },
    OpenWindow {
        window: WindowType,
    },
    RequestWindow {
        window: WindowType,
        payload: WindowPayload,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePlan {
    Ready(RouteTarget),
    ResolveFile { file_id: String },
}

pub fn plan_route(kind: EntityType, id: &str, viewport: Viewport) -> RoutePlan {
    let mobile = viewport == Viewport::Mobile;
    let target = match kind {
        EntityType::Contact if mobile => navigate(format!("/contacts/{id}")),
        EntityType::Contact => request(WindowType::Contacts, WindowPayload::ContactId(id.into())),
        EntityType::Note if mobile => navigate(format!("/notes/{id}")),
        EntityType::Note => request(WindowType::Notes, WindowPayload::NoteId(id.into())),
        EntityType::Email if mobile => navigate(format!("/emails/{id}")),
        EntityType::Email => request(WindowType::Email, WindowPayload::EmailId(id.into())),
        EntityType::Playlist => navigate(format!("/audio?playlist={id}")),
        EntityType::Album if mobile => navigate(format!("/audio?album={id}")),
        EntityType::Album => request(WindowType::Audio, WindowPayload::AlbumId(id.into())),
        EntityType::AiConversation if mobile => navigate(format!("/ai?conversation={id}")),
        EntityType::AiConversation => {
            request(WindowType::Ai, WindowPayload::ConversationId(id.into()))
        }
        EntityType::HelpDoc => {
            let doc_id = strip_id_prefix(id, HELP_DOC_ID_PREFIX);
            if mobile {
                navigate(format!("/help/docs/{doc_id}"))
            } else {
                request(WindowType::Help, WindowPayload::HelpDocId(doc_id.into()))
            }
        }
        EntityType::App => RouteTarget::OpenWindow {
            window: WindowType::App(strip_id_prefix(id, APP_ID_PREFIX).to_string()),
        },
        EntityType::File => {
            return RoutePlan::ResolveFile {
                file_id: id.to_string(),
            }
        }
    };
    RoutePlan::Ready(target)
}

pub fn route_file(target: FileOpenTarget, id: &str, viewport: Viewport) -> RouteTarget {
    let (path, window, payload) = match target {
        FileOpenTarget::Document => (
            format!("/documents/{id}"),
            WindowType::Documents,
            WindowPayload::DocumentId(id.into()),
        ),
        FileOpenTarget::Audio => (
            format!("/audio/{id}"),
            WindowType::Audio,
            WindowPayload::AudioId(id.into()),
        ),
        FileOpenTarget::Photo => (
            format!("/photos/{id}"),
            WindowType::Photos,
            WindowPayload::PhotoId(id.into()),
        ),
        FileOpenTarget::Video => (
            format!("/videos/{id}"),
            WindowType::Videos,
            WindowPayload::VideoId(id.into()),
        ),
        FileOpenTarget::File => (
            format!("/files/{id}"),
            WindowType::Files,
            WindowPayload::FileId(id.into()),
        ),
    };

    match viewport {
        Viewport::Mobile => navigate(path),
        Viewport::Desktop => request(window, payload),
    }
}

pub fn strip_id_prefix<'a>(id: &'a str, prefix: &str) -> &'a str {
    id.strip_prefix(prefix).unwrap_or(id)
}

fn navigate(path: String) -> RouteTarget {
    RouteTarget::Navigate { path }
}

fn request(window: WindowType, payload: WindowPayload) -> RouteTarget {
    RouteTarget::RequestWindow { window, payload }
}
