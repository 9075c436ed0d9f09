use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Config;
use crate::provider::{FileOpenTarget, FileTargetResolver, ResolveError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
}

impl StoredFile {
    pub fn new(id: &str, name: &str, mime_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
        }
    }
}

const SCHEMA: &str =
    "CREATE TABLE IF NOT EXISTS file (id TEXT PRIMARY KEY, name TEXT NOT NULL, mime_type TEXT NOT NULL)";

pub fn open_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    conn.execute(SCHEMA, [])?;
    Ok(conn)
}

pub fn open_from_config(cfg: &Config) -> Result<Connection, StoreError> {
    if let Some(parent) = cfg.files_db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(&cfg.files_db_path)?;
    conn.execute(SCHEMA, [])?;
    Ok(conn)
}

pub fn upsert_file(db: &Connection, file: &StoredFile) -> Result<(), StoreError> {
    db.execute(
        "INSERT INTO file (id, name, mime_type) VALUES (?1, ?2, ?3)
         ON CONFLICT(id) DO UPDATE SET name=excluded.name, mime_type=excluded.mime_type",
        params![file.id, file.name, file.mime_type],
    )?;
    Ok(())
}

pub fn get_file(db: &Connection, id: &str) -> Result<Option<StoredFile>, StoreError> {
    let file = db
        .query_row(
            "SELECT id, name, mime_type FROM file WHERE id = ?1",
            params![id],
            |row| {
                Ok(StoredFile {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    mime_type: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(file)
}

pub fn classify_mime(mime_type: &str) -> FileOpenTarget {
    let mime = mime_type.trim().to_ascii_lowercase();
    let (top, sub) = mime.split_once('/').unwrap_or((mime.as_str(), ""));
    match top {
        "image" => FileOpenTarget::Photo,
        "audio" => FileOpenTarget::Audio,
        "video" => FileOpenTarget::Video,
        "text" => FileOpenTarget::Document,
        "application" if is_document_subtype(sub) => FileOpenTarget::Document,
        _ => FileOpenTarget::File,
    }
}

fn is_document_subtype(sub: &str) -> bool {
    matches!(
        sub,
        "pdf"
            | "msword"
            | "rtf"
            | "vnd.openxmlformats-officedocument.wordprocessingml.document"
            | "vnd.oasis.opendocument.text"
    )
}

pub struct SqliteFileResolver {
    db: Mutex<Connection>,
}

impl SqliteFileResolver {
    pub fn new(db: Connection) -> Self {
        Self { db: Mutex::new(db) }
    }

    pub fn upsert(&self, file: &StoredFile) -> Result<(), StoreError> {
        let db = self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        upsert_file(&db, file)
    }

    fn lookup(&self, file_id: &str) -> Result<FileOpenTarget, ResolveError> {
        let db = self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let file = get_file(&db, file_id).map_err(|e| ResolveError::Store(e.to_string()))?;
        file.map(|file| classify_mime(&file.mime_type))
            .ok_or_else(|| ResolveError::NotFound(file_id.to_string()))
    }
}

#[async_trait]
impl FileTargetResolver for SqliteFileResolver {
    async fn resolve_file_open_target(
        &self,
        file_id: &str,
    ) -> Result<FileOpenTarget, ResolveError> {
        self.lookup(file_id)
    }
}
