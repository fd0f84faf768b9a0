//! Persistence adapter — the document in a key-value store and in JSON files.
//!
//! Saved and exported documents use the same JSON shape. Loading and importing
//! are shallow merges: every top-level key present in the incoming JSON
//! replaces the current value wholesale, nested arrays included.

pub mod autosave;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::editor::text::normalize_list;
use crate::errors::AppError;
use crate::models::ResumeDocument;

pub use autosave::Autosaver;
pub use store::{FileStore, KeyValueStore, MemoryStore, RedisStore, StoreError};

/// Default storage key, shared with documents saved by earlier releases.
pub const DEFAULT_STORAGE_KEY: &str = "aiResume_v1";

/// A downloadable export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Reads and writes the document under one fixed key.
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl Persistence {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Persistence {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes the full document as compact JSON.
    pub async fn save(&self, document: &ResumeDocument) -> Result<(), AppError> {
        let json = serde_json::to_string(document)?;
        self.store.set(&self.key, &json).await?;
        debug!(
            "Saved document to {} store ({} bytes)",
            self.store.backend(),
            json.len()
        );
        Ok(())
    }

    /// Reads the persisted document overlaid onto the defaults.
    ///
    /// Any failure returns `None`; the caller keeps its defaults.
    pub async fn load(&self) -> Option<ResumeDocument> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved document under '{}'", self.key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read saved document: {e}");
                return None;
            }
        };

        let parsed = serde_json::from_str::<Value>(&raw)
            .map_err(|e| e.to_string())
            .and_then(|value| merge_onto(&ResumeDocument::default(), value));

        match parsed {
            Ok(document) => {
                info!("Loaded saved document from {} store", self.store.backend());
                Some(document)
            }
            Err(e) => {
                warn!("Ignoring malformed saved document: {e}");
                None
            }
        }
    }

    /// Clears the persisted document.
    pub async fn reset(&self) -> Result<(), AppError> {
        self.store.remove(&self.key).await?;
        info!("Cleared saved document '{}'", self.key);
        Ok(())
    }
}

/// Produces the pretty-printed download named after the user.
pub fn export_file(document: &ResumeDocument) -> Result<ExportFile, AppError> {
    let stem = document.full_name.trim();
    let stem = if stem.is_empty() { "resume" } else { stem };
    let file_name = format!("{}.json", stem.replace(['/', '\\'], "-"));

    Ok(ExportFile {
        file_name,
        contents: serde_json::to_string_pretty(document)?,
    })
}

/// Parses an uploaded file and shallow-merges it onto `current`.
///
/// On failure nothing is merged; the caller's document is untouched.
pub fn import_file(bytes: &[u8], current: &ResumeDocument) -> Result<ResumeDocument, AppError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::InvalidImport(format!("Invalid JSON file: {e}")))?;
    merge_onto(current, value).map_err(AppError::InvalidImport)
}

/// Shallow merge of a JSON object onto a document, then list normalization.
pub fn merge_onto(base: &ResumeDocument, incoming: Value) -> Result<ResumeDocument, String> {
    let Value::Object(incoming) = incoming else {
        return Err("expected a JSON object at the top level".to_string());
    };

    let mut merged = match serde_json::to_value(base) {
        Ok(Value::Object(map)) => map,
        Ok(_) => return Err("document did not serialize to an object".to_string()),
        Err(e) => return Err(e.to_string()),
    };
    for (key, value) in incoming {
        merged.insert(key, value);
    }

    let mut document: ResumeDocument =
        serde_json::from_value(Value::Object(merged)).map_err(|e| e.to_string())?;

    normalize_list(&mut document.skills);
    normalize_list(&mut document.education);
    for job in &mut document.jobs {
        normalize_list(&mut job.bullets);
    }

    Ok(document)
}
