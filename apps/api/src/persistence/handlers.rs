//! Axum route handlers for save, reset, export and import.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::persistence::{export_file, import_file};
use crate::state::{AppState, EditResponse};

/// Multipart field carrying the uploaded JSON file.
const IMPORT_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: bool,
    pub message: String,
}

/// POST /api/v1/document/save
///
/// Immediate save; supersedes any pending debounced one.
pub async fn handle_save(State(state): State<AppState>) -> Result<Json<SaveResponse>, AppError> {
    let editor = state.editor.lock().await;
    state.autosaver.cancel().await;
    state.persistence.save(editor.document()).await?;
    drop(editor);

    Ok(Json(SaveResponse {
        saved: true,
        message: "Saved to local storage.".to_string(),
    }))
}

/// POST /api/v1/document/reset
///
/// Clears storage and restores the defaults, like reloading a fresh session.
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<EditResponse>, AppError> {
    // No edit or autosave may slip in between clearing storage and restoring defaults.
    let mut editor = state.editor.lock().await;
    state.autosaver.cancel().await;
    state.persistence.reset().await?;
    editor.reset();
    let response = state.commit(editor.document().clone()).await;
    drop(editor);
    info!("Document reset to defaults");
    Ok(Json(response))
}

/// GET /api/v1/document/export
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let export = export_file(&state.snapshot().await)?;
    let disposition = content_disposition(&export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.contents,
    ))
}

/// POST /api/v1/document/import
///
/// Multipart upload with a `file` field. Invalid JSON leaves the document unchanged.
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EditResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() == Some(IMPORT_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
            upload = Some(bytes);
            break;
        }
    }
    let bytes = upload.ok_or_else(|| {
        AppError::Validation(format!("Upload must include a '{IMPORT_FIELD}' field"))
    })?;

    let (_, response) = state
        .edit(|editor| {
            let merged = import_file(&bytes, editor.document())?;
            editor.replace(merged);
            Ok(())
        })
        .await?;
    info!("Imported document ({} bytes)", bytes.len());
    Ok(Json(response))
}

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8 name.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(file_name, NON_ALPHANUMERIC)
    )
}
