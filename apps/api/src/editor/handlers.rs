//! Axum route handlers for editing the document.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::editor::{DocumentPatch, JobField};
use crate::errors::AppError;
use crate::models::ResumeDocument;
use crate::state::{AppState, EditResponse};

#[derive(Debug, Deserialize)]
pub struct JobFieldUpdate {
    pub field: JobField,
    pub value: String,
}

async fn apply_patch(state: &AppState, patch: DocumentPatch) -> Result<EditResponse, AppError> {
    let (_, response) = state.edit(|editor| editor.apply(patch)).await?;
    Ok(response)
}

/// GET /api/v1/document
pub async fn handle_get_document(State(state): State<AppState>) -> Json<ResumeDocument> {
    Json(state.snapshot().await)
}

/// PATCH /api/v1/document
///
/// Applies one form edit. Responds with the updated document and preview.
/// A template switch is written straight away instead of after the debounce.
pub async fn handle_patch_document(
    State(state): State<AppState>,
    Json(patch): Json<DocumentPatch>,
) -> Result<Json<EditResponse>, AppError> {
    let saves_now = matches!(patch, DocumentPatch::SetTemplate { .. });
    let response = apply_patch(&state, patch).await?;
    if saves_now {
        state.autosaver.flush().await?;
    }
    Ok(Json(response))
}

/// POST /api/v1/jobs
pub async fn handle_add_job(State(state): State<AppState>) -> Result<Json<EditResponse>, AppError> {
    Ok(Json(apply_patch(&state, DocumentPatch::AddJob).await?))
}

/// PATCH /api/v1/jobs/:index
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(update): Json<JobFieldUpdate>,
) -> Result<Json<EditResponse>, AppError> {
    let patch = DocumentPatch::SetJobField {
        index,
        field: update.field,
        value: update.value,
    };
    Ok(Json(apply_patch(&state, patch).await?))
}

/// DELETE /api/v1/jobs/:index
pub async fn handle_remove_job(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<EditResponse>, AppError> {
    Ok(Json(
        apply_patch(&state, DocumentPatch::RemoveJob { index }).await?,
    ))
}

/// POST /api/v1/summary/clear
pub async fn handle_clear_summary(
    State(state): State<AppState>,
) -> Result<Json<EditResponse>, AppError> {
    Ok(Json(apply_patch(&state, DocumentPatch::ClearSummary).await?))
}
