//! Axum route handlers for the generation actions.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::{
    apply_generated_summary, enhance_job_bullets, GenerationOutcome,
};
use crate::state::{AppState, EditResponse};

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub generated: GenerationOutcome,
    #[serde(flatten)]
    pub edit: EditResponse,
}

/// POST /api/v1/generate/summary
///
/// Writes a generated summary and prepends generated bullets to the first job.
pub async fn handle_generate_summary(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut rng = state.rng.lock().await;
    let (generated, edit) = state
        .edit(|editor| Ok(apply_generated_summary(editor, rng.as_mut())))
        .await?;
    Ok(Json(GenerateResponse { generated, edit }))
}

/// POST /api/v1/jobs/:index/enhance
///
/// Prepends generated bullets to one job, keeping at most six.
pub async fn handle_enhance_job(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut rng = state.rng.lock().await;
    let (generated, edit) = state
        .edit(|editor| enhance_job_bullets(editor, index, rng.as_mut()))
        .await?;
    Ok(Json(GenerateResponse { generated, edit }))
}
