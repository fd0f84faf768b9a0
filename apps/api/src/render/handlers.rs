//! Axum route handlers for the preview surfaces.

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::render::{html::render_page, project, raw_json, Preview};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    /// Embeds the raw-JSON debug view under the resume.
    #[serde(default)]
    pub debug: bool,
}

/// GET /api/v1/preview
///
/// Printable page; the browser's print dialog produces the PDF.
pub async fn handle_preview_page(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let document = state.snapshot().await;
    let raw = if query.debug {
        Some(raw_json(&document)?)
    } else {
        None
    };
    Ok(Html(render_page(&project(&document), raw.as_deref())))
}

/// GET /api/v1/preview/tree
pub async fn handle_preview_tree(State(state): State<AppState>) -> Json<Preview> {
    Json(project(&state.snapshot().await))
}

/// GET /api/v1/document/raw
pub async fn handle_raw_document(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let raw = raw_json(&state.snapshot().await)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], raw))
}
