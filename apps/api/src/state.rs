use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::editor::Editor;
use crate::errors::AppError;
use crate::generation::random::RandomSource;
use crate::models::ResumeDocument;
use crate::persistence::{Autosaver, Persistence};
use crate::render::{html::render_fragment, project};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single document being edited. Edits are serialized through this lock.
    pub editor: Arc<Mutex<Editor>>,
    pub persistence: Arc<Persistence>,
    /// Debounced background saves, rescheduled on every edit.
    pub autosaver: Arc<Autosaver>,
    /// Randomness for the text generator. Seeded via GENERATOR_SEED.
    pub rng: Arc<Mutex<Box<dyn RandomSource>>>,
    pub config: Config,
}

/// Response body of every edit: the new document and its re-rendered preview.
#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub document: ResumeDocument,
    pub preview_html: String,
}

impl AppState {
    pub fn new(
        document: ResumeDocument,
        persistence: Arc<Persistence>,
        rng: Box<dyn RandomSource>,
        config: Config,
    ) -> Self {
        let autosaver = Arc::new(Autosaver::new(
            Arc::clone(&persistence),
            config.autosave_debounce,
        ));
        AppState {
            editor: Arc::new(Mutex::new(Editor::new(document))),
            persistence,
            autosaver,
            rng: Arc::new(Mutex::new(rng)),
            config,
        }
    }

    /// Runs one mutation against the editor, then re-renders and schedules a save.
    pub async fn edit<T>(
        &self,
        mutate: impl FnOnce(&mut Editor) -> Result<T, AppError>,
    ) -> Result<(T, EditResponse), AppError> {
        // Held through `commit` so saves are scheduled in edit order.
        let mut editor = self.editor.lock().await;
        let output = mutate(&mut *editor)?;
        let response = self.commit(editor.document().clone()).await;
        Ok((output, response))
    }

    /// Re-renders `document` and schedules its debounced save.
    pub async fn commit(&self, document: ResumeDocument) -> EditResponse {
        let preview_html = render_fragment(&project(&document));
        self.autosaver.schedule(document.clone()).await;
        EditResponse {
            document,
            preview_html,
        }
    }

    pub async fn snapshot(&self) -> ResumeDocument {
        self.editor.lock().await.document().clone()
    }
}
