//! Generation operations — apply generated text to the document being edited.
//!
//! Flow: read role/skills/jobs from the editor → fill templates → write the
//! summary and/or prepend bullets through the editor's mutation entry points.

use serde::Serialize;
use tracing::info;

use crate::editor::Editor;
use crate::errors::AppError;
use crate::generation::heuristics::{
    generate_bullets, generate_summary, infer_years_experience, prepend_bullets,
};
use crate::generation::random::RandomSource;
use crate::generation::vocabulary::SUMMARY_SKILL_LIMIT;

/// What a generation pass produced, returned alongside the updated document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutcome {
    pub summary: Option<String>,
    pub bullets: Vec<String>,
    /// Index of the job that received the bullets, if any.
    pub job_index: Option<usize>,
}

/// Writes a fresh summary and prepends generated bullets to the first job.
pub fn apply_generated_summary(
    editor: &mut Editor,
    rng: &mut dyn RandomSource,
) -> GenerationOutcome {
    let doc = editor.document();
    let skills: Vec<String> = doc.skills.iter().take(SUMMARY_SKILL_LIMIT).cloned().collect();
    let years = infer_years_experience(&doc.jobs);
    let top_job = doc.jobs.first();

    let summary = generate_summary(&doc.role, &skills, top_job, &years);
    let bullets = top_job
        .map(|job| generate_bullets(job, &skills, &doc.role, rng))
        .unwrap_or_default();
    let job_index = top_job.map(|_| 0);

    editor.set_summary(summary.clone());
    if let Some(index) = job_index {
        if let Ok(job) = editor.job_mut(index) {
            prepend_bullets(job, bullets.clone());
        }
    }

    info!(
        "Generated summary ({} chars) and {} bullets",
        summary.len(),
        bullets.len()
    );

    GenerationOutcome {
        summary: Some(summary),
        bullets,
        job_index,
    }
}

/// Prepends generated bullets to one job. The summary is left alone.
pub fn enhance_job_bullets(
    editor: &mut Editor,
    index: usize,
    rng: &mut dyn RandomSource,
) -> Result<GenerationOutcome, AppError> {
    let doc = editor.document();
    let job = doc.jobs.get(index).ok_or_else(|| {
        AppError::NotFound(format!("Job {index} not found ({} jobs)", doc.jobs.len()))
    })?;
    let bullets = generate_bullets(job, &doc.skills, &doc.role, rng);

    prepend_bullets(editor.job_mut(index)?, bullets.clone());
    info!("Generated {} bullets for job {index}", bullets.len());

    Ok(GenerationOutcome {
        summary: None,
        bullets,
        job_index: Some(index),
    })
}
