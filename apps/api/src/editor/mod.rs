//! State store — the single owner of the resume being edited.
//!
//! Every mutation goes through `Editor::apply`, `Editor::replace` or
//! `Editor::reset`. Callers re-render and schedule a save after each one.

pub mod handlers;
pub mod patch;
pub mod text;

use tracing::debug;

use crate::errors::AppError;
use crate::models::{JobEntry, ResumeDocument};

pub use patch::{DocumentPatch, JobField, TextField};

#[derive(Debug, Clone, Default)]
pub struct Editor {
    document: ResumeDocument,
}

impl Editor {
    pub fn new(document: ResumeDocument) -> Self {
        Editor { document }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    /// Applies one edit in place. On error the document is left untouched.
    pub fn apply(&mut self, patch: DocumentPatch) -> Result<(), AppError> {
        debug!("Applying patch {}", patch.name());
        let doc = &mut self.document;

        match patch {
            DocumentPatch::SetField { field, value } => {
                let slot = match field {
                    TextField::FullName => &mut doc.full_name,
                    TextField::Role => &mut doc.role,
                    TextField::Email => &mut doc.email,
                    TextField::Phone => &mut doc.phone,
                    TextField::Location => &mut doc.location,
                    TextField::Summary => &mut doc.summary,
                };
                *slot = value;
            }
            DocumentPatch::SetSkills { text: input } => doc.skills = text::split_skills(&input),
            DocumentPatch::SetEducation { text: input } => {
                doc.education = text::split_lines(&input)
            }
            DocumentPatch::SetTemplate { template } => doc.template = template,
            DocumentPatch::AddJob => doc.jobs.push(JobEntry::placeholder()),
            DocumentPatch::RemoveJob { index } => {
                check_index(doc, index)?;
                doc.jobs.remove(index);
            }
            DocumentPatch::SetJobField {
                index,
                field,
                value,
            } => {
                let job = job_mut(doc, index)?;
                let slot = match field {
                    JobField::Title => &mut job.title,
                    JobField::Company => &mut job.company,
                    JobField::Start => &mut job.start,
                    JobField::End => &mut job.end,
                };
                *slot = value;
            }
            DocumentPatch::SetJobBullets { index, text: input } => {
                job_mut(doc, index)?.bullets = text::split_lines(&input);
            }
            DocumentPatch::ClearSummary => doc.summary.clear(),
        }

        Ok(())
    }

    /// Mutable access to one job, for callers that rewrite bullets wholesale.
    pub fn job_mut(&mut self, index: usize) -> Result<&mut JobEntry, AppError> {
        job_mut(&mut self.document, index)
    }

    pub fn set_summary(&mut self, summary: String) {
        self.document.summary = summary;
    }

    /// Swaps in a whole document, e.g. the result of an import merge.
    pub fn replace(&mut self, document: ResumeDocument) {
        self.document = document;
    }

    /// Restores the startup defaults.
    pub fn reset(&mut self) {
        self.document = ResumeDocument::default();
    }
}

fn check_index(doc: &ResumeDocument, index: usize) -> Result<(), AppError> {
    if index < doc.jobs.len() {
        Ok(())
    } else {
        Err(AppError::NotFound(format!(
            "Job {index} not found ({} jobs)",
            doc.jobs.len()
        )))
    }
}

fn job_mut(doc: &mut ResumeDocument, index: usize) -> Result<&mut JobEntry, AppError> {
    check_index(doc, index)?;
    Ok(&mut doc.jobs[index])
}
