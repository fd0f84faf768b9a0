use serde::{Deserialize, Serialize};

use crate::models::Template;

/// The free-text top-level fields of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextField {
    FullName,
    Role,
    Email,
    Phone,
    Location,
    Summary,
}

/// The single-line fields of a job entry. Bullets go through `SetJobBullets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobField {
    Title,
    Company,
    Start,
    End,
}

/// One edit to the document, as sent by a form control.
///
/// List-valued edits carry the raw delimited text; the editor derives the
/// list so the trim/filter rule is applied on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DocumentPatch {
    SetField { field: TextField, value: String },
    SetSkills { text: String },
    SetEducation { text: String },
    SetTemplate { template: Template },
    AddJob,
    RemoveJob { index: usize },
    SetJobField { index: usize, field: JobField, value: String },
    SetJobBullets { index: usize, text: String },
    ClearSummary,
}

impl DocumentPatch {
    pub fn name(&self) -> &'static str {
        match self {
            DocumentPatch::SetField { .. } => "set_field",
            DocumentPatch::SetSkills { .. } => "set_skills",
            DocumentPatch::SetEducation { .. } => "set_education",
            DocumentPatch::SetTemplate { .. } => "set_template",
            DocumentPatch::AddJob => "add_job",
            DocumentPatch::RemoveJob { .. } => "remove_job",
            DocumentPatch::SetJobField { .. } => "set_job_field",
            DocumentPatch::SetJobBullets { .. } => "set_job_bullets",
            DocumentPatch::ClearSummary => "clear_summary",
        }
    }
}
