//! Render pipeline — a pure projection of the document into a preview.
//!
//! `project` builds the preview tree; `html` turns the tree into markup.
//! Placeholders for empty sections live here so the tree and the markup agree.

pub mod handlers;
pub mod html;

use serde::Serialize;

use crate::models::{ResumeDocument, Template};

pub const NAME_PLACEHOLDER: &str = "Full Name";
pub const ROLE_PLACEHOLDER: &str = "Role / Title";
pub const SUMMARY_PLACEHOLDER: &str = "Add a short professional summary";
pub const EXPERIENCE_PLACEHOLDER: &str = "No experience added yet";
pub const EDUCATION_PLACEHOLDER: &str = "No education added";

/// Separator used in the contact line and in job date ranges.
pub const SEPARATOR: &str = " — ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub template: Template,
    pub accent: &'static str,
    pub header: Header,
    /// Summary lines; empty when the placeholder is shown.
    pub summary: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub role: String,
    pub contact: String,
    pub initials: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

/// Projects the document into its preview tree. Deterministic.
pub fn project(doc: &ResumeDocument) -> Preview {
    let contact = [&doc.email, &doc.location, &doc.phone]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    let summary = if doc.summary.is_empty() {
        Vec::new()
    } else {
        doc.summary.split('\n').map(str::to_string).collect()
    };

    let experience = doc
        .jobs
        .iter()
        .map(|job| ExperienceItem {
            title: job.title.clone(),
            company: job.company.clone(),
            dates: format!("{}{SEPARATOR}{}", job.start, job.end_label()),
            bullets: job.bullets.clone(),
        })
        .collect();

    Preview {
        template: doc.template,
        accent: doc.template.accent(),
        header: Header {
            name: or_placeholder(&doc.full_name, NAME_PLACEHOLDER),
            role: or_placeholder(&doc.role, ROLE_PLACEHOLDER),
            contact,
            initials: initials(&doc.full_name),
        },
        summary,
        experience,
        education: doc.education.clone(),
        skills: doc.skills.clone(),
    }
}

/// Avatar initials: a single word gives its first two letters, otherwise the
/// first letters of the first and last words. Always uppercase.
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

/// The raw-JSON debug view of the document.
pub fn raw_json(doc: &ResumeDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
