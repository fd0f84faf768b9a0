use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// End label shown for a job that has no end date.
pub const PRESENT: &str = "Present";

/// The complete resume record edited by the user.
///
/// Field names serialize in camelCase so saved and exported files keep the
/// `fullName` / `jobs` / `template` shape users already have on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    #[serde(default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub role: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone: String,
    #[serde(default, deserialize_with = "nullable")]
    pub location: String,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub jobs: Vec<JobEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub education: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub template: Template,
}

/// One work-experience entry. `jobs` order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub start: String,
    #[serde(default = "default_end", deserialize_with = "nullable")]
    pub end: String,
    #[serde(default, deserialize_with = "nullable")]
    pub bullets: Vec<String>,
}

/// Presentation variant. Only selects a style; has no behavioural effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Template {
    #[default]
    Classic,
    Modern,
    Minimal,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Modern => "modern",
            Template::Minimal => "minimal",
        }
    }

    /// Accent colour applied to headings and pills.
    pub fn accent(&self) -> &'static str {
        match self {
            Template::Minimal => "#222",
            Template::Classic | Template::Modern => "#0b6efd",
        }
    }

    /// Lenient lookup: unknown tags fall back to `Classic`.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Template::Classic),
            "modern" => Ok(Template::Modern),
            "minimal" => Ok(Template::Minimal),
            other => Err(format!("unknown template '{other}'")),
        }
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Template::from_tag(&tag))
    }
}

impl Default for JobEntry {
    fn default() -> Self {
        JobEntry {
            company: String::new(),
            title: String::new(),
            start: String::new(),
            end: default_end(),
            bullets: Vec::new(),
        }
    }
}

impl JobEntry {
    /// The entry appended by the "add job" action.
    pub fn placeholder() -> Self {
        JobEntry {
            company: "Company".to_string(),
            title: "Job Title".to_string(),
            start: "2020".to_string(),
            end: "2022".to_string(),
            bullets: Vec::new(),
        }
    }

    /// End label for display: an empty end means the job is current.
    pub fn end_label(&self) -> &str {
        if self.end.is_empty() {
            PRESENT
        } else {
            &self.end
        }
    }
}

impl Default for ResumeDocument {
    /// The sample resume a fresh session starts from.
    fn default() -> Self {
        ResumeDocument {
            full_name: "Jane Doe".to_string(),
            role: "Frontend Developer".to_string(),
            email: "you@example.com".to_string(),
            phone: String::new(),
            location: "City, Country".to_string(),
            summary: "A results-driven frontend developer with hands-on experience building \
                      scalable web apps and delightful user experiences."
                .to_string(),
            skills: ["JavaScript", "React", "HTML", "CSS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            jobs: vec![JobEntry {
                company: "Acme Inc".to_string(),
                title: "Frontend Developer".to_string(),
                start: "2022".to_string(),
                end: PRESENT.to_string(),
                bullets: vec![
                    "Built responsive UI for product using React and decreased load time by 25%."
                        .to_string(),
                    "Collaborated with designers to improve UX.".to_string(),
                ],
            }],
            education: vec!["B.Sc. Computer Science | ABC University | 2022".to_string()],
            template: Template::Classic,
        }
    }
}

fn default_end() -> String {
    PRESENT.to_string()
}

/// Treats an explicit JSON `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
