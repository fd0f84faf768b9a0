//! Template-filling text generation for summaries and job bullets.
//!
//! Everything here is pure apart from verb/metric choice, which goes through
//! the caller's `RandomSource`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::generation::random::{pick, RandomSource};
use crate::generation::vocabulary::{
    BULLET_SKILL_LIMIT, FALLBACK_ROLE, MAX_GENERATED_BULLETS, MAX_JOB_BULLETS, METRICS,
    SUMMARY_SKILL_LIMIT, VERBS,
};
use crate::models::JobEntry;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(20\d{2}|19\d{2})").expect("valid year regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Rough experience span from the years mentioned in job dates.
///
/// No jobs → "X+ years"; jobs without a recognizable year → "2+ years";
/// otherwise the inclusive span between oldest and newest year, at least 1.
pub fn infer_years_experience(jobs: &[JobEntry]) -> String {
    if jobs.is_empty() {
        return "X+ years".to_string();
    }

    let years: Vec<u32> = jobs
        .iter()
        .flat_map(|job| [job.start.as_str(), job.end.as_str()])
        .filter_map(|date| YEAR_RE.find(date))
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    match (years.iter().min(), years.iter().max()) {
        (Some(oldest), Some(newest)) => format!("{}+ years", (newest - oldest + 1).max(1)),
        _ => "2+ years".to_string(),
    }
}

/// Professional summary built from role, skills and the most recent job.
pub fn generate_summary(
    role: &str,
    skills: &[String],
    top_job: Option<&JobEntry>,
    years: &str,
) -> String {
    let role = if role.is_empty() { FALLBACK_ROLE } else { role };
    let skills = skill_list(skills, SUMMARY_SKILL_LIMIT);

    match top_job.filter(|job| !job.title.is_empty()) {
        Some(job) => format!(
            "{role} with {years} of experience building {} and web applications. \
             Skilled in {skills}. Proven track record delivering user-focused solutions \
             and improving performance and design.",
            job.title.to_lowercase()
        ),
        None => format!(
            "{role} with {years} of experience. Skilled in {skills}. Focused on building \
             scalable, maintainable solutions that deliver business value."
        ),
    }
}

/// Achievement bullets for one job: at most five, no duplicates.
///
/// `fallback_role` stands in for an empty job title.
pub fn generate_bullets(
    job: &JobEntry,
    skills: &[String],
    fallback_role: &str,
    rng: &mut dyn RandomSource,
) -> Vec<String> {
    let title = if job.title.is_empty() {
        fallback_role
    } else {
        &job.title
    };
    let skill_list = skill_list(skills, BULLET_SKILL_LIMIT);

    let mut bullets = vec![
        format!(
            "{} {} features at {} using {} {}.",
            pick(rng, VERBS),
            title.to_lowercase(),
            job.company,
            skill_list,
            pick(rng, METRICS)
        ),
        format!(
            "{} cross-functional collaboration with product and design to ship \
             customer-facing features and improve UX.",
            pick(rng, VERBS)
        ),
        "Introduced testing and CI practices to increase code quality and reduce regressions."
            .to_string(),
        format!(
            "{} performance improvements, {}, through code and architecture optimizations.",
            pick(rng, VERBS),
            pick(rng, METRICS)
        ),
    ];
    if !skill_list.is_empty() {
        bullets.push(format!(
            "Developed solutions using {skill_list} to solve complex front-end problems \
             and maintainable code."
        ));
    }

    let mut seen = HashSet::new();
    bullets
        .into_iter()
        .map(|b| normalize_whitespace(&b))
        .filter(|b| seen.insert(b.clone()))
        .take(MAX_GENERATED_BULLETS)
        .collect()
}

/// Prepends generated bullets to a job's existing ones, keeping the cap.
pub fn prepend_bullets(job: &mut JobEntry, generated: Vec<String>) {
    let mut bullets = generated;
    bullets.append(&mut job.bullets);
    bullets.truncate(MAX_JOB_BULLETS);
    job.bullets = bullets;
}

fn skill_list(skills: &[String], limit: usize) -> String {
    skills
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn normalize_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}
