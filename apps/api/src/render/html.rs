//! HTML output for the preview tree.
//!
//! All user text passes through `escape_html` before it reaches markup.

use std::fmt::Write;

use super::{Preview, EDUCATION_PLACEHOLDER, EXPERIENCE_PLACEHOLDER, SEPARATOR, SUMMARY_PLACEHOLDER};

const STYLESHEET: &str = r#"
body { font-family: Inter, system-ui, sans-serif; margin: 0; background: #f6f8fb; }
#resume { max-width: 820px; margin: 24px auto; padding: 32px; background: #fff; }
.header { display: flex; gap: 16px; align-items: center; }
.avatar { width: 56px; height: 56px; border-radius: 50%; background: var(--accent); color: #fff;
  display: flex; align-items: center; justify-content: center; font-weight: 700; }
h1 { margin: 0; } h2 { color: var(--accent); font-size: 14px; text-transform: uppercase; }
.muted { color: #6b7280; }
.job { margin-bottom: 12px; } .job .title { font-weight: 600; }
.skill-pill { display: inline-block; padding: 4px 10px; margin: 2px; border-radius: 999px;
  border: 1px solid var(--accent); }
.template-minimal #resume { box-shadow: none; } .template-modern .header { border-bottom: 3px solid var(--accent); }
pre.raw { max-width: 820px; margin: 0 auto 24px; padding: 12px; background: #0f172a; color: #e2e8f0; }
@media print { body { background: #fff; } pre.raw { display: none; } }
"#;

/// Escapes the characters that could break out of text or attribute context.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Renders the resume body: header, summary, experience, education, skills.
pub fn render_fragment(preview: &Preview) -> String {
    let mut out = String::new();
    let header = &preview.header;

    // `write!` into a String cannot fail.
    let _ = write!(
        out,
        r#"<div id="resume"><div class="header"><div class="avatar">{}</div><div><h1>{}</h1><div class="role">{}</div><div class="muted contact">{}</div></div></div>"#,
        escape_html(&header.initials),
        escape_html(&header.name),
        escape_html(&header.role),
        escape_html(&header.contact),
    );

    out.push_str(r#"<section class="summary"><h2>Summary</h2>"#);
    if preview.summary.is_empty() {
        let _ = write!(out, r#"<i class="muted">{SUMMARY_PLACEHOLDER}</i>"#);
    } else {
        let lines: Vec<String> = preview.summary.iter().map(|l| escape_html(l)).collect();
        let _ = write!(out, "<p>{}</p>", lines.join("<br/>"));
    }
    out.push_str("</section>");

    out.push_str(r#"<section class="experience"><h2>Experience</h2>"#);
    if preview.experience.is_empty() {
        let _ = write!(out, r#"<div class="muted">{EXPERIENCE_PLACEHOLDER}</div>"#);
    }
    for job in &preview.experience {
        let _ = write!(
            out,
            r#"<div class="job"><div class="title">{}{SEPARATOR}<span class="muted">{}</span></div><div class="muted">{}</div>"#,
            escape_html(&job.title),
            escape_html(&job.company),
            escape_html(&job.dates),
        );
        if !job.bullets.is_empty() {
            out.push_str(r#"<ul class="bullets">"#);
            for bullet in &job.bullets {
                let _ = write!(out, "<li>{}</li>", escape_html(bullet));
            }
            out.push_str("</ul>");
        }
        out.push_str("</div>");
    }
    out.push_str("</section>");

    out.push_str(r#"<section class="education"><h2>Education</h2>"#);
    if preview.education.is_empty() {
        let _ = write!(out, r#"<div class="muted">{EDUCATION_PLACEHOLDER}</div>"#);
    }
    for entry in &preview.education {
        let _ = write!(out, "<div>{}</div>", escape_html(entry));
    }
    out.push_str("</section>");

    out.push_str(r#"<section class="skills"><h2>Skills</h2><div>"#);
    for skill in &preview.skills {
        let _ = write!(out, r#"<span class="skill-pill">{}</span>"#, escape_html(skill));
    }
    out.push_str("</div></section></div>");

    out
}

/// Renders a standalone, printable page. `raw` embeds the JSON debug view.
pub fn render_page(preview: &Preview, raw: Option<&str>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>{}</title><style>:root {{ --accent: {}; }}{STYLESHEET}</style></head><body class="template-{}">"#,
        escape_html(&preview.header.name),
        preview.accent,
        preview.template,
    );
    out.push_str(&render_fragment(preview));
    if let Some(raw) = raw {
        let _ = write!(out, r#"<pre class="raw">{}</pre>"#, escape_html(raw));
    }
    out.push_str("</body></html>");
    out
}
