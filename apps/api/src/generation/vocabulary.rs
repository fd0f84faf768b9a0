//! Fixed vocabularies the bullet templates draw from.

/// Opening action verbs. One is picked uniformly per slot.
pub const VERBS: &[&str] = &[
    "Led",
    "Built",
    "Designed",
    "Improved",
    "Implemented",
    "Optimized",
    "Spearheaded",
    "Created",
    "Delivered",
];

/// Impact phrases appended to achievement bullets.
pub const METRICS: &[&str] = &[
    "by 30%",
    "reducing load by 25%",
    "increasing conversion by 12%",
    "saving 2 hours per week",
    "scaling to 100k users",
    "improving accessibility",
    "improving performance",
];

/// Role used in the summary when the user left it blank.
pub const FALLBACK_ROLE: &str = "Professional";

/// Skills mentioned in a generated summary.
pub const SUMMARY_SKILL_LIMIT: usize = 6;

/// Skills mentioned in a generated bullet.
pub const BULLET_SKILL_LIMIT: usize = 5;

/// Most bullets a single generation pass returns.
pub const MAX_GENERATED_BULLETS: usize = 5;

/// Most bullets a job keeps after generated ones are prepended.
pub const MAX_JOB_BULLETS: usize = 6;
