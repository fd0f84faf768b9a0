pub mod resume;

pub use resume::{JobEntry, ResumeDocument, Template};
