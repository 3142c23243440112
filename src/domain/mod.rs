//! Domain layer - Curriculum models and content checks

pub mod curriculum;
pub mod graph;
pub mod lesson;
pub mod link;
pub mod render;
pub mod report;
pub mod snippet;
pub mod template;

pub use graph::{DocGraph, ReadingOrder};
pub use lesson::LessonDoc;
pub use report::{CheckReport, Diagnostic, Severity};
pub use snippet::SnippetPolicy;
pub use template::{load_template, Template};
