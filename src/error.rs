//! Error types for lectern

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the lectern application
#[derive(Debug, Error)]
pub enum LecternError {
    #[error("Not a lectern curriculum: {0}")]
    NotCurriculumDirectory(PathBuf),

    #[error("Lesson not found: {0}")]
    LessonNotFound(String),

    #[error("Invalid lesson slug: {0}")]
    InvalidSlug(String),

    #[error("Checks failed: {0} problem(s)")]
    ChecksFailed(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Failed to parse config.toml: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl LecternError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LecternError::NotCurriculumDirectory(_) => 2,
            LecternError::LessonNotFound(_) => 3,
            LecternError::ChecksFailed(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            LecternError::NotCurriculumDirectory(path) => {
                format!(
                    "Not a lectern curriculum: {}\n\n\
                    Suggestions:\n\
                    • Run 'lectern init' in this directory to start a new curriculum\n\
                    • Navigate into an existing curriculum directory\n\
                    • Set LECTERN_ROOT environment variable to your curriculum path",
                    path.display()
                )
            }
            LecternError::LessonNotFound(name) => {
                format!(
                    "Lesson not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'lectern list' to see the documents in this curriculum\n\
                    • Create it first: lectern new {}\n\
                    • Lessons can also be addressed by relative path (e.g., lessons/{}.md)",
                    name, name, name
                )
            }
            LecternError::InvalidSlug(slug) => {
                format!(
                    "Invalid lesson slug: '{}'\n\n\
                    Slugs are lowercase words separated by single hyphens.\n\
                    Examples:\n\
                    lectern new closures\n\
                    lectern new pattern-matching",
                    slug
                )
            }
            LecternError::ChecksFailed(count) => {
                format!(
                    "Checks failed: {} problem(s)\n\n\
                    Suggestions:\n\
                    • Fix the reported problems and run 'lectern check' again\n\
                    • Run a single check while iterating (e.g., lectern check --links)\n\
                    • Intentionally unlinked files can be declared in config as leaf_resources",
                    count
                )
            }
            LecternError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Configure editor: lectern config editor 'vim'",
                    msg
                )
            }
            LecternError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: lectern config site_dir public",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using LecternError
pub type Result<T> = std::result::Result<T, LecternError>;
