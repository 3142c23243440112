//! Configuration management

use crate::error::{LecternError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_index() -> String {
    "index.md".to_string()
}

fn default_lessons_dir() -> String {
    "lessons".to_string()
}

fn default_site_dir() -> String {
    "_site".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Curriculum title, shown in listings and rendered pages
    pub title: String,

    /// Root-relative path of the index document
    #[serde(default = "default_index")]
    pub index: String,

    /// Directory new lessons are created in
    #[serde(default = "default_lessons_dir")]
    pub lessons_dir: String,

    /// Output directory for `lectern build`
    #[serde(default = "default_site_dir")]
    pub site_dir: String,

    pub editor: String,

    /// Extra snippet languages accepted beyond the built-in set
    #[serde(default)]
    pub languages: Vec<String>,

    /// Files and directories exempt from the orphan check
    #[serde(default)]
    pub leaf_resources: Vec<String>,
}

impl Config {
    /// Create a new config with default values
    pub fn new(title: &str) -> Self {
        Config {
            title: title.to_string(),
            index: default_index(),
            lessons_dir: default_lessons_dir(),
            site_dir: default_site_dir(),
            editor: Self::detect_default_editor(),
            languages: Vec::new(),
            leaf_resources: Vec::new(),
        }
    }

    /// Load config from .lectern/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".lectern").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LecternError::NotCurriculumDirectory(path.to_path_buf())
            } else {
                LecternError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .lectern/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let lectern_dir = path.join(".lectern");
        let config_path = lectern_dir.join("config.toml");

        // Ensure .lectern directory exists
        if !lectern_dir.exists() {
            fs::create_dir(&lectern_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the editor command, checking environment variables first
    pub fn get_editor(&self) -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| self.editor.clone())
    }

    /// Detect default editor from environment or system
    fn detect_default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(windows) {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }
}
