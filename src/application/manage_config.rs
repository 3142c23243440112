//! Config management use case

use crate::error::{LecternError, Result};
use crate::infrastructure::{Config, CurriculumRepository, FileSystemRepository};

const VALID_KEYS: &str = "title, index, lessons_dir, site_dir, editor, languages, leaf_resources";

/// Service for managing curriculum configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "title" => Ok(config.title),
            "index" => Ok(config.index),
            "lessons_dir" => Ok(config.lessons_dir),
            "site_dir" => Ok(config.site_dir),
            "editor" => Ok(config.editor),
            "languages" => Ok(config.languages.join(", ")),
            "leaf_resources" => Ok(config.leaf_resources.join(", ")),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "title" => config.title = value.to_string(),
            "index" => config.index = value.to_string(),
            "lessons_dir" => config.lessons_dir = value.to_string(),
            "site_dir" => config.site_dir = value.to_string(),
            "editor" => config.editor = value.to_string(),
            "languages" => config.languages = split_list(value),
            "leaf_resources" => config.leaf_resources = split_list(value),
            _ => return Err(unknown_key(key)),
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

/// Split a comma-separated value list, dropping empty entries
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn unknown_key(key: &str) -> LecternError {
    LecternError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key, VALID_KEYS
    ))
}
