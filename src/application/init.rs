//! Initialize curriculum use case

use crate::domain::load_template;
use crate::error::Result;
use crate::infrastructure::{Config, CurriculumRepository, FileSystemRepository};
use chrono::Local;
use std::fs;
use std::path::Path;

/// Initialize a new curriculum at the specified path.
pub fn init(path: &Path, title: Option<&str>) -> Result<()> {
    // Create the directory if it doesn't exist
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());

    // Initialize .lectern directory
    repo.initialize()?;

    let title = match title {
        Some(t) => t.to_string(),
        None => directory_title(path),
    };

    // Create and save default config
    let config = Config::new(&title);
    repo.save_config(&config)?;

    // Starter index, unless the directory already has one
    if !repo.doc_exists(&config.index) {
        let template = load_template(repo.root(), "index.md")?;
        let content = template.render_lesson(&title, "", &title, Local::now().date_naive());
        repo.write_doc(&config.index, &content)?;
    }

    repo.create_dir_all(&config.lessons_dir)?;

    println!("Initialized lectern curriculum at {}", path.display());
    println!("Title: {}", title);

    Ok(())
}

/// Curriculum title derived from the directory name
fn directory_title(path: &Path) -> String {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    canonical
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
        .unwrap_or_else(|| "Curriculum".to_string())
}
