//! Create lesson use case

use crate::domain::curriculum::{is_valid_slug, lesson_path, slugify, title_from_slug};
use crate::domain::link::relative_from;
use crate::domain::load_template;
use crate::error::{LecternError, Result};
use crate::infrastructure::{CurriculumRepository, EditorSession, FileSystemRepository};
use chrono::Local;

/// Service for creating lesson documents
pub struct NewLessonService {
    repository: FileSystemRepository,
}

impl NewLessonService {
    /// Create a new lesson service
    pub fn new(repository: FileSystemRepository) -> Self {
        NewLessonService { repository }
    }

    /// Create a lesson from the template and link it from the index.
    ///
    /// `name` is a slug or a plain title; titles are slugified. Returns the
    /// curriculum-relative path of the new document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No valid slug can be derived from `name`
    /// - The lesson already exists
    /// - File I/O fails
    pub fn execute(&self, name: &str, title: Option<&str>, open_in_editor: bool) -> Result<String> {
        let config = self.repository.load_config()?;

        // 1. Settle slug and display title
        let (slug, derived_title) = if is_valid_slug(name) {
            (name.to_string(), title_from_slug(name))
        } else {
            let slug = slugify(name);
            if !is_valid_slug(&slug) {
                return Err(LecternError::InvalidSlug(name.to_string()));
            }
            (slug, name.to_string())
        };
        let title = title.map(|t| t.to_string()).unwrap_or(derived_title);

        // 2. Refuse to clobber an existing lesson
        let doc_path = lesson_path(&config.lessons_dir, &slug);
        if self.repository.doc_exists(&doc_path) {
            return Err(LecternError::Config(format!(
                "Lesson already exists: {}",
                doc_path
            )));
        }

        // 3. Render the scaffold
        let template = load_template(self.repository.root(), "lesson.md")?;
        let content =
            template.render_lesson(&title, &slug, &config.title, Local::now().date_naive());
        self.repository.write_doc(&doc_path, &content)?;

        // 4. Link the new lesson from the index so it stays reachable
        self.append_index_link(&config.index, &title, &doc_path)?;

        // 5. Open in editor when requested
        if open_in_editor {
            let editor = EditorSession::new(config.get_editor());
            let file_path = self.repository.root().join(&doc_path);
            editor.open(&file_path)?;
        }

        Ok(doc_path)
    }

    /// Append `- [Title](path)` to the index document
    fn append_index_link(&self, index: &str, title: &str, doc_path: &str) -> Result<()> {
        // Without an index there is nothing to update; the orphan check
        // reports the missing file
        if !self.repository.doc_exists(index) {
            return Ok(());
        }

        let mut updated = self.repository.read_doc(index)?;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        let href = relative_from(index, doc_path);
        updated.push_str(&format!("- [{}]({})\n", title, href));

        self.repository.write_doc_atomic(index, &updated)
    }
}
