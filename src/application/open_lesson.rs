//! Open lesson use case

use crate::domain::curriculum::{is_valid_slug, lesson_path};
use crate::error::{LecternError, Result};
use crate::infrastructure::{CurriculumRepository, EditorSession, FileSystemRepository};

/// Service for resolving and opening lesson documents
pub struct OpenLessonService {
    repository: FileSystemRepository,
}

impl OpenLessonService {
    /// Create a new open lesson service
    pub fn new(repository: FileSystemRepository) -> Self {
        OpenLessonService { repository }
    }

    /// Resolve a slug or relative path to an existing document.
    /// Opens the file in the editor only when `open_in_editor` is true.
    pub fn execute(&self, reference: &str, open_in_editor: bool) -> Result<String> {
        let config = self.repository.load_config()?;

        let resolved = self.resolve(reference, &config.lessons_dir)?;

        if open_in_editor {
            let editor = EditorSession::new(config.get_editor());
            let file_path = self.repository.root().join(&resolved);
            editor.open(&file_path)?;
        }

        Ok(resolved)
    }

    /// Candidate locations for a reference, first existing file wins:
    /// the path as written, then `<lessons_dir>/<slug>.md`, then
    /// `<reference>.md` at the root.
    fn resolve(&self, reference: &str, lessons_dir: &str) -> Result<String> {
        let normalized = reference.replace('\\', "/");
        let mut candidates: Vec<String> = Vec::new();

        if normalized.contains('/') || normalized.ends_with(".md") {
            candidates.push(normalized.clone());
            if !normalized.contains('/') {
                let dir = lessons_dir.trim_end_matches('/');
                if !dir.is_empty() && dir != "." {
                    candidates.push(format!("{}/{}", dir, normalized));
                }
            }
        }
        if is_valid_slug(&normalized) {
            candidates.push(lesson_path(lessons_dir, &normalized));
            candidates.push(format!("{}.md", normalized));
        }

        candidates
            .into_iter()
            .find(|candidate| self.repository.doc_exists(candidate))
            .ok_or_else(|| LecternError::LessonNotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use tempfile::TempDir;

    fn initialized_repo(temp: &TempDir) -> FileSystemRepository {
        init(temp.path(), Some("Test Bootcamp")).unwrap();
        FileSystemRepository::new(temp.path().to_path_buf())
    }

    #[test]
    fn test_resolve_slug_in_lessons_dir() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);
        repo.write_doc("lessons/closures.md", "# Closures\n").unwrap();

        let service = OpenLessonService::new(repo);
        let resolved = service.execute("closures", false).unwrap();
        assert_eq!(resolved, "lessons/closures.md");
    }

    #[test]
    fn test_resolve_relative_path() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);
        repo.write_doc("lessons/closures.md", "# Closures\n").unwrap();

        let service = OpenLessonService::new(repo);
        let resolved = service.execute("lessons/closures.md", false).unwrap();
        assert_eq!(resolved, "lessons/closures.md");
    }

    #[test]
    fn test_resolve_bare_filename_falls_back_to_lessons_dir() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);
        repo.write_doc("lessons/closures.md", "# Closures\n").unwrap();

        let service = OpenLessonService::new(repo);
        let resolved = service.execute("closures.md", false).unwrap();
        assert_eq!(resolved, "lessons/closures.md");
    }

    #[test]
    fn test_resolve_root_level_document() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);
        repo.write_doc("setup.md", "# Setup\n").unwrap();

        let service = OpenLessonService::new(repo);
        let resolved = service.execute("setup", false).unwrap();
        assert_eq!(resolved, "setup.md");
    }

    #[test]
    fn test_resolve_index_by_path() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);

        let service = OpenLessonService::new(repo);
        let resolved = service.execute("index.md", false).unwrap();
        assert_eq!(resolved, "index.md");
    }

    #[test]
    fn test_missing_lesson_fails() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);

        let service = OpenLessonService::new(repo);
        let result = service.execute("nonexistent", false);
        assert!(matches!(result, Err(LecternError::LessonNotFound(_))));
    }
}
