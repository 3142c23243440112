//! List documents use case

use crate::domain::LessonDoc;
use crate::error::Result;
use crate::infrastructure::{CurriculumRepository, FileSystemRepository};
use std::path::Path;

/// One row in the document listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonOverview {
    /// Curriculum-relative path
    pub path: String,
    /// Level-1 heading text, or the file stem when there is none
    pub title: String,
    pub word_count: usize,
    pub snippet_count: usize,
    pub link_count: usize,
}

/// Collect an overview row for every markdown document, sorted by path.
pub fn list_lessons(repository: &FileSystemRepository) -> Result<Vec<LessonOverview>> {
    let config = repository.load_config()?;
    let corpus = repository.scan_corpus(&config)?;

    let mut rows = Vec::with_capacity(corpus.documents.len());
    for path in &corpus.documents {
        let content = repository.read_doc(path)?;
        let doc = LessonDoc::parse(Path::new(path), &content);
        rows.push(LessonOverview {
            path: doc.path_str(),
            title: doc.display_title(),
            word_count: doc.word_count,
            snippet_count: doc.snippets.len(),
            link_count: doc.links.len(),
        });
    }

    Ok(rows)
}
