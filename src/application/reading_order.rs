//! Reading order use case

use crate::domain::{DocGraph, LessonDoc};
use crate::error::Result;
use crate::infrastructure::{CurriculumRepository, FileSystemRepository};
use std::collections::BTreeMap;
use std::path::Path;

/// One lesson in the suggested order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedLesson {
    pub path: String,
    pub title: String,
}

/// Suggested reading order plus any prerequisite cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingOrderReport {
    /// Every lesson except the index, prerequisites first
    pub lessons: Vec<OrderedLesson>,
    /// One cycle as a path, first node repeated at the end
    pub cycle: Option<Vec<String>>,
}

/// Compute a prerequisite-respecting reading order for the corpus.
pub fn reading_order(repository: &FileSystemRepository) -> Result<ReadingOrderReport> {
    let config = repository.load_config()?;
    let corpus = repository.scan_corpus(&config)?;

    let mut docs = Vec::with_capacity(corpus.documents.len());
    for path in &corpus.documents {
        let content = repository.read_doc(path)?;
        docs.push(LessonDoc::parse(Path::new(path), &content));
    }

    let titles: BTreeMap<String, String> = docs
        .iter()
        .map(|doc| (doc.path_str(), doc.display_title()))
        .collect();

    let graph = DocGraph::build(&docs, &config.index);
    let order = graph.reading_order();

    let lessons = order
        .ordered
        .iter()
        .map(|path| OrderedLesson {
            path: path.clone(),
            title: titles.get(path).cloned().unwrap_or_else(|| path.clone()),
        })
        .collect();

    Ok(ReadingOrderReport {
        lessons,
        cycle: order.cycle,
    })
}
