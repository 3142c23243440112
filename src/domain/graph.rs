//! Document graph over the curriculum
//!
//! Two questions are answered here: which tracked files are reachable from
//! the index (anything else is an orphan), and what order the lessons
//! should be read in, derived from their declared prerequisites.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::domain::lesson::LessonDoc;
use crate::domain::link::{classify, resolve_internal, LinkTarget};

/// Reference and prerequisite edges between curriculum documents
///
/// Paths are curriculum-relative with `/` separators. Only links that
/// resolve inside the curriculum contribute edges; external URLs and
/// malformed paths are the checker's concern.
#[derive(Debug)]
pub struct DocGraph {
    /// Resolved internal references (links and images) per document
    edges: BTreeMap<String, BTreeSet<String>>,
    /// Resolved prerequisites per lesson
    prereqs: BTreeMap<String, BTreeSet<String>>,
    doc_paths: BTreeSet<String>,
    index: String,
}

/// Result of ordering the lessons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingOrder {
    /// Every lesson, prerequisites first, ties broken by path
    pub ordered: Vec<String>,
    /// One prerequisite cycle, as a path with the first node repeated at
    /// the end. Lessons involved in a cycle are still listed in `ordered`,
    /// appended in path order.
    pub cycle: Option<Vec<String>>,
}

impl DocGraph {
    /// Build the graph from parsed documents
    pub fn build(docs: &[LessonDoc], index: &str) -> DocGraph {
        let doc_paths: BTreeSet<String> = docs.iter().map(|d| d.path_str()).collect();
        let mut edges: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut prereqs: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for doc in docs {
            let from = doc.path_str();

            let out = edges.entry(from.clone()).or_default();
            for link in doc.links.iter().chain(doc.images.iter()) {
                if let LinkTarget::Internal { path, .. } = classify(&link.url) {
                    if let Some(resolved) = resolve_internal(&from, &path) {
                        out.insert(resolved);
                    }
                }
            }

            let lesson_prereqs = prereqs.entry(from.clone()).or_default();
            for link in doc.prerequisite_links() {
                if let LinkTarget::Internal { path, .. } = classify(&link.url) {
                    if let Some(resolved) = resolve_internal(&from, &path) {
                        // Prerequisites must name another existing lesson
                        if resolved != from && resolved != index && doc_paths.contains(&resolved) {
                            lesson_prereqs.insert(resolved);
                        }
                    }
                }
            }
        }

        DocGraph {
            edges,
            prereqs,
            doc_paths,
            index: index.to_string(),
        }
    }

    /// Paths reachable from the index by following internal links and images
    ///
    /// Empty when the index document itself is missing.
    pub fn reachable(&self) -> BTreeSet<String> {
        let mut reached = BTreeSet::new();
        if !self.doc_paths.contains(&self.index) {
            return reached;
        }

        let mut queue = VecDeque::new();
        reached.insert(self.index.clone());
        queue.push_back(self.index.clone());

        while let Some(current) = queue.pop_front() {
            if let Some(targets) = self.edges.get(&current) {
                for target in targets {
                    if reached.insert(target.clone()) {
                        queue.push_back(target.clone());
                    }
                }
            }
        }

        reached
    }

    /// Tracked files unreachable from the index, minus declared leaf resources
    pub fn orphans(&self, tracked: &[String], leaf_resources: &[String]) -> Vec<String> {
        let reached = self.reachable();
        let mut orphans: Vec<String> = tracked
            .iter()
            .filter(|path| !reached.contains(*path))
            .filter(|path| !is_leaf_resource(path, leaf_resources))
            .cloned()
            .collect();
        orphans.sort();
        orphans
    }

    /// Declared prerequisites of a lesson
    pub fn prerequisites(&self, path: &str) -> Option<&BTreeSet<String>> {
        self.prereqs.get(path)
    }

    /// Order the lessons so prerequisites come before their dependents
    ///
    /// Kahn's algorithm over the prerequisite edges; the ready pool is kept
    /// sorted so ties always break by path.
    pub fn reading_order(&self) -> ReadingOrder {
        let lessons: BTreeSet<String> = self
            .doc_paths
            .iter()
            .filter(|path| **path != self.index)
            .cloned()
            .collect();

        let mut indegree: BTreeMap<String, usize> =
            lessons.iter().map(|path| (path.clone(), 0)).collect();
        let mut dependents: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for lesson in &lessons {
            if let Some(prereq_set) = self.prereqs.get(lesson) {
                for prereq in prereq_set {
                    if lessons.contains(prereq) {
                        *indegree.get_mut(lesson).unwrap() += 1;
                        dependents
                            .entry(prereq.clone())
                            .or_default()
                            .push(lesson.clone());
                    }
                }
            }
        }

        let mut ready: BTreeSet<String> = indegree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(path, _)| path.clone())
            .collect();
        let mut ordered: Vec<String> = Vec::with_capacity(lessons.len());

        while let Some(next) = ready.iter().next().cloned() {
            ready.remove(&next);
            if let Some(deps) = dependents.get(&next) {
                for dependent in deps {
                    let degree = indegree.get_mut(dependent).unwrap();
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert(dependent.clone());
                    }
                }
            }
            ordered.push(next);
        }

        let cycle = if ordered.len() < lessons.len() {
            let placed: BTreeSet<String> = ordered.iter().cloned().collect();
            let leftover: BTreeSet<String> = lessons
                .iter()
                .filter(|path| !placed.contains(*path))
                .cloned()
                .collect();
            let found = find_cycle(&leftover, &self.prereqs);
            ordered.extend(leftover);
            found
        } else {
            None
        };

        ReadingOrder { ordered, cycle }
    }
}

/// Whether a path is covered by the leaf resource exemptions
///
/// An entry matches itself exactly, or everything under it when it names a
/// directory.
fn is_leaf_resource(path: &str, entries: &[String]) -> bool {
    entries.iter().any(|entry| {
        let entry = entry.trim_end_matches('/');
        path == entry || path.starts_with(&format!("{}/", entry))
    })
}

/// Extract one cycle from the lessons Kahn's algorithm could not place
///
/// Every leftover lesson has at least one leftover prerequisite, so walking
/// prerequisite edges inside the leftover set must revisit a node.
fn find_cycle(
    leftover: &BTreeSet<String>,
    prereqs: &BTreeMap<String, BTreeSet<String>>,
) -> Option<Vec<String>> {
    let start = leftover.iter().next()?.clone();
    let mut path: Vec<String> = vec![start.clone()];
    let mut position: BTreeMap<String, usize> = BTreeMap::new();
    position.insert(start.clone(), 0);

    let mut current = start;
    loop {
        let next = prereqs
            .get(&current)?
            .iter()
            .find(|prereq| leftover.contains(*prereq))?
            .clone();

        if let Some(&pos) = position.get(&next) {
            let mut cycle: Vec<String> = path[pos..].to_vec();
            cycle.push(next);
            return Some(cycle);
        }

        position.insert(next.clone(), path.len());
        path.push(next.clone());
        current = next;
    }
}
