//! Curriculum integrity checks
//!
//! Orchestrates the full check workflow: scan the corpus, parse every
//! markdown document once, then run the selected check families against
//! the shared models.

use crate::domain::link::{classify, resolve_internal, LinkTarget};
use crate::domain::snippet::{balance_checked, scan_balance};
use crate::domain::{CheckReport, DocGraph, LessonDoc, SnippetPolicy};
use crate::error::Result;
use crate::infrastructure::{Config, CorpusFiles, CurriculumRepository, FileSystemRepository};
use std::collections::BTreeMap;
use std::path::Path;

/// Which check families to run
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Internal links, anchors, and images
    pub links: bool,

    /// Code snippet language tags and delimiter balance
    pub snippets: bool,

    /// Reachability from the index
    pub orphans: bool,

    /// Treat warnings as failures
    pub strict: bool,

    /// Site directory to exclude from the corpus scan, when it differs
    /// from the configured one (`build --out`)
    pub site_dir: Option<String>,
}

impl CheckOptions {
    /// Selected families; with none picked, everything runs
    pub fn effective(&self) -> (bool, bool, bool) {
        if self.links || self.snippets || self.orphans {
            (self.links, self.snippets, self.orphans)
        } else {
            (true, true, true)
        }
    }
}

/// Service for running curriculum checks
pub struct CheckService {
    repository: FileSystemRepository,
}

impl CheckService {
    /// Create a new check service
    pub fn new(repository: FileSystemRepository) -> Self {
        CheckService { repository }
    }

    /// Run the selected checks over the whole corpus.
    ///
    /// Returns the report; deciding whether its contents fail the run is
    /// the caller's concern.
    pub fn execute(&self, options: &CheckOptions) -> Result<CheckReport> {
        let mut config = self.repository.load_config()?;
        if let Some(site_dir) = &options.site_dir {
            config.site_dir = site_dir.clone();
        }
        let corpus = self.repository.scan_corpus(&config)?;

        // Parse every document once; all families share the models
        let mut docs: Vec<LessonDoc> = Vec::with_capacity(corpus.documents.len());
        for path in &corpus.documents {
            let content = self.repository.read_doc(path)?;
            docs.push(LessonDoc::parse(Path::new(path), &content));
        }

        let (links, snippets, orphans) = options.effective();
        let mut report = CheckReport::new();
        report.documents_checked = docs.len();

        if links {
            let by_path: BTreeMap<String, &LessonDoc> =
                docs.iter().map(|doc| (doc.path_str(), doc)).collect();
            for doc in &docs {
                self.check_links(doc, &by_path, &mut report);
            }
        }

        if snippets {
            let policy = SnippetPolicy::new(&config.languages);
            for doc in &docs {
                check_snippets(doc, &policy, &mut report);
            }
        }

        if orphans {
            check_orphans(&docs, &corpus, &config, &mut report);
        }

        Ok(report)
    }

    /// Links, anchors, and images of one document
    fn check_links(
        &self,
        doc: &LessonDoc,
        by_path: &BTreeMap<String, &LessonDoc>,
        report: &mut CheckReport,
    ) {
        let path = doc.path_str();

        if doc.title.is_none() {
            report.warning(path.clone(), None, "missing level-1 title");
        }

        for link in &doc.links {
            self.check_reference(doc, &link.url, link.line, "link", by_path, report);
        }
        for image in &doc.images {
            self.check_reference(doc, &image.url, image.line, "image", by_path, report);
        }
    }

    /// One link or image destination
    fn check_reference(
        &self,
        doc: &LessonDoc,
        url: &str,
        line: usize,
        kind: &str,
        by_path: &BTreeMap<String, &LessonDoc>,
        report: &mut CheckReport,
    ) {
        let path = doc.path_str();
        match classify(url) {
            // External URLs are recorded, never fetched
            LinkTarget::External(_) => {}

            LinkTarget::Anchor(fragment) => {
                if !doc.has_anchor(&fragment) {
                    report.error(path, Some(line), format!("broken anchor: #{}", fragment));
                }
            }

            LinkTarget::Internal {
                path: target,
                fragment,
            } => {
                if target.is_empty() {
                    report.error(path, Some(line), format!("empty {} destination", kind));
                    return;
                }

                let Some(resolved) = resolve_internal(&path, &target) else {
                    report.error(
                        path,
                        Some(line),
                        format!("{} escapes the curriculum root: {}", kind, url),
                    );
                    return;
                };

                if let Some(target_doc) = by_path.get(&resolved) {
                    if let Some(fragment) = fragment {
                        if !target_doc.has_anchor(&fragment) {
                            report.error(
                                path,
                                Some(line),
                                format!("broken anchor: {}#{}", resolved, fragment),
                            );
                        }
                    }
                } else if !self.repository.doc_exists(&resolved) {
                    report.error(path, Some(line), format!("broken {}: {}", kind, url));
                }
            }
        }
    }
}

/// Snippet policy and delimiter balance for one document
fn check_snippets(doc: &LessonDoc, policy: &SnippetPolicy, report: &mut CheckReport) {
    let path = doc.path_str();

    for snippet in &doc.snippets {
        match &snippet.language {
            None => {
                let message = if snippet.fenced {
                    "code fence has no language tag"
                } else {
                    "indented code block has no language tag"
                };
                report.warning(path.clone(), Some(snippet.line), message);
            }

            Some(language) => {
                if !policy.is_known(language) {
                    report.error(
                        path.clone(),
                        Some(snippet.line),
                        format!("unknown snippet language: {}", language),
                    );
                    continue;
                }

                if snippet.body.trim().is_empty() {
                    report.warning(path.clone(), Some(snippet.line), "empty code snippet");
                }

                if balance_checked(language) {
                    for issue in scan_balance(language, &snippet.body) {
                        // Body line 1 sits right under the opening fence
                        report.error(
                            path.clone(),
                            Some(snippet.line + issue.line),
                            issue.to_string(),
                        );
                    }
                }
            }
        }
    }
}

/// Reachability from the index, plus prerequisite sanity
fn check_orphans(
    docs: &[LessonDoc],
    corpus: &CorpusFiles,
    config: &Config,
    report: &mut CheckReport,
) {
    if !docs.iter().any(|doc| doc.path_str() == config.index) {
        report.error(config.index.clone(), None, "index document missing");
        return;
    }

    let graph = DocGraph::build(docs, &config.index);

    let tracked = corpus.all();
    for orphan in graph.orphans(&tracked, &config.leaf_resources) {
        report.error(orphan, None, "unreachable from the index");
    }

    // Prerequisites are advisory, so a cycle warns rather than fails
    let order = graph.reading_order();
    if let Some(cycle) = order.cycle {
        let start = cycle[0].clone();
        report.warning(
            start,
            None,
            format!("prerequisite cycle: {}", cycle.join(" -> ")),
        );
    }
}
