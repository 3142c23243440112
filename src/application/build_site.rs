//! Site generation use case
//!
//! The thin content pipeline: every markdown document becomes an HTML page
//! wrapped in the page template, every asset is copied verbatim, and the
//! output tree mirrors the corpus layout.

use crate::domain::render::{html_output_path, render_body};
use crate::domain::{load_template, LessonDoc};
use crate::error::Result;
use crate::infrastructure::{CurriculumRepository, FileSystemRepository};
use std::path::Path;

/// Options for site generation
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Output directory override (default: config `site_dir`)
    pub out: Option<String>,

    /// Remove the previous output directory first
    pub clean: bool,
}

/// What a build produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub assets: usize,
    pub site_dir: String,
}

/// Service for rendering the curriculum to a static site
pub struct BuildSiteService {
    repository: FileSystemRepository,
}

impl BuildSiteService {
    /// Create a new build service
    pub fn new(repository: FileSystemRepository) -> Self {
        BuildSiteService { repository }
    }

    /// Render every document and copy every asset into the site directory.
    pub fn execute(&self, options: &BuildOptions) -> Result<BuildSummary> {
        let config = self.repository.load_config()?;
        let site_dir = options
            .out
            .clone()
            .unwrap_or_else(|| config.site_dir.clone());

        // The output directory must never feed its own input
        let mut scan_config = config.clone();
        scan_config.site_dir = site_dir.clone();
        let corpus = self.repository.scan_corpus(&scan_config)?;

        if options.clean {
            self.repository.remove_dir(&site_dir)?;
        }

        let template = load_template(self.repository.root(), "page.html")?;

        let mut pages = 0;
        for path in &corpus.documents {
            let content = self.repository.read_doc(path)?;
            let doc = LessonDoc::parse(Path::new(path), &content);
            let body = render_body(&doc, &content);
            let page = template.render_page(&doc.display_title(), &config.title, &body);

            let out_path = format!("{}/{}", site_dir, html_output_path(path));
            self.repository.write_doc(&out_path, &page)?;
            pages += 1;
        }

        let mut assets = 0;
        for asset in &corpus.assets {
            let to = format!("{}/{}", site_dir, asset);
            self.repository.copy_file(asset, &to)?;
            assets += 1;
        }

        Ok(BuildSummary {
            pages,
            assets,
            site_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use std::fs;
    use tempfile::TempDir;

    fn initialized_repo(temp: &TempDir) -> FileSystemRepository {
        init(temp.path(), Some("Test Bootcamp")).unwrap();
        FileSystemRepository::new(temp.path().to_path_buf())
    }

    #[test]
    fn test_build_renders_pages_and_copies_assets() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);
        repo.write_doc(
            "index.md",
            "# Test Bootcamp\n\n- [Closures](lessons/closures.md)\n",
        )
        .unwrap();
        repo.write_doc("lessons/closures.md", "# Closures\n\nProse.\n")
            .unwrap();
        repo.write_doc("assets/logo.png", "fake image bytes").unwrap();

        let service = BuildSiteService::new(repo.clone());
        let summary = service.execute(&BuildOptions::default()).unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.assets, 1);
        assert_eq!(summary.site_dir, "_site");
        assert!(temp.path().join("_site/index.html").exists());
        assert!(temp.path().join("_site/lessons/closures.html").exists());
        assert!(temp.path().join("_site/assets/logo.png").exists());
    }

    #[test]
    fn test_pages_rewrite_markdown_links() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);
        repo.write_doc(
            "index.md",
            "# Test Bootcamp\n\n- [Closures](lessons/closures.md#overview)\n",
        )
        .unwrap();
        repo.write_doc("lessons/closures.md", "# Closures\n\n## Overview\n")
            .unwrap();

        let service = BuildSiteService::new(repo);
        service.execute(&BuildOptions::default()).unwrap();

        let index_html = fs::read_to_string(temp.path().join("_site/index.html")).unwrap();
        assert!(index_html.contains("href=\"lessons/closures.html#overview\""));

        let closures_html =
            fs::read_to_string(temp.path().join("_site/lessons/closures.html")).unwrap();
        assert!(closures_html.contains("id=\"overview\""));
    }

    #[test]
    fn test_page_template_wraps_content() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);

        let service = BuildSiteService::new(repo);
        service.execute(&BuildOptions::default()).unwrap();

        let index_html = fs::read_to_string(temp.path().join("_site/index.html")).unwrap();
        assert!(index_html.contains("<title>Test Bootcamp - Test Bootcamp</title>"));
        assert!(index_html.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_out_option_overrides_site_dir() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);

        let service = BuildSiteService::new(repo);
        let summary = service
            .execute(&BuildOptions {
                out: Some("public".to_string()),
                clean: false,
            })
            .unwrap();

        assert_eq!(summary.site_dir, "public");
        assert!(temp.path().join("public/index.html").exists());
    }

    #[test]
    fn test_clean_removes_stale_output() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);
        repo.write_doc("_site/stale.html", "<html>old</html>").unwrap();

        let service = BuildSiteService::new(repo);
        service
            .execute(&BuildOptions {
                out: None,
                clean: true,
            })
            .unwrap();

        assert!(!temp.path().join("_site/stale.html").exists());
        assert!(temp.path().join("_site/index.html").exists());
    }

    #[test]
    fn test_without_clean_stale_output_survives() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);
        repo.write_doc("_site/stale.html", "<html>old</html>").unwrap();

        let service = BuildSiteService::new(repo);
        service.execute(&BuildOptions::default()).unwrap();

        assert!(temp.path().join("_site/stale.html").exists());
    }

    #[test]
    fn test_previous_site_never_feeds_the_next_build() {
        let temp = TempDir::new().unwrap();
        let repo = initialized_repo(&temp);

        let service = BuildSiteService::new(repo);
        let first = service.execute(&BuildOptions::default()).unwrap();
        let second = service.execute(&BuildOptions::default()).unwrap();

        assert_eq!(first.pages, second.pages);
        assert!(!temp.path().join("_site/_site").exists());
    }
}
