//! Templates for lesson scaffolds and rendered pages

use crate::error::{LecternError, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

// Built-in template constants
const LESSON_TEMPLATE: &str =
    "# {TITLE}\n\n## Prerequisites\n\n\n## Overview\n\n\n## Exercises\n\n";
const INDEX_TEMPLATE: &str = "# {CURRICULUM}\n\n## Lessons\n\n";
const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{TITLE} - {CURRICULUM}</title>
<style>
body { max-width: 46rem; margin: 2rem auto; padding: 0 1rem; font-family: system-ui, sans-serif; line-height: 1.6; }
pre { background: #f6f8fa; padding: 0.8rem; overflow-x: auto; }
code { font-family: ui-monospace, monospace; }
a { color: #0969da; }
img { max-width: 100%; }
</style>
</head>
<body>
{CONTENT}
</body>
</html>
"##;

/// A template with `{VARIABLE}` placeholders
#[derive(Debug)]
pub struct Template {
    content: String,
}

impl Template {
    /// Create template from built-in template name
    pub fn from_builtin(template_name: &str) -> Result<Self> {
        let content = match template_name {
            "lesson.md" => LESSON_TEMPLATE,
            "index.md" => INDEX_TEMPLATE,
            "page.html" => PAGE_TEMPLATE,
            _ => {
                return Err(LecternError::Template(format!(
                    "Unknown template: {}",
                    template_name
                )))
            }
        };

        Ok(Template {
            content: content.to_string(),
        })
    }

    /// Create template from custom template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| LecternError::Template(format!("Failed to read template file: {}", e)))?;

        Ok(Template { content })
    }

    /// Render a markdown scaffold
    ///
    /// Unknown placeholders are left unchanged.
    pub fn render_lesson(
        &self,
        title: &str,
        slug: &str,
        curriculum: &str,
        date: NaiveDate,
    ) -> String {
        self.content
            .replace("{TITLE}", title)
            .replace("{SLUG}", slug)
            .replace("{CURRICULUM}", curriculum)
            .replace("{DATE}", &date.format("%B %d, %Y").to_string())
            .replace("{ISO_DATE}", &date.format("%Y-%m-%d").to_string())
    }

    /// Render the HTML page shell around already-rendered body content
    ///
    /// `{CONTENT}` is substituted last, so placeholder-looking text inside
    /// the body survives verbatim.
    pub fn render_page(&self, title: &str, curriculum: &str, content: &str) -> String {
        self.content
            .replace("{TITLE}", title)
            .replace("{CURRICULUM}", curriculum)
            .replace("{CONTENT}", content)
    }
}

/// Load template from custom location or fall back to built-in
pub fn load_template(curriculum_root: &Path, template_name: &str) -> Result<Template> {
    let custom_path = curriculum_root
        .join(".lectern")
        .join("templates")
        .join(template_name);

    if custom_path.exists() {
        Template::from_file(&custom_path)
    } else {
        Template::from_builtin(template_name)
    }
}
