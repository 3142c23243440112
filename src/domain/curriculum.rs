//! Naming rules for slugs, lesson paths, and heading anchors

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Regex for valid lesson slugs: lowercase words separated by single hyphens
fn slug_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap())
}

/// Check whether a string is a valid lesson slug
pub fn is_valid_slug(slug: &str) -> bool {
    slug_regex().is_match(slug)
}

/// Derive a slug from a lesson title
///
/// Lowercases, keeps alphanumerics, collapses everything else into single
/// hyphens, and trims leading/trailing hyphens. Returns an empty string when
/// nothing usable remains, which callers must reject as an invalid slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // Suppresses a leading hyphen

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

/// Derive a display title from a slug
///
/// Each hyphen-separated word is capitalized: "pattern-matching" becomes
/// "Pattern Matching".
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Curriculum-relative path for a lesson slug
pub fn lesson_path(lessons_dir: &str, slug: &str) -> String {
    let dir = lessons_dir.trim_end_matches('/');
    if dir.is_empty() || dir == "." {
        format!("{}.md", slug)
    } else {
        format!("{}/{}.md", dir, slug)
    }
}

/// Compute the anchor for a heading, GitHub-style
///
/// Lowercase; alphanumerics, hyphens, and underscores are kept; spaces become
/// hyphens; everything else is dropped.
pub fn heading_anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            for lower in c.to_lowercase() {
                anchor.push(lower);
            }
        } else if c == ' ' {
            anchor.push('-');
        }
    }
    anchor
}

/// Assigns unique anchors within one document
///
/// Repeated headings get `-1`, `-2`, ... suffixes so every heading stays
/// addressable, matching what the HTML renderer emits.
#[derive(Debug, Default)]
pub struct AnchorSet {
    seen: HashMap<String, usize>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a heading and return its unique anchor
    pub fn assign(&mut self, heading_text: &str) -> String {
        let base = heading_anchor(heading_text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let anchor = if *count == 0 {
            base.clone()
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        anchor
    }
}
