//! Link classification and internal path resolution
//!
//! Links fall into three groups: external URLs (recorded, never fetched),
//! same-document anchors, and internal paths that must resolve to a file in
//! the curriculum. Internal resolution is purely lexical; nothing here
//! touches the filesystem.

/// Where a link points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// URL with a scheme (http, https, mailto, ...)
    External(String),

    /// Fragment into the same document (`#anchor`)
    Anchor(String),

    /// Relative or root-absolute path inside the curriculum
    Internal {
        path: String,
        fragment: Option<String>,
    },
}

/// Classify a raw link destination
pub fn classify(url: &str) -> LinkTarget {
    if has_scheme(url) {
        return LinkTarget::External(url.to_string());
    }

    if let Some(fragment) = url.strip_prefix('#') {
        return LinkTarget::Anchor(fragment.to_string());
    }

    let (path, fragment) = split_fragment(url);
    LinkTarget::Internal {
        path: decode_spaces(path),
        fragment: fragment.map(|f| f.to_string()),
    }
}

/// Resolve an internal path against the linking document
///
/// `from_doc` is the linking document's root-relative path with `/`
/// separators. Returns the normalized root-relative path of the target, or
/// `None` when the path escapes the curriculum root or is empty.
pub fn resolve_internal(from_doc: &str, target: &str) -> Option<String> {
    if target.is_empty() {
        return None;
    }

    let mut stack: Vec<&str> = Vec::new();

    if !target.starts_with('/') {
        // Start from the linking document's directory
        let mut parts: Vec<&str> = from_doc.split('/').collect();
        parts.pop(); // Drop the filename itself
        stack.extend(parts.into_iter().filter(|p| !p.is_empty()));
    }

    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    // Walked above the curriculum root
                    return None;
                }
            }
            other => stack.push(other),
        }
    }

    if stack.is_empty() {
        return None;
    }

    Some(stack.join("/"))
}

/// Relative path from one document to a target, the inverse of resolution
///
/// Both arguments are root-relative with `/` separators. Produces the
/// shortest `../`-prefixed relative path that resolves back to `target`
/// from `from_doc`.
pub fn relative_from(from_doc: &str, target: &str) -> String {
    let mut from_dir: Vec<&str> = from_doc.split('/').collect();
    from_dir.pop(); // Drop the filename itself
    let target_parts: Vec<&str> = target.split('/').collect();

    let common = from_dir
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_dir.len() {
        parts.push("..");
    }
    parts.extend(&target_parts[common..]);
    parts.join("/")
}

/// Split `path#fragment` into its two halves
fn split_fragment(url: &str) -> (&str, Option<&str>) {
    match url.split_once('#') {
        Some((path, frag)) => (path, Some(frag)),
        None => (url, None),
    }
}

/// Decode `%20` into a space; other escapes are left untouched
fn decode_spaces(path: &str) -> String {
    path.replace("%20", " ")
}

fn has_scheme(url: &str) -> bool {
    let Some(colon) = url.find(':') else {
        return false;
    };

    let scheme = &url[..colon];
    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_external() {
        assert_eq!(
            classify("https://example.com/page"),
            LinkTarget::External("https://example.com/page".to_string())
        );
        assert_eq!(
            classify("mailto:someone@example.com"),
            LinkTarget::External("mailto:someone@example.com".to_string())
        );
    }

    #[test]
    fn test_classify_anchor() {
        assert_eq!(
            classify("#prerequisites"),
            LinkTarget::Anchor("prerequisites".to_string())
        );
    }

    #[test]
    fn test_classify_internal_plain() {
        assert_eq!(
            classify("closures.md"),
            LinkTarget::Internal {
                path: "closures.md".to_string(),
                fragment: None,
            }
        );
    }

    #[test]
    fn test_classify_internal_with_fragment() {
        assert_eq!(
            classify("../index.md#week-2"),
            LinkTarget::Internal {
                path: "../index.md".to_string(),
                fragment: Some("week-2".to_string()),
            }
        );
    }

    #[test]
    fn test_classify_decodes_spaces() {
        assert_eq!(
            classify("notes/reading%20list.md"),
            LinkTarget::Internal {
                path: "notes/reading list.md".to_string(),
                fragment: None,
            }
        );
    }

    #[test]
    fn test_classify_empty_is_internal() {
        assert_eq!(
            classify(""),
            LinkTarget::Internal {
                path: String::new(),
                fragment: None,
            }
        );
    }

    #[test]
    fn test_scheme_detection_is_strict() {
        // A colon alone does not make a scheme
        assert!(matches!(classify("weird:name.md"), LinkTarget::External(_)));
        assert!(matches!(
            classify("1ab:nope.md"),
            LinkTarget::Internal { .. }
        ));
    }

    #[test]
    fn test_resolve_sibling() {
        assert_eq!(
            resolve_internal("lessons/closures.md", "typeclasses.md"),
            Some("lessons/typeclasses.md".to_string())
        );
    }

    #[test]
    fn test_resolve_dot_and_dotdot() {
        assert_eq!(
            resolve_internal("lessons/closures.md", "./typeclasses.md"),
            Some("lessons/typeclasses.md".to_string())
        );
        assert_eq!(
            resolve_internal("lessons/closures.md", "../index.md"),
            Some("index.md".to_string())
        );
        assert_eq!(
            resolve_internal("a/b/c.md", ".././../index.md"),
            Some("index.md".to_string())
        );
    }

    #[test]
    fn test_resolve_root_absolute() {
        assert_eq!(
            resolve_internal("lessons/deep/closures.md", "/index.md"),
            Some("index.md".to_string())
        );
    }

    #[test]
    fn test_resolve_escaping_root_fails() {
        assert_eq!(resolve_internal("index.md", "../outside.md"), None);
        assert_eq!(resolve_internal("lessons/a.md", "../../outside.md"), None);
    }

    #[test]
    fn test_resolve_from_root_document() {
        assert_eq!(
            resolve_internal("index.md", "lessons/closures.md"),
            Some("lessons/closures.md".to_string())
        );
    }

    #[test]
    fn test_resolve_empty_target_fails() {
        assert_eq!(resolve_internal("index.md", ""), None);
    }

    #[test]
    fn test_resolve_collapses_double_slashes() {
        assert_eq!(
            resolve_internal("index.md", "lessons//closures.md"),
            Some("lessons/closures.md".to_string())
        );
    }

    #[test]
    fn test_relative_from_root_document() {
        assert_eq!(
            relative_from("index.md", "lessons/closures.md"),
            "lessons/closures.md"
        );
    }

    #[test]
    fn test_relative_from_nested_document() {
        assert_eq!(
            relative_from("docs/index.md", "lessons/closures.md"),
            "../lessons/closures.md"
        );
    }

    #[test]
    fn test_relative_from_same_directory() {
        assert_eq!(
            relative_from("lessons/closures.md", "lessons/typeclasses.md"),
            "typeclasses.md"
        );
    }

    #[test]
    fn test_relative_from_round_trips_through_resolve() {
        let rel = relative_from("docs/week1/index.md", "lessons/closures.md");
        assert_eq!(
            resolve_internal("docs/week1/index.md", &rel),
            Some("lessons/closures.md".to_string())
        );
    }
}
