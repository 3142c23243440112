//! Markdown to HTML rendering
//!
//! The event stream from pulldown-cmark is mapped before serialization:
//! headings get the same anchors the checker validates against, and
//! internal links to markdown files are rewritten to their `.html`
//! counterparts with fragments preserved. Everything else passes through
//! untouched, external URLs included.

use pulldown_cmark::{html::push_html, CowStr, Event, Parser as MdParser, Tag};

use crate::domain::lesson::{markdown_options, LessonDoc};
use crate::domain::link::{classify, LinkTarget};

/// Render a document body to HTML
///
/// `doc` must be the parse of `content`; its heading anchors are injected
/// as element ids in document order.
pub fn render_body(doc: &LessonDoc, content: &str) -> String {
    let mut anchors = doc.headings.iter().map(|h| h.anchor.clone());

    let parser = MdParser::new_ext(content, markdown_options());
    let events = parser.map(|event| match event {
        Event::Start(Tag::Heading {
            level,
            classes,
            attrs,
            ..
        }) => {
            let id = anchors.next().map(CowStr::from);
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            })
        }
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = match rewrite_dest(&dest_url) {
                Some(rewritten) => CowStr::from(rewritten),
                None => dest_url,
            };
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            })
        }
        other => other,
    });

    let mut html = String::with_capacity(content.len() * 3 / 2);
    push_html(&mut html, events);
    html
}

/// Site-relative output path for a markdown document
pub fn html_output_path(doc_path: &str) -> String {
    if doc_path.to_ascii_lowercase().ends_with(".md") {
        format!("{}.html", &doc_path[..doc_path.len() - 3])
    } else {
        doc_path.to_string()
    }
}

/// Rewrite an internal `.md` destination to `.html`, keeping the fragment
///
/// Returns `None` when the destination should stay as written.
fn rewrite_dest(url: &str) -> Option<String> {
    if !matches!(classify(url), LinkTarget::Internal { .. }) {
        return None;
    }

    let (path, fragment) = match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (url, None),
    };

    if !path.to_ascii_lowercase().ends_with(".md") {
        return None;
    }

    let html_path = format!("{}.html", &path[..path.len() - 3]);
    Some(match fragment {
        Some(fragment) => format!("{}#{}", html_path, fragment),
        None => html_path,
    })
}
