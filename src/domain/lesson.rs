//! Lesson document model
//!
//! A lesson is one markdown file. Parsing extracts everything the other
//! layers need in a single pass: the title, headings with their anchors,
//! links and images with line numbers, code snippets, and the word count.
//! Nothing here touches the filesystem.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser as MdParser, Tag, TagEnd};
use std::path::{Path, PathBuf};

use crate::domain::curriculum::AnchorSet;
use crate::domain::snippet::{is_output_language, language_from_info, Snippet};

/// Markdown extensions enabled throughout (parsing and rendering)
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// A heading with its GitHub-style anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// 1 for `#`, 2 for `##`, and so on
    pub level: usize,
    pub text: String,
    pub anchor: String,
    /// 1-based source line
    pub line: usize,
}

/// A link or image reference found in a lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonLink {
    /// Destination exactly as written
    pub url: String,
    /// 1-based source line
    pub line: usize,
    /// True when the link sits under a "Prerequisites" heading
    pub in_prerequisites: bool,
}

/// Everything extracted from one markdown document
#[derive(Debug, Clone)]
pub struct LessonDoc {
    /// Path relative to the curriculum root
    pub path: PathBuf,
    /// Text of the first level-1 heading, if any
    pub title: Option<String>,
    pub headings: Vec<Heading>,
    pub links: Vec<LessonLink>,
    pub images: Vec<LessonLink>,
    pub snippets: Vec<Snippet>,
    /// Whitespace-separated words in prose text, code blocks excluded
    pub word_count: usize,
}

impl LessonDoc {
    /// Parse markdown into a lesson document
    ///
    /// `path` is the curriculum-relative location of the file; it is stored
    /// on the document and used for link resolution, never opened.
    pub fn parse(path: &Path, content: &str) -> LessonDoc {
        let line_starts = line_starts(content);
        let line_of = |offset: usize| line_starts.partition_point(|&start| start <= offset);

        let mut doc = LessonDoc {
            path: path.to_path_buf(),
            title: None,
            headings: Vec::new(),
            links: Vec::new(),
            images: Vec::new(),
            snippets: Vec::new(),
            word_count: 0,
        };

        let mut anchors = AnchorSet::new();
        let parser = MdParser::new_ext(content, markdown_options());

        let mut in_heading = false;
        let mut heading_text = String::new();
        let mut heading_level = 0usize;
        let mut heading_line = 0usize;

        // Level of the active "Prerequisites" heading, while inside that section
        let mut prereq_level: Option<usize> = None;

        let mut in_code = false;
        let mut code_language: Option<String> = None;
        let mut code_fenced = false;
        let mut code_line = 0usize;
        let mut code_body = String::new();

        // Output fences attach to the snippet before them unless other
        // block content intervenes
        let mut last_snippet: Option<usize> = None;
        let mut block_since_snippet = false;

        for (event, range) in parser.into_offset_iter() {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    in_heading = true;
                    heading_level = level as usize;
                    heading_line = line_of(range.start);
                    heading_text.clear();
                    block_since_snippet = true;
                }

                Event::End(TagEnd::Heading(_)) => {
                    in_heading = false;
                    let text = heading_text.trim().to_string();

                    if let Some(open_level) = prereq_level {
                        if heading_level <= open_level {
                            prereq_level = None;
                        }
                    }
                    if text.eq_ignore_ascii_case("prerequisites") {
                        prereq_level = Some(heading_level);
                    }

                    if heading_level == 1 && doc.title.is_none() {
                        doc.title = Some(text.clone());
                    }

                    let anchor = anchors.assign(&text);
                    doc.headings.push(Heading {
                        level: heading_level,
                        text,
                        anchor,
                        line: heading_line,
                    });
                }

                Event::Start(Tag::Link { dest_url, .. }) => {
                    doc.links.push(LessonLink {
                        url: dest_url.to_string(),
                        line: line_of(range.start),
                        in_prerequisites: prereq_level.is_some(),
                    });
                }

                Event::Start(Tag::Image { dest_url, .. }) => {
                    doc.images.push(LessonLink {
                        url: dest_url.to_string(),
                        line: line_of(range.start),
                        in_prerequisites: prereq_level.is_some(),
                    });
                }

                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code = true;
                    code_line = line_of(range.start);
                    code_body.clear();
                    match kind {
                        CodeBlockKind::Fenced(info) => {
                            code_fenced = true;
                            code_language = language_from_info(&info);
                        }
                        CodeBlockKind::Indented => {
                            code_fenced = false;
                            code_language = None;
                        }
                    }
                }

                Event::End(TagEnd::CodeBlock) => {
                    in_code = false;
                    let body = code_body.clone();
                    let attach_as_output = code_language
                        .as_deref()
                        .is_some_and(is_output_language)
                        && !block_since_snippet
                        && last_snippet.is_some_and(|idx| {
                            let target = &doc.snippets[idx];
                            target.output.is_none()
                                && !target.language.as_deref().is_some_and(is_output_language)
                        });

                    if attach_as_output {
                        if let Some(idx) = last_snippet {
                            doc.snippets[idx].output = Some(body);
                        }
                    } else {
                        doc.snippets.push(Snippet::new(
                            code_language.take(),
                            body,
                            code_line,
                            code_fenced,
                        ));
                        last_snippet = Some(doc.snippets.len() - 1);
                        block_since_snippet = false;
                    }
                    code_language = None;
                }

                Event::Start(Tag::Paragraph)
                | Event::Start(Tag::BlockQuote(_))
                | Event::Start(Tag::List(_))
                | Event::Start(Tag::Table(_))
                | Event::Start(Tag::HtmlBlock)
                | Event::Start(Tag::FootnoteDefinition(_))
                | Event::Rule => {
                    block_since_snippet = true;
                }

                Event::Text(text) => {
                    if in_code {
                        code_body.push_str(&text);
                    } else {
                        if in_heading {
                            heading_text.push_str(&text);
                        }
                        doc.word_count += text.split_whitespace().count();
                    }
                }

                Event::Code(code) => {
                    if in_heading {
                        heading_text.push('`');
                        heading_text.push_str(&code);
                        heading_text.push('`');
                    }
                    doc.word_count += code.split_whitespace().count();
                }

                Event::SoftBreak | Event::HardBreak => {
                    if in_heading {
                        heading_text.push(' ');
                    }
                }

                _ => {}
            }
        }

        doc
    }

    /// Title for display, falling back to the file stem
    pub fn display_title(&self) -> String {
        match &self.title {
            Some(title) => title.clone(),
            None => self
                .path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    /// Curriculum-relative path with forward slashes
    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().replace('\\', "/")
    }

    /// Whether a heading in this document produces the given anchor
    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.headings.iter().any(|h| h.anchor == anchor)
    }

    /// Links sitting under a "Prerequisites" heading
    pub fn prerequisite_links(&self) -> impl Iterator<Item = &LessonLink> {
        self.links.iter().filter(|link| link.in_prerequisites)
    }
}

/// Byte offsets where each line begins
fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (offset, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(offset + 1);
        }
    }
    starts
}
