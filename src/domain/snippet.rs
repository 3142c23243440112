//! Snippet model and structural well-formedness checking
//!
//! A snippet is a fenced code block in a lesson, optionally paired with an
//! illustrative console-output block. "Well-formed for the declared
//! language" is a structural property: the language tag must be known, and
//! for bracket-structured languages the `()[]{}` delimiters must balance
//! once string literals and comments are skipped. Snippets are never
//! executed or compiled.

use std::collections::BTreeSet;
use std::fmt;

/// Fence languages that mark illustrative output rather than code
pub const OUTPUT_LANGUAGES: &[&str] = &["console", "text", "output"];

/// Language tags accepted without extra configuration
const BUILTIN_LANGUAGES: &[&str] = &[
    "scala", "haskell", "java", "kotlin", "python", "javascript", "js", "typescript", "ts",
    "rust", "sql", "json", "yaml", "toml", "xml", "html", "css", "bash", "sh", "shell", "diff",
    "markdown", "md",
];

/// A fenced (or indented) code block extracted from a lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Declared language (first word of the fence info), lowercased.
    /// `None` for untagged fences and indented blocks.
    pub language: Option<String>,

    /// Code body, exactly as written
    pub body: String,

    /// 1-based line of the opening fence in the source document
    pub line: usize,

    /// False for indented code blocks
    pub fenced: bool,

    /// Illustrative console output attached from a following output block
    pub output: Option<String>,
}

impl Snippet {
    pub fn new(language: Option<String>, body: String, line: usize, fenced: bool) -> Self {
        Snippet {
            language,
            body,
            line,
            fenced,
            output: None,
        }
    }
}

/// Extract the language tag from a fence info string
///
/// Only the first word counts; trailing attributes (e.g. "scala mdoc") are
/// ignored. Returns `None` for an empty info string.
pub fn language_from_info(info: &str) -> Option<String> {
    info.split_whitespace()
        .next()
        .map(|word| word.to_lowercase())
}

/// Whether a language tag marks illustrative output
pub fn is_output_language(lang: &str) -> bool {
    OUTPUT_LANGUAGES.contains(&lang)
}

/// The set of language tags a curriculum accepts
#[derive(Debug, Clone)]
pub struct SnippetPolicy {
    allowed: BTreeSet<String>,
}

impl SnippetPolicy {
    /// Build the policy from the built-in set plus configured extras
    pub fn new(extra_languages: &[String]) -> Self {
        let mut allowed: BTreeSet<String> =
            BUILTIN_LANGUAGES.iter().map(|s| s.to_string()).collect();
        allowed.extend(OUTPUT_LANGUAGES.iter().map(|s| s.to_string()));
        allowed.extend(extra_languages.iter().map(|s| s.trim().to_lowercase()));
        allowed.remove("");
        SnippetPolicy { allowed }
    }

    pub fn is_known(&self, lang: &str) -> bool {
        self.allowed.contains(lang)
    }
}

/// A structural problem found inside a snippet body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceIssue {
    /// 1-based line within the snippet body
    pub line: usize,
    pub kind: BalanceIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceIssueKind {
    /// A closer with no matching opener
    UnmatchedCloser(char),
    /// An opener closed by the wrong delimiter
    MismatchedPair { opened: char, found: char },
    /// An opener still unclosed at the end of the snippet
    UnclosedOpener(char),
    UnterminatedBlockComment,
    /// A multi-line string (triple-quoted or backtick) left open
    UnterminatedString(char),
}

impl fmt::Display for BalanceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            BalanceIssueKind::UnmatchedCloser(c) => write!(f, "unmatched '{}'", c),
            BalanceIssueKind::MismatchedPair { opened, found } => {
                write!(f, "'{}' closed by '{}'", opened, found)
            }
            BalanceIssueKind::UnclosedOpener(c) => write!(f, "unclosed '{}'", c),
            BalanceIssueKind::UnterminatedBlockComment => write!(f, "unterminated block comment"),
            BalanceIssueKind::UnterminatedString(c) => {
                write!(f, "unterminated string opened with '{}'", c)
            }
        }
    }
}

/// How one quote character behaves in a language
#[derive(Debug, Clone, Copy)]
struct QuoteRule {
    delim: char,
    /// Backslash escapes the delimiter
    escapes: bool,
    /// `'''`/`"""` forms span lines
    triple: bool,
    /// A single delimiter already spans lines (backtick templates)
    multiline: bool,
}

impl QuoteRule {
    const fn simple(delim: char) -> Self {
        QuoteRule {
            delim,
            escapes: true,
            triple: false,
            multiline: false,
        }
    }

    const fn triple(delim: char) -> Self {
        QuoteRule {
            delim,
            escapes: true,
            triple: true,
            multiline: false,
        }
    }
}

/// Comment and string syntax for a family of languages
#[derive(Debug, Clone, Copy)]
struct Family {
    line_comment: Option<&'static str>,
    block_comment: Option<(&'static str, &'static str)>,
    /// Block comments nest (Rust, Haskell)
    block_nests: bool,
    quotes: &'static [QuoteRule],
}

const C_QUOTES: &[QuoteRule] = &[QuoteRule::simple('"'), QuoteRule::simple('\'')];
const JS_QUOTES: &[QuoteRule] = &[
    QuoteRule::simple('"'),
    QuoteRule::simple('\''),
    QuoteRule {
        delim: '`',
        escapes: true,
        triple: false,
        multiline: true,
    },
];
const RUST_QUOTES: &[QuoteRule] = &[QuoteRule::simple('"')];
const SCALA_QUOTES: &[QuoteRule] = &[QuoteRule::triple('"'), QuoteRule::simple('\'')];
const PYTHON_QUOTES: &[QuoteRule] = &[QuoteRule::triple('"'), QuoteRule::triple('\'')];
const HASKELL_QUOTES: &[QuoteRule] = &[QuoteRule::simple('"')];
const SQL_QUOTES: &[QuoteRule] = &[
    QuoteRule {
        delim: '\'',
        escapes: false,
        triple: false,
        multiline: false,
    },
    QuoteRule {
        delim: '"',
        escapes: false,
        triple: false,
        multiline: false,
    },
];
const JSON_QUOTES: &[QuoteRule] = &[QuoteRule::simple('"')];
const TOML_QUOTES: &[QuoteRule] = &[QuoteRule::triple('"'), QuoteRule::triple('\'')];

/// Delimiter-scanning rules for a language, or `None` when the language is
/// exempt from balance checking (markup, output, indentation-structured, and
/// shell languages, where brackets legitimately appear unpaired).
fn family_for(lang: &str) -> Option<Family> {
    match lang {
        "rust" => Some(Family {
            line_comment: Some("//"),
            block_comment: Some(("/*", "*/")),
            block_nests: true,
            quotes: RUST_QUOTES,
        }),
        "scala" => Some(Family {
            line_comment: Some("//"),
            block_comment: Some(("/*", "*/")),
            block_nests: true,
            quotes: SCALA_QUOTES,
        }),
        "java" | "kotlin" => Some(Family {
            line_comment: Some("//"),
            block_comment: Some(("/*", "*/")),
            block_nests: false,
            quotes: C_QUOTES,
        }),
        "javascript" | "js" | "typescript" | "ts" => Some(Family {
            line_comment: Some("//"),
            block_comment: Some(("/*", "*/")),
            block_nests: false,
            quotes: JS_QUOTES,
        }),
        "css" => Some(Family {
            line_comment: None,
            block_comment: Some(("/*", "*/")),
            block_nests: false,
            quotes: C_QUOTES,
        }),
        "haskell" => Some(Family {
            line_comment: Some("--"),
            block_comment: Some(("{-", "-}")),
            block_nests: true,
            quotes: HASKELL_QUOTES,
        }),
        "python" => Some(Family {
            line_comment: Some("#"),
            block_comment: None,
            block_nests: false,
            quotes: PYTHON_QUOTES,
        }),
        "toml" => Some(Family {
            line_comment: Some("#"),
            block_comment: None,
            block_nests: false,
            quotes: TOML_QUOTES,
        }),
        "sql" => Some(Family {
            line_comment: Some("--"),
            block_comment: Some(("/*", "*/")),
            block_nests: false,
            quotes: SQL_QUOTES,
        }),
        "json" => Some(Family {
            line_comment: None,
            block_comment: None,
            block_nests: false,
            quotes: JSON_QUOTES,
        }),
        _ => None,
    }
}

/// Whether a language participates in delimiter balance checking
pub fn balance_checked(lang: &str) -> bool {
    family_for(lang).is_some()
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Normal,
    LineComment,
    BlockComment { depth: usize, start_line: usize },
    InString { rule: QuoteRule, triple: bool, start_line: usize },
}

/// Scan a snippet body for delimiter problems
///
/// Returns an empty vector for exempt languages. Lines are 1-based within
/// the body; callers rebase them onto the document.
pub fn scan_balance(lang: &str, body: &str) -> Vec<BalanceIssue> {
    let Some(family) = family_for(lang) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut state = ScanState::Normal;
    let mut line = 1usize;

    let chars: Vec<char> = body.chars().collect();
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            match state {
                ScanState::LineComment => state = ScanState::Normal,
                // Single-line strings close silently at end of line
                ScanState::InString { rule, triple, .. } if !triple && !rule.multiline => {
                    state = ScanState::Normal;
                }
                _ => {}
            }
            i += 1;
            continue;
        }

        match state {
            ScanState::LineComment => {
                i += 1;
            }
            ScanState::BlockComment { depth, start_line } => {
                let (open, close) = family.block_comment.unwrap_or(("", ""));
                if family.block_nests && starts_with_at(&chars, i, open) {
                    state = ScanState::BlockComment {
                        depth: depth + 1,
                        start_line,
                    };
                    i += open.chars().count();
                } else if starts_with_at(&chars, i, close) {
                    state = if depth == 1 {
                        ScanState::Normal
                    } else {
                        ScanState::BlockComment {
                            depth: depth - 1,
                            start_line,
                        }
                    };
                    i += close.chars().count();
                } else {
                    i += 1;
                }
            }
            ScanState::InString { rule, triple, .. } => {
                if rule.escapes && c == '\\' {
                    i += 2;
                } else if triple && starts_with_triple(&chars, i, rule.delim) {
                    state = ScanState::Normal;
                    i += 3;
                } else if !triple && c == rule.delim {
                    state = ScanState::Normal;
                    i += 1;
                } else {
                    i += 1;
                }
            }
            ScanState::Normal => {
                if let Some((open, _)) = family.block_comment {
                    if starts_with_at(&chars, i, open) {
                        state = ScanState::BlockComment {
                            depth: 1,
                            start_line: line,
                        };
                        i += open.chars().count();
                        continue;
                    }
                }
                if let Some(marker) = family.line_comment {
                    if starts_with_at(&chars, i, marker) {
                        state = ScanState::LineComment;
                        i += marker.chars().count();
                        continue;
                    }
                }
                if let Some(rule) = family.quotes.iter().find(|r| r.delim == c) {
                    let triple = rule.triple && starts_with_triple(&chars, i, rule.delim);
                    state = ScanState::InString {
                        rule: *rule,
                        triple,
                        start_line: line,
                    };
                    i += if triple { 3 } else { 1 };
                    continue;
                }

                match c {
                    '(' | '[' | '{' => stack.push((c, line)),
                    ')' | ']' | '}' => match stack.pop() {
                        None => issues.push(BalanceIssue {
                            line,
                            kind: BalanceIssueKind::UnmatchedCloser(c),
                        }),
                        Some((opened, _)) if closer_for(opened) != c => {
                            issues.push(BalanceIssue {
                                line,
                                kind: BalanceIssueKind::MismatchedPair { opened, found: c },
                            });
                        }
                        Some(_) => {}
                    },
                    _ => {}
                }
                i += 1;
            }
        }
    }

    // End-of-snippet accounting
    match state {
        ScanState::BlockComment { start_line, .. } => issues.push(BalanceIssue {
            line: start_line,
            kind: BalanceIssueKind::UnterminatedBlockComment,
        }),
        ScanState::InString {
            rule,
            triple,
            start_line,
        } if triple || rule.multiline => issues.push(BalanceIssue {
            line: start_line,
            kind: BalanceIssueKind::UnterminatedString(rule.delim),
        }),
        _ => {}
    }

    for (opened, opened_line) in stack {
        issues.push(BalanceIssue {
            line: opened_line,
            kind: BalanceIssueKind::UnclosedOpener(opened),
        });
    }

    issues
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn starts_with_at(chars: &[char], i: usize, token: &str) -> bool {
    token.chars().enumerate().all(|(offset, tc)| {
        chars.get(i + offset).copied() == Some(tc)
    })
}

fn starts_with_triple(chars: &[char], i: usize, delim: char) -> bool {
    chars.get(i).copied() == Some(delim)
        && chars.get(i + 1).copied() == Some(delim)
        && chars.get(i + 2).copied() == Some(delim)
}
