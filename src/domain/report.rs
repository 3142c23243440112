//! Check report model
//!
//! Diagnostics accumulate here during a check run and come back out sorted
//! by location, so the report reads top to bottom per file regardless of
//! which check produced each finding.

use std::fmt;

/// Diagnostic severity. Errors fail a check run; warnings fail only under
/// strict mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One finding, tied to a file and usually a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Curriculum-relative path with `/` separators
    pub path: String,
    /// 1-based line, `None` for whole-file findings
    pub line: Option<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn error(path: impl Into<String>, line: Option<usize>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn warning(
        path: impl Into<String>,
        line: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{}:{}: {}: {}",
                self.path, line, self.severity, self.message
            ),
            None => write!(f, "{}: {}: {}", self.path, self.severity, self.message),
        }
    }
}

/// Everything a check run found
#[derive(Debug, Default)]
pub struct CheckReport {
    diagnostics: Vec<Diagnostic>,
    /// Markdown documents examined
    pub documents_checked: usize,
}

impl CheckReport {
    pub fn new() -> Self {
        CheckReport::default()
    }

    pub fn error(
        &mut self,
        path: impl Into<String>,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(Diagnostic::error(path, line, message));
    }

    pub fn warning(
        &mut self,
        path: impl Into<String>,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(Diagnostic::warning(path, line, message));
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether the run fails: any error, or any warning under strict mode
    pub fn has_failures(&self, strict: bool) -> bool {
        self.error_count() > 0 || (strict && self.warning_count() > 0)
    }

    /// Diagnostics sorted by file, then line, with errors before warnings
    /// at the same location
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by(|a, b| {
            (&a.path, a.line.unwrap_or(0), a.severity, &a.message).cmp(&(
                &b.path,
                b.line.unwrap_or(0),
                b.severity,
                &b.message,
            ))
        });
        sorted
    }

    /// One-line tally, e.g. "2 errors, 1 warning in 14 documents"
    pub fn summary(&self) -> String {
        format!(
            "{}, {} in {}",
            counted(self.error_count(), "error"),
            counted(self.warning_count(), "warning"),
            counted(self.documents_checked, "document"),
        )
    }
}

/// `1 error`, `2 errors`
pub fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
