//! Output formatting utilities

use crate::application::{BuildSummary, LessonOverview, ReadingOrderReport};
use crate::domain::report::counted;
use crate::domain::CheckReport;

/// Format the document listing for display
pub fn format_lesson_list(rows: &[LessonOverview], long: bool) -> String {
    if rows.is_empty() {
        return "No documents found\n".to_string();
    }

    let path_width = rows.iter().map(|row| row.path.len()).max().unwrap_or(0);

    let mut output = String::new();
    for row in rows {
        if long {
            output.push_str(&format!(
                "{:<path_width$}  {:>5} words  {:>3} snippets  {:>3} links  {}\n",
                row.path, row.word_count, row.snippet_count, row.link_count, row.title,
            ));
        } else {
            output.push_str(&format!("{:<path_width$}  {}\n", row.path, row.title));
        }
    }

    output
}

/// Format a check report: sorted diagnostics, then the summary line
pub fn format_check_report(report: &CheckReport) -> String {
    let mut output = String::new();

    for diagnostic in report.sorted() {
        output.push_str(&format!("{}\n", diagnostic));
    }
    if !report.is_empty() {
        output.push('\n');
    }
    output.push_str(&format!("{}\n", report.summary()));

    output
}

/// Format the reading order as a numbered list
pub fn format_reading_order(report: &ReadingOrderReport) -> String {
    if report.lessons.is_empty() {
        return "No lessons found\n".to_string();
    }

    let mut output = String::new();
    for (position, lesson) in report.lessons.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {}  ({})\n",
            position + 1,
            lesson.title,
            lesson.path
        ));
    }

    if let Some(cycle) = &report.cycle {
        output.push_str(&format!(
            "\nwarning: prerequisite cycle: {}\n",
            cycle.join(" -> ")
        ));
    }

    output
}

/// Format the build result line
pub fn format_build_summary(summary: &BuildSummary) -> String {
    format!(
        "Built {} and {} into {}",
        counted(summary.pages, "page"),
        counted(summary.assets, "asset"),
        summary.site_dir
    )
}
