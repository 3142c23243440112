//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{Cli, Commands};
pub use output::{
    format_build_summary, format_check_report, format_lesson_list, format_reading_order,
};
