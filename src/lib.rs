//! lectern - Curriculum authoring and publishing toolchain
//!
//! A command-line tool for managing a markdown bootcamp curriculum: lesson
//! scaffolding, integrity checks (links, snippets, reachability from the
//! index), a prerequisite-aware reading order, and static HTML rendering.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::LecternError;
