//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(about = "Curriculum authoring and publishing toolchain", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new curriculum
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Curriculum title (default: directory name)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Create a lesson from the template and link it from the index
    New {
        /// Lesson slug or title (e.g., pattern-matching)
        name: String,

        /// Display title (default: derived from the slug)
        #[arg(short, long)]
        title: Option<String>,

        /// Open the new lesson in the editor
        #[arg(short, long)]
        open: bool,
    },

    /// Open a lesson in the configured editor
    Open {
        /// Lesson slug or relative path
        lesson: String,

        /// Print the resolved path instead of launching the editor
        #[arg(long)]
        path_only: bool,
    },

    /// List the documents of the curriculum
    List {
        /// Include word, snippet, and link counts
        #[arg(short, long)]
        long: bool,
    },

    /// Check curriculum integrity
    Check {
        /// Check internal links, anchors, and images
        #[arg(long)]
        links: bool,

        /// Check code snippet languages and delimiter balance
        #[arg(long)]
        snippets: bool,

        /// Check reachability from the index
        #[arg(long)]
        orphans: bool,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Print the suggested reading order
    Order,

    /// Render the curriculum to a static HTML site
    Build {
        /// Output directory (default: config site_dir)
        #[arg(short, long)]
        out: Option<String>,

        /// Remove the previous output directory first
        #[arg(long)]
        clean: bool,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
