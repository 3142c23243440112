//! File system repository

use crate::error::{LecternError, Result};
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Tracked files of a curriculum, split by kind
///
/// Paths are curriculum-relative with `/` separators and sorted. Hidden
/// files, dot directories, and the site output directory are never tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusFiles {
    /// Markdown documents
    pub documents: Vec<String>,
    /// Everything else (images, data files, other assets)
    pub assets: Vec<String>,
}

impl CorpusFiles {
    /// All tracked paths, documents and assets together
    pub fn all(&self) -> Vec<String> {
        let mut all = self.documents.clone();
        all.extend(self.assets.iter().cloned());
        all.sort();
        all
    }
}

/// Abstract repository for curriculum operations
pub trait CurriculumRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .lectern/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .lectern/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .lectern directory exists
    fn is_initialized(&self) -> bool;

    /// Create .lectern directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of CurriculumRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover curriculum root by walking up from current directory
    /// First checks LECTERN_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        // 1. Check LECTERN_ROOT environment variable first
        if let Ok(root_path) = std::env::var("LECTERN_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_lectern_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(LecternError::Config(format!(
                    "LECTERN_ROOT is set to '{}' but no .lectern directory found. \
                    Run 'lectern init' in that directory or unset LECTERN_ROOT.",
                    path.display()
                )));
            }
        }

        // 2. Fall back to walking up from current directory
        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover curriculum root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_lectern_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    // Reached filesystem root without finding .lectern
                    return Err(LecternError::NotCurriculumDirectory(start.to_path_buf()));
                }
            }
        }
    }

    /// Check if a path contains a .lectern directory
    fn has_lectern_dir(path: &Path) -> bool {
        path.join(".lectern").is_dir()
    }
}

impl CurriculumRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_lectern_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let lectern_dir = self.root.join(".lectern");

        if lectern_dir.exists() {
            return Err(LecternError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&lectern_dir)?;
        Ok(())
    }
}

// Document and asset operations (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Check if a document exists. Directories do not count; a link must
    /// land on a file.
    pub fn doc_exists(&self, rel_path: &str) -> bool {
        self.root.join(rel_path).is_file()
    }

    /// Read document content (returns empty string if file doesn't exist)
    pub fn read_doc(&self, rel_path: &str) -> Result<String> {
        let path = self.root.join(rel_path);

        if !path.exists() {
            return Ok(String::new());
        }

        fs::read_to_string(&path).map_err(LecternError::Io)
    }

    /// Write document content (creates if doesn't exist, overwrites if exists)
    pub fn write_doc(&self, rel_path: &str, content: &str) -> Result<()> {
        let path = self.root.join(rel_path);

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, content).map_err(LecternError::Io)
    }

    /// Write document content using a best-effort atomic replace:
    /// write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
    pub fn write_doc_atomic(&self, rel_path: &str, content: &str) -> Result<()> {
        let path = self.root.join(rel_path);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_name = format!(
            "{}.lectern-tmp-{}",
            path.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("doc.md"),
            std::process::id()
        );
        let tmp_path = path.with_file_name(tmp_name);

        fs::write(&tmp_path, content)?;

        if path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Create a directory (and parents) relative to the repository root.
    pub fn create_dir_all(&self, dir: &str) -> Result<()> {
        let path = self.root.join(dir);
        fs::create_dir_all(path).map_err(LecternError::Io)
    }

    /// Copy a file (relative paths) within the repository.
    pub fn copy_file(&self, from: &str, to: &str) -> Result<()> {
        let from_path = self.root.join(from);
        let to_path = self.root.join(to);

        if !from_path.exists() {
            return Err(LecternError::Config(format!(
                "Cannot copy missing file: {}",
                from_path.display()
            )));
        }

        if let Some(parent) = to_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::copy(from_path, to_path)?;
        Ok(())
    }

    /// Remove a directory tree under the root, ignoring a missing one.
    pub fn remove_dir(&self, dir: &str) -> Result<()> {
        let path = self.root.join(dir);
        if path.exists() {
            fs::remove_dir_all(path)?;
        }
        Ok(())
    }

    fn normalize_relative_path(path: &Path) -> Option<String> {
        let parts: Vec<&str> = path
            .iter()
            .map(|part| part.to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    /// List the tracked files of the curriculum
    ///
    /// Walks the tree from the root, skipping dot directories, hidden files,
    /// and the configured site output directory.
    pub fn scan_corpus(&self, config: &Config) -> Result<CorpusFiles> {
        let site_dir = config.site_dir.clone();
        let mut corpus = CorpusFiles::default();

        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            if !entry.file_type().is_dir() {
                return true;
            }
            let Some(name) = entry.file_name().to_str() else {
                return false;
            };
            if name.starts_with('.') {
                return false;
            }
            // The site output directory lives directly under the root
            !(entry.depth() == 1 && name == site_dir)
        });

        for entry in walker {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let Some(rel_path) = Self::normalize_relative_path(rel) else {
                continue;
            };

            if name.to_ascii_lowercase().ends_with(".md") {
                corpus.documents.push(rel_path);
            } else {
                corpus.assets.push(rel_path);
            }
        }

        corpus.documents.sort();
        corpus.assets.sort();
        Ok(corpus)
    }
}
