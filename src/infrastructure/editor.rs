//! Launching the configured editor

use crate::error::{LecternError, Result};
use std::path::Path;
use std::process::Command;

/// Launches lesson files in an external editor
///
/// The configured command may carry its own arguments ("code -w"); the
/// file path is always appended last. The spawned editor is not waited on.
pub struct EditorSession {
    command: String,
}

impl EditorSession {
    pub fn new(editor_command: String) -> Self {
        EditorSession {
            command: editor_command,
        }
    }

    /// Open a file in the editor and return immediately
    pub fn open(&self, file_path: &Path) -> Result<()> {
        let mut cmd = self.build_command(file_path);
        cmd.spawn().map_err(|e| {
            LecternError::Editor(format!(
                "Failed to launch editor '{}': {}",
                self.program(),
                e
            ))
        })?;
        Ok(())
    }

    /// First word of the command, or the platform fallback when empty
    fn program(&self) -> &str {
        match self.command.split_whitespace().next() {
            Some(program) => program,
            None if cfg!(windows) => "notepad",
            None => "vi",
        }
    }

    fn build_command(&self, file_path: &Path) -> Command {
        let args = self.command.split_whitespace().skip(1);

        // Going through cmd /C makes .bat and .cmd editors resolvable
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(self.program());
            cmd
        } else {
            Command::new(self.program())
        };

        cmd.args(args).arg(file_path);
        cmd
    }
}
