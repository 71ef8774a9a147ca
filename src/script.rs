//! Script files for non-interactive sessions.

use crate::error::ShellError;
use std::fs;
use std::path::Path;

/// The command every script ends with, whatever its last line says.
const FINAL_COMMAND: &str = "log";

/// The lines of a script, ready to execute.
///
/// The file is read once. Its final line is replaced by `log` so a script
/// always finishes by printing the history of what it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Script, ShellError> {
        let bytes = fs::read(path).map_err(|source| ShellError::ScriptOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Script::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn parse(text: &str) -> Script {
        let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
        if let Some(last) = lines.last_mut() {
            *last = FINAL_COMMAND.to_owned();
        }
        Script { lines }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
