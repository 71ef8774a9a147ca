use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while dispatching a single input line.
///
/// The `Display` text of each variant is exactly what the user sees, so the
/// interpreter can report an error by writing it on its own line.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Error: Please enter a character.")]
    ParseError,

    #[error("Error: No Environment Variable {0} found.")]
    UnresolvedVariable(String),

    #[error(
        "Error: Please make sure the variable name only includes letters, numbers, or underscores."
    )]
    InvalidVariableName,

    #[error("Error: Please get rid of the spaces around =.")]
    SpacingError,

    #[error("Error: Please have a variable name.")]
    EmptyName,

    #[error("Please enter a value")]
    MissingValue,

    #[error("No space remaining for new variables.")]
    CapacityExceeded,

    #[error("unsupported theme")]
    UnsupportedTheme(Option<String>),

    #[error("Missing keyword or command, or permission problem")]
    CommandNotFound(String),

    #[error("Failed to start {command}: {source}")]
    ExternalSpawnFailure {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command} exited with status {code}")]
    ExternalNonZeroExit { command: String, code: i32 },

    #[error("{command}: terminated by signal {signal}")]
    ExternalAbnormalTermination { command: String, signal: i32 },

    #[error("Unable to read script file: {}", path.display())]
    ScriptOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Whether the error should be shown to the user when it is handled.
    ///
    /// A child that exits with a nonzero status has already explained itself
    /// on its own streams.
    pub fn is_reported(&self) -> bool {
        !matches!(self, ShellError::ExternalNonZeroExit { .. })
    }

    /// Errors that come from the interpreter's own output stream rather than
    /// from the command being dispatched.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Io(_))
    }
}
