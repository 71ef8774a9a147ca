use crate::env::Environment;
use crate::error::ShellError;
use crate::lexer::CommandLine;
use crate::theme::Theme;
use std::fmt;
use std::io::Write;

/// Result of running one command, as recorded in the history log.
///
/// Most commands either succeed or fail. `theme` additionally reports which
/// color was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    Theme(Theme),
}

impl Outcome {
    /// Integer shown by `log`: `0` for success, `-1` for failure, and the
    /// theme's code (`1..=3`) for a color change.
    pub fn code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => -1,
            Outcome::Theme(theme) => theme.code(),
        }
    }

    pub fn is_failure(self) -> bool {
        self == Outcome::Failure
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// This is implemented by built-ins via a blanket impl, by variable
/// assignment and by external commands.
pub trait ExecutableCommand {
    /// Executes the command, writing everything it prints to `stdout`.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError>;
}

/// Factory that tries to create a command from a tokenized input line.
///
/// Returns `None` when the factory doesn't recognize the line.
pub trait CommandFactory {
    fn try_create(
        &self,
        env: &Environment,
        line: &CommandLine,
    ) -> Option<Box<dyn ExecutableCommand>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_codes() {
        assert_eq!(Outcome::Success.code(), 0);
        assert_eq!(Outcome::Failure.code(), -1);
        assert_eq!(Outcome::Theme(Theme::Blue).code(), 2);
        assert_eq!(Outcome::Theme(Theme::Green).to_string(), "3");
    }
}
