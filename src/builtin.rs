use crate::command::{CommandFactory, ExecutableCommand, Outcome};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::lexer::CommandLine;
use crate::parser::parse_assignment;
use crate::theme::Theme as Color;
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are matched by name and executed directly in-process without
/// spawning a child process.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "print" or "log".
    fn name() -> &'static str;

    /// Build the command from the words following its name.
    fn from_args(args: &[String]) -> Self;

    /// Executes the command using the provided output stream and environment.
    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        T::execute(*self, stdout, env)
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(
        &self,
        _env: &Environment,
        line: &CommandLine,
    ) -> Option<Box<dyn ExecutableCommand>> {
        if line.name == T::name() {
            Some(Box::new(T::from_args(&line.args)))
        } else {
            None
        }
    }
}

/// Leave the session.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn from_args(_args: &[String]) -> Self {
        Exit
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        env.should_exit = true;
        Ok(Outcome::Success)
    }
}

/// Write the arguments to standard output, each followed by a space, then a
/// newline. `$name` arguments are replaced by the variable's value; a
/// reference to an unknown variable fails the whole command before anything
/// is printed.
pub struct Print {
    pub args: Vec<String>,
}

impl BuiltinCommand for Print {
    fn name() -> &'static str {
        "print"
    }

    fn from_args(args: &[String]) -> Self {
        Print {
            args: args.to_vec(),
        }
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        let mut words = Vec::with_capacity(self.args.len());
        for arg in &self.args {
            if arg.starts_with('$') {
                let value = env
                    .vars
                    .resolve(arg)
                    .ok_or_else(|| ShellError::UnresolvedVariable(arg.clone()))?;
                words.push(value);
            } else {
                words.push(arg.as_str());
            }
        }

        for word in words {
            write!(stdout, "{word} ")?;
        }
        writeln!(stdout)?;
        Ok(Outcome::Success)
    }
}

/// Print the history of executed commands.
pub struct Log;

impl BuiltinCommand for Log {
    fn name() -> &'static str {
        "log"
    }

    fn from_args(_args: &[String]) -> Self {
        Log
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        env.history.render(stdout)?;
        Ok(Outcome::Success)
    }
}

/// Switch the output color to red, blue or green.
pub struct Theme {
    pub color: Option<String>,
}

impl BuiltinCommand for Theme {
    fn name() -> &'static str {
        "theme"
    }

    fn from_args(args: &[String]) -> Self {
        Theme {
            color: args.first().cloned(),
        }
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        let color = self
            .color
            .as_deref()
            .and_then(Color::from_name)
            .ok_or(ShellError::UnsupportedTheme(self.color))?;
        write!(stdout, "{}", color.ansi())?;
        log::debug!("theme changed from {} to {color}", env.theme);
        env.theme = color;
        Ok(Outcome::Theme(color))
    }
}

/// `$NAME=VALUE`: create or update a shell variable.
pub struct Assign {
    line: String,
}

impl ExecutableCommand for Assign {
    fn execute(
        self: Box<Self>,
        _stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        let assignment = parse_assignment(&self.line)?;
        log::debug!("set ${}={}", assignment.name, assignment.value);
        env.vars.set(assignment.name, assignment.value)?;
        Ok(Outcome::Success)
    }
}

impl CommandFactory for Factory<Assign> {
    fn try_create(
        &self,
        _env: &Environment,
        line: &CommandLine,
    ) -> Option<Box<dyn ExecutableCommand>> {
        line.is_assignment().then(|| {
            Box::new(Assign {
                line: line.raw.clone(),
            }) as Box<dyn ExecutableCommand>
        })
    }
}
