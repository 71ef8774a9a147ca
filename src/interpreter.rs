use crate::command::{CommandFactory, Outcome};
use crate::env::{Environment, Limits};
use crate::error::ShellError;
use crate::io_adapters::LineSource;
use crate::lexer;
use crate::script::Script;
use crate::theme::RESET;
use anyhow::Context;
use std::io::Write;
use std::ops::ControlFlow;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only support commands defined in this crate: builtins, assignment and
/// ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A line-oriented command interpreter.
///
/// The interpreter owns an [`Environment`] and an ordered list of
/// [`CommandFactory`] objects. Each input line is offered to the factories in
/// turn and the first one that recognizes it builds the command. See
/// [`Default`] for the factories included out of the box.
///
/// Example
/// ```
/// use cshell::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// sh.execute_line("$X=5", &mut out).unwrap();
/// sh.execute_line("print $X", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "5 \n");
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self::with_environment(Environment::new(), commands)
    }

    pub fn with_environment(env: Environment, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { env, commands }
    }

    /// Default commands with custom capacity limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self::with_environment(Environment::with_limits(limits), default_commands())
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Tokenize, dispatch and record one input line.
    ///
    /// Errors raised by the command are reported on `stdout` and recorded as
    /// a failure. Only a failure to write to `stdout` itself is returned.
    /// `ControlFlow::Break` means the session should end.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ControlFlow<()>> {
        let Some(line) = lexer::split_into_tokens(line) else {
            writeln!(stdout, "{}", ShellError::ParseError)?;
            return Ok(ControlFlow::Continue(()));
        };

        let command = self
            .commands
            .iter()
            .find_map(|factory| factory.try_create(&self.env, &line));

        let result = match command {
            Some(command) => command.execute(stdout, &mut self.env),
            None => Err(ShellError::CommandNotFound(line.name.clone())),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) if err.is_fatal() => {
                return Err(err).context(format!("{}: output stream failed", line.name));
            }
            Err(err) => {
                log::debug!("{}: {err}", line.name);
                if err.is_reported() {
                    writeln!(stdout, "{err}")?;
                }
                Outcome::Failure
            }
        };

        if self.env.should_exit {
            return Ok(ControlFlow::Break(()));
        }

        let text = if outcome.is_failure() {
            line.raw
        } else {
            line.name
        };
        self.env.history.append(text, outcome);
        Ok(ControlFlow::Continue(()))
    }

    /// Execute a script to completion (or until `exit`).
    ///
    /// The script's last line always runs as `log`, so every script ends by
    /// printing its own history.
    pub fn run_script(&mut self, script: &Script, stdout: &mut dyn Write) -> anyhow::Result<()> {
        log::info!("running script with {} lines", script.len());
        for line in script.lines() {
            if self.execute_line(line, stdout)?.is_break() {
                break;
            }
        }
        writeln!(stdout, "Bye!")?;
        write!(stdout, "{RESET}")?;
        stdout.flush()?;
        Ok(())
    }

    /// Read-Eval-Print Loop.
    ///
    /// The prompt is drawn in the current theme color and the color is reset
    /// while the user types; after each line is read the theme color is put
    /// back so that command output is colored.
    pub fn repl(&mut self, source: &mut dyn LineSource, stdout: &mut dyn Write) -> anyhow::Result<()> {
        log::info!("starting interactive session");
        loop {
            stdout.flush()?;
            let Some(line) = source.read_line(&self.env.theme.prompt(), stdout)? else {
                writeln!(stdout)?;
                break;
            };
            write!(stdout, "{}", self.env.theme.ansi())?;

            if self.execute_line(&line, stdout)?.is_break() {
                writeln!(stdout, "Bye!")?;
                break;
            }
        }
        write!(stdout, "{RESET}")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Built-ins in dispatch order, then the external command launcher.
fn default_commands() -> Vec<Box<dyn CommandFactory>> {
    use crate::builtin::*;
    use crate::external::ExternalCommand;
    vec![
        Box::new(Factory::<Exit>::default()),
        Box::new(Factory::<Print>::default()),
        Box::new(Factory::<Log>::default()),
        Box::new(Factory::<Theme>::default()),
        Box::new(Factory::<Assign>::default()),
        Box::new(Factory::<ExternalCommand>::default()),
    ]
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - built-ins: `exit`, `print`, `log`, `theme`, `$NAME=VALUE`
    /// - external command launcher
    fn default() -> Self {
        Self::new(default_commands())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_adapters::ReaderSource;
    use crate::theme::Theme;
    use std::io::Cursor;

    fn run_lines(sh: &mut Interpreter, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            sh.execute_line(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    fn recorded(sh: &Interpreter) -> Vec<(String, i32)> {
        sh.env()
            .history
            .records()
            .iter()
            .map(|r| (r.command.clone(), r.outcome.code()))
            .collect()
    }

    #[test]
    fn assignment_then_print() {
        let mut sh = Interpreter::default();
        let out = run_lines(&mut sh, &["$X=5", "print $X"]);
        assert_eq!(out, "5 \n");
        assert_eq!(sh.env().vars.get("X"), Some("5"));
    }

    #[test]
    fn print_undefined_reports_one_line() {
        let mut sh = Interpreter::default();
        let out = run_lines(&mut sh, &["print $UNDEF"]);
        assert_eq!(out, "Error: No Environment Variable $UNDEF found.\n");
        assert_eq!(recorded(&sh), vec![("print $UNDEF".to_string(), -1)]);
    }

    #[test]
    fn blank_lines_are_rejected_and_not_recorded() {
        let mut sh = Interpreter::default();
        let out = run_lines(&mut sh, &["", "   \n"]);
        assert_eq!(
            out,
            "Error: Please enter a character.\nError: Please enter a character.\n"
        );
        assert!(sh.env().history.is_empty());
    }

    #[test]
    fn history_records_name_on_success_and_line_on_failure() {
        let mut sh = Interpreter::default();
        run_lines(
            &mut sh,
            &["print a b", "$bad-name=1", "theme green", "theme purple", "log"],
        );
        assert_eq!(
            recorded(&sh),
            vec![
                ("print".to_string(), 0),
                ("$bad-name=1".to_string(), -1),
                ("theme".to_string(), 3),
                ("theme purple".to_string(), -1),
                ("log".to_string(), 0),
            ]
        );
        assert_eq!(sh.env().theme, Theme::Green);
    }

    #[test]
    fn exit_stops_without_recording() {
        let mut sh = Interpreter::default();
        let mut out = Vec::new();
        let flow = sh.execute_line("exit", &mut out).unwrap();
        assert!(flow.is_break());
        assert!(sh.env().history.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn external_commands_see_substituted_arguments() {
        let mut sh = Interpreter::default();
        let out = run_lines(&mut sh, &["$WHO=world", "echo hello $WHO $NOBODY"]);
        assert_eq!(out, "hello world $NOBODY\n");
        assert_eq!(
            recorded(&sh),
            vec![("$WHO=world".to_string(), 0), ("echo".to_string(), 0)]
        );
    }

    #[test]
    #[cfg(unix)]
    fn failing_external_command_is_recorded_silently() {
        let mut sh = Interpreter::default();
        let out = run_lines(&mut sh, &["false"]);
        assert!(out.is_empty());
        assert_eq!(recorded(&sh), vec![("false".to_string(), -1)]);
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut sh = Interpreter::default();
        let out = run_lines(&mut sh, &["no-such-command-cshell --flag"]);
        assert_eq!(out, "Missing keyword or command, or permission problem\n");
        assert_eq!(
            recorded(&sh),
            vec![("no-such-command-cshell --flag".to_string(), -1)]
        );
    }

    #[test]
    fn history_stops_at_capacity() {
        let mut sh = Interpreter::default();
        let out = run_lines(&mut sh, &["print x"; 257]);

        assert_eq!(out.matches("x \n").count(), 257);
        assert_eq!(sh.env().history.len(), 256);
    }

    #[test]
    fn variable_capacity_is_reported() {
        let mut sh = Interpreter::with_limits(Limits {
            variables: 1,
            history: 256,
        });
        let out = run_lines(&mut sh, &["$A=1", "$B=2", "$A=3"]);

        assert_eq!(out, "No space remaining for new variables.\n");
        assert_eq!(sh.env().vars.get("A"), Some("3"));
        assert_eq!(
            recorded(&sh),
            vec![
                ("$A=1".to_string(), 0),
                ("$B=2".to_string(), -1),
                ("$A=3".to_string(), 0),
            ]
        );
    }

    #[test]
    fn empty_factory_list_reports_unknown_command() {
        let mut sh = Interpreter::new(Vec::new());
        let out = run_lines(&mut sh, &["print x"]);
        assert_eq!(out, "Missing keyword or command, or permission problem\n");
    }

    #[test]
    fn repl_prompts_and_colors_output() {
        let mut sh = Interpreter::default();
        let mut source = ReaderSource::new(Cursor::new("theme red\ntheme purple\nprint hi\nexit\n"));
        let mut out = Vec::new();
        sh.repl(&mut source, &mut out).unwrap();

        let red = Theme::Red.ansi();
        let expected = format!(
            "cshell$ {RESET}{red}\
             {red}cshell$ {RESET}{red}unsupported theme\n\
             {red}cshell$ {RESET}{red}hi \n\
             {red}cshell$ {RESET}{red}Bye!\n{RESET}"
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn repl_ends_at_end_of_input() {
        let mut sh = Interpreter::default();
        let mut source = ReaderSource::new(Cursor::new("print a"));
        let mut out = Vec::new();
        sh.repl(&mut source, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("cshell$ {RESET}a \ncshell$ {RESET}\n{RESET}")
        );
        assert_eq!(sh.env().history.len(), 1);
    }

    #[test]
    fn script_last_line_runs_as_log() {
        let mut sh = Interpreter::default();
        let script = Script::parse("print one\n$X=2\necho hi\n");
        let mut out = Vec::new();
        sh.run_script(&script, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("one \n"), "{out:?}");
        assert!(out.contains("\n print 0\n"));
        assert!(out.contains("\n $X=2 0\n"));
        assert!(!out.contains("hi\n"));
        assert!(out.ends_with(&format!("Bye!\n{RESET}")));
        assert_eq!(recorded(&sh).len(), 3);
    }

    #[test]
    fn script_exit_stops_early() {
        let mut sh = Interpreter::default();
        let script = Script::parse("print before\nexit\nprint after\nlog\n");
        let mut out = Vec::new();
        sh.run_script(&script, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("before \nBye!\n{RESET}")
        );
    }
}
