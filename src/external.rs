use crate::command::{CommandFactory, ExecutableCommand, Outcome};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::lexer::CommandLine;
use std::ffi::{OsStr, OsString};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Size of each chunk relayed from the child's output pipe.
const RELAY_CHUNK: usize = 1024;

/// Search path used when `PATH` is not set, as `execvp` does.
const DEFAULT_PATH: &str = "/bin:/usr/bin";

/// Command that is not a builtin.
///
/// The child's standard output is captured through a pipe and relayed to the
/// interpreter's output as it arrives; stdin and stderr are inherited.
pub struct ExternalCommand {
    name: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    fn command(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(&self.args).stdout(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&self.name);
        }
        cmd
    }

    fn spawn_error(&self, err: io::Error) -> ShellError {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                ShellError::CommandNotFound(self.name.clone())
            }
            _ => ShellError::ExternalSpawnFailure {
                command: self.name.clone(),
                source: err,
            },
        }
    }

    fn outcome(&self, status: ExitStatus) -> Result<Outcome, ShellError> {
        match status.code() {
            Some(0) => Ok(Outcome::Success),
            Some(code) => Err(ShellError::ExternalNonZeroExit {
                command: self.name.clone(),
                code,
            }),
            None => Err(ShellError::ExternalAbnormalTermination {
                command: self.name.clone(),
                signal: terminated_by_signal(status),
            }),
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn try_create(
        &self,
        env: &Environment,
        line: &CommandLine,
    ) -> Option<Box<dyn ExecutableCommand>> {
        let mut args = line.args.clone();
        env.vars.substitute(&mut args);
        Some(Box::new(ExternalCommand::new(line.name.clone(), args)))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<Outcome, ShellError> {
        let dirs = search_paths(std::env::var_os("PATH"));
        let program = find_command_path(&dirs, Path::new(&self.name))
            .ok_or_else(|| ShellError::CommandNotFound(self.name.clone()))?;

        log::debug!("spawning {} as {}", self.name, program.display());
        let mut child = self
            .command(&program)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Relay first, but always reap the child before reporting a relay error.
        let relayed = match child.stdout.take() {
            Some(mut pipe) => relay(&mut pipe, stdout),
            None => Ok(0),
        };
        let status = child.wait()?;
        let bytes = relayed?;

        log::debug!("{} exited with {status} after {bytes} bytes", self.name);
        self.outcome(status)
    }
}

fn search_paths(path_var: Option<OsString>) -> OsString {
    path_var.unwrap_or_else(|| OsString::from(DEFAULT_PATH))
}

/// Copy everything from `pipe` to `out` until end of stream, flushing after
/// every chunk so a long-running child shows its output incrementally.
fn relay(pipe: &mut dyn Read, out: &mut dyn Write) -> io::Result<usize> {
    let mut buf = [0u8; RELAY_CHUNK];
    let mut total = 0;
    loop {
        let n = match pipe.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        out.write_all(&buf[..n])?;
        out.flush()?;
        total += n;
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    exit_status.signal().unwrap_or(-1)
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command name to an executable file.
///
/// Behavior:
/// - Name containing a path separator (`/bin/ls`, `./run`, `bin/tool`): used
///   as a path, relative to the current directory when not absolute.
/// - Bare name: each directory of `search_paths` (PATH) is tried in order.
/// - Empty name: `None`.
///
/// A candidate only matches if it is a regular file the current user could
/// execute.
pub fn find_command_path(search_paths: &OsStr, name: &Path) -> Option<PathBuf> {
    if name.as_os_str().is_empty() {
        return None;
    }

    if name.components().count() > 1 || name.is_absolute() {
        return is_executable(name).then(|| name.to_path_buf());
    }

    std::env::split_paths(search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
