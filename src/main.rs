use argh::FromArgs;
use cshell::io_adapters::{LineSource, ReaderSource, Readline};
use cshell::{Interpreter, Script};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(FromArgs)]
/// A line-oriented command interpreter. Without a script, commands are read
/// from standard input.
struct Args {
    #[argh(positional)]
    /// script to run; its last line is always executed as `log`.
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    cshell::logger::init();
    let args: Args = argh::from_env();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match &args.script {
        Some(path) => match Script::load(path) {
            Ok(script) => Interpreter::default().run_script(&script, &mut out),
            Err(err) => {
                let _ = writeln!(out, "{err}");
                return ExitCode::FAILURE;
            }
        },
        None => interactive(&mut out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cshell: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn interactive(out: &mut dyn Write) -> anyhow::Result<()> {
    let mut source: Box<dyn LineSource> = if io::stdin().is_terminal() {
        Box::new(Readline::new()?)
    } else {
        Box::new(ReaderSource::new(io::stdin().lock()))
    };
    Interpreter::default().repl(source.as_mut(), out)
}
