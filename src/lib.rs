//! A small line-oriented command interpreter.
//!
//! Lines are read interactively or from a script file, split on whitespace,
//! and dispatched either to one of a few built-ins (`exit`, `print`, `log`,
//! `theme`, `$NAME=VALUE`) or to an external program whose standard output
//! is relayed as it is produced. Every dispatched line is recorded in a
//! bounded history that the `log` built-in prints.
//!
//! The main entry point is [`Interpreter`]. The public modules expose the
//! session state ([`env`]), the command traits ([`command`]) and the line
//! sources used by the interactive loop ([`io_adapters`]).

mod builtin;
pub mod command;
pub mod env;
pub mod error;
mod external;
pub mod history;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod logger;
pub mod parser;
pub mod script;
pub mod theme;

/// Just a convenient re-export of the command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;

pub use command::Outcome;
pub use error::ShellError;
pub use external::find_command_path;
pub use script::Script;
