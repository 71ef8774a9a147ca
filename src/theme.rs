//! Output color state and the interactive prompt.

use std::fmt;

/// Resets the terminal to its default colors.
pub const RESET: &str = "\x1b[0m";

/// Literal prompt text shown before each interactive line.
pub const PROMPT: &str = "cshell$ ";

/// Color applied to the interpreter's output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// No theme selected; the terminal default is used.
    #[default]
    Plain,
    Red,
    Blue,
    Green,
}

impl Theme {
    /// Look up a theme by the name accepted by the `theme` built-in.
    pub fn from_name(name: &str) -> Option<Theme> {
        match name {
            "red" => Some(Theme::Red),
            "blue" => Some(Theme::Blue),
            "green" => Some(Theme::Green),
            _ => None,
        }
    }

    /// ANSI escape sequence that switches the terminal to this color.
    pub fn ansi(self) -> &'static str {
        match self {
            Theme::Plain => "",
            Theme::Red => "\x1b[0;31m",
            Theme::Blue => "\x1b[0;34m",
            Theme::Green => "\x1b[0;32m",
        }
    }

    /// Numeric code recorded in the history log when this theme is chosen.
    pub fn code(self) -> i32 {
        match self {
            Theme::Plain => 0,
            Theme::Red => 1,
            Theme::Blue => 2,
            Theme::Green => 3,
        }
    }

    /// Prompt drawn in the theme color, followed by a reset so the text the
    /// user types stays uncolored.
    pub fn prompt(self) -> String {
        format!("{}{PROMPT}{RESET}", self.ansi())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Theme::Plain => "plain",
            Theme::Red => "red",
            Theme::Blue => "blue",
            Theme::Green => "green",
        };
        f.write_str(name)
    }
}
