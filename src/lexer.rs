//! Splitting raw input lines into a command name and its arguments.
//!
//! Tokens are separated by whitespace only. There is no quoting or escaping:
//! `print "a b"` yields the two arguments `"a` and `b"`.

/// One input line broken into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// The line as typed, without its line terminator.
    pub raw: String,
    /// First word of the line.
    pub name: String,
    /// Remaining words, in order.
    pub args: Vec<String>,
}

impl CommandLine {
    /// True when the line is a `$NAME=VALUE` assignment rather than a command.
    pub fn is_assignment(&self) -> bool {
        self.raw.trim_start().starts_with('$')
    }
}

/// Strip a trailing `\n` or `\r\n` from a line read from a stream.
pub fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Tokenize a raw input line.
///
/// Returns `None` for a line that contains nothing but whitespace; callers
/// reject such input before dispatch.
pub fn split_into_tokens(line: &str) -> Option<CommandLine> {
    let raw = strip_line_terminator(line);
    let mut words = raw.split_whitespace().map(str::to_owned);
    let name = words.next()?;
    Some(CommandLine {
        raw: raw.to_owned(),
        name,
        args: words.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_and_arguments() {
        let line = split_into_tokens("ls -l  /tmp\n").unwrap();
        assert_eq!(line.name, "ls");
        assert_eq!(line.args, vec!["-l", "/tmp"]);
        assert_eq!(line.raw, "ls -l  /tmp");
    }

    #[test]
    fn command_without_arguments() {
        let line = split_into_tokens("log").unwrap();
        assert_eq!(line.name, "log");
        assert!(line.args.is_empty());
    }

    #[test]
    fn blank_lines_yield_nothing() {
        assert_eq!(split_into_tokens(""), None);
        assert_eq!(split_into_tokens("   \t \n"), None);
        assert_eq!(split_into_tokens("\r\n"), None);
    }

    #[test]
    fn no_quoting_rules() {
        let line = split_into_tokens("print \"a b\"").unwrap();
        assert_eq!(line.args, vec!["\"a", "b\""]);
    }

    #[test]
    fn assignment_detection_skips_leading_whitespace() {
        assert!(split_into_tokens("$X=1").unwrap().is_assignment());
        assert!(split_into_tokens("   $X=1").unwrap().is_assignment());
        assert!(!split_into_tokens("echo $X").unwrap().is_assignment());
    }

    #[test]
    fn carriage_returns_are_dropped() {
        let line = split_into_tokens("echo hi\r\n").unwrap();
        assert_eq!(line.raw, "echo hi");
        assert_eq!(line.args, vec!["hi"]);
    }
}
