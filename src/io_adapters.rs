use crate::lexer::strip_line_terminator;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// Where the interactive loop gets its next line from.
pub trait LineSource {
    /// Show `prompt` and read one line, without its terminator.
    ///
    /// Returns `None` at end of input.
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> anyhow::Result<Option<String>>;
}

/// Line editor for a terminal, with in-memory line history.
pub struct Readline {
    editor: DefaultEditor,
}

impl Readline {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Readline {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> anyhow::Result<Option<String>> {
        // Anything still buffered must reach the terminal before the editor
        // takes it over.
        out.flush()?;
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                log::debug!("interrupted at prompt");
                Ok(None)
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads lines from any buffered reader, writing the prompt to the output.
///
/// Used when standard input is not a terminal, and in tests.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> anyhow::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;

        // Raw bytes, so a line that is not valid UTF-8 still reaches the
        // interpreter instead of ending the session.
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(strip_line_terminator(&line).to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reader_source_yields_lines_then_none() {
        let mut source = ReaderSource::new(Cursor::new("first\r\nsecond\n\nlast"));
        let mut out = Vec::new();

        let mut lines = Vec::new();
        while let Some(line) = source.read_line("> ", &mut out).unwrap() {
            lines.push(line);
        }

        assert_eq!(lines, vec!["first", "second", "", "last"]);
        assert_eq!(String::from_utf8(out).unwrap(), "> > > > > ");
    }

    #[test]
    fn reader_source_replaces_invalid_utf8() {
        let mut source = ReaderSource::new(Cursor::new(b"caf\xE9\nnext\n".to_vec()));
        let mut out = Vec::new();

        assert_eq!(
            source.read_line("", &mut out).unwrap().as_deref(),
            Some("caf\u{FFFD}")
        );
        assert_eq!(source.read_line("", &mut out).unwrap().as_deref(), Some("next"));
        assert_eq!(source.read_line("", &mut out).unwrap(), None);
    }
}
