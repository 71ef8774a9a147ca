//! Parsing of `$NAME=VALUE` variable assignments.

use crate::error::ShellError;
use regex::Regex;
use std::sync::LazyLock;

static NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]*$").expect("valid variable name pattern"));

/// A validated assignment, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: String,
}

/// Parse an assignment line such as `$GREETING=hello`.
///
/// Leading whitespace is ignored. The value ends at the first whitespace
/// character. Checks run in a fixed order so that a line with several
/// problems always reports the same one: name characters, spacing around
/// `=`, empty name, then missing value.
pub fn parse_assignment(line: &str) -> Result<Assignment, ShellError> {
    let body = line.trim_start();
    let body = body.strip_prefix('$').unwrap_or(body);

    let (name, rest) = match body.split_once('=') {
        Some((name, rest)) => (name, Some(rest)),
        None => (body, None),
    };

    if !NAME_CHARS.is_match(name) {
        return Err(ShellError::InvalidVariableName);
    }

    let space_before = name.ends_with(char::is_whitespace);
    let space_after = rest.is_some_and(|rest| rest.starts_with(char::is_whitespace));
    if space_before || space_after {
        return Err(ShellError::SpacingError);
    }

    if name.is_empty() {
        return Err(ShellError::EmptyName);
    }

    let value = rest
        .and_then(|rest| rest.split_whitespace().next())
        .ok_or(ShellError::MissingValue)?;

    Ok(Assignment {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}
