use crate::error::ShellError;
use crate::history::History;
use crate::theme::Theme;
use std::collections::HashMap;

/// Default number of shell variables a session can hold.
pub const MAX_VARIABLES: usize = 256;

/// Default number of commands kept in the history log.
pub const MAX_HISTORY: usize = 256;

/// Capacity limits of a session's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub variables: usize,
    pub history: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            variables: MAX_VARIABLES,
            history: MAX_HISTORY,
        }
    }
}

/// Shell variables set with `$NAME=VALUE`.
///
/// Names are stored without the `$` sigil. The store never grows beyond its
/// capacity; updating an existing variable is always allowed.
#[derive(Debug, Clone)]
pub struct VariableStore {
    vars: HashMap<String, String>,
    capacity: usize,
}

impl VariableStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vars: HashMap::new(),
            capacity,
        }
    }

    /// Create or overwrite a variable.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ShellError> {
        let name = name.into();
        if let Some(slot) = self.vars.get_mut(&name) {
            *slot = value.into();
            return Ok(());
        }
        if self.vars.len() >= self.capacity {
            log::warn!("variable store full, rejecting ${name}");
            return Err(ShellError::CapacityExceeded);
        }
        self.vars.insert(name, value.into());
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Resolve a `$name` reference. Tokens without the sigil never resolve.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        token.strip_prefix('$').and_then(|name| self.get(name))
    }

    /// Replace every `$name` argument whose variable exists with its value.
    ///
    /// Unknown references are left as they are.
    pub fn substitute(&self, args: &mut [String]) {
        for arg in args.iter_mut() {
            if let Some(value) = self.resolve(arg) {
                *arg = value.to_owned();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Default for VariableStore {
    fn default() -> Self {
        Self::with_capacity(MAX_VARIABLES)
    }
}

/// Mutable state of one interpreter session.
///
/// The environment contains:
/// - `vars`: shell variables created by assignments.
/// - `history`: the record of every dispatched command.
/// - `theme`: the color currently applied to output.
/// - `should_exit`: set by `exit` so the session loop knows when to stop.
#[derive(Debug, Clone)]
pub struct Environment {
    pub vars: VariableStore,
    pub history: History,
    pub theme: Theme,
    pub should_exit: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            vars: VariableStore::with_capacity(limits.variables),
            history: History::with_capacity(limits.history),
            theme: Theme::default(),
            should_exit: false,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
