//! The `log` built-in's record of executed commands.

use crate::command::Outcome;
use chrono::{DateTime, Local};
use std::io::{self, Write};

/// `ctime(3)`-style rendering, e.g. `Sun Oct 18 09:05:01 2026`.
const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// One executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub command: String,
    pub timestamp: DateTime<Local>,
    pub outcome: Outcome,
}

/// Append-only, bounded list of executed commands.
///
/// Once full, new commands are silently not recorded; old entries are never
/// replaced.
#[derive(Debug, Clone)]
pub struct History {
    records: Vec<HistoryRecord>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    /// Record a command with the current local time.
    ///
    /// Returns `false` when the log is full and the record was dropped.
    pub fn append(&mut self, command: impl Into<String>, outcome: Outcome) -> bool {
        self.append_at(command, outcome, Local::now())
    }

    pub fn append_at(
        &mut self,
        command: impl Into<String>,
        outcome: Outcome,
        timestamp: DateTime<Local>,
    ) -> bool {
        if self.records.len() >= self.capacity {
            log::debug!("history full ({} records), dropping entry", self.capacity);
            return false;
        }
        self.records.push(HistoryRecord {
            command: command.into(),
            timestamp,
            outcome,
        });
        true
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write every record, oldest first, as a timestamp line followed by
    /// ` <command> <code>`.
    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for record in &self.records {
            writeln!(out, "{}", record.timestamp.format(TIMESTAMP_FORMAT))?;
            writeln!(out, " {} {}", record.command, record.outcome)?;
        }
        Ok(())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(crate::env::MAX_HISTORY)
    }
}
