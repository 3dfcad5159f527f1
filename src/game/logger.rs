//! Centralized battle logger
//!
//! Uses a bump allocator for temporary line formatting and owned Strings in
//! captured entries. Output can go to stdout, an in-memory buffer for
//! tests, or both, as text or JSON lines.

use crate::game::VerbosityLevel;
use bumpalo::Bump;
use std::cell::{Ref, RefCell};
use std::fmt::Write as FmtWrite;
use std::ops::Deref;

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry with owned strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Verbosity level of this entry
    pub level: VerbosityLevel,
    /// Log message
    pub message: String,
    /// Optional category (e.g. "event", "engine")
    pub category: Option<String>,
}

/// Guard type providing read-only, slice-like access to captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Battle logger with interior mutability so the engine can log while the
/// state is borrowed
pub struct BattleLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,

    /// Bump allocator for temporary line formatting, reset after each line
    format_bump: RefCell<Bump>,

    /// Captured log entries (owned strings)
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl BattleLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        BattleLogger {
            verbosity: VerbosityLevel::default(),
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Create a logger with specified verbosity
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        let mut logger = Self::new();
        logger.verbosity = verbosity;
        logger
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Set output mode (Stdout, Memory, or Both)
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    /// Capture to the in-memory buffer only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    /// Read-only access to captured entries
    pub fn entries(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    /// Drop all captured entries
    pub fn clear(&self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Log a message at the given level with an optional category
    pub fn log(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        if level > self.verbosity || self.verbosity == VerbosityLevel::Silent {
            return;
        }

        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            let line = {
                let bump = self.format_bump.borrow();
                let mut line = bumpalo::collections::String::new_in(&bump);
                match self.output_format {
                    OutputFormat::Text => match category {
                        Some(category) => {
                            let _ = write!(line, "[{category}] {message}");
                        }
                        None => {
                            let _ = write!(line, "{message}");
                        }
                    },
                    OutputFormat::Json => {
                        let _ = write!(
                            line,
                            "{}",
                            serde_json::json!({
                                "level": level,
                                "category": category,
                                "message": message,
                            })
                        );
                    }
                }
                line.to_string()
            };
            println!("{line}");
            self.format_bump.borrow_mut().reset();
        }

        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category: category.map(|c| c.to_string()),
            });
        }
    }

    /// Log at Minimal level (game outcome class messages)
    pub fn log_minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, None, message);
    }

    /// Log at Normal level
    pub fn log_normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, None, message);
    }

    /// Log at Verbose level
    pub fn log_verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, None, message);
    }

    /// Log a processed event under the "event" category
    pub fn log_event(&self, name: &str) {
        self.log(VerbosityLevel::Normal, Some("event"), name);
    }
}

impl Default for BattleLogger {
    fn default() -> Self {
        Self::new()
    }
}

// The bump arena is scratch space; a clone starts with a fresh one.
impl Clone for BattleLogger {
    fn clone(&self) -> Self {
        BattleLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(self.log_buffer.borrow().clone()),
        }
    }
}

impl std::fmt::Debug for BattleLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleLogger")
            .field("verbosity", &self.verbosity)
            .field("output_format", &self.output_format)
            .field("output_mode", &self.output_mode)
            .field("captured", &self.log_buffer.borrow().len())
            .finish()
    }
}
