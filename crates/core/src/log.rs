// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action log: the globally numbered record of what every agent did
//!
//! Each emission takes the log lock, bumps the sequence, writes one line and
//! flushes before releasing. Lines look like:
//!
//! ```text
//! 1: santa: started
//! 2: elf: 1: started
//! 9: santa: checked state: 3: 3
//! ```

use crate::agent::AgentId;
use crate::error::ResourceError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Something an agent did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Started,
    NeededHelp,
    AskedForHelp,
    GotHelp,
    GotVacation,
    CheckedState { active: u32, waiting: u32 },
    CanHelp,
    Finished,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Started => write!(f, "started"),
            Action::NeededHelp => write!(f, "needed help"),
            Action::AskedForHelp => write!(f, "asked for help"),
            Action::GotHelp => write!(f, "got help"),
            Action::GotVacation => write!(f, "got a vacation"),
            Action::CheckedState { active, waiting } => {
                write!(f, "checked state: {}: {}", active, waiting)
            }
            Action::CanHelp => write!(f, "can help"),
            Action::Finished => write!(f, "finished"),
        }
    }
}

/// Malformed action log content
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed log line {line}: {text:?}")]
pub struct LogParseError {
    pub line: usize,
    pub text: String,
}

/// One parsed action log line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub sequence: u64,
    pub agent: AgentId,
    pub action: Action,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.agent {
            AgentId::Santa => write!(f, "{}: santa: {}", self.sequence, self.action),
            AgentId::Elf(id) => write!(f, "{}: elf: {}: {}", self.sequence, id, self.action),
        }
    }
}

impl FromStr for LogRecord {
    type Err = LogParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse_record(line).ok_or_else(|| LogParseError {
            line: 1,
            text: line.to_string(),
        })
    }
}

fn parse_record(line: &str) -> Option<LogRecord> {
    let parts: Vec<&str> = line.trim_end().split(": ").collect();
    let sequence = parts.first()?.parse().ok()?;

    let (agent, rest) = match parts.get(1) {
        Some(&"santa") => (AgentId::Santa, parts.get(2..)?),
        Some(&"elf") => (AgentId::Elf(parts.get(2)?.parse().ok()?), parts.get(3..)?),
        _ => return None,
    };

    let action = match rest {
        ["started"] => Action::Started,
        ["needed help"] => Action::NeededHelp,
        ["asked for help"] => Action::AskedForHelp,
        ["got help"] => Action::GotHelp,
        ["got a vacation"] => Action::GotVacation,
        ["can help"] => Action::CanHelp,
        ["finished"] => Action::Finished,
        ["checked state", active, waiting] => Action::CheckedState {
            active: active.parse().ok()?,
            waiting: waiting.parse().ok()?,
        },
        _ => return None,
    };

    Some(LogRecord {
        sequence,
        agent,
        action,
    })
}

/// Parse a whole action log, skipping blank lines
pub fn parse_log(text: &str) -> Result<Vec<LogRecord>, LogParseError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_record(line).ok_or_else(|| LogParseError {
                line: i + 1,
                text: line.to_string(),
            })
        })
        .collect()
}

struct LogSink {
    sequence: u64,
    writer: Box<dyn Write + Send>,
}

/// Globally numbered action log behind the log lock
pub struct ActionLog {
    sink: Mutex<LogSink>,
}

impl ActionLog {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(LogSink {
                sequence: 0,
                writer: Box::new(writer),
            }),
        }
    }

    /// Open a log file, truncating it unless `append` is set
    pub fn create(path: &Path, append: bool) -> Result<Self, ResourceError> {
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }

        let file = options.open(path).map_err(|source| ResourceError::LogOpen {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), append, "action log opened");
        Ok(Self::new(file))
    }

    /// Write one numbered line; returns its sequence number
    pub fn emit(&self, agent: AgentId, action: Action) -> io::Result<u64> {
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let record = LogRecord {
            sequence: sink.sequence + 1,
            agent,
            action,
        };
        writeln!(sink.writer, "{}", record)?;
        sink.writer.flush()?;
        // Only lines that reached the writer consume a number
        sink.sequence = record.sequence;
        Ok(record.sequence)
    }

    /// Lines emitted so far
    pub fn sequence(&self) -> u64 {
        self.sink.lock().unwrap_or_else(|e| e.into_inner()).sequence
    }

    pub fn flush(&self) -> io::Result<()> {
        self.sink
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .writer
            .flush()
    }
}

impl fmt::Debug for ActionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionLog")
            .field("sequence", &self.sequence())
            .finish()
    }
}

/// In-memory log sink; clones share the buffer
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
