// SPDX-License-Identifier: AGPL-3.0-or-later
//! Diagnostic sinks for reported failures

use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default log location, relative to the process working directory
pub const DEFAULT_LOG_FILE: &str = "resources/log.txt";

/// Append-only destination for failure messages
pub trait DiagnosticSink {
    fn record(&mut self, at: DateTime<Local>, message: &str);

    fn record_now(&mut self, message: &str) {
        self.record(Local::now(), message);
    }
}

/// Appends `<timestamp> - <message>` lines to a file
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file and its parent directory are created on the first record.
    fn append(&self, line: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

pub fn format_line(at: DateTime<Local>, message: &str) -> String {
    format!("{} - {}\n", at.format("%Y-%m-%dT%H:%M:%S%.f"), message)
}

impl DiagnosticSink for FileSink {
    fn record(&mut self, at: DateTime<Local>, message: &str) {
        if let Err(e) = self.append(&format_line(at, message)) {
            eprintln!("Could not write to log file: {e}");
        }
    }
}

/// Keeps records in memory
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Vec<(DateTime<Local>, String)>,
}

#[cfg(test)]
impl MemorySink {
    pub fn entries(&self) -> &[(DateTime<Local>, String)] {
        &self.entries
    }
}

#[cfg(test)]
impl DiagnosticSink for MemorySink {
    fn record(&mut self, at: DateTime<Local>, message: &str) {
        self.entries.push((at, message.to_string()));
    }
}
