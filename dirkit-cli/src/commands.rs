// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use console::style;
use dirkit_core::{DirectoryService, DirkitResult, Search};
use std::io::{self, Write};

use crate::sink::DiagnosticSink;

/// One user intent with its arguments, independent of how it was entered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Copy { source: String, target: String },
    Move { source: String, target: String },
    Delete { name: String },
    CreateDirectory { name: String },
    DeleteDirectory { name: String },
    Search { pattern: String },
}

/// What a successful request produced
pub enum Output {
    Lines(Vec<String>),
    Matches(Search),
    Done(&'static str),
}

impl Output {
    /// Search hits are written as the walk produces them.
    pub fn write_to(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Output::Lines(lines) => {
                for line in lines {
                    writeln!(out, "{line}")?;
                }
            }
            Output::Matches(hits) => {
                for hit in hits {
                    writeln!(out, "{hit}")?;
                }
            }
            Output::Done(message) => writeln!(out, "{message}")?,
        }
        Ok(())
    }
}

/// Run a request against the service
pub fn perform(service: &DirectoryService, request: &Request) -> DirkitResult<Output> {
    match request {
        Request::List => service.list().map(Output::Lines),
        Request::Copy { source, target } => {
            service.copy(source, target)?;
            Ok(Output::Done("File copied successfully."))
        }
        Request::Move { source, target } => {
            service.move_entry(source, target)?;
            Ok(Output::Done("File moved successfully."))
        }
        Request::Delete { name } => {
            service.delete(name)?;
            Ok(Output::Done("File deleted successfully."))
        }
        Request::CreateDirectory { name } => {
            service.create_directory(name)?;
            Ok(Output::Done("Directory created successfully."))
        }
        Request::DeleteDirectory { name } => {
            service.delete_directory(name)?;
            Ok(Output::Done("Directory deleted successfully."))
        }
        Request::Search { pattern } => service.search(pattern).map(Output::Matches),
    }
}

/// Run a single request from the command line.
///
/// Returns whether the request succeeded; failures are reported on `err` and
/// recorded in the sink.
pub fn run_once(
    service: &DirectoryService,
    request: &Request,
    out: &mut impl Write,
    err: &mut impl Write,
    sink: &mut impl DiagnosticSink,
) -> io::Result<bool> {
    match perform(service, request) {
        Ok(output) => {
            output.write_to(out)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(err, "{} {e}", style("Error:").red().for_stderr())?;
            sink.record_now(&e.to_string());
            Ok(false)
        }
    }
}
