// SPDX-License-Identifier: AGPL-3.0-or-later
//! Interactive menu loop

use console::style;
use dirkit_core::DirectoryService;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::commands::{perform, Request};
use crate::sink::DiagnosticSink;

const MENU: &str = "\
File Manager
1. Display Directory Contents
2. Copy File
3. Move File
4. Delete File
5. Create Directory
6. Delete Directory
7. Search Files
8. Exit
";

/// A parsed menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    List,
    Copy,
    Move,
    Delete,
    CreateDirectory,
    DeleteDirectory,
    Search,
    Exit,
}

impl Choice {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Choice::List),
            "2" => Some(Choice::Copy),
            "3" => Some(Choice::Move),
            "4" => Some(Choice::Delete),
            "5" => Some(Choice::CreateDirectory),
            "6" => Some(Choice::DeleteDirectory),
            "7" => Some(Choice::Search),
            "8" => Some(Choice::Exit),
            _ => None,
        }
    }
}

/// Reads menu choices from `input` until exit or end of input
pub struct Shell<R, W, E, S> {
    service: DirectoryService,
    input: R,
    out: W,
    err: E,
    sink: S,
}

impl<R, W, E, S> Shell<R, W, E, S>
where
    R: BufRead,
    W: Write,
    E: Write,
    S: DiagnosticSink,
{
    pub fn new(service: DirectoryService, input: R, out: W, err: E, sink: S) -> Self {
        Self { service, input, out, err, sink }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.out, "{MENU}Enter your choice: ")?;
            self.out.flush()?;

            let Some(line) = self.read_line()? else {
                debug!("End of input, leaving the menu");
                return Ok(());
            };

            match Choice::parse(&line) {
                Some(Choice::Exit) => return Ok(()),
                Some(choice) => {
                    let Some(request) = self.request_for(choice)? else {
                        return Ok(());
                    };
                    self.dispatch(&request)?;
                }
                None => writeln!(self.out, "Invalid choice. Please try again.")?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// One line without its line terminator, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        self.read_line()
    }

    /// Prompts for the arguments of `choice`; `None` if input ran out
    fn request_for(&mut self, choice: Choice) -> io::Result<Option<Request>> {
        let request = match choice {
            Choice::List => Request::List,
            Choice::Copy | Choice::Move => {
                let Some(source) = self.prompt("Enter source file: ")? else {
                    return Ok(None);
                };
                let Some(target) = self.prompt("Enter target file: ")? else {
                    return Ok(None);
                };
                if choice == Choice::Copy {
                    Request::Copy { source, target }
                } else {
                    Request::Move { source, target }
                }
            }
            Choice::Delete => match self.prompt("Enter file to delete: ")? {
                Some(name) => Request::Delete { name },
                None => return Ok(None),
            },
            Choice::CreateDirectory => match self.prompt("Enter directory name: ")? {
                Some(name) => Request::CreateDirectory { name },
                None => return Ok(None),
            },
            Choice::DeleteDirectory => match self.prompt("Enter directory name: ")? {
                Some(name) => Request::DeleteDirectory { name },
                None => return Ok(None),
            },
            Choice::Search => match self.prompt("Enter search pattern: ")? {
                Some(pattern) => Request::Search { pattern },
                None => return Ok(None),
            },
            Choice::Exit => return Ok(None),
        };
        Ok(Some(request))
    }

    fn dispatch(&mut self, request: &Request) -> io::Result<()> {
        debug!("Dispatching {request:?}");
        match perform(&self.service, request) {
            Ok(output) => output.write_to(&mut self.out),
            Err(e) => {
                writeln!(self.err, "{} {e}", style("An error occurred:").red().for_stderr())?;
                self.sink.record_now(&e.to_string());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    struct Session {
        out: String,
        err: String,
        sink: MemorySink,
    }

    fn run_session(dir: &TempDir, input: &str) -> Session {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);

        let service = DirectoryService::new(dir.path());
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let mut shell = Shell::new(
            service,
            Cursor::new(input.as_bytes().to_vec()),
            &mut out,
            &mut err,
            MemorySink::default(),
        );
        shell.run().unwrap();
        let sink = shell.into_sink();

        Session {
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
            sink,
        }
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("1"), Some(Choice::List));
        assert_eq!(Choice::parse("7"), Some(Choice::Search));
        assert_eq!(Choice::parse("8"), Some(Choice::Exit));
        assert_eq!(Choice::parse(" 1"), None);
        assert_eq!(Choice::parse("9"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn test_exit_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_session(&dir, "8\n");
        assert_eq!(session.out, format!("{MENU}Enter your choice: "));
        assert!(session.err.is_empty());
    }

    #[test]
    fn test_end_of_input_ends_loop() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_session(&dir, "");
        assert_eq!(session.out.matches("Enter your choice: ").count(), 1);

        let session = run_session(&dir, "2\na.txt\n");
        assert!(session.out.ends_with("Enter target file: "));
        assert!(session.sink.entries().is_empty());
    }

    #[test]
    fn test_invalid_choice_loops() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_session(&dir, "42\n8\n");
        assert!(session.out.contains("Invalid choice. Please try again.\n"));
        assert_eq!(session.out.matches("Enter your choice: ").count(), 2);
    }

    #[test]
    fn test_create_copy_and_list() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"hi").unwrap();

        let session = run_session(&dir, "5\nnotes\n2\na.txt\nnotes/a.txt\n1\n8\n");

        assert!(session.out.contains("Enter directory name: Directory created successfully.\n"));
        assert!(session.out.contains("Enter source file: Enter target file: File copied successfully.\n"));
        assert!(session.out.contains("a.txt (Size: 2 bytes, Last Modified: "));
        assert!(session.out.contains("notes (Size: "));
        assert_eq!(fs::read(dir.path().join("notes/a.txt")).unwrap(), b"hi");
    }

    #[test]
    fn test_crlf_input() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_session(&dir, "5\r\nnotes\r\n8\r\n");
        assert!(session.out.contains("Directory created successfully."));
        assert!(dir.path().join("notes").is_dir());
    }

    #[test]
    fn test_move_delete_and_rmdir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let session = run_session(&dir, "3\na.txt\nb.txt\n4\nb.txt\n6\nempty\n8\n");

        assert!(session.out.contains("File moved successfully.\n"));
        assert!(session.out.contains("Enter file to delete: File deleted successfully.\n"));
        assert!(session.out.contains("Directory deleted successfully.\n"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_search_prints_hits() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("notes/b.txt"), b"").unwrap();
        fs::write(dir.path().join("a.csv"), b"").unwrap();

        let session = run_session(&dir, "7\n.txt\n8\n");
        let expected = dir.path().join("notes").join("b.txt").display().to_string();
        assert!(session.out.contains(&format!("Enter search pattern: {expected}\n")));
        assert!(!session.out.contains("a.csv"));
    }

    #[test]
    fn test_failure_is_reported_logged_and_loop_continues() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("notes/keep.txt"), b"").unwrap();

        let session = run_session(&dir, "6\nnotes\n5\nnotes\n1\n8\n");

        let errors: Vec<_> = session.err.lines().collect();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("An error occurred: Directory not empty: "));
        assert!(errors[1].starts_with("An error occurred: Already exists: "));

        let logged: Vec<_> = session.sink.entries().iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(logged.len(), 2);
        assert!(logged[0].starts_with("Directory not empty: "));

        assert!(session.out.contains("notes (Size: "));
        assert_eq!(session.out.matches("Enter your choice: ").count(), 4);
    }
}
