// SPDX-License-Identifier: AGPL-3.0-or-later
//! dirkit CLI
//!
//! Browse and change one working directory, interactively or one command at
//! a time.

mod commands;
mod shell;
mod sink;

use clap::{Parser, Subcommand};
use commands::Request;
use dirkit_core::DirectoryService;
use shell::Shell;
use sink::{FileSink, DEFAULT_LOG_FILE};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "dirkit")]
#[command(author, version, about = "dirkit - browse and manage a working directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory all paths are resolved against (defaults to the current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// File that failures are appended to
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List directory contents
    #[command(alias = "dir")]
    Ls,

    /// Copy a file
    Cp {
        /// Source path
        source: String,

        /// Destination path
        dest: String,
    },

    /// Move or rename a file
    Mv {
        /// Source path
        source: String,

        /// Destination path
        dest: String,
    },

    /// Remove a file or empty directory
    Rm {
        /// Path to remove
        path: String,
    },

    /// Create a directory
    Mkdir {
        /// Directory path to create
        path: String,
    },

    /// Remove an empty directory
    Rmdir {
        /// Directory path to remove
        path: String,
    },

    /// Find entries whose name contains a pattern
    Search {
        /// Literal, case-sensitive substring
        pattern: String,
    },
}

impl From<Commands> for Request {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Ls => Request::List,
            Commands::Cp { source, dest } => Request::Copy { source, target: dest },
            Commands::Mv { source, dest } => Request::Move { source, target: dest },
            Commands::Rm { path } => Request::Delete { name: path },
            Commands::Mkdir { path } => Request::CreateDirectory { name: path },
            Commands::Rmdir { path } => Request::DeleteDirectory { name: path },
            Commands::Search { pattern } => Request::Search { pattern },
        }
    }
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).without_time().compact())
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: could not determine the current directory: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let service = match DirectoryService::open(&root) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sink = FileSink::new(&cli.log_file);
    debug!("Logging failures to {}", sink.path().display());

    let result = match cli.command {
        Some(command) => {
            let request = Request::from(command);
            commands::run_once(&service, &request, &mut io::stdout(), &mut io::stderr(), &mut sink)
        }
        None => Shell::new(service, io::stdin().lock(), io::stdout(), io::stderr(), sink)
            .run()
            .map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dirkit"]);
        assert!(cli.command.is_none());
        assert!(cli.root.is_none());
        assert_eq!(cli.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_subcommand_to_request() {
        let cli = Cli::parse_from(["dirkit", "--root", "/srv", "cp", "a.txt", "b.txt"]);
        assert_eq!(cli.root, Some(PathBuf::from("/srv")));
        let request = Request::from(cli.command.unwrap());
        assert_eq!(request, Request::Copy { source: "a.txt".into(), target: "b.txt".into() });

        let cli = Cli::parse_from(["dirkit", "dir"]);
        assert_eq!(Request::from(cli.command.unwrap()), Request::List);

        let cli = Cli::parse_from(["dirkit", "search", ".txt", "-v"]);
        assert!(cli.verbose);
        assert_eq!(
            Request::from(cli.command.unwrap()),
            Request::Search { pattern: ".txt".into() }
        );
    }
}
