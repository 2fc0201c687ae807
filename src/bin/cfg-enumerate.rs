//! Command-line sentence enumerator.
//!
//! Reads a grammar file and prints its sentences, one per line, until the
//! language is exhausted or the consumer closes the pipe. Exit code 0 on
//! normal termination (pipe closure included), 1 on misuse, 2 on grammar
//! errors.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use cfg_enumerate::Language;

/// Enumerates every sentence of a grammar, fairly interleaved by depth and
/// breadth.
#[derive(Parser)]
#[command(name = "cfg-enumerate", version)]
struct Args {
    /// Path to the grammar file.
    grammar: PathBuf,

    /// JSON-encode each sentence.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let code = match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = error.print();
            return ExitCode::from(code);
        }
    };

    let source = match fs::read_to_string(&args.grammar) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("cfg-enumerate: {}: {}", args.grammar.display(), error);
            return ExitCode::from(1);
        }
    };

    let language = match Language::try_parse(&source) {
        Ok(language) => language,
        Err(errors) => {
            for error in &errors {
                eprintln!("{}: {}", args.grammar.display(), error);
            }
            return ExitCode::from(2);
        }
    };

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    for sentence in language.sentences() {
        let written = if args.json {
            serde_json::to_string(&sentence)
                .map_err(io::Error::from)
                .and_then(|encoded| writeln!(out, "{}", encoded))
        } else {
            writeln!(out, "{}", sentence)
        };
        match written {
            Ok(()) => {}
            // The consumer closed the pipe; for an unbounded enumeration
            // that is the normal way to end.
            Err(error) if error.kind() == io::ErrorKind::BrokenPipe => {
                return ExitCode::SUCCESS;
            }
            Err(error) => {
                eprintln!("cfg-enumerate: {}", error);
                return ExitCode::from(1);
            }
        }
    }

    match out.flush() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("cfg-enumerate: {}", error);
            ExitCode::from(1)
        }
    }
}
