//! Command-line front end for the `json-check` library.
//!
//! Reads each input fully into memory (files, or stdin for `-` or when no
//! file is given), validates it and reports the first error found.
//!
//! Exit status: 0 if every input is valid, 1 on the first invalid input,
//! 2 if an input could not be read.

use anyhow::{Context, Result};
use clap::Parser;
use json_check::{
    tokenize, validate_with, Diagnostic, Error, Options, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_INPUT_BYTES,
};
use log::{debug, info};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_INVALID: u8 = 1;
const EXIT_IO: u8 = 2;

#[derive(Parser)]
#[command(name = "json-check")]
#[command(about = "Check that documents are JSON and report the first syntax error", long_about = None)]
#[command(version)]
struct Cli {
    /// Files to check. Reads stdin when empty or for `-`.
    files: Vec<PathBuf>,

    /// Maximum nesting depth of objects and arrays.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Maximum input size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    max_bytes: usize,

    /// Reject anything after the top-level value.
    #[arg(long)]
    strict: bool,

    /// Print the token sequence instead of validating.
    #[arg(short, long)]
    tokens: bool,

    /// Do not print a line for valid inputs.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> Options {
        Options::new()
            .with_max_depth(self.max_depth)
            .with_max_input_bytes(self.max_bytes)
            .with_trailing_tokens_rejected(self.strict)
    }

    /// The inputs in order; `None` stands for stdin.
    fn inputs(&self) -> Vec<Option<&PathBuf>> {
        if self.files.is_empty() {
            return vec![None];
        }
        self.files
            .iter()
            .map(|path| (path.as_os_str() != "-").then_some(path))
            .collect()
    }
}

/// Reads a whole input into a string.
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn display_name(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let options = cli.options();
    debug!("validating with {:?}", options);

    for path in cli.inputs() {
        let name = display_name(path);
        let source = match read_input(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("{}: {:#}", name, e);
                return ExitCode::from(EXIT_IO);
            }
        };

        if cli.tokens {
            match tokenize(&source) {
                Ok(tokens) => {
                    for token in tokens {
                        println!("{:>8}  {}", token.offset(), token.kind());
                    }
                }
                Err(e) => {
                    let diagnostic = Diagnostic::new(&Error::from(e), &source);
                    eprintln!("{}: {}", name, diagnostic);
                    return ExitCode::from(EXIT_INVALID);
                }
            }
            continue;
        }

        match validate_with(&source, &options) {
            Ok(()) => {
                info!("{} is valid", name);
                if !cli.quiet {
                    println!("{}: ok", name);
                }
            }
            Err(e) => {
                eprintln!("{}: {}", name, Diagnostic::new(&e, &source));
                return ExitCode::from(EXIT_INVALID);
            }
        }
    }

    ExitCode::SUCCESS
}
