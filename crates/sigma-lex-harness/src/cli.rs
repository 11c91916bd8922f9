#![forbid(unsafe_code)]

//! Command-line argument parsing for the harness.
//!
//! Parses args manually to keep the binary lean.

use std::fmt;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
sigma-lex-harness: print what a scanner produces for a file

USAGE:
    sigma-lex-harness [OPTIONS] FILE

OPTIONS:
    --lang=NAME          Language name (default: from the file name)
    --config=FILE        JSON keyword configuration
    --highlight=WORD     Flag occurrences of WORD
    --start=N            Byte offset to start scanning at (default: 0)
    --json               Print a JSON document instead of text
    --help, -h           Show this help message
    --version, -V        Show version

LANGUAGES:
    C++, Java, D, JavaScript, Python, CSS, HTML, JSP, Assembly, Makefile,
    INI, TeX

ENVIRONMENT VARIABLES:
    SIGMA_LEX_LOG        Log filter, e.g. 'sigma_lex=trace' (default: warn)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Language name; detected from `file` when absent.
    pub lang: Option<String>,
    /// Keyword configuration document.
    pub config: Option<PathBuf>,
    pub highlight: Option<String>,
    /// Byte offset of the first scanned character.
    pub start: usize,
    pub json: bool,
    pub file: PathBuf,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// A malformed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError(pub String);

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UsageError {}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut lang = None;
    let mut config = None;
    let mut highlight = None;
    let mut start = 0;
    let mut json = false;
    let mut file = None;

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--json" => json = true,
            other => {
                if let Some(val) = other.strip_prefix("--lang=") {
                    lang = Some(val.to_string());
                } else if let Some(val) = other.strip_prefix("--config=") {
                    config = Some(PathBuf::from(val));
                } else if let Some(val) = other.strip_prefix("--highlight=") {
                    highlight = Some(val.to_string());
                } else if let Some(val) = other.strip_prefix("--start=") {
                    start = val
                        .parse()
                        .map_err(|_| UsageError(format!("Invalid --start value: {val}")))?;
                } else if other.starts_with('-') && other.len() > 1 {
                    return Err(UsageError(format!("Unknown argument: {other}")));
                } else if file.is_some() {
                    return Err(UsageError(format!("Unexpected extra file: {other}")));
                } else {
                    file = Some(PathBuf::from(other));
                }
            }
        }
    }

    let file = file.ok_or_else(|| UsageError("Missing FILE argument".into()))?;
    Ok(Command::Run(Opts {
        lang,
        config,
        highlight,
        start,
        json,
        file,
    }))
}
