#![forbid(unsafe_code)]

//! Tokenizes one file and prints the collections a run produces.

mod cli;
mod report;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sigma_lex::{ConfigError, DynLexer, LexError, LexerConfig, LexerRegistry};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, HELP_TEXT, Opts, VERSION};
use crate::report::Report;

const LOG_ENV: &str = "SIGMA_LEX_LOG";

#[derive(Debug)]
enum HarnessError {
    Read { path: PathBuf, source: std::io::Error },
    Config(ConfigError),
    Lex(LexError),
    UnknownLanguage(String),
    UndetectedLanguage(PathBuf),
    Render(serde_json::Error),
}

impl HarnessError {
    /// Exit status: 2 for problems with the command line, 1 otherwise.
    fn exit_status(&self) -> u8 {
        match self {
            Self::UnknownLanguage(_) | Self::UndetectedLanguage(_) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Lex(err) => write!(f, "cannot tokenize: {err}"),
            Self::UnknownLanguage(name) => write!(f, "unknown language: {name}"),
            Self::UndetectedLanguage(path) => {
                write!(f, "cannot tell the language of {}; pass --lang", path.display())
            }
            Self::Render(err) => write!(f, "cannot render report: {err}"),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Config(err) => Some(err),
            Self::Lex(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::UnknownLanguage(_) | Self::UndetectedLanguage(_) => None,
        }
    }
}

fn read(path: &Path) -> Result<String, HarnessError> {
    fs::read_to_string(path).map_err(|source| HarnessError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_config(path: Option<&Path>) -> Result<LexerConfig, HarnessError> {
    match path {
        Some(path) => LexerConfig::from_json(&read(path)?).map_err(HarnessError::Config),
        None => Ok(LexerConfig::default()),
    }
}

fn pick_lexer(registry: &LexerRegistry, opts: &Opts) -> Result<Box<dyn DynLexer>, HarnessError> {
    match &opts.lang {
        Some(name) => registry
            .lexer_by_name(name)
            .or_else(|| registry.lexer_for_extension(name))
            .ok_or_else(|| HarnessError::UnknownLanguage(name.clone())),
        None => registry
            .lexer_for_path(&opts.file)
            .ok_or_else(|| HarnessError::UndetectedLanguage(opts.file.clone())),
    }
}

fn run(opts: &Opts) -> Result<String, HarnessError> {
    let config = load_config(opts.config.as_deref())?;
    let registry = LexerRegistry::with_all(config);
    let mut lexer = pick_lexer(&registry, opts)?;
    let text = read(&opts.file)?;
    info!(
        file = %opts.file.display(),
        language = lexer.language(),
        bytes = text.len(),
        "scanning"
    );

    lexer
        .tokenize(opts.start, &text, opts.highlight.as_deref())
        .map_err(HarnessError::Lex)?;
    debug!(tokens = lexer.tokens().len(), "scan complete");

    let report = Report::new(lexer.as_ref());
    if opts.json {
        report.to_json().map_err(HarnessError::Render)
    } else {
        Ok(report.to_text(&text))
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let opts = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{HELP_TEXT}");
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("sigma-lex-harness {VERSION}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Run with --help for usage information.");
            return ExitCode::from(2);
        }
    };

    match run(&opts) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("sigma-lex-harness: {err}");
            ExitCode::from(err.exit_status())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(lang: Option<&str>, file: &str) -> Opts {
        Opts {
            lang: lang.map(str::to_string),
            config: None,
            highlight: None,
            start: 0,
            json: false,
            file: PathBuf::from(file),
        }
    }

    #[test]
    fn language_from_flag_or_path() {
        let registry = LexerRegistry::with_all(LexerConfig::default());
        let lexer = pick_lexer(&registry, &opts(Some("tex"), "notes.txt")).unwrap();
        assert_eq!(lexer.language(), "TeX");
        let lexer = pick_lexer(&registry, &opts(Some("py"), "notes.txt")).unwrap();
        assert_eq!(lexer.language(), "Python");
        let lexer = pick_lexer(&registry, &opts(None, "dir/Makefile")).unwrap();
        assert_eq!(lexer.language(), "Makefile");
    }

    #[test]
    fn unknown_languages_are_usage_errors() {
        let registry = LexerRegistry::with_all(LexerConfig::default());
        let err = pick_lexer(&registry, &opts(Some("cobol"), "a")).err().unwrap();
        assert_eq!(err.exit_status(), 2);
        let err = pick_lexer(&registry, &opts(None, "README")).err().unwrap();
        assert!(err.to_string().contains("--lang"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = run(&opts(Some("c++"), "/nonexistent/sigma-lex/input.cpp")).unwrap_err();
        assert!(matches!(err, HarnessError::Read { .. }));
        assert_eq!(err.exit_status(), 1);
    }
}
