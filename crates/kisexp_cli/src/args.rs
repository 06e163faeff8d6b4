//! Command-line arguments.

use std::path::PathBuf;

use kisexp_syntax::{ParseConfig, PrintConfig};
use log::LevelFilter;

use crate::CliError;
use crate::logger::level_for;

/// The subcommand to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Reprint files in the KiCad layout.
    Fmt,
    /// Decode files as boards and summarize them.
    Check,
    /// Verify that encoding a decoded board is stable.
    Roundtrip,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "fmt" => Some(Self::Fmt),
            "check" => Some(Self::Check),
            "roundtrip" => Some(Self::Roundtrip),
            _ => None,
        }
    }
}

/// CLI configuration parsed from arguments.
#[derive(Debug, Default)]
pub struct CliConfig {
    /// Subcommand; `None` only together with `--help` or `--version`.
    pub command: Option<Command>,
    /// Input files; `-` is stdin for `fmt`.
    pub files: Vec<PathBuf>,
    /// `fmt --check`: report instead of rewriting.
    pub check: bool,
    /// Print every list on one line.
    pub compact: bool,
    /// Override of the indentation width.
    pub indent: Option<usize>,
    /// Override of the parser nesting limit.
    pub max_depth: Option<usize>,
    /// Number of `-v` flags.
    pub verbosity: u8,
    /// `-q`: only errors.
    pub quiet: bool,
    /// `-h`
    pub show_help: bool,
    /// `-V`
    pub show_version: bool,
}

impl CliConfig {
    /// Log level selected by `-v` / `-q`.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        level_for(self.verbosity, self.quiet)
    }

    /// Parser limits selected by `--max-depth`.
    #[must_use]
    pub fn parse_config(&self) -> ParseConfig {
        let config = ParseConfig::new();
        match self.max_depth {
            Some(depth) => config.with_max_depth(depth),
            None => config,
        }
    }

    /// Layout selected by `--compact` and `--indent`.
    #[must_use]
    pub fn print_config(&self) -> PrintConfig {
        let config = if self.compact {
            PrintConfig::compact()
        } else {
            PrintConfig::new()
        };
        match self.indent {
            Some(width) => config.with_indent_width(width),
            None => config,
        }
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, CliError> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{flag} requires a value")))
}

fn number(text: &str, flag: &str) -> Result<usize, CliError> {
    text.parse()
        .map_err(|_| CliError::Usage(format!("invalid {flag} value: {text}")))
}

/// Parses `args`, the first of which is the program name.
///
/// # Errors
/// Returns a usage error for unknown options, missing or malformed option
/// values, a missing subcommand or a subcommand without files.
pub fn parse_args(args: &[String]) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-q" | "--quiet" => config.quiet = true,
            "--check" => config.check = true,
            "--compact" => config.compact = true,
            "--indent" => {
                i += 1;
                config.indent = Some(number(value(args, i, "--indent")?, "--indent")?);
            }
            "--max-depth" => {
                i += 1;
                config.max_depth = Some(number(value(args, i, "--max-depth")?, "--max-depth")?);
            }
            "-" => config.files.push(PathBuf::from("-")),
            arg if arg.starts_with("-v") && arg[1..].bytes().all(|b| b == b'v') => {
                let count = u8::try_from(arg.len() - 1).unwrap_or(u8::MAX);
                config.verbosity = config.verbosity.saturating_add(count);
            }
            arg if arg.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option: {arg}")));
            }
            arg if config.command.is_none() => {
                config.command = Some(
                    Command::from_name(arg)
                        .ok_or_else(|| CliError::Usage(format!("unknown command: {arg}")))?,
                );
            }
            path => config.files.push(PathBuf::from(path)),
        }
        i += 1;
    }

    if config.show_help || config.show_version {
        return Ok(config);
    }
    let Some(command) = config.command else {
        return Err(CliError::Usage("missing command".into()));
    };
    if config.files.is_empty() {
        return Err(CliError::Usage("no input files".into()));
    }
    if config.check && command != Command::Fmt {
        return Err(CliError::Usage("--check only applies to fmt".into()));
    }
    Ok(config)
}
