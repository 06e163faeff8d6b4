//! Subcommand implementations.
//!
//! Every command processes all of its files, reports each failure on the
//! error stream and fails as a whole if any file failed.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use kisexp_codec::Record;
use kisexp_foundation::Error;
use kisexp_kicad::Board;
use kisexp_syntax::{build_sexp_with, parse_with};

use crate::CliError;
use crate::args::{CliConfig, Command};

/// Runs the configured command.
///
/// Results go to `out`, per-file error reports to `err`.
///
/// # Errors
/// Returns [`CliError::Failed`] with the number of failed files, or an I/O
/// error if `out` or `err` cannot be written.
pub fn run(config: &CliConfig, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let Some(command) = config.command else {
        return Err(CliError::Usage("missing command".into()));
    };

    let mut failed = 0;
    for path in &config.files {
        let result = match command {
            Command::Fmt => fmt(config, path, out),
            Command::Check => check(config, path, out),
            Command::Roundtrip => roundtrip(config, path, out),
        };
        if let Err(error) = result {
            failed += 1;
            writeln!(err, "\x1b[31merror\x1b[0m: {}", error.report())?;
        }
    }

    if failed == 0 {
        Ok(())
    } else {
        Err(CliError::Failed(failed))
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String, Error> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|e| Error::from(e).with_source(path.display().to_string()))
}

fn source_of(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".into()
    } else {
        path.display().to_string()
    }
}

/// Formats `text` the way `fmt` writes it.
///
/// # Errors
/// Returns a grammar error if `text` is not a single s-expression.
pub fn format_text(text: &str, config: &CliConfig) -> Result<String, Error> {
    let node = parse_with(text, &config.parse_config())?;
    let mut formatted = build_sexp_with(&node, &config.print_config());
    formatted.push('\n');
    Ok(formatted)
}

fn fmt(config: &CliConfig, path: &Path, out: &mut dyn Write) -> Result<(), Error> {
    let source = source_of(path);
    let text = read_input(path)?;
    let formatted = format_text(&text, config).map_err(|e| e.with_source(&source))?;

    if config.check {
        if formatted != text {
            return Err(Error::format("not formatted").with_source(source));
        }
        log::info!("{source}: already formatted");
    } else if is_stdin(path) {
        out.write_all(formatted.as_bytes())?;
    } else if formatted == text {
        log::info!("{source}: unchanged");
    } else {
        fs::write(path, formatted).map_err(|e| Error::from(e).with_source(&source))?;
        log::info!("{source}: formatted");
    }
    Ok(())
}

fn open_board(config: &CliConfig, path: &Path) -> Result<Board, Error> {
    if is_stdin(path) {
        let text = read_input(path)?;
        return Board::parse_with(&text, &config.parse_config()).map_err(|e| e.with_source("<stdin>"));
    }
    Board::open_with(path, &config.parse_config())
}

fn check(config: &CliConfig, path: &Path, out: &mut dyn Write) -> Result<(), Error> {
    let board = open_board(config, path)?;
    writeln!(
        out,
        "{}: version {}, {} layers, {} nets, {} segments, {} arcs, {} vias",
        source_of(path),
        board.version,
        board.layers.len(),
        board.nets.len(),
        board.track_segments.len(),
        board.track_arcs.len(),
        board.vias.len()
    )?;
    Ok(())
}

fn roundtrip(config: &CliConfig, path: &Path, out: &mut dyn Write) -> Result<(), Error> {
    let source = source_of(path);
    let layout = config.print_config();

    let board = open_board(config, path)?;
    let first = board.serialize_with(&layout)?;
    let second = Board::parse_with(&first, &config.parse_config())
        .and_then(|again| again.serialize_with(&layout))
        .map_err(|e| e.with_source(&source))?;

    if first != second {
        let line = first
            .lines()
            .zip(second.lines())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| first.lines().count().min(second.lines().count()))
            + 1;
        return Err(
            Error::format(format!("re-encoding differs from the first encoding at line {line}"))
                .with_source(source),
        );
    }
    writeln!(out, "{source}: ok")?;
    Ok(())
}
