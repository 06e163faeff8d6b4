//! kisexp CLI entry point.

use std::env;
use std::io;
use std::process::ExitCode;

use kisexp_cli::{CliError, logger, parse_args, run};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match main_inner(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(message)) => {
            eprintln!("\x1b[31mError: {message}\x1b[0m");
            eprintln!("Run `kisexp --help` for usage.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn main_inner(args: &[String]) -> Result<(), CliError> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("kisexp {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logger::init(config.log_level())?;
    log::debug!("{config:?}");

    let stdout = io::stdout();
    let stderr = io::stderr();
    run(&config, &mut stdout.lock(), &mut stderr.lock())
}

fn print_help() {
    println!(
        "\x1b[1mkisexp\x1b[0m - KiCad s-expression formatter and checker

\x1b[1mUSAGE:\x1b[0m
    kisexp [OPTIONS] <COMMAND> [FILES...]

\x1b[1mCOMMANDS:\x1b[0m
    fmt          Reprint files in KiCad's layout (in place; `-` reads stdin)
    check        Decode files as boards and print a summary
    roundtrip    Verify that re-encoding a decoded board is stable

\x1b[1mOPTIONS:\x1b[0m
    -h, --help           Print help information
    -V, --version        Print version information
    -v, -vv, -vvv        More log output (info, debug, trace)
    -q, --quiet          Only log errors
    --max-depth N        Reject files nesting deeper than N lists (default 512)

\x1b[1mFMT OPTIONS:\x1b[0m
    --check              Fail on files that are not formatted, change nothing
    --compact            Print every list on one line
    --indent N           Indent nested lists by N spaces (default 2)

\x1b[1mEXAMPLES:\x1b[0m
    kisexp fmt board.kicad_pcb            Reformat a board in place
    kisexp fmt --check *.kicad_pcb        Check formatting, e.g. in CI
    kisexp -v check board.kicad_pcb       Summarize a board
    kisexp roundtrip board.kicad_pcb      Check encoding stability"
    );
}
