use colored::Colorize;

use std::io;
use std::process::ExitCode;

use forestbench::{logging, BenchmarkRunner, ForestError, Result};


fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        },
    }
}


fn run() -> Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .ok_or(ForestError::MissingPath)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    BenchmarkRunner::new(path).run(&mut out)?;
    Ok(())
}
