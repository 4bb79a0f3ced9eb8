use clap::Parser;
use clubsim::{run_file, ClubError, ClubResult, LineSink, ReplayConfig};
use log::debug;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay a computer club event log and print the day's report
#[derive(Parser, Debug)]
#[command(name = "clubsim")]
struct Cli {
    /// Input event log
    #[arg(value_parser = parse_input_path)]
    file: PathBuf,
}

fn parse_input_path(arg: &str) -> Result<PathBuf, String> {
    if arg.len() <= 4 {
        return Err(format!("expected a file name like file.txt, got {:?}", arg));
    }
    Ok(PathBuf::from(arg))
}

fn run() -> ClubResult<()> {
    let cli = Cli::try_parse().map_err(|err| ClubError::BadArgument(err.to_string()))?;
    debug!("input file {}", cli.file.display());

    let stdout = io::stdout();
    let mut sink = LineSink::new(BufWriter::new(stdout.lock()));
    let result = run_file(&cli.file, ReplayConfig::default(), &mut sink);
    sink.flush()?;
    result.map(|_| ())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[ERROR] {}", err.to_string().trim_end());
            ExitCode::FAILURE
        }
    }
}
