use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use boggle_solver::{io, solve_files, SolverConfig, SolverError};
use clap::error::ErrorKind;
use clap::Parser;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Find every dictionary word on a Boggle board.
#[derive(Parser, Debug)]
#[command(
    name = "boggle",
    version,
    after_help = "Exit status: 0 success, 1 file not found, 2 other I/O error, \
                  3 node pool exhausted, 255 invalid arguments."
)]
struct Args {
    /// Whitespace-separated word list
    dictionary: PathBuf,

    /// Board file, one row per line (rows may differ in length)
    board: PathBuf,

    /// Where to write the found words, one per line
    output: PathBuf,

    /// Worker threads
    #[arg(short, long, default_value_t = boggle_solver::config::DEFAULT_WORKER_THREADS)]
    threads: usize,

    /// Maximum number of trie nodes
    #[arg(long, default_value_t = boggle_solver::config::DEFAULT_NODE_POOL_CAPACITY)]
    pool_capacity: u32,

    /// Pin worker threads to CPU cores
    #[arg(long)]
    pin_workers: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

/// Exit status for malformed arguments, kept apart from every `ErrorCode`.
const USAGE_EXIT_CODE: u8 = 255;

/// Status to exit with after clap rejected or short-circuited the arguments.
fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => USAGE_EXIT_CODE,
    }
}

fn run(args: &Args) -> Result<usize, SolverError> {
    let config = SolverConfig::default()
        .with_worker_threads(args.threads)
        .with_node_pool_capacity(args.pool_capacity)
        .with_pinned_workers(args.pin_workers);

    let answers = solve_files(&args.dictionary, &args.board, &config)?;
    io::export_answers(&args.output, &answers)?;
    Ok(answers.len())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    let default_level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();

    let start = Instant::now();
    match run(&args) {
        Ok(count) => {
            println!(
                "Found {} words in {:.2?} -> {}",
                count,
                start.elapsed(),
                args.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.code() as u8)
        }
    }
}
