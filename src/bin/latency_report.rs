use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use boggle_solver::{io, Dictionary, SearchEngine, SearchScratch};
use clap::Parser;
use hdrhistogram::Histogram;

/// Per-cell DFS latency for a board and dictionary.
#[derive(Parser, Debug)]
#[command(name = "latency-report")]
struct Args {
    dictionary: PathBuf,
    board: PathBuf,

    /// Passes over every cell
    #[arg(short, long, default_value_t = 100)]
    iterations: u64,

    #[arg(long, default_value_t = boggle_solver::config::DEFAULT_NODE_POOL_CAPACITY)]
    pool_capacity: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Preparing Latency Benchmark...");

    let mut dictionary = Dictionary::new(args.pool_capacity)?;
    io::import_dictionary(&args.dictionary, &mut dictionary)?;
    let board = io::import_board(&args.board)?;
    let cells: Vec<_> = board.positions().collect();

    let engine = SearchEngine::new(Arc::new(dictionary), Arc::new(board));
    let mut scratch = SearchScratch::new();

    let mut histogram = Histogram::<u64>::new_with_bounds(1, 10_000_000_000, 3)?;
    let mut total_duration = Duration::ZERO;

    println!(
        "Running {} iterations over {} cells...",
        args.iterations,
        cells.len()
    );

    for _ in 0..args.iterations {
        for &(row, col) in &cells {
            let start = Instant::now();
            engine.find_words_with(row, col, &mut scratch);
            let elapsed = start.elapsed();

            // Saturate rather than fail on outliers past the upper bound
            histogram.saturating_record(elapsed.as_nanos() as u64);
            total_duration += elapsed;
        }
    }

    let searches = histogram.len();
    let stats = engine.stats();

    println!("\n=== Cell Search Latency (ns) ===");
    println!("Searches:   {}", searches);
    println!("Words:      {}", engine.answer_count());
    println!("Throughput: {:.2} cells/sec", searches as f64 / total_duration.as_secs_f64());
    println!(
        "Pruned:     {:.1}% of {} steps",
        100.0 * stats.pruned as f64 / stats.steps.max(1) as f64,
        stats.steps
    );
    println!("--------------------------------");
    println!("Min:    {:9} ns", histogram.min());
    println!("P50:    {:9} ns", histogram.value_at_quantile(0.50));
    println!("P90:    {:9} ns", histogram.value_at_quantile(0.90));
    println!("P99:    {:9} ns", histogram.value_at_quantile(0.99));
    println!("P99.9:  {:9} ns", histogram.value_at_quantile(0.999));
    println!("Max:    {:9} ns", histogram.max());
    println!("--------------------------------");

    println!("\nDistribution:");
    for v in histogram.iter_log(1_000, 2.0) {
        let count = v.count_since_last_iteration();
        if count > 0 {
            println!("<= {:9} ns: {:10} count", v.value_iterated_to(), count);
        }
    }

    Ok(())
}
