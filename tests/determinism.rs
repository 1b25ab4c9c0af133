//! Determinism Test - identical answers regardless of worker count.
//!
//! Every solve is checked against a naive reference solver and against
//! itself across worker counts and repeated runs.

mod common;

use boggle_solver::WorkerPool;
use common::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn solve_with(threads: usize, board: &boggle_solver::Board, words: &[String]) -> Vec<String> {
    let engine = build_engine(board.clone(), words);
    let pool = WorkerPool::with_threads(threads).unwrap();
    engine.solve(&pool)
}

#[test]
fn test_single_vs_many_threads() {
    const SEED: u64 = 0xDEADBEEF;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let board = random_board(&mut rng, 5, 5);
    let words = random_words(&mut rng, &board, 2_000);

    let single = solve_with(1, &board, &words);
    assert!(!single.is_empty(), "Seeded board should contain words");

    for threads in [2, 4, 8, 16] {
        assert_eq!(
            solve_with(threads, &board, &words),
            single,
            "Answer mismatch with {} threads",
            threads
        );
    }
}

#[test]
fn test_matches_reference_solver() {
    const SEEDS: [u64; 8] = [1, 2, 3, 5, 8, 13, 21, 34];

    for seed in SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let size = rng.gen_range(3..=6);
        let board = random_board(&mut rng, size, size);
        let words = random_words(&mut rng, &board, 500);

        let expected = reference_solve(&board, &words);
        let actual = solve_with(4, &board, &words);

        assert_eq!(actual, expected, "Seed {} on {}x{} board", seed, size, size);
    }
}

#[test]
fn test_jagged_boards_match_reference() {
    for seed in 100..110u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let board = random_jagged_board(&mut rng, 5, 7);
        let words = random_words(&mut rng, &board, 400);

        assert_eq!(
            solve_with(3, &board, &words),
            reference_solve(&board, &words),
            "Seed {}",
            seed
        );
    }
}

#[test]
fn test_repeated_runs_identical() {
    const RUNS: usize = 10;

    let mut rng = ChaCha8Rng::seed_from_u64(0xCAFEBABE);
    let board = random_board(&mut rng, 6, 6);
    let words = random_words(&mut rng, &board, 3_000);

    let engine = build_engine(board, &words);
    let pool = WorkerPool::with_threads(8).unwrap();
    let first = engine.solve(&pool);

    for run in 1..RUNS {
        engine.clear_answers();
        assert_eq!(engine.solve(&pool), first, "Answer mismatch on run {}", run);
    }
}

#[test]
fn test_answers_sorted_and_unique() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let board = random_board(&mut rng, 6, 6);
    let words = random_words(&mut rng, &board, 2_000);

    let answers = solve_with(4, &board, &words);
    assert!(answers.windows(2).all(|w| w[0] < w[1]), "Answers must be strictly ascending");
    assert!(answers.iter().all(|w| w.len() >= 3));
}
