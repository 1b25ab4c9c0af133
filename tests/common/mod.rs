//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use boggle_solver::adjacency::{letters_for, valid_neighbors};
use boggle_solver::{Board, Dictionary, Position, SearchEngine, VisitedSet};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Letter bag weighted roughly like English text.
pub const LETTERS: &[u8] = b"aaaabcddeeeeeefgghhiiiijklllmnnnoooopqrrrsssstttuuvwxyyz";

pub fn random_board(rng: &mut ChaCha8Rng, rows: usize, cols: usize) -> Board {
    Board::new(
        (0..rows)
            .map(|_| (0..cols).map(|_| *LETTERS.choose(rng).unwrap()).collect())
            .collect(),
    )
}

/// Board whose row lengths vary between 1 and `max_cols`.
pub fn random_jagged_board(rng: &mut ChaCha8Rng, rows: usize, max_cols: usize) -> Board {
    Board::new(
        (0..rows)
            .map(|_| {
                let cols = rng.gen_range(1..=max_cols);
                (0..cols).map(|_| *LETTERS.choose(rng).unwrap()).collect()
            })
            .collect(),
    )
}

/// Half random letter strings, half words traced along random paths on
/// `board` so that a solve finds something.
pub fn random_words(rng: &mut ChaCha8Rng, board: &Board, count: usize) -> Vec<String> {
    let cells: Vec<Position> = board.positions().collect();
    let mut words = Vec::with_capacity(count);

    while words.len() < count {
        let len = rng.gen_range(3..9);
        if cells.is_empty() || rng.gen_bool(0.5) {
            words.push((0..len).map(|_| *LETTERS.choose(rng).unwrap() as char).collect());
            continue;
        }

        let mut pos = *cells.choose(rng).unwrap();
        let mut visited = VisitedSet::default();
        let mut word = String::new();
        loop {
            visited.insert(pos);
            word.push_str(letters_for(board.get(pos.0, pos.1).unwrap()).unwrap());
            let next = valid_neighbors(board, pos, &visited);
            if word.len() >= len || next.is_empty() {
                break;
            }
            pos = *next.choose(rng).unwrap();
        }
        words.push(word);
    }
    words
}

/// Node count that always fits `words`: one per letter plus the root.
pub fn capacity_for(words: &[String]) -> u32 {
    words.iter().map(String::len).sum::<usize>() as u32 + 1
}

pub fn build_dictionary(words: &[String]) -> Arc<Dictionary> {
    let mut dict = Dictionary::new(capacity_for(words)).unwrap();
    dict.import_words(words.iter().map(String::as_str)).unwrap();
    Arc::new(dict)
}

pub fn build_engine(board: Board, words: &[String]) -> SearchEngine {
    SearchEngine::new(build_dictionary(words), Arc::new(board))
}

/// Naive solver over plain hash sets, independent of the trie.
pub fn reference_solve(board: &Board, words: &[String]) -> Vec<String> {
    let words: HashSet<&str> = words
        .iter()
        .map(String::as_str)
        .filter(|w| w.len() >= 3)
        .collect();
    let prefixes: HashSet<&str> = words
        .iter()
        .flat_map(|&w| (1..=w.len()).map(move |end| &w[..end]))
        .collect();

    let mut found = BTreeSet::new();
    for (row, col) in board.positions() {
        let mut path = vec![(row, col)];
        let mut word = String::new();
        walk(board, &words, &prefixes, &mut path, &mut word, &mut found);
    }
    found.into_iter().collect()
}

fn walk(
    board: &Board,
    words: &HashSet<&str>,
    prefixes: &HashSet<&str>,
    path: &mut Vec<Position>,
    word: &mut String,
    found: &mut BTreeSet<String>,
) {
    let (row, col) = *path.last().unwrap();
    let before = word.len();
    word.push_str(letters_for(board.get(row, col).unwrap()).unwrap());

    if prefixes.contains(word.as_str()) {
        if words.contains(word.as_str()) {
            found.insert(word.clone());
        }
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                    continue;
                };
                if board.get(r, c).is_none() || path.contains(&(r, c)) {
                    continue;
                }
                path.push((r, c));
                walk(board, words, prefixes, path, word, found);
                path.pop();
            }
        }
    }

    word.truncate(before);
}
