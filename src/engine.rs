//! Search Engine - parallel depth-first word search over the board.
//!
//! One task per board cell. Each task walks every non-repeating path
//! that starts at its cell, abandoning a path as soon as the letters so
//! far are not a prefix of any dictionary word.
//!
//! The dictionary and board are shared read-only. Per-path state (current
//! word, visited cells) lives in a [`SearchScratch`] owned by the task.
//! The answer set is the only shared mutable state and sits behind a
//! single mutex.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace, warn};

use crate::adjacency::{letters_for, valid_neighbors, VisitedSet};
use crate::board::{Board, Position};
use crate::dictionary::Dictionary;
use crate::pool::WorkerPool;

/// Scratch state for one search task.
///
/// Created fresh for every task and never shared between tasks.
#[derive(Debug, Default)]
pub struct SearchScratch {
    /// Letters along the current path ('q' cells contribute "qu")
    pub word: String,
    /// Cells on the current path
    pub visited: VisitedSet,
}

impl SearchScratch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty() && self.visited.is_empty()
    }
}

/// Counters shared by all tasks of one engine.
#[derive(Debug, Default)]
pub struct SearchStats {
    steps: AtomicU64,
    pruned: AtomicU64,
    cells_searched: AtomicU64,
}

/// Point-in-time copy of [`SearchStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Cells entered by the DFS
    pub steps: u64,
    /// Cells abandoned because their path was not a dictionary prefix
    pub pruned: u64,
    /// Finished per-cell searches
    pub cells_searched: u64,
}

impl SearchStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            steps: self.steps.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
            cells_searched: self.cells_searched.load(Ordering::Relaxed),
        }
    }
}

struct EngineShared {
    dictionary: Arc<Dictionary>,
    board: Arc<Board>,
    /// Found words, sorted and deduplicated
    answers: Mutex<BTreeSet<String>>,
    stats: SearchStats,
}

impl EngineShared {
    fn answers(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.answers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Recursive DFS step into `pos`.
    ///
    /// Every exit path leaves `scratch` exactly as it was on entry.
    fn visit(&self, pos: Position, scratch: &mut SearchScratch) {
        let Some(letters) = self.board.get(pos.0, pos.1).and_then(letters_for) else {
            return;
        };

        scratch.word.push_str(letters);
        self.stats.steps.fetch_add(1, Ordering::Relaxed);

        if self.dictionary.contains_prefix(&scratch.word) {
            scratch.visited.insert(pos);

            for next in valid_neighbors(&self.board, pos, &scratch.visited) {
                self.visit(next, scratch);
            }

            if self.dictionary.contains_word(&scratch.word) {
                let inserted = self.answers().insert(scratch.word.clone());
                if inserted {
                    trace!(word = %scratch.word, "found word");
                }
            }

            scratch.visited.remove(&pos);
        } else {
            self.stats.pruned.fetch_add(1, Ordering::Relaxed);
        }

        scratch.word.truncate(scratch.word.len() - letters.len());
    }
}

/// Finds every dictionary word on a board.
///
/// Cloning is cheap and clones share the same answer set.
#[derive(Clone)]
pub struct SearchEngine {
    shared: Arc<EngineShared>,
}

impl SearchEngine {
    pub fn new(dictionary: Arc<Dictionary>, board: Arc<Board>) -> Self {
        Self {
            shared: Arc::new(EngineShared {
                dictionary,
                board,
                answers: Mutex::new(BTreeSet::new()),
                stats: SearchStats::default(),
            }),
        }
    }

    /// Find every word whose path starts at (`row`, `col`), on the calling
    /// thread. Results land in the shared answer set.
    pub fn find_words_at(&self, row: usize, col: usize) {
        let mut scratch = SearchScratch::new();
        self.find_words_with(row, col, &mut scratch);
    }

    /// Like [`find_words_at`](Self::find_words_at) but with caller-owned
    /// scratch, which must be empty on entry and is empty again on return.
    pub fn find_words_with(&self, row: usize, col: usize, scratch: &mut SearchScratch) {
        debug_assert!(scratch.is_empty(), "Scratch state leaked between searches");

        self.shared.visit((row, col), scratch);
        self.shared.stats.cells_searched.fetch_add(1, Ordering::Relaxed);

        debug_assert!(scratch.is_empty(), "DFS did not fully backtrack");
    }

    /// Queue one search task per board cell on `pool`.
    ///
    /// Returns immediately; call `pool.wait_for_completion()` before
    /// reading the answers.
    pub fn solve_board(&self, pool: &WorkerPool) {
        let mut tasks = 0usize;
        for (row, col) in self.shared.board.positions() {
            let engine = self.clone();
            pool.submit(move || engine.find_words_at(row, col));
            tasks += 1;
        }
        debug!(tasks, threads = pool.thread_count(), "queued board search");
    }

    /// Search the whole board and return the sorted answers.
    ///
    /// A cell search that panics is logged and its words are missing from
    /// the result.
    pub fn solve(&self, pool: &WorkerPool) -> Vec<String> {
        let panicked_before = pool.panicked();
        self.solve_board(pool);
        pool.wait_for_completion();

        let failed = pool.panicked() - panicked_before;
        if failed > 0 {
            warn!(failed, "cell searches panicked, answers are incomplete");
        }

        let answers = self.answers();
        let stats = self.stats();
        debug!(
            words = answers.len(),
            steps = stats.steps,
            pruned = stats.pruned,
            "board solved"
        );
        answers
    }

    /// Sorted snapshot of the words found so far.
    pub fn answers(&self) -> Vec<String> {
        self.shared.answers().iter().cloned().collect()
    }

    pub fn answer_count(&self) -> usize {
        self.shared.answers().len()
    }

    pub fn contains_answer(&self, word: &str) -> bool {
        self.shared.answers().contains(word)
    }

    pub fn clear_answers(&self) {
        self.shared.answers().clear();
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot()
    }

    pub fn board(&self) -> &Board {
        &self.shared.board
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.shared.dictionary
    }
}
