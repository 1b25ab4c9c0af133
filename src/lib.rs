//! # Boggle Solver
//!
//! Finds every dictionary word that can be spelled on a Boggle board by
//! an 8-directional path that never reuses a cell.
//!
//! ## Design Principles
//!
//! - **Build Once, Read Many**: The dictionary trie is built on one thread,
//!   then frozen behind an `Arc` and read without locks
//! - **Arena Allocation**: Trie nodes come from a fixed-capacity slab and
//!   link by 32-bit index
//! - **Prefix Pruning**: A path is abandoned as soon as its letters are not
//!   a prefix of any word
//! - **One Task per Cell**: A fixed worker pool searches every starting cell
//!   independently; only the sorted answer set is shared
//!
//! ## Architecture
//!
//! ```text
//! [Dictionary Import] --> [NodePool + Trie] --Arc--> [SearchEngine] --> [Answers]
//!                                                        |
//!                                  [WorkerPool] <-- one task per cell
//! ```

pub mod adjacency;
pub mod arena;
pub mod board;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod io;
pub mod pool;

// Re-exports for convenience
pub use adjacency::{Direction, VisitedSet};
pub use arena::{LetterNode, NodeIndex, NodePool, PoolCounters, NULL_INDEX};
pub use board::{Board, Position};
pub use config::SolverConfig;
pub use dictionary::{Dictionary, SearchMode, MIN_WORD_LEN};
pub use engine::{SearchEngine, SearchScratch, StatsSnapshot};
pub use error::{DictionaryError, ErrorCode, ImportError, PoolError, SolverError};
pub use pool::{PoolConfig, PoolHandle, WorkerPool};

use std::path::Path;
use std::sync::Arc;

/// Import the dictionary and board, solve, and return the sorted answers.
///
/// Any import failure aborts before a search task is created.
pub fn solve_files(
    dictionary_path: impl AsRef<Path>,
    board_path: impl AsRef<Path>,
    config: &SolverConfig,
) -> Result<Vec<String>, SolverError> {
    let pool = WorkerPool::new(config.pool_config())?;

    let mut dictionary = Dictionary::new(config.node_pool_capacity)?;
    io::import_dictionary(dictionary_path, &mut dictionary)?;
    let dictionary = Arc::new(dictionary);

    let board = Arc::new(io::import_board(board_path)?);

    let engine = SearchEngine::new(dictionary, board);
    Ok(engine.solve(&pool))
}
