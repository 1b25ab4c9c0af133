//! File import/export for dictionaries, boards and answer lists.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::board::Board;
use crate::dictionary::Dictionary;
use crate::error::ImportError;

/// Load whitespace-separated words from `path` into `dictionary`.
///
/// Words are lowercased. Tokens with anything other than ASCII letters are
/// skipped. The import stops at the first insertion failure (pool
/// exhaustion); the dictionary should then be discarded.
///
/// Returns the number of words newly added.
pub fn import_dictionary(path: impl AsRef<Path>, dictionary: &mut Dictionary) -> Result<usize, ImportError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ImportError::from_io(path, e))?;

    let mut skipped = 0usize;
    let words: Vec<String> = text
        .split_whitespace()
        .filter_map(|token| {
            if token.bytes().all(|b| b.is_ascii_alphabetic()) {
                Some(token.to_ascii_lowercase())
            } else {
                skipped += 1;
                None
            }
        })
        .collect();

    if skipped > 0 {
        debug!(skipped, path = %path.display(), "skipped tokens with non-letter characters");
    }

    let added = dictionary.import_words(words.iter().map(String::as_str))?;
    info!(
        added,
        nodes = dictionary.node_count(),
        capacity = dictionary.pool().capacity(),
        "dictionary imported from {}",
        path.display()
    );
    Ok(added)
}

/// Load a board from `path` (see [`Board::parse`]).
pub fn import_board(path: impl AsRef<Path>) -> Result<Board, ImportError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ImportError::from_io(path, e))?;
    let board = Board::parse(&text);

    info!(
        rows = board.row_count(),
        cells = board.cell_count(),
        "board imported from {}",
        path.display()
    );
    Ok(board)
}

/// Write `answers` to `path`, one word per line.
pub fn export_answers(path: impl AsRef<Path>, answers: &[String]) -> Result<(), ImportError> {
    let path = path.as_ref();
    let io_err = |e: std::io::Error| ImportError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let mut out = BufWriter::new(File::create(path).map_err(io_err)?);
    for word in answers {
        writeln!(out, "{word}").map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;

    debug!(words = answers.len(), "answers written to {}", path.display());
    Ok(())
}
