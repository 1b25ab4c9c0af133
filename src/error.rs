//! Error types and the process exit-code taxonomy.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit codes surfaced by the `boggle` binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    Success = 0,
    /// Input file does not exist
    FileNotFound = 1,
    /// Opaque I/O or other unexpected failure
    UnknownFileErr = 2,
    /// Dictionary exceeded the node pool capacity
    OutOfPoolSpace = 3,
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code as i32
    }
}

/// Failures while building the dictionary trie.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    /// No free node was left in the pool mid-insertion.
    #[error("node pool exhausted (capacity {capacity}) while inserting \"{word}\"")]
    OutOfPoolSpace { word: String, capacity: u32 },

    /// A dictionary needs a pool with nothing allocated yet.
    #[error("node pool already has {allocated} allocated nodes")]
    PoolInUse { allocated: u32 },

    /// The trie only stores lowercase ASCII letters.
    #[error("invalid letter {letter:?} in \"{word}\"")]
    InvalidLetter { word: String, letter: char },
}

/// Failures of the file import/export collaborator.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

impl ImportError {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            ImportError::FileNotFound(path)
        } else {
            ImportError::Io { path, source }
        }
    }
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("a worker pool needs at least one thread")]
    NoThreads,

    #[error("failed to spawn worker thread {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: io::Error,
    },
}

/// Top-level error for a full import -> solve -> export run.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl SolverError {
    /// Map the error onto the exit-code taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            SolverError::Dictionary(e) | SolverError::Import(ImportError::Dictionary(e)) => {
                dictionary_code(e)
            }
            SolverError::Import(ImportError::FileNotFound(_)) => ErrorCode::FileNotFound,
            SolverError::Import(ImportError::Io { .. }) => ErrorCode::UnknownFileErr,
            SolverError::Pool(_) => ErrorCode::UnknownFileErr,
        }
    }
}

fn dictionary_code(err: &DictionaryError) -> ErrorCode {
    match err {
        DictionaryError::OutOfPoolSpace { .. } => ErrorCode::OutOfPoolSpace,
        DictionaryError::InvalidLetter { .. } | DictionaryError::PoolInUse { .. } => {
            ErrorCode::UnknownFileErr
        }
    }
}
