//! Dictionary - a prefix trie of valid words backed by the node pool.
//!
//! The dictionary is built once on a single thread, then frozen behind an
//! `Arc` and read concurrently by every search task. Nothing in the read
//! path takes a lock: `search` only needs `&self`.
//!
//! ```text
//! dictionary: ant, and, bat, but
//!
//!             root
//!            /    \
//!           a      b
//!           |     / \
//!           n    a   u
//!          / \   |   |
//!         d   t  t   t
//! ```

use tracing::{debug, warn};

use crate::arena::{LetterNode, NodeIndex, NodePool};
use crate::error::DictionaryError;

/// Words shorter than this are never stored.
pub const MIN_WORD_LEN: usize = 3;

/// What a trie walk must prove.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// The letters spell a prefix of at least one stored word.
    Path,
    /// The letters spell a stored word.
    Word,
}

pub struct Dictionary {
    pool: NodePool,
    root: NodeIndex,
    word_count: usize,
}

impl Dictionary {
    /// Create an empty dictionary drawing from a pool of `capacity` nodes.
    ///
    /// The root is the first node taken from the pool.
    pub fn new(capacity: u32) -> Result<Self, DictionaryError> {
        Self::with_pool(NodePool::new(capacity))
    }

    /// Create an empty dictionary on top of an existing pool.
    ///
    /// The pool must have no allocated nodes, otherwise
    /// [`DictionaryError::PoolInUse`] is returned.
    pub fn with_pool(mut pool: NodePool) -> Result<Self, DictionaryError> {
        if !pool.is_empty() {
            return Err(DictionaryError::PoolInUse {
                allocated: pool.allocated(),
            });
        }

        let capacity = pool.capacity();
        let root = pool.alloc().ok_or(DictionaryError::OutOfPoolSpace {
            word: String::new(),
            capacity,
        })?;

        Ok(Self {
            pool,
            root,
            word_count: 0,
        })
    }

    /// Insert a word into the trie.
    ///
    /// Words shorter than [`MIN_WORD_LEN`] and words already present are a
    /// no-op that still succeeds. If the pool runs out mid-word the
    /// letters created so far stay in the trie without a word flag; the
    /// caller is expected to discard the whole dictionary.
    pub fn insert_word(&mut self, word: &str) -> Result<(), DictionaryError> {
        debug_assert!(!word.is_empty(), "Empty word passed to insert_word");

        if word.len() < MIN_WORD_LEN {
            return Ok(());
        }

        if let Some(letter) = word.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(DictionaryError::InvalidLetter {
                word: word.to_owned(),
                letter,
            });
        }

        if self.contains_word(word) {
            return Ok(());
        }

        let mut current = self.root;
        for letter in word.bytes() {
            current = match self.pool.get(current).find_child(letter) {
                Some(child) => child,
                None => {
                    let Some(child) = self.pool.alloc() else {
                        warn!(word, capacity = self.pool.capacity(), "node pool exhausted");
                        return Err(DictionaryError::OutOfPoolSpace {
                            word: word.to_owned(),
                            capacity: self.pool.capacity(),
                        });
                    };
                    self.pool.get_mut(current).insert_child(letter, child);
                    child
                }
            };
        }

        self.pool.get_mut(current).is_word = true;
        self.word_count += 1;

        Ok(())
    }

    /// Insert every word in order, stopping at the first failure.
    ///
    /// Returns the number of words that were newly added.
    pub fn import_words<'a, I>(&mut self, words: I) -> Result<usize, DictionaryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let before = self.word_count;
        for word in words {
            self.insert_word(word)?;
        }

        let added = self.word_count - before;
        debug!(
            added,
            total = self.word_count,
            nodes = self.node_count(),
            "imported words"
        );
        Ok(added)
    }

    /// Walk the trie along `word`.
    ///
    /// Returns `false` as soon as a letter has no matching child. In
    /// [`SearchMode::Path`] a completed walk is enough; in
    /// [`SearchMode::Word`] the final node must end a word.
    pub fn search(&self, word: &str, mode: SearchMode) -> bool {
        debug_assert!(!word.is_empty(), "Empty word passed to search");

        let Some(node) = self.walk(word) else {
            return false;
        };

        match mode {
            SearchMode::Path => true,
            SearchMode::Word => self.pool.get(node).is_word,
        }
    }

    #[inline]
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.search(prefix, SearchMode::Path)
    }

    #[inline]
    pub fn contains_word(&self, word: &str) -> bool {
        self.search(word, SearchMode::Word)
    }

    fn walk(&self, letters: &str) -> Option<NodeIndex> {
        letters
            .bytes()
            .try_fold(self.root, |node, letter| self.pool.get(node).find_child(letter))
    }

    /// Number of distinct words stored.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of trie nodes in use, root included.
    #[inline]
    pub fn node_count(&self) -> u32 {
        self.pool.allocated()
    }

    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    #[inline]
    pub fn node(&self, index: NodeIndex) -> &LetterNode {
        self.pool.get(index)
    }

    #[inline]
    pub fn pool(&self) -> &NodePool {
        &self.pool
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("words", &self.word_count)
            .field("pool", &self.pool)
            .finish()
    }
}
