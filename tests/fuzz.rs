//! Fuzz Test - compares the trie and board parser against naive models.
//!
//! Random insert/query sequences run against a `HashSet` of words and
//! prefixes; random board text runs against a straightforward filter.

use std::collections::HashSet;

use boggle_solver::{Board, Dictionary, SearchMode, MIN_WORD_LEN};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Small alphabet so that random words share prefixes often.
const ALPHABET: &[u8] = b"abcde";

fn random_word(rng: &mut ChaCha8Rng, max_len: usize) -> String {
    let len = rng.gen_range(1..=max_len);
    (0..len).map(|_| *ALPHABET.choose(rng).unwrap() as char).collect()
}

struct ReferenceDictionary {
    words: HashSet<String>,
    prefixes: HashSet<String>,
}

impl ReferenceDictionary {
    fn new() -> Self {
        Self {
            words: HashSet::new(),
            prefixes: HashSet::new(),
        }
    }

    fn insert(&mut self, word: &str) {
        if word.len() < MIN_WORD_LEN {
            return;
        }
        for end in 1..=word.len() {
            self.prefixes.insert(word[..end].to_string());
        }
        self.words.insert(word.to_string());
    }

    fn node_count(&self) -> usize {
        // Every distinct prefix owns one node, plus the root
        self.prefixes.len() + 1
    }
}

#[test]
fn test_fuzz_trie_queries() {
    const SEED: u64 = 0xFEEDFACE;
    const OPS: usize = 10_000;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut dict = Dictionary::new(100_000).unwrap();
    let mut reference = ReferenceDictionary::new();

    for i in 0..OPS {
        let word = random_word(&mut rng, 7);

        if rng.gen_bool(0.4) {
            dict.insert_word(&word).unwrap();
            reference.insert(&word);
        }

        assert_eq!(
            dict.search(&word, SearchMode::Word),
            reference.words.contains(&word),
            "Word mismatch for {:?} at op {}",
            word,
            i
        );
        assert_eq!(
            dict.search(&word, SearchMode::Path),
            reference.prefixes.contains(&word),
            "Path mismatch for {:?} at op {}",
            word,
            i
        );
    }

    assert_eq!(dict.word_count(), reference.words.len());
}

#[test]
fn test_fuzz_node_count() {
    const SEED: u64 = 0xBADC0DE;
    const OPS: usize = 5_000;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut dict = Dictionary::new(100_000).unwrap();
    let mut reference = ReferenceDictionary::new();

    for _ in 0..OPS {
        let word = random_word(&mut rng, 10);
        dict.insert_word(&word).unwrap();
        reference.insert(&word);
    }

    assert_eq!(dict.node_count() as usize, reference.node_count());
    assert_eq!(dict.pool().free_count(), dict.pool().capacity() - dict.node_count());
}

#[test]
fn test_fuzz_board_parse() {
    const SEED: u64 = 0x12345678;
    const CASES: usize = 500;
    const NOISE: &[u8] = b"aBcDqQzZ 019-_!\t\r\n\n";

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);

    for case in 0..CASES {
        let len = rng.gen_range(0..80);
        let text: String = (0..len).map(|_| *NOISE.choose(&mut rng).unwrap() as char).collect();

        let expected: Vec<Vec<u8>> = text
            .lines()
            .map(|line| {
                line.bytes()
                    .filter(u8::is_ascii_alphabetic)
                    .map(|b| b.to_ascii_lowercase())
                    .collect::<Vec<u8>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        let board = Board::parse(&text);
        assert_eq!(board.rows(), expected.as_slice(), "Case {}: {:?}", case, text);
        assert_eq!(board.cell_count(), expected.iter().map(Vec::len).sum::<usize>());
        assert_eq!(board.positions().count(), board.cell_count());
    }
}
