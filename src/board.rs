//! Board - the letter grid searched for words.
//!
//! Rows may have different lengths ("jagged" boards). Every adjacency
//! check validates a column against the length of its own row.

use std::fmt;

/// (row, column) of a board cell
pub type Position = (usize, usize);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Vec<u8>>,
}

impl Board {
    /// Build a board from rows of cells.
    ///
    /// Cells are normalised the same way [`Board::parse`] treats text:
    /// ASCII letters are lowercased, anything else is dropped, and rows
    /// left empty are skipped.
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| normalize_row(row.into_iter()))
            .filter(|row| !row.is_empty())
            .collect();

        Self { rows }
    }

    /// Build a board from string rows, one cell per byte.
    pub fn from_rows(rows: &[&str]) -> Self {
        Self::new(rows.iter().map(|row| row.as_bytes().to_vec()).collect())
    }

    /// Parse board text, one row per line.
    ///
    /// Only ASCII letters are kept and they are lowercased; any other
    /// character is dropped. Lines left without letters are skipped.
    pub fn parse(text: &str) -> Self {
        let rows = text
            .lines()
            .map(|line| normalize_row(line.bytes()))
            .filter(|row| !row.is_empty())
            .collect();

        Self { rows }
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of `row`, or 0 if the row does not exist.
    #[inline]
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.rows.get(row)?.get(col).copied()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| (0..cells.len()).map(move |col| (row, col)))
    }
}

/// Lowercase ASCII letters, drop every other byte.
fn normalize_row(cells: impl Iterator<Item = u8>) -> Vec<u8> {
    cells
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_lowercase())
        .collect()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|&c| (c as char).to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_and_lowercases() {
        let board = Board::parse("P W Y R\n\n e,n,t,h \n--\nGsIq\n");
        assert_eq!(board, Board::from_rows(&["pwyr", "enth", "gsiq"]));
    }

    #[test]
    fn test_jagged_rows() {
        let board = Board::from_rows(&["pwyra", "enthem", "gsiq", "olsam"]);
        assert_eq!(board.row_count(), 4);
        assert_eq!(board.row_len(1), 6);
        assert_eq!(board.row_len(2), 4);
        assert_eq!(board.row_len(9), 0);
        assert_eq!(board.cell_count(), 20);
        assert_eq!(board.get(1, 5), Some(b'm'));
        assert_eq!(board.get(2, 4), None);
    }

    #[test]
    fn test_positions_row_major() {
        let board = Board::from_rows(&["ab", "c"]);
        let positions: Vec<_> = board.positions().collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&["ab", "cd"]);
        assert_eq!(board.to_string(), "a b\nc d\n");
    }

    #[test]
    fn test_constructors_normalise_cells() {
        let board = Board::from_rows(&["Pwyr", "E N-T!h", "", "42"]);
        assert_eq!(board.rows(), &[b"pwyr".to_vec(), b"enth".to_vec()]);

        let board = Board::new(vec![vec![b'Q', 0xEF, b'u'], vec![b'\n']]);
        assert_eq!(board, Board::from_rows(&["qu"]));
        assert!(board.rows().iter().flatten().all(u8::is_ascii_lowercase));
    }

    #[test]
    fn test_empty_board() {
        let board = Board::parse("123\n\n");
        assert!(board.is_empty());
        assert_eq!(board.positions().count(), 0);
    }
}
