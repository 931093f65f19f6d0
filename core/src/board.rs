// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::{Color, Coord};

/// Square Go board of `size * size` cells.
///
/// A `Board` is value-comparable and deep-copyable: `clone()` never
/// aliases the original storage, and two boards are equal iff they have
/// the same size and every cell matches. Cell reads outside the board
/// return `None`, a sentinel distinguishable from any [`Color`]
/// (including `Empty`); writes outside the board are silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Size of the board (typically 9, 13, or 19); immutable
    size: u8,
    /// Cell states in row-major order
    fields: Vec<Color>,
}

impl Board {
    /// Create a new empty board with the specified size
    pub fn new(size: u8) -> Self {
        let cells = (size as usize) * (size as usize);
        Self {
            size,
            fields: vec![Color::Empty; cells],
        }
    }

    /// Get the size of the board
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    /// Check whether the coordinate addresses a cell on this board.
    ///
    /// Wire coordinates may be negative, so this takes `i32`.
    pub fn is_field(&self, x: i32, y: i32) -> bool {
        let size = self.size as i32;
        (0..size).contains(&x) && (0..size).contains(&y)
    }

    /// Get the cell state; `None` means "no such field".
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.is_field(x, y) {
            return None;
        }
        Some(self.fields[(y as usize) * (self.size as usize) + (x as usize)])
    }

    /// Set the cell state; no-op outside the board.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if self.is_field(x, y) {
            self.fields[(y as usize) * (self.size as usize) + (x as usize)] = color;
        }
    }

    /// Clear the cell; no-op outside the board.
    pub fn set_empty(&mut self, x: i32, y: i32) {
        self.set(x, y, Color::Empty);
    }

    /// Whether the cell exists and is unoccupied.
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(Color::Empty)
    }

    /// Convert a coordinate to its 1-based linear index.
    ///
    /// The index form is used by the graph algorithms (chain membership,
    /// neighbor sets); `index` and [`Board::coord`] invert exactly.
    pub fn index(&self, coord: Coord) -> usize {
        debug_assert!(coord.is_valid(self.size));
        (coord.y as usize) * (self.size as usize) + (coord.x as usize) + 1
    }

    /// Convert a 1-based linear index back to a coordinate.
    pub fn coord(&self, index: usize) -> Coord {
        debug_assert!((1..=self.cell_count()).contains(&index));
        let flat = index - 1;
        Coord::new(
            (flat % self.size as usize) as u8,
            (flat / self.size as usize) as u8,
        )
    }

    /// Cell state at a 1-based linear index.
    pub fn get_index(&self, index: usize) -> Color {
        debug_assert!((1..=self.cell_count()).contains(&index));
        self.fields[index - 1]
    }

    /// Set the cell state at a 1-based linear index.
    pub fn set_index(&mut self, index: usize, color: Color) {
        debug_assert!((1..=self.cell_count()).contains(&index));
        self.fields[index - 1] = color;
    }

    /// 1-based linear indices of the up to four orthogonal neighbors.
    pub fn neighbor_indices(&self, index: usize) -> Vec<usize> {
        let coord = self.coord(index);
        let mut result = Vec::with_capacity(4);
        let size = self.size as usize;

        // Up
        if coord.y > 0 {
            result.push(index - size);
        }
        // Down
        if coord.y < self.size - 1 {
            result.push(index + size);
        }
        // Left
        if coord.x > 0 {
            result.push(index - 1);
        }
        // Right
        if coord.x < self.size - 1 {
            result.push(index + 1);
        }

        result
    }

    /// All 1-based linear indices of this board.
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.cell_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_distinguishable_from_empty() {
        let board = Board::new(5);
        assert_eq!(board.get(0, 0), Some(Color::Empty));
        assert_eq!(board.get(5, 0), None);
        assert_eq!(board.get(-1, 2), None);
    }

    #[test]
    fn out_of_bounds_writes_are_noops() {
        let mut board = Board::new(5);
        let before = board.clone();
        board.set(5, 5, Color::Black);
        board.set(-1, 0, Color::White);
        assert_eq!(board, before);
    }

    #[test]
    fn index_and_coord_invert_exactly() {
        let board = Board::new(7);
        for index in board.indices() {
            assert_eq!(board.index(board.coord(index)), index);
        }
        assert_eq!(board.index(Coord::new(0, 0)), 1);
        assert_eq!(board.index(Coord::new(6, 6)), 49);
    }

    #[test]
    fn neighbor_indices_respect_edges() {
        let board = Board::new(5);
        // corner
        let mut corner = board.neighbor_indices(1);
        corner.sort_unstable();
        assert_eq!(corner, vec![2, 6]);
        // center of the board
        let center = board.index(Coord::new(2, 2));
        assert_eq!(board.neighbor_indices(center).len(), 4);
    }
}
