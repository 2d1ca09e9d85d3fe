//! Field module - the playfield grid
//!
//! A 10x20 grid of color cells stored as a flat array for cache locality.
//! Coordinates: (x, y) with x in 0..10 left to right and y in 0..20 top to
//! bottom. The active piece may extend above the field (y < 0); those rows
//! are never blocked, but anything locked there is silently discarded.

use crate::pieces::Shape;
use blockfall_types::{Cell, CellColor, FIELD_COLS, FIELD_ROWS};

/// Total number of cells on the field.
const FIELD_SIZE: usize = FIELD_COLS * FIELD_ROWS;

/// The playfield - 10 columns x 20 rows, row-major.
///
/// Mutated only by [`Field::lock`] and [`Field::clear_full_lines`]; a cell is
/// non-empty iff a previously locked block occupies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a new empty field.
    pub fn new() -> Self {
        Self {
            cells: [None; FIELD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= FIELD_COLS as i8 || y < 0 || y >= FIELD_ROWS as i8 {
            return None;
        }
        Some((y as usize) * FIELD_COLS + (x as usize))
    }

    /// Get the cell at (x, y). Returns `None` when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set the cell at (x, y). Returns false when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `shape` can occupy origin (x, y).
    ///
    /// Side walls and the floor are hard for every filled cell; rows above
    /// the field (y < 0) are never blocked, which lets pieces spawn partially
    /// above the visible field. A filled cell landing on a real row must find
    /// it empty.
    pub fn allows(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape.minos().iter().all(|&(dx, dy)| {
            let fx = x + dx;
            let fy = y + dy;
            if fx < 0 || fx >= FIELD_COLS as i8 || fy >= FIELD_ROWS as i8 {
                return false;
            }
            fy < 0 || self.cells[(fy as usize) * FIELD_COLS + (fx as usize)].is_none()
        })
    }

    /// Write `color` into every cell `shape` occupies at origin (x, y).
    ///
    /// Cells above the top row are dropped; game-over detection happens at
    /// spawn, not here.
    pub fn lock(&mut self, shape: &Shape, x: i8, y: i8, color: CellColor) {
        for &(dx, dy) in shape.minos().iter() {
            let fy = y + dy;
            if fy >= 0 {
                self.set(x + dx, fy, Some(color));
            }
        }
    }

    fn row_full(&self, y: usize) -> bool {
        let start = y * FIELD_COLS;
        self.cells[start..start + FIELD_COLS]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove row `y` and insert an empty row at the top, preserving the
    /// relative order of the remaining rows.
    fn splice_row(&mut self, y: usize) {
        for row in (1..=y).rev() {
            let src = (row - 1) * FIELD_COLS;
            let dst = row * FIELD_COLS;
            self.cells.copy_within(src..src + FIELD_COLS, dst);
        }
        for cell in &mut self.cells[0..FIELD_COLS] {
            *cell = None;
        }
    }

    /// Remove every full row, scanning bottom to top, and return how many
    /// were cleared in this pass (0..=4 under standard piece geometry).
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = FIELD_ROWS as isize - 1;
        while y >= 0 {
            if self.row_full(y as usize) {
                self.splice_row(y as usize);
                cleared += 1;
                // The splice pulled a new row down to index y; re-check it.
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// True iff no cell is filled. Used for the perfect-clear bonus.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Reference to the raw cells, row-major, for rendering.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
